//! Configuration model loaded from external sources.

use serde::Deserialize;

use crate::pagination::SIBLING_COUNT;

#[derive(Clone, Debug, Deserialize)]
/// Settings of the console host and its backend connection.
pub struct ServerConfig {
    pub address: String,
    pub port: u16,
    /// Base url of the contract-management REST API.
    pub api_base_url: String,
    /// Where the browser is sent once the backend rejects the session.
    #[serde(default = "default_login_url")]
    pub login_url: String,
    pub templates_dir: String,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    #[serde(default = "default_sibling_count")]
    pub sibling_count: usize,
}

fn default_login_url() -> String {
    crate::controller::DEFAULT_LOGIN_URL.to_string()
}

fn default_request_timeout_secs() -> u64 {
    10
}

fn default_sibling_count() -> usize {
    SIBLING_COUNT
}
