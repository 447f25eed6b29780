use serde::Deserialize;

use crate::domain::fields::lenient_text;
use crate::domain::types::AuditLogId;

/// One entry of the system audit trail.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AuditLog {
    pub id: Option<AuditLogId>,
    pub username: Option<String>,
    pub action: Option<String>,
    pub details: Option<String>,
    /// ISO-8601 text or epoch milliseconds.
    #[serde(default, deserialize_with = "lenient_text")]
    pub timestamp: Option<String>,
}
