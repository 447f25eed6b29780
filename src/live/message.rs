use serde::Deserialize;
use serde_json::Value;

use crate::domain::contract::status_label;

/// Subscriptions of the live feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Topic {
    ContractStatus,
    Assignments,
    Tasks,
    Processes,
}

impl Topic {
    pub const ALL: [Topic; 4] = [
        Topic::ContractStatus,
        Topic::Assignments,
        Topic::Tasks,
        Topic::Processes,
    ];

    pub fn destination(self) -> &'static str {
        match self {
            Topic::ContractStatus => "/topic/contract-status",
            Topic::Assignments => "/user/queue/assignments",
            Topic::Tasks => "/user/queue/tasks",
            Topic::Processes => "/user/queue/processes",
        }
    }

    pub fn from_destination(destination: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|topic| topic.destination() == destination)
    }
}

/// Server push message, discriminated by its `type` field.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LiveMessage {
    #[serde(rename_all = "camelCase")]
    ContractStatus {
        contract_id: i64,
        status: String,
        timestamp: Option<i64>,
    },
    #[serde(rename_all = "camelCase")]
    Assignment {
        contract_id: i64,
        message: Option<String>,
    },
    #[serde(rename_all = "camelCase")]
    Task {
        contract_id: Option<i64>,
        message: Option<String>,
    },
    #[serde(rename_all = "camelCase")]
    Process {
        contract_id: i64,
        process_type: Option<String>,
        state: Option<String>,
    },
    #[serde(other)]
    Unknown,
}

/// Request to reload one screen, with a notice for the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefreshTrigger {
    pub screen: &'static str,
    pub notice: String,
}

impl LiveMessage {
    /// Decodes a frame body received on `topic`.
    ///
    /// Status frames without a `type` field are read as `CONTRACT_STATUS`.
    pub fn decode(topic: Topic, body: &str) -> Result<Self, serde_json::Error> {
        let mut value: Value = serde_json::from_str(body)?;
        if let (Topic::ContractStatus, Value::Object(fields)) = (topic, &mut value) {
            fields
                .entry("type")
                .or_insert_with(|| Value::from("CONTRACT_STATUS"));
        }
        serde_json::from_value(value)
    }

    pub fn trigger(&self) -> Option<RefreshTrigger> {
        let notice = match self {
            LiveMessage::ContractStatus {
                contract_id,
                status,
                ..
            } => format!(
                "Contract #{contract_id} status changed to: {}",
                status_label(status)
            ),
            LiveMessage::Assignment {
                contract_id,
                message,
            } => message
                .clone()
                .unwrap_or_else(|| format!("Contract #{contract_id} was assigned to you.")),
            LiveMessage::Task {
                contract_id,
                message,
            } => match (message, contract_id) {
                (Some(message), _) => message.clone(),
                (None, Some(id)) => format!("Contract #{id} has a new task for you."),
                (None, None) => "You have a new task.".to_string(),
            },
            LiveMessage::Process {
                contract_id,
                process_type,
                state,
            } => format!(
                "Contract #{contract_id} {} is now {}.",
                process_type.as_deref().unwrap_or("process"),
                state.as_deref().unwrap_or("updated")
            ),
            LiveMessage::Unknown => return None,
        };

        Some(RefreshTrigger {
            screen: crate::screens::CONTRACTS.key,
            notice,
        })
    }
}
