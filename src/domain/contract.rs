use std::borrow::Cow;

use serde::{Deserialize, Serialize};

use crate::domain::fields::lenient_text;
use crate::domain::types::ContractId;

/// Lifecycle status of a contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ContractStatus {
    Draft,
    PendingAssignment,
    PendingCountersign,
    PendingFinalization,
    PendingApproval,
    PendingSigning,
    Active,
    Completed,
    Expired,
    Rejected,
}

impl ContractStatus {
    pub const ALL: [ContractStatus; 10] = [
        ContractStatus::Draft,
        ContractStatus::PendingAssignment,
        ContractStatus::PendingCountersign,
        ContractStatus::PendingFinalization,
        ContractStatus::PendingApproval,
        ContractStatus::PendingSigning,
        ContractStatus::Active,
        ContractStatus::Completed,
        ContractStatus::Expired,
        ContractStatus::Rejected,
    ];

    /// Wire code, e.g. `PENDING_APPROVAL`.
    pub fn code(self) -> &'static str {
        match self {
            ContractStatus::Draft => "DRAFT",
            ContractStatus::PendingAssignment => "PENDING_ASSIGNMENT",
            ContractStatus::PendingCountersign => "PENDING_COUNTERSIGN",
            ContractStatus::PendingFinalization => "PENDING_FINALIZATION",
            ContractStatus::PendingApproval => "PENDING_APPROVAL",
            ContractStatus::PendingSigning => "PENDING_SIGNING",
            ContractStatus::Active => "ACTIVE",
            ContractStatus::Completed => "COMPLETED",
            ContractStatus::Expired => "EXPIRED",
            ContractStatus::Rejected => "REJECTED",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ContractStatus::Draft => "Draft",
            ContractStatus::PendingAssignment => "Pending assignment",
            ContractStatus::PendingCountersign => "Pending countersign",
            ContractStatus::PendingFinalization => "Pending finalization",
            ContractStatus::PendingApproval => "Pending approval",
            ContractStatus::PendingSigning => "Pending signing",
            ContractStatus::Active => "Active",
            ContractStatus::Completed => "Completed",
            ContractStatus::Expired => "Expired",
            ContractStatus::Rejected => "Rejected",
        }
    }

    /// Bootstrap colour used for the status badge.
    pub fn badge(self) -> &'static str {
        match self {
            ContractStatus::Active | ContractStatus::Completed => "success",
            ContractStatus::Rejected | ContractStatus::Expired => "danger",
            ContractStatus::Draft => "secondary",
            _ => "warning",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|status| status.code().eq_ignore_ascii_case(code.trim()))
    }
}

/// Human readable label for a status code; unknown codes are returned as-is.
pub fn status_label(code: &str) -> Cow<'_, str> {
    match ContractStatus::from_code(code) {
        Some(status) => Cow::Borrowed(status.label()),
        None => Cow::Borrowed(code),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerRef {
    pub customer_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DrafterRef {
    pub username: Option<String>,
}

/// Contract as returned by the contract search report.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contract {
    pub id: ContractId,
    pub contract_number: Option<String>,
    pub contract_name: Option<String>,
    pub customer: Option<CustomerRef>,
    pub drafter: Option<DrafterRef>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub start_date: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub end_date: Option<String>,
    /// Raw status code so that codes unknown to this console still render.
    pub status: Option<String>,
}
