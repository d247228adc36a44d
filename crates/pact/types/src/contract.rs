//! Contract records: the canonical agreement representation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::actor::{Role, UserId};

/// Contract identifier.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContractId(pub String);

impl ContractId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }
}

impl std::fmt::Display for ContractId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Which role pair a contract binds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContractType {
    OwnerAdmin,
    OwnerEditor,
    AdminEditor,
}

impl ContractType {
    /// The role pair this type binds, as (party A role, party B role).
    pub fn required_roles(&self) -> (Role, Role) {
        match self {
            ContractType::OwnerAdmin => (Role::Owner, Role::Admin),
            ContractType::OwnerEditor => (Role::Owner, Role::Editor),
            ContractType::AdminEditor => (Role::Admin, Role::Editor),
        }
    }
}

/// Canonical lifecycle state. The stored value is authoritative;
/// view layers work from the lossy [`crate::UiStatus`] projection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContractStatus {
    Draft,
    PendingSignatureA,
    PendingSignatureB,
    Active,
    Completed,
    Terminated,
    Expired,
}

impl ContractStatus {
    /// Terminal states admit no further transitions.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            ContractStatus::Completed | ContractStatus::Terminated | ContractStatus::Expired
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ContractStatus::Draft => "draft",
            ContractStatus::PendingSignatureA => "pending_signature_a",
            ContractStatus::PendingSignatureB => "pending_signature_b",
            ContractStatus::Active => "active",
            ContractStatus::Completed => "completed",
            ContractStatus::Terminated => "terminated",
            ContractStatus::Expired => "expired",
        }
    }
}

impl std::fmt::Display for ContractStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One side of a contract.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Party {
    pub id: UserId,
    pub role: Role,
}

impl Party {
    pub fn new(id: impl Into<String>, role: Role) -> Self {
        Self {
            id: UserId::new(id),
            role,
        }
    }
}

/// Clause category tag.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClauseType {
    RevenueShare,
    Obligation,
    Confidentiality,
    Termination,
    Custom,
}

/// A single contract clause. `clause_number` is unique within a contract;
/// `order_index` controls display ordering independently of numbering.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Clause {
    pub clause_number: u32,
    pub title: String,
    pub content: String,
    pub clause_type: ClauseType,
    pub mandatory: bool,
    pub order_index: u32,
}

/// A recorded signature with its optional origin address.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignatureRecord {
    pub signed_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub origin_address: Option<String>,
}

/// A declared revenue share for one role.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleShare {
    pub role: Role,
    pub percent: i64,
}

impl RoleShare {
    pub fn new(role: Role, percent: i64) -> Self {
        Self { role, percent }
    }
}

/// The canonical contract record.
///
/// Invariant: `revenue_share_a + revenue_share_b == 100` for every stored
/// contract. Party roles are immutable once either signature is recorded.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Contract {
    pub id: ContractId,
    pub title: String,
    pub contract_type: ContractType,
    pub status: ContractStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub start_date: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<DateTime<Utc>>,
    pub party_a: Party,
    pub party_b: Party,
    pub revenue_share_a: u32,
    pub revenue_share_b: u32,
    pub clauses: Vec<Clause>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signed_by_a: Option<SignatureRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signed_by_b: Option<SignatureRecord>,
}

impl Contract {
    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    /// Whether any signature has been recorded, the point past which
    /// party roles are frozen.
    pub fn has_any_signature(&self) -> bool {
        self.signed_by_a.is_some() || self.signed_by_b.is_some()
    }
}
