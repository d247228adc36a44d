//! Canonical → view translation tables.
//!
//! Both functions are pure and total: every canonical value maps to
//! exactly one view value, enforced by exhaustive matches with no
//! wildcard arm. The collapses are lossy on purpose; callers that need
//! full fidelity read the canonical record.

use pact_types::{ContractStatus, ContractType, UiStatus, UiType};

/// Collapse a canonical status to its listing projection.
///
/// Both pending-signature states render as `Pending`; `Expired` renders
/// as `Completed`.
pub fn translate_status(status: ContractStatus) -> UiStatus {
    match status {
        ContractStatus::Draft => UiStatus::Draft,
        ContractStatus::PendingSignatureA => UiStatus::Pending,
        ContractStatus::PendingSignatureB => UiStatus::Pending,
        ContractStatus::Active => UiStatus::Active,
        ContractStatus::Completed => UiStatus::Completed,
        ContractStatus::Expired => UiStatus::Completed,
        ContractStatus::Terminated => UiStatus::Terminated,
    }
}

/// Collapse a contract type to its listing category.
///
/// Owner/editor and admin/editor agreements both render as `Creative`,
/// a documented many-to-one mapping.
pub fn translate_type(contract_type: ContractType) -> UiType {
    match contract_type {
        ContractType::OwnerAdmin => UiType::Management,
        ContractType::OwnerEditor => UiType::Creative,
        ContractType::AdminEditor => UiType::Creative,
    }
}
