//! Derived view projections.
//!
//! These are intentionally lossy collapses of the canonical record for
//! simplified listings. The canonical value stays retrievable wherever
//! full fidelity is needed (signing-order UI, audits).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::actor::{Role, UserId};

/// Simplified contract status shown in listings.
///
/// Both pending-signature states collapse to `Pending`; `Expired`
/// collapses to `Completed`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UiStatus {
    Draft,
    Pending,
    Active,
    Completed,
    Terminated,
}

/// Simplified contract category shown in listings.
///
/// Owner/editor and admin/editor contracts both render as `Creative`:
/// an intentional many-to-one table, not a silent default.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UiType {
    Management,
    Creative,
}

/// One contract party joined with the user directory; never stored.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Signer {
    pub id: UserId,
    pub display_name: String,
    pub role: Role,
    pub signed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signed_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub origin_address: Option<String>,
}
