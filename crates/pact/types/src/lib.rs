//! Pact Domain Types
//!
//! Canonical records for the revenue-share agreement platform.
//!
//! # Key Concepts
//!
//! - **Contract**: bilateral agreement between two platform roles,
//!   carrying the revenue-share percentages, ordered clauses, and the
//!   recorded signatures. The stored `ContractStatus` is authoritative;
//!   view projections are derived and lossy.
//! - **Actor**: the authenticated identity performing an operation,
//!   an immutable value (id, role, blacklist flag, permission set)
//!   computed once per authenticated context and passed into every
//!   check. There is no ambient session state.
//! - **ApprovalSubmission**: a unit of user-generated content awaiting
//!   a single-shot moderation decision.
//! - **Signer**: derived projection of a contract party joined with the
//!   user directory; never stored.
//! - **PactError**: the shared error taxonomy. Every operation returns
//!   a typed failure, never an unchecked fault.

#![deny(unsafe_code)]

mod actor;
mod builder;
mod contract;
mod errors;
mod moderation;
mod view;

pub use actor::*;
pub use builder::*;
pub use contract::*;
pub use errors::*;
pub use moderation::*;
pub use view::*;
