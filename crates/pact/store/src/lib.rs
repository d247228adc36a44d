//! Pact record store.
//!
//! Canonical contract, submission, and user records live behind the
//! traits in this crate. The store contract is deliberately small:
//!
//! - per-record reads and inserts,
//! - compare-and-set updates keyed on the record's current status, so
//!   two concurrent lifecycle attempts on the same record cannot both
//!   succeed; the loser observes the conflict as a typed error, never
//!   a silent overwrite.
//!
//! `InMemoryPactStore` is the deterministic, test-friendly reference
//! adapter. Production deployments substitute a transactional backend
//! behind the same traits.
//!
//! The crate also carries the `ContractStore` facade (creation,
//! filtering, signer projection) and the total canonical→view
//! translation tables.

#![deny(unsafe_code)]

mod contracts;
mod memory;
mod traits;
mod translate;

pub use contracts::{ContractFilter, ContractStore};
pub use memory::InMemoryPactStore;
pub use traits::{ContractRecords, PactStore, SubmissionRecords, UserDirectory};
pub use translate::{translate_status, translate_type};
