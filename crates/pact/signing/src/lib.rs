//! Signing coordinator: the contract lifecycle state machine.
//!
//! Transitions mutate a loaded contract snapshot and are pure with
//! respect to storage; the caller persists the result through the
//! store's compare-and-set write, so of two racing lifecycle attempts
//! exactly one lands and the loser observes the conflict.
//!
//! Lifecycle: `Draft` → `PendingSignatureA` → `PendingSignatureB` →
//! `Active`, with `Terminated` reachable from any non-terminal state by
//! explicit owner action and `Expired` entered by the scheduler once an
//! active contract outlives its end date. `Completed` is a distinct
//! terminal value kept representable; no transition here enters it.

#![deny(unsafe_code)]

use chrono::{DateTime, Utc};
use pact_types::{Actor, Contract, ContractStatus, PactError, PactResult, Role, SignatureRecord};
use tracing::debug;

/// Outcome of a scheduler-triggered expiry check.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExpiryOutcome {
    /// The contract was active past its end date and is now expired.
    Expired,
    /// The contract is not due: still running, missing an end date, or
    /// not yet submitted.
    NotDue,
    /// The contract was already in a terminal state; nothing changed.
    AlreadyTerminal,
}

/// Drives contract lifecycle transitions.
#[derive(Clone, Copy, Debug, Default)]
pub struct SigningCoordinator;

impl SigningCoordinator {
    pub fn new() -> Self {
        Self
    }

    /// `Draft` → `PendingSignatureA`.
    ///
    /// Preconditions: the stored allocation still sums to 100 and both
    /// parties are identified.
    pub fn submit(&self, contract: &mut Contract) -> PactResult<()> {
        if contract.status != ContractStatus::Draft {
            return Err(PactError::InvalidTransition {
                current: contract.status,
                attempted: ContractStatus::PendingSignatureA,
            });
        }

        let sum = i64::from(contract.revenue_share_a) + i64::from(contract.revenue_share_b);
        if sum != 100 {
            return Err(PactError::Allocation { sum });
        }

        if contract.party_a.id.0.trim().is_empty()
            || contract.party_b.id.0.trim().is_empty()
            || contract.party_a.id == contract.party_b.id
        {
            return Err(PactError::Validation(
                "both parties must be identified before submission".into(),
            ));
        }

        debug!(contract_id = %contract.id, "Contract submitted for signature");
        contract.status = ContractStatus::PendingSignatureA;
        Ok(())
    }

    /// Party A signs: `PendingSignatureA` → `PendingSignatureB`.
    ///
    /// Precondition order: a terminal contract fails with the state
    /// conflict; an existing party-A signature fails `AlreadySigned`;
    /// any other wrong state fails the state conflict; a non-party
    /// actor is a permission failure, not a transition failure.
    pub fn sign_a(
        &self,
        contract: &mut Contract,
        actor: &Actor,
        timestamp: DateTime<Utc>,
        origin_address: Option<String>,
    ) -> PactResult<()> {
        if contract.status.is_terminal() {
            return Err(PactError::InvalidTransition {
                current: contract.status,
                attempted: ContractStatus::PendingSignatureB,
            });
        }
        if contract.signed_by_a.is_some() {
            return Err(PactError::AlreadySigned(contract.party_a.id.clone()));
        }
        if contract.status != ContractStatus::PendingSignatureA {
            return Err(PactError::InvalidTransition {
                current: contract.status,
                attempted: ContractStatus::PendingSignatureB,
            });
        }
        if actor.id != contract.party_a.id {
            return Err(PactError::PermissionDenied {
                actor: actor.id.clone(),
                required: format!("signature of party {}", contract.party_a.id),
            });
        }

        debug!(contract_id = %contract.id, signer = %actor.id, "Party A signed");
        contract.signed_by_a = Some(SignatureRecord {
            signed_at: timestamp,
            origin_address,
        });
        contract.status = ContractStatus::PendingSignatureB;
        Ok(())
    }

    /// Party B signs: `PendingSignatureB` → `Active`.
    ///
    /// Party A's signature must already be recorded; signatures are
    /// strictly ordered.
    pub fn sign_b(
        &self,
        contract: &mut Contract,
        actor: &Actor,
        timestamp: DateTime<Utc>,
        origin_address: Option<String>,
    ) -> PactResult<()> {
        if contract.status.is_terminal() {
            return Err(PactError::InvalidTransition {
                current: contract.status,
                attempted: ContractStatus::Active,
            });
        }
        if contract.signed_by_b.is_some() {
            return Err(PactError::AlreadySigned(contract.party_b.id.clone()));
        }
        if contract.signed_by_a.is_none() || contract.status != ContractStatus::PendingSignatureB {
            return Err(PactError::InvalidTransition {
                current: contract.status,
                attempted: ContractStatus::Active,
            });
        }
        if actor.id != contract.party_b.id {
            return Err(PactError::PermissionDenied {
                actor: actor.id.clone(),
                required: format!("signature of party {}", contract.party_b.id),
            });
        }

        debug!(contract_id = %contract.id, signer = %actor.id, "Party B signed; contract active");
        contract.signed_by_b = Some(SignatureRecord {
            signed_at: timestamp,
            origin_address,
        });
        contract.status = ContractStatus::Active;
        Ok(())
    }

    /// Explicit owner termination from any non-terminal state.
    pub fn terminate(&self, contract: &mut Contract, actor: &Actor) -> PactResult<()> {
        if actor.role != Role::Owner {
            return Err(PactError::PermissionDenied {
                actor: actor.id.clone(),
                required: "owner role".into(),
            });
        }
        if contract.status.is_terminal() {
            return Err(PactError::InvalidTransition {
                current: contract.status,
                attempted: ContractStatus::Terminated,
            });
        }

        debug!(contract_id = %contract.id, from = %contract.status, "Contract terminated");
        contract.status = ContractStatus::Terminated;
        Ok(())
    }

    /// Scheduler-triggered expiry.
    ///
    /// Transitions only an active contract whose end date has passed.
    /// Safe to invoke repeatedly and against terminal records; the
    /// external trigger may observe stale state and must not fault.
    pub fn expire(&self, contract: &mut Contract, now: DateTime<Utc>) -> ExpiryOutcome {
        if contract.status.is_terminal() {
            return ExpiryOutcome::AlreadyTerminal;
        }
        if contract.status != ContractStatus::Active {
            return ExpiryOutcome::NotDue;
        }
        match contract.end_date {
            Some(end) if now > end => {
                debug!(contract_id = %contract.id, "Contract expired");
                contract.status = ContractStatus::Expired;
                ExpiryOutcome::Expired
            }
            _ => ExpiryOutcome::NotDue,
        }
    }
}
