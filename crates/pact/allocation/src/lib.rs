//! Revenue allocation validation.
//!
//! The one numeric invariant the platform must never violate: the declared
//! revenue-share percentages of a contract sum to exactly 100. Enforced at
//! creation time and re-checked as a submission precondition.

#![deny(unsafe_code)]

use pact_types::{ContractType, PactError, PactResult, RoleShare};

/// Every declaration must account for exactly this total.
pub const TOTAL_SHARE: i64 = 100;

/// Pure numeric-invariant checker for revenue-share declarations.
#[derive(Clone, Copy, Debug, Default)]
pub struct AllocationValidator;

impl AllocationValidator {
    pub fn new() -> Self {
        Self
    }

    /// Validate a share declaration.
    ///
    /// Each share must be in `0..=100` and each role may be declared at
    /// most once; violations fail with `Validation`. The sum over exactly
    /// the declared shares must equal 100, else `Allocation` carrying the
    /// computed sum.
    pub fn validate(&self, shares: &[RoleShare]) -> PactResult<()> {
        if shares.is_empty() {
            return Err(PactError::Validation(
                "at least one revenue share must be declared".into(),
            ));
        }

        for share in shares {
            if share.percent < 0 {
                return Err(PactError::Validation(format!(
                    "revenue share for {} is negative: {}",
                    share.role, share.percent
                )));
            }
            if share.percent > TOTAL_SHARE {
                return Err(PactError::Validation(format!(
                    "revenue share for {} exceeds 100: {}",
                    share.role, share.percent
                )));
            }
        }

        for (i, share) in shares.iter().enumerate() {
            if shares[..i].iter().any(|s| s.role == share.role) {
                return Err(PactError::Validation(format!(
                    "duplicate revenue share for role {}",
                    share.role
                )));
            }
        }

        let sum: i64 = shares.iter().map(|s| s.percent).sum();
        if sum != TOTAL_SHARE {
            return Err(PactError::Allocation { sum });
        }

        Ok(())
    }

    /// Resolve a validated declaration into the (party A, party B)
    /// percentage pair for the contract type's required roles.
    pub fn split_for(
        &self,
        contract_type: ContractType,
        shares: &[RoleShare],
    ) -> PactResult<(u32, u32)> {
        self.validate(shares)?;

        let (role_a, role_b) = contract_type.required_roles();
        let percent_of = |role| {
            shares
                .iter()
                .find(|s| s.role == role)
                .map(|s| s.percent as u32)
                .ok_or_else(|| {
                    PactError::Validation(format!("no revenue share declared for role {}", role))
                })
        };

        Ok((percent_of(role_a)?, percent_of(role_b)?))
    }
}
