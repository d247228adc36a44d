//! Client-side contract draft builder.
//!
//! The multi-step creation wizard accumulates a partial draft here and
//! submits it as one atomic `CreateContract` request. Nothing is persisted
//! server-side until `build()` has produced a complete request, so
//! partial drafts never reach the store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::contract::{Clause, ContractType, Party, RoleShare};
use crate::errors::{PactError, PactResult};

/// One atomic contract-creation request.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CreateContract {
    pub title: String,
    pub contract_type: ContractType,
    pub party_a: Party,
    pub party_b: Party,
    pub start_date: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<DateTime<Utc>>,
    pub shares: Vec<RoleShare>,
    pub clauses: Vec<Clause>,
}

/// Accumulates a contract draft across wizard steps.
#[derive(Clone, Debug, Default)]
pub struct ContractBuilder {
    title: Option<String>,
    contract_type: Option<ContractType>,
    party_a: Option<Party>,
    party_b: Option<Party>,
    start_date: Option<DateTime<Utc>>,
    end_date: Option<DateTime<Utc>>,
    shares: Vec<RoleShare>,
    clauses: Vec<Clause>,
}

impl ContractBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn contract_type(mut self, contract_type: ContractType) -> Self {
        self.contract_type = Some(contract_type);
        self
    }

    pub fn party_a(mut self, party: Party) -> Self {
        self.party_a = Some(party);
        self
    }

    pub fn party_b(mut self, party: Party) -> Self {
        self.party_b = Some(party);
        self
    }

    pub fn start_date(mut self, start: DateTime<Utc>) -> Self {
        self.start_date = Some(start);
        self
    }

    pub fn end_date(mut self, end: DateTime<Utc>) -> Self {
        self.end_date = Some(end);
        self
    }

    pub fn share(mut self, share: RoleShare) -> Self {
        self.shares.push(share);
        self
    }

    pub fn clause(mut self, clause: Clause) -> Self {
        self.clauses.push(clause);
        self
    }

    /// Produce the atomic creation request.
    ///
    /// Checks completeness only. Field-level and allocation validation
    /// happen in the store's `create`, which is the single enforcement
    /// point for requests arriving from any client.
    pub fn build(self) -> PactResult<CreateContract> {
        let title = self
            .title
            .ok_or_else(|| PactError::Validation("title is required".into()))?;
        let contract_type = self
            .contract_type
            .ok_or_else(|| PactError::Validation("contract type is required".into()))?;
        let party_a = self
            .party_a
            .ok_or_else(|| PactError::Validation("party A is required".into()))?;
        let party_b = self
            .party_b
            .ok_or_else(|| PactError::Validation("party B is required".into()))?;
        let start_date = self
            .start_date
            .ok_or_else(|| PactError::Validation("start date is required".into()))?;
        if self.shares.is_empty() {
            return Err(PactError::Validation(
                "revenue shares are required".into(),
            ));
        }

        Ok(CreateContract {
            title,
            contract_type,
            party_a,
            party_b,
            start_date,
            end_date: self.end_date,
            shares: self.shares,
            clauses: self.clauses,
        })
    }
}
