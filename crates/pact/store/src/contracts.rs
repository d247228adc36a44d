//! Contract creation, lookup, and filtered listing.

use std::collections::HashSet;
use std::sync::Arc;

use chrono::Utc;
use pact_allocation::AllocationValidator;
use pact_types::{
    Contract, ContractId, ContractStatus, ContractType, CreateContract, PactError, PactResult,
    Party, SignatureRecord, Signer,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::traits::{ContractRecords, UserDirectory};

/// Optional listing filters. All present filters combine with AND.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ContractFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ContractStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contract_type: Option<ContractType>,
    /// Case-insensitive match against the title or any signer's
    /// display name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

/// Facade over the contract records and the user directory.
///
/// Creation is the single validation point: required fields, party/type
/// coherence, and the revenue-allocation invariant are all enforced here
/// before a draft is persisted.
pub struct ContractStore {
    records: Arc<dyn ContractRecords>,
    directory: Arc<dyn UserDirectory>,
    validator: AllocationValidator,
}

impl ContractStore {
    pub fn new(records: Arc<dyn ContractRecords>, directory: Arc<dyn UserDirectory>) -> Self {
        Self {
            records,
            directory,
            validator: AllocationValidator::new(),
        }
    }

    /// Validate a creation request and persist the draft.
    pub async fn create(&self, request: CreateContract) -> PactResult<Contract> {
        validate_fields(&request)?;
        let (revenue_share_a, revenue_share_b) = self
            .validator
            .split_for(request.contract_type, &request.shares)?;

        let now = Utc::now();
        let contract = Contract {
            id: ContractId::generate(),
            title: request.title.trim().to_string(),
            contract_type: request.contract_type,
            status: ContractStatus::Draft,
            created_at: now,
            updated_at: now,
            start_date: request.start_date,
            end_date: request.end_date,
            party_a: request.party_a,
            party_b: request.party_b,
            revenue_share_a,
            revenue_share_b,
            clauses: request.clauses,
            signed_by_a: None,
            signed_by_b: None,
        };

        debug!(contract_id = %contract.id, contract_type = ?contract.contract_type, "Persisting draft contract");
        self.records.insert_contract(contract.clone()).await?;
        Ok(contract)
    }

    /// Get the canonical record, failing `NotFound` when absent.
    pub async fn fetch(&self, id: &ContractId) -> PactResult<Contract> {
        self.records
            .get_contract(id)
            .await?
            .ok_or_else(|| PactError::NotFound(format!("contract {}", id)))
    }

    /// List contracts matching the filter, newest-first.
    pub async fn list(&self, filter: &ContractFilter) -> PactResult<Vec<Contract>> {
        let contracts = self.records.list_contracts().await?;
        let mut matched = Vec::new();

        for contract in contracts {
            if let Some(status) = filter.status {
                if contract.status != status {
                    continue;
                }
            }
            if let Some(contract_type) = filter.contract_type {
                if contract.contract_type != contract_type {
                    continue;
                }
            }
            if let Some(text) = &filter.text {
                if !self.matches_text(&contract, text).await? {
                    continue;
                }
            }
            matched.push(contract);
        }

        Ok(matched)
    }

    /// Derived signer projections for both parties.
    pub async fn signers(&self, contract: &Contract) -> PactResult<Vec<Signer>> {
        Ok(vec![
            self.signer(&contract.party_a, &contract.signed_by_a).await?,
            self.signer(&contract.party_b, &contract.signed_by_b).await?,
        ])
    }

    async fn signer(
        &self,
        party: &Party,
        signature: &Option<SignatureRecord>,
    ) -> PactResult<Signer> {
        // A directory miss must not fail a read; fall back to the raw id.
        let display_name = self
            .directory
            .get_user(&party.id)
            .await?
            .map(|profile| profile.display_name)
            .unwrap_or_else(|| party.id.0.clone());

        Ok(Signer {
            id: party.id.clone(),
            display_name,
            role: party.role,
            signed: signature.is_some(),
            signed_at: signature.as_ref().map(|s| s.signed_at),
            origin_address: signature.as_ref().and_then(|s| s.origin_address.clone()),
        })
    }

    async fn matches_text(&self, contract: &Contract, text: &str) -> PactResult<bool> {
        let needle = text.to_lowercase();
        if contract.title.to_lowercase().contains(&needle) {
            return Ok(true);
        }
        for signer in self.signers(contract).await? {
            if signer.display_name.to_lowercase().contains(&needle) {
                return Ok(true);
            }
        }
        Ok(false)
    }
}

fn validate_fields(request: &CreateContract) -> PactResult<()> {
    if request.title.trim().is_empty() {
        return Err(PactError::Validation("title must not be empty".into()));
    }
    if request.party_a.id.0.trim().is_empty() || request.party_b.id.0.trim().is_empty() {
        return Err(PactError::Validation(
            "both parties must be identified".into(),
        ));
    }
    if request.party_a.id == request.party_b.id {
        return Err(PactError::Validation(
            "parties must be distinct users".into(),
        ));
    }

    let (role_a, role_b) = request.contract_type.required_roles();
    if request.party_a.role != role_a || request.party_b.role != role_b {
        return Err(PactError::Validation(format!(
            "party roles {}/{} do not match contract type (expected {}/{})",
            request.party_a.role, request.party_b.role, role_a, role_b
        )));
    }

    if let Some(end) = request.end_date {
        if end < request.start_date {
            return Err(PactError::Validation(
                "end date precedes start date".into(),
            ));
        }
    }

    let mut clause_numbers = HashSet::new();
    for clause in &request.clauses {
        if !clause_numbers.insert(clause.clause_number) {
            return Err(PactError::Validation(format!(
                "duplicate clause number {}",
                clause.clause_number
            )));
        }
    }

    Ok(())
}
