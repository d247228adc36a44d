//! In-memory reference implementation for the Pact store traits.
//!
//! Deterministic and test-friendly. The compare-and-set semantics here
//! are the contract any production backend must match: a lifecycle write
//! only lands while the stored status equals the caller's expectation.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use chrono::Utc;
use pact_types::{
    ApprovalSubmission, Contract, ContractId, ContractStatus, PactError, PactResult, SubmissionId,
    SubmissionStatus, UserId, UserProfile,
};

use crate::traits::{ContractRecords, SubmissionRecords, UserDirectory};

/// In-memory Pact store adapter.
#[derive(Default)]
pub struct InMemoryPactStore {
    contracts: RwLock<HashMap<ContractId, Contract>>,
    submissions: RwLock<HashMap<SubmissionId, ApprovalSubmission>>,
    users: RwLock<HashMap<UserId, UserProfile>>,
}

impl InMemoryPactStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ContractRecords for InMemoryPactStore {
    async fn insert_contract(&self, contract: Contract) -> PactResult<()> {
        let mut guard = self
            .contracts
            .write()
            .map_err(|_| PactError::Lock("contracts lock poisoned".into()))?;

        if guard.contains_key(&contract.id) {
            return Err(PactError::Conflict(format!(
                "contract {} already exists",
                contract.id
            )));
        }

        guard.insert(contract.id.clone(), contract);
        Ok(())
    }

    async fn get_contract(&self, id: &ContractId) -> PactResult<Option<Contract>> {
        let guard = self
            .contracts
            .read()
            .map_err(|_| PactError::Lock("contracts lock poisoned".into()))?;
        Ok(guard.get(id).cloned())
    }

    async fn update_contract(
        &self,
        expected_status: ContractStatus,
        mut contract: Contract,
    ) -> PactResult<()> {
        let mut guard = self
            .contracts
            .write()
            .map_err(|_| PactError::Lock("contracts lock poisoned".into()))?;

        let stored = guard
            .get_mut(&contract.id)
            .ok_or_else(|| PactError::NotFound(format!("contract {}", contract.id)))?;

        if stored.status != expected_status {
            return Err(PactError::InvalidTransition {
                current: stored.status,
                attempted: contract.status,
            });
        }

        contract.updated_at = Utc::now();
        *stored = contract;
        Ok(())
    }

    async fn list_contracts(&self) -> PactResult<Vec<Contract>> {
        let guard = self
            .contracts
            .read()
            .map_err(|_| PactError::Lock("contracts lock poisoned".into()))?;
        let mut contracts: Vec<Contract> = guard.values().cloned().collect();
        contracts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(contracts)
    }
}

#[async_trait]
impl SubmissionRecords for InMemoryPactStore {
    async fn insert_submission(&self, submission: ApprovalSubmission) -> PactResult<()> {
        let mut guard = self
            .submissions
            .write()
            .map_err(|_| PactError::Lock("submissions lock poisoned".into()))?;

        if guard.contains_key(&submission.id) {
            return Err(PactError::Conflict(format!(
                "submission {} already exists",
                submission.id
            )));
        }

        guard.insert(submission.id.clone(), submission);
        Ok(())
    }

    async fn get_submission(&self, id: &SubmissionId) -> PactResult<Option<ApprovalSubmission>> {
        let guard = self
            .submissions
            .read()
            .map_err(|_| PactError::Lock("submissions lock poisoned".into()))?;
        Ok(guard.get(id).cloned())
    }

    async fn decide_submission(&self, submission: ApprovalSubmission) -> PactResult<()> {
        let mut guard = self
            .submissions
            .write()
            .map_err(|_| PactError::Lock("submissions lock poisoned".into()))?;

        let stored = guard
            .get_mut(&submission.id)
            .ok_or_else(|| PactError::NotFound(format!("submission {}", submission.id)))?;

        if stored.status.is_decided() {
            return Err(PactError::AlreadyDecided(submission.id.clone()));
        }

        *stored = submission;
        Ok(())
    }

    async fn list_submissions(
        &self,
        status: Option<SubmissionStatus>,
    ) -> PactResult<Vec<ApprovalSubmission>> {
        let guard = self
            .submissions
            .read()
            .map_err(|_| PactError::Lock("submissions lock poisoned".into()))?;
        let mut submissions: Vec<ApprovalSubmission> = guard
            .values()
            .filter(|s| status.map(|wanted| s.status == wanted).unwrap_or(true))
            .cloned()
            .collect();
        submissions.sort_by(|a, b| a.submitted_at.cmp(&b.submitted_at));
        Ok(submissions)
    }
}

#[async_trait]
impl UserDirectory for InMemoryPactStore {
    async fn get_user(&self, id: &UserId) -> PactResult<Option<UserProfile>> {
        let guard = self
            .users
            .read()
            .map_err(|_| PactError::Lock("users lock poisoned".into()))?;
        Ok(guard.get(id).cloned())
    }

    async fn upsert_user(&self, profile: UserProfile) -> PactResult<()> {
        let mut guard = self
            .users
            .write()
            .map_err(|_| PactError::Lock("users lock poisoned".into()))?;
        guard.insert(profile.id.clone(), profile);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pact_types::{ContentType, ContractType, Party, Role};

    fn draft(id: &str, title: &str) -> Contract {
        let now = Utc::now();
        Contract {
            id: ContractId::new(id),
            title: title.into(),
            contract_type: ContractType::OwnerAdmin,
            status: ContractStatus::Draft,
            created_at: now,
            updated_at: now,
            start_date: now,
            end_date: None,
            party_a: Party::new("u-owner", Role::Owner),
            party_b: Party::new("u-admin", Role::Admin),
            revenue_share_a: 70,
            revenue_share_b: 30,
            clauses: vec![],
            signed_by_a: None,
            signed_by_b: None,
        }
    }

    #[tokio::test]
    async fn test_insert_and_get() {
        let store = InMemoryPactStore::new();
        store.insert_contract(draft("c-1", "Split")).await.unwrap();

        let found = store
            .get_contract(&ContractId::new("c-1"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.title, "Split");
        assert!(store
            .get_contract(&ContractId::new("c-2"))
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_duplicate_insert_conflicts() {
        let store = InMemoryPactStore::new();
        store.insert_contract(draft("c-1", "Split")).await.unwrap();
        let err = store
            .insert_contract(draft("c-1", "Split again"))
            .await
            .unwrap_err();
        assert!(matches!(err, PactError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_update_cas_rejects_stale_expectation() {
        let store = InMemoryPactStore::new();
        store.insert_contract(draft("c-1", "Split")).await.unwrap();

        // First writer wins.
        let mut submitted = draft("c-1", "Split");
        submitted.status = ContractStatus::PendingSignatureA;
        store
            .update_contract(ContractStatus::Draft, submitted.clone())
            .await
            .unwrap();

        // Second writer raced on the same draft snapshot and must lose.
        let err = store
            .update_contract(ContractStatus::Draft, submitted)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            PactError::InvalidTransition {
                current: ContractStatus::PendingSignatureA,
                attempted: ContractStatus::PendingSignatureA,
            }
        ));
    }

    #[tokio::test]
    async fn test_decide_submission_once() {
        let store = InMemoryPactStore::new();
        let mut submission = ApprovalSubmission::new(ContentType::Post, UserId::new("u-1"));
        store.insert_submission(submission.clone()).await.unwrap();

        submission.status = SubmissionStatus::Approved;
        submission.decided_at = Some(Utc::now());
        store.decide_submission(submission.clone()).await.unwrap();

        let err = store.decide_submission(submission).await.unwrap_err();
        assert!(matches!(err, PactError::AlreadyDecided(_)));
    }

    #[tokio::test]
    async fn test_directory_upsert_and_lookup() {
        let store = InMemoryPactStore::new();
        store
            .upsert_user(UserProfile::new("u-1", "Avery", Role::Editor))
            .await
            .unwrap();
        let profile = store
            .get_user(&UserId::new("u-1"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(profile.display_name, "Avery");
    }
}
