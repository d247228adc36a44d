use async_trait::async_trait;
use pact_types::{
    ApprovalSubmission, Contract, ContractId, ContractStatus, PactResult, SubmissionId,
    SubmissionStatus, UserId, UserProfile,
};

/// Storage interface for canonical contract records.
#[async_trait]
pub trait ContractRecords: Send + Sync {
    /// Insert a newly created draft. Fails `Conflict` on a duplicate id.
    async fn insert_contract(&self, contract: Contract) -> PactResult<()>;

    /// Get one contract by id.
    async fn get_contract(&self, id: &ContractId) -> PactResult<Option<Contract>>;

    /// Compare-and-set replace.
    ///
    /// Persists `contract` only while the stored status still equals
    /// `expected_status`; a mismatch fails `InvalidTransition` carrying
    /// the stored and attempted states.
    async fn update_contract(
        &self,
        expected_status: ContractStatus,
        contract: Contract,
    ) -> PactResult<()>;

    /// All contracts, newest-first.
    async fn list_contracts(&self) -> PactResult<Vec<Contract>>;
}

/// Storage interface for moderation submissions.
#[async_trait]
pub trait SubmissionRecords: Send + Sync {
    async fn insert_submission(&self, submission: ApprovalSubmission) -> PactResult<()>;

    async fn get_submission(&self, id: &SubmissionId) -> PactResult<Option<ApprovalSubmission>>;

    /// Persist a decision. Compare-and-set on `Pending`: fails
    /// `AlreadyDecided` if the stored submission is no longer pending.
    async fn decide_submission(&self, submission: ApprovalSubmission) -> PactResult<()>;

    /// Submissions with the given status (all when `None`), oldest-first.
    async fn list_submissions(
        &self,
        status: Option<SubmissionStatus>,
    ) -> PactResult<Vec<ApprovalSubmission>>;
}

/// The user/profile directory consumed for signer projection and
/// mutated by role-change and blacklist operations.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    async fn get_user(&self, id: &UserId) -> PactResult<Option<UserProfile>>;

    async fn upsert_user(&self, profile: UserProfile) -> PactResult<()>;
}

/// Unified store bundle used by the service surface.
pub trait PactStore: ContractRecords + SubmissionRecords + UserDirectory + Send + Sync {}

impl<T> PactStore for T where
    T: ContractRecords + SubmissionRecords + UserDirectory + Send + Sync
{
}
