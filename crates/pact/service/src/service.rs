//! The authorization-gated operation set.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use pact_authz::AuthorizationGate;
use pact_moderation::ApprovalQueue;
use pact_signing::{ExpiryOutcome, SigningCoordinator};
use pact_store::{
    translate_status, translate_type, ContractFilter, ContractRecords, ContractStore, PactStore,
    UserDirectory,
};
use pact_types::{
    Actor, ApprovalSubmission, ContentType, Contract, ContractId, CreateContract, PactError,
    PactResult, Role, Signer, SubmissionId, UiStatus, UiType, UserId, UserProfile,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::config::ServiceConfig;

/// One listing row: the canonical record plus its lossy view projections.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ContractListItem {
    pub contract: Contract,
    pub ui_status: UiStatus,
    pub ui_type: UiType,
}

/// Full-fidelity detail view: canonical record, signer projections, and
/// the view collapse alongside, never instead of, the stored status.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ContractDetail {
    pub contract: Contract,
    pub signers: Vec<Signer>,
    pub ui_status: UiStatus,
    pub ui_type: UiType,
}

/// The Pact operation surface.
pub struct PactService {
    contracts: ContractStore,
    moderation: ApprovalQueue,
    signing: SigningCoordinator,
    gate: AuthorizationGate,
    records: Arc<dyn ContractRecords>,
    directory: Arc<dyn UserDirectory>,
    config: ServiceConfig,
}

impl PactService {
    /// Assemble the surface over one store backend.
    pub fn new<S>(store: Arc<S>, config: ServiceConfig) -> Self
    where
        S: PactStore + 'static,
    {
        Self {
            contracts: ContractStore::new(store.clone(), store.clone()),
            moderation: ApprovalQueue::new(store.clone()),
            signing: SigningCoordinator::new(),
            gate: AuthorizationGate::new(),
            records: store.clone(),
            directory: store,
            config,
        }
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    // ── Contracts ────────────────────────────────────────────────────

    /// List contracts with their view projections.
    pub async fn list(
        &self,
        actor: &Actor,
        filter: &ContractFilter,
    ) -> PactResult<Vec<ContractListItem>> {
        self.gate.require_permission(actor, None)?;
        let contracts = self.contracts.list(filter).await?;
        Ok(contracts
            .into_iter()
            .map(|contract| ContractListItem {
                ui_status: translate_status(contract.status),
                ui_type: translate_type(contract.contract_type),
                contract,
            })
            .collect())
    }

    /// Canonical record plus signer projections.
    pub async fn contract_detail(
        &self,
        actor: &Actor,
        id: &ContractId,
    ) -> PactResult<ContractDetail> {
        self.gate.require_permission(actor, None)?;
        let contract = self.contracts.fetch(id).await?;
        let signers = self.contracts.signers(&contract).await?;
        Ok(ContractDetail {
            ui_status: translate_status(contract.status),
            ui_type: translate_type(contract.contract_type),
            signers,
            contract,
        })
    }

    /// Validate and persist a draft. Only owner/admin actors create
    /// contracts, and only with the contracts grant.
    pub async fn create(&self, actor: &Actor, request: CreateContract) -> PactResult<Contract> {
        self.gate
            .require_permission(actor, Some(&self.config.contracts_permission))?;
        if !matches!(actor.role, Role::Owner | Role::Admin) {
            return Err(PactError::PermissionDenied {
                actor: actor.id.clone(),
                required: "owner or admin role".into(),
            });
        }

        let contract = self.contracts.create(request).await?;
        info!(contract_id = %contract.id, actor = %actor.id, "Contract created");
        Ok(contract)
    }

    /// Move a draft into the signature flow.
    pub async fn submit(&self, actor: &Actor, id: &ContractId) -> PactResult<Contract> {
        self.gate
            .require_permission(actor, Some(&self.config.contracts_permission))?;

        let mut contract = self.contracts.fetch(id).await?;
        let expected = contract.status;
        self.signing.submit(&mut contract)?;
        self.records.update_contract(expected, contract.clone()).await?;
        info!(contract_id = %id, actor = %actor.id, "Contract submitted for signature");
        Ok(contract)
    }

    /// Record party A's signature.
    pub async fn sign_a(
        &self,
        actor: &Actor,
        id: &ContractId,
        timestamp: DateTime<Utc>,
        origin_address: Option<String>,
    ) -> PactResult<Contract> {
        self.gate.require_permission(actor, None)?;

        let mut contract = self.contracts.fetch(id).await?;
        let expected = contract.status;
        self.signing
            .sign_a(&mut contract, actor, timestamp, origin_address)?;
        self.records.update_contract(expected, contract.clone()).await?;
        info!(contract_id = %id, signer = %actor.id, "Signature A recorded");
        Ok(contract)
    }

    /// Record party B's signature; the contract becomes active.
    pub async fn sign_b(
        &self,
        actor: &Actor,
        id: &ContractId,
        timestamp: DateTime<Utc>,
        origin_address: Option<String>,
    ) -> PactResult<Contract> {
        self.gate.require_permission(actor, None)?;

        let mut contract = self.contracts.fetch(id).await?;
        let expected = contract.status;
        self.signing
            .sign_b(&mut contract, actor, timestamp, origin_address)?;
        self.records.update_contract(expected, contract.clone()).await?;
        info!(contract_id = %id, signer = %actor.id, "Signature B recorded; contract active");
        Ok(contract)
    }

    /// Owner-only termination from any non-terminal state.
    pub async fn terminate(&self, actor: &Actor, id: &ContractId) -> PactResult<Contract> {
        self.gate.require_permission(actor, None)?;

        let mut contract = self.contracts.fetch(id).await?;
        let expected = contract.status;
        self.signing.terminate(&mut contract, actor)?;
        self.records.update_contract(expected, contract.clone()).await?;
        info!(contract_id = %id, actor = %actor.id, "Contract terminated");
        Ok(contract)
    }

    /// Scheduler entry point for one contract.
    pub async fn expire(&self, id: &ContractId, now: DateTime<Utc>) -> PactResult<ExpiryOutcome> {
        let mut contract = self.contracts.fetch(id).await?;
        let expected = contract.status;
        let outcome = self.signing.expire(&mut contract, now);
        if outcome == ExpiryOutcome::Expired {
            self.records.update_contract(expected, contract).await?;
            info!(contract_id = %id, "Contract expired");
        }
        Ok(outcome)
    }

    /// Scheduler sweep: expire every active contract whose end date has
    /// passed. A record that races with a concurrent lifecycle write is
    /// skipped; the sweep re-observes it on the next tick.
    pub async fn expire_due(&self, now: DateTime<Utc>) -> PactResult<Vec<ContractId>> {
        let contracts = self.records.list_contracts().await?;
        let mut expired = Vec::new();

        for mut contract in contracts {
            let expected = contract.status;
            if self.signing.expire(&mut contract, now) != ExpiryOutcome::Expired {
                continue;
            }
            let id = contract.id.clone();
            match self.records.update_contract(expected, contract).await {
                Ok(()) => expired.push(id),
                Err(PactError::InvalidTransition { current, .. }) => {
                    warn!(contract_id = %id, current = %current, "Expiry lost a concurrent update; skipping");
                }
                Err(other) => return Err(other),
            }
        }

        debug!(count = expired.len(), "Expiry sweep finished");
        Ok(expired)
    }

    // ── Moderation ───────────────────────────────────────────────────

    /// Enqueue the actor's own content for review.
    pub async fn submit_content(
        &self,
        actor: &Actor,
        content_type: ContentType,
    ) -> PactResult<ApprovalSubmission> {
        self.gate.require_permission(actor, None)?;
        self.moderation.submit(content_type, actor.id.clone()).await
    }

    pub async fn approve(
        &self,
        actor: &Actor,
        id: &SubmissionId,
        notes: Option<String>,
    ) -> PactResult<ApprovalSubmission> {
        self.gate
            .require_permission(actor, Some(&self.config.moderation_permission))?;
        self.moderation.approve(id, notes).await
    }

    pub async fn reject(
        &self,
        actor: &Actor,
        id: &SubmissionId,
        notes: String,
    ) -> PactResult<ApprovalSubmission> {
        self.gate
            .require_permission(actor, Some(&self.config.moderation_permission))?;
        self.moderation.reject(id, notes).await
    }

    pub async fn pending_submissions(&self, actor: &Actor) -> PactResult<Vec<ApprovalSubmission>> {
        self.gate
            .require_permission(actor, Some(&self.config.moderation_permission))?;
        self.moderation.pending().await
    }

    // ── User administration ──────────────────────────────────────────

    /// Change a user's role within the closed role set.
    pub async fn change_role(
        &self,
        actor: &Actor,
        user_id: &UserId,
        new_role: &str,
    ) -> PactResult<UserProfile> {
        self.gate
            .require_permission(actor, Some(&self.config.users_permission))?;

        let mut target = self
            .directory
            .get_user(user_id)
            .await?
            .ok_or_else(|| PactError::NotFound(format!("user {}", user_id)))?;

        target.role = self.gate.change_role(&target, new_role)?;
        self.directory.upsert_user(target.clone()).await?;
        info!(target = %user_id, new_role = %target.role, actor = %actor.id, "Role changed");
        Ok(target)
    }

    /// Flip a user's blacklist state; a reason is mandatory when
    /// blacklisting.
    pub async fn toggle_blacklist(
        &self,
        actor: &Actor,
        user_id: &UserId,
        reason: Option<&str>,
    ) -> PactResult<UserProfile> {
        self.gate
            .require_permission(actor, Some(&self.config.users_permission))?;

        let target = self
            .directory
            .get_user(user_id)
            .await?
            .ok_or_else(|| PactError::NotFound(format!("user {}", user_id)))?;

        let updated = self.gate.toggle_blacklist(&target, reason)?;
        self.directory.upsert_user(updated.clone()).await?;
        info!(target = %user_id, blacklisted = updated.blacklisted, actor = %actor.id, "Blacklist toggled");
        Ok(updated)
    }
}
