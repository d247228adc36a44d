//! Moderation approval queue.
//!
//! User-submitted content waits here for exactly one decision. Decisions
//! gate downstream publication and payment, so they are deliberately not
//! idempotent: re-deciding an already-decided submission is a typed
//! failure, never a silent success.

#![deny(unsafe_code)]

use std::sync::Arc;

use chrono::Utc;
use pact_store::SubmissionRecords;
use pact_types::{
    ApprovalSubmission, ContentType, PactError, PactResult, SubmissionId, SubmissionStatus, UserId,
};
use tracing::{debug, info};

/// Single-shot moderation decisions over pending submissions.
pub struct ApprovalQueue {
    records: Arc<dyn SubmissionRecords>,
}

impl ApprovalQueue {
    pub fn new(records: Arc<dyn SubmissionRecords>) -> Self {
        Self { records }
    }

    /// Enqueue newly submitted content as pending.
    pub async fn submit(
        &self,
        content_type: ContentType,
        submitted_by: UserId,
    ) -> PactResult<ApprovalSubmission> {
        let submission = ApprovalSubmission::new(content_type, submitted_by);
        debug!(submission_id = %submission.id, content_type = ?content_type, "Content submitted for review");
        self.records.insert_submission(submission.clone()).await?;
        Ok(submission)
    }

    /// Approve a pending submission. Review notes are optional.
    pub async fn approve(
        &self,
        id: &SubmissionId,
        notes: Option<String>,
    ) -> PactResult<ApprovalSubmission> {
        self.decide(id, SubmissionStatus::Approved, notes).await
    }

    /// Reject a pending submission. Review notes are mandatory; the
    /// submitter must be told why.
    pub async fn reject(&self, id: &SubmissionId, notes: String) -> PactResult<ApprovalSubmission> {
        if notes.trim().is_empty() {
            return Err(PactError::Validation(
                "review notes are required to reject a submission".into(),
            ));
        }
        self.decide(id, SubmissionStatus::Rejected, Some(notes)).await
    }

    /// Submissions still awaiting a decision, oldest-first.
    pub async fn pending(&self) -> PactResult<Vec<ApprovalSubmission>> {
        self.records
            .list_submissions(Some(SubmissionStatus::Pending))
            .await
    }

    async fn decide(
        &self,
        id: &SubmissionId,
        status: SubmissionStatus,
        notes: Option<String>,
    ) -> PactResult<ApprovalSubmission> {
        let mut submission = self
            .records
            .get_submission(id)
            .await?
            .ok_or_else(|| PactError::NotFound(format!("submission {}", id)))?;

        if submission.status.is_decided() {
            return Err(PactError::AlreadyDecided(id.clone()));
        }

        submission.status = status;
        submission.review_notes = notes.map(|n| n.trim().to_string());
        submission.decided_at = Some(Utc::now());

        // CAS on pending: a racing moderator loses with AlreadyDecided.
        self.records.decide_submission(submission.clone()).await?;
        info!(submission_id = %id, decision = ?status, "Submission decided");
        Ok(submission)
    }
}
