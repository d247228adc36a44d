//! Moderation submissions awaiting a single-shot decision.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::actor::UserId;

/// Submission identifier.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SubmissionId(pub String);

impl SubmissionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }
}

impl std::fmt::Display for SubmissionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// What kind of content was submitted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentType {
    Post,
    Media,
    Profile,
}

/// Moderation state. `Approved` and `Rejected` are terminal; decisions
/// gate downstream publication and are never silently re-applied.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionStatus {
    Pending,
    Approved,
    Rejected,
}

impl SubmissionStatus {
    pub fn is_decided(&self) -> bool {
        matches!(self, SubmissionStatus::Approved | SubmissionStatus::Rejected)
    }
}

/// A unit of user-generated content awaiting moderation.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ApprovalSubmission {
    pub id: SubmissionId,
    pub content_type: ContentType,
    pub status: SubmissionStatus,
    pub submitted_at: DateTime<Utc>,
    pub submitted_by: UserId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub review_notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub decided_at: Option<DateTime<Utc>>,
}

impl ApprovalSubmission {
    /// A fresh pending submission.
    pub fn new(content_type: ContentType, submitted_by: UserId) -> Self {
        Self {
            id: SubmissionId::generate(),
            content_type,
            status: SubmissionStatus::Pending,
            submitted_at: Utc::now(),
            submitted_by,
            review_notes: None,
            decided_at: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_submission_is_pending() {
        let s = ApprovalSubmission::new(ContentType::Post, UserId::new("u-1"));
        assert_eq!(s.status, SubmissionStatus::Pending);
        assert!(!s.status.is_decided());
        assert!(s.review_notes.is_none());
        assert!(s.decided_at.is_none());
    }
}
