//! End-to-end flows through the service surface with the in-memory store.

use std::sync::Arc;

use chrono::{Duration, Utc};
use pact_service::{PactService, ServiceConfig};
use pact_signing::ExpiryOutcome;
use pact_store::{ContractFilter, InMemoryPactStore, UserDirectory};
use pact_types::{
    Actor, ContentType, ContractBuilder, ContractId, ContractStatus, ContractType, CreateContract,
    PactError, Party, Role, RoleShare, UiStatus, UserId, UserProfile,
};

fn platform() -> (PactService, Arc<InMemoryPactStore>) {
    let store = Arc::new(InMemoryPactStore::new());
    (
        PactService::new(store.clone(), ServiceConfig::default()),
        store,
    )
}

fn owner() -> Actor {
    Actor::new("u-owner", Role::Owner)
        .with_permission("contracts.manage")
        .with_permission("users.manage")
}

fn admin() -> Actor {
    Actor::new("u-admin", Role::Admin)
}

fn moderator() -> Actor {
    Actor::new("u-mod", Role::Admin).with_permission("moderation.review")
}

fn split_request(owner_percent: i64, admin_percent: i64) -> CreateContract {
    ContractBuilder::new()
        .title("Channel revenue split")
        .contract_type(ContractType::OwnerAdmin)
        .party_a(Party::new("u-owner", Role::Owner))
        .party_b(Party::new("u-admin", Role::Admin))
        .start_date(Utc::now() - Duration::days(1))
        .share(RoleShare::new(Role::Owner, owner_percent))
        .share(RoleShare::new(Role::Admin, admin_percent))
        .build()
        .unwrap()
}

#[tokio::test]
async fn scenario_a_full_lifecycle() {
    let (service, _) = platform();
    let owner = owner();
    let admin = admin();

    let created = service.create(&owner, split_request(70, 30)).await.unwrap();
    assert_eq!(created.status, ContractStatus::Draft);

    let submitted = service.submit(&owner, &created.id).await.unwrap();
    assert_eq!(submitted.status, ContractStatus::PendingSignatureA);

    let signed_a = service
        .sign_a(&owner, &created.id, Utc::now(), Some("203.0.113.7".into()))
        .await
        .unwrap();
    assert_eq!(signed_a.status, ContractStatus::PendingSignatureB);

    let signed_b = service
        .sign_b(&admin, &created.id, Utc::now(), None)
        .await
        .unwrap();
    assert_eq!(signed_b.status, ContractStatus::Active);

    let terminated = service.terminate(&owner, &created.id).await.unwrap();
    assert_eq!(terminated.status, ContractStatus::Terminated);

    // Any further signature attempt is a state conflict.
    let err = service
        .sign_a(&owner, &created.id, Utc::now(), None)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        PactError::InvalidTransition {
            current: ContractStatus::Terminated,
            ..
        }
    ));

    // A second termination attempt loses the same way.
    let err = service.terminate(&owner, &created.id).await.unwrap_err();
    assert!(matches!(err, PactError::InvalidTransition { .. }));
}

#[tokio::test]
async fn scenario_b_bad_allocation_is_rejected_with_sum() {
    let (service, _) = platform();

    let request = ContractBuilder::new()
        .title("Three-way attempt")
        .contract_type(ContractType::OwnerAdmin)
        .party_a(Party::new("u-owner", Role::Owner))
        .party_b(Party::new("u-admin", Role::Admin))
        .start_date(Utc::now())
        .share(RoleShare::new(Role::Owner, 70))
        .share(RoleShare::new(Role::Admin, 20))
        .share(RoleShare::new(Role::Editor, 5))
        .build()
        .unwrap();

    let err = service.create(&owner(), request).await.unwrap_err();
    assert!(matches!(err, PactError::Allocation { sum: 95 }));

    // Nothing was persisted.
    let items = service
        .list(&owner(), &ContractFilter::default())
        .await
        .unwrap();
    assert!(items.is_empty());
}

#[tokio::test]
async fn scenario_c_moderation_decisions_are_single_shot() {
    let (service, _) = platform();
    let moderator = moderator();
    let author = Actor::new("u-author", Role::Editor);

    let submission = service
        .submit_content(&author, ContentType::Post)
        .await
        .unwrap();

    service
        .approve(&moderator, &submission.id, None)
        .await
        .unwrap();

    let err = service
        .approve(&moderator, &submission.id, None)
        .await
        .unwrap_err();
    assert!(matches!(err, PactError::AlreadyDecided(_)));

    // Rejection always requires non-empty notes.
    let second = service
        .submit_content(&author, ContentType::Media)
        .await
        .unwrap();
    let err = service
        .reject(&moderator, &second.id, "".into())
        .await
        .unwrap_err();
    assert!(matches!(err, PactError::Validation(_)));
}

#[tokio::test]
async fn scenario_d_role_changes_respect_the_closed_set() {
    let (service, store) = platform();
    store
        .upsert_user(UserProfile::new("u-editor", "Avery", Role::Editor))
        .await
        .unwrap();

    let err = service
        .change_role(&owner(), &UserId::new("u-editor"), "owner")
        .await
        .unwrap_err();
    assert!(matches!(err, PactError::InvalidRole(_)));

    let err = service
        .change_role(&owner(), &UserId::new("u-editor"), "superuser")
        .await
        .unwrap_err();
    assert!(matches!(err, PactError::InvalidRole(_)));

    let updated = service
        .change_role(&owner(), &UserId::new("u-editor"), "viewer")
        .await
        .unwrap();
    assert_eq!(updated.role, Role::Viewer);
}

#[tokio::test]
async fn expiry_sweep_expires_exactly_the_due_contracts() {
    let (service, _) = platform();
    let owner = owner();
    let admin = admin();

    // One contract activated with an end date already behind us.
    let mut due = split_request(70, 30);
    due.end_date = Some(Utc::now() - Duration::hours(1));
    let due = service.create(&owner, due).await.unwrap();
    service.submit(&owner, &due.id).await.unwrap();
    service.sign_a(&owner, &due.id, Utc::now(), None).await.unwrap();
    service.sign_b(&admin, &due.id, Utc::now(), None).await.unwrap();

    // One draft that the sweep must leave alone.
    let idle = service.create(&owner, split_request(50, 50)).await.unwrap();

    let expired = service.expire_due(Utc::now()).await.unwrap();
    assert_eq!(expired, vec![due.id.clone()]);

    let detail = service.contract_detail(&owner, &due.id).await.unwrap();
    assert_eq!(detail.contract.status, ContractStatus::Expired);
    // The view collapse renders expired as completed; the canonical
    // value stays retrievable alongside.
    assert_eq!(detail.ui_status, UiStatus::Completed);

    let idle_detail = service.contract_detail(&owner, &idle.id).await.unwrap();
    assert_eq!(idle_detail.contract.status, ContractStatus::Draft);

    // Re-running the sweep is a no-op.
    let expired_again = service.expire_due(Utc::now()).await.unwrap();
    assert!(expired_again.is_empty());

    // So is a direct expiry call against the terminal record.
    let outcome = service.expire(&due.id, Utc::now()).await.unwrap();
    assert_eq!(outcome, ExpiryOutcome::AlreadyTerminal);
}

#[tokio::test]
async fn signer_projection_joins_the_directory() {
    let (service, store) = platform();
    store
        .upsert_user(UserProfile::new("u-owner", "Jordan Vale", Role::Owner))
        .await
        .unwrap();
    store
        .upsert_user(UserProfile::new("u-admin", "Morgan Reyes", Role::Admin))
        .await
        .unwrap();

    let owner = owner();
    let created = service.create(&owner, split_request(70, 30)).await.unwrap();
    service.submit(&owner, &created.id).await.unwrap();
    service
        .sign_a(&owner, &created.id, Utc::now(), Some("198.51.100.4".into()))
        .await
        .unwrap();

    let detail = service.contract_detail(&owner, &created.id).await.unwrap();
    assert_eq!(detail.signers.len(), 2);

    let signer_a = &detail.signers[0];
    assert_eq!(signer_a.display_name, "Jordan Vale");
    assert!(signer_a.signed);
    assert_eq!(signer_a.origin_address.as_deref(), Some("198.51.100.4"));

    let signer_b = &detail.signers[1];
    assert_eq!(signer_b.display_name, "Morgan Reyes");
    assert!(!signer_b.signed);

    // Text search reaches signer display names.
    let found = service
        .list(
            &owner,
            &ContractFilter {
                text: Some("reyes".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(found.len(), 1);
}

#[tokio::test]
async fn blacklisted_user_loses_access_until_cleared() {
    let (service, store) = platform();
    let owner = owner();
    store
        .upsert_user(UserProfile::new("u-editor", "Avery", Role::Editor))
        .await
        .unwrap();

    // Blacklisting without a reason is refused.
    let err = service
        .toggle_blacklist(&owner, &UserId::new("u-editor"), None)
        .await
        .unwrap_err();
    assert!(matches!(err, PactError::Validation(_)));

    let blocked = service
        .toggle_blacklist(&owner, &UserId::new("u-editor"), Some("repeated spam"))
        .await
        .unwrap();
    assert!(blocked.blacklisted);

    // A session resolved from the blacklisted profile is denied.
    let mut blocked_actor = Actor::new("u-editor", Role::Editor);
    blocked_actor.blacklisted = blocked.blacklisted;
    let err = service
        .submit_content(&blocked_actor, ContentType::Post)
        .await
        .unwrap_err();
    assert!(matches!(err, PactError::PermissionDenied { .. }));

    // The off-transition needs no reason and clears the stored one.
    let cleared = service
        .toggle_blacklist(&owner, &UserId::new("u-editor"), None)
        .await
        .unwrap();
    assert!(!cleared.blacklisted);
    assert!(cleared.blacklist_reason.is_none());
}

#[tokio::test]
async fn sign_b_on_pending_a_is_a_state_conflict() {
    let (service, _) = platform();
    let owner = owner();
    let admin = admin();

    let created = service.create(&owner, split_request(70, 30)).await.unwrap();
    service.submit(&owner, &created.id).await.unwrap();

    let err = service
        .sign_b(&admin, &created.id, Utc::now(), None)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        PactError::InvalidTransition {
            current: ContractStatus::PendingSignatureA,
            attempted: ContractStatus::Active,
        }
    ));
}

#[tokio::test]
async fn unknown_contract_is_not_found() {
    let (service, _) = platform();
    let err = service
        .submit(&owner(), &ContractId::new("missing"))
        .await
        .unwrap_err();
    assert!(matches!(err, PactError::NotFound(_)));
}
