use crate::modules::campus::core::collections::Events;
use crate::modules::campus::core::records::Event;
use crate::modules::campus::core::view_state::LoadPhase;
use crate::modules::campus::use_cases::toggle_membership::decision::MutationOutcome;
use crate::modules::campus::view::ActivationReport;
use crate::shared::core::primitives::{RecordId, UserId};
use crate::shared::core::session::SessionChange;
use crate::shared::infrastructure::navigation::Route;
use crate::tests::fixtures::harness::ViewHarness;
use crate::tests::fixtures::records::EventBuilder;
use rstest::{fixture, rstest};

#[fixture]
fn events() -> Vec<Event> {
    vec![
        EventBuilder::new("e1").title("Spring Fest").date(2025, 3, 1).build(),
        EventBuilder::new("e2").title("Hack Night").date(2025, 2, 1).build(),
    ]
}

#[rstest]
#[tokio::test]
async fn it_should_list_events_by_ascending_date(events: Vec<Event>) {
    let harness = ViewHarness::<Events>::anonymous(events);
    let report = harness.view.activate().await;

    assert_eq!(
        report,
        ActivationReport {
            records: Some(2),
            memberships: None
        }
    );
    let ids: Vec<String> = harness
        .view
        .records()
        .await
        .iter()
        .map(|e| e.id.to_string())
        .collect();
    assert_eq!(ids, vec!["e2", "e1"]);
    assert_eq!(harness.view.phase().await, LoadPhase::Loaded);
}

#[rstest]
#[tokio::test]
async fn it_should_never_show_memberships_without_a_session(events: Vec<Event>) {
    let harness = ViewHarness::<Events>::anonymous(events);
    harness.seed_membership("u-1", "e1").await;
    harness.view.activate().await;

    for id in ["e1", "e2", "unknown"] {
        assert!(!harness.view.is_member(&RecordId::new(id)).await);
    }
}

#[rstest]
#[tokio::test]
async fn it_should_load_registrations_of_the_signed_in_user(events: Vec<Event>) {
    let harness = ViewHarness::<Events>::signed_in(events, "u-1");
    harness.seed_membership("u-1", "e1").await;
    harness.seed_membership("u-1", "e1").await;
    harness.seed_membership("someone-else", "e2").await;

    let report = harness.view.activate().await;

    assert_eq!(report.memberships, Some(1));
    assert!(harness.view.is_member(&RecordId::new("e1")).await);
    assert!(!harness.view.is_member(&RecordId::new("e2")).await);
}

#[rstest]
#[tokio::test]
async fn it_should_redirect_an_anonymous_registration_to_sign_in(events: Vec<Event>) {
    let harness = ViewHarness::<Events>::anonymous(events);
    harness.view.activate().await;
    let before = harness.view.snapshot().await.edges;

    let outcome = harness.view.join(&RecordId::new("c1")).await.unwrap();

    assert_eq!(outcome, MutationOutcome::RedirectedToSignIn);
    assert_eq!(harness.table.write_count(), 0);
    assert_eq!(harness.navigator.visited(), vec![Route::SignIn]);
    assert_eq!(harness.view.snapshot().await.edges, before);
}

#[rstest]
#[tokio::test]
async fn it_should_mark_an_event_registered_once_the_store_accepts(events: Vec<Event>) {
    let harness = ViewHarness::<Events>::signed_in(events, "u-1");
    harness.view.activate().await;

    let outcome = harness.view.join(&RecordId::new("e2")).await.unwrap();

    assert_eq!(outcome, MutationOutcome::Joined);
    assert!(harness.view.is_member(&RecordId::new("e2")).await);
    assert_eq!(harness.table.edges().await.len(), 1);
    assert_eq!(
        harness.notifier.titles(),
        vec!["Registration Successful!".to_string()]
    );
}

#[rstest]
#[tokio::test]
async fn it_should_keep_one_membership_when_the_store_returns_duplicates_later(
    events: Vec<Event>,
) {
    let harness = ViewHarness::<Events>::signed_in(events, "u-1");
    harness.view.activate().await;
    harness.view.join(&RecordId::new("e1")).await.unwrap();
    harness.seed_membership("u-1", "e1").await;

    harness
        .view
        .on_session_changed(SessionChange::signed_out())
        .await
        .unwrap();
    harness
        .view
        .on_session_changed(SessionChange::signed_in(UserId::new("u-1")))
        .await
        .unwrap();

    let snapshot = harness.view.snapshot().await;
    assert_eq!(snapshot.edges.len(), 1);
    assert!(snapshot.is_member(&RecordId::new("e1")));
}

#[rstest]
#[tokio::test]
async fn it_should_leave_registrations_untouched_when_registration_fails(events: Vec<Event>) {
    let harness = ViewHarness::<Events>::signed_in(events, "u-1");
    harness.seed_membership("u-1", "e1").await;
    harness.view.activate().await;
    let before = harness.view.snapshot().await.edges;

    harness.table.set_offline(true);
    let result = harness.view.join(&RecordId::new("e2")).await;

    assert!(result.is_err());
    assert_eq!(harness.view.snapshot().await.edges, before);
    assert_eq!(harness.notifier.titles(), vec!["Registration failed".to_string()]);
}

#[rstest]
#[tokio::test]
async fn it_should_unregister(events: Vec<Event>) {
    let harness = ViewHarness::<Events>::signed_in(events, "u-1");
    harness.seed_membership("u-1", "e1").await;
    harness.view.activate().await;

    let outcome = harness.view.leave(&RecordId::new("e1")).await.unwrap();

    assert_eq!(outcome, MutationOutcome::Left);
    assert!(!harness.view.is_member(&RecordId::new("e1")).await);
    assert!(harness.table.edges().await.is_empty());
}

#[rstest]
#[tokio::test]
async fn it_should_report_a_failed_fetch_and_keep_the_view_usable(events: Vec<Event>) {
    let harness = ViewHarness::<Events>::signed_in(events, "u-1");
    harness.table.set_offline(true);

    let report = harness.view.activate().await;

    assert_eq!(report.records, None);
    assert!(harness.view.records().await.is_empty());
    assert_eq!(harness.view.phase().await, LoadPhase::Loaded);
    assert_eq!(
        harness.notifier.titles(),
        vec!["Error loading events", "Error loading registrations"]
    );

    harness.table.set_offline(false);
    assert_eq!(harness.view.refresh().await.unwrap(), 2);
}
