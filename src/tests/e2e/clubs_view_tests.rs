use crate::modules::campus::adapters::outbound::store::StoreError;
use crate::modules::campus::core::collections::Clubs;
use crate::modules::campus::core::records::Club;
use crate::modules::campus::errors::ApplicationError;
use crate::modules::campus::use_cases::toggle_membership::decision::MutationOutcome;
use crate::shared::core::primitives::RecordId;
use crate::shared::infrastructure::navigation::Route;
use crate::tests::fixtures::harness::ViewHarness;
use crate::tests::fixtures::records::ClubBuilder;
use rstest::{fixture, rstest};

#[fixture]
fn clubs() -> Vec<Club> {
    vec![
        ClubBuilder::new("c2").name("Robotics Club").category("Technical").build(),
        ClubBuilder::new("c1").name("Coding Club").category("Technical").build(),
        ClubBuilder::new("c3").name("Music Society").category("Cultural").build(),
    ]
}

#[rstest]
#[tokio::test]
async fn it_should_list_clubs_by_name(clubs: Vec<Club>) {
    let harness = ViewHarness::<Clubs>::anonymous(clubs);
    harness.view.activate().await;

    let names: Vec<String> = harness
        .view
        .records()
        .await
        .into_iter()
        .map(|c| c.name)
        .collect();
    assert_eq!(names, vec!["Coding Club", "Music Society", "Robotics Club"]);
}

#[rstest]
#[tokio::test]
async fn it_should_add_a_joined_club_without_refetching(clubs: Vec<Club>) {
    let harness = ViewHarness::<Clubs>::signed_in(clubs, "u-1");
    harness.seed_membership("u-1", "c3").await;
    harness.view.activate().await;

    // the store now holds an edge the view never fetched; a re-fetch would surface it
    harness.seed_membership("u-1", "c2").await;
    let outcome = harness.view.join(&RecordId::new("c1")).await.unwrap();

    assert_eq!(outcome, MutationOutcome::Joined);
    let snapshot = harness.view.snapshot().await;
    assert!(snapshot.is_member(&RecordId::new("c1")));
    assert!(snapshot.is_member(&RecordId::new("c3")));
    assert!(!snapshot.is_member(&RecordId::new("c2")));
    assert_eq!(harness.notifier.titles(), vec!["Joined club"]);
    let description = &harness.notifier.notices()[0].description;
    assert!(description.contains("Coding Club"));
}

#[rstest]
#[tokio::test]
async fn it_should_send_anonymous_visitors_to_sign_in(clubs: Vec<Club>) {
    let harness = ViewHarness::<Clubs>::anonymous(clubs);
    harness.view.activate().await;

    let outcome = harness.view.join(&RecordId::new("c1")).await.unwrap();

    assert_eq!(outcome, MutationOutcome::RedirectedToSignIn);
    assert_eq!(harness.table.write_count(), 0);
    assert_eq!(harness.navigator.last(), Some(Route::SignIn));
    assert!(harness.view.snapshot().await.edges.is_empty());
}

#[rstest]
#[tokio::test]
async fn it_should_let_the_store_reject_a_second_join(clubs: Vec<Club>) {
    let harness = ViewHarness::<Clubs>::signed_in(clubs, "u-1");
    harness.seed_membership("u-1", "c1").await;
    harness.view.activate().await;

    let result = harness.view.join(&RecordId::new("c1")).await;

    assert!(matches!(
        result,
        Err(ApplicationError::Store(StoreError::UniqueViolation { .. }))
    ));
    assert_eq!(harness.table.write_count(), 1);
    assert!(harness.view.is_member(&RecordId::new("c1")).await);
    assert_eq!(harness.notifier.titles(), vec!["Failed to join club"]);
}

#[rstest]
#[tokio::test]
async fn it_should_leave_a_club(clubs: Vec<Club>) {
    let harness = ViewHarness::<Clubs>::signed_in(clubs, "u-1");
    harness.seed_membership("u-1", "c1").await;
    harness.seed_membership("u-1", "c2").await;
    harness.view.activate().await;

    let outcome = harness.view.leave(&RecordId::new("c1")).await.unwrap();

    assert_eq!(outcome, MutationOutcome::Left);
    let snapshot = harness.view.snapshot().await;
    assert!(!snapshot.is_member(&RecordId::new("c1")));
    assert!(snapshot.is_member(&RecordId::new("c2")));
    assert_eq!(harness.notifier.titles(), vec!["Left club"]);
}

#[rstest]
#[tokio::test]
async fn it_should_keep_the_membership_when_leaving_fails(clubs: Vec<Club>) {
    let harness = ViewHarness::<Clubs>::signed_in(clubs, "u-1");
    harness.seed_membership("u-1", "c1").await;
    harness.view.activate().await;

    harness.table.set_offline(true);
    let result = harness.view.leave(&RecordId::new("c1")).await;

    assert!(result.is_err());
    assert!(harness.view.is_member(&RecordId::new("c1")).await);
    assert_eq!(harness.notifier.titles(), vec!["Failed to leave club"]);
}
