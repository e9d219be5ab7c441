use crate::modules::campus::adapters::outbound::store_in_memory::{
    InMemoryCampusStore, InMemoryTable,
};
use crate::modules::campus::core::collections::{Clubs, Events};
use crate::modules::campus::core::profile::Profile;
use crate::modules::campus::use_cases::load_profile::handler::{ProfileLoader, ProfileOutcome};
use crate::modules::campus::use_cases::sign_out::handler::SignOutHandler;
use crate::modules::campus::view::{ClubsView, ViewPorts};
use crate::shared::core::primitives::{RecordId, UserId};
use crate::shared::core::session::Session;
use crate::shared::infrastructure::navigation::Route;
use crate::shared::infrastructure::navigation::in_memory::InMemoryNavigator;
use crate::shared::infrastructure::notices::NoticeVariant;
use crate::shared::infrastructure::notices::in_memory::InMemoryNotifier;
use crate::shared::infrastructure::session::in_memory::InMemorySessionProvider;
use crate::tests::fixtures::records::ClubBuilder;
use rstest::{fixture, rstest};
use std::sync::Arc;

struct ProfileHarness {
    store: Arc<InMemoryCampusStore>,
    session: Arc<InMemorySessionProvider>,
    navigator: Arc<InMemoryNavigator>,
    notifier: Arc<InMemoryNotifier>,
    clubs: ClubsView,
    loader: ProfileLoader,
}

fn harness(session: Session) -> ProfileHarness {
    let store = Arc::new(InMemoryCampusStore::new(
        InMemoryTable::<Events>::new(),
        InMemoryTable::<Clubs>::with_records(vec![
            ClubBuilder::new("c1").name("Coding Club").icon("💻").build(),
            ClubBuilder::new("c2").name("Music Society").icon("🎵").build(),
        ]),
    ));
    let session = Arc::new(InMemorySessionProvider::with_session(session));
    let navigator = Arc::new(InMemoryNavigator::new());
    let notifier = Arc::new(InMemoryNotifier::new());
    let clubs = ClubsView::new(ViewPorts {
        records: store.clubs(),
        edges: store.clubs(),
        session: session.clone(),
        navigator: navigator.clone(),
        notifier: notifier.clone(),
    });
    let loader = ProfileLoader::new(
        session.clone(),
        store.clone(),
        navigator.clone(),
        notifier.clone(),
    );
    ProfileHarness {
        store,
        session,
        navigator,
        notifier,
        clubs,
        loader,
    }
}

#[fixture]
fn profile() -> Profile {
    Profile {
        user_id: UserId::new("u-1"),
        full_name: "Ada Lovelace".to_string(),
        email: "ada@example.edu".to_string(),
        created_at: 1_700_000_000_000,
    }
}

#[rstest]
#[tokio::test]
async fn it_should_redirect_anonymous_visitors_to_sign_in() {
    let h = harness(Session::Anonymous);

    let outcome = h.loader.load().await;

    assert_eq!(outcome, ProfileOutcome::RedirectedToSignIn);
    assert_eq!(h.navigator.visited(), vec![Route::SignIn]);
}

#[rstest]
#[tokio::test]
async fn it_should_show_clubs_joined_from_the_clubs_view(profile: Profile) {
    let h = harness(Session::Authenticated(UserId::new("u-1")));
    h.store.put_profile(profile.clone()).await;
    h.clubs.activate().await;
    h.clubs.join(&RecordId::new("c2")).await.unwrap();

    let ProfileOutcome::Loaded(summary) = h.loader.load().await else {
        panic!("expected a loaded profile");
    };

    assert_eq!(summary.profile, Some(profile));
    assert_eq!(summary.memberships.len(), 1);
    assert_eq!(summary.memberships[0].club_name, "Music Society");
    assert_eq!(summary.memberships[0].icon, "🎵");
    assert_eq!(summary.headline(), "You're a member of 1 club");
}

#[rstest]
#[tokio::test]
async fn it_should_still_list_memberships_when_the_profile_is_missing() {
    let h = harness(Session::Authenticated(UserId::new("u-1")));
    h.clubs.activate().await;
    h.clubs.join(&RecordId::new("c1")).await.unwrap();

    let ProfileOutcome::Loaded(summary) = h.loader.load().await else {
        panic!("expected a loaded profile");
    };

    assert_eq!(summary.profile, None);
    assert_eq!(summary.memberships.len(), 1);
    let notices = h.notifier.notices();
    let last = notices.last().unwrap();
    assert_eq!(last.title, "Error loading profile");
    assert_eq!(last.variant, NoticeVariant::Destructive);
}

#[rstest]
#[tokio::test]
async fn it_should_still_show_the_profile_when_memberships_fail(profile: Profile) {
    let h = harness(Session::Authenticated(UserId::new("u-1")));
    h.store.put_profile(profile.clone()).await;
    h.store.clubs().set_offline(true);

    let ProfileOutcome::Loaded(summary) = h.loader.load().await else {
        panic!("expected a loaded profile");
    };

    assert_eq!(summary.profile, Some(profile));
    assert!(summary.memberships.is_empty());
    assert_eq!(h.notifier.titles(), vec!["Error loading memberships"]);
}

#[rstest]
#[tokio::test]
async fn it_should_sign_out_from_the_profile_and_clear_the_clubs_view(profile: Profile) {
    let h = harness(Session::Authenticated(UserId::new("u-1")));
    h.store.put_profile(profile).await;
    h.clubs.activate().await;
    h.clubs.join(&RecordId::new("c1")).await.unwrap();

    let sign_out = SignOutHandler::new(h.session.clone(), h.navigator.clone(), h.notifier.clone());
    sign_out.handle().await.unwrap();
    tokio::time::sleep(std::time::Duration::from_millis(20)).await;

    assert_eq!(h.navigator.last(), Some(Route::Home));
    assert!(!h.clubs.is_member(&RecordId::new("c1")).await);
    assert_eq!(
        h.loader.load().await,
        ProfileOutcome::RedirectedToSignIn
    );
}
