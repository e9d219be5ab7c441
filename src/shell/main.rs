use campus_events::modules::campus::core::collections::Collection;
use campus_events::modules::campus::core::records::CampusRecord;
use campus_events::modules::campus::use_cases::load_profile::handler::ProfileOutcome;
use campus_events::modules::campus::view::MembershipView;
use campus_events::shell::config::{Config, ViewKind};
use campus_events::shell::state::AppState;
use tracing_subscriber::{EnvFilter, fmt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let config = Config::from_env()?;
    tracing::info!(view = ?config.view, user = ?config.user_id, "starting campus_events");
    let state = AppState::build(&config).await?;

    match config.view {
        ViewKind::Events => show(&state.events_view()).await,
        ViewKind::Clubs => show(&state.clubs_view()).await,
        ViewKind::Profile => {
            if let ProfileOutcome::Loaded(summary) = state.profile_loader().load().await {
                if let Some(profile) = &summary.profile {
                    tracing::info!(name = %profile.full_name, email = %profile.email, "profile");
                }
                for membership in &summary.memberships {
                    tracing::info!(club = %membership.club_name, category = %membership.category, "membership");
                }
                tracing::info!("{}", summary.headline());
            }
        }
    }

    if config.sign_out {
        state.sign_out_handler().handle().await?;
    }
    Ok(())
}

async fn show<C: Collection>(view: &MembershipView<C>) {
    let report = view.activate().await;
    for record in view.records().await {
        let member = view.is_member(record.id()).await;
        tracing::info!(
            collection = C::TABLE,
            id = %record.id(),
            name = record.display_name(),
            member,
            "listing"
        );
    }
    tracing::info!(collection = C::TABLE, ?report, "listing complete");
    view.teardown().await;
}
