// Process configuration, read from the environment once at startup.

use anyhow::{Context, bail};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreBackend {
    InMemory,
    Postgrest {
        url: String,
        api_key: String,
        access_token: Option<String>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewKind {
    #[default]
    Events,
    Clubs,
    Profile,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub store: StoreBackend,
    pub user_id: Option<String>,
    pub view: ViewKind,
    /// Sign the demo user out once the view has been shown.
    pub sign_out: bool,
}

impl Config {
    /// Reads the process environment, after loading `.env` when one exists.
    pub fn from_env() -> anyhow::Result<Self> {
        // a missing .env file is fine
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let store = match non_empty("CAMPUS_STORE").as_deref() {
            None | Some("memory") => StoreBackend::InMemory,
            Some("postgrest") => StoreBackend::Postgrest {
                url: non_empty("CAMPUS_STORE_URL")
                    .context("CAMPUS_STORE_URL is required for the postgrest store")?,
                api_key: non_empty("CAMPUS_STORE_API_KEY")
                    .context("CAMPUS_STORE_API_KEY is required for the postgrest store")?,
                access_token: non_empty("CAMPUS_STORE_ACCESS_TOKEN"),
            },
            Some(other) => bail!("unknown CAMPUS_STORE {other:?}, expected memory or postgrest"),
        };

        let view = match non_empty("CAMPUS_VIEW").as_deref() {
            None | Some("events") => ViewKind::Events,
            Some("clubs") => ViewKind::Clubs,
            Some("profile") => ViewKind::Profile,
            Some(other) => bail!("unknown CAMPUS_VIEW {other:?}, expected events, clubs or profile"),
        };

        let sign_out = match non_empty("CAMPUS_SIGN_OUT").as_deref() {
            None | Some("false") | Some("0") => false,
            Some("true") | Some("1") => true,
            Some(other) => bail!("unknown CAMPUS_SIGN_OUT {other:?}, expected true or false"),
        };

        Ok(Self {
            store,
            user_id: non_empty("CAMPUS_USER_ID"),
            view,
            sign_out,
        })
    }
}
