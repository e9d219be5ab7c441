use crate::shared::core::primitives::UserId;

/// Who is looking at the view. Every consumer handles both arms.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Session {
    Authenticated(UserId),
    #[default]
    Anonymous,
}

impl Session {
    pub fn user_id(&self) -> Option<&UserId> {
        match self {
            Session::Authenticated(user_id) => Some(user_id),
            Session::Anonymous => None,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, Session::Authenticated(_))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthTransition {
    SignedIn,
    SignedOut,
    TokenRefreshed,
}

/// One notification delivered by the session provider's subscription.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionChange {
    pub transition: AuthTransition,
    pub session: Session,
}

impl SessionChange {
    pub fn signed_in(user_id: UserId) -> Self {
        Self {
            transition: AuthTransition::SignedIn,
            session: Session::Authenticated(user_id),
        }
    }

    pub fn signed_out() -> Self {
        Self {
            transition: AuthTransition::SignedOut,
            session: Session::Anonymous,
        }
    }

    pub fn token_refreshed(user_id: UserId) -> Self {
        Self {
            transition: AuthTransition::TokenRefreshed,
            session: Session::Authenticated(user_id),
        }
    }
}
