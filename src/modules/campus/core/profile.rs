use crate::shared::core::primitives::{RecordId, UserId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub user_id: UserId,
    pub full_name: String,
    pub email: String,
    pub created_at: i64,
}

/// A club membership row joined with the club it points at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClubMembershipDetail {
    pub membership_id: String,
    pub club_id: RecordId,
    pub joined_at: i64,
    pub club_name: String,
    pub category: String,
    pub icon: String,
}
