use crate::modules::campus::core::profile::{ClubMembershipDetail, Profile};
use crate::shared::core::primitives::UserId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileSummary {
    pub user_id: UserId,
    pub profile: Option<Profile>,
    pub memberships: Vec<ClubMembershipDetail>,
}

impl ProfileSummary {
    pub fn headline(&self) -> String {
        match self.memberships.len() {
            0 => "You haven't joined any clubs yet".to_string(),
            1 => "You're a member of 1 club".to_string(),
            n => format!("You're a member of {n} clubs"),
        }
    }
}
