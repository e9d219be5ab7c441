// A collection ties a record type to its membership edge table and to the
// rules and wording the views apply to it.

use crate::modules::campus::core::records::{CampusRecord, Club, Event, SortKey};

/// User-facing notice texts for one collection.
#[derive(Debug, Clone, Copy)]
pub struct Wording {
    pub load_failed: &'static str,
    pub memberships_failed: &'static str,
    pub sign_in_required: &'static str,
    pub already_member: &'static str,
    pub already_member_detail: &'static str,
    pub joined: &'static str,
    pub joined_detail: &'static str,
    pub join_failed: &'static str,
    pub left: &'static str,
    pub left_detail: &'static str,
    pub leave_failed: &'static str,
}

impl Wording {
    /// Fills the `{name}` placeholder of a detail template.
    pub fn detail(template: &str, name: &str) -> String {
        template.replace("{name}", name)
    }
}

pub trait Collection: Send + Sync + 'static {
    type Record: CampusRecord;

    const TABLE: &'static str;
    const EDGE_TABLE: &'static str;
    const EDGE_FOREIGN_KEY: &'static str;
    const EDGE_TIMESTAMP: &'static str;
    const SORT_KEY: SortKey;
    /// When set, a join on a record already in the membership index is
    /// answered locally instead of being sent to the store.
    const GUARD_DUPLICATE_JOIN: bool;
    const WORDING: Wording;
}

pub struct Events;

impl Collection for Events {
    type Record = Event;

    const TABLE: &'static str = "events";
    const EDGE_TABLE: &'static str = "event_registrations";
    const EDGE_FOREIGN_KEY: &'static str = "event_id";
    const EDGE_TIMESTAMP: &'static str = "created_at";
    const SORT_KEY: SortKey = SortKey::Date;
    const GUARD_DUPLICATE_JOIN: bool = true;
    const WORDING: Wording = Wording {
        load_failed: "Error loading events",
        memberships_failed: "Error loading registrations",
        sign_in_required: "Please sign in to register for events",
        already_member: "Already Registered",
        already_member_detail: "You're already registered for \"{name}\"",
        joined: "Registration Successful!",
        joined_detail: "You've successfully registered for \"{name}\"",
        join_failed: "Registration failed",
        left: "Registration cancelled",
        left_detail: "You're no longer registered for \"{name}\"",
        leave_failed: "Cancellation failed",
    };
}

pub struct Clubs;

impl Collection for Clubs {
    type Record = Club;

    const TABLE: &'static str = "clubs";
    const EDGE_TABLE: &'static str = "club_members";
    const EDGE_FOREIGN_KEY: &'static str = "club_id";
    const EDGE_TIMESTAMP: &'static str = "joined_at";
    const SORT_KEY: SortKey = SortKey::Name;
    const GUARD_DUPLICATE_JOIN: bool = false;
    const WORDING: Wording = Wording {
        load_failed: "Error loading clubs",
        memberships_failed: "Error loading memberships",
        sign_in_required: "Please sign in to join clubs",
        already_member: "Already a member",
        already_member_detail: "You're already a member of \"{name}\"",
        joined: "Joined club",
        joined_detail: "You're now a member of \"{name}\"",
        join_failed: "Failed to join club",
        left: "Left club",
        left_detail: "You've left \"{name}\"",
        leave_failed: "Failed to leave club",
    };
}
