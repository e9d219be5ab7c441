use crate::shared::core::primitives::RecordId;
use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt::Debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Date,
    Name,
}

impl SortKey {
    pub fn column(&self) -> &'static str {
        match self {
            SortKey::Date => "date",
            SortKey::Name => "name",
        }
    }
}

/// A row the client lists but never mutates.
pub trait CampusRecord:
    Debug + Clone + PartialEq + Send + Sync + Serialize + DeserializeOwned + 'static
{
    fn id(&self) -> &RecordId;
    fn display_name(&self) -> &str;
    fn compare_by(&self, other: &Self, key: SortKey) -> Ordering;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub id: RecordId,
    pub title: String,
    pub description: String,
    pub date: NaiveDate,
    pub time: String,
    pub location: String,
    pub category: String,
    pub max_attendees: u32,
}

impl CampusRecord for Event {
    fn id(&self) -> &RecordId {
        &self.id
    }

    fn display_name(&self) -> &str {
        &self.title
    }

    fn compare_by(&self, other: &Self, key: SortKey) -> Ordering {
        match key {
            SortKey::Date => self.date.cmp(&other.date),
            SortKey::Name => self.title.cmp(&other.title),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Club {
    pub id: RecordId,
    pub name: String,
    pub description: String,
    pub category: String,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub member_count: u32,
}

impl CampusRecord for Club {
    fn id(&self) -> &RecordId {
        &self.id
    }

    fn display_name(&self) -> &str {
        &self.name
    }

    // Clubs carry no date; ordering by date keeps the store's order.
    fn compare_by(&self, other: &Self, key: SortKey) -> Ordering {
        match key {
            SortKey::Date => Ordering::Equal,
            SortKey::Name => self.name.cmp(&other.name),
        }
    }
}
