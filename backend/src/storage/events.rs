//! Change feed shared by all repositories of one connection.
//!
//! Every successful mutation publishes which slice of which baby changed.
//! Listeners refetch the full slice contents on each event, so dropped
//! events only delay convergence, never corrupt it.

use crate::domain::models::{
    DehydrationCheck, EntryRecord, FeedEntry, StoolEntry, WeightEntry, WetDiaperEntry,
};

/// The six logical streams a live subscription observes per baby.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeSlice {
    Baby,
    FeedEntries,
    WeightEntries,
    StoolEntries,
    WetDiaperEntries,
    DehydrationChecks,
}

impl ChangeSlice {
    /// Map a sub-collection name to its slice.
    pub fn for_collection(collection: &str) -> Option<ChangeSlice> {
        match collection {
            c if c == FeedEntry::COLLECTION => Some(ChangeSlice::FeedEntries),
            c if c == WeightEntry::COLLECTION => Some(ChangeSlice::WeightEntries),
            c if c == StoolEntry::COLLECTION => Some(ChangeSlice::StoolEntries),
            c if c == WetDiaperEntry::COLLECTION => Some(ChangeSlice::WetDiaperEntries),
            c if c == DehydrationCheck::COLLECTION => Some(ChangeSlice::DehydrationChecks),
            _ => None,
        }
    }
}

/// One mutation notification.
#[derive(Debug, Clone)]
pub struct ChangeEvent {
    pub user_id: String,
    pub baby_id: String,
    pub slice: ChangeSlice,
}

impl ChangeEvent {
    pub fn matches(&self, user_id: &str, baby_id: &str, slice: ChangeSlice) -> bool {
        self.user_id == user_id && self.baby_id == baby_id && self.slice == slice
    }
}
