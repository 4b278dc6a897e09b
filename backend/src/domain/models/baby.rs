use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};

use super::{DehydrationCheck, FeedEntry, StoolEntry, WeightEntry, WetDiaperEntry};

/// The baby document as stored: scalar fields only, no sub-collections.
///
/// This is the list-path read type; the detail path hydrates a full
/// [`Baby`] from it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BabySummary {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    pub date_of_birth: DateTime<Utc>,
}

impl BabySummary {
    pub fn new(name: impl Into<String>, date_of_birth: DateTime<Utc>) -> Self {
        Self {
            id: None,
            name: name.into(),
            date_of_birth,
        }
    }
}

impl PartialEq for BabySummary {
    fn eq(&self, other: &Self) -> bool {
        baby_identity_eq(
            &self.id,
            &self.name,
            self.date_of_birth,
            &other.id,
            &other.name,
            other.date_of_birth,
        )
    }
}

/// Aggregate root: one tracked baby together with its five owned entry
/// collections.
///
/// Collections are unordered bags keyed by entry id; insertion order does
/// not necessarily reflect chronological order, so display code sorts by
/// timestamp.
#[derive(Debug, Clone)]
pub struct Baby {
    pub id: Option<String>,
    pub name: String,
    pub date_of_birth: DateTime<Utc>,
    pub feed_entries: Vec<FeedEntry>,
    pub weight_entries: Vec<WeightEntry>,
    pub stool_entries: Vec<StoolEntry>,
    pub wet_diaper_entries: Vec<WetDiaperEntry>,
    pub dehydration_checks: Vec<DehydrationCheck>,
}

impl Baby {
    /// A new baby with empty collections, not yet persisted.
    pub fn new(name: impl Into<String>, date_of_birth: DateTime<Utc>) -> Self {
        Self::from_summary(BabySummary::new(name, date_of_birth))
    }

    pub fn from_summary(summary: BabySummary) -> Self {
        Self {
            id: summary.id,
            name: summary.name,
            date_of_birth: summary.date_of_birth,
            feed_entries: Vec::new(),
            weight_entries: Vec::new(),
            stool_entries: Vec::new(),
            wet_diaper_entries: Vec::new(),
            dehydration_checks: Vec::new(),
        }
    }

    pub fn summary(&self) -> BabySummary {
        BabySummary {
            id: self.id.clone(),
            name: self.name.clone(),
            date_of_birth: self.date_of_birth,
        }
    }

    /// Merge freshly decoded scalar fields into this aggregate, keeping
    /// the entry collections that were synced separately.
    pub fn apply_summary(&mut self, summary: BabySummary) {
        self.id = summary.id;
        self.name = summary.name;
        self.date_of_birth = summary.date_of_birth;
    }

    /// Whole calendar months elapsed between birth and `now`.
    pub fn age_in_months(&self, now: DateTime<Utc>) -> u32 {
        if now <= self.date_of_birth {
            return 0;
        }
        let dob = self.date_of_birth;
        let mut months = (now.year() - dob.year()) * 12 + now.month() as i32 - dob.month() as i32;
        if now.day() < dob.day() {
            months -= 1;
        }
        months.max(0) as u32
    }

    /// The weight entry with the most recent timestamp.
    pub fn current_weight(&self) -> Option<&WeightEntry> {
        self.weight_entries.iter().max_by_key(|e| e.timestamp)
    }

    /// The dehydration check with the most recent timestamp.
    pub fn latest_dehydration_check(&self) -> Option<&DehydrationCheck> {
        self.dehydration_checks.iter().max_by_key(|c| c.timestamp)
    }

    /// True when the latest dehydration check, the most recently inserted
    /// wet-diaper entry, or the most recently inserted stool entry carries
    /// an alert.
    pub fn has_active_alerts(&self) -> bool {
        let dehydration = self
            .latest_dehydration_check()
            .map(DehydrationCheck::dehydration_alert)
            .unwrap_or(false);
        let wet_diaper = self
            .wet_diaper_entries
            .last()
            .map(WetDiaperEntry::dehydration_alert)
            .unwrap_or(false);
        let stool = self
            .stool_entries
            .last()
            .map(StoolEntry::medical_alert)
            .unwrap_or(false);

        dehydration || wet_diaper || stool
    }
}

impl Default for Baby {
    fn default() -> Self {
        Self::new(String::new(), DateTime::<Utc>::UNIX_EPOCH)
    }
}

impl PartialEq for Baby {
    fn eq(&self, other: &Self) -> bool {
        baby_identity_eq(
            &self.id,
            &self.name,
            self.date_of_birth,
            &other.id,
            &other.name,
            other.date_of_birth,
        )
    }
}

/// Identity-first equality: assigned ids win over field comparison; two
/// unpersisted babies compare by name and date of birth.
fn baby_identity_eq(
    id_a: &Option<String>,
    name_a: &str,
    dob_a: DateTime<Utc>,
    id_b: &Option<String>,
    name_b: &str,
    dob_b: DateTime<Utc>,
) -> bool {
    match (id_a, id_b) {
        (Some(a), Some(b)) => a == b,
        (None, None) => name_a == name_b && dob_a == dob_b,
        _ => false,
    }
}
