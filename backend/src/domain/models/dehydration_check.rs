use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::EntryRecord;

/// One physical dehydration check with two independent symptoms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DehydrationCheck {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub timestamp: DateTime<Utc>,
    pub poor_skin_elasticity: bool,
    pub dry_mucous_membranes: bool,
}

impl DehydrationCheck {
    pub fn new(
        timestamp: DateTime<Utc>,
        poor_skin_elasticity: bool,
        dry_mucous_membranes: bool,
    ) -> Self {
        Self {
            id: None,
            timestamp,
            poor_skin_elasticity,
            dry_mucous_membranes,
        }
    }

    pub fn dehydration_alert(&self) -> bool {
        self.poor_skin_elasticity || self.dry_mucous_membranes
    }
}

impl EntryRecord for DehydrationCheck {
    const COLLECTION: &'static str = "dehydrationChecks";

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn set_id(&mut self, id: String) {
        self.id = Some(id);
    }

    fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}
