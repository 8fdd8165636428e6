use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::person::{ArchiveReason, Urgency};

/// Structured event type captured when the entry is written. Reports key off
/// this, never off the human-readable `details` text.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ActivityKind {
    PersonAdded,
    StageChanged { stage_id: String },
    UrgencyChanged { urgency: Urgency },
    Archived { reason: ArchiveReason },
    Unarchived,
    DetailsUpdated,
    InteractionAdded,
}

impl ActivityKind {
    pub fn is_archive(&self) -> bool {
        matches!(self, ActivityKind::Archived { .. })
    }

    pub fn is_integration(&self) -> bool {
        matches!(
            self,
            ActivityKind::Archived {
                reason: ArchiveReason::Integrated
            }
        )
    }
}

/// Append-only audit entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ActivityLog {
    pub id: String,
    pub person_id: String,
    pub user_id: String,
    pub at: DateTime<Utc>,
    pub kind: ActivityKind,
    pub details: String,
}
