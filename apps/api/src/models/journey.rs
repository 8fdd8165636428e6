use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Journey {
    pub id: String,
    pub name: String,
}

/// One step of a journey. `order` drives funnel sequencing and
/// "has this person reached stage X" comparisons.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Stage {
    pub id: String,
    pub name: String,
    pub journey_id: String,
    pub order: u32,
}
