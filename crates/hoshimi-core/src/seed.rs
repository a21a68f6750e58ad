use serde::{Deserialize, Serialize};

use crate::error::HoshimiError;
use crate::models::AnimeId;

const STAFF_PICKS: &str = include_str!("../../../seed/staff_picks.json");

/// A curated catalog entry shown on the home screen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StaffPick {
    pub id: AnimeId,
    pub title: String,
    pub slug: String,
    pub poster: String,
}

impl StaffPick {
    /// The staff picks shipped with the application.
    pub fn builtin() -> Result<Vec<Self>, HoshimiError> {
        Self::parse(STAFF_PICKS)
    }

    pub fn parse(json: &str) -> Result<Vec<Self>, HoshimiError> {
        serde_json::from_str(json).map_err(|e| HoshimiError::Seed(e.to_string()))
    }
}
