use serde::{Deserialize, Serialize};

use crate::core::types::{Difficulty, ProfileId};

/// A physical display element owned by a buyer, with how many of it they own
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropCount {
    /// Prop name as the buyer entered it (e.g. "Mega Tree")
    pub name: String,

    /// Number of this prop in the display
    #[serde(default)]
    pub count: u32,
}

impl PropCount {
    pub fn new(name: impl Into<String>, count: u32) -> Self {
        Self {
            name: name.into(),
            count,
        }
    }
}

/// A buyer's display hardware, supplied per request and never persisted
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuyerHardwareProfile {
    /// Props in the display. Duplicate names are allowed and scored independently.
    #[serde(default)]
    pub props: Vec<PropCount>,

    /// Total addressable pixels across the display
    #[serde(default)]
    pub pixel_count: u64,

    /// Self-rated setup skill
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<Difficulty>,
}

impl BuyerHardwareProfile {
    #[must_use]
    pub fn new(pixel_count: u64) -> Self {
        Self {
            props: Vec::new(),
            pixel_count,
            difficulty: None,
        }
    }

    #[must_use]
    pub fn with_prop(mut self, name: impl Into<String>, count: u32) -> Self {
        self.props.push(PropCount::new(name, count));
        self
    }

    #[must_use]
    pub fn with_difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulty = Some(difficulty);
        self
    }
}

/// One hardware configuration a sequence supports
///
/// A sequence may carry several of these; each is scored independently
/// against a buyer and the highest total wins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SequenceHardwareProfile {
    /// Profile label; standalone profiles may omit it
    #[serde(default = "unlabelled_profile_id")]
    pub id: ProfileId,

    /// Prop the sequence was authored for
    pub prop_name: String,

    /// How many of that prop the sequence expects
    #[serde(default)]
    pub prop_count: u32,

    /// Pixel budget the sequence was authored for
    pub pixel_count: u64,

    /// Skill needed to set the sequence up correctly
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<Difficulty>,
}

fn unlabelled_profile_id() -> ProfileId {
    ProfileId::new("-")
}

impl SequenceHardwareProfile {
    pub fn new(id: impl Into<String>, prop_name: impl Into<String>, pixel_count: u64) -> Self {
        Self {
            id: ProfileId::new(id),
            prop_name: prop_name.into(),
            prop_count: 1,
            pixel_count,
            difficulty: None,
        }
    }

    #[must_use]
    pub fn with_difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulty = Some(difficulty);
        self
    }
}
