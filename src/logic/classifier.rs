//! Keyword classification of free-text care fields.
//!
//! Every classifier walks its table in order and the first group with a
//! matching substring wins. Callers pass raw text; matching is done on the
//! lower-cased form.

use crate::models::{CareDifficulty, Level};

/// Ordered keyword groups. The first group whose keywords appear wins.
pub type KeywordTable = &'static [(Level, &'static [&'static str])];

pub const WATER_KEYWORDS: KeywordTable = &[
    (
        Level::High,
        &["frequent", "moist", "daily", "wet", "high water"],
    ),
    (
        Level::Low,
        &[
            "sparingly",
            "drought",
            "dry",
            "minimal water",
            "low water",
            "well-draining",
        ],
    ),
];

pub const LIGHT_KEYWORDS: KeywordTable = &[
    (
        Level::High,
        &["full sun", "bright direct", "high light", "direct sunlight"],
    ),
    (Level::Low, &["low light", "shade", "dark", "indirect"]),
];

/// One row of the difficulty table: if any keyword is present in the
/// field, add `weight`. Rows sharing a `group` are exclusive; only the
/// first matching row of a group counts.
#[derive(Debug, Clone, Copy)]
pub struct DifficultyRule {
    pub field: CareField,
    pub group: u8,
    pub keywords: &'static [&'static str],
    pub weight: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CareField {
    Watering,
    Sunlight,
    Temperature,
    Description,
}

pub const DIFFICULTY_RULES: &[DifficultyRule] = &[
    DifficultyRule {
        field: CareField::Watering,
        group: 0,
        keywords: &["frequent", "moist"],
        weight: 2,
    },
    DifficultyRule {
        field: CareField::Watering,
        group: 0,
        keywords: &["moderate"],
        weight: 1,
    },
    DifficultyRule {
        field: CareField::Sunlight,
        group: 1,
        keywords: &["specific", "bright direct"],
        weight: 2,
    },
    DifficultyRule {
        field: CareField::Sunlight,
        group: 1,
        keywords: &["indirect"],
        weight: 1,
    },
    DifficultyRule {
        field: CareField::Temperature,
        group: 2,
        keywords: &["specific", "strict"],
        weight: 2,
    },
    DifficultyRule {
        field: CareField::Description,
        group: 3,
        keywords: &["sensitive", "difficult"],
        weight: 2,
    },
    DifficultyRule {
        field: CareField::Description,
        group: 4,
        keywords: &["hardy", "easy"],
        weight: -1,
    },
];

const HARD_THRESHOLD: i32 = 4;
const MODERATE_THRESHOLD: i32 = 2;

/// Humidity descriptions chosen from the plant description when the
/// identification service gives none.
pub const HUMIDITY_BANDS: &[(&[&str], &str)] = &[
    (&["tropical", "rainforest"], "High humidity (60-80%)"),
    (&["desert", "arid"], "Low humidity (30-40%)"),
];
pub const DEFAULT_HUMIDITY_BAND: &str = "Average humidity (40-60%)";

/// Lower-cased text from the four fields that feed difficulty scoring.
#[derive(Debug, Clone, Default)]
pub struct CareText {
    pub watering: String,
    pub sunlight: String,
    pub temperature: String,
    pub description: String,
}

impl CareText {
    pub fn new(watering: &str, sunlight: &str, temperature: &str, description: &str) -> Self {
        Self {
            watering: watering.to_lowercase(),
            sunlight: sunlight.to_lowercase(),
            temperature: temperature.to_lowercase(),
            description: description.to_lowercase(),
        }
    }

    fn field(&self, field: CareField) -> &str {
        match field {
            CareField::Watering => &self.watering,
            CareField::Sunlight => &self.sunlight,
            CareField::Temperature => &self.temperature,
            CareField::Description => &self.description,
        }
    }
}

fn contains_any(text: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|k| text.contains(k))
}

pub fn classify(text: &str, table: KeywordTable, default: Level) -> Level {
    let text = text.to_lowercase();
    table
        .iter()
        .find(|(_, keywords)| contains_any(&text, keywords))
        .map(|(level, _)| *level)
        .unwrap_or(default)
}

pub fn water_needs(watering: &str) -> Level {
    classify(watering, WATER_KEYWORDS, Level::Medium)
}

pub fn light_needs(sunlight: &str) -> Level {
    classify(sunlight, LIGHT_KEYWORDS, Level::Medium)
}

pub fn difficulty_score(text: &CareText) -> i32 {
    let mut score = 0;
    let mut matched_groups: Vec<u8> = Vec::new();

    for rule in DIFFICULTY_RULES {
        if matched_groups.contains(&rule.group) {
            continue;
        }
        if contains_any(text.field(rule.field), rule.keywords) {
            score += rule.weight;
            matched_groups.push(rule.group);
        }
    }

    score
}

pub fn care_difficulty(text: &CareText) -> CareDifficulty {
    let score = difficulty_score(text);
    if score > HARD_THRESHOLD {
        CareDifficulty::Hard
    } else if score > MODERATE_THRESHOLD {
        CareDifficulty::Moderate
    } else {
        CareDifficulty::Easy
    }
}

pub fn humidity_band(description: &str) -> &'static str {
    let text = description.to_lowercase();
    HUMIDITY_BANDS
        .iter()
        .find(|(keywords, _)| contains_any(&text, keywords))
        .map(|(_, band)| *band)
        .unwrap_or(DEFAULT_HUMIDITY_BAND)
}
