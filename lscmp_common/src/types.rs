use serde::{Deserialize, Serialize};

/// Which directory a name was listed from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Left,
    Right,
}

/// Status of a single name after comparison
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchStatus {
    /// The name also exists on the opposite side
    Matched,
    /// The name exists only on its own side
    Missing,
}

/// A single classified name from one side's listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameEntry {
    pub name: String,
    pub side: Side,
    pub status: MatchStatus,
}

impl NameEntry {
    pub fn new(name: impl Into<String>, side: Side, status: MatchStatus) -> Self {
        Self {
            name: name.into(),
            side,
            status,
        }
    }
}

/// Aggregate counts for a comparison.
///
/// Matched pairs are counted once, from the left pass; the per-side missing
/// counts are independent of each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CompareSummary {
    pub matched: usize,
    pub left_missing: usize,
    pub right_missing: usize,
}

impl CompareSummary {
    /// Derive the counts from classified entries. Matched entries on the
    /// right side are not counted again.
    pub fn from_entries(left: &[NameEntry], right: &[NameEntry]) -> Self {
        let mut summary = CompareSummary::default();
        for entry in left {
            match entry.status {
                MatchStatus::Matched => summary.matched += 1,
                MatchStatus::Missing => summary.left_missing += 1,
            }
        }
        for entry in right {
            if entry.status == MatchStatus::Missing {
                summary.right_missing += 1;
            }
        }
        summary
    }

    /// Number of names missing on a given side
    pub fn missing(&self, side: Side) -> usize {
        match side {
            Side::Left => self.left_missing,
            Side::Right => self.right_missing,
        }
    }
}

/// Full result of comparing two listings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comparison {
    pub left: Vec<NameEntry>,
    pub right: Vec<NameEntry>,
    pub summary: CompareSummary,
}

impl Comparison {
    /// True when at least one side has a name the other lacks
    pub fn has_missing(&self) -> bool {
        self.summary.left_missing > 0 || self.summary.right_missing > 0
    }

    /// The entries for one side
    pub fn entries(&self, side: Side) -> &[NameEntry] {
        match side {
            Side::Left => &self.left,
            Side::Right => &self.right,
        }
    }
}

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    /// Compare names case-sensitively (default is case-insensitive)
    #[serde(default)]
    pub case_sensitive: bool,

    /// Ignore patterns (e.g., "*.o", "node_modules/")
    #[serde(default)]
    pub ignore_patterns: Vec<String>,

    /// Font color for matched rows in exports (RGB hex, e.g. "008000")
    #[serde(default)]
    pub matched_color: Option<String>,

    /// Font color for missing rows in exports (RGB hex, e.g. "FF0000")
    #[serde(default)]
    pub missing_color: Option<String>,

    /// Enable portable mode (config alongside binary)
    #[serde(default)]
    pub portable_mode: bool,
}
