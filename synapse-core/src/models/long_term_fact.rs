use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Verbosity tier of a long-term fact, terse (L1) to detailed (L3).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum HeaLevel {
    L1 = 1,
    L2 = 2,
    L3 = 3,
}

impl HeaLevel {
    pub const ALL: [HeaLevel; 3] = [HeaLevel::L1, HeaLevel::L2, HeaLevel::L3];

    pub fn as_u8(self) -> u8 {
        self as u8
    }

    pub fn from_u8(level: u8) -> Option<Self> {
        match level {
            1 => Some(Self::L1),
            2 => Some(Self::L2),
            3 => Some(Self::L3),
            _ => None,
        }
    }
}

/// Destination root of a long-term fact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FactType {
    Identity,
    Philosophy,
}

impl FactType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Identity => "identity",
            Self::Philosophy => "philosophy",
        }
    }

    /// Root segment of keys of this type.
    pub fn key_root(self) -> &'static str {
        match self {
            Self::Identity => crate::constants::IDENTITY_ROOT,
            Self::Philosophy => crate::constants::PHILOSOPHY_ROOT,
        }
    }
}

impl fmt::Display for FactType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FactType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "identity" => Ok(Self::Identity),
            "philosophy" => Ok(Self::Philosophy),
            other => Err(format!("unknown fact type: {other}")),
        }
    }
}

/// A consolidated fact held at up to three levels of detail.
///
/// Every text present at a level is also present at all finer levels
/// (`l1 ⊆ l2 ⊆ l3`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LongTermFact {
    pub key: String,
    pub l1_value: Vec<String>,
    pub l2_value: Vec<String>,
    pub l3_value: Vec<String>,
    pub weight: f64,
    pub access_count: u64,
    pub fact_type: FactType,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub last_accessed: Option<DateTime<Utc>>,
}

impl LongTermFact {
    pub fn new(key: impl Into<String>, fact_type: FactType) -> Self {
        let now = Utc::now();
        Self {
            key: key.into(),
            l1_value: Vec::new(),
            l2_value: Vec::new(),
            l3_value: Vec::new(),
            weight: 0.0,
            access_count: 0,
            fact_type,
            created_at: now,
            updated_at: now,
            last_accessed: None,
        }
    }

    pub fn level(&self, level: HeaLevel) -> &[String] {
        match level {
            HeaLevel::L1 => &self.l1_value,
            HeaLevel::L2 => &self.l2_value,
            HeaLevel::L3 => &self.l3_value,
        }
    }

    fn level_mut(&mut self, level: HeaLevel) -> &mut Vec<String> {
        match level {
            HeaLevel::L1 => &mut self.l1_value,
            HeaLevel::L2 => &mut self.l2_value,
            HeaLevel::L3 => &mut self.l3_value,
        }
    }

    /// Insert `text` at `level` and every finer level, skipping duplicates.
    ///
    /// Returns `true` if any level changed.
    pub fn insert_at(&mut self, level: HeaLevel, text: &str) -> bool {
        let mut changed = false;
        for target in HeaLevel::ALL.into_iter().filter(|l| *l >= level) {
            let values = self.level_mut(target);
            if !values.iter().any(|v| v == text) {
                values.push(text.to_string());
                changed = true;
            }
        }
        changed
    }

    /// Check `l1 ⊆ l2 ⊆ l3`.
    pub fn is_monotonic(&self) -> bool {
        self.l1_value.iter().all(|v| self.l2_value.contains(v))
            && self.l2_value.iter().all(|v| self.l3_value.contains(v))
    }

    /// Restore `l1 ⊆ l2 ⊆ l3` by copying missing texts downward.
    pub fn repair_monotonic(&mut self) {
        let l1 = self.l1_value.clone();
        for text in &l1 {
            self.insert_at(HeaLevel::L1, text);
        }
        let l2 = self.l2_value.clone();
        for text in &l2 {
            self.insert_at(HeaLevel::L2, text);
        }
    }

    /// Text of the most detailed non-empty level, joined with spaces.
    pub fn detailed_text(&self) -> String {
        HeaLevel::ALL
            .iter()
            .rev()
            .map(|l| self.level(*l))
            .find(|values| !values.is_empty())
            .map(|values| values.join(" "))
            .unwrap_or_default()
    }

    /// Most specific level holding any text.
    pub fn highest_level(&self) -> Option<HeaLevel> {
        HeaLevel::ALL
            .into_iter()
            .find(|l| !self.level(*l).is_empty())
    }
}
