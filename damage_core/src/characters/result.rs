//! DamageResult - Labelled outcome of one character calculation

use super::crit_search::CritSearchTrace;
use crate::damage::DamageBreakdown;
use crate::numeric::StatValue;
use serde::{Deserialize, Serialize};

/// One labelled damage value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabeledDamage {
    pub label: String,
    pub value: StatValue,
    /// Pipeline stages that produced the value, if it came from a single run
    pub breakdown: Option<DamageBreakdown>,
}

/// Result of dispatching a request to a character handler
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DamageResult {
    /// Registered name of the character that produced this result
    pub character: String,
    /// Labelled values in the order the handler produced them
    pub entries: Vec<LabeledDamage>,
    /// Label of the largest entry, for comparison-style characters
    pub max_label: Option<String>,
    /// Every crit count evaluated by a crit search
    pub crit_search: Option<CritSearchTrace>,
}

impl DamageResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an entry carrying the breakdown it came from
    pub fn with_breakdown(mut self, label: impl Into<String>, breakdown: DamageBreakdown) -> Self {
        self.entries.push(LabeledDamage {
            label: label.into(),
            value: breakdown.final_dmg,
            breakdown: Some(breakdown),
        });
        self
    }

    /// Add an entry with no single-run breakdown
    pub fn with_value(mut self, label: impl Into<String>, value: StatValue) -> Self {
        self.entries.push(LabeledDamage {
            label: label.into(),
            value,
            breakdown: None,
        });
        self
    }

    pub fn with_crit_search(mut self, trace: CritSearchTrace) -> Self {
        self.crit_search = Some(trace);
        self
    }

    /// Flag the largest entry; the earliest wins on ties
    pub fn flag_max(mut self) -> Self {
        let mut best: Option<&LabeledDamage> = None;
        for entry in &self.entries {
            if best.map_or(true, |b| entry.value > b.value) {
                best = Some(entry);
            }
        }
        self.max_label = best.map(|entry| entry.label.clone());
        self
    }

    pub fn entry(&self, label: &str) -> Option<&LabeledDamage> {
        self.entries.iter().find(|entry| entry.label == label)
    }

    pub fn get(&self, label: &str) -> Option<StatValue> {
        self.entry(label).map(|entry| entry.value)
    }

    /// The flagged maximum entry
    pub fn max(&self) -> Option<&LabeledDamage> {
        self.entry(self.max_label.as_deref()?)
    }
}
