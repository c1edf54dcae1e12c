//! ConfigFragment - One layer of partial input data

use crate::input::keys;
use crate::numeric::StatValue;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Where a fragment came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FragmentKind {
    /// Character base stats and passives
    Character,
    /// Monster / target preset
    Monster,
    /// One of the fixed weapon set tables
    WeaponSet,
    /// Situational values supplied by the caller
    Override,
    /// A single skill's multipliers
    Skill,
    /// Class/rarity base values
    Roster,
}

/// How a field combines with the running total
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "merge", rename_all = "snake_case")]
pub enum MergeKind {
    /// Added to the running total of the field's own key
    Additive,
    /// Added to the running total of a different key
    Mapped { to: String },
    /// Overwrites the running total
    Replace,
}

impl MergeKind {
    /// Merge kind used when a source gives a bare value for `key`
    pub fn default_for(key: &str) -> MergeKind {
        match key {
            keys::BONUS_CRIT_DMG => MergeKind::Mapped {
                to: keys::CRIT_DMG.to_string(),
            },
            keys::ATK_CHAR
            | keys::ATK_PET
            | keys::ATK_BASE
            | keys::FORMATION
            | keys::POTENTIAL_PET
            | keys::DEF_TARGET
            | keys::DEF_COEFFICIENT
            | keys::HP_TARGET
            | keys::TARGET_HP_PERCENT
            | keys::HP_ALTER_REMAINING
            | keys::CRIT_SEARCH_THRESHOLD
            | keys::CRIT_SEARCH_LIMIT => MergeKind::Replace,
            _ => MergeKind::Additive,
        }
    }
}

/// A single field of a fragment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FragmentField {
    pub key: String,
    pub value: StatValue,
    #[serde(flatten)]
    pub merge: MergeKind,
}

/// A named, loadable unit of partial input data
///
/// Fields keep their declaration order; metadata (`_character`, `_skills`,
/// ...) is carried alongside but never merged numerically.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigFragment {
    pub name: String,
    pub kind: FragmentKind,
    pub fields: Vec<FragmentField>,
    #[serde(default)]
    pub meta: BTreeMap<String, serde_json::Value>,
}

impl ConfigFragment {
    /// Create an empty fragment
    pub fn new(name: impl Into<String>, kind: FragmentKind) -> Self {
        ConfigFragment {
            name: name.into(),
            kind,
            fields: Vec::new(),
            meta: BTreeMap::new(),
        }
    }

    /// Add a field with an explicit merge kind
    pub fn with_field(mut self, key: impl Into<String>, value: StatValue, merge: MergeKind) -> Self {
        self.fields.push(FragmentField {
            key: key.into(),
            value,
            merge,
        });
        self
    }

    /// Add a field that sums into its own key
    pub fn additive(self, key: impl Into<String>, value: StatValue) -> Self {
        self.with_field(key, value, MergeKind::Additive)
    }

    /// Add a field whose value sums into `to`
    pub fn mapped(self, key: impl Into<String>, to: impl Into<String>, value: StatValue) -> Self {
        self.with_field(key, value, MergeKind::Mapped { to: to.into() })
    }

    /// Add a field that overwrites its key
    pub fn replace(self, key: impl Into<String>, value: StatValue) -> Self {
        self.with_field(key, value, MergeKind::Replace)
    }

    /// Add a field using the key's default merge kind
    pub fn set(self, key: impl Into<String>, value: StatValue) -> Self {
        let key = key.into();
        let merge = MergeKind::default_for(&key);
        self.with_field(key, value, merge)
    }

    /// Attach a metadata entry
    pub fn with_meta(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.meta.insert(key.into(), value);
        self
    }

    /// Find the first field declared under `key`
    pub fn field(&self, key: &str) -> Option<&FragmentField> {
        self.fields.iter().find(|f| f.key == key)
    }

    /// String metadata entry, if present
    pub fn meta_str(&self, key: &str) -> Option<&str> {
        self.meta.get(key).and_then(|v| v.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
