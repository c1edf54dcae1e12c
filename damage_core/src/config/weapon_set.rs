//! Weapon sets - The five fixed equipment bonus tables

use super::fragment::{ConfigFragment, FragmentKind};
use crate::error::{CalcError, Result};
use crate::input::keys;
use crate::numeric::StatValue;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Equipped weapon set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeaponSet {
    None,
    Weakness,
    Crit,
    Hydra,
    HydraCastle,
}

impl WeaponSet {
    /// Get all weapon sets in id order
    pub fn all() -> &'static [WeaponSet] {
        &[
            WeaponSet::None,
            WeaponSet::Weakness,
            WeaponSet::Crit,
            WeaponSet::Hydra,
            WeaponSet::HydraCastle,
        ]
    }

    pub fn id(self) -> u8 {
        match self {
            WeaponSet::None => 0,
            WeaponSet::Weakness => 1,
            WeaponSet::Crit => 2,
            WeaponSet::Hydra => 3,
            WeaponSet::HydraCastle => 4,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            WeaponSet::None => "none",
            WeaponSet::Weakness => "weakness",
            WeaponSet::Crit => "crit",
            WeaponSet::Hydra => "hydra",
            WeaponSet::HydraCastle => "hydra_castle",
        }
    }

    pub fn from_id(id: u8) -> Result<WeaponSet> {
        WeaponSet::all()
            .iter()
            .copied()
            .find(|set| set.id() == id)
            .ok_or_else(|| CalcError::UnknownWeaponSet(id.to_string()))
    }

    /// Bonus table as `(key, value)` pairs
    pub fn bonuses(self) -> &'static [(&'static str, StatValue)] {
        const WEAKNESS: &[(&str, StatValue)] = &[(keys::WEAK_DMG, dec!(35))];
        const CRIT: &[(&str, StatValue)] = &[(keys::IGNORE_DEF, dec!(15))];
        const HYDRA: &[(&str, StatValue)] = &[(keys::DMG_AMP_BUFF, dec!(70))];
        const HYDRA_CASTLE: &[(&str, StatValue)] = &[(keys::DMG_AMP_BUFF, dec!(30))];

        match self {
            WeaponSet::None => &[],
            WeaponSet::Weakness => WEAKNESS,
            WeaponSet::Crit => CRIT,
            WeaponSet::Hydra => HYDRA,
            WeaponSet::HydraCastle => HYDRA_CASTLE,
        }
    }

    /// The set's bonus table as an additive fragment
    pub fn fragment(self) -> ConfigFragment {
        self.bonuses().iter().fold(
            ConfigFragment::new(format!("weapon_set:{}", self.name()), FragmentKind::WeaponSet),
            |fragment, (key, value)| fragment.additive(*key, *value),
        )
    }
}

impl fmt::Display for WeaponSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for WeaponSet {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.trim().to_ascii_lowercase().replace([' ', '-'], "_");
        if let Ok(id) = normalized.parse::<u8>() {
            return WeaponSet::from_id(id);
        }

        WeaponSet::all()
            .iter()
            .copied()
            .find(|set| set.name() == normalized)
            .ok_or_else(|| CalcError::UnknownWeaponSet(s.to_string()))
    }
}

/// Weapon set lookup key: numeric id or name
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WeaponSetId {
    Index(u8),
    Name(String),
}

impl From<u8> for WeaponSetId {
    fn from(id: u8) -> Self {
        WeaponSetId::Index(id)
    }
}

impl From<&str> for WeaponSetId {
    fn from(name: &str) -> Self {
        WeaponSetId::Name(name.to_string())
    }
}

impl From<String> for WeaponSetId {
    fn from(name: String) -> Self {
        WeaponSetId::Name(name)
    }
}

impl From<WeaponSet> for WeaponSetId {
    fn from(set: WeaponSet) -> Self {
        WeaponSetId::Index(set.id())
    }
}

/// Look up a weapon set by id or name and return its bonus fragment
pub fn resolve_weapon_set(id: impl Into<WeaponSetId>) -> Result<ConfigFragment> {
    let set = match id.into() {
        WeaponSetId::Index(index) => WeaponSet::from_id(index)?,
        WeaponSetId::Name(name) => name.parse()?,
    };
    Ok(set.fragment())
}
