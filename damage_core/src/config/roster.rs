//! Roster tables - Class/rarity base attack and character sheet metadata

use super::fragment::{ConfigFragment, FragmentKind};
use crate::error::{CalcError, Result};
use crate::input::keys;
use crate::numeric::{product, to_exact, StatValue};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Character rarity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rarity {
    Legend,
    Rare,
}

/// Character class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Class {
    Magic,
    Attack,
    Support,
    Defense,
    Balance,
}

impl Class {
    pub fn all() -> &'static [Class] {
        &[
            Class::Magic,
            Class::Attack,
            Class::Support,
            Class::Defense,
            Class::Balance,
        ]
    }
}

impl FromStr for Rarity {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "legend" => Ok(Rarity::Legend),
            "rare" => Ok(Rarity::Rare),
            other => Err(CalcError::ConfigParse {
                fragment: "roster".to_string(),
                reason: format!("unknown rarity `{other}`"),
            }),
        }
    }
}

impl FromStr for Class {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "magic" => Ok(Class::Magic),
            "attack" => Ok(Class::Attack),
            "support" => Ok(Class::Support),
            "defense" => Ok(Class::Defense),
            "balance" => Ok(Class::Balance),
            other => Err(CalcError::ConfigParse {
                fragment: "roster".to_string(),
                reason: format!("unknown class `{other}`"),
            }),
        }
    }
}

impl fmt::Display for Rarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rarity::Legend => write!(f, "legend"),
            Rarity::Rare => write!(f, "rare"),
        }
    }
}

impl fmt::Display for Class {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Class::Magic => "magic",
            Class::Attack => "attack",
            Class::Support => "support",
            Class::Defense => "defense",
            Class::Balance => "balance",
        };
        write!(f, "{name}")
    }
}

/// Base attack the Formation and Potential bonuses scale from
pub fn atk_base(rarity: Rarity, class: Class) -> StatValue {
    match (rarity, class) {
        (Rarity::Legend, Class::Magic | Class::Attack) => dec!(1500),
        (Rarity::Legend, Class::Support) => dec!(1095),
        (Rarity::Legend, Class::Defense) => dec!(727),
        (Rarity::Legend, Class::Balance) => dec!(1306),
        (Rarity::Rare, Class::Magic | Class::Attack) => dec!(1389),
        (Rarity::Rare, Class::Support) => dec!(1035),
        (Rarity::Rare, Class::Defense) => dec!(704),
        (Rarity::Rare, Class::Balance) => dec!(1238),
    }
}

/// Roster fragment setting `ATK_BASE` for a rarity/class pair
pub fn roster_fragment(rarity: Rarity, class: Class) -> ConfigFragment {
    ConfigFragment::new(format!("roster:{rarity}:{class}"), FragmentKind::Roster)
        .replace(keys::ATK_BASE, atk_base(rarity, class))
}

/// One skill entry from a character's `_skills` metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillSheet {
    pub name: String,
    /// Skill percentage of a single hit
    pub skill_dmg: StatValue,
    pub hits: u32,
}

impl SkillSheet {
    /// `SKILL_DMG` over every hit of the skill
    pub fn total_skill_dmg(&self) -> Result<StatValue> {
        product(keys::SKILL_DMG, &[self.skill_dmg, StatValue::from(self.hits)])
    }
}

/// Character metadata read from a character fragment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CharacterSheet {
    pub name: String,
    pub rarity: Option<Rarity>,
    pub class: Option<Class>,
    pub element: Option<String>,
    pub skills: BTreeMap<String, SkillSheet>,
}

impl CharacterSheet {
    /// Read `_character`, `_rarity`, `_class`, `_element` and `_skills`
    pub fn from_fragment(fragment: &ConfigFragment) -> Result<CharacterSheet> {
        let name = fragment
            .meta_str("_character")
            .unwrap_or(&fragment.name)
            .to_string();
        let rarity = fragment.meta_str("_rarity").map(str::parse::<Rarity>).transpose()?;
        let class = fragment.meta_str("_class").map(str::parse::<Class>).transpose()?;
        let element = fragment.meta_str("_element").map(str::to_string);

        let mut skills = BTreeMap::new();
        if let Some(raw) = fragment.meta.get("_skills") {
            let table = raw.as_object().ok_or_else(|| CalcError::ConfigParse {
                fragment: fragment.name.clone(),
                reason: "`_skills` must be an object".to_string(),
            })?;
            for (id, entry) in table {
                skills.insert(id.clone(), parse_skill(&fragment.name, id, entry)?);
            }
        }

        Ok(CharacterSheet {
            name,
            rarity,
            class,
            element,
            skills,
        })
    }

    /// `ATK_BASE` fragment for this character, if rarity and class are known
    pub fn roster_fragment(&self) -> Option<ConfigFragment> {
        Some(roster_fragment(self.rarity?, self.class?))
    }

    /// Skill fragment contributing the skill's `SKILL_DMG` across all its hits
    pub fn skill_fragment(&self, skill_id: &str) -> Result<ConfigFragment> {
        let skill = self
            .skills
            .get(skill_id)
            .ok_or_else(|| CalcError::ConfigParse {
                fragment: self.name.clone(),
                reason: format!("unknown skill `{skill_id}`"),
            })?;
        Ok(
            ConfigFragment::new(format!("skill:{skill_id}"), FragmentKind::Skill)
                .additive(keys::SKILL_DMG, skill.total_skill_dmg()?),
        )
    }
}

fn parse_skill(fragment: &str, id: &str, entry: &serde_json::Value) -> Result<SkillSheet> {
    let bad = |reason: String| CalcError::ConfigParse {
        fragment: fragment.to_string(),
        reason,
    };

    let name = entry
        .get("_name")
        .and_then(|v| v.as_str())
        .unwrap_or(id)
        .to_string();
    let skill_dmg = match entry.get(keys::SKILL_DMG) {
        Some(serde_json::Value::Number(n)) => to_exact(n.to_string()),
        Some(serde_json::Value::String(s)) => to_exact(s.as_str()),
        _ => return Err(bad(format!("skill `{id}` needs a numeric SKILL_DMG"))),
    }
    .map_err(|_| bad(format!("skill `{id}` has a non-numeric SKILL_DMG")))?;
    let hits = match entry.get("SKILL_HITS") {
        None => 1,
        Some(v) => v
            .as_u64()
            .and_then(|n| u32::try_from(n).ok())
            .filter(|n| *n > 0)
            .ok_or_else(|| bad(format!("skill `{id}` has an invalid SKILL_HITS")))?,
    };

    let skill = SkillSheet {
        name,
        skill_dmg,
        hits,
    };
    skill
        .total_skill_dmg()
        .map_err(|_| bad(format!("skill `{id}` overflows over {hits} hits")))?;
    Ok(skill)
}
