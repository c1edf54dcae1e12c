//! Configuration - Fragments, weapon sets, roster tables and their resolution

mod constants;
mod fragment;
mod loader;
mod resolver;
mod roster;
mod weapon_set;

pub use constants::PipelineConstants;
pub use fragment::{ConfigFragment, FragmentField, FragmentKind, MergeKind};
pub use loader::{load_fragment, parse_json_fragment, parse_toml_fragment, FragmentSource};
pub use resolver::merge;
pub use roster::{atk_base, roster_fragment, CharacterSheet, Class, Rarity, SkillSheet};
pub use weapon_set::{resolve_weapon_set, WeaponSet, WeaponSetId};

use crate::error::{CalcError, Result};

/// Parse a TOML string and deserialize it
pub fn parse_toml<T: serde::de::DeserializeOwned>(name: &str, content: &str) -> Result<T> {
    toml::from_str(content).map_err(|e| CalcError::ConfigParse {
        fragment: name.to_string(),
        reason: e.to_string(),
    })
}

/// Parse pipeline constants from TOML
pub fn parse_constants(content: &str) -> Result<PipelineConstants> {
    let constants: PipelineConstants = parse_toml("pipeline_constants", content)?;
    if constants.crit_search_limit > constants.max_crit_search_limit {
        return Err(CalcError::ConfigParse {
            fragment: "pipeline_constants".to_string(),
            reason: format!(
                "crit_search_limit {} exceeds max_crit_search_limit {}",
                constants.crit_search_limit, constants.max_crit_search_limit
            ),
        });
    }
    Ok(constants)
}
