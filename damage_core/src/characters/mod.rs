//! Characters - Registry and the mechanics special characters layer on the pipeline

pub mod comparison;
pub mod crit_search;
pub mod hp_alteration;
pub mod hp_threshold;
pub mod lost_hp;
mod registry;
mod result;
pub mod standard;

pub use comparison::{compare, ComparisonCase};
pub use crit_search::{CritSearch, CritSearchTrace, CritStep};
pub use hp_alteration::alteration_damage;
pub use hp_threshold::HpThresholdBonus;
pub use lost_hp::LostHpBonus;
pub use registry::{registry, CharacterHandler, CharacterRegistry};
pub use result::{DamageResult, LabeledDamage};
