//! damage_core - Exact-decimal damage calculation for game characters
//!
//! This library provides:
//! - Config resolution: layered fragments merged into one ResolvedInputs
//! - DamagePipeline: the seven ordered damage stages over exact decimals
//! - CharacterRegistry: per-character mechanics layered on the pipeline
//! - Calculator: request in, labelled DamageResult out

pub mod calculator;
pub mod characters;
pub mod config;
pub mod damage;
pub mod error;
pub mod input;
pub mod numeric;
pub mod prelude;

// Re-export core types for convenience
pub use calculator::{CalculationRequest, Calculator};
pub use characters::{registry, CharacterHandler, CharacterRegistry, DamageResult, LabeledDamage};
pub use config::{load_fragment, merge, resolve_weapon_set, ConfigFragment, FragmentKind, MergeKind, PipelineConstants, WeaponSet};
pub use damage::{BracketPolicy, DamageBreakdown, DamagePipeline, StageInjection};
pub use error::{CalcError, Result};
pub use input::{keys, ResolvedInputs};
pub use numeric::{round_down, to_exact, StatValue};
