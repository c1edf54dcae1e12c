//! Damage system - The seven-stage pipeline and its breakdown

mod breakdown;
mod pipeline;
pub mod stages;

pub use breakdown::DamageBreakdown;
pub use pipeline::{DamagePipeline, StageInjection};
pub use stages::{BracketPolicy, DefenseTerms, RawDamageTerms};
