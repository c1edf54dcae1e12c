//! Prelude module for convenient imports
//!
//! ```rust
//! use damage_core::prelude::*;
//! ```

// Core types
pub use crate::error::{CalcError, Result};
pub use crate::input::{keys, ResolvedInputs};
pub use crate::numeric::{round_down, to_exact, StatValue};

// Config
pub use crate::config::{merge, resolve_weapon_set, ConfigFragment, FragmentKind, MergeKind, PipelineConstants};

// Damage system
pub use crate::damage::{BracketPolicy, DamageBreakdown, DamagePipeline, StageInjection};

// Characters
pub use crate::characters::{registry, CharacterRegistry, DamageResult};

// Calculator
pub use crate::calculator::{CalculationRequest, Calculator};
