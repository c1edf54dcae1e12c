//! Multi-case comparison - The same hit under several situational cases

use super::result::DamageResult;
use crate::damage::{DamagePipeline, StageInjection};
use crate::error::Result;
use crate::input::{keys, ResolvedInputs};
use rust_decimal::Decimal;
use tracing::debug;

/// One situational variant of the hit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComparisonCase {
    pub label: &'static str,
    /// Keep `CRIT_DMG`
    pub crit: bool,
    /// Keep `WEAK_DMG`
    pub weakness: bool,
    /// Keep the HP-based damage channel
    pub hp: bool,
}

impl ComparisonCase {
    pub const fn new(label: &'static str, crit: bool, weakness: bool, hp: bool) -> Self {
        ComparisonCase {
            label,
            crit,
            weakness,
            hp,
        }
    }

    /// Input variant with the switched-off brackets zeroed
    pub fn apply(&self, inputs: &ResolvedInputs) -> ResolvedInputs {
        let mut variant = inputs.clone();
        if !self.crit {
            variant = variant.with(keys::CRIT_DMG, Decimal::ZERO);
        }
        if !self.weakness {
            variant = variant.with(keys::WEAK_DMG, Decimal::ZERO);
        }
        variant
    }

    fn injection(&self) -> StageInjection {
        StageInjection {
            hp_channel: self.hp,
            ..StageInjection::default()
        }
    }
}

/// Evaluate every case, flagging the largest result
pub fn compare(
    cases: &[ComparisonCase],
    inputs: &ResolvedInputs,
    pipeline: &DamagePipeline,
) -> Result<DamageResult> {
    let mut result = DamageResult::new();
    for case in cases {
        let breakdown = pipeline.evaluate_with(&case.apply(inputs), &case.injection())?;
        debug!(case = case.label, final_dmg = %breakdown.final_dmg, "Evaluated comparison case");
        result = result.with_breakdown(case.label, breakdown);
    }
    Ok(result.flag_max())
}

const BISCUIT_CASES: &[ComparisonCase] = &[
    ComparisonCase::new("crit", true, false, false),
    ComparisonCase::new("crit_hp", true, false, true),
    ComparisonCase::new("weakness", false, true, false),
    ComparisonCase::new("weakness_hp", false, true, true),
];

pub fn biscuit(inputs: &ResolvedInputs, pipeline: &DamagePipeline) -> Result<DamageResult> {
    compare(BISCUIT_CASES, inputs, pipeline)
}
