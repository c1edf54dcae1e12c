//! HP alteration - Damage that sets the target's HP to a fixed remainder
//!
//! The alteration is computed straight from target HP, limited by the
//! attack cap and never reduced by defense. The accompanying skill hit runs
//! through the pipeline without the HP channel.

use super::result::DamageResult;
use crate::damage::{stages, DamageBreakdown, DamagePipeline, StageInjection};
use crate::error::Result;
use crate::input::{keys, ResolvedInputs};
use crate::numeric::{percent, product, sum, StatValue};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// HP lost when the target is left at `remaining_percent` of its HP
pub fn alteration_damage(hp_target: StatValue, remaining_percent: StatValue) -> Result<StatValue> {
    const LABEL: &str = "hp_alteration";
    let lost = sum(LABEL, &[Decimal::ONE, -percent(remaining_percent)])?;
    Ok(product(LABEL, &[hp_target, lost])?.max(Decimal::ZERO))
}

/// Skill hit plus capped HP alteration
pub fn hp_alteration(inputs: &ResolvedInputs, pipeline: &DamagePipeline) -> Result<DamageResult> {
    let skill = pipeline.evaluate_with(inputs, &StageInjection::default().without_hp())?;

    let raw_alteration = alteration_damage(
        inputs.get(keys::HP_TARGET),
        inputs.get_or(keys::HP_ALTER_REMAINING, dec!(100)),
    )?;
    let alteration = stages::final_dmg_hp(raw_alteration, skill.cap_atk);
    let total = sum("total", &[skill.final_dmg, alteration])?;

    Ok(DamageResult::new()
        .with_breakdown("skill", skill)
        .with_breakdown(
            "hp_alteration",
            DamageBreakdown {
                dmg_hp: raw_alteration,
                final_dmg_hp: alteration,
                raw_dmg: alteration,
                final_dmg: alteration,
                ..Default::default()
            },
        )
        .with_value("total", total))
}
