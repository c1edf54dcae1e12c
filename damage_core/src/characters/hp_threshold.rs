//! HP threshold - Skill bonus while the target stays above an HP percent

use super::result::DamageResult;
use crate::damage::{DamagePipeline, StageInjection};
use crate::error::Result;
use crate::input::{keys, ResolvedInputs};
use crate::numeric::StatValue;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// `SKILL_DMG` bonus applied when remaining HP is at or above `threshold`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HpThresholdBonus {
    pub threshold: StatValue,
    pub skill_bonus: StatValue,
}

impl HpThresholdBonus {
    pub const fn new(threshold: StatValue, skill_bonus: StatValue) -> Self {
        HpThresholdBonus {
            threshold,
            skill_bonus,
        }
    }

    pub fn bonus(&self, remaining_percent: StatValue) -> StatValue {
        if remaining_percent >= self.threshold {
            self.skill_bonus
        } else {
            Decimal::ZERO
        }
    }

    pub fn evaluate(&self, inputs: &ResolvedInputs, pipeline: &DamagePipeline) -> Result<DamageResult> {
        let remaining = inputs.get_or(keys::TARGET_HP_PERCENT, dec!(100));
        let injection = StageInjection::default().skill_bonus(self.bonus(remaining));
        let breakdown = pipeline.evaluate_with(inputs, &injection)?;
        Ok(DamageResult::new().with_breakdown("damage", breakdown))
    }
}

const KLAHAN: HpThresholdBonus = HpThresholdBonus::new(dec!(50), dec!(60));

pub fn klahan(inputs: &ResolvedInputs, pipeline: &DamagePipeline) -> Result<DamageResult> {
    KLAHAN.evaluate(inputs, pipeline)
}
