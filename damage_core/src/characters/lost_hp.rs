//! Lost-HP bonus - Extra crit/weakness bracket that grows as the target loses HP

use super::result::DamageResult;
use crate::damage::{DamagePipeline, StageInjection};
use crate::error::Result;
use crate::input::{keys, ResolvedInputs};
use crate::numeric::{product, sum, StatValue};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Bonus percent per percent of HP lost, up to a ceiling
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LostHpBonus {
    pub rate: StatValue,
    pub max_bonus: StatValue,
}

impl LostHpBonus {
    pub const fn new(rate: StatValue, max_bonus: StatValue) -> Self {
        LostHpBonus { rate, max_bonus }
    }

    /// Bonus percent at `remaining_percent` target HP
    pub fn bonus(&self, remaining_percent: StatValue) -> Result<StatValue> {
        const LABEL: &str = "lost-HP bonus";
        let lost = sum(LABEL, &[dec!(100), -remaining_percent])?.max(Decimal::ZERO);
        Ok(product(LABEL, &[lost, self.rate])?.min(self.max_bonus))
    }

    pub fn evaluate(&self, inputs: &ResolvedInputs, pipeline: &DamagePipeline) -> Result<DamageResult> {
        let remaining = inputs.get_or(keys::TARGET_HP_PERCENT, dec!(100));
        let injection = StageInjection::default().bracket_bonus(self.bonus(remaining)?);
        let breakdown = pipeline.evaluate_with(inputs, &injection)?;
        Ok(DamageResult::new().with_breakdown("damage", breakdown))
    }
}

const ESPADA: LostHpBonus = LostHpBonus::new(dec!(1), dec!(50));

pub fn espada(inputs: &ResolvedInputs, pipeline: &DamagePipeline) -> Result<DamageResult> {
    ESPADA.evaluate(inputs, pipeline)
}
