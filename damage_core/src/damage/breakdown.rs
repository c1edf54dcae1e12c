//! DamageBreakdown - Every stage value of one pipeline run

use crate::numeric::StatValue;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Stage-by-stage record of a single pipeline evaluation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DamageBreakdown {
    // === Attack ===
    /// Stage 1
    pub total_atk: StatValue,

    // === HP Channel ===
    /// Stage 2
    pub dmg_hp: StatValue,
    /// Stage 3
    pub cap_atk: StatValue,
    /// Stage 4, zero when the HP channel is off
    pub final_dmg_hp: StatValue,

    // === Damage ===
    /// Stage 5
    pub raw_dmg: StatValue,
    /// Stage 6
    pub effective_def: StatValue,
    /// Stage 7
    pub final_dmg: StatValue,
}

impl Default for DamageBreakdown {
    fn default() -> Self {
        DamageBreakdown {
            total_atk: Decimal::ZERO,
            dmg_hp: Decimal::ZERO,
            cap_atk: Decimal::ZERO,
            final_dmg_hp: Decimal::ZERO,
            raw_dmg: Decimal::ZERO,
            effective_def: Decimal::ONE,
            final_dmg: Decimal::ZERO,
        }
    }
}

impl DamageBreakdown {
    /// Damage lost to the target's defense, `None` if it does not fit a decimal
    pub fn mitigated(&self) -> Option<StatValue> {
        self.raw_dmg.checked_sub(self.final_dmg)
    }

    /// Whether stage 4 clipped the HP damage
    pub fn hp_capped(&self) -> bool {
        self.cap_atk > Decimal::ZERO && self.dmg_hp > self.cap_atk
    }
}
