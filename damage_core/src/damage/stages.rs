//! The seven damage stages as pure functions over exact decimals
//!
//! All percent arguments are in percent units (`42` = 42%).

use crate::error::{CalcError, Result};
use crate::numeric::{percent, product, round_down, sum, StatValue};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// How a multiplicative bracket below zero is treated
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BracketPolicy {
    /// Use every bracket as computed, even if it inverts the sign
    #[default]
    FaceValue,
    /// Floor every bracket at zero
    ClampAtZero,
}

impl BracketPolicy {
    pub fn apply(self, bracket: StatValue) -> StatValue {
        match self {
            BracketPolicy::FaceValue => bracket,
            BracketPolicy::ClampAtZero => bracket.max(Decimal::ZERO),
        }
    }
}

/// Stage 1: `(ATK_CHAR + ATK_PET + ATK_BASE × (Formation + Potential)) × (1 + BUFF_ATK + BUFF_ATK_PET)`
pub fn total_atk(
    atk_char: StatValue,
    atk_pet: StatValue,
    atk_base: StatValue,
    formation: StatValue,
    potential_pet: StatValue,
    buff_atk: StatValue,
    buff_atk_pet: StatValue,
) -> Result<StatValue> {
    const STAGE: &str = "Total_ATK";
    let scaled = product(STAGE, &[atk_base, percent(sum(STAGE, &[formation, potential_pet])?)])?;
    let flat = sum(STAGE, &[atk_char, atk_pet, scaled])?;
    let buff = sum(STAGE, &[Decimal::ONE, percent(sum(STAGE, &[buff_atk, buff_atk_pet])?)])?;
    product(STAGE, &[flat, buff])
}

/// Stage 2: `HP_Target × Dmg_HP_Percent`
pub fn dmg_hp(hp_target: StatValue, dmg_hp_percent: StatValue) -> Result<StatValue> {
    product("Dmg_HP", &[hp_target, percent(dmg_hp_percent)])
}

/// Stage 3: `Total_ATK × Cap_Percent`
pub fn cap_atk(total_atk: StatValue, cap_percent: StatValue) -> Result<StatValue> {
    product("Cap_ATK", &[total_atk, percent(cap_percent)])
}

/// Stage 4: HP-based damage limited by the attack cap
///
/// Both sides are rounded down. A cap of zero or less means no cap is
/// configured and the HP damage passes through.
pub fn final_dmg_hp(dmg_hp: StatValue, cap_atk: StatValue) -> StatValue {
    let dmg_hp = round_down(dmg_hp);
    if cap_atk <= Decimal::ZERO {
        return dmg_hp;
    }
    dmg_hp.min(round_down(cap_atk))
}

/// Inputs to stage 5
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RawDamageTerms {
    pub total_atk: StatValue,
    pub skill_dmg: StatValue,
    pub final_dmg_hp: StatValue,
    pub crit_dmg: StatValue,
    pub weak_dmg: StatValue,
    /// Extra percent in the crit/weakness bracket
    pub bracket_bonus: StatValue,
    pub dmg_amp_buff: StatValue,
    pub dmg_amp_debuff: StatValue,
    pub dmg_reduction: StatValue,
    /// Final multiplier on raw damage (1 = none)
    pub multiplier: StatValue,
}

impl Default for RawDamageTerms {
    fn default() -> Self {
        RawDamageTerms {
            total_atk: Decimal::ZERO,
            skill_dmg: Decimal::ZERO,
            final_dmg_hp: Decimal::ZERO,
            crit_dmg: Decimal::ZERO,
            weak_dmg: Decimal::ZERO,
            bracket_bonus: Decimal::ZERO,
            dmg_amp_buff: Decimal::ZERO,
            dmg_amp_debuff: Decimal::ZERO,
            dmg_reduction: Decimal::ZERO,
            multiplier: Decimal::ONE,
        }
    }
}

/// Stage 5: raw damage
///
/// `(Total_ATK × SKILL + HP) × (1 + CRIT + WEAK) × (1 + AMP_BUFF − AMP_DEBUFF) × (1 − Reduction)`
pub fn raw_dmg(terms: &RawDamageTerms, policy: BracketPolicy) -> Result<StatValue> {
    const STAGE: &str = "Raw_DMG";
    let skill_hit = product(STAGE, &[terms.total_atk, percent(terms.skill_dmg)])?;
    let base = sum(STAGE, &[skill_hit, terms.final_dmg_hp])?;

    let crit_weak = sum(STAGE, &[terms.crit_dmg, terms.weak_dmg, terms.bracket_bonus])?;
    let amplify = sum(STAGE, &[terms.dmg_amp_buff, -terms.dmg_amp_debuff])?;
    let brackets = [
        policy.apply(sum(STAGE, &[Decimal::ONE, percent(crit_weak)])?),
        policy.apply(sum(STAGE, &[Decimal::ONE, percent(amplify)])?),
        policy.apply(sum(STAGE, &[Decimal::ONE, -percent(terms.dmg_reduction)])?),
    ];

    product(STAGE, &[base, brackets[0], brackets[1], brackets[2], terms.multiplier])
}

/// Inputs to stage 6
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DefenseTerms {
    pub def_target: StatValue,
    /// Scale applied to the target's defense (1 = none)
    pub coefficient: StatValue,
    pub def_buff: StatValue,
    pub def_reduce: StatValue,
    pub ignore_def: StatValue,
}

impl Default for DefenseTerms {
    fn default() -> Self {
        DefenseTerms {
            def_target: Decimal::ZERO,
            coefficient: Decimal::ONE,
            def_buff: Decimal::ZERO,
            def_reduce: Decimal::ZERO,
            ignore_def: Decimal::ZERO,
        }
    }
}

/// Stage 6: `1 + DEF × coefficient × (1 + DEF_BUFF − DEF_REDUCE) × (1 − Ignore_DEF)`
pub fn effective_def(terms: &DefenseTerms, policy: BracketPolicy) -> Result<StatValue> {
    const STAGE: &str = "Effective_DEF";
    let shift = sum(STAGE, &[terms.def_buff, -terms.def_reduce])?;
    let modifier = policy.apply(sum(STAGE, &[Decimal::ONE, percent(shift)])?);
    let ignored = policy.apply(sum(STAGE, &[Decimal::ONE, -percent(terms.ignore_def)])?);
    let defense = product(STAGE, &[terms.def_target, terms.coefficient, modifier, ignored])?;
    sum(STAGE, &[Decimal::ONE, defense])
}

/// Stage 7: `round_down(Raw_DMG / Effective_DEF)`
pub fn final_dmg(raw_dmg: StatValue, effective_def: StatValue) -> Result<StatValue> {
    raw_dmg
        .checked_div(effective_def)
        .map(round_down)
        .ok_or(CalcError::InvalidStatValue {
            key: "Effective_DEF".to_string(),
            value: effective_def,
        })
}
