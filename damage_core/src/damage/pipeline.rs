//! DamagePipeline - Runs the seven stages in order over resolved inputs

use super::breakdown::DamageBreakdown;
use super::stages::{self, BracketPolicy, DefenseTerms, RawDamageTerms};
use crate::config::PipelineConstants;
use crate::error::Result;
use crate::input::{keys, ResolvedInputs};
use crate::numeric::{sum, StatValue};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::trace;

/// Adjustments a character mechanic feeds into one pipeline run
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StageInjection {
    /// Extra percent added to `SKILL_DMG`
    pub skill_bonus: StatValue,
    /// Extra percent added to the crit/weakness bracket
    pub bracket_bonus: StatValue,
    /// Multiplier applied to raw damage
    pub raw_multiplier: StatValue,
    /// Whether capped HP damage joins the base damage
    pub hp_channel: bool,
}

impl Default for StageInjection {
    fn default() -> Self {
        StageInjection {
            skill_bonus: Decimal::ZERO,
            bracket_bonus: Decimal::ZERO,
            raw_multiplier: Decimal::ONE,
            hp_channel: true,
        }
    }
}

impl StageInjection {
    pub fn skill_bonus(mut self, bonus: StatValue) -> Self {
        self.skill_bonus += bonus;
        self
    }

    pub fn bracket_bonus(mut self, bonus: StatValue) -> Self {
        self.bracket_bonus += bonus;
        self
    }

    pub fn multiplier(mut self, multiplier: StatValue) -> Self {
        self.raw_multiplier = multiplier;
        self
    }

    pub fn without_hp(mut self) -> Self {
        self.hp_channel = false;
        self
    }
}

/// The shared damage formula
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DamagePipeline {
    constants: PipelineConstants,
}

impl DamagePipeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_constants(constants: PipelineConstants) -> Self {
        DamagePipeline { constants }
    }

    pub fn with_policy(policy: BracketPolicy) -> Self {
        DamagePipeline {
            constants: PipelineConstants {
                bracket_policy: policy,
                ..PipelineConstants::default()
            },
        }
    }

    pub fn constants(&self) -> &PipelineConstants {
        &self.constants
    }

    pub fn policy(&self) -> BracketPolicy {
        self.constants.bracket_policy
    }

    /// Run every stage with no character adjustments
    pub fn evaluate(&self, inputs: &ResolvedInputs) -> Result<DamageBreakdown> {
        self.evaluate_with(inputs, &StageInjection::default())
    }

    /// Run every stage, applying a mechanic's adjustments
    pub fn evaluate_with(
        &self,
        inputs: &ResolvedInputs,
        injection: &StageInjection,
    ) -> Result<DamageBreakdown> {
        let policy = self.policy();
        let atk_char = inputs.get(keys::ATK_CHAR);

        let total_atk = stages::total_atk(
            atk_char,
            inputs.get(keys::ATK_PET),
            inputs.get_or(keys::ATK_BASE, atk_char),
            inputs.get(keys::FORMATION),
            inputs.get(keys::POTENTIAL_PET),
            inputs.get(keys::BUFF_ATK),
            inputs.get(keys::BUFF_ATK_PET),
        )?;
        let dmg_hp = stages::dmg_hp(inputs.get(keys::HP_TARGET), inputs.get(keys::DMG_HP_PERCENT))?;
        let cap_atk = stages::cap_atk(total_atk, inputs.get(keys::CAP_ATK_PERCENT))?;
        let final_dmg_hp = if injection.hp_channel {
            stages::final_dmg_hp(dmg_hp, cap_atk)
        } else {
            Decimal::ZERO
        };

        let raw_dmg = stages::raw_dmg(
            &RawDamageTerms {
                total_atk,
                skill_dmg: sum(keys::SKILL_DMG, &[inputs.get(keys::SKILL_DMG), injection.skill_bonus])?,
                final_dmg_hp,
                crit_dmg: inputs.get(keys::CRIT_DMG),
                weak_dmg: inputs.get(keys::WEAK_DMG),
                bracket_bonus: injection.bracket_bonus,
                dmg_amp_buff: inputs.get(keys::DMG_AMP_BUFF),
                dmg_amp_debuff: inputs.get(keys::DMG_AMP_DEBUFF),
                dmg_reduction: inputs.get(keys::DMG_REDUCTION),
                multiplier: injection.raw_multiplier,
            },
            policy,
        )?;
        let effective_def = stages::effective_def(
            &DefenseTerms {
                def_target: inputs.get(keys::DEF_TARGET),
                coefficient: inputs.get_or(keys::DEF_COEFFICIENT, Decimal::ONE),
                def_buff: inputs.get(keys::DEF_BUFF),
                def_reduce: inputs.get(keys::DEF_REDUCE),
                ignore_def: inputs.get(keys::IGNORE_DEF),
            },
            policy,
        )?;
        let final_dmg = stages::final_dmg(raw_dmg, effective_def)?;

        trace!(
            %total_atk,
            %final_dmg_hp,
            %raw_dmg,
            %effective_def,
            %final_dmg,
            "Evaluated damage pipeline"
        );

        Ok(DamageBreakdown {
            total_atk,
            dmg_hp,
            cap_atk,
            final_dmg_hp,
            raw_dmg,
            effective_def,
            final_dmg,
        })
    }
}
