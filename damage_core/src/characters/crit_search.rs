//! Crit search - Fewest crit stacks that reach a damage threshold
//!
//! Each stack multiplies raw damage by a fixed percent. Counts are tried from
//! zero upward and the search stops at the first count whose final damage
//! meets the threshold. The bound never exceeds
//! `PipelineConstants::max_crit_search_limit`, and the search ends after the
//! first count when further stacks cannot raise the damage.

use super::result::DamageResult;
use crate::damage::{DamageBreakdown, DamagePipeline, StageInjection};
use crate::error::{CalcError, Result};
use crate::input::{keys, ResolvedInputs};
use crate::numeric::{percent, product, sum, StatValue};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use tracing::{debug, trace};

/// Final damage at one crit count
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CritStep {
    pub count: u32,
    pub final_dmg: StatValue,
}

/// Every evaluated count and the answer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CritSearchTrace {
    pub threshold: StatValue,
    pub limit: u32,
    pub steps: Vec<CritStep>,
    /// First count meeting the threshold
    pub answer: u32,
}

/// Search parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CritSearch {
    /// Raw damage percent added per crit stack
    pub per_crit: StatValue,
}

struct SearchOutcome {
    steps: Vec<CritStep>,
    hit: Option<(u32, DamageBreakdown)>,
}

impl CritSearch {
    pub const fn new(per_crit: StatValue) -> Self {
        CritSearch { per_crit }
    }

    /// Raw damage multiplier at `count` stacks
    pub fn multiplier(&self, count: u32) -> Result<StatValue> {
        const LABEL: &str = "crit multiplier";
        let stacks = product(LABEL, &[Decimal::from(count), percent(self.per_crit)])?;
        sum(LABEL, &[Decimal::ONE, stacks])
    }

    pub fn evaluate(&self, inputs: &ResolvedInputs, pipeline: &DamagePipeline) -> Result<DamageResult> {
        let threshold = search_threshold(inputs)?;
        let limit = search_limit(inputs, pipeline)?;
        let outcome = self.run(inputs, pipeline, threshold, limit)?;

        match outcome.hit {
            Some((answer, breakdown)) => Ok(DamageResult::new()
                .with_value("crit_count", Decimal::from(answer))
                .with_breakdown("damage", breakdown)
                .with_crit_search(CritSearchTrace {
                    threshold,
                    limit,
                    steps: outcome.steps,
                    answer,
                })),
            None => {
                let best = outcome
                    .steps
                    .iter()
                    .map(|step| step.final_dmg)
                    .max()
                    .unwrap_or(Decimal::ZERO);
                Err(CalcError::ThresholdUnreachable {
                    threshold,
                    limit,
                    best,
                })
            }
        }
    }

    fn run(
        &self,
        inputs: &ResolvedInputs,
        pipeline: &DamagePipeline,
        threshold: StatValue,
        limit: u32,
    ) -> Result<SearchOutcome> {
        let mut steps = Vec::new();

        for count in 0..=limit {
            let injection = StageInjection::default().multiplier(self.multiplier(count)?);
            let breakdown = pipeline.evaluate_with(inputs, &injection)?;
            trace!(count, final_dmg = %breakdown.final_dmg, "Crit search step");
            steps.push(CritStep {
                count,
                final_dmg: breakdown.final_dmg,
            });

            if breakdown.final_dmg >= threshold {
                debug!(count, %threshold, "Crit search reached threshold");
                return Ok(SearchOutcome {
                    steps,
                    hit: Some((count, breakdown)),
                });
            }
            if count == 0 && self.stalled(&breakdown) {
                debug!(raw_dmg = %breakdown.raw_dmg, "Crit stacks cannot raise damage");
                break;
            }
        }

        Ok(SearchOutcome { steps, hit: None })
    }

    /// Whether extra stacks can never raise damage above the zero-stack run
    fn stalled(&self, base: &DamageBreakdown) -> bool {
        if base.effective_def <= Decimal::ZERO {
            return false;
        }
        match self.per_crit.cmp(&Decimal::ZERO) {
            Ordering::Greater => base.raw_dmg <= Decimal::ZERO,
            Ordering::Less => base.raw_dmg >= Decimal::ZERO,
            Ordering::Equal => true,
        }
    }
}

fn search_threshold(inputs: &ResolvedInputs) -> Result<StatValue> {
    if !inputs.contains(keys::CRIT_SEARCH_THRESHOLD) {
        return Err(CalcError::MissingStatValue(
            keys::CRIT_SEARCH_THRESHOLD.to_string(),
        ));
    }
    Ok(inputs.get(keys::CRIT_SEARCH_THRESHOLD))
}

fn search_limit(inputs: &ResolvedInputs, pipeline: &DamagePipeline) -> Result<u32> {
    let constants = pipeline.constants();
    let invalid = |value: StatValue| CalcError::InvalidStatValue {
        key: keys::CRIT_SEARCH_LIMIT.to_string(),
        value,
    };

    let limit = if inputs.contains(keys::CRIT_SEARCH_LIMIT) {
        let value = inputs.get(keys::CRIT_SEARCH_LIMIT);
        value.trunc().to_u32().ok_or_else(|| invalid(value))?
    } else {
        constants.crit_search_limit
    };

    if limit > constants.max_crit_search_limit {
        return Err(invalid(Decimal::from(limit)));
    }
    Ok(limit)
}

const RYAN: CritSearch = CritSearch::new(dec!(10));

pub fn ryan(inputs: &ResolvedInputs, pipeline: &DamagePipeline) -> Result<DamageResult> {
    RYAN.evaluate(inputs, pipeline)
}
