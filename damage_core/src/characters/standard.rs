//! Standard characters - One plain pipeline run

use super::result::DamageResult;
use crate::damage::DamagePipeline;
use crate::error::Result;
use crate::input::ResolvedInputs;

/// Evaluate the shared formula once, labelled `damage`
pub fn standard(inputs: &ResolvedInputs, pipeline: &DamagePipeline) -> Result<DamageResult> {
    let breakdown = pipeline.evaluate(inputs)?;
    Ok(DamageResult::new().with_breakdown("damage", breakdown))
}
