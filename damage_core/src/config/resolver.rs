//! Config resolution - Merging fragments into one ResolvedInputs
//!
//! Fragments are applied left to right. Mapping declarations are validated
//! for every fragment before any value is accumulated, so a rejected merge
//! never leaves a half-built input set behind.
//!
//! Concatenation of fragment lists is associative only while no two fragments
//! map the same source field to different destinations; such a conflict is
//! rejected with [`CalcError::ConfigMerge`].

use super::fragment::{ConfigFragment, MergeKind};
use crate::error::{CalcError, Result};
use crate::input::{keys, ResolvedInputs};
use crate::numeric::StatValue;
use rust_decimal::Decimal;
use std::collections::{BTreeMap, HashMap};
use tracing::debug;

/// Merge fragments in order into an immutable input set
pub fn merge(fragments: &[ConfigFragment]) -> Result<ResolvedInputs> {
    validate_mappings(fragments)?;

    let mut totals: BTreeMap<String, StatValue> = BTreeMap::new();

    for fragment in fragments {
        for field in &fragment.fields {
            let destination = match &field.merge {
                MergeKind::Additive => &field.key,
                MergeKind::Mapped { to } => to,
                MergeKind::Replace => {
                    totals.insert(field.key.clone(), field.value);
                    continue;
                }
            };

            let running = totals.entry(destination.clone()).or_insert(Decimal::ZERO);
            *running = running
                .checked_add(field.value)
                .ok_or_else(|| CalcError::ConfigMerge {
                    fragment: fragment.name.clone(),
                    field: field.key.clone(),
                    reason: format!("running total of `{destination}` overflows"),
                })?;
        }

        debug!(
            fragment = %fragment.name,
            kind = ?fragment.kind,
            fields = fragment.fields.len(),
            "Merged config fragment"
        );
    }

    validate_non_negative(&totals)?;
    Ok(ResolvedInputs::from_map(totals))
}

fn validate_mappings(fragments: &[ConfigFragment]) -> Result<()> {
    // source key -> (destination, fragment that declared it)
    let mut mappings: HashMap<&str, (&str, &str)> = HashMap::new();

    for fragment in fragments {
        for field in &fragment.fields {
            let MergeKind::Mapped { to } = &field.merge else {
                continue;
            };

            let reject = |reason: String| CalcError::ConfigMerge {
                fragment: fragment.name.clone(),
                field: field.key.clone(),
                reason,
            };

            if to.is_empty() || to == &field.key {
                return Err(reject(format!("ambiguous destination `{to}`")));
            }
            if !keys::is_known(to) {
                return Err(reject(format!("undeclared destination `{to}`")));
            }

            match mappings.get(field.key.as_str()) {
                Some((existing, declared_in)) if *existing != to.as_str() => {
                    return Err(reject(format!(
                        "conflicts with mapping to `{existing}` declared in `{declared_in}`"
                    )));
                }
                Some(_) => {}
                None => {
                    mappings.insert(field.key.as_str(), (to.as_str(), fragment.name.as_str()));
                }
            }
        }
    }

    // A destination that is itself mapped elsewhere would make the final key ambiguous
    for (source, (to, declared_in)) in &mappings {
        if mappings.contains_key(to) {
            return Err(CalcError::ConfigMerge {
                fragment: declared_in.to_string(),
                field: source.to_string(),
                reason: format!("destination `{to}` is itself mapped"),
            });
        }
    }

    Ok(())
}

fn validate_non_negative(totals: &BTreeMap<String, StatValue>) -> Result<()> {
    for key in keys::NON_NEGATIVE {
        if let Some(value) = totals.get(*key) {
            if value.is_sign_negative() && !value.is_zero() {
                return Err(CalcError::InvalidStatValue {
                    key: key.to_string(),
                    value: *value,
                });
            }
        }
    }
    Ok(())
}
