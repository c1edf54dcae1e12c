//! ResolvedInputs - The immutable stat map every pipeline stage reads from

use crate::error::Result;
use crate::numeric::{percent, sum, StatValue};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Canonical stat key names, as they appear in fragment sources
pub mod keys {
    pub const ATK_CHAR: &str = "ATK_CHAR";
    pub const ATK_PET: &str = "ATK_PET";
    pub const ATK_BASE: &str = "ATK_BASE";
    pub const FORMATION: &str = "Formation";
    pub const POTENTIAL_PET: &str = "Potential_PET";
    pub const BUFF_ATK: &str = "BUFF_ATK";
    pub const BUFF_ATK_PET: &str = "BUFF_ATK_PET";

    pub const HP_TARGET: &str = "HP_Target";
    pub const DMG_HP_PERCENT: &str = "Dmg_HP_Percent";
    pub const CAP_ATK_PERCENT: &str = "Cap_ATK_Percent";

    pub const SKILL_DMG: &str = "SKILL_DMG";
    pub const CRIT_DMG: &str = "CRIT_DMG";
    pub const WEAK_DMG: &str = "WEAK_DMG";
    pub const BONUS_CRIT_DMG: &str = "Bonus_Crit_DMG";
    pub const DMG_AMP_BUFF: &str = "DMG_AMP_BUFF";
    pub const DMG_AMP_DEBUFF: &str = "DMG_AMP_DEBUFF";
    pub const DMG_REDUCTION: &str = "DMG_Reduction";

    pub const DEF_TARGET: &str = "DEF_Target";
    pub const DEF_COEFFICIENT: &str = "DEF_Coefficient";
    pub const DEF_BUFF: &str = "DEF_BUFF";
    pub const DEF_REDUCE: &str = "DEF_REDUCE";
    pub const IGNORE_DEF: &str = "Ignore_DEF";

    pub const TARGET_HP_PERCENT: &str = "Target_HP_Percent";
    pub const HP_ALTER_REMAINING: &str = "HP_Alter_Remaining";
    pub const CRIT_SEARCH_THRESHOLD: &str = "Crit_Search_Threshold";
    pub const CRIT_SEARCH_LIMIT: &str = "Crit_Search_Limit";

    /// Every key the pipeline and the built-in characters understand
    pub const ALL: &[&str] = &[
        ATK_CHAR,
        ATK_PET,
        ATK_BASE,
        FORMATION,
        POTENTIAL_PET,
        BUFF_ATK,
        BUFF_ATK_PET,
        HP_TARGET,
        DMG_HP_PERCENT,
        CAP_ATK_PERCENT,
        SKILL_DMG,
        CRIT_DMG,
        WEAK_DMG,
        BONUS_CRIT_DMG,
        DMG_AMP_BUFF,
        DMG_AMP_DEBUFF,
        DMG_REDUCTION,
        DEF_TARGET,
        DEF_COEFFICIENT,
        DEF_BUFF,
        DEF_REDUCE,
        IGNORE_DEF,
        TARGET_HP_PERCENT,
        HP_ALTER_REMAINING,
        CRIT_SEARCH_THRESHOLD,
        CRIT_SEARCH_LIMIT,
    ];

    /// Stats that must never be negative after merging
    pub const NON_NEGATIVE: &[&str] = &[ATK_CHAR, ATK_PET, ATK_BASE, DEF_TARGET, HP_TARGET];

    /// Whether `key` is one of the canonical keys
    pub fn is_known(key: &str) -> bool {
        ALL.contains(&key)
    }
}

/// Immutable mapping from stat key to exact value
///
/// Missing keys read as zero. Variants for special mechanics are derived with
/// [`ResolvedInputs::with`] and [`ResolvedInputs::with_added`], which return a
/// new set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResolvedInputs {
    values: BTreeMap<String, StatValue>,
}

impl ResolvedInputs {
    pub(crate) fn from_map(values: BTreeMap<String, StatValue>) -> Self {
        ResolvedInputs { values }
    }

    /// Value for `key`, zero when absent
    pub fn get(&self, key: &str) -> StatValue {
        self.values.get(key).copied().unwrap_or(Decimal::ZERO)
    }

    /// Value for `key`, `default` when absent
    pub fn get_or(&self, key: &str, default: StatValue) -> StatValue {
        self.values.get(key).copied().unwrap_or(default)
    }

    /// Percent-unit value for `key` as a fraction (`42 → 0.42`)
    pub fn fraction(&self, key: &str) -> StatValue {
        percent(self.get(key))
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, StatValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// New set with `key` set to `value`
    pub fn with(&self, key: &str, value: StatValue) -> Self {
        let mut values = self.values.clone();
        values.insert(key.to_string(), value);
        ResolvedInputs { values }
    }

    /// New set with `delta` added to `key`
    pub fn with_added(&self, key: &str, delta: StatValue) -> Result<Self> {
        Ok(self.with(key, sum(key, &[self.get(key), delta])?))
    }
}

impl<K: Into<String>> FromIterator<(K, StatValue)> for ResolvedInputs {
    fn from_iter<I: IntoIterator<Item = (K, StatValue)>>(iter: I) -> Self {
        ResolvedInputs {
            values: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_missing_key_reads_zero() {
        let inputs = ResolvedInputs::default();
        assert_eq!(inputs.get(keys::CRIT_DMG), Decimal::ZERO);
        assert_eq!(inputs.get_or(keys::TARGET_HP_PERCENT, dec!(100)), dec!(100));
    }

    #[test]
    fn test_with_leaves_original_untouched() {
        let inputs: ResolvedInputs = [(keys::SKILL_DMG, dec!(100))].into_iter().collect();
        let boosted = inputs.with_added(keys::SKILL_DMG, dec!(60)).unwrap();

        assert_eq!(inputs.get(keys::SKILL_DMG), dec!(100));
        assert_eq!(boosted.get(keys::SKILL_DMG), dec!(160));

        let replaced = inputs.with(keys::WEAK_DMG, dec!(35));
        assert!(!inputs.contains(keys::WEAK_DMG));
        assert_eq!(replaced.get(keys::WEAK_DMG), dec!(35));
    }

    #[test]
    fn test_with_added_overflow() {
        let inputs: ResolvedInputs = [(keys::HP_TARGET, Decimal::MAX)].into_iter().collect();
        assert_eq!(
            inputs.with_added(keys::HP_TARGET, dec!(1)),
            Err(crate::error::CalcError::Overflow("HP_Target".to_string()))
        );
    }

    #[test]
    fn test_fraction() {
        let inputs: ResolvedInputs = [(keys::FORMATION, dec!(42))].into_iter().collect();
        assert_eq!(inputs.fraction(keys::FORMATION), dec!(0.42));
    }

    #[test]
    fn test_known_keys() {
        assert!(keys::is_known("CRIT_DMG"));
        assert!(keys::is_known("Ignore_DEF"));
        assert!(!keys::is_known("crit_dmg"));
    }
}
