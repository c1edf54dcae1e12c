//! Calculator - Registry lookup, fragment merge and handler dispatch for one request

use crate::characters::{registry, CharacterRegistry, DamageResult};
use crate::config::{merge, resolve_weapon_set, ConfigFragment, FragmentKind, PipelineConstants, WeaponSetId};
use crate::damage::DamagePipeline;
use crate::error::Result;
use crate::numeric::{to_exact, NumericInput};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// One damage calculation: a character and the fragments describing the situation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationRequest {
    pub character: String,
    /// Fragments in merge order
    pub fragments: Vec<ConfigFragment>,
}

impl CalculationRequest {
    pub fn new(character: impl Into<String>) -> Self {
        CalculationRequest {
            character: character.into(),
            fragments: Vec::new(),
        }
    }

    /// Append a fragment
    pub fn fragment(mut self, fragment: ConfigFragment) -> Self {
        self.fragments.push(fragment);
        self
    }

    /// Append a weapon set's bonus fragment
    pub fn weapon_set(self, id: impl Into<WeaponSetId>) -> Result<Self> {
        Ok(self.fragment(resolve_weapon_set(id)?))
    }

    /// Append a single situational value, merged with the key's default kind
    pub fn param(self, key: &str, value: impl Into<NumericInput>) -> Result<Self> {
        let value = to_exact(value)?;
        Ok(self.fragment(ConfigFragment::new(format!("param:{key}"), FragmentKind::Override).set(key, value)))
    }
}

/// Runs requests against a registry with fixed pipeline constants
#[derive(Debug, Clone)]
pub struct Calculator<'r> {
    registry: &'r CharacterRegistry,
    pipeline: DamagePipeline,
}

impl Default for Calculator<'static> {
    fn default() -> Self {
        Calculator::new()
    }
}

impl Calculator<'static> {
    /// Calculator over the built-in characters
    pub fn new() -> Self {
        Calculator {
            registry: registry(),
            pipeline: DamagePipeline::new(),
        }
    }
}

impl<'r> Calculator<'r> {
    pub fn with_registry(registry: &'r CharacterRegistry) -> Self {
        Calculator {
            registry,
            pipeline: DamagePipeline::new(),
        }
    }

    pub fn with_constants(mut self, constants: PipelineConstants) -> Self {
        self.pipeline = DamagePipeline::with_constants(constants);
        self
    }

    pub fn pipeline(&self) -> &DamagePipeline {
        &self.pipeline
    }

    /// Resolve the request's fragments and run its character
    ///
    /// An unknown character fails before any fragment is merged.
    pub fn calculate(&self, request: &CalculationRequest) -> Result<DamageResult> {
        self.registry.get(&request.character)?;

        let inputs = merge(&request.fragments)?;
        debug!(
            character = %request.character,
            fragments = request.fragments.len(),
            keys = inputs.len(),
            "Resolved calculation inputs"
        );

        self.registry.dispatch(&request.character, &inputs, &self.pipeline)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CalcError;
    use crate::input::keys;
    use rust_decimal_macros::dec;

    #[test]
    fn test_param_builder() {
        let request = CalculationRequest::new("miho")
            .param(keys::ATK_CHAR, 5000)
            .unwrap()
            .param(keys::SKILL_DMG, "120.5")
            .unwrap();

        assert_eq!(request.fragments.len(), 2);
        assert_eq!(request.fragments[1].field(keys::SKILL_DMG).unwrap().value, dec!(120.5));
        assert!(matches!(
            CalculationRequest::new("miho").param(keys::ATK_CHAR, "lots"),
            Err(CalcError::InvalidNumericInput(_))
        ));
    }

    #[test]
    fn test_weapon_set_builder() {
        let request = CalculationRequest::new("miho").weapon_set("hydra").unwrap();
        assert_eq!(request.fragments[0].kind, FragmentKind::WeaponSet);
        assert!(CalculationRequest::new("miho").weapon_set(9u8).is_err());
    }

    #[test]
    fn test_calculate_standard() {
        let request = CalculationRequest::new("Pascal")
            .param(keys::ATK_CHAR, 2000)
            .unwrap()
            .param(keys::SKILL_DMG, 150)
            .unwrap()
            .weapon_set(1u8)
            .unwrap();

        let result = Calculator::new().calculate(&request).unwrap();
        assert_eq!(result.character, "pascal");
        // 2000 × 1.5 × 1.35
        assert_eq!(result.get("damage"), Some(dec!(4050)));
    }

    #[test]
    fn test_unknown_character_checked_first() {
        // The bad mapping would fail the merge, but the lookup fails first
        let request = CalculationRequest::new("ghost").fragment(
            ConfigFragment::new("bad", FragmentKind::Override).mapped(keys::BONUS_CRIT_DMG, "NOPE", dec!(1)),
        );
        assert_eq!(
            Calculator::new().calculate(&request),
            Err(CalcError::UnknownCharacter("ghost".to_string()))
        );
    }

    #[test]
    fn test_custom_registry() {
        let mut characters = CharacterRegistry::new();
        characters
            .register("solo", crate::characters::standard::standard)
            .unwrap();
        let calculator = Calculator::with_registry(&characters);

        assert!(calculator.calculate(&CalculationRequest::new("solo")).is_ok());
        assert!(calculator.calculate(&CalculationRequest::new("miho")).is_err());
    }
}
