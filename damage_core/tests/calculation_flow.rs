//! End-to-end calculations: fragment sources through merge, dispatch and pipeline

use damage_core::config::{parse_constants, parse_json_fragment, parse_toml_fragment, CharacterSheet};
use damage_core::prelude::*;
use rust_decimal_macros::dec;

const MIHO: &str = r#"{
    "_character": "Miho",
    "_rarity": "legend",
    "_class": "magic",
    "_element": "Fire",
    "ATK_CHAR": 5000,
    "CRIT_DMG": 85,
    "Bonus_Crit_DMG": 20,
    "_skills": {
        "skill1": { "_name": "Fox Fire", "SKILL_DMG": 120 }
    }
}"#;

const BOSS: &str = r#"
DEF_Target = 1000
DMG_Reduction = 10
"#;

fn character() -> ConfigFragment {
    parse_json_fragment("miho", FragmentKind::Character, MIHO).unwrap()
}

fn boss() -> ConfigFragment {
    parse_toml_fragment("boss", FragmentKind::Monster, BOSS).unwrap()
}

#[test]
fn test_example_total_atk() {
    let inputs = merge(&[ConfigFragment::new("user", FragmentKind::Override).set(keys::ATK_CHAR, dec!(5000))]).unwrap();
    let breakdown = DamagePipeline::new().evaluate(&inputs).unwrap();
    assert_eq!(breakdown.total_atk, dec!(5000));
}

#[test]
fn test_example_hp_damage() {
    let inputs = merge(&[ConfigFragment::new("user", FragmentKind::Override)
        .set(keys::ATK_CHAR, dec!(5000))
        .set(keys::HP_TARGET, dec!(10000))
        .additive(keys::DMG_HP_PERCENT, dec!(7))
        .additive(keys::CAP_ATK_PERCENT, dec!(100))])
    .unwrap();
    let breakdown = DamagePipeline::new().evaluate(&inputs).unwrap();

    assert_eq!(breakdown.dmg_hp, dec!(700));
    assert_eq!(breakdown.cap_atk, dec!(5000));
    assert_eq!(breakdown.final_dmg_hp, dec!(700));
}

#[test]
fn test_example_hp_alteration() {
    let request = CalculationRequest::new("freyja")
        .param(keys::HP_TARGET, 100_000_000i64)
        .unwrap()
        .param(keys::HP_ALTER_REMAINING, 39)
        .unwrap()
        .fragment(boss());

    let result = Calculator::new().calculate(&request).unwrap();
    assert_eq!(result.get("hp_alteration"), Some(dec!(61000000)));
    assert_eq!(result.get("total"), Some(dec!(61000000)));
}

#[test]
fn test_example_round_down() {
    let inputs = merge(&[ConfigFragment::new("user", FragmentKind::Override)
        .set(keys::ATK_CHAR, dec!(100.5))
        .additive(keys::SKILL_DMG, dec!(100))])
    .unwrap();
    let breakdown = DamagePipeline::new().evaluate(&inputs).unwrap();

    assert_eq!(breakdown.raw_dmg, dec!(100.5));
    assert_eq!(breakdown.final_dmg, dec!(100));
}

#[test]
fn test_example_mapped_bonus_crit() {
    let inputs = merge(&[character()]).unwrap();
    assert_eq!(inputs.get(keys::CRIT_DMG), dec!(105));
    assert!(!inputs.contains(keys::BONUS_CRIT_DMG));
}

#[test]
fn test_example_unknown_character() {
    let request = CalculationRequest::new("nobody").fragment(character());
    assert_eq!(
        Calculator::new().calculate(&request),
        Err(CalcError::UnknownCharacter("nobody".to_string()))
    );
}

#[test]
fn test_character_sheet_flow() {
    let fragment = character();
    let sheet = CharacterSheet::from_fragment(&fragment).unwrap();

    let request = CalculationRequest::new(&sheet.name)
        .fragment(fragment.clone())
        .fragment(sheet.roster_fragment().unwrap())
        .fragment(sheet.skill_fragment("skill1").unwrap())
        .param(keys::FORMATION, 42)
        .unwrap()
        .weapon_set("weakness")
        .unwrap()
        .fragment(boss());

    let result = Calculator::new().calculate(&request).unwrap();
    let breakdown = result.entry("damage").unwrap().breakdown.clone().unwrap();

    assert_eq!(result.character, "miho");
    // 5000 + 1500 × 0.42
    assert_eq!(breakdown.total_atk, dec!(5630));
    // 5630 × 1.2 × (1 + 1.05 + 0.35) × 0.9
    assert_eq!(breakdown.raw_dmg, dec!(14592.96));
    assert_eq!(breakdown.effective_def, dec!(1001));
    assert_eq!(breakdown.final_dmg, dec!(14));
}

#[test]
fn test_weapon_set_reduces_defense() {
    let base = CalculationRequest::new("standard")
        .param(keys::ATK_CHAR, 10000)
        .unwrap()
        .param(keys::SKILL_DMG, 100)
        .unwrap()
        .param(keys::DEF_TARGET, 9)
        .unwrap();
    let with_set = base.clone().weapon_set(2u8).unwrap();

    let calculator = Calculator::new();
    let plain = calculator.calculate(&base).unwrap().get("damage").unwrap();
    let reduced = calculator.calculate(&with_set).unwrap().get("damage").unwrap();

    // 10000 / 10 and 10000 / (1 + 9 × 0.85)
    assert_eq!(plain, dec!(1000));
    assert_eq!(reduced, dec!(1156));
}

#[test]
fn test_every_builtin_runs_on_plain_inputs() {
    let request = CalculationRequest::new("standard")
        .param(keys::ATK_CHAR, 1000)
        .unwrap()
        .param(keys::SKILL_DMG, 100)
        .unwrap()
        .param(keys::CRIT_SEARCH_THRESHOLD, 1250)
        .unwrap();
    let calculator = Calculator::new();

    for name in registry().list_registered() {
        let request = CalculationRequest {
            character: name.clone(),
            ..request.clone()
        };
        let result = calculator.calculate(&request).unwrap();
        assert_eq!(result.character, name);
        assert!(!result.entries.is_empty(), "{name} produced no entries");
    }
}

#[test]
fn test_comparison_through_calculator() {
    let request = CalculationRequest::new("Biscuit")
        .param(keys::ATK_CHAR, 1000)
        .unwrap()
        .param(keys::SKILL_DMG, 100)
        .unwrap()
        .param(keys::CRIT_DMG, 50)
        .unwrap()
        .param(keys::WEAK_DMG, 30)
        .unwrap()
        .param(keys::HP_TARGET, 10000)
        .unwrap()
        .param(keys::DMG_HP_PERCENT, 5)
        .unwrap()
        .param(keys::CAP_ATK_PERCENT, 100)
        .unwrap();

    let result = Calculator::new().calculate(&request).unwrap();
    assert_eq!(result.entries.len(), 4);
    assert_eq!(result.max().unwrap().label, "crit_hp");
    assert_eq!(result.max().unwrap().value, dec!(2250));
}

#[test]
fn test_crit_search_through_calculator() {
    let request = CalculationRequest::new("ryan")
        .param(keys::ATK_CHAR, 1000)
        .unwrap()
        .param(keys::SKILL_DMG, 100)
        .unwrap()
        .param(keys::CRIT_SEARCH_THRESHOLD, 1250)
        .unwrap();

    let result = Calculator::new().calculate(&request).unwrap();
    let trace = result.crit_search.unwrap();
    assert_eq!(trace.answer, 3);
    assert_eq!(trace.steps.len(), 4);
    assert_eq!(trace.limit, 50);
}

#[test]
fn test_constants_from_toml() {
    let constants = parse_constants(
        r#"
bracket_policy = "clamp_at_zero"
crit_search_limit = 1
"#,
    )
    .unwrap();
    let calculator = Calculator::new().with_constants(constants);

    let negative = CalculationRequest::new("standard")
        .param(keys::ATK_CHAR, 1000)
        .unwrap()
        .param(keys::SKILL_DMG, 100)
        .unwrap()
        .param(keys::DMG_REDUCTION, 150)
        .unwrap();
    assert_eq!(calculator.calculate(&negative).unwrap().get("damage"), Some(dec!(0)));
    assert_eq!(
        Calculator::new().calculate(&negative).unwrap().get("damage"),
        Some(dec!(-500))
    );

    let search = CalculationRequest::new("ryan")
        .param(keys::ATK_CHAR, 1000)
        .unwrap()
        .param(keys::SKILL_DMG, 100)
        .unwrap()
        .param(keys::CRIT_SEARCH_THRESHOLD, 1250)
        .unwrap();
    assert!(matches!(
        calculator.calculate(&search),
        Err(CalcError::ThresholdUnreachable { limit: 1, .. })
    ));
}

#[test]
fn test_merge_error_aborts_request() {
    let bad = parse_json_fragment(
        "bad_set",
        FragmentKind::WeaponSet,
        r#"{ "Bonus_Crit_DMG": { "value": 20, "merge": "mapped", "to": "CRIT" } }"#,
    )
    .unwrap();
    let request = CalculationRequest::new("miho").fragment(character()).fragment(bad);

    assert!(matches!(
        Calculator::new().calculate(&request),
        Err(CalcError::ConfigMerge { .. })
    ));
}

#[test]
fn test_overflow_fails_the_request() {
    let request = CalculationRequest::new("standard")
        .param(keys::ATK_CHAR, 1000)
        .unwrap()
        .param(keys::HP_TARGET, "5e28")
        .unwrap()
        .param(keys::DMG_HP_PERCENT, 500)
        .unwrap();

    assert!(matches!(
        Calculator::new().calculate(&request),
        Err(CalcError::Overflow(_))
    ));
}

#[test]
fn test_crit_search_needs_threshold_and_bounded_limit() {
    let base = CalculationRequest::new("ryan")
        .param(keys::ATK_CHAR, 1000)
        .unwrap()
        .param(keys::SKILL_DMG, 100)
        .unwrap();
    let calculator = Calculator::new();

    assert!(matches!(
        calculator.calculate(&base),
        Err(CalcError::MissingStatValue(key)) if key == keys::CRIT_SEARCH_THRESHOLD
    ));

    let unbounded = base
        .param(keys::CRIT_SEARCH_THRESHOLD, 1250)
        .unwrap()
        .param(keys::CRIT_SEARCH_LIMIT, 4_000_000_000i64)
        .unwrap();
    assert!(matches!(
        calculator.calculate(&unbounded),
        Err(CalcError::InvalidStatValue { key, .. }) if key == keys::CRIT_SEARCH_LIMIT
    ));
}

#[test]
fn test_float_input_is_exact() {
    let request = CalculationRequest::new("standard")
        .param(keys::ATK_CHAR, 1000)
        .unwrap()
        .param(keys::SKILL_DMG, 100)
        .unwrap()
        .param(keys::BUFF_ATK, 0.1)
        .unwrap()
        .param(keys::BUFF_ATK_PET, 0.2)
        .unwrap();

    let result = Calculator::new().calculate(&request).unwrap();
    let breakdown = result.entry("damage").unwrap().breakdown.clone().unwrap();
    assert_eq!(breakdown.total_atk, dec!(1003));
}

#[test]
fn test_result_serializes() {
    let request = CalculationRequest::new("klahan")
        .param(keys::ATK_CHAR, 1000)
        .unwrap()
        .param(keys::SKILL_DMG, 100)
        .unwrap();
    let result = Calculator::new().calculate(&request).unwrap();

    let json = serde_json::to_string(&result).unwrap();
    let back: DamageResult = serde_json::from_str(&json).unwrap();
    assert_eq!(back, result);
}
