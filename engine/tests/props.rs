use proptest::prelude::*;
use shinzoku_engine::{
    calculate_hp_armor_damage, AbilityKind, Attribute, AttributeKind, AutoBattleField,
    BattleRank, Character, CharacterId, ScriptedRandomizer, SpecialAbility, TeamSetup,
};

fn duelist(name: &str, stats: [f64; 5]) -> Character {
    let [hp, armor, dmg, speed, stamina] = stats;
    let attributes = [
        (AttributeKind::Hp, hp),
        (AttributeKind::Armor, armor),
        (AttributeKind::Dmg, dmg),
        (AttributeKind::Speed, speed),
        (AttributeKind::Stamina, stamina),
    ]
    .map(|(k, v)| Attribute::new(k, v));
    Character::new(name, "Any", attributes, vec![])
}

fn stats() -> impl Strategy<Value = [f64; 5]> {
    [
        1.0..10_000.0f64,
        0.0..2_000.0f64,
        0.0..1_000.0f64,
        0.0..1_000.0f64,
        1.0..2_000.0f64,
    ]
}

proptest! {
    #[test]
    fn char_rank_is_attribute_plus_ability_totals(
        values in prop::collection::vec(0.0..10_000.0f64, 7),
        ability_value in 0.0..500.0f64,
    ) {
        let attributes = AttributeKind::ALL
            .iter()
            .zip(&values)
            .map(|(&k, &v)| Attribute::new(k, v));
        let c = Character::new(
            "P",
            "Any",
            attributes,
            vec![SpecialAbility::new(AbilityKind::Buff, ability_value, 10.0, "Skin")],
        );
        let attr_total: f64 = values.iter().sum();
        prop_assert!((c.attr_rank() - attr_total).abs() < 1e-6);
        prop_assert!((c.char_rank() - (attr_total + ability_value)).abs() < 1e-6);
    }

    #[test]
    fn battle_rank_never_drops_as_rank_grows(a in 0.0..20_000.0f64, b in 0.0..20_000.0f64) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(BattleRank::from_char_rank(lo) <= BattleRank::from_char_rank(hi));
    }

    #[test]
    fn mitigation_stays_within_the_raw_hit(damage in 0.001..5_000.0f64, armor in 0.0..5_000.0f64) {
        let (hp, worn) = calculate_hp_armor_damage(damage, armor);
        prop_assert!(hp > 0.0 && hp <= damage + 1e-9);
        prop_assert!(worn >= -1e-9);
    }

    #[test]
    fn landed_attacks_cost_at_least_one_hp(a in stats(), b in stats()) {
        let mut field = AutoBattleField::new(
            TeamSetup::new("A", vec![duelist("a", a)]),
            TeamSetup::new("B", vec![duelist("b", b)]),
            ScriptedRandomizer::first(),
        );
        let out = field.attack(CharacterId(0), CharacterId(1)).unwrap();
        prop_assert!(out.hp_damage >= 1.0);
        prop_assert!(out.armor_damage >= 0.0);
        let hp = field.character(CharacterId(1)).unwrap().require(AttributeKind::Hp).unwrap();
        prop_assert!(hp >= 0.0);
    }
}
