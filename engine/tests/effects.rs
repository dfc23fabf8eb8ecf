use shinzoku_engine::{
    Attribute, AttributeKind, AutoBattleField, BattleEvent, Character, CharacterId, EffectKind,
    ScriptedRandomizer, Side, TeamSetup, TurnState,
};

fn ninja(name: &str, hp: f64) -> Character {
    let attributes = [
        (AttributeKind::Hp, hp),
        (AttributeKind::Armor, 100.0),
        (AttributeKind::Dmg, 50.0),
        (AttributeKind::Speed, 100.0),
        (AttributeKind::Stamina, 1000.0),
    ]
    .map(|(k, v)| Attribute::new(k, v));
    Character::new(name, "Genin", attributes, vec![])
}

fn field(hp_a: f64, hp_b: f64) -> AutoBattleField<ScriptedRandomizer> {
    AutoBattleField::new(
        TeamSetup::new("Leaf", vec![ninja("A", hp_a)]),
        TeamSetup::new("Sand", vec![ninja("B", hp_b)]),
        ScriptedRandomizer::first(),
    )
}

fn hp(field: &AutoBattleField<ScriptedRandomizer>, id: CharacterId) -> f64 {
    field.character(id).unwrap().require(AttributeKind::Hp).unwrap()
}

#[test]
fn next_turn_flips_sides_and_counts() {
    let mut f = field(1000.0, 1000.0);
    assert_eq!(f.turn_count(), 1);
    assert_eq!(f.turn_state(), TurnState::Team1Active);
    f.next_turn().unwrap();
    assert_eq!(f.turn_count(), 2);
    assert_eq!(f.turn_state(), TurnState::Team2Active);
    f.next_turn().unwrap();
    assert_eq!(f.turn_state(), TurnState::Team1Active);
}

#[test]
fn poison_ticks_three_times() {
    let mut f = field(1000.0, 1000.0);
    f.effects_mut().apply(EffectKind::Poison, 10.0, CharacterId(1), 1);

    let mut seen = Vec::new();
    for _ in 0..4 {
        f.next_turn().unwrap();
        seen.push(hp(&f, CharacterId(1)));
    }
    assert_eq!(seen, vec![990.0, 980.0, 970.0, 970.0]);
    assert!(f.effects().is_empty());

    let ticks: Vec<_> = f
        .commentary()
        .lines()
        .into_iter()
        .filter(|l| l.starts_with("B -10 hp"))
        .collect();
    assert_eq!(
        ticks,
        vec![
            "B -10 hp, still poisoned for 2 turn(s)",
            "B -10 hp, still poisoned for 1 turn(s)",
            "B -10 hp, no longer poisoned",
        ]
    );
}

#[test]
fn poison_stacks_per_application() {
    let mut f = field(1000.0, 1000.0);
    f.effects_mut().apply(EffectKind::Poison, 10.0, CharacterId(1), 1);
    f.effects_mut().apply(EffectKind::Poison, 25.0, CharacterId(1), 1);
    f.next_turn().unwrap();
    assert_eq!(hp(&f, CharacterId(1)), 965.0);
}

#[test]
fn lethal_poison_removes_the_victim() {
    let mut f = field(1000.0, 5.0);
    f.effects_mut().apply(EffectKind::Poison, 10.0, CharacterId(1), 1);
    f.next_turn().unwrap();

    assert_eq!(hp(&f, CharacterId(1)), 0.0);
    assert!(f.team(Side::Team2).is_defeated());
    assert!(f
        .commentary()
        .events()
        .contains(&BattleEvent::Killed { character: "B".into() }));
    // its remaining poison goes with it
    f.next_turn().unwrap();
    assert!(f.effects().is_empty());
}

#[test]
fn unused_evasion_wears_off_after_the_following_turn() {
    let mut f = field(1000.0, 1000.0);
    f.effects_mut().apply(EffectKind::Evasion, 200.0, CharacterId(0), 1);

    f.next_turn().unwrap();
    assert!(f.effects().has_active(EffectKind::Evasion, CharacterId(0)));
    f.next_turn().unwrap();
    assert!(!f.effects().has_active(EffectKind::Evasion, CharacterId(0)));
    assert!(f
        .commentary()
        .lines()
        .contains(&"A's evasion effect has worn off".to_string()));
}

#[test]
fn stun_lasts_into_the_victims_turn() {
    let mut f = field(1000.0, 1000.0);
    // Leaf stuns B on turn 1; B's team acts on turn 2
    f.effects_mut().apply(EffectKind::Stun, 2.0, CharacterId(1), 1);
    f.next_turn().unwrap();
    assert_eq!(f.turn_state(), TurnState::Team2Active);

    let before = hp(&f, CharacterId(0));
    f.execute_turn().unwrap();
    // first of three moves is stunned, the other two land
    let stunned = f
        .commentary()
        .events()
        .iter()
        .filter(|e| matches!(e, BattleEvent::Stunned { .. }))
        .count();
    let attacks = f
        .commentary()
        .events()
        .iter()
        .filter(|e| matches!(e, BattleEvent::Attacked { .. }))
        .count();
    assert_eq!((stunned, attacks), (1, 2));
    assert!(hp(&f, CharacterId(0)) < before);
}
