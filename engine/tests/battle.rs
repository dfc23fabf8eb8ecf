use shinzoku_engine::{
    AbilityKind, AbilityOutcome, ActionOutcome, Attribute, AttributeKind, AutoBattleField,
    BattleEvent, Character, CharacterId, ScriptedRandomizer, SeededRandomizer, Side,
    SpecialAbility, TeamSetup, TurnState,
};

fn fighter(name: &str, hp: f64, dmg: f64, abilities: Vec<SpecialAbility>) -> Character {
    let attributes = [
        (AttributeKind::Hp, hp),
        (AttributeKind::Mp, 1000.0),
        (AttributeKind::Armor, 100.0),
        (AttributeKind::Dmg, dmg),
        (AttributeKind::Speed, 100.0),
        (AttributeKind::Stamina, 1000.0),
    ]
    .map(|(k, v)| Attribute::new(k, v));
    Character::new(name, "Shinobi", attributes, abilities)
}

fn scripted(red: Vec<Character>, blue: Vec<Character>) -> AutoBattleField<ScriptedRandomizer> {
    AutoBattleField::new(
        TeamSetup::new("Red", red),
        TeamSetup::new("Blue", blue),
        ScriptedRandomizer::first(),
    )
}

#[test]
fn wiped_team_loses() {
    let mut field = scripted(
        vec![fighter("Glass", 1.0, 10.0, vec![])],
        vec![fighter("Wall", 5000.0, 100.0, vec![])],
    );
    let winner = field.run_battle(200).unwrap();

    assert_eq!(winner, Side::Team2);
    assert!(field.team(Side::Team1).is_defeated());
    assert_eq!(field.team(Side::Team2).members(), &[CharacterId(1)]);
    assert_eq!(field.turn_count(), 3);

    let lines = field.commentary().lines();
    assert!(lines.contains(&"Glass has been killed".to_string()));
    assert!(lines.contains(&"No opponent left for Blue".to_string()));
    assert!(lines.contains(&"Red has been defeated".to_string()));
    assert!(lines
        .last()
        .unwrap()
        .starts_with("Battle Simulation Finished. The winner is Blue"));
}

#[test]
fn turn_cap_favours_the_higher_rating() {
    let mut field = scripted(
        vec![fighter("Strong", 5000.0, 50.0, vec![])],
        vec![fighter("Weak", 3000.0, 50.0, vec![])],
    );
    assert_eq!(field.run_battle(1).unwrap(), Side::Team1);
    assert!(field
        .commentary()
        .events()
        .contains(&BattleEvent::TurnCapReached { max_turns: 1 }));

    let mut field = scripted(
        vec![fighter("Weak", 3000.0, 50.0, vec![])],
        vec![fighter("Strong", 5000.0, 50.0, vec![])],
    );
    assert_eq!(field.run_battle(1).unwrap(), Side::Team2);
}

#[test]
fn equal_ratings_at_the_cap_go_to_team_two() {
    let mut field = scripted(
        vec![fighter("Left", 3000.0, 50.0, vec![])],
        vec![fighter("Right", 3000.0, 50.0, vec![])],
    )
    .with_moves_per_turn(0);
    assert_eq!(field.run_battle(4).unwrap(), Side::Team2);
    assert_eq!(field.turn_count(), 4);
    assert_eq!(field.team(Side::Team1).size(), 1);
}

#[test]
fn every_third_turn_uses_an_ability() {
    let buff = SpecialAbility::new(AbilityKind::Buff, 150.0, 250.0, "Iron Skin");
    let mut field = scripted(
        vec![fighter("Guard", 5000.0, 50.0, vec![buff])],
        vec![fighter("Dummy", 5000.0, 50.0, vec![])],
    );
    let first = field.initiate_player_action(CharacterId(0)).unwrap();
    assert!(matches!(first, Some(ActionOutcome::Attack(_))));

    field.next_turn().unwrap();
    field.next_turn().unwrap();
    assert_eq!(field.turn_count(), 3);
    assert_eq!(field.turn_state(), TurnState::Team1Active);

    let third = field.initiate_player_action(CharacterId(0)).unwrap();
    assert_eq!(
        third,
        Some(ActionOutcome::Ability(Some(AbilityOutcome::Buff { amount: 150.0 })))
    );
    let guard = field.character(CharacterId(0)).unwrap();
    assert_eq!(guard.require(AttributeKind::Armor).unwrap(), 250.0);
    assert_eq!(guard.require(AttributeKind::Mp).unwrap(), 750.0);
}

#[test]
fn lethal_ability_removes_the_target_and_ends_the_battle() {
    let crit = SpecialAbility::new(AbilityKind::CriticalStrike, 1000.0, 100.0, "Spiral strike");
    let mut field = scripted(
        vec![fighter("Kaze", 5000.0, 10.0, vec![crit])],
        vec![fighter("Raiden", 3000.0, 10.0, vec![])],
    );
    let winner = field.run_battle(200).unwrap();

    assert_eq!(winner, Side::Team1);
    assert_eq!(field.turn_count(), 4);
    assert!(field.team(Side::Team2).is_defeated());
    assert_eq!(field.team(Side::Team1).members(), &[CharacterId(0)]);

    let events = field.commentary().events();
    let crit_at = events
        .iter()
        .position(|e| matches!(e, BattleEvent::CriticalStrike { target_hp, .. } if *target_hp == 0.0))
        .unwrap();
    assert_eq!(
        events[crit_at + 1],
        BattleEvent::Killed { character: "Raiden".into() }
    );
    assert_eq!(
        events[crit_at + 2],
        BattleEvent::NoOpponent { team: "Red".into() }
    );
}

#[test]
fn no_abilities_means_attacking_on_ability_turns() {
    let mut field = scripted(
        vec![fighter("Plain", 5000.0, 50.0, vec![])],
        vec![fighter("Dummy", 5000.0, 50.0, vec![])],
    );
    field.next_turn().unwrap();
    field.next_turn().unwrap();
    let out = field.initiate_player_action(CharacterId(0)).unwrap();
    assert!(matches!(out, Some(ActionOutcome::Attack(a)) if a.hp_damage > 0.0));
}

#[test]
fn no_opponent_means_no_action() {
    let mut field = scripted(vec![fighter("Lonely", 5000.0, 50.0, vec![])], vec![]);
    assert_eq!(field.initiate_player_action(CharacterId(0)).unwrap(), None);
}

#[test]
fn kill_mid_turn_stops_the_remaining_moves() {
    let mut field = scripted(
        vec![fighter("Hammer", 5000.0, 100000.0, vec![])],
        vec![fighter("Egg", 10.0, 50.0, vec![])],
    );
    field.execute_turn().unwrap();
    let attacks = field
        .commentary()
        .events()
        .iter()
        .filter(|e| matches!(e, BattleEvent::Attacked { .. }))
        .count();
    assert_eq!(attacks, 1);
    assert!(field.team(Side::Team2).is_defeated());
    assert_eq!(field.turn_count(), 2);
}

#[test]
fn same_seed_same_battle() {
    let roster = || {
        let kit = || {
            vec![
                SpecialAbility::new(AbilityKind::CriticalStrike, 2.0, 100.0, "Spiral"),
                SpecialAbility::new(AbilityKind::Poison, 40.0, 100.0, "Senbon"),
            ]
        };
        (
            TeamSetup::new(
                "Red",
                vec![fighter("R1", 2000.0, 120.0, kit()), fighter("R2", 1800.0, 140.0, kit())],
            ),
            TeamSetup::new(
                "Blue",
                vec![fighter("B1", 2100.0, 110.0, kit()), fighter("B2", 1700.0, 150.0, kit())],
            ),
        )
    };
    let play = |seed: u64| {
        let (red, blue) = roster();
        let mut field = AutoBattleField::new(red, blue, SeededRandomizer::from_seed(seed));
        let winner = field.run_battle(200).unwrap();
        (winner, field.into_commentary().lines())
    };
    assert_eq!(play(99), play(99));
}
