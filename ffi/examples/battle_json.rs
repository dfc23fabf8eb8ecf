use shinzoku_ffi::{run_battle_json, simulate_many_json, VERSION};

fn main() {
    println!("FFI Version: {}", VERSION);

    let input = r#"{"roster_id":"shinobi_duel","seed":42,"max_turns":30}"#;
    let first = run_battle_json(input);
    println!("runBattleJson({}) = {} bytes", input, first.len());

    println!("Determinism check:");
    println!("  same output twice: {}", first == run_battle_json(input));

    let many = r#"{"roster_id":"village_skirmish","seed":1,"samples":25}"#;
    println!("simulateManyJson({}) = {}", many, simulate_many_json(many));
}
