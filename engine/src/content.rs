use std::collections::HashMap;

pub fn builtin_rosters() -> HashMap<&'static str, &'static str> {
    HashMap::from([
        (
            "shinobi_duel",
            include_str!("../content/rosters/shinobi_duel.json"),
        ),
        (
            "village_skirmish",
            include_str!("../content/rosters/village_skirmish.json"),
        ),
    ])
}
