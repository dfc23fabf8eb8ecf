use jni::objects::{JClass, JString};
use jni::sys::jstring;
use jni::JNIEnv;
use serde_json::{json, Value};
use shinzoku_engine::api::{simulate_battle, simulate_battle_many, BattleConfig};

pub const VERSION: &str = concat!("shinzoku-ffi ", env!("CARGO_PKG_VERSION"));

const DEFAULT_SAMPLES: u32 = 100;

fn ok(value: Value) -> String {
    json!({ "ok": true, "result": value }).to_string()
}

fn err(e: impl std::fmt::Display) -> String {
    json!({ "ok": false, "error": e.to_string() }).to_string()
}

fn envelope(res: Result<Value, String>) -> String {
    match res {
        Ok(v) => ok(v),
        Err(e) => err(e),
    }
}

fn to_jstring(env: &JNIEnv, payload: String) -> jstring {
    match env.new_string(payload) {
        Ok(s) => s.into_raw(),
        Err(_) => std::ptr::null_mut(),
    }
}

fn read_input(env: &mut JNIEnv, json: &JString) -> Result<String, String> {
    env.get_string(json)
        .map(Into::into)
        .map_err(|e| e.to_string())
}

/// Run one battle from a JSON `BattleConfig`; returns the `{ok, result|error}` envelope.
pub fn run_battle_json(input: &str) -> String {
    envelope(battle(input))
}

/// Like [`run_battle_json`], with an optional `samples` field (default 100).
pub fn simulate_many_json(input: &str) -> String {
    envelope(battle_many(input))
}

fn battle(input: &str) -> Result<Value, String> {
    let cfg: BattleConfig =
        serde_json::from_str(input).map_err(|e| format!("invalid_config: {}", e))?;
    let result = simulate_battle(cfg).map_err(|e| format!("{:#}", e))?;
    serde_json::to_value(result).map_err(|e| e.to_string())
}

fn battle_many(input: &str) -> Result<Value, String> {
    let mut root: Value =
        serde_json::from_str(input).map_err(|e| format!("invalid_config: {}", e))?;
    let samples = root
        .get("samples")
        .and_then(Value::as_u64)
        .map_or(DEFAULT_SAMPLES, |n| n.min(u32::MAX as u64) as u32);
    if let Some(obj) = root.as_object_mut() {
        obj.remove("samples");
    }
    let cfg: BattleConfig =
        serde_json::from_value(root).map_err(|e| format!("invalid_config: {}", e))?;
    let stats = simulate_battle_many(cfg, samples).map_err(|e| format!("{:#}", e))?;
    serde_json::to_value(stats).map_err(|e| e.to_string())
}

#[no_mangle]
pub extern "system" fn Java_com_shinzoku_Ffi_version<'local>(
    env: JNIEnv<'local>,
    _class: JClass<'local>,
) -> jstring {
    to_jstring(&env, VERSION.to_string())
}

#[no_mangle]
pub extern "system" fn Java_com_shinzoku_Ffi_runBattleJson(
    mut env: JNIEnv,
    _class: JClass,
    json: JString,
) -> jstring {
    let payload = match read_input(&mut env, &json) {
        Ok(input) => run_battle_json(&input),
        Err(e) => err(e),
    };
    to_jstring(&env, payload)
}

#[no_mangle]
pub extern "system" fn Java_com_shinzoku_Ffi_simulateManyJson(
    mut env: JNIEnv,
    _class: JClass,
    json: JString,
) -> jstring {
    let payload = match read_input(&mut env, &json) {
        Ok(input) => simulate_many_json(&input),
        Err(e) => err(e),
    };
    to_jstring(&env, payload)
}
