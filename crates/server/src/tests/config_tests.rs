use super::*;

use std::{
    env,
    time::{SystemTime, UNIX_EPOCH},
};

fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let vars: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| vars.get(key).cloned()
}

#[test]
fn missing_file_keeps_defaults() {
    let mut settings = Settings::default();
    settings.apply_env(env_from(&[]));
    assert_eq!(settings, Settings::default());
    assert_eq!(settings.server_bind, "127.0.0.1:8080");
    assert!(settings.seed_test_data);
}

#[test]
fn file_values_override_defaults() {
    let mut settings = Settings::default();
    settings.apply_file(
        r#"
        bind_addr = "0.0.0.0:9000"
        seed_test_data = false
        log_filter = "debug"
        "#,
    );
    assert_eq!(settings.server_bind, "0.0.0.0:9000");
    assert!(!settings.seed_test_data);
    assert_eq!(settings.log_filter, "debug");
}

#[test]
fn quoted_boolean_in_file_is_accepted() {
    let mut settings = Settings::default();
    settings.apply_file(r#"seed_test_data = "no""#);
    assert!(!settings.seed_test_data);
}

#[test]
fn malformed_file_is_ignored() {
    let mut settings = Settings::default();
    settings.apply_file("bind_addr = ");
    assert_eq!(settings, Settings::default());
}

#[test]
fn prefixed_env_wins_over_plain_env_and_file() {
    let mut settings = Settings::default();
    settings.apply_file(r#"bind_addr = "0.0.0.0:9000""#);
    settings.apply_env(env_from(&[
        ("SERVER_BIND", "127.0.0.1:1"),
        ("APP__BIND_ADDR", "127.0.0.1:2"),
        ("APP__LOG_FILTER", "warn"),
    ]));
    assert_eq!(settings.server_bind, "127.0.0.1:2");
    assert_eq!(settings.log_filter, "warn");
}

#[test]
fn unparseable_seed_flag_keeps_previous_value() {
    let mut settings = Settings::default();
    settings.apply_env(env_from(&[("APP__SEED_TEST_DATA", "maybe")]));
    assert!(settings.seed_test_data);

    settings.apply_env(env_from(&[("APP__SEED_TEST_DATA", "OFF")]));
    assert!(!settings.seed_test_data);
}

#[test]
fn load_settings_reads_file_from_disk() {
    let suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock")
        .as_nanos();

    let temp_root = env::temp_dir().join(format!("item_server_config_test_{suffix}"));
    fs::create_dir_all(&temp_root).expect("temp root");
    let path = temp_root.join(SETTINGS_FILE);
    fs::write(&path, "seed_test_data = false\nlog_filter = \"trace\"\n").expect("write");

    let settings = load_settings(&path);
    assert!(!settings.seed_test_data);

    fs::remove_dir_all(temp_root).expect("cleanup");
}
