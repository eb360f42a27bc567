use super::{apply_env, apply_file, load_settings_with, Settings};

use std::{
    collections::HashMap,
    env, fs,
    time::{SystemTime, UNIX_EPOCH},
};

use shared::domain::UserType;

#[test]
fn file_values_override_defaults() {
    let mut settings = Settings::default();
    apply_file(
        &mut settings,
        r#"
            api_url = "https://billed.test.tld"
            email = "employee@test.tld"
            user_type = "Employee"
            modal_width = 1024
        "#,
    )
    .expect("apply file");

    assert_eq!(settings.api_url, "https://billed.test.tld");
    assert_eq!(settings.email.as_deref(), Some("employee@test.tld"));
    assert_eq!(settings.user_type, UserType::Employee);
    assert_eq!(settings.modal_width, 1024);
    assert_eq!(settings.jwt, None);
}

#[test]
fn unknown_user_type_in_file_is_an_error() {
    let mut settings = Settings::default();
    let err = apply_file(&mut settings, "user_type = \"intern\"").expect_err("must fail");
    assert!(err.to_string().contains("intern"));
}

#[test]
fn env_overrides_file_and_app_prefix_wins() {
    let vars: HashMap<&str, &str> = HashMap::from([
        ("BILLED_API_URL", "http://first.tld"),
        ("APP__API_URL", "http://second.tld"),
        ("BILLED_JWT", "token"),
        ("BILLED_USER_TYPE", "manager"),
        ("BILLED_MODAL_WIDTH", "not-a-number"),
    ]);
    let mut settings = Settings::default();

    apply_env(&mut settings, |key| vars.get(key).map(|v| v.to_string()));

    assert_eq!(settings.api_url, "http://second.tld");
    assert_eq!(settings.jwt.as_deref(), Some("token"));
    assert_eq!(settings.user_type, UserType::Manager);
    assert_eq!(settings.modal_width, Settings::default().modal_width);
}

#[test]
fn api_base_url_rejects_non_http_schemes() {
    let settings = Settings {
        api_url: "ftp://billed.tld".to_string(),
        ..Settings::default()
    };
    assert!(settings.api_base_url().is_err());

    let settings = Settings::default();
    assert_eq!(
        settings.api_base_url().expect("url").as_str(),
        "http://localhost:5678/"
    );
}

#[test]
fn missing_config_file_falls_back_to_defaults() {
    let suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock")
        .as_nanos();
    let missing = env::temp_dir().join(format!("billed_missing_{suffix}.toml"));

    let settings = load_settings_with(&missing, |_| None).expect("load");

    assert_eq!(settings.api_url, "http://localhost:5678");
    assert_eq!(settings.email, None);
    assert_eq!(settings.modal_width, 800);
}

#[test]
fn malformed_config_file_is_reported() {
    let suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock")
        .as_nanos();
    let path = env::temp_dir().join(format!("billed_bad_{suffix}.toml"));
    fs::write(&path, "api_url = ").expect("write");

    let err = load_settings_with(&path, |_| None).expect_err("must fail");
    assert!(err.to_string().contains("failed to parse config file"));

    fs::remove_file(path).expect("cleanup");
}
