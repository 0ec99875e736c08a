use dayplan_core::config::PlanConfig;
use dayplan_core::PlanError;
use tempfile::TempDir;

#[test]
fn missing_file_uses_defaults() {
    let dir = TempDir::new().unwrap();
    let config = PlanConfig::load_from(&dir.path().join("config.toml")).unwrap();

    assert_eq!(config.reminder_lead_minutes, 15);
    assert_eq!(config.tick_seconds, 60);
    assert_eq!(config.tick_period(), std::time::Duration::from_secs(60));
}

#[test]
fn generated_template_parses_to_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("dayplan").join("config.toml");

    PlanConfig::create_default_config(&path).unwrap();
    let config = PlanConfig::load_from(&path).unwrap();
    assert_eq!(config.reminder_lead().num_minutes(), 15);
}

#[test]
fn file_values_override_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(
        &path,
        "data_file = \"~/plans/events.json\"\nreminder_lead_minutes = 5\n",
    )
    .unwrap();

    let config = PlanConfig::load_from(&path).unwrap();
    assert_eq!(config.reminder_lead_minutes, 5);
    assert!(config.data_path().ends_with("plans/events.json"));
    assert!(!config.data_path().starts_with("~"));
}

#[test]
fn zero_tick_is_rejected() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "tick_seconds = 0\n").unwrap();

    assert!(matches!(PlanConfig::load_from(&path), Err(PlanError::Config(_))));
}

#[test]
fn unrepresentable_reminder_lead_is_rejected() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, format!("reminder_lead_minutes = {}\n", i64::MAX)).unwrap();

    assert!(matches!(PlanConfig::load_from(&path), Err(PlanError::Config(_))));
}
