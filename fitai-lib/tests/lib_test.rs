use anyhow::Result;
use fitai_lib::progress::{self, WeeklySummary};
use fitai_lib::{
    catalog, load_config_util, parse_color, save_config_util, CoachService, Config, ConfigError,
    NotificationKind, Route, SessionPhase, StandardColor,
};
use std::str::FromStr;
use tempfile::TempDir;

// Helper function to create a test service backed by a throwaway config dir
fn create_test_service() -> Result<(CoachService, TempDir)> {
    let dir = tempfile::tempdir()?;
    let config_path = dir.path().join("config.toml");
    let service = CoachService::with_config(Config::default(), config_path);
    Ok((service, dir))
}

#[test]
fn test_load_creates_default_config() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("nested").join("config.toml");
    let config = load_config_util(&path)?;
    assert_eq!(config, Config::default());
    assert!(path.exists());
    Ok(())
}

#[test]
fn test_config_round_trip_and_partial_files() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("config.toml");

    let mut config = Config::default();
    config.dark_mode = true;
    config.notifications.marketing = true;
    config.chat.jitter_ms = 0;
    save_config_util(&path, &config)?;
    assert_eq!(load_config_util(&path)?, config);

    // Missing fields fall back to defaults
    std::fs::write(&path, "dark_mode = true\n[chat]\nmin_delay_ms = 10\n")?;
    let loaded = load_config_util(&path)?;
    assert!(loaded.dark_mode);
    assert_eq!(loaded.chat.min_delay_ms, 10);
    assert_eq!(loaded.chat.jitter_ms, 500);
    assert!(loaded.notifications.workout_reminders);
    assert_eq!(loaded.theme.header_color, "Green");
    Ok(())
}

#[test]
fn test_malformed_config_is_reported() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "dark_mode = \"sometimes\"")?;
    assert!(matches!(load_config_util(&path), Err(ConfigError::TomlParse(_))));
    Ok(())
}

#[test]
fn test_parse_color_and_notification_kind() {
    assert_eq!(parse_color("darkblue").ok(), Some(StandardColor::DarkBlue));
    assert_eq!(parse_color(" Red ").ok(), Some(StandardColor::Red));
    assert!(matches!(parse_color("plaid"), Err(ConfigError::InvalidColor(_))));

    assert_eq!(
        NotificationKind::from_str("ai-tips").ok(),
        Some(NotificationKind::AiTips)
    );
    assert_eq!(
        NotificationKind::from_str("Workout_Reminders").ok(),
        Some(NotificationKind::WorkoutReminders)
    );
    assert!(NotificationKind::from_str("sms").is_err());
}

#[test]
fn test_settings_changes_are_saved() -> Result<()> {
    let (mut service, _dir) = create_test_service()?;

    assert!(!service.toggle_notification(NotificationKind::AiTips)?);
    service.set_notification(NotificationKind::Marketing, true)?;
    service.set_dark_mode(true)?;
    assert_eq!(service.set_header_color("cyan")?, StandardColor::Cyan);
    service.set_chat_delay(200, 50)?;

    let reloaded = load_config_util(service.get_config_path())?;
    assert!(!reloaded.notifications.ai_tips);
    assert!(reloaded.notifications.marketing);
    assert!(reloaded.dark_mode);
    assert_eq!(reloaded.theme.header_color, "Cyan");
    assert_eq!(reloaded.chat.min_delay_ms, 200);
    assert_eq!(reloaded.chat.jitter_ms, 50);

    assert!(service.set_header_color("plaid").is_err());
    assert_eq!(service.header_color(), StandardColor::Cyan);
    Ok(())
}

#[test]
fn test_progress_helpers() {
    assert_eq!(progress::fraction(3, 0), 0.0);
    assert!((progress::fraction(1, 4) - 0.25).abs() < f64::EPSILON);
    assert_eq!(progress::percent(0.0), 0);
    assert_eq!(progress::percent(0.456), 46);
    assert_eq!(progress::percent(1.8), 100);
    assert_eq!(progress::percent(f64::NAN), 0);
}

#[test]
fn test_weekly_summary_from_catalog() {
    let summary = WeeklySummary::from_stats(&catalog::weekly_stats());
    assert_eq!(summary.total_calories, 850);
    assert_eq!(summary.total_minutes, 120);
    assert_eq!(summary.total_workouts, 4);
    assert_eq!(summary.active_days, 4);
    assert_eq!(WeeklySummary::from_stats(&[]), WeeklySummary::default());
}

#[test]
fn test_dashboard_stats() -> Result<()> {
    let (service, _dir) = create_test_service()?;
    let stats = service.dashboard_stats();
    assert_eq!(stats.week.active_days, 4);
    assert!((stats.weekly_goal_fraction - 1.0).abs() < f64::EPSILON);
    assert!((stats.program_fraction - 23.0 / 48.0).abs() < 1e-9);
    assert_eq!(stats.current_streak, 7);
    Ok(())
}

#[test]
fn test_service_builds_fresh_state() -> Result<()> {
    let (service, _dir) = create_test_service()?;

    let wizard = service.new_wizard()?;
    assert_eq!(wizard.steps().len(), 5);
    assert!(wizard.steps()[4].multi_select);
    assert!(wizard.steps()[..4].iter().all(|s| !s.multi_select));

    let mut session = service.new_workout_session();
    session.start();
    session.toggle_current();
    assert_eq!(session.state().completed_count(), 1);
    // A second session is unaffected by the first
    assert_eq!(service.new_workout_session().state().completed_count(), 0);
    assert_eq!(service.new_workout_session().phase(), SessionPhase::NotStarted);

    let rest = service.workout_session_for("w3")?;
    assert!(rest.plan().is_rest_day());
    assert!(rest.state().exercises.is_empty());
    assert!(service.workout_session_for("w42").is_err());

    assert_eq!(service.new_conversation().messages().len(), 1);
    Ok(())
}

#[test]
fn test_catalog_contents() {
    let plan = catalog::weekly_plan();
    assert_eq!(plan.len(), 7);
    assert_eq!(plan[0].exercises.len(), 7);
    assert_eq!(plan[0].exercises[3].equipment, vec!["Dumbbells".to_string()]);
    assert_eq!(catalog::milestones().iter().filter(|m| m.achieved).count(), 3);
    assert_eq!(catalog::pricing_plans().iter().filter(|p| p.popular).count(), 1);
}

#[test]
fn test_route_paths() {
    assert_eq!(Route::Dashboard.path(), "/dashboard");
    assert_eq!(Route::from_path("/chat/"), Some(Route::Chat));
    assert_eq!(Route::from_path(""), Some(Route::Landing));
    assert_eq!(Route::from_path("/nowhere"), None);
}
