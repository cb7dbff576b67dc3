//! Integration tests for the logging system
//!
//! Verifies that simulation events reach a custom logger with the right
//! severity and source, and that the logger can be swapped back.
//!
//! Run with: cargo test --test logging_integration_tests

use asteroids_engine::asteroids::Engine;
use asteroids_engine::asteroids::log::{DefaultLogger, Logger, LogEntry, LogSeverity};
use asteroids_engine::asteroids::spatial::BoundingBox;
use asteroids_engine::asteroids::world::{Entity, GameMode, ShipControls, World, WorldDesc};
use asteroids_engine::glam::Vec2;
use std::sync::{Arc, Mutex};
use serial_test::serial;

// ============================================================================
// TEST LOGGER IMPLEMENTATION
// ============================================================================

/// Test logger that captures log entries for verification
struct TestLogger {
    entries: Arc<Mutex<Vec<LogEntry>>>,
}

impl TestLogger {
    fn new() -> (Self, Arc<Mutex<Vec<LogEntry>>>) {
        let entries = Arc::new(Mutex::new(Vec::new()));
        (Self { entries: entries.clone() }, entries)
    }
}

impl Logger for TestLogger {
    fn log(&self, entry: &LogEntry) {
        self.entries.lock().unwrap().push(entry.clone());
    }
}

fn from_source<'a>(entries: &'a [LogEntry], source: &str) -> Vec<&'a LogEntry> {
    entries.iter().filter(|e| e.source == source).collect()
}

fn seeded() -> WorldDesc {
    WorldDesc { seed: Some(21), ..Default::default() }
}

// ============================================================================
// LOGGER PLUMBING
// ============================================================================

#[test]
#[serial]
fn test_integration_custom_logger() {
    let (test_logger, entries) = TestLogger::new();
    Engine::set_logger(test_logger);

    Engine::log(LogSeverity::Info, "test::module", "Test info message".to_string());
    Engine::log(LogSeverity::Warn, "test::module", "Test warning message".to_string());
    Engine::log_detailed(LogSeverity::Error, "test::module", "Test error message".to_string(), "test_file.rs", 42);

    Engine::reset_logger();

    let captured = entries.lock().unwrap();
    assert_eq!(captured.len(), 3);
    assert_eq!(captured[0].severity, LogSeverity::Info);
    assert_eq!(captured[1].severity, LogSeverity::Warn);
    assert_eq!(captured[2].severity, LogSeverity::Error);
    assert_eq!(captured[2].file, Some("test_file.rs"));
    assert_eq!(captured[2].line, Some(42));
    assert!(captured.iter().all(|e| e.source == "test::module"));
}

#[test]
#[serial]
fn test_integration_logger_reset() {
    let (test_logger, entries) = TestLogger::new();
    Engine::set_logger(test_logger);

    Engine::log(LogSeverity::Info, "test", "Message 1".to_string());
    Engine::reset_logger();
    Engine::log(LogSeverity::Info, "test", "Message 2".to_string());

    assert_eq!(entries.lock().unwrap().len(), 1);
}

#[test]
#[serial]
fn test_integration_default_logger_threshold() {
    let logger = DefaultLogger::with_min_severity(LogSeverity::Warn);
    assert!(!logger.accepts(LogSeverity::Debug));
    assert!(!logger.accepts(LogSeverity::Info));
    assert!(logger.accepts(LogSeverity::Warn));
    assert!(logger.accepts(LogSeverity::Error));

    // Entries below the threshold are dropped without output or panic
    Engine::set_logger(logger);
    Engine::log(LogSeverity::Trace, "test", "dropped".to_string());
    Engine::log(LogSeverity::Error, "test", "printed".to_string());
    Engine::reset_logger();
}

// ============================================================================
// SIMULATION EVENTS
// ============================================================================

#[test]
#[serial]
fn test_integration_world_lifecycle_is_logged() {
    let (test_logger, entries) = TestLogger::new();
    Engine::set_logger(test_logger);

    let mut world = World::new(seeded()).unwrap();
    world.reset(GameMode::Solo);

    Engine::reset_logger();

    let captured = entries.lock().unwrap();
    let world_logs = from_source(&captured, "asteroids::World");
    assert_eq!(world_logs.len(), 2);
    assert!(world_logs.iter().all(|e| e.severity == LogSeverity::Info));
    assert!(world_logs[0].message.contains("created"));
    assert!(world_logs[1].message.contains("reset"));
}

#[test]
#[serial]
fn test_integration_rejected_config_is_logged_with_location() {
    let (test_logger, entries) = TestLogger::new();
    Engine::set_logger(test_logger);

    let desc = WorldDesc {
        play_field: BoundingBox::new(0.0, 0.0, -10.0, 10.0),
        ..Default::default()
    };
    assert!(World::new(desc).is_err());

    Engine::reset_logger();

    let captured = entries.lock().unwrap();
    let errors = from_source(&captured, "asteroids::World");
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].severity, LogSeverity::Error);
    assert!(errors[0].file.is_some());
    assert!(errors[0].line.is_some());
}

#[test]
#[serial]
fn test_integration_asteroid_split_is_logged_at_debug() {
    let (test_logger, entries) = TestLogger::new();
    Engine::set_logger(test_logger);

    let mut world = World::new(seeded()).unwrap();
    world.spawn(Entity::projectile(Vec2::new(100.0, 100.0), 0.0));
    world.spawn(Entity::asteroid_with_heading(Vec2::new(90.0, 90.0), 3, 0.0));
    world.tick(0.0, ShipControls::default());

    Engine::reset_logger();

    let captured = entries.lock().unwrap();
    let pass_logs = from_source(&captured, "asteroids::CollisionPass");
    assert_eq!(pass_logs.len(), 1);
    assert_eq!(pass_logs[0].severity, LogSeverity::Debug);
    assert!(pass_logs[0].message.contains("split"));
}

#[test]
#[serial]
fn test_integration_victory_is_logged() {
    let (test_logger, entries) = TestLogger::new();
    Engine::set_logger(test_logger);

    let mut world = World::new(seeded()).unwrap();
    world.spawn(Entity::player_ship(Vec2::new(400.0, 250.0)));
    world.tick(0.016, ShipControls::default());

    Engine::reset_logger();

    let captured = entries.lock().unwrap();
    assert!(from_source(&captured, "asteroids::World")
        .iter()
        .any(|e| e.message.contains("Victory")));
}
