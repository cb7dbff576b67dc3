//! Unit tests for error.rs
//!
//! Tests all Error variants and their implementations (Display, Debug, Clone, std::error::Error).

use crate::error::{Error, Result};

// ============================================================================
// ERROR DISPLAY TESTS
// ============================================================================

#[test]
fn test_initialization_failed_display() {
    let err = Error::InitializationFailed("Engine not initialized".to_string());
    let display = format!("{}", err);
    assert!(display.contains("Initialization failed"));
    assert!(display.contains("Engine not initialized"));
}

#[test]
fn test_invalid_config_display() {
    let err = Error::InvalidConfig("play field has zero width".to_string());
    assert_eq!(format!("{}", err), "Invalid config: play field has zero width");
}

#[test]
fn test_invalid_entity_display() {
    let err = Error::InvalidEntity("stale ship key".to_string());
    let display = format!("{}", err);
    assert!(display.starts_with("Invalid entity"));
    assert!(display.contains("stale ship key"));
}

#[test]
fn test_engine_error_display() {
    let err = Error::EngineError("Session registry lock poisoned".to_string());
    assert_eq!(format!("{}", err), "Engine error: Session registry lock poisoned");
}

// ============================================================================
// ERROR TRAIT IMPLEMENTATIONS
// ============================================================================

#[test]
fn test_error_is_std_error() {
    let err = Error::EngineError("x".to_string());
    let _: &dyn std::error::Error = &err;
}

#[test]
fn test_error_debug_names_variant() {
    assert!(format!("{:?}", Error::InvalidConfig("a".into())).contains("InvalidConfig"));
    assert!(format!("{:?}", Error::InvalidEntity("b".into())).contains("InvalidEntity"));
    assert!(format!("{:?}", Error::InitializationFailed("c".into())).contains("InitializationFailed"));
    assert!(format!("{:?}", Error::EngineError("d".into())).contains("EngineError"));
}

#[test]
fn test_error_clone_keeps_message() {
    let err = Error::InvalidConfig("max_levels must be at least 1".to_string());
    let copy = err.clone();
    assert_eq!(format!("{}", err), format!("{}", copy));
}

// ============================================================================
// RESULT TYPE TESTS
// ============================================================================

#[test]
fn test_error_propagation_with_question_mark() {
    fn inner() -> Result<u32> {
        Err(Error::InvalidEntity("gone".to_string()))
    }

    fn outer() -> Result<u32> {
        let value = inner()?;
        Ok(value + 1)
    }

    match outer() {
        Err(Error::InvalidEntity(msg)) => assert_eq!(msg, "gone"),
        other => panic!("unexpected result: {:?}", other),
    }
}
