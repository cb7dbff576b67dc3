/// Asteroids Engine - Singleton registry for game sessions and the logger
///
/// This module provides global singleton management for sessions. It uses
/// thread-safe static storage with RwLock so the host frame loop may run on
/// any thread; each session is individually locked.

use std::sync::{OnceLock, RwLock, Arc, Mutex};
use std::time::SystemTime;
use rustc_hash::FxHashMap;
use crate::error::{Result, Error};
use crate::log::{Logger, LogEntry, LogSeverity, DefaultLogger};
use crate::session::Session;
use crate::world::WorldDesc;

// ===== INTERNAL STATE =====

/// Global engine state storage
static ENGINE_STATE: OnceLock<EngineState> = OnceLock::new();

/// Global logger (initialized with DefaultLogger)
static LOGGER: OnceLock<RwLock<Box<dyn Logger>>> = OnceLock::new();

/// Internal state structure holding the session registry
struct EngineState {
    /// Sessions by name (each wrapped in Mutex for thread-safe mutable access)
    sessions: RwLock<FxHashMap<String, Arc<Mutex<Session>>>>,
}

impl EngineState {
    fn new() -> Self {
        Self {
            sessions: RwLock::new(FxHashMap::default()),
        }
    }
}

fn default_logger() -> RwLock<Box<dyn Logger>> {
    RwLock::new(Box::new(DefaultLogger::new()))
}

// ===== PUBLIC API =====

/// Main engine singleton manager
///
/// Owns the named sessions and the global logger.
///
/// # Example
///
/// ```no_run
/// use asteroids_engine::asteroids::Engine;
/// use asteroids_engine::asteroids::world::WorldDesc;
///
/// Engine::initialize()?;
/// let session = Engine::create_session("main", WorldDesc::default())?;
/// // Drive session.lock() from the frame loop...
/// Engine::shutdown();
/// # Ok::<(), asteroids_engine::asteroids::Error>(())
/// ```
pub struct Engine;

impl Engine {
    /// Helper to log errors before returning them (internal use)
    fn log_and_return_error(error: Error) -> Error {
        match &error {
            Error::InitializationFailed(msg) => {
                crate::engine_error!("asteroids::Engine", "Initialization failed: {}", msg);
            }
            Error::InvalidConfig(msg) => {
                crate::engine_error!("asteroids::Engine", "Invalid config: {}", msg);
            }
            _ => {
                crate::engine_error!("asteroids::Engine", "Engine error: {}", error);
            }
        }
        error
    }

    fn state() -> Result<&'static EngineState> {
        ENGINE_STATE.get()
            .ok_or_else(|| Self::log_and_return_error(
                Error::InitializationFailed("Engine not initialized. Call Engine::initialize() first.".to_string())
            ))
    }

    /// Initialize the engine
    ///
    /// Must be called before creating sessions. Calling it again is a no-op.
    pub fn initialize() -> Result<()> {
        if ENGINE_STATE.get().is_some() {
            crate::engine_warn!("asteroids::Engine", "Engine already initialized");
            return Ok(());
        }
        ENGINE_STATE.get_or_init(EngineState::new);
        crate::engine_info!("asteroids::Engine", "Engine initialized");
        Ok(())
    }

    /// Destroy every session
    ///
    /// Existing `Arc` handles stay usable until dropped.
    pub fn shutdown() {
        if let Some(state) = ENGINE_STATE.get() {
            if let Ok(mut sessions) = state.sessions.write() {
                sessions.clear();
            }
        }
    }

    // ===== SESSION API =====

    /// Create and register a session
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The engine is not initialized
    /// - A session with this name already exists
    /// - `desc` is rejected by the World
    /// - The registry lock is poisoned
    pub fn create_session(name: &str, desc: WorldDesc) -> Result<Arc<Mutex<Session>>> {
        let state = Self::state()?;

        let mut sessions = state.sessions.write()
            .map_err(|_| Self::log_and_return_error(
                Error::EngineError("Session registry lock poisoned".to_string())
            ))?;

        if sessions.contains_key(name) {
            return Err(Self::log_and_return_error(
                Error::EngineError(format!("Session '{}' already exists", name))
            ));
        }

        let session = Session::new(name, desc).map_err(Self::log_and_return_error)?;
        let session = Arc::new(Mutex::new(session));
        sessions.insert(name.to_string(), Arc::clone(&session));

        Ok(session)
    }

    /// Get a registered session
    ///
    /// # Errors
    ///
    /// Returns an error if the engine is not initialized, the session does
    /// not exist, or the registry lock is poisoned.
    pub fn session(name: &str) -> Result<Arc<Mutex<Session>>> {
        let state = Self::state()?;

        let sessions = state.sessions.read()
            .map_err(|_| Self::log_and_return_error(
                Error::EngineError("Session registry lock poisoned".to_string())
            ))?;

        sessions.get(name)
            .cloned()
            .ok_or_else(|| crate::engine_err!("asteroids::Engine", "Session '{}' not found", name))
    }

    /// Remove a session from the registry
    ///
    /// # Errors
    ///
    /// Returns an error if the engine is not initialized or the session does
    /// not exist.
    pub fn destroy_session(name: &str) -> Result<()> {
        let state = Self::state()?;

        let mut sessions = state.sessions.write()
            .map_err(|_| Self::log_and_return_error(
                Error::EngineError("Session registry lock poisoned".to_string())
            ))?;

        if sessions.remove(name).is_none() {
            return Err(crate::engine_err!("asteroids::Engine", "Session '{}' not found", name));
        }

        crate::engine_info!("asteroids::Engine", "Session '{}' destroyed", name);
        Ok(())
    }

    /// Number of registered sessions (0 if the engine is not initialized)
    pub fn session_count() -> usize {
        ENGINE_STATE.get()
            .and_then(|state| state.sessions.read().ok().map(|sessions| sessions.len()))
            .unwrap_or(0)
    }

    /// Names of registered sessions, sorted
    pub fn session_names() -> Vec<String> {
        let mut names: Vec<String> = ENGINE_STATE.get()
            .and_then(|state| state.sessions.read().ok().map(|sessions| sessions.keys().cloned().collect()))
            .unwrap_or_default();
        names.sort();
        names
    }

    /// Reset all singletons for testing (only available in test builds)
    #[cfg(test)]
    pub fn reset_for_testing() {
        Self::shutdown();
    }

    // ===== LOGGING API =====

    /// Set a custom logger
    ///
    /// Replace the default logger with a custom implementation (file logger,
    /// test capture, etc.)
    ///
    /// # Example
    ///
    /// ```no_run
    /// use asteroids_engine::asteroids::{Engine, log::{Logger, LogEntry}};
    ///
    /// struct FileLogger;
    /// impl Logger for FileLogger {
    ///     fn log(&self, entry: &LogEntry) {
    ///         // Write to file...
    ///     }
    /// }
    ///
    /// Engine::set_logger(FileLogger);
    /// ```
    pub fn set_logger<L: Logger + 'static>(logger: L) {
        let logger_lock = LOGGER.get_or_init(default_logger);
        if let Ok(mut lock) = logger_lock.write() {
            *lock = Box::new(logger);
        }
    }

    /// Reset logger to default (DefaultLogger)
    pub fn reset_logger() {
        let logger_lock = LOGGER.get_or_init(default_logger);
        if let Ok(mut lock) = logger_lock.write() {
            *lock = Box::new(DefaultLogger::new());
        }
    }

    /// Internal logging method (for simple logs without file:line)
    ///
    /// Used by macros like engine_info!, engine_warn!, etc.
    pub fn log(severity: LogSeverity, source: &str, message: String) {
        let logger_lock = LOGGER.get_or_init(default_logger);
        if let Ok(lock) = logger_lock.read() {
            lock.log(&LogEntry {
                severity,
                timestamp: SystemTime::now(),
                source: source.to_string(),
                message,
                file: None,
                line: None,
            });
        }
    }

    /// Internal logging method with file:line information (for ERROR logs)
    ///
    /// Used by engine_error! and engine_err! to include source location.
    pub fn log_detailed(
        severity: LogSeverity,
        source: &str,
        message: String,
        file: &'static str,
        line: u32,
    ) {
        let logger_lock = LOGGER.get_or_init(default_logger);
        if let Ok(lock) = logger_lock.read() {
            lock.log(&LogEntry {
                severity,
                timestamp: SystemTime::now(),
                source: source.to_string(),
                message,
                file: Some(file),
                line: Some(line),
            });
        }
    }
}

#[cfg(test)]
#[path = "engine_tests.rs"]
mod tests;
