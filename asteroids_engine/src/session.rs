/// Session - one game from main menu to results screen.
///
/// The host frame loop polls input, fills a `FrameInput`, and calls
/// `Session::frame` once per frame. The session drives the phase machine
/// and ticks its World while a round is being played.

use crate::error::Result;
use crate::spatial::BoundingBox;
use crate::utils::Sequence;
use crate::world::{World, WorldDesc, GameMode, SessionStats, ShipControls, TickOutcome};

/// Screen the session is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GamePhase {
    MainMenu,
    ModeSelect,
    Playing,
    Results,
}

/// Menu button pressed this frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    /// "Play" on the main menu
    Play,
    /// Mode chosen on the mode-select screen
    Start(GameMode),
    /// "Main menu" on the results screen
    BackToMenu,
}

/// Everything the host reports for one frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameInput {
    /// Ship controls (only read while playing)
    pub controls: ShipControls,
    /// Leave the round and return to the main menu
    pub escape: bool,
    /// Flip the quadtree overlay
    pub toggle_debug: bool,
    /// Menu button pressed, if any
    pub action: Option<MenuAction>,
}

/// A game session.
pub struct Session {
    name: String,
    phase: GamePhase,
    world: World,
    show_debug: bool,
    /// Stats of the last finished round
    results: Option<SessionStats>,
}

impl Session {
    /// Create a session on the main menu.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidConfig` if `desc` is rejected by the World.
    pub fn new(name: impl Into<String>, desc: WorldDesc) -> Result<Self> {
        let name = name.into();
        let world = World::new(desc)?;
        crate::engine_info!("asteroids::Session", "Session '{}' created", name);
        Ok(Self {
            name,
            phase: GamePhase::MainMenu,
            world,
            show_debug: false,
            results: None,
        })
    }

    /// Advance one frame. Returns the phase after the frame.
    pub fn frame(&mut self, dt: f32, input: FrameInput) -> GamePhase {
        self.phase = match (self.phase, input.action) {
            (GamePhase::MainMenu, Some(MenuAction::Play)) => GamePhase::ModeSelect,
            (GamePhase::ModeSelect, Some(MenuAction::Start(mode))) => {
                self.world.reset(mode);
                self.results = None;
                GamePhase::Playing
            }
            (GamePhase::Playing, _) => self.play(dt, input),
            (GamePhase::Results, Some(MenuAction::BackToMenu)) => GamePhase::MainMenu,
            (phase, _) => phase,
        };
        self.phase
    }

    /// One playing frame. Escape leaves for the menu but the frame still
    /// ticks; a victory on that same frame wins over the escape.
    fn play(&mut self, dt: f32, input: FrameInput) -> GamePhase {
        if input.toggle_debug {
            self.show_debug = !self.show_debug;
        }

        let report = self.world.tick(dt, input.controls);
        match report.outcome {
            TickOutcome::Running if input.escape => {
                crate::engine_info!("asteroids::Session", "Session '{}' left the round", self.name);
                GamePhase::MainMenu
            }
            TickOutcome::Running => GamePhase::Playing,
            TickOutcome::Victory => {
                let stats = self.world.stats();
                crate::engine_info!("asteroids::Session",
                    "Session '{}' round complete: {:.2}s, {} shots, precision {:.0}",
                    self.name, stats.elapsed, stats.shots_fired, stats.precision_score());
                self.results = Some(stats);
                GamePhase::Results
            }
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// Whether the quadtree overlay is on
    pub fn show_debug(&self) -> bool {
        self.show_debug
    }

    /// Stats of the last finished round
    pub fn results(&self) -> Option<SessionStats> {
        self.results
    }

    /// Quadtree regions to draw, when the overlay is on.
    pub fn debug_bounds(&self) -> Option<Sequence<BoundingBox>> {
        self.show_debug.then(|| self.world.index_bounds())
    }
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod tests;
