/*!
# Asteroids Engine

Simulation core for an arcade asteroid shooter.

The crate owns everything below the window: entities and their motion,
a dynamic quadtree that narrows collision candidates each frame, the
collision resolution pass, and the menu/round state machine. Rendering,
audio and input polling belong to the host, which drives a `Session` once
per frame.

## Architecture

- **Sequence**: growable container used for orderings and query results
- **SpatialIndex**: candidate queries (`Quadtree`, `BruteForceIndex`)
- **World**: entity arena, tick pipeline, collision pass, statistics
- **Session**: main menu, mode select, playing, results
- **Engine**: global session registry and logger
*/

// Internal modules
mod error;
mod engine;
pub mod log;
pub mod utils;
pub mod spatial;
pub mod world;
pub mod session;

// Main asteroids namespace module
pub mod asteroids {
    // Error types
    pub use crate::error::{Error, Result};

    // Engine singleton
    pub use crate::engine::Engine;

    // Container
    pub use crate::utils::Sequence;

    // Logging sub-module (types only, NOT macros)
    pub mod log {
        pub use crate::log::{Logger, LogEntry, LogSeverity, DefaultLogger};
    }

    // Spatial indexing sub-module
    pub mod spatial {
        pub use crate::spatial::*;
    }

    // Simulation sub-module
    pub mod world {
        pub use crate::world::*;
    }

    // Session sub-module
    pub mod session {
        pub use crate::session::*;
    }
}

// Re-export math library at crate root
pub use glam;
