//! Small container utilities shared by the spatial index and the world.

mod sequence;

pub use sequence::Sequence;
