/// Command-line interface and the generation runner
pub mod cli;
/// Generation constants and runtime configuration
pub mod configuration;
/// Error types and context helpers
pub mod error;
/// PNG export of rendered mazes
pub mod image;
/// Progress bars for the solve and repair phases
pub mod progress;
/// Archetype painters and grid rendering
pub mod render;
/// Cell event capture and GIF export
pub mod visualization;
