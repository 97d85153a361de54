//! Engine process control: spawning, output line framing, status events.
//!
//! The playback engine is an external process that reports state as lines
//! of text on stdout and stderr. [`Engine`] spawns it, [`LineFramer`] turns
//! its chunked pipe output into whole lines, and [`events::parse_line`]
//! gives the shell a typed view of the lines it understands.

pub mod events;
pub mod framer;
pub mod process;

pub use events::{parse_line, EngineEvent};
pub use framer::LineFramer;
pub use process::{Engine, EngineHandle};
