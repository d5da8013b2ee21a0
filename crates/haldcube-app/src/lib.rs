//! haldcube application layer: state machine, task runner, and options.

pub mod commands;
pub mod options;
pub mod session;
pub mod state;

pub use commands::{convert, generate, inspect, CubeSummary};
pub use options::{ConvertOptions, GenerateOptions};
pub use session::{Session, SessionError};
pub use state::{update, AppState, Control, Effect, Event, Task, TaskOutcome};
