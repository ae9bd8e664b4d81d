mod animator;
mod barrier;
mod claims;
mod config;
mod scheduler;

pub use animator::{Completion, Direction, EdgeAnimation, EdgeLine, Outcome};
pub use barrier::{Barrier, BarrierStatus, BarrierToken};
pub use claims::ClaimedEdges;
pub use config::WaveConfig;
pub use scheduler::{WaveEvent, WaveScheduler, WaveState};
