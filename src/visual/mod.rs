pub mod plugin;
pub mod render;

pub use plugin::{ConstellationWave, SkyCatalog, WaveAction, WaveNotice, WavePlugin, WaveRequest};
pub use render::ConstellationGizmosPlugin;
