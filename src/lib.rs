pub mod camera;
pub mod catalog;
pub mod error;
pub mod graph;
pub mod input;
pub mod visual;
pub mod wave;

pub use error::WaveError;
