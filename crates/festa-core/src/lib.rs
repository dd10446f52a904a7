pub mod audio;
pub mod camera;
pub mod color;
pub mod constants;
pub mod dust;
pub mod error;
pub mod firework;
pub mod params;
pub mod scene;
pub mod spawner;
pub mod spectrum;
pub mod stage;
pub mod texture;
pub mod visualizer;

pub static SCENE_WGSL: &str = include_str!("../shaders/scene.wgsl");

pub use audio::*;
pub use camera::*;
pub use constants::*;
pub use dust::*;
pub use error::*;
pub use firework::*;
pub use params::*;
pub use scene::*;
pub use spawner::*;
pub use spectrum::*;
pub use stage::*;
pub use texture::*;
pub use visualizer::*;
