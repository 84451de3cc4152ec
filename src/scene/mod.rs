pub mod bootstrap;
pub mod camera;
pub mod color;
pub mod graph;
pub mod projection;

pub use bootstrap::{bootstrap, SceneHandles};
pub use camera::{Camera, OrbitControls};
pub use color::Color;
pub use graph::{NodeId, NodeKind, SceneGraph};
pub use projection::{draw_list, DrawItem, Projector};
