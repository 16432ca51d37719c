pub mod app;
pub mod config;
pub mod demo;
pub mod entity;
pub mod error;
pub mod globe;
pub mod graphics;
pub mod math;
pub mod places;
pub mod projection;
pub mod quaternion;
pub mod scene;
pub mod state;
pub mod style;
pub mod surface;
pub mod terminal;
pub mod widget;

pub use entity::{Entity, EntityKind};
pub use error::{Error, Result};
pub use projection::Projection;
pub use scene::Scene;
pub use surface::{DrawCommand, RecordingSurface, Surface};
