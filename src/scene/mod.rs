//! Scene: entity lifecycle and scheduling
//!
//! Sprites are born by registering with the [`Registry`], live while the
//! scheduler polls them, and leave by calling `kill` once `is_dead` holds.
//! Every tick receives an explicit [`SimContext`]; there is no global state.

pub mod clock;
pub mod collapse;
pub mod entity;
pub mod level;
pub mod registry;
pub mod scheduler;
pub mod timeline;

pub use clock::{ClockTicks, DualClock};
pub use collapse::CollapsingPoint;
pub use entity::{Sprite, SpriteKind};
pub use level::{Level, LevelKind, TellAction};
pub use registry::{EntityIds, Registry, SpriteRef};
pub use scheduler::{Scene, SimContext};
pub use timeline::{Timeline, ms_to_ticks};
