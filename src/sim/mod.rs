//! Numerical particle core
//!
//! Pure simulation code with no scene or platform dependencies:
//! - Particle state is a fixed five-number tuple
//! - Derivative rules are plain values
//! - Integrators never cull; culling is a separate pass
//! - Stable iteration order (by particle id)

pub mod arena;
pub mod derivative;
pub mod integrator;
pub mod particle;
pub mod system;
pub mod vector;

pub use arena::{SlotArena, SlotId};
pub use derivative::{Derivative, DerivativeRule};
pub use integrator::Integrator;
pub use particle::{ParticleCollection, ParticleState, STATE_LEN};
pub use system::{Bounds, EmissionPolicy, ParticleSystem};
