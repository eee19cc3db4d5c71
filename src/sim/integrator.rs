//! Fixed-step integrators over a whole particle collection
//!
//! Integrators never cull; expired particles are stepped like any other and
//! removed in a separate pass.

use serde::{Deserialize, Serialize};

use super::derivative::Derivative;
use super::particle::{ParticleCollection, ParticleState};
use super::vector;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Integrator {
    /// Explicit single-stage step: `s' = s + dt * f(s)`
    Euler,
    /// Predictor-corrector: `s' = s + dt/2 * (f(s) + f(s + dt * f(s)))`
    #[default]
    Heun,
}

impl Integrator {
    /// Advance every particle by `dt`, returning the new collection.
    /// Ids are preserved.
    pub fn step<D: Derivative + ?Sized>(
        &self,
        collection: &ParticleCollection,
        rule: &D,
        dt: f32,
    ) -> ParticleCollection {
        let mut next = collection.clone();
        self.step_in_place(&mut next, rule, dt);
        next
    }

    /// Advance every particle by `dt` without reallocating the collection
    pub fn step_in_place<D: Derivative + ?Sized>(
        &self,
        collection: &mut ParticleCollection,
        rule: &D,
        dt: f32,
    ) {
        if collection.is_empty() {
            return;
        }

        // Evaluate every derivative before mutating anything
        let derivs: Vec<ParticleState> = collection.iter().map(|(_, s)| rule.eval(s)).collect();
        debug_assert_eq!(derivs.len(), collection.len(), "one derivative per particle");

        for ((_, state), deriv) in collection.iter_mut().zip(derivs) {
            *state = self.advance(state, &deriv, rule, dt);
        }
    }

    /// Advance a single state given its already-evaluated derivative
    fn advance<D: Derivative + ?Sized>(
        &self,
        state: &ParticleState,
        deriv: &ParticleState,
        rule: &D,
        dt: f32,
    ) -> ParticleState {
        let s = state.to_array();
        let d1 = deriv.to_array();
        match self {
            Integrator::Euler => ParticleState::from_array(vector::add_scaled(s, d1, dt)),
            Integrator::Heun => {
                let predicted = ParticleState::from_array(vector::add_scaled(s, d1, dt));
                let d2 = rule.eval(&predicted).to_array();
                ParticleState::from_array(vector::add_scaled(s, vector::add(d1, d2), dt * 0.5))
            }
        }
    }
}
