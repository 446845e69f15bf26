//! The per-domain seam of the sweep.
//!
//! A [`Resolver`] owns nothing across builds: the sweep asks it for a fresh
//! [`Resolver::State`], feeds every event through [`Resolver::apply`], and asks it
//! to [`Resolver::resolve`] the state into a value whenever an interval closes.

use crate::event::{Boundary, Event};

pub trait Resolver {
    /// Domain tag carried by each slot.
    type Payload;
    /// Running accumulator for one sweep.
    type State;
    /// Value attached to each output interval.
    type Value;

    fn initial_state(&self) -> Self::State;

    /// A slot carrying `payload` becomes active.
    fn enter(&self, state: &mut Self::State, payload: &Self::Payload);

    /// A slot carrying `payload` stops being active.
    fn exit(&self, state: &mut Self::State, payload: &Self::Payload);

    fn resolve(&self, state: &Self::State) -> Self::Value;

    /// Whether two adjacent intervals carry the same value and can be merged.
    fn values_equal(&self, a: &Self::Value, b: &Self::Value) -> bool;

    fn apply(&self, state: &mut Self::State, event: &Event<'_, Self::Payload>) {
        match event.boundary {
            Boundary::Start => self.enter(state, event.payload),
            Boundary::End => self.exit(state, event.payload),
        }
    }
}
