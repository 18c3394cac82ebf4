//! Patience system - drains customer patience over time
//!
//! Drain is state-dependent: standing at the counter with an open tab is
//! far more stressful than waiting in line, which gives unpaid orders a
//! hard deadline.

use crate::components::{CustomerState, Order, Patience};
use hecs::World;

/// Patience units lost per whole second, by lifecycle state
pub fn drain_per_unit(state: CustomerState, paid: bool) -> f32 {
    match state {
        CustomerState::Waiting | CustomerState::MovingToCounter => 1.0,
        CustomerState::AtCounter => {
            if paid {
                1.5
            } else {
                3.0
            }
        }
    }
}

/// Advance every customer's patience countdown by `dt` seconds
pub fn patience_system(world: &mut World, dt: f32) {
    for (_, (state, order, patience)) in
        world.query_mut::<(&CustomerState, &Order, &mut Patience)>()
    {
        patience.advance(dt, drain_per_unit(*state, order.paid));
    }
}
