//! Customer entity assembly

use crate::components::{
    Customer, CustomerState, Movement, Name, Order, Patience, Position, Vec2,
};
use hecs::{Entity, World};

/// Spawn a fully-assembled customer entity at `at`, already walking
/// toward `slot`. The caller (the queue manager) owns id assignment and
/// line bookkeeping.
pub fn spawn_customer(
    world: &mut World,
    id: u32,
    name: Name,
    at: Vec2,
    slot: Vec2,
    speed: f32,
    patience_max: f32,
) -> Entity {
    world.spawn((
        Customer { id },
        name,
        Position(at),
        Movement::new(slot, speed),
        CustomerState::Waiting,
        Patience::new(patience_max),
        Order::default(),
    ))
}
