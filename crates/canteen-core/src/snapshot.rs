//! Read-only presentation export
//!
//! The core performs no drawing; a renderer reads one of these per tick
//! and draws whatever it likes. Snapshots are plain serializable data
//! with no entity handles, so they can cross any boundary.

use crate::components::{Customer, CustomerState, Name, Order, Patience, Position, Vec2};
use hecs::{Entity, World};
use serde::{Deserialize, Serialize};

/// One customer's drawable state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomerSnapshot {
    pub id: u32,
    pub name: String,
    pub position: Vec2,
    pub state: CustomerState,
    pub order: String,
    pub paid: bool,
    pub patience_remaining: f32,
    pub patience_max: f32,
}

impl CustomerSnapshot {
    /// Fraction of patience left, 0.0 to 1.0 (drives the patience bar)
    pub fn patience_ratio(&self) -> f32 {
        if self.patience_max > 0.0 {
            (self.patience_remaining / self.patience_max).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }

    /// Capture a customer entity's current state, if it still exists
    pub fn capture(world: &World, entity: Entity) -> Option<Self> {
        let customer = world.get::<&Customer>(entity).ok()?;
        let name = world.get::<&Name>(entity).ok()?;
        let position = world.get::<&Position>(entity).ok()?;
        let state = world.get::<&CustomerState>(entity).ok()?;
        let patience = world.get::<&Patience>(entity).ok()?;
        let order = world.get::<&Order>(entity).ok()?;

        Some(Self {
            id: customer.id,
            name: name.0.clone(),
            position: position.0,
            state: *state,
            order: order.item.clone(),
            paid: order.paid,
            patience_remaining: patience.remaining,
            patience_max: patience.max,
        })
    }
}

/// Whole-queue drawable state for one tick
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueueSnapshot {
    /// Customers in line order; index 0 is the front
    pub customers: Vec<CustomerSnapshot>,
    /// Fixed waiting-slot coordinates
    pub slots: Vec<Vec2>,
    /// The service counter position
    pub counter: Vec2,
    /// Current shared life counter
    pub lives: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::spawn_customer;

    #[test]
    fn test_capture_roundtrip() {
        let mut world = World::new();
        let entity = spawn_customer(
            &mut world,
            3,
            Name::new("Jea"),
            Vec2::new(10.0, 20.0),
            Vec2::new(0.0, 0.0),
            120.0,
            15.0,
        );

        let snap = CustomerSnapshot::capture(&world, entity).unwrap();
        assert_eq!(snap.id, 3);
        assert_eq!(snap.name, "Jea");
        assert_eq!(snap.position, Vec2::new(10.0, 20.0));
        assert_eq!(snap.state, CustomerState::Waiting);
        assert!(snap.paid);
        assert_eq!(snap.patience_ratio(), 1.0);
    }

    #[test]
    fn test_capture_missing_entity() {
        let mut world = World::new();
        let entity = world.spawn((Customer { id: 1 },));
        world.despawn(entity).unwrap();

        assert!(CustomerSnapshot::capture(&world, entity).is_none());
    }
}
