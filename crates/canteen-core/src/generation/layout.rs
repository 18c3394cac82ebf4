//! Canteen layout - slot coordinates, counter, and spawn point
//!
//! All geometry is computed once from a configured rectangular region:
//! waiting slots stack upward from the region's bottom edge, anchored a
//! fixed offset in from its right edge; customers spawn off-area past the
//! bottom-right corner and walk in.

use crate::components::{Rect, Vec2};
use serde::{Deserialize, Serialize};

/// Inset of the first slot from the region's bottom edge
const SLOT_BOTTOM_INSET: f32 = 8.0;

/// How replacements are spawned when several customers storm out in the
/// same tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReplacementPolicy {
    /// Spawn each replacement inside its departure, in line order
    #[default]
    Immediate,
    /// Process all departures first, then spawn all replacements
    Batched,
}

/// Constructor-time configuration for the simulation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CanteenConfig {
    /// Floor region the queue lives in
    pub area: Rect,
    /// Absolute position of the single service counter
    pub counter: Vec2,
    /// Number of waiting slots in the line
    pub max_slots: usize,
    /// Vertical spacing between waiting slots
    pub slot_spacing: f32,
    /// Horizontal shift of the slot column from the region's right edge
    pub slot_offset_x: f32,
    /// How far past the bottom-right corner customers spawn
    pub spawn_offset: f32,
    /// Distance at which a walking customer counts as arrived at the counter
    pub arrival_threshold: f32,
    /// Walking speed in units per second
    pub walk_speed: f32,
    /// Patience budget per customer, in patience units
    pub patience_max: f32,
    /// Shared life counter starting value
    pub starting_lives: u32,
    /// Replacement spawn ordering for simultaneous departures
    pub replacement: ReplacementPolicy,
    /// Engine-driven auto-spawn interval in seconds; `None` leaves all
    /// spawning to explicit commands
    pub spawn_interval: Option<f32>,
}

impl Default for CanteenConfig {
    fn default() -> Self {
        Self {
            area: Rect::new(0.0, 0.0, 1280.0, 720.0),
            counter: Vec2::new(640.0, 140.0),
            max_slots: 5,
            slot_spacing: 72.0,
            slot_offset_x: -160.0,
            spawn_offset: 140.0,
            arrival_threshold: 8.0,
            walk_speed: 120.0,
            patience_max: 15.0,
            starting_lives: 3,
            replacement: ReplacementPolicy::Immediate,
            spawn_interval: None,
        }
    }
}

/// Fixed geometry derived from a [`CanteenConfig`], computed once
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueueLayout {
    /// Waiting-slot coordinates; index 0 is the front of the line
    pub slots: Vec<Vec2>,
    /// The single service point
    pub counter: Vec2,
    /// Off-area point new customers walk in from
    pub spawn_point: Vec2,
}

impl QueueLayout {
    pub fn from_config(config: &CanteenConfig) -> Self {
        let column_x = config.area.right() + config.slot_offset_x;
        let base_y = config.area.bottom() - SLOT_BOTTOM_INSET;

        let slots = (0..config.max_slots)
            .map(|i| Vec2::new(column_x, base_y - i as f32 * config.slot_spacing))
            .collect();

        let spawn_point = Vec2::new(
            config.area.right() + config.spawn_offset,
            config.area.bottom() + config.spawn_offset,
        );

        Self {
            slots,
            counter: config.counter,
            spawn_point,
        }
    }

    /// Slot a customer at line position `index` should stand in.
    /// Positions past the end of the line all share the last slot.
    pub fn slot_for(&self, index: usize) -> Vec2 {
        self.slots[index.min(self.slots.len() - 1)]
    }
}
