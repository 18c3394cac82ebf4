//! Queue system - the line, the counter, and the departure protocol
//!
//! [`CustomerQueue`] owns the ordered line of customer entities, the fixed
//! slot geometry, and the shared life counter. It is the sole mutator of
//! customer state and targets: promotion to the counter, slot stepping,
//! arrival handling, angry departures, and payment settlement all happen
//! here, driven by one `update(dt)` per tick.

use crate::components::{CustomerState, Movement, Name, Order, Patience, Position, Vec2};
use crate::generation::{self, CanteenConfig, QueueLayout, ReplacementPolicy};
use crate::snapshot::{CustomerSnapshot, QueueSnapshot};
use hecs::{Entity, World};
use rand::Rng;

/// Notifications the queue emits synchronously during updates.
///
/// Implementations hook UI reactions (sounds, score, game-over checks)
/// without the core depending on any of that. All methods default to
/// no-ops; `()` implements the trait for callers that don't care.
pub trait QueueObserver {
    /// A customer ran out of patience and left; `departed` is their final
    /// state, captured just before removal.
    fn customer_left_angrily(&mut self, departed: &CustomerSnapshot) {
        let _ = departed;
    }

    /// The shared life counter changed.
    fn lives_changed(&mut self, lives: u32) {
        let _ = lives;
    }
}

impl QueueObserver for () {}

/// Manages the customer line, the single counter, and the life counter
pub struct CustomerQueue {
    layout: QueueLayout,
    /// Line order = arrival order; index 0 is the front
    line: Vec<Entity>,
    lives: u32,
    next_id: u32,
    arrival_threshold: f32,
    walk_speed: f32,
    patience_max: f32,
    replacement: ReplacementPolicy,
}

impl CustomerQueue {
    pub fn new(config: &CanteenConfig) -> Self {
        Self {
            layout: QueueLayout::from_config(config),
            line: Vec::new(),
            lives: config.starting_lives,
            next_id: 1,
            arrival_threshold: config.arrival_threshold,
            walk_speed: config.walk_speed,
            patience_max: config.patience_max,
            replacement: config.replacement,
        }
    }

    /// Spawn a customer with a random name at the end of the line.
    /// Always succeeds; lines longer than the slot count stack on the
    /// last slot.
    pub fn spawn(&mut self, world: &mut World, rng: &mut impl Rng) -> Entity {
        let name = generation::generate_name(rng);
        self.spawn_with_name(world, name)
    }

    /// Named-spawn convenience wrapper for external callers
    pub fn spawn_named(&mut self, world: &mut World, name: impl Into<String>) -> Entity {
        self.spawn_with_name(world, Name::new(name))
    }

    fn spawn_with_name(&mut self, world: &mut World, name: Name) -> Entity {
        let id = self.next_id;
        self.next_id += 1;

        let slot = self.layout.slot_for(self.line.len());
        log::debug!("customer #{id} ({}) joins the line", name.as_str());

        let entity = generation::spawn_customer(
            world,
            id,
            name,
            self.layout.spawn_point,
            slot,
            self.walk_speed,
            self.patience_max,
        );
        self.line.push(entity);
        entity
    }

    /// Spawn `n` customers up front
    pub fn spawn_initial(&mut self, world: &mut World, rng: &mut impl Rng, n: usize) {
        for _ in 0..n {
            self.spawn(world, rng);
        }
    }

    /// One simulation tick. `dt` is elapsed seconds; negative values are
    /// clamped to zero.
    pub fn update(
        &mut self,
        world: &mut World,
        dt: f32,
        rng: &mut impl Rng,
        observer: &mut dyn QueueObserver,
    ) {
        let dt = dt.max(0.0);
        if self.line.is_empty() {
            return;
        }

        // 1) If no one holds the counter, send the front of the line
        self.promote_front(world);

        // 2) Waiting customers track their slot (the line steps forward)
        self.reassign_slot_targets(world);

        // 3) Per-customer movement and patience
        super::movement_system(world, dt);
        super::patience_system(world, dt);

        // 4) Walkers that physically reached the counter place an order
        self.settle_arrivals(world, rng);

        // 5) Patience exhaustion forces departures, in line order
        let angry: Vec<Entity> = self
            .line
            .iter()
            .copied()
            .filter(|&e| {
                world
                    .get::<&Patience>(e)
                    .map(|p| p.is_exhausted())
                    .unwrap_or(false)
            })
            .collect();

        match self.replacement {
            ReplacementPolicy::Immediate => {
                for entity in angry {
                    self.depart_angry(world, entity, observer);
                    self.spawn(world, rng);
                }
            }
            ReplacementPolicy::Batched => {
                let departures = angry.len();
                for entity in angry {
                    self.depart_angry(world, entity, observer);
                }
                for _ in 0..departures {
                    self.spawn(world, rng);
                }
            }
        }

        // 6) Indices shifted; re-establish the slot invariant
        self.reassign_slot_targets(world);
    }

    /// Promote the front of the line if the counter is unoccupied.
    /// Only index 0 is ever considered; at most one customer is in flight
    /// toward or present at the counter.
    fn promote_front(&self, world: &mut World) {
        if self.anyone_at_counter(world) {
            return;
        }
        let Some(&front) = self.line.first() else {
            return;
        };

        let is_waiting = world
            .get::<&CustomerState>(front)
            .map(|s| *s == CustomerState::Waiting)
            .unwrap_or(false);
        if !is_waiting {
            return;
        }

        if let Ok(mut state) = world.get::<&mut CustomerState>(front) {
            *state = CustomerState::MovingToCounter;
        }
        if let Ok(mut movement) = world.get::<&mut Movement>(front) {
            movement.target = self.layout.counter;
        }
        log::debug!("front of line heads to the counter");
    }

    /// Re-point every waiting customer at the slot for its line position
    fn reassign_slot_targets(&self, world: &mut World) {
        for (index, &entity) in self.line.iter().enumerate() {
            let is_waiting = world
                .get::<&CustomerState>(entity)
                .map(|s| *s == CustomerState::Waiting)
                .unwrap_or(false);
            if !is_waiting {
                continue;
            }
            if let Ok(mut movement) = world.get::<&mut Movement>(entity) {
                movement.target = self.layout.slot_for(index);
            }
        }
    }

    /// Transition walkers within the arrival threshold of their target
    /// (boundary inclusive) to the counter, drawing their order.
    fn settle_arrivals(&self, world: &mut World, rng: &mut impl Rng) {
        for &entity in &self.line {
            let arrived = {
                let Ok(state) = world.get::<&CustomerState>(entity) else {
                    continue;
                };
                if *state != CustomerState::MovingToCounter {
                    continue;
                }
                let (Ok(pos), Ok(movement)) = (
                    world.get::<&Position>(entity),
                    world.get::<&Movement>(entity),
                ) else {
                    continue;
                };
                pos.0.distance(&movement.target) <= self.arrival_threshold
            };
            if !arrived {
                continue;
            }

            let item = generation::random_menu_item(rng);
            if let Ok(mut state) = world.get::<&mut CustomerState>(entity) {
                *state = CustomerState::AtCounter;
            }
            if let Ok(mut order) = world.get::<&mut Order>(entity) {
                order.place(item);
            }
            log::debug!("customer at the counter, orders {item}");
        }
    }

    /// Remove one angry customer: drop from the line, despawn, charge a
    /// life, and notify. The replacement spawn is the caller's job (its
    /// timing depends on the replacement policy).
    fn depart_angry(
        &mut self,
        world: &mut World,
        entity: Entity,
        observer: &mut dyn QueueObserver,
    ) {
        let Some(index) = self.line.iter().position(|&e| e == entity) else {
            return;
        };
        let departed = CustomerSnapshot::capture(world, entity);

        self.line.remove(index);
        let _ = world.despawn(entity);
        self.lives = self.lives.saturating_sub(1);

        if let Some(departed) = &departed {
            log::info!(
                "customer #{} ({}) left angrily, {} lives left",
                departed.id,
                departed.name,
                self.lives
            );
            observer.customer_left_angrily(departed);
        }
        observer.lives_changed(self.lives);
    }

    /// Settle the front customer's order: mark paid, remove them, and
    /// backfill the line. No-op (returning false) unless the front
    /// customer is at the counter.
    pub fn mark_front_paid(&mut self, world: &mut World, rng: &mut impl Rng) -> bool {
        let Some(&front) = self.line.first() else {
            return false;
        };
        let at_counter = world
            .get::<&CustomerState>(front)
            .map(|s| *s == CustomerState::AtCounter)
            .unwrap_or(false);
        if !at_counter {
            return false;
        }

        if let Ok(mut order) = world.get::<&mut Order>(front) {
            order.paid = true;
            log::debug!("front customer paid for {}", order.item);
        }
        self.line.remove(0);
        let _ = world.despawn(front);

        self.spawn(world, rng);
        true
    }

    /// Overwrite the shared life counter and notify
    pub fn set_lives(&mut self, lives: u32, observer: &mut dyn QueueObserver) {
        self.lives = lives;
        if self.lives == 0 {
            log::warn!("lives set to zero");
        }
        observer.lives_changed(self.lives);
    }

    pub fn lives(&self) -> u32 {
        self.lives
    }

    pub fn len(&self) -> usize {
        self.line.len()
    }

    pub fn is_empty(&self) -> bool {
        self.line.is_empty()
    }

    /// Entities in line order; index 0 is the front
    pub fn line(&self) -> &[Entity] {
        &self.line
    }

    pub fn slots(&self) -> &[Vec2] {
        &self.layout.slots
    }

    pub fn counter(&self) -> Vec2 {
        self.layout.counter
    }

    /// True if any customer currently holds the counter
    pub fn anyone_at_counter(&self, world: &World) -> bool {
        self.line.iter().any(|&e| {
            world
                .get::<&CustomerState>(e)
                .map(|s| *s == CustomerState::AtCounter)
                .unwrap_or(false)
        })
    }

    /// Capture the whole queue's drawable state for this tick
    pub fn snapshot(&self, world: &World) -> QueueSnapshot {
        QueueSnapshot {
            customers: self
                .line
                .iter()
                .filter_map(|&e| CustomerSnapshot::capture(world, e))
                .collect(),
            slots: self.layout.slots.clone(),
            counter: self.layout.counter,
            lives: self.lives,
        }
    }
}
