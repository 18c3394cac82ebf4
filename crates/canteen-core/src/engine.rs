//! Simulation engine - main entry point for running the simulation

use crate::components::Customer;
use crate::generation::CanteenConfig;
use crate::snapshot::QueueSnapshot;
use crate::systems::{CustomerQueue, QueueObserver};
use hecs::World;

/// Main simulation engine.
///
/// Owns the ECS world and the customer queue and drives both from a
/// single external tick (`update(dt)`). UI-facing commands (`spawn_*`,
/// `mark_front_paid`, `set_lives`) must be called from the same thread
/// that drives ticks.
pub struct SimulationEngine {
    /// ECS world containing all customer entities
    pub world: World,
    /// The line, the counter, and the life counter
    pub queue: CustomerQueue,
    /// Simulation time in seconds since start
    sim_time: f64,
    /// Auto-spawn cadence in seconds, if enabled
    spawn_interval: Option<f32>,
    last_spawn: f64,
    time_scale: f32,
    observer: Box<dyn QueueObserver>,
}

impl SimulationEngine {
    /// Create an engine with an empty line
    pub fn new(config: &CanteenConfig) -> Self {
        Self {
            world: World::new(),
            queue: CustomerQueue::new(config),
            sim_time: 0.0,
            spawn_interval: config.spawn_interval,
            last_spawn: 0.0,
            time_scale: 1.0,
            observer: Box::new(()),
        }
    }

    /// Register the listener for queue notifications (replaces any
    /// previous one)
    pub fn set_observer(&mut self, observer: Box<dyn QueueObserver>) {
        self.observer = observer;
    }

    /// Update the simulation by `delta_seconds`. Negative values are
    /// clamped to zero; zero is a valid no-op.
    pub fn update(&mut self, delta_seconds: f32) {
        let scaled = delta_seconds.max(0.0) * self.time_scale;
        self.sim_time += f64::from(scaled);

        let mut rng = rand::thread_rng();

        if let Some(interval) = self.spawn_interval {
            if self.sim_time - self.last_spawn >= f64::from(interval) {
                self.queue.spawn(&mut self.world, &mut rng);
                self.last_spawn = self.sim_time;
            }
        }

        self.queue
            .update(&mut self.world, scaled, &mut rng, self.observer.as_mut());
    }

    /// Add one customer at the end of the line
    pub fn spawn_customer(&mut self) {
        self.queue.spawn(&mut self.world, &mut rand::thread_rng());
    }

    /// Add one named customer at the end of the line
    pub fn spawn_customer_named(&mut self, name: impl Into<String>) {
        self.queue.spawn_named(&mut self.world, name);
    }

    /// Seed the line with `n` customers
    pub fn spawn_initial(&mut self, n: usize) {
        self.queue
            .spawn_initial(&mut self.world, &mut rand::thread_rng(), n);
    }

    /// Settle the front customer's order (payment confirmed externally).
    /// Returns false if nobody is at the counter.
    pub fn mark_front_paid(&mut self) -> bool {
        self.queue
            .mark_front_paid(&mut self.world, &mut rand::thread_rng())
    }

    /// Overwrite the shared life counter
    pub fn set_lives(&mut self, lives: u32) {
        self.queue.set_lives(lives, self.observer.as_mut());
    }

    pub fn lives(&self) -> u32 {
        self.queue.lives()
    }

    /// Count customer entities in the world
    pub fn customer_count(&self) -> usize {
        self.world.query::<&Customer>().iter().count()
    }

    /// Get current simulation time in seconds
    pub fn sim_time(&self) -> f64 {
        self.sim_time
    }

    /// Set time scale (1.0 = real-time, 2.0 = 2x speed, etc.)
    pub fn set_time_scale(&mut self, scale: f32) {
        self.time_scale = scale.max(0.0);
    }

    /// Get current time scale
    pub fn time_scale(&self) -> f32 {
        self.time_scale
    }

    /// Capture the queue's drawable state for this tick
    pub fn snapshot(&self) -> QueueSnapshot {
        self.queue.snapshot(&self.world)
    }
}

impl Default for SimulationEngine {
    fn default() -> Self {
        Self::new(&CanteenConfig::default())
    }
}
