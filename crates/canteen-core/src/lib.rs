//! Canteen Core - Service Queue Simulation Engine
//!
//! An ECS-based simulation of a canteen service queue: customers walk in,
//! wait in an ordered line, advance to a single counter, and either get
//! served or storm out when their patience runs dry, costing a shared
//! life.
//!
//! # Architecture
//!
//! The simulation uses an Entity Component System (ECS) architecture via
//! `hecs`:
//! - **Entities**: Customers
//! - **Components**: Pure data attached to entities (Position, Movement,
//!   Patience, Order, etc.)
//! - **Systems**: Logic that queries and updates components; the
//!   [`CustomerQueue`](systems::CustomerQueue) manager owns line order,
//!   promotion, and the departure/replacement protocol
//!
//! The core draws nothing and owns no window: a presentation layer reads
//! a [`QueueSnapshot`](snapshot::QueueSnapshot) each tick, and a UI layer
//! issues commands (`spawn_customer`, `mark_front_paid`) in response to
//! its own events.
//!
//! # Example
//!
//! ```rust,no_run
//! use canteen_core::prelude::*;
//! use canteen_core::generation::CanteenConfig;
//!
//! let mut engine = SimulationEngine::new(&CanteenConfig::default());
//! engine.spawn_initial(3);
//!
//! // Run simulation
//! loop {
//!     engine.update(1.0 / 50.0); // 50 Hz tick
//!     let _snapshot = engine.snapshot(); // hand to the renderer
//! }
//! ```

pub mod components;
pub mod engine;
pub mod generation;
pub mod snapshot;
pub mod systems;

/// Commonly used types for convenient importing
pub mod prelude {
    pub use crate::components::*;
    pub use crate::engine::SimulationEngine;
    pub use crate::snapshot::{CustomerSnapshot, QueueSnapshot};
    pub use crate::systems::{CustomerQueue, QueueObserver};
}
