//! Customer components: identity, line state, patience, and order status.

use serde::{Deserialize, Serialize};

/// Marker + identity component for a customer entity.
///
/// Ids are assigned monotonically by the queue manager and never reused
/// while the manager is alive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Customer {
    pub id: u32,
}

/// Display name component
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Name(pub String);

impl Name {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Where a customer is in its service lifecycle.
///
/// The queue manager is the sole mutator; customers never transition
/// themselves. Removal from the world is the terminal step, not a state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CustomerState {
    /// Standing in line at an assigned slot
    Waiting,
    /// Promoted to front, walking toward the counter
    MovingToCounter,
    /// Physically at the counter, order placed
    AtCounter,
}

/// Patience countdown - reaching zero forces an angry departure.
///
/// Decay happens in whole-unit ticks: fractional `dt` accumulates until a
/// full unit has elapsed, so the decay rate is identical under any tick
/// cadence (one 1.0s update and two 0.5s updates drain the same amount).
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Patience {
    pub max: f32,
    pub remaining: f32,
    accumulator: f64,
}

impl Patience {
    pub fn new(max: f32) -> Self {
        Self {
            max,
            remaining: max,
            accumulator: 0.0,
        }
    }

    /// Accumulate `dt` seconds and apply one decay tick of `drain` units
    /// per whole second accumulated. `remaining` never goes below zero.
    pub fn advance(&mut self, dt: f32, drain: f32) {
        self.accumulator += f64::from(dt.max(0.0));
        while self.accumulator >= 1.0 {
            self.remaining = (self.remaining - drain).max(0.0);
            self.accumulator -= 1.0;
        }
    }

    /// True once patience has run out
    pub fn is_exhausted(&self) -> bool {
        self.remaining <= 0.0
    }

    /// Fraction of patience left, 0.0 to 1.0 (for presentation)
    pub fn ratio(&self) -> f32 {
        if self.max > 0.0 {
            (self.remaining / self.max).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }
}

/// Order status - what the customer asked for and whether they settled up.
///
/// `paid` starts true as an idle placeholder; arriving at the counter
/// places an order and flips it to false until settlement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub item: String,
    pub paid: bool,
    /// Set once the customer has reached the counter, so it is never
    /// treated as still approaching
    pub locked_to_counter: bool,
}

impl Default for Order {
    fn default() -> Self {
        Self {
            item: String::new(),
            paid: true,
            locked_to_counter: false,
        }
    }
}

impl Order {
    /// Counter arrival: record the chosen item, open an unpaid tab, lock
    pub fn place(&mut self, item: impl Into<String>) {
        self.item = item.into();
        self.paid = false;
        self.locked_to_counter = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_patience_whole_unit_decay() {
        let mut p = Patience::new(15.0);

        // Fractional updates accumulate without draining
        p.advance(0.4, 1.0);
        assert_eq!(p.remaining, 15.0);

        // Crossing the unit boundary drains exactly once
        p.advance(0.6, 1.0);
        assert_eq!(p.remaining, 14.0);
    }

    #[test]
    fn test_patience_rechunk_determinism() {
        let mut whole = Patience::new(15.0);
        whole.advance(1.0, 1.0);

        let mut halves = Patience::new(15.0);
        halves.advance(0.5, 1.0);
        halves.advance(0.5, 1.0);

        assert_eq!(whole.remaining, halves.remaining);
    }

    #[test]
    fn test_patience_clamps_at_zero() {
        let mut p = Patience::new(2.0);
        p.advance(5.0, 3.0);
        assert_eq!(p.remaining, 0.0);
        assert!(p.is_exhausted());
    }

    #[test]
    fn test_patience_stalled_frame() {
        // A single huge dt drains the same as many small ones
        let mut stalled = Patience::new(15.0);
        stalled.advance(10.0, 1.0);

        let mut steady = Patience::new(15.0);
        for _ in 0..500 {
            steady.advance(0.02, 1.0);
        }

        assert_eq!(stalled.remaining, steady.remaining);
        assert_eq!(stalled.remaining, 5.0);
    }

    #[test]
    fn test_patience_ratio() {
        let mut p = Patience::new(10.0);
        assert_eq!(p.ratio(), 1.0);
        p.advance(5.0, 1.0);
        assert_eq!(p.ratio(), 0.5);
    }

    #[test]
    fn test_patience_negative_dt_is_noop() {
        let mut p = Patience::new(10.0);
        p.advance(-3.0, 1.0);
        assert_eq!(p.remaining, 10.0);
    }

    #[test]
    fn test_order_placement() {
        let mut order = Order::default();
        assert!(order.paid);
        assert!(order.item.is_empty());
        assert!(!order.locked_to_counter);

        order.place("Burger");
        assert!(!order.paid);
        assert_eq!(order.item, "Burger");
        assert!(order.locked_to_counter);
    }
}
