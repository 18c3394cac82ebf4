//! Canteen Headless Simulation Harness
//!
//! Validates queue behavior end to end without a renderer or timers:
//! line formation, promotion, patience decay, departures, settlement,
//! and the long-run invariants. Runs entirely in-process — no windowing,
//! no audio, no assets.
//!
//! Usage:
//!   cargo run -p canteen-simtest
//!   cargo run -p canteen-simtest -- --verbose

use canteen_core::components::{CustomerState, Movement, Patience, Position};
use canteen_core::engine::SimulationEngine;
use canteen_core::generation::CanteenConfig;
use canteen_core::snapshot::CustomerSnapshot;
use canteen_core::systems::{CustomerQueue, QueueObserver};
use hecs::World;

// ── Test harness ────────────────────────────────────────────────────────

struct TestResult {
    name: String,
    passed: bool,
    detail: String,
}

fn check(name: &str, passed: bool, detail: impl Into<String>) -> TestResult {
    TestResult {
        name: name.to_string(),
        passed,
        detail: detail.into(),
    }
}

fn main() {
    let verbose = std::env::args().any(|a| a == "--verbose");
    println!("=== Canteen Simulation Harness ===\n");

    let mut results = Vec::new();

    // 1. Line formation and promotion
    results.extend(validate_line_formation());

    // 2. Patience decay determinism
    results.extend(validate_patience_decay());

    // 3. Departure and replacement protocol
    results.extend(validate_departures());

    // 4. Command surface no-ops
    results.extend(validate_commands());

    // 5. Long soak with per-tick invariant checks
    results.extend(validate_soak(verbose));

    // ── Summary ──
    println!();
    let passed = results.iter().filter(|r| r.passed).count();
    let failed = results.iter().filter(|r| !r.passed).count();
    let total = results.len();

    for r in &results {
        let icon = if r.passed { "✓" } else { "✗" };
        if !r.passed || verbose {
            println!("  {} {}: {}", icon, r.name, r.detail);
        }
    }

    println!(
        "\n=== RESULT: {}/{} passed, {} failed ===",
        passed, total, failed
    );

    if failed > 0 {
        std::process::exit(1);
    }
}

// ── Shared helpers ──────────────────────────────────────────────────────

fn new_queue() -> (World, CustomerQueue) {
    (World::new(), CustomerQueue::new(&CanteenConfig::default()))
}

fn state_of(world: &World, entity: hecs::Entity) -> CustomerState {
    *world
        .get::<&CustomerState>(entity)
        .expect("customer entity missing state")
}

/// Park every customer on its current target, skipping the walk
fn teleport_to_targets(world: &mut World) {
    for (_, (pos, movement)) in world.query_mut::<(&mut Position, &Movement)>() {
        pos.0 = movement.target;
    }
}

#[derive(Default)]
struct Recorder {
    departures: Vec<CustomerSnapshot>,
    lives_seen: Vec<u32>,
}

impl QueueObserver for Recorder {
    fn customer_left_angrily(&mut self, departed: &CustomerSnapshot) {
        self.departures.push(departed.clone());
    }
    fn lives_changed(&mut self, lives: u32) {
        self.lives_seen.push(lives);
    }
}

// ── 1. Line formation ───────────────────────────────────────────────────

fn validate_line_formation() -> Vec<TestResult> {
    let mut results = Vec::new();
    let (mut world, mut queue) = new_queue();
    let mut rng = rand::thread_rng();

    queue.spawn_initial(&mut world, &mut rng, 3);
    queue.update(&mut world, 0.0, &mut rng, &mut ());

    let line = queue.line().to_vec();
    results.push(check(
        "front promoted",
        state_of(&world, line[0]) == CustomerState::MovingToCounter,
        "first update sends the front of the line to the counter",
    ));
    results.push(check(
        "rest keep waiting",
        line[1..]
            .iter()
            .all(|&e| state_of(&world, e) == CustomerState::Waiting),
        "customers behind the front stay in line",
    ));

    let slots = queue.slots().to_vec();
    let targets_ok = line[1..].iter().enumerate().all(|(i, &e)| {
        world
            .get::<&Movement>(e)
            .map(|m| m.target == slots[i + 1])
            .unwrap_or(false)
    });
    results.push(check(
        "slot targets",
        targets_ok,
        "waiting customers target the slot for their line position",
    ));

    // Walk the front in and check the arrival protocol
    teleport_to_targets(&mut world);
    queue.update(&mut world, 0.0, &mut rng, &mut ());
    let front = queue.line()[0];
    let at_counter = state_of(&world, front) == CustomerState::AtCounter;
    let ordered = world
        .get::<&canteen_core::components::Order>(front)
        .map(|o| !o.item.is_empty() && !o.paid && o.locked_to_counter)
        .unwrap_or(false);
    results.push(check(
        "counter arrival",
        at_counter && ordered,
        "arriving at the counter places an unpaid order",
    ));

    results
}

// ── 2. Patience decay ───────────────────────────────────────────────────

fn validate_patience_decay() -> Vec<TestResult> {
    let mut results = Vec::new();

    // Re-chunking determinism
    let mut whole = Patience::new(15.0);
    whole.advance(1.0, 1.0);
    let mut halves = Patience::new(15.0);
    halves.advance(0.5, 1.0);
    halves.advance(0.5, 1.0);
    results.push(check(
        "re-chunk determinism",
        whole.remaining == halves.remaining,
        format!(
            "1x1.0s == 2x0.5s ({} vs {})",
            whole.remaining, halves.remaining
        ),
    ));

    // Clamping
    let mut p = Patience::new(2.0);
    p.advance(10.0, 3.0);
    results.push(check(
        "patience clamps at zero",
        p.remaining == 0.0 && p.is_exhausted(),
        "overdraining never goes negative",
    ));

    // State-dependent drain through the full system
    use canteen_core::systems::drain_per_unit;
    let rates_ok = drain_per_unit(CustomerState::Waiting, true) == 1.0
        && drain_per_unit(CustomerState::MovingToCounter, true) == 1.0
        && drain_per_unit(CustomerState::AtCounter, false) == 3.0
        && drain_per_unit(CustomerState::AtCounter, true) == 1.5;
    results.push(check(
        "drain rate table",
        rates_ok,
        "waiting 1.0, unpaid counter 3.0, paid counter 1.5 per unit",
    ));

    results
}

// ── 3. Departures ───────────────────────────────────────────────────────

fn validate_departures() -> Vec<TestResult> {
    let mut results = Vec::new();
    let (mut world, mut queue) = new_queue();
    let mut rng = rand::thread_rng();
    let mut recorder = Recorder::default();

    queue.spawn_initial(&mut world, &mut rng, 4);
    let lives_before = queue.lives();
    let size_before = queue.len();

    // Force two simultaneous storm-outs
    let victims = [queue.line()[1], queue.line()[2]];
    for &v in &victims {
        world
            .get::<&mut Patience>(v)
            .expect("victim has patience")
            .remaining = 0.0;
    }
    queue.update(&mut world, 0.0, &mut rng, &mut recorder);

    results.push(check(
        "replacement law",
        queue.len() == size_before,
        format!("line size {} preserved across departures", queue.len()),
    ));
    results.push(check(
        "lives charged",
        queue.lives() == lives_before - 2,
        format!("{} -> {} lives", lives_before, queue.lives()),
    ));
    results.push(check(
        "departure notifications",
        recorder.departures.len() == 2 && recorder.lives_seen == vec![2, 1],
        "one notification per departure, lives relayed in order",
    ));

    // Drive lives to the floor; replacement keeps the line non-empty
    for _ in 0..10 {
        let front = queue.line()[0];
        world
            .get::<&mut Patience>(front)
            .expect("front has patience")
            .remaining = 0.0;
        queue.update(&mut world, 0.0, &mut rng, &mut recorder);
    }
    results.push(check(
        "lives floor at zero",
        queue.lives() == 0,
        "repeated departures saturate rather than underflow",
    ));

    results
}

// ── 4. Commands ─────────────────────────────────────────────────────────

fn validate_commands() -> Vec<TestResult> {
    let mut results = Vec::new();
    let (mut world, mut queue) = new_queue();
    let mut rng = rand::thread_rng();

    // Settlement against an empty queue and a waiting front is a no-op
    let noop_empty = !queue.mark_front_paid(&mut world, &mut rng);
    queue.spawn_initial(&mut world, &mut rng, 2);
    let line_before = queue.line().to_vec();
    let noop_waiting = !queue.mark_front_paid(&mut world, &mut rng);
    results.push(check(
        "settlement no-ops",
        noop_empty && noop_waiting && queue.line() == line_before.as_slice(),
        "mark_front_paid off the counter changes nothing",
    ));

    // Real settlement path
    queue.update(&mut world, 0.0, &mut rng, &mut ());
    teleport_to_targets(&mut world);
    queue.update(&mut world, 0.0, &mut rng, &mut ());
    let served = queue.line()[0];
    let settled = queue.mark_front_paid(&mut world, &mut rng);
    results.push(check(
        "settlement",
        settled && !queue.line().contains(&served) && queue.len() == 2,
        "paid front leaves, line backfills",
    ));

    // Named spawn
    let named = queue.spawn_named(&mut world, "Keren");
    let name_ok = world
        .get::<&canteen_core::components::Name>(named)
        .map(|n| n.as_str() == "Keren")
        .unwrap_or(false);
    results.push(check("named spawn", name_ok, "spawn_named honors the name"));

    results
}

// ── 5. Soak ─────────────────────────────────────────────────────────────

fn validate_soak(verbose: bool) -> Vec<TestResult> {
    let mut results = Vec::new();

    let mut config = CanteenConfig::default();
    config.spawn_interval = None;
    let mut engine = SimulationEngine::new(&config);
    engine.spawn_initial(5);

    let mut max_at_counter = 0;
    let mut slot_violations = 0;

    // 120 simulated seconds at 50 Hz
    for _ in 0..6000 {
        engine.update(0.02);

        let snap = engine.snapshot();
        let at_counter = snap
            .customers
            .iter()
            .filter(|c| c.state == CustomerState::AtCounter)
            .count();
        max_at_counter = max_at_counter.max(at_counter);

        for (i, c) in snap.customers.iter().enumerate() {
            if c.state != CustomerState::Waiting {
                continue;
            }
            let slot = snap.slots[i.min(snap.slots.len() - 1)];
            let target_ok = engine
                .world
                .get::<&Movement>(engine.queue.line()[i])
                .map(|m| m.target == slot)
                .unwrap_or(false);
            if !target_ok {
                slot_violations += 1;
            }
        }
    }

    results.push(check(
        "counter exclusivity",
        max_at_counter <= 1,
        format!("max simultaneous counter occupancy {max_at_counter}"),
    ));
    results.push(check(
        "slot invariant",
        slot_violations == 0,
        format!("{slot_violations} violations over 6000 ticks"),
    ));
    results.push(check(
        "line size stable",
        engine.customer_count() == 5,
        format!("{} customers after soak", engine.customer_count()),
    ));

    if verbose {
        let snap = engine.snapshot();
        match serde_json::to_string_pretty(&snap) {
            Ok(json) => println!("final snapshot:\n{json}"),
            Err(e) => println!("snapshot serialization failed: {e}"),
        }
    }

    results
}
