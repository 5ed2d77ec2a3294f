use crate::common::{classes, FixedRouter, TestHarness};
use lbsim_core::*;
use proptest::prelude::*;

fn pool_strategy() -> impl Strategy<Value = Vec<ServerClass>> {
    prop::collection::vec((1u32..4, 1u64..20), 1..4)
        .prop_map(|spec| spec.into_iter().map(|(c, l)| ServerClass::new(c, l)).collect())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_completions_are_conserved(
        clients in 1u32..30,
        pool in pool_strategy(),
        ticks in 0u64..300,
        seed in any::<u64>(),
    ) {
        let mut h = TestHarness::new_with_seed(clients, &pool, seed);
        h.run_for(ticks);

        let snapshot = h.sim.snapshot();
        let summed: u64 = snapshot.servers.iter().map(|s| s.completed).sum();
        prop_assert_eq!(summed, snapshot.total_completed);
        prop_assert_eq!(summed, h.sim.completions());
        prop_assert!(summed <= clients as u64 * ticks);

        let max_latency = pool.iter().map(|c| c.latency).max().unwrap_or(1);
        if ticks >= max_latency && ticks > 0 {
            prop_assert!(summed < clients as u64 * ticks);
        }
    }

    #[test]
    fn prop_no_client_falls_behind_the_clock(
        clients in 1u32..20,
        pool in pool_strategy(),
        ticks in 1u64..200,
        seed in any::<u64>(),
    ) {
        let mut h = TestHarness::new_with_seed(clients, &pool, seed);
        h.run_checked(ticks);
        prop_assert_eq!(h.sim.time(), ticks);
        prop_assert_eq!(h.sim.in_flight(), clients as usize);
    }
}

#[test]
fn test_router_out_of_range_is_an_invariant_violation() {
    let mut sim = Simulation::new(3, &classes(&[(2, 1)]), FixedRouter(2)).unwrap();

    let err = sim.run(10).unwrap_err();
    match err {
        SimError::InvariantViolation { tick, client, .. } => {
            assert_eq!(tick, 1);
            assert_eq!(client, 0);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_next_free_tick_overflow_is_an_invariant_violation() {
    let mut sim = Simulation::new(1, &classes(&[(1, u64::MAX)]), FixedRouter(0)).unwrap();

    assert!(matches!(
        sim.step(),
        Err(SimError::InvariantViolation { tick: 1, .. })
    ));
}

#[test]
fn test_long_latency_leaves_clients_parked() {
    let mut h = TestHarness::with_router(4, &classes(&[(1, 1_000)]), FixedRouter(0));
    h.run_checked(999);
    assert_eq!(h.total(), 0);
    h.run_checked(2);
    // All four finish together at tick 1001.
    assert_eq!(h.completed(), vec![4]);
}
