//! End-to-end tests for the traffic light cycle loop.
//!
//! Timing-sensitive tests run under tokio's paused clock, so the random
//! 4-6 second dwells elapse instantly and deterministically.

use ampel::prelude::*;
use std::time::Duration;
use tokio::time::Instant;

fn default_light() -> TrafficLight {
    TrafficLight::new(CyclerConfig::default()).expect("default config should be valid")
}

#[tokio::test]
async fn starts_in_red_before_any_transition() {
    let light = default_light();
    assert_eq!(light.current_phase(), Phase::Red);
}

#[tokio::test]
async fn honors_a_custom_initial_phase() {
    let config = CyclerConfig {
        initial_phase: Phase::Green,
        ..Default::default()
    };
    let light = TrafficLight::new(config).expect("config should be valid");
    assert_eq!(light.current_phase(), Phase::Green);
}

#[tokio::test]
async fn second_simulate_call_fails_fast() {
    let light = default_light();
    light.simulate().await.expect("first call should succeed");
    assert!(light.simulate().await.is_err());

    // The guard is shared across clones of the same logical light.
    assert!(light.clone().simulate().await.is_err());

    light.shutdown().await.expect("shutdown should succeed");
}

#[tokio::test(start_paused = true)]
async fn delivered_phases_strictly_alternate() {
    let light = default_light();
    let mut phases = light.subscribe_phases();
    light.simulate().await.expect("simulate should succeed");

    let mut previous = Phase::Red;
    for expected_cycle in 1..=6u64 {
        let event = phases.recv().await.expect("stream should stay open");
        assert_eq!(event.phase, previous.toggled(), "no two consecutive equal phases");
        assert_eq!(event.cycle, expected_cycle);
        previous = event.phase;
    }

    light.shutdown().await.expect("shutdown should succeed");
}

#[tokio::test(start_paused = true)]
async fn every_dwell_falls_within_the_configured_range() {
    let light = default_light();
    let mut phases = light.subscribe_phases();
    let started = Instant::now();
    light.simulate().await.expect("simulate should succeed");

    let mut last_transition = started;
    for _ in 0..5 {
        let event = phases.recv().await.expect("stream should stay open");
        let dwell = event.at - last_transition;
        assert!(
            dwell >= Duration::from_millis(4_000) && dwell <= Duration::from_millis(6_000),
            "dwell {:?} outside [4s, 6s]",
            dwell
        );
        last_transition = event.at;
    }

    light.shutdown().await.expect("shutdown should succeed");
}

#[tokio::test(start_paused = true)]
async fn wait_for_green_returns_on_the_first_transition() {
    let light = default_light();
    light.simulate().await.expect("simulate should succeed");

    let started = Instant::now();
    light.wait_for_green().await;
    let elapsed = started.elapsed();

    assert!(
        elapsed >= Duration::from_millis(4_000) && elapsed <= Duration::from_millis(6_000),
        "first green after {:?}, expected within [4s, 6s]",
        elapsed
    );
    assert_eq!(light.current_phase(), Phase::Green);

    light.shutdown().await.expect("shutdown should succeed");
}

#[tokio::test(start_paused = true)]
async fn wait_for_phase_discards_non_matching_events() {
    // Starting from red, the first transition is green; waiting for red
    // must discard it and only return after the second transition.
    let light = default_light();
    light.simulate().await.expect("simulate should succeed");

    let started = Instant::now();
    light.wait_for_phase(Phase::Red).await;
    let elapsed = started.elapsed();

    assert!(
        elapsed >= Duration::from_millis(8_000) && elapsed <= Duration::from_millis(12_000),
        "red again after {:?}, expected two full dwells",
        elapsed
    );
    assert_eq!(light.current_phase(), Phase::Red);

    light.shutdown().await.expect("shutdown should succeed");
}

#[tokio::test(start_paused = true)]
async fn shutdown_stops_the_stream_and_is_idempotent() {
    let light = default_light();
    light.simulate().await.expect("simulate should succeed");
    light.wait_for_green().await;

    light.shutdown().await.expect("first shutdown should succeed");

    // A fresh subscriber sees no further transitions.
    let mut phases = light.subscribe_phases();
    let quiet = tokio::time::timeout(Duration::from_secs(30), phases.recv()).await;
    assert!(quiet.is_err(), "no transitions may arrive after shutdown");

    light.shutdown().await.expect("shutdown should be idempotent");
}
