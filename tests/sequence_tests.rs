//! Integration tests for the climate sequence state machine.

use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::Duration;

use climate_button::daemon::run_guarded;
use climate_button::vehicle::{MockVehicle, ShiftState};
use climate_button::{ClimateSequence, SequenceOutcome, SingleFlight};

fn sequence_over(vehicle: &Arc<MockVehicle>, wait_secs: u64) -> ClimateSequence<MockVehicle> {
    ClimateSequence::new(Arc::clone(vehicle), Duration::from_secs(wait_secs))
}

// ============================================================================
// Operation Ordering
// ============================================================================

#[tokio::test(start_paused = true)]
async fn sleeping_car_is_woken_before_climate_starts() {
    let vehicle = Arc::new(MockVehicle::new()); // asleep, parked
    let outcome = sequence_over(&vehicle, 5).run().await.unwrap();

    assert_eq!(outcome, SequenceOutcome::ClimateTurnedOff);
    assert_eq!(
        vehicle.operations(),
        vec![
            "is_awake",
            "wake_up",
            "start_climate_control",
            "get_state",
            "stop_climate_control",
        ]
    );
}

#[tokio::test(start_paused = true)]
async fn awake_car_is_not_woken() {
    let vehicle = Arc::new(MockVehicle::new().with_awake(true));
    sequence_over(&vehicle, 5).run().await.unwrap();

    assert_eq!(vehicle.wake_calls.load(Ordering::SeqCst), 0);
    assert_eq!(
        vehicle.operations(),
        vec![
            "is_awake",
            "start_climate_control",
            "get_state",
            "stop_climate_control",
        ]
    );
}

#[tokio::test(start_paused = true)]
async fn wait_elapses_before_the_decision_check() {
    let vehicle = Arc::new(MockVehicle::new());
    let sequence = sequence_over(&vehicle, 5);

    let started = tokio::time::Instant::now();
    sequence.run().await.unwrap();

    assert!(started.elapsed() >= Duration::from_secs(5));
}

#[tokio::test(start_paused = true)]
async fn zero_wait_proceeds_straight_to_the_decision() {
    let vehicle = Arc::new(MockVehicle::new());
    let outcome = sequence_over(&vehicle, 0).run().await.unwrap();
    assert_eq!(outcome, SequenceOutcome::ClimateTurnedOff);
}

// ============================================================================
// Decision Branches
// ============================================================================

#[tokio::test(start_paused = true)]
async fn driving_car_keeps_climate_on() {
    let vehicle = Arc::new(
        MockVehicle::new()
            .with_awake(true)
            .with_shift_state(Some(ShiftState::Drive)),
    );
    let outcome = sequence_over(&vehicle, 5).run().await.unwrap();

    assert_eq!(outcome, SequenceOutcome::ClimateLeftOn);
    assert_eq!(vehicle.stop_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test(start_paused = true)]
async fn parked_car_gets_exactly_one_stop() {
    let vehicle = Arc::new(MockVehicle::new().with_awake(true)); // shift_state: null
    let outcome = sequence_over(&vehicle, 5).run().await.unwrap();

    assert_eq!(outcome, SequenceOutcome::ClimateTurnedOff);
    assert_eq!(vehicle.stop_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test(start_paused = true)]
async fn unknown_gear_stops_climate() {
    let vehicle = Arc::new(
        MockVehicle::new()
            .with_awake(true)
            .with_shift_state(Some(ShiftState::Other("S".to_string()))),
    );
    let outcome = sequence_over(&vehicle, 5).run().await.unwrap();

    assert_eq!(outcome, SequenceOutcome::ClimateTurnedOff);
    assert_eq!(vehicle.stop_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test(start_paused = true)]
async fn malformed_state_stops_climate() {
    let vehicle = Arc::new(MockVehicle::new().with_awake(true).with_malformed_state());
    let outcome = sequence_over(&vehicle, 5).run().await.unwrap();

    assert_eq!(outcome, SequenceOutcome::ClimateTurnedOff);
    assert_eq!(vehicle.stop_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test(start_paused = true)]
async fn state_fetch_error_propagates_without_a_stop_command() {
    let vehicle = Arc::new(MockVehicle::new().with_get_state_failure());
    let result = sequence_over(&vehicle, 5).run().await;

    assert!(result.is_err());
    assert_eq!(vehicle.start_calls.load(Ordering::SeqCst), 1);
    assert_eq!(vehicle.stop_calls.load(Ordering::SeqCst), 0);
}

// ============================================================================
// Slot Release On Every Terminal Branch
// ============================================================================

#[tokio::test(start_paused = true)]
async fn slot_is_free_after_every_terminal_branch() {
    let kept = Arc::new(
        MockVehicle::new()
            .with_awake(true)
            .with_shift_state(Some(ShiftState::Drive)),
    );
    let stopped = Arc::new(MockVehicle::new().with_awake(true));
    let failed = Arc::new(MockVehicle::new().with_get_state_failure());

    for vehicle in [kept, stopped, failed] {
        let flights = SingleFlight::new();
        let sequence = sequence_over(&vehicle, 5);

        let _ = run_guarded(&flights, &sequence).await;

        assert!(
            flights.try_begin().is_some(),
            "slot still held after a terminal branch"
        );
    }
}

#[tokio::test(start_paused = true)]
async fn failed_run_does_not_poison_the_next_one() {
    let flights = SingleFlight::new();

    let failing = Arc::new(MockVehicle::new().with_get_state_failure());
    let result = run_guarded(&flights, &sequence_over(&failing, 5)).await;
    assert!(matches!(result, Some(Err(_))));

    let healthy = Arc::new(MockVehicle::new());
    let result = run_guarded(&flights, &sequence_over(&healthy, 5)).await;
    assert!(matches!(result, Some(Ok(SequenceOutcome::ClimateTurnedOff))));
}
