//! Interval mutation against a live scan schedule.
//!
//! The elapsed-since-last-fire clock resets to zero whenever a scan
//! runs, so these tests read it to tell whether a step fired a scan.
use std::time::Duration;

use bevy::prelude::*;
use sightline::{sense_scan_system, LineOfSightQuery, Seeker, Wanted, MIN_RESCHEDULE_DELAY};

fn scan_app() -> App {
    let mut app = App::new();
    app.insert_resource(Time::<()>::default());
    app.init_resource::<LineOfSightQuery>();
    app.add_systems(Update, sense_scan_system);
    app
}

fn step(app: &mut App, seconds: f32) {
    app.world_mut()
        .resource_mut::<Time>()
        .advance_by(Duration::from_secs_f32(seconds));
    app.update();
}

fn spawn_watched_seeker(app: &mut App) -> Entity {
    let mut seeker = Seeker::with_seed(3);
    seeker.set_max_seek_distance(100.0);
    let seeker = app
        .world_mut()
        .spawn((Transform::from_translation(Vec3::ZERO), seeker))
        .id();
    app.world_mut()
        .spawn((Transform::from_xyz(10.0, 0.0, 0.0), Wanted::new()));
    seeker
}

fn elapsed_since_last_scan(app: &App, seeker: Entity) -> f32 {
    app.world()
        .get::<Seeker>(seeker)
        .unwrap()
        .timer()
        .elapsed_since_last_fire()
}

fn set_interval(app: &mut App, seeker: Entity, interval: f32) {
    app.world_mut()
        .get_mut::<Seeker>(seeker)
        .unwrap()
        .set_sensing_interval(interval);
}

#[test]
fn shrinking_the_interval_brings_the_next_scan_forward() {
    let mut app = scan_app();
    let seeker = spawn_watched_seeker(&mut app);

    app.update(); // initial scan, rearmed for the default 5s

    step(&mut app, 2.0);
    assert!(elapsed_since_last_scan(&app, seeker) > 0.0, "no scan expected yet");

    set_interval(&mut app, seeker, 3.0);

    // 2s already served against the new 3s interval: one more second.
    step(&mut app, 0.5);
    assert!(elapsed_since_last_scan(&app, seeker) > 0.0, "scan fired too early");
    step(&mut app, 0.6);
    assert_eq!(
        elapsed_since_last_scan(&app, seeker),
        0.0,
        "scan did not fire at the adjusted time"
    );
}

#[test]
fn overdue_interval_fires_on_the_following_tick() {
    let mut app = scan_app();
    let seeker = spawn_watched_seeker(&mut app);

    app.update();
    step(&mut app, 4.0); // 4s elapsed of the default 5s interval

    set_interval(&mut app, seeker, 2.0);

    // Rearmed with a minimal positive delay, not fired inline.
    assert!(app
        .world()
        .get::<Seeker>(seeker)
        .unwrap()
        .timer()
        .is_armed());
    assert!(elapsed_since_last_scan(&app, seeker) > 0.0);

    step(&mut app, MIN_RESCHEDULE_DELAY * 2.0);
    assert_eq!(
        elapsed_since_last_scan(&app, seeker),
        0.0,
        "overdue scan did not run on the following tick"
    );
}

#[test]
fn growing_the_interval_pushes_the_next_scan_out() {
    let mut app = scan_app();
    let seeker = spawn_watched_seeker(&mut app);

    app.update();
    step(&mut app, 1.0);

    set_interval(&mut app, seeker, 10.0);

    // The old deadline (5s after the last scan) passes without a scan.
    step(&mut app, 5.0);
    assert!(
        elapsed_since_last_scan(&app, seeker) > 0.0,
        "scan fired at the old deadline"
    );

    // The new deadline, 10s after the last scan, does fire.
    step(&mut app, 4.5);
    assert_eq!(elapsed_since_last_scan(&app, seeker), 0.0);
}
