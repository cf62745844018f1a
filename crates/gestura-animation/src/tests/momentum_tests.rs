use super::*;

fn run_to_end(momentum: &mut MomentumAnimation, start: Millis) -> Vec<MomentumFrame> {
    let mut frames = Vec::new();
    let mut now = start;
    while let Some(frame) = momentum.on_frame(now) {
        frames.push(frame);
        now += 16;
        assert!(frames.len() < 10_000, "momentum never settled");
    }
    frames
}

#[test]
fn slow_release_does_not_coast() {
    let mut momentum = MomentumAnimation::default();
    assert!(!momentum.start(0, Point::new(0.02, 0.0)));
    assert!(!momentum.is_running());
    assert_eq!(momentum.on_frame(16), None);
}

#[test]
fn coasts_along_release_direction_and_slows_down() {
    let mut momentum = MomentumAnimation::default();
    assert!(momentum.start(1_000, Point::new(0.0, 2.0)));

    let frames = run_to_end(&mut momentum, 1_016);
    assert!(frames.len() > 2);
    assert!(frames.iter().all(|f| f.delta.x == 0.0 && f.delta.y >= 0.0));
    assert!(frames
        .windows(2)
        .all(|w| w[1].velocity.y <= w[0].velocity.y));
    let last = frames[frames.len() - 1];
    assert!(last.finished);
    assert!(!momentum.is_running());

    let travelled: f32 = frames.iter().map(|f| f.delta.y).sum();
    assert!((travelled - last.offset.y).abs() < 1e-2);
    let target = momentum.spec().target_value(0.0, 2000.0);
    assert!((target - last.offset.y).abs() < 5.0);
}

#[test]
fn cancel_is_idempotent() {
    let mut momentum = MomentumAnimation::default();
    momentum.start(0, Point::new(1.0, 1.0));
    assert!(momentum.cancel());
    assert!(!momentum.cancel());
    assert_eq!(momentum.on_frame(16), None);
}

#[test]
fn restart_replaces_running_continuation() {
    let mut momentum = MomentumAnimation::default();
    momentum.start(0, Point::new(1.0, 0.0));
    momentum.on_frame(16);
    assert!(momentum.start(100, Point::new(-1.0, 0.0)));

    let frame = momentum.on_frame(116).expect("running");
    assert!(frame.delta.x < 0.0);
    assert!(frame.offset.x < 0.0);
}

#[test]
fn late_frame_jumps_straight_to_rest() {
    let mut momentum = MomentumAnimation::default();
    momentum.start(0, Point::new(1.5, 0.0));
    let frame = momentum.on_frame(60_000).expect("running");
    assert!(frame.finished);
    assert!(frame.velocity.x.abs() * 1000.0 <= ExponentialDecaySpec::DEFAULT_VELOCITY_THRESHOLD + 0.01);
}
