use super::*;
use gestura_foundation::{GestureType, OverflowPolicy};
use crate::stats::Recommendation;
use gestura_testing::sample_event;

fn governor() -> PerformanceGovernor {
    PerformanceGovernor::new(PerformanceConfig::default())
}

fn feed_frames(governor: &mut PerformanceGovernor, frame_time: f32, count: usize) {
    for _ in 0..count {
        governor.record_frame_time(frame_time);
    }
}

fn delivered_types(drain: &Drain) -> Vec<GestureType> {
    drain.delivered.iter().map(|e| e.gesture_type()).collect()
}

#[test]
fn drains_everything_within_budget() {
    let mut governor = governor();
    governor.queue(sample_event(GestureType::Tap, 0));
    governor.queue(sample_event(GestureType::Pan, 5));

    let drain = governor.drain();
    assert!(!drain.conservative);
    assert_eq!(
        delivered_types(&drain),
        vec![GestureType::Tap, GestureType::Pan]
    );
    assert_eq!(governor.queued_len(), 0);
}

#[test]
fn over_budget_keeps_only_continuous_transforms() {
    let mut governor = governor();
    feed_frames(&mut governor, 25.0, 10);
    for (ty, ts) in [
        (GestureType::Tap, 0),
        (GestureType::Pan, 1),
        (GestureType::Swipe, 2),
        (GestureType::Pinch, 3),
        (GestureType::Rotate, 4),
        (GestureType::Hover, 5),
    ] {
        governor.queue(sample_event(ty, ts));
    }

    let drain = governor.drain();
    assert!(drain.conservative);
    assert_eq!(
        delivered_types(&drain),
        vec![GestureType::Pan, GestureType::Pinch, GestureType::Rotate]
    );
    assert_eq!(drain.discarded, 3);
    assert_eq!(governor.queued_len(), 0, "discarded events are not deferred");
    assert_eq!(governor.counters().discarded, 3);
}

#[test]
fn poll_drain_follows_throttle_interval() {
    let mut governor = governor();
    governor.queue(sample_event(GestureType::Pan, 0));
    assert_eq!(governor.poll_drain(0).map(|d| d.delivered.len()), Some(1));

    governor.queue(sample_event(GestureType::Pan, 100));
    assert!(governor.poll_drain(10).is_none());
    assert_eq!(governor.queued_len(), 1);
    assert_eq!(governor.poll_drain(16).map(|d| d.delivered.len()), Some(1));
}

#[test]
fn back_pressure_rejects_beyond_capacity() {
    let mut governor = governor();
    governor.update_config(&PerformanceConfigPatch {
        max_queue_size: Some(3),
        ..PerformanceConfigPatch::default()
    });
    let outcomes: Vec<_> = GestureType::ALL
        .iter()
        .take(5)
        .map(|&ty| governor.queue(sample_event(ty, 0)))
        .collect();

    assert_eq!(
        outcomes,
        vec![
            QueueOutcome::Enqueued,
            QueueOutcome::Enqueued,
            QueueOutcome::Enqueued,
            QueueOutcome::Rejected,
            QueueOutcome::Rejected,
        ]
    );
    assert_eq!(governor.queued_len(), 3);
}

#[test]
fn drop_oldest_policy_keeps_newest_events() {
    let mut governor = governor();
    governor.update_config(&PerformanceConfigPatch {
        max_queue_size: Some(2),
        overflow: Some(OverflowPolicy::DropOldest),
        ..PerformanceConfigPatch::default()
    });
    governor.queue(sample_event(GestureType::Tap, 0));
    governor.queue(sample_event(GestureType::Pan, 0));
    governor.queue(sample_event(GestureType::Pinch, 0));

    let drain = governor.drain();
    assert_eq!(
        delivered_types(&drain),
        vec![GestureType::Pan, GestureType::Pinch]
    );
    assert_eq!(governor.counters().evicted, 1);
}

#[test]
fn same_type_within_debounce_keeps_newer() {
    let mut governor = governor();
    governor.queue(sample_event(GestureType::Pan, 100));
    assert_eq!(
        governor.queue(sample_event(GestureType::Pan, 130)),
        QueueOutcome::Replaced
    );
    let drain = governor.drain();
    assert_eq!(drain.delivered.len(), 1);
    assert_eq!(drain.delivered[0].timestamp, 130);
}

#[test]
fn slow_frames_reduce_quality_once_per_crossing() {
    let mut governor = governor();
    feed_frames(&mut governor, 30.0, 20);

    let signals = governor.take_signals();
    assert_eq!(
        signals,
        vec![GovernorSignal::Quality {
            direction: QualityDirection::Reduce,
            average_frame_time: 30.0,
            tier: QualityTier::Medium,
        }]
    );
    assert_eq!(governor.config().quality, QualityTier::Medium);
    assert_eq!(
        QualityDirection::Reduce.suggestions()[0].as_str(),
        "reduce-shadow-quality"
    );
}

#[test]
fn fast_frames_raise_quality_after_recovering() {
    let mut governor = governor();
    feed_frames(&mut governor, 30.0, 1);
    feed_frames(&mut governor, 8.0, 60);

    let directions: Vec<_> = governor
        .take_signals()
        .into_iter()
        .filter_map(|signal| match signal {
            GovernorSignal::Quality { direction, .. } => Some(direction),
            _ => None,
        })
        .collect();
    assert_eq!(
        directions,
        vec![QualityDirection::Reduce, QualityDirection::Increase]
    );
    assert_eq!(governor.config().quality, QualityTier::High);
}

#[test]
fn fixed_quality_still_signals_renderer() {
    let mut governor = governor();
    governor.update_config(&PerformanceConfigPatch {
        adaptive_quality: Some(false),
        ..PerformanceConfigPatch::default()
    });
    feed_frames(&mut governor, 50.0, 3);

    assert!(matches!(
        governor.take_signals().as_slice(),
        [GovernorSignal::Quality {
            direction: QualityDirection::Reduce,
            tier: QualityTier::High,
            ..
        }]
    ));
    assert_eq!(governor.config().quality, QualityTier::High);
}

#[test]
fn frame_window_holds_sixty_samples() {
    let mut governor = governor();
    feed_frames(&mut governor, 100.0, 10);
    feed_frames(&mut governor, 16.0, 60);
    assert_eq!(governor.average_frame_time(), 16.0);
    assert_eq!(governor.frame_count(), 70);
}

#[test]
fn record_frame_needs_monitoring() {
    let mut governor = governor();
    governor.record_frame(0);
    governor.record_frame(16);
    assert_eq!(governor.frame_count(), 0);

    governor.start_monitoring(100);
    governor.record_frame(125);
    governor.record_frame(150);
    assert_eq!(governor.frame_count(), 2);
    assert_eq!(governor.average_frame_time(), 25.0);

    governor.stop_monitoring();
    governor.record_frame(175);
    assert_eq!(governor.frame_count(), 2);
}

#[test]
fn empty_history_reports_nominal_frame_time() {
    let governor = governor();
    assert!((governor.average_frame_time() - 16.666).abs() < 0.01);
    let stats = governor.stats(None);
    assert_eq!(stats.memory_usage, 0.0);
    assert!(stats.user_experience_score > 0.99);
}

#[test]
fn memory_high_water_trims_history() {
    let mut governor = governor();
    governor.update_config(&PerformanceConfigPatch {
        memory_limit_bytes: Some(1_000),
        ..PerformanceConfigPatch::default()
    });
    feed_frames(&mut governor, 16.0, 60);
    for i in 0..20 {
        governor.record_memory(100 + i, i);
    }
    governor.monitor_custom_metric("mesh-upload", 3.5, 0);
    assert!(governor.take_signals().is_empty());

    governor.record_memory(900, 42);
    assert_eq!(
        governor.take_signals(),
        vec![GovernorSignal::MemoryCleanup {
            timestamp: 42,
            used_bytes: 900,
        }]
    );
    let report = governor.export(42, Some(1.0));
    assert_eq!(report.frame_times.len(), 30);
    assert_eq!(report.memory_samples.len(), 10);
    assert_eq!(report.memory_samples.last(), Some(&900.0));
    assert!(report.custom_metrics.is_empty());
}

#[test]
fn device_preset_reconfigures_queue_and_tick() {
    let mut governor = governor();
    governor.apply_device_preset(DeviceTier::MobileLowEnd);
    assert_eq!(governor.config().max_queue_size, 5);

    for ty in GestureType::ALL {
        governor.queue(sample_event(ty, 0));
    }
    assert_eq!(governor.queued_len(), 5);

    assert!(governor.poll_drain(0).is_some());
    assert!(governor.poll_drain(49).is_none());
    assert!(governor.poll_drain(50).is_some());
}

#[test]
fn performance_level_changes_debounce_window() {
    let mut governor = governor();
    governor.adjust_for_performance_level(PerformanceLevel::Low);
    assert_eq!(governor.config().debounce_ms, 100);

    governor.queue(sample_event(GestureType::Pan, 0));
    assert_eq!(
        governor.queue(sample_event(GestureType::Pan, 80)),
        QueueOutcome::Replaced
    );
}

#[test]
fn invalid_patch_leaves_config_untouched() {
    let mut governor = governor();
    let err = governor
        .try_update_config(&PerformanceConfigPatch {
            throttle_ms: Some(0),
            debounce_ms: Some(5),
            ..PerformanceConfigPatch::default()
        })
        .unwrap_err();
    assert_eq!(err, ConfigError::Zero { field: "throttle_ms" });
    assert_eq!(governor.config().debounce_ms, 50);
}

#[test]
fn custom_metrics_keep_last_hundred() {
    let mut governor = governor();
    for i in 0..120 {
        governor.monitor_custom_metric("draw-calls", i as f64, i);
    }
    let values: Vec<f64> = governor.custom_metrics().map(|m| m.value).collect();
    assert_eq!(values.len(), 100);
    assert_eq!(values[0], 20.0);
}

#[test]
fn recommendations_follow_stats() {
    let mut governor = governor();
    feed_frames(&mut governor, 40.0, 10);
    let stats = governor.stats(Some(1.0));
    let recommendations = stats.recommendations();
    assert!(recommendations.contains(&Recommendation::LowerRenderQuality));
    assert!(recommendations.contains(&Recommendation::TuneGestureSensitivity));
    assert!(!recommendations.contains(&Recommendation::FreeMemory));
}

#[test]
fn dispose_clears_queue_and_history() {
    let mut governor = governor();
    governor.start_monitoring(0);
    governor.queue(sample_event(GestureType::Tap, 0));
    feed_frames(&mut governor, 30.0, 5);
    governor.dispose();

    assert!(!governor.is_monitoring());
    assert_eq!(governor.queued_len(), 0);
    assert!(governor.take_signals().is_empty());
    assert_eq!(governor.frame_count(), 0);
    governor.dispose();
}
