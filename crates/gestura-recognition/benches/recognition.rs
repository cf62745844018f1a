use gestura_foundation::{GestureConfig, RawInput};
use gestura_recognition::GestureRecognizer;
use gestura_testing::{contexts, InputScript};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

const DRAG_STEP_SAMPLES: &[u32] = &[10, 60, 240];
const SPREAD_STEPS: u32 = 60;

fn drag_inputs(steps: u32) -> Vec<RawInput> {
    let duration = steps as u64 * 16;
    InputScript::new()
        .drag(1, (0.0, 0.0), (600.0, 240.0), duration, steps)
        .build()
}

fn replay(recognizer: &mut GestureRecognizer, inputs: &[RawInput]) -> usize {
    inputs
        .iter()
        .map(|input| recognizer.process(input).len())
        .sum()
}

fn bench_single_drag(c: &mut Criterion) {
    let mut group = c.benchmark_group("recognition_drag");
    for &steps in DRAG_STEP_SAMPLES {
        let inputs = drag_inputs(steps);
        group.bench_with_input(BenchmarkId::new("samples", inputs.len()), &inputs, |b, inputs| {
            let mut recognizer =
                GestureRecognizer::new(GestureConfig::default(), contexts::touch_phone());
            b.iter(|| black_box(replay(&mut recognizer, inputs)));
        });
    }
    group.finish();
}

fn bench_two_finger_spread(c: &mut Criterion) {
    let inputs = InputScript::new()
        .spread((400.0, 400.0), 80.0, 400.0, SPREAD_STEPS as u64 * 16, SPREAD_STEPS)
        .build();
    let mut recognizer = GestureRecognizer::new(GestureConfig::default(), contexts::touch_phone());

    c.bench_function("recognition_spread", |b| {
        b.iter(|| black_box(replay(&mut recognizer, &inputs)));
    });
}

fn bench_wheel(c: &mut Criterion) {
    let inputs = InputScript::new().wheel(120.0, 400.0, 300.0).build();
    let mut recognizer = GestureRecognizer::new(GestureConfig::default(), contexts::desktop_mouse());

    c.bench_function("recognition_wheel", |b| {
        b.iter(|| black_box(replay(&mut recognizer, &inputs)));
    });
}

criterion_group!(
    recognition,
    bench_single_drag,
    bench_two_finger_spread,
    bench_wheel
);
criterion_main!(recognition);
