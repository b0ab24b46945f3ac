//! Benchmarks for the per-cycle tracking path

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use hand_actuator::{
    actuator::GestureTracker,
    active_zone::ActiveZone,
    config::{Config, ZoneConfig},
    constants::NUM_HAND_LANDMARKS,
    cursor_control::{MouseButton, PointerDevice},
    filters::{hysteresis::HysteresisFilter, CursorFilter, NoFilter},
    gesture::classify,
    landmarks::{index, Handedness, Landmark, LandmarkSet},
    mapping::CoordinateMapper,
    Result,
};

struct NullPointer;

impl PointerDevice for NullPointer {
    fn move_to(&mut self, _x: i32, _y: i32) -> Result<()> {
        Ok(())
    }

    fn press(&mut self, _button: MouseButton) -> Result<()> {
        Ok(())
    }

    fn release(&mut self, _button: MouseButton) -> Result<()> {
        Ok(())
    }

    fn screen_size(&self) -> (u32, u32) {
        (1920, 1080)
    }
}

// Fingertip wandering along a circle with detector jitter
fn noisy_hands(count: usize) -> Vec<LandmarkSet> {
    (0..count)
        .map(|i| {
            let t = i as f32 * 0.05;
            let x = 0.5 + 0.2 * t.cos() + 0.01 * rand::random::<f32>();
            let y = 0.4 + 0.1 * t.sin() + 0.01 * rand::random::<f32>();

            let mut points = vec![Landmark::new(0.5, 0.5, 0.0); NUM_HAND_LANDMARKS];
            points[index::INDEX_FINGER_TIP] = Landmark::new(x, y, 0.0);
            points[index::INDEX_FINGER_MCP] = Landmark::new(x, y + 0.1, 0.0);
            points[index::THUMB_IP] = Landmark::new(0.4, 0.6, 0.0);
            // Fold the thumb every 50 frames
            let thumb_x = if (i / 50) % 2 == 0 { 0.45 } else { 0.35 };
            points[index::THUMB_TIP] = Landmark::new(thumb_x, 0.6, 0.0);
            LandmarkSet::new(points, Handedness::Left)
        })
        .collect()
}

fn benchmark_filters(c: &mut Criterion) {
    let mut group = c.benchmark_group("filters");

    let test_data: Vec<(f64, f64)> = (0..100)
        .map(|i| {
            let t = f64::from(i) * 0.1;
            let x = 960.0 + 400.0 * t.sin() + 5.0 * rand::random::<f64>();
            let y = 540.0 + 200.0 * t.cos() + 5.0 * rand::random::<f64>();
            (x, y)
        })
        .collect();

    let filters = vec![
        ("no_filter", Box::new(NoFilter) as Box<dyn CursorFilter>),
        ("hysteresis", Box::new(HysteresisFilter::new((960.0, 540.0), 6.0, 4.0, 10.0))),
        ("hysteresis_wide", Box::new(HysteresisFilter::new((960.0, 540.0), 6.0, 4.0, 50.0))),
    ];

    for (name, mut filter) in filters {
        group.bench_with_input(BenchmarkId::new("apply", name), &test_data, |b, data| {
            b.iter(|| {
                for &(x, y) in data {
                    black_box(filter.apply(black_box(x), black_box(y)));
                }
            });
        });
    }

    group.finish();
}

fn benchmark_mapping(c: &mut Criterion) {
    let zone = ActiveZone::from_fractions(640, 480, &ZoneConfig::default()).expect("valid zone");
    let mapper = CoordinateMapper::new(zone, 1920.0, 1080.0);

    c.bench_function("map_to_screen", |b| {
        b.iter(|| black_box(mapper.map(black_box(1000.0), black_box(500.0))));
    });
}

fn benchmark_tracker(c: &mut Criterion) {
    let hands = noisy_hands(200);
    let mut group = c.benchmark_group("tracker");

    group.bench_function("classify", |b| {
        b.iter(|| {
            for hand in &hands {
                black_box(classify(black_box(hand)).ok());
            }
        });
    });

    group.bench_function("process", |b| {
        let mut tracker = GestureTracker::new(&Config::default(), (1920, 1080)).expect("valid config");
        let mut pointer = NullPointer;
        b.iter(|| {
            for hand in &hands {
                black_box(tracker.process(Some(hand), &mut pointer));
            }
        });
    });

    group.finish();
}

criterion_group!(benches, benchmark_filters, benchmark_mapping, benchmark_tracker);
criterion_main!(benches);
