//! Criterion benchmarks for ConfigStore serialize / deserialize.
//!
//! The interesting case is a config carrying embedded images, where the
//! data URIs dominate the size of the JSON text.
//!
//! Run with:
//! ```bash
//! cargo bench --package widget-core --bench store_bench
//! ```

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use widget_core::{domain::image::data_uri, ChatWidgetConfig, ConfigStore, FieldKey};

// ── Fixture builders ──────────────────────────────────────────────────────────

/// A config whose two image fields embed `image_bytes` bytes each.
fn store_with_images(image_bytes: usize) -> ConfigStore {
    let payload = vec![0xA5u8; image_bytes];
    let config = ChatWidgetConfig::default()
        .with_field(FieldKey::AvatarImage, data_uri("image/png", &payload))
        .with_field(FieldKey::LauncherImage, data_uri("image/png", &payload));
    ConfigStore::with_config(config)
}

// ── Benchmarks ────────────────────────────────────────────────────────────────

fn bench_serialize(c: &mut Criterion) {
    let mut group = c.benchmark_group("serialize");
    for size in [0usize, 16 * 1024, 512 * 1024] {
        let store = store_with_images(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &store, |b, store| {
            b.iter(|| black_box(store.serialize()))
        });
    }
    group.finish();
}

fn bench_deserialize(c: &mut Criterion) {
    let mut group = c.benchmark_group("deserialize");
    for size in [0usize, 16 * 1024, 512 * 1024] {
        let text = store_with_images(size).serialize();
        group.bench_with_input(BenchmarkId::from_parameter(size), &text, |b, text| {
            b.iter(|| {
                let mut store = ConfigStore::new();
                black_box(store.deserialize(black_box(text)).expect("valid config"))
            })
        });
    }
    group.finish();
}

fn bench_patch_field(c: &mut Criterion) {
    c.bench_function("patch_field/botName", |b| {
        let mut store = ConfigStore::new();
        b.iter(|| black_box(store.patch_field(black_box("botName"), "Helper").expect("known key")))
    });
}

criterion_group!(benches, bench_serialize, bench_deserialize, bench_patch_field);
criterion_main!(benches);
