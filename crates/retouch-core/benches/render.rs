use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

use retouch_core::decode::DisplaySize;
use retouch_core::layer::Layer;
use retouch_core::render::render;
use retouch_core::settings::FilterSettings;
use retouch_core::surface::RasterSurface;

fn gradient(width: u32, height: u32) -> Layer {
    let mut layer = Layer::new(width, height);
    for y in 0..height {
        for x in 0..width {
            let r = x as f32 / width as f32;
            let g = y as f32 / height as f32;
            layer.put_pixel(x, y, [r, g, 0.5, 1.0]);
        }
    }
    layer
}

fn bench_render(c: &mut Criterion) {
    let image = gradient(700, 450);
    let display = DisplaySize {
        width: 700,
        height: 450,
    };
    let mut surface = RasterSurface::default();

    c.bench_function("render_identity_700x450", |b| {
        let settings = FilterSettings::default();
        b.iter(|| render(&mut surface, Some(&image), black_box(&settings), display).unwrap())
    });

    c.bench_function("render_all_filters_700x450", |b| {
        let settings = FilterSettings {
            brightness: 130,
            saturation: 60,
            inversion: 10,
            grayscale: 20,
            sepia: 30,
            blur: 4,
            rotate: 30,
            flip_x: -1,
            flip_y: 1,
        };
        b.iter(|| render(&mut surface, Some(&image), black_box(&settings), display).unwrap())
    });
}

criterion_group!(benches, bench_render);
criterion_main!(benches);
