use std::hint::black_box;
use std::sync::Arc;

use criterion::{Criterion, criterion_group, criterion_main};
use ra_ascii::animation::FrameGenerator;
use ra_ascii::compositor::Compositor;
use ra_ascii::shimmer::Shimmer;
use ra_core::animation::AnimationSpec;
use ra_core::charset::Charset;
use ra_core::frame::FrameBuffer;

fn synthetic_frame(width: u32, height: u32) -> FrameBuffer {
    let mut data = Vec::with_capacity((width * height * 4) as usize);
    for y in 0..height {
        for x in 0..width {
            data.extend_from_slice(&[(x % 256) as u8, (y % 256) as u8, ((x ^ y) % 256) as u8, 255]);
        }
    }
    FrameBuffer::from_rgba(width, height, data).unwrap_or_else(|e| panic!("{e}"))
}

fn bench_compositor(c: &mut Criterion) {
    let frame = synthetic_frame(1920, 1080);
    let compositor = Compositor::new(Charset::default());

    c.bench_function("resample_1080p_to_160x45", |b| {
        b.iter(|| compositor.sample(black_box(&frame), 160, 45));
    });

    let samples = compositor
        .sample(&frame, 160, 45)
        .unwrap_or_else(|e| panic!("{e}"));
    let dithered = compositor.clone().with_dither(true);
    c.bench_function("render_dithered_160x45", |b| {
        b.iter(|| dithered.render(black_box(&samples)));
    });

    let spec = AnimationSpec::new(30, 10.0).unwrap_or_else(|e| panic!("{e}"));
    let generator = FrameGenerator::new(dithered, Arc::new(samples), spec, Shimmer::default());
    c.bench_function("shimmer_frame_160x45", |b| {
        b.iter(|| generator.frame(black_box(17)));
    });
}

criterion_group!(benches, bench_compositor);
criterion_main!(benches);
