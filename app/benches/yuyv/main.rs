/*
 * Copyright (c) Radzivon Bartoshyk, 11/2024. All rights reserved.
 *
 * Redistribution and use in source and binary forms, with or without modification,
 * are permitted provided that the following conditions are met:
 *
 * 1.  Redistributions of source code must retain the above copyright notice, this
 * list of conditions and the following disclaimer.
 *
 * 2.  Redistributions in binary form must reproduce the above copyright notice,
 * this list of conditions and the following disclaimer in the documentation
 * and/or other materials provided with the distribution.
 *
 * 3.  Neither the name of the copyright holder nor the names of its
 * contributors may be used to endorse or promote products derived from
 * this software without specific prior written permission.
 *
 * THIS SOFTWARE IS PROVIDED BY THE COPYRIGHT HOLDERS AND CONTRIBUTORS "AS IS"
 * AND ANY EXPRESS OR IMPLIED WARRANTIES, INCLUDING, BUT NOT LIMITED TO, THE
 * IMPLIED WARRANTIES OF MERCHANTABILITY AND FITNESS FOR A PARTICULAR PURPOSE ARE
 * DISCLAIMED. IN NO EVENT SHALL THE COPYRIGHT HOLDER OR CONTRIBUTORS BE LIABLE
 * FOR ANY DIRECT, INDIRECT, INCIDENTAL, SPECIAL, EXEMPLARY, OR CONSEQUENTIAL
 * DAMAGES (INCLUDING, BUT NOT LIMITED TO, PROCUREMENT OF SUBSTITUTE GOODS OR
 * SERVICES; LOSS OF USE, DATA, OR PROFITS; OR BUSINESS INTERRUPTION) HOWEVER
 * CAUSED AND ON ANY THEORY OF LIABILITY, WHETHER IN CONTRACT, STRICT LIABILITY,
 * OR TORT (INCLUDING NEGLIGENCE OR OTHERWISE) ARISING IN ANY WAY OUT OF THE USE
 * OF THIS SOFTWARE, EVEN IF ADVISED OF THE POSSIBILITY OF SUCH DAMAGE.
 */
use criterion::{criterion_group, criterion_main, Criterion};
use rand::Rng;
use yuyv_probe::{
    rgb_to_yuyv422, rgba_to_yuyv422, yuyv422_to_gray, yuyv422_to_rgb, yvyu422_to_rgb, Roi,
    YuvGrayImageMut, YuvPackedImageMut, YuvRange, YuvStandardMatrix,
};

pub fn criterion_benchmark(c: &mut Criterion) {
    let width = 3000u32;
    let height = 3000u32;
    let mut rng = rand::rng();
    let src_bytes: Vec<u8> = (0..width as usize * height as usize * 4)
        .map(|_| rng.random::<u8>())
        .collect();

    let mut packed_image = YuvPackedImageMut::<u8>::alloc(width, height).unwrap();
    rgb_to_yuyv422(&mut packed_image, &src_bytes, width * 3).unwrap();
    let fixed_packed = packed_image.to_fixed();
    let odd_crop = fixed_packed.crop(Roi::new(1001, 1001, 1001, 1001)).unwrap();

    c.bench_function("yuyv RGB -> YUYV", |b| {
        let mut test_packed = YuvPackedImageMut::<u8>::alloc(width, height).unwrap();
        b.iter(|| {
            rgb_to_yuyv422(&mut test_packed, &src_bytes, width * 3).unwrap();
        })
    });

    c.bench_function("yuyv RGBA -> YUYV", |b| {
        let mut test_packed = YuvPackedImageMut::<u8>::alloc(width, height).unwrap();
        b.iter(|| {
            rgba_to_yuyv422(&mut test_packed, &src_bytes, width * 4).unwrap();
        })
    });

    c.bench_function("yuyv YUYV -> Gray", |b| {
        let mut gray_image = YuvGrayImageMut::<u8>::alloc(width, height);
        b.iter(|| {
            yuyv422_to_gray(&mut gray_image, &fixed_packed).unwrap();
        })
    });

    c.bench_function("yuyv YUYV -> RGB Limited", |b| {
        let mut rgb_bytes = vec![0u8; width as usize * 3 * height as usize];
        b.iter(|| {
            yuyv422_to_rgb(
                &fixed_packed,
                &mut rgb_bytes,
                width * 3,
                YuvRange::Limited,
                YuvStandardMatrix::Bt601,
            )
            .unwrap();
        })
    });

    c.bench_function("yuyv odd crop YVYU -> RGB Limited", |b| {
        let mut rgb_bytes = vec![0u8; odd_crop.width as usize * 3 * odd_crop.height as usize];
        b.iter(|| {
            yvyu422_to_rgb(
                &odd_crop,
                &mut rgb_bytes,
                odd_crop.width * 3,
                YuvRange::Limited,
                YuvStandardMatrix::Bt601,
            )
            .unwrap();
        })
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
