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
use anyhow::{ensure, Context, Result};
use image::imageops::FilterType;
use image::{ExtendedColorType, GrayImage, Rgb, RgbImage};
use rand::Rng;
use std::path::Path;
use tracing::{error, info};
use yuyv_probe::{yuyv_effective_width, Roi, YuvGrayImageMut, YuvPackedImage, Yuy2Description};

const DISC_RADIUS: i64 = 100;
const DISC_COLOR: Rgb<u8> = Rgb([255, 0, 0]);

/// Reads `path` as RGB, falls back to [`synthesize`] when it can't be read.
pub(crate) fn load_or_synthesize(path: &Path, synth_size: u32) -> RgbImage {
    match image::open(path) {
        Ok(img) => {
            info!("Loaded {} ({}x{})", path.display(), img.width(), img.height());
            img.to_rgb8()
        }
        Err(err) => {
            error!("Failed to read {}: {}", path.display(), err);
            info!("Generating a {synth_size}x{synth_size} test image");
            synthesize(synth_size)
        }
    }
}

/// Uniform noise with a filled red disc in the centre.
pub(crate) fn synthesize(size: u32) -> RgbImage {
    let mut rng = rand::rng();
    let mut img = RgbImage::from_fn(size, size, |_, _| {
        Rgb([
            rng.random_range(0..255),
            rng.random_range(0..255),
            rng.random_range(0..255),
        ])
    });
    let center = size as i64 / 2;
    for y in (center - DISC_RADIUS).max(0)..(center + DISC_RADIUS + 1).min(size as i64) {
        for x in (center - DISC_RADIUS).max(0)..(center + DISC_RADIUS + 1).min(size as i64) {
            let (dx, dy) = (x - center, y - center);
            if dx * dx + dy * dy <= DISC_RADIUS * DISC_RADIUS {
                img.put_pixel(x as u32, y as u32, DISC_COLOR);
            }
        }
    }
    img
}

/// Smallest even width and height holding every ROI plus one macropixel past it.
pub(crate) fn required_extent(rois: &[Roi]) -> Result<(u32, u32)> {
    let width = rois.iter().map(|roi| (roi.right() + 2) & !1).max().unwrap_or(0);
    let height = rois.iter().map(|roi| (roi.bottom() + 2) & !1).max().unwrap_or(0);
    Ok((
        u32::try_from(width).context("ROI extends past u32 pixels")?,
        u32::try_from(height).context("ROI extends past u32 pixels")?,
    ))
}

/// Returns `img` unchanged when its packed encoding holds every ROI, otherwise
/// resizes it to the smallest even square that does, no smaller than `min_size`.
pub(crate) fn fit_to_rois(img: RgbImage, rois: &[Roi], min_size: u32) -> Result<RgbImage> {
    let (need_width, need_height) = required_extent(rois)?;
    if yuyv_effective_width(img.width()) >= need_width && img.height() >= need_height {
        return Ok(img);
    }
    let side = need_width
        .max(need_height)
        .max(min_size.checked_add(1).context("Minimum size overflow")? & !1);
    info!(
        "Resizing {}x{} to {side}x{side} to hold every crop",
        img.width(),
        img.height()
    );
    Ok(image::imageops::resize(&img, side, side, FilterType::Triangle))
}

/// Writes a compact gray plane, the format follows the extension of `path`.
pub(crate) fn save_gray(path: &Path, plane: YuvGrayImageMut<u8>) -> Result<()> {
    ensure!(
        plane.y_stride == plane.width,
        "Gray plane must be compact to be saved"
    );
    let (width, height) = (plane.width, plane.height);
    let img = GrayImage::from_raw(width, height, plane.into_vec())
        .context("Gray plane is shorter than its dimensions")?;
    img.save(path)
        .with_context(|| format!("Failed to write {}", path.display()))
}

pub(crate) fn save_rgb(path: &Path, rgb: &[u8], width: u32, height: u32) -> Result<()> {
    image::save_buffer(path, rgb, width, height, ExtendedColorType::Rgb8)
        .with_context(|| format!("Failed to write {}", path.display()))
}

/// Formats the first `count` macropixels of the top row, labelled with `order`.
pub(crate) fn describe_macropixels(
    packed: &YuvPackedImage<u8>,
    order: Yuy2Description,
    count: usize,
) -> String {
    let row_elements = packed.width as usize * 2;
    let row = &packed.yuy[..row_elements.min(packed.yuy.len())];
    row.chunks_exact(4)
        .take(count)
        .map(|macropixel| {
            let fields = macropixel
                .iter()
                .enumerate()
                .map(|(position, value)| {
                    let label = if position == order.get_u_position() {
                        "U"
                    } else if position == order.get_v_position() {
                        "V"
                    } else if position == order.get_first_y_position() {
                        "Y0"
                    } else {
                        "Y1"
                    };
                    format!("{label}={value}")
                })
                .collect::<Vec<_>>();
            format!("[{}]", fields.join(" "))
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_extent_keeps_a_spare_macropixel() {
        let rois = [
            Roi::new(2000, 2000, 1000, 1000),
            Roi::new(2001, 2001, 1001, 1001),
        ];
        assert_eq!(required_extent(&rois).unwrap(), (3004, 3004));
        assert_eq!(required_extent(&[Roi::new(0, 0, 4, 3)]).unwrap(), (6, 4));
        assert_eq!(required_extent(&[]).unwrap(), (0, 0));
    }

    #[test]
    fn test_fit_keeps_large_enough_images() {
        let img = RgbImage::new(12, 9);
        let fitted = fit_to_rois(img, &[Roi::new(1, 1, 5, 5)], 4).unwrap();
        assert_eq!(fitted.dimensions(), (12, 9));
    }

    #[test]
    fn test_fit_resizes_to_even_square() {
        let img = RgbImage::new(9, 9);
        let fitted = fit_to_rois(img, &[Roi::new(3, 3, 5, 5)], 4).unwrap();
        assert_eq!(fitted.dimensions(), (10, 10));
        let img = RgbImage::new(9, 9);
        let fitted = fit_to_rois(img, &[Roi::new(3, 3, 5, 5)], 13).unwrap();
        assert_eq!(fitted.dimensions(), (14, 14));
    }

    #[test]
    fn test_synthesized_disc_is_red() {
        let img = synthesize(300);
        assert_eq!(img.dimensions(), (300, 300));
        assert_eq!(*img.get_pixel(150, 150), DISC_COLOR);
        assert_eq!(*img.get_pixel(150, 51), DISC_COLOR);
        assert_eq!(*img.get_pixel(249, 150), DISC_COLOR);
        assert!(img.pixels().all(|px| px.0.iter().all(|&c| c < 255) || *px == DISC_COLOR));
    }

    #[test]
    fn test_save_gray_writes_plane() {
        let mut plane = YuvGrayImageMut::<u8>::alloc(3, 2);
        plane
            .y_plane
            .borrow_mut()
            .copy_from_slice(&[16, 40, 80, 120, 200, 235]);
        let path = std::env::temp_dir().join(format!("yuyv_probe_gray_{}.png", std::process::id()));
        save_gray(&path, plane).unwrap();
        let written = image::open(&path).unwrap().to_luma8();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(written.dimensions(), (3, 2));
        assert_eq!(written.as_raw(), &vec![16, 40, 80, 120, 200, 235]);
    }

    #[test]
    fn test_save_gray_rejects_padded_plane() {
        let plane = YuvGrayImageMut {
            y_plane: yuyv_probe::BufferStoreMut::Owned(vec![0u8; 8]),
            y_stride: 4,
            width: 3,
            height: 2,
        };
        let path = std::env::temp_dir().join("yuyv_probe_padded.png");
        assert!(save_gray(&path, plane).is_err());
    }

    #[test]
    fn test_describe_labels_by_order() {
        let data = [82u8, 165, 41, 175, 16, 128, 16, 128];
        let packed = YuvPackedImage {
            yuy: &data,
            yuy_stride: 8,
            width: 4,
            height: 1,
        };
        assert_eq!(
            describe_macropixels(&packed, Yuy2Description::YUYV, 1),
            "[Y0=82 U=165 Y1=41 V=175]"
        );
        assert_eq!(
            describe_macropixels(&packed, Yuy2Description::YVYU, 2),
            "[Y0=82 V=165 Y1=41 U=175] [Y0=16 V=128 Y1=16 U=128]"
        );
    }
}
