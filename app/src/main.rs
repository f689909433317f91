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
//! YUYV crop probe
//!
//! Encodes an RGB image to packed YUYV, then crops it at an even and at an odd
//! pixel offset and writes what each crop looks like when read back.
//!
//! ## Usage
//!
//! ```bash
//! # Probe a photo, results land in ./output
//! yuyv-probe-app image/DSC_0822.JPG
//!
//! # Other crops and output directory
//! YUYV_PROBE_ODD_ROI=11,11,101,101 YUYV_PROBE_OUTPUT=/tmp/probe yuyv-probe-app
//! ```
mod config;
mod support;

use anyhow::{Context, Result};
use config::Config;
use std::path::Path;
use tracing::{error, info, warn};
use yuyv_probe::{
    rgb_to_yuyv422_owned, yuy2_to_rgb, yuyv422_to_gray, Roi, YuvGrayImage, YuvGrayImageMut,
    YuvPackedImage, YuvRange, YuvStandardMatrix, Yuy2Description,
};

/// Byte order the encoder writes.
const PACKED_ORDER: Yuy2Description = Yuy2Description::YUYV;

fn crop_to_gray(packed: &YuvPackedImage<u8>, roi: Roi, path: &Path) -> Result<()> {
    let crop = packed.crop(roi)?;
    let mut gray = YuvGrayImageMut::<u8>::alloc(roi.width, roi.height);
    yuyv422_to_gray(&mut gray, &crop)?;
    support::save_gray(path, gray)
}

/// Decodes the crop as if it carried `order`.
fn crop_to_rgb(
    packed: &YuvPackedImage<u8>,
    roi: Roi,
    order: Yuy2Description,
    path: &Path,
) -> Result<()> {
    let crop = packed.crop(roi)?;
    let stride = roi.width * 3;
    let mut rgb = vec![0u8; stride as usize * roi.height as usize];
    yuy2_to_rgb(
        &crop,
        order,
        &mut rgb,
        stride,
        YuvRange::Limited,
        YuvStandardMatrix::Bt601,
    )?;
    support::save_rgb(path, &rgb, roi.width, roi.height)
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("yuyv_probe_app=info".parse()?),
        )
        .init();

    let config = Config::from_env()?;

    info!("YUYV probe starting");
    info!("  Input: {}", config.input.display());
    info!("  Output: {}", config.output_dir.display());
    info!("  Even ROI: {:?}", config.even_roi);
    info!("  Odd ROI: {:?}", config.odd_roi);

    std::fs::create_dir_all(&config.output_dir).with_context(|| {
        format!(
            "Failed to create output directory {}",
            config.output_dir.display()
        )
    })?;

    let rgb = support::load_or_synthesize(&config.input, config.synth_size);
    let rgb = support::fit_to_rois(rgb, &[config.even_roi, config.odd_roi], config.min_size)?;
    let (width, height) = rgb.dimensions();

    info!("Building the YUYV stream");
    let packed = rgb_to_yuyv422_owned(rgb.as_raw(), width * 3, width, height)
        .context("Failed to encode YUYV")?;
    drop(rgb);
    info!(
        "Packed source: {}x{}, 2 bytes per pixel, stride {}",
        packed.width, packed.height, packed.yuy_stride
    );
    let src = packed.to_fixed();

    // Step 1: crop on a macropixel boundary
    info!("Step 1: even crop {:?}", config.even_roi);
    let path = config.output_dir.join("result_even_crop.jpg");
    crop_to_gray(&src, config.even_roi, &path).context("Even crop failed")?;
    info!("Even crop saved: {}", path.display());

    // Step 2: crop splitting a macropixel, the only step allowed to fail
    info!("Step 2: odd crop {:?}", config.odd_roi);
    let path = config.output_dir.join("result_odd_crop.jpg");
    match crop_to_gray(&src, config.odd_roi, &path) {
        Ok(()) => {
            info!("Odd crop saved: {}", path.display());
            info!("No error was raised, the odd crop produced an image");
        }
        Err(err) => error!("Odd crop failed: {err:#}"),
    }

    // Odd crop decoded with the parent's byte order
    let odd_order = config.odd_roi.packed_order(PACKED_ORDER);
    if odd_order != PACKED_ORDER {
        warn!(
            "Odd crop reads as {:?} but is decoded as {:?}, expect swapped chroma",
            odd_order, PACKED_ORDER
        );
    }
    let path = config.output_dir.join("result_odd_crop_wrong_color.jpg");
    crop_to_rgb(&src, config.odd_roi, PACKED_ORDER, &path).context("Odd color crop failed")?;
    info!("Odd crop color saved: {}", path.display());

    // Step 3: the packed bytes taken as one byte per pixel
    info!("Step 3: packed data viewed as a {}x{} single channel plane", src.width, src.height);
    let plane = YuvGrayImage::reinterpret(src.yuy, src.width, src.height)?;
    let garbage = plane.crop(config.odd_roi)?.to_compact()?;
    let path = config.output_dir.join("result_wrong_format_garbage.jpg");
    support::save_gray(&path, garbage)?;
    info!("Wrong format crop saved: {}", path.display());

    // Control: even crop decoded in color
    let path = config.output_dir.join("result_even_crop_color.jpg");
    crop_to_rgb(&src, config.even_roi, PACKED_ORDER, &path).context("Even color crop failed")?;
    info!("Even crop color saved: {}", path.display());

    for (name, roi) in [("Even", config.even_roi), ("Odd", config.odd_roi)] {
        let crop = src.crop(roi)?;
        let order = roi.packed_order(PACKED_ORDER);
        info!(
            "{name} crop starts at x={} and reads as {:?}: {}",
            roi.x,
            order,
            support::describe_macropixels(&crop, order, 2)
        );
    }

    Ok(())
}
