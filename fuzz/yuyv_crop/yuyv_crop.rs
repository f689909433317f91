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

#![no_main]

use libfuzzer_sys::fuzz_target;
use yuyv_probe::{
    rgb_to_yuyv422_owned, yuy2_to_rgb, yuyv422_to_gray, Roi, YuvGrayImage, YuvGrayImageMut,
    YuvRange, YuvStandardMatrix, Yuy2Description,
};

fuzz_target!(|data: (u8, u8, u8, u8, u8, u8, u8)| {
    let roi = Roi::new(data.2 as u32, data.3 as u32, data.4 as u32, data.5 as u32);
    fuzz_crop(data.0, data.1, roi, data.6);
});

fn fuzz_crop(i_width: u8, i_height: u8, roi: Roi, seed: u8) {
    let width = i_width as u32;
    let height = i_height as u32;
    let src = (0..width as usize * height as usize * 3)
        .map(|i| (i as u8).wrapping_mul(31).wrapping_add(seed))
        .collect::<Vec<u8>>();
    let packed = rgb_to_yuyv422_owned(&src, width * 3, width, height).unwrap();
    let fixed = packed.to_fixed();

    let Ok(crop) = fixed.crop(roi) else {
        assert!(!roi.fits(fixed.width, fixed.height));
        return;
    };

    let mut gray = YuvGrayImageMut::<u8>::alloc(roi.width, roi.height);
    yuyv422_to_gray(&mut gray, &crop).unwrap();

    let compact = crop.to_compact().unwrap();
    assert_eq!(
        compact.yuy.borrow().len(),
        roi.width as usize * 2 * roi.height as usize
    );

    // May fail when an odd crop has no trailing macropixel, must not panic
    let mut rgb = vec![0u8; roi.width as usize * 3 * roi.height as usize];
    let order = roi.packed_order(Yuy2Description::YUYV);
    _ = yuy2_to_rgb(
        &crop,
        order,
        &mut rgb,
        roi.width * 3,
        YuvRange::Limited,
        YuvStandardMatrix::Bt601,
    );

    let plane = YuvGrayImage::reinterpret(fixed.yuy, fixed.width, fixed.height).unwrap();
    if let Ok(view) = plane.crop(roi) {
        let copy = view.to_compact().unwrap();
        assert_eq!(copy.y_plane.borrow().len(), roi.width as usize * roi.height as usize);
    }
}
