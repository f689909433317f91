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
    bgr_to_yuyv422_owned, rgb_to_yuyv422_owned, rgba_to_yuyv422, yuyv_effective_width,
    YuvPackedImageMut,
};

fuzz_target!(|data: (u8, u8, u8, u8, u8)| {
    fuzz_rgb(data.0, data.1, data.2, data.3, data.4);
    fuzz_rgba_padded(data.0, data.1, data.2);
});

fn fuzz_rgb(i_width: u8, i_height: u8, r: u8, g: u8, b: u8) {
    let width = i_width as u32;
    let height = i_height as u32;
    let src = [r, g, b].repeat(width as usize * height as usize);

    let packed = rgb_to_yuyv422_owned(&src, width * 3, width, height).unwrap();
    assert_eq!(packed.width, yuyv_effective_width(width));
    let bytes = packed.yuy.borrow();
    assert_eq!(bytes.len(), packed.width as usize * 2 * height as usize);
    for macropixel in bytes.chunks_exact(4) {
        assert_eq!(macropixel, &bytes[..4]);
        assert_eq!(macropixel[0], macropixel[2]);
    }

    let bgr = [b, g, r].repeat(width as usize * height as usize);
    let packed_bgr = bgr_to_yuyv422_owned(&bgr, width * 3, width, height).unwrap();
    assert_eq!(packed_bgr.yuy.borrow(), bytes);
}

fn fuzz_rgba_padded(i_width: u8, i_height: u8, padding: u8) {
    let width = i_width as u32;
    let height = i_height as u32;
    let stride = width as usize * 4 + padding as usize;
    let src = vec![77u8; stride * height as usize];

    let mut packed = YuvPackedImageMut::<u8>::alloc(width, height).unwrap();
    rgba_to_yuyv422(&mut packed, &src, stride as u32).unwrap();

    // Shorter than the declared geometry
    if height > 0 && width > 0 && width % 2 == 0 {
        let short = &src[..src.len() - 1 - padding as usize];
        let mut packed = YuvPackedImageMut::<u8>::alloc(width, height).unwrap();
        assert!(rgba_to_yuyv422(&mut packed, short, stride as u32).is_err());
    }
}
