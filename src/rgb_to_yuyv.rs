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
use crate::yuv_error::{check_rgba_source, MismatchedSize};
use crate::yuv_support::YuvSourceChannels;
use crate::{yuyv_effective_width, YuvError, YuvPackedImageMut};
#[cfg(feature = "rayon")]
use rayon::iter::{IndexedParallelIterator, ParallelIterator};
#[cfg(feature = "rayon")]
use rayon::prelude::{ParallelSlice, ParallelSliceMut};

// Fixed point BT.601 with 8 fractional bits. The shifted value is truncated to
// 8 bits before the offset is added, and the addition wraps. Chroma sums lie in
// [-112, 112], so the wrapped result still equals `sum + 128`.

#[inline(always)]
pub(crate) const fn rgb_to_y(r: i32, g: i32, b: i32) -> u8 {
    (((66 * r + 129 * g + 25 * b + 128) >> 8) as u8).wrapping_add(16)
}

#[inline(always)]
pub(crate) const fn rgb_to_u(r: i32, g: i32, b: i32) -> u8 {
    (((-38 * r - 74 * g + 112 * b + 128) >> 8) as u8).wrapping_add(128)
}

#[inline(always)]
pub(crate) const fn rgb_to_v(r: i32, g: i32, b: i32) -> u8 {
    (((112 * r - 94 * g - 18 * b + 128) >> 8) as u8).wrapping_add(128)
}

#[inline(always)]
fn encode_row<const SOURCE_CHANNELS: u8>(src: &[u8], dst: &mut [u8]) {
    let source_channels: YuvSourceChannels = SOURCE_CHANNELS.into();
    let channels = source_channels.get_channels_count();

    for (pair, macropixel) in src
        .chunks_exact(channels * 2)
        .zip(dst.chunks_exact_mut(4))
    {
        let (p0, p1) = pair.split_at(channels);

        let r0 = p0[source_channels.get_r_channel_offset()] as i32;
        let g0 = p0[source_channels.get_g_channel_offset()] as i32;
        let b0 = p0[source_channels.get_b_channel_offset()] as i32;

        let r1 = p1[source_channels.get_r_channel_offset()] as i32;
        let g1 = p1[source_channels.get_g_channel_offset()] as i32;
        let b1 = p1[source_channels.get_b_channel_offset()] as i32;

        let u0 = rgb_to_u(r0, g0, b0) as u16;
        let v0 = rgb_to_v(r0, g0, b0) as u16;
        let u1 = rgb_to_u(r1, g1, b1) as u16;
        let v1 = rgb_to_v(r1, g1, b1) as u16;

        macropixel[0] = rgb_to_y(r0, g0, b0);
        macropixel[1] = ((u0 + u1) / 2) as u8;
        macropixel[2] = rgb_to_y(r1, g1, b1);
        macropixel[3] = ((v0 + v1) / 2) as u8;
    }
}

fn rgbx_to_yuyv_impl<const SOURCE_CHANNELS: u8>(
    packed_image: &mut YuvPackedImageMut<u8>,
    src: &[u8],
    src_stride: u32,
) -> Result<(), YuvError> {
    let source_channels: YuvSourceChannels = SOURCE_CHANNELS.into();
    let channels = source_channels.get_channels_count();

    packed_image.check_constraints()?;
    if packed_image.width & 1 != 0 {
        return Err(YuvError::DestinationSizeMismatch(MismatchedSize {
            expected: packed_image.width as usize & !1,
            received: packed_image.width as usize,
        }));
    }
    check_rgba_source(
        src,
        src_stride,
        packed_image.width,
        packed_image.height,
        channels,
    )?;

    let width = packed_image.width as usize;
    let height = packed_image.height as usize;
    if width == 0 || height == 0 {
        return Ok(());
    }

    let yuy_stride = packed_image.yuy_stride as usize;
    let src_row = width * channels;
    let dst_row = width * 2;

    let iter;
    #[cfg(feature = "rayon")]
    {
        iter = packed_image
            .yuy
            .borrow_mut()
            .par_chunks_mut(yuy_stride)
            .zip(src.par_chunks(src_stride as usize));
    }
    #[cfg(not(feature = "rayon"))]
    {
        iter = packed_image
            .yuy
            .borrow_mut()
            .chunks_mut(yuy_stride)
            .zip(src.chunks(src_stride as usize));
    }

    iter.take(height).for_each(|(dst, src)| {
        encode_row::<SOURCE_CHANNELS>(&src[..src_row], &mut dst[..dst_row]);
    });

    Ok(())
}

macro_rules! d_cnv {
    ($method: ident, $owned: ident, $px_fmt: expr, $px_fmt_name: expr) => {
        #[doc = concat!("Convert ", $px_fmt_name, " image data to YUYV (YUY2) packed 4:2:2 format.

The destination must be even wide, allocate it with [`YuvPackedImageMut::alloc`] to get the
truncated width of an odd source. Pixels are paired left to right, each pair stores both
luma samples and the floor average of their chroma as `Y0, U, Y1, V`.

# Arguments

* `packed_image` - Target packed image.
* `src` - Interleaved ", $px_fmt_name, " source.
* `src_stride` - Elements per row of the source.

# Errors

Returns an error when the source is shorter than its geometry or the destination is malformed.")]
        pub fn $method(
            packed_image: &mut YuvPackedImageMut<u8>,
            src: &[u8],
            src_stride: u32,
        ) -> Result<(), YuvError> {
            rgbx_to_yuyv_impl::<{ $px_fmt as u8 }>(packed_image, src, src_stride)
        }

        #[doc = concat!("Allocate and encode a `width` x `height` ", $px_fmt_name, " image as YUYV.

An odd width drops the last column, the returned image carries the truncated width.
The source is validated before anything is allocated.

# Errors

Returns an error when the source is shorter than its geometry or the packed row does not fit
a `u32` stride.")]
        pub fn $owned(
            src: &[u8],
            src_stride: u32,
            width: u32,
            height: u32,
        ) -> Result<YuvPackedImageMut<'static, u8>, YuvError> {
            check_rgba_source(
                src,
                src_stride,
                yuyv_effective_width(width),
                height,
                $px_fmt.get_channels_count(),
            )?;
            let mut packed_image = YuvPackedImageMut::<u8>::alloc(width, height)?;
            $method(&mut packed_image, src, src_stride)?;
            Ok(packed_image)
        }
    };
}

d_cnv!(
    rgb_to_yuyv422,
    rgb_to_yuyv422_owned,
    YuvSourceChannels::Rgb,
    "RGB"
);
d_cnv!(
    bgr_to_yuyv422,
    bgr_to_yuyv422_owned,
    YuvSourceChannels::Bgr,
    "BGR"
);
d_cnv!(
    rgba_to_yuyv422,
    rgba_to_yuyv422_owned,
    YuvSourceChannels::Rgba,
    "RGBA"
);
d_cnv!(
    bgra_to_yuyv422,
    bgra_to_yuyv422_owned,
    YuvSourceChannels::Bgra,
    "BGRA"
);

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    fn uniform_rgb(width: usize, height: usize, rgb: [u8; 3]) -> Vec<u8> {
        rgb.iter()
            .copied()
            .cycle()
            .take(width * height * 3)
            .collect()
    }

    fn random_rgb(width: usize, height: usize) -> Vec<u8> {
        let mut rng = rand::rng();
        (0..width * height * 3)
            .map(|_| rng.random_range(0..256) as u8)
            .collect()
    }

    #[test]
    fn test_even_width_length() {
        for (width, height) in [(0usize, 0usize), (2, 0), (0, 5), (2, 1), (16, 9), (640, 3)] {
            let src = random_rgb(width, height);
            let packed =
                rgb_to_yuyv422_owned(&src, width as u32 * 3, width as u32, height as u32)
                    .unwrap();
            assert_eq!(packed.width as usize, width);
            assert_eq!(packed.height as usize, height);
            assert_eq!(packed.yuy.borrow().len(), width * height * 2);
            assert_eq!(packed.yuy.borrow().len() % 4, 0);
        }
    }

    #[test]
    fn test_odd_width_truncates_last_column() {
        let width = 7usize;
        let height = 3usize;
        let mut src = random_rgb(width, height);
        let packed = rgb_to_yuyv422_owned(&src, 21, 7, 3).unwrap();
        assert_eq!(packed.width, 6);
        assert_eq!(packed.yuy.borrow().len(), 6 * 3 * 2);

        // The dropped column is never read.
        for y in 0..height {
            let last = y * width * 3 + (width - 1) * 3;
            src[last..last + 3].copy_from_slice(&[1, 2, 3]);
        }
        let again = rgb_to_yuyv422_owned(&src, 21, 7, 3).unwrap();
        assert_eq!(packed.yuy.borrow(), again.yuy.borrow());
    }

    #[test]
    fn test_width_one_is_empty() {
        for height in [0u32, 1, 17] {
            let src = vec![200u8; height as usize * 3];
            let packed = rgb_to_yuyv422_owned(&src, 3, 1, height).unwrap();
            assert_eq!(packed.width, 0);
            assert_eq!(packed.height, height);
            assert!(packed.yuy.borrow().is_empty());
        }
    }

    #[test]
    fn test_black_fixture() {
        let src = uniform_rgb(4, 2, [0, 0, 0]);
        let packed = rgb_to_yuyv422_owned(&src, 12, 4, 2).unwrap();
        assert_eq!(
            packed.yuy.borrow(),
            &[16, 128, 16, 128, 16, 128, 16, 128, 16, 128, 16, 128, 16, 128, 16, 128]
        );
    }

    #[test]
    fn test_primary_fixtures() {
        assert_eq!(
            (rgb_to_y(255, 255, 255), rgb_to_u(255, 255, 255), rgb_to_v(255, 255, 255)),
            (235, 128, 128)
        );
        assert_eq!(
            (rgb_to_y(255, 0, 0), rgb_to_u(255, 0, 0), rgb_to_v(255, 0, 0)),
            (82, 90, 240)
        );
        assert_eq!(
            (rgb_to_y(0, 255, 0), rgb_to_u(0, 255, 0), rgb_to_v(0, 255, 0)),
            (144, 54, 34)
        );
        assert_eq!(
            (rgb_to_y(0, 0, 255), rgb_to_u(0, 0, 255), rgb_to_v(0, 0, 255)),
            (41, 240, 110)
        );
    }

    #[test]
    fn test_wrapping_offset_is_preserved() {
        // Yellow: the chroma sum is -112, truncated to 144, plus 128 wraps to 16.
        let shifted = (-38 * 255 - 74 * 255 + 128) >> 8;
        assert_eq!(shifted, -112);
        assert_eq!(shifted as u8, 144);
        assert_eq!(rgb_to_u(255, 255, 0), 16);
        assert_eq!((144u8).wrapping_add(128), 16);
    }

    #[test]
    fn test_uniform_color_repeats() {
        let mut rng = rand::rng();
        let rgb = [
            rng.random_range(0..256) as u8,
            rng.random_range(0..256) as u8,
            rng.random_range(0..256) as u8,
        ];
        let src = uniform_rgb(32, 8, rgb);
        let packed = rgb_to_yuyv422_owned(&src, 32 * 3, 32, 8).unwrap();
        let bytes = packed.yuy.borrow();
        let first = &bytes[..4];
        assert_eq!(first[0], first[2]);
        for macropixel in bytes.chunks_exact(4) {
            assert_eq!(macropixel, first);
        }
        let (r, g, b) = (rgb[0] as i32, rgb[1] as i32, rgb[2] as i32);
        assert_eq!(first, &[rgb_to_y(r, g, b), rgb_to_u(r, g, b), rgb_to_y(r, g, b), rgb_to_v(r, g, b)]);
    }

    #[test]
    fn test_chroma_is_floor_averaged() {
        // Red next to blue: U (90 + 240) / 2, V (240 + 110) / 2.
        let src = [255u8, 0, 0, 0, 0, 255];
        let packed = rgb_to_yuyv422_owned(&src, 6, 2, 1).unwrap();
        assert_eq!(packed.yuy.borrow(), &[82, 165, 41, 175]);

        // Red next to green: U (90 + 54) / 2 = 72, V (240 + 34) / 2 = 137.
        let src = [255u8, 0, 0, 0, 255, 0];
        let packed = rgb_to_yuyv422_owned(&src, 6, 2, 1).unwrap();
        assert_eq!(packed.yuy.borrow(), &[82, 72, 144, 137]);

        // Odd sum: green next to black, V (34 + 128) / 2 = 81, U (54 + 128) / 2 = 91.
        let src = [0u8, 255, 0, 0, 0, 0];
        let packed = rgb_to_yuyv422_owned(&src, 6, 2, 1).unwrap();
        assert_eq!(packed.yuy.borrow(), &[144, 91, 16, 81]);
    }

    #[test]
    fn test_byte_layout_row_major() {
        let width = 6usize;
        let height = 4usize;
        let src = random_rgb(width, height);
        let packed = rgb_to_yuyv422_owned(&src, 18, 6, 4).unwrap();
        let bytes = packed.yuy.borrow();
        for y in 0..height {
            for x in (0..width).step_by(2) {
                let p0 = &src[(y * width + x) * 3..];
                let p1 = &src[(y * width + x + 1) * 3..];
                let (r0, g0, b0) = (p0[0] as i32, p0[1] as i32, p0[2] as i32);
                let (r1, g1, b1) = (p1[0] as i32, p1[1] as i32, p1[2] as i32);
                let at = y * width * 2 + x * 2;
                assert_eq!(bytes[at], rgb_to_y(r0, g0, b0));
                assert_eq!(
                    bytes[at + 1],
                    ((rgb_to_u(r0, g0, b0) as u16 + rgb_to_u(r1, g1, b1) as u16) / 2) as u8
                );
                assert_eq!(bytes[at + 2], rgb_to_y(r1, g1, b1));
                assert_eq!(
                    bytes[at + 3],
                    ((rgb_to_v(r0, g0, b0) as u16 + rgb_to_v(r1, g1, b1) as u16) / 2) as u8
                );
            }
        }
    }

    #[test]
    fn test_encoding_is_idempotent() {
        let src = random_rgb(64, 16);
        let first = rgb_to_yuyv422_owned(&src, 64 * 3, 64, 16).unwrap();
        let second = rgb_to_yuyv422_owned(&src, 64 * 3, 64, 16).unwrap();
        assert_eq!(first.yuy.borrow(), second.yuy.borrow());
    }

    #[test]
    fn test_channel_orders_agree() {
        let width = 10usize;
        let height = 5usize;
        let rgb = random_rgb(width, height);
        let bgr: Vec<u8> = rgb
            .chunks_exact(3)
            .flat_map(|px| [px[2], px[1], px[0]])
            .collect();
        let rgba: Vec<u8> = rgb
            .chunks_exact(3)
            .flat_map(|px| [px[0], px[1], px[2], 7])
            .collect();
        let bgra: Vec<u8> = rgb
            .chunks_exact(3)
            .flat_map(|px| [px[2], px[1], px[0], 250])
            .collect();

        let from_rgb = rgb_to_yuyv422_owned(&rgb, 30, 10, 5).unwrap();
        let from_bgr = bgr_to_yuyv422_owned(&bgr, 30, 10, 5).unwrap();
        let from_rgba = rgba_to_yuyv422_owned(&rgba, 40, 10, 5).unwrap();
        let from_bgra = bgra_to_yuyv422_owned(&bgra, 40, 10, 5).unwrap();
        assert_eq!(from_rgb.yuy.borrow(), from_bgr.yuy.borrow());
        assert_eq!(from_rgb.yuy.borrow(), from_rgba.yuy.borrow());
        assert_eq!(from_rgb.yuy.borrow(), from_bgra.yuy.borrow());
    }

    #[test]
    fn test_source_stride_padding_is_ignored() {
        let width = 4usize;
        let height = 3usize;
        let tight = random_rgb(width, height);
        let stride = width * 3 + 5;
        let mut padded = vec![0xAAu8; stride * (height - 1) + width * 3];
        for y in 0..height {
            padded[y * stride..y * stride + width * 3]
                .copy_from_slice(&tight[y * width * 3..(y + 1) * width * 3]);
        }
        let from_tight = rgb_to_yuyv422_owned(&tight, 12, 4, 3).unwrap();
        let from_padded = rgb_to_yuyv422_owned(&padded, stride as u32, 4, 3).unwrap();
        assert_eq!(from_tight.yuy.borrow(), from_padded.yuy.borrow());
    }

    #[test]
    fn test_short_source_is_rejected() {
        let src = vec![0u8; 4 * 3 * 2 - 1];
        let error = rgb_to_yuyv422_owned(&src, 12, 4, 2).unwrap_err();
        assert_eq!(
            error,
            YuvError::SourceSizeMismatch(MismatchedSize {
                expected: 24,
                received: 23
            })
        );
    }

    #[test]
    fn test_owned_wide_empty_image_does_not_panic() {
        assert_eq!(
            rgb_to_yuyv422_owned(&[], 0, 1 << 31, 0).unwrap_err(),
            YuvError::PointerOverflow
        );
        assert_eq!(
            bgra_to_yuyv422_owned(&[], 0, u32::MAX, 0).unwrap_err(),
            YuvError::PointerOverflow
        );
        let empty = rgb_to_yuyv422_owned(&[], 0, 1 << 20, 0).unwrap();
        assert_eq!(empty.width, 1 << 20);
        assert!(empty.yuy.borrow().is_empty());
    }

    #[test]
    fn test_owned_checks_source_before_allocating() {
        let src = [0u8; 3];
        let error = rgb_to_yuyv422_owned(&src, 20_000 * 3, 20_000, 20_000).unwrap_err();
        assert_eq!(
            error,
            YuvError::SourceSizeMismatch(MismatchedSize {
                expected: 20_000 * 3 * 20_000,
                received: 3
            })
        );
    }

    #[test]
    fn test_odd_destination_is_rejected() {
        let mut packed = YuvPackedImageMut {
            yuy: crate::BufferStoreMut::Owned(vec![0u8; 6]),
            yuy_stride: 6,
            width: 3,
            height: 1,
        };
        let src = vec![0u8; 9];
        assert!(rgb_to_yuyv422(&mut packed, &src, 9).is_err());
    }

    #[test]
    fn test_encodes_into_borrowed_destination() {
        let src = uniform_rgb(2, 2, [0, 0, 0]);
        let mut target = vec![0u8; 8];
        let mut packed = YuvPackedImageMut {
            yuy: crate::BufferStoreMut::Borrowed(&mut target),
            yuy_stride: 4,
            width: 2,
            height: 2,
        };
        rgb_to_yuyv422(&mut packed, &src, 6).unwrap();
        assert_eq!(target, [16, 128, 16, 128, 16, 128, 16, 128]);
    }
}
