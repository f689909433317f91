/*
 * // Copyright (c) the Radzivon Bartoshyk. All rights reserved.
 * //
 * // Use of this source code is governed by a BSD-style
 * // license that can be found in the LICENSE file.
 */
use crate::yuv_error::check_rgba_destination;
use crate::yuv_support::{InverseTransform, YuvSourceChannels, Yuy2Description};
use crate::{YuvError, YuvPackedImage, YuvRange, YuvStandardMatrix};
#[cfg(feature = "rayon")]
use rayon::iter::{IndexedParallelIterator, ParallelIterator};
#[cfg(feature = "rayon")]
use rayon::prelude::{ParallelSlice, ParallelSliceMut};

const PRECISION: i32 = 6;

#[inline(always)]
fn write_pixel<const DESTINATION_CHANNELS: u8>(
    dst: &mut [u8],
    y_value: u8,
    cb: i32,
    cr: i32,
    transform: &InverseTransform,
) {
    let dst_chans: YuvSourceChannels = DESTINATION_CHANNELS.into();
    let y = (y_value as i32 - transform.bias_y) * transform.y_coef;

    let r = ((y + transform.cr_coef * cr) >> PRECISION).clamp(0, 255);
    let b = ((y + transform.cb_coef * cb) >> PRECISION).clamp(0, 255);
    let g = ((y - transform.g_coef_1 * cr - transform.g_coef_2 * cb) >> PRECISION).clamp(0, 255);

    dst[dst_chans.get_r_channel_offset()] = r as u8;
    dst[dst_chans.get_g_channel_offset()] = g as u8;
    dst[dst_chans.get_b_channel_offset()] = b as u8;
    if dst_chans.has_alpha() {
        dst[dst_chans.get_a_channel_offset()] = 255;
    }
}

fn yuy2_to_rgb_impl<const DESTINATION_CHANNELS: u8, const YUY2_SOURCE: usize>(
    packed_image: &YuvPackedImage<u8>,
    rgb_store: &mut [u8],
    rgb_stride: u32,
    range: YuvRange,
    matrix: YuvStandardMatrix,
) -> Result<(), YuvError> {
    let yuy2_source = Yuy2Description::from_tag(YUY2_SOURCE);
    let dst_chans: YuvSourceChannels = DESTINATION_CHANNELS.into();
    let channels = dst_chans.get_channels_count();

    packed_image.check_constraints_macropixels()?;
    check_rgba_destination(
        rgb_store,
        rgb_stride,
        packed_image.width,
        packed_image.height,
        channels,
    )?;

    let width = packed_image.width as usize;
    let height = packed_image.height as usize;
    if width == 0 || height == 0 {
        return Ok(());
    }

    let transform = InverseTransform::new(range, matrix, PRECISION as u32);
    let bias_uv = transform.bias_uv;

    let iter;
    #[cfg(feature = "rayon")]
    {
        iter = rgb_store
            .par_chunks_mut(rgb_stride as usize)
            .zip(packed_image.yuy.par_chunks(packed_image.yuy_stride as usize));
    }
    #[cfg(not(feature = "rayon"))]
    {
        iter = rgb_store
            .chunks_mut(rgb_stride as usize)
            .zip(packed_image.yuy.chunks(packed_image.yuy_stride as usize));
    }

    iter.take(height).for_each(|(rgb_dst, yuy_src)| {
        let pairs = width / 2;

        for (macropixel, dst) in yuy_src[..pairs * 4]
            .chunks_exact(4)
            .zip(rgb_dst[..pairs * 2 * channels].chunks_exact_mut(channels * 2))
        {
            let first_y = macropixel[yuy2_source.get_first_y_position()];
            let second_y = macropixel[yuy2_source.get_second_y_position()];
            let cb = macropixel[yuy2_source.get_u_position()] as i32 - bias_uv;
            let cr = macropixel[yuy2_source.get_v_position()] as i32 - bias_uv;

            let (dst0, dst1) = dst.split_at_mut(channels);
            write_pixel::<DESTINATION_CHANNELS>(dst0, first_y, cb, cr, &transform);
            write_pixel::<DESTINATION_CHANNELS>(dst1, second_y, cb, cr, &transform);
        }

        if width & 1 == 1 {
            let macropixel = &yuy_src[pairs * 4..pairs * 4 + 4];
            let first_y = macropixel[yuy2_source.get_first_y_position()];
            let cb = macropixel[yuy2_source.get_u_position()] as i32 - bias_uv;
            let cr = macropixel[yuy2_source.get_v_position()] as i32 - bias_uv;
            let dst = &mut rgb_dst[pairs * 2 * channels..(pairs * 2 + 1) * channels];
            write_pixel::<DESTINATION_CHANNELS>(dst, first_y, cb, cr, &transform);
        }
    });

    Ok(())
}

macro_rules! d_cnv {
    ($method: ident, $px_fmt: expr, $yuy_fmt: expr, $yuy_name: expr, $px_fmt_name: expr) => {
        #[doc = concat!("Convert ", $yuy_name, " packed 4:2:2 image to ", $px_fmt_name, " with 8-bit per channel precision.

Two neighbouring pixels share the chroma pair of their macropixel. An odd width decodes the
last pixel from the first luma and the chroma of the trailing macropixel, which therefore must
be present in the source plane. Its second half lies past the view's row: for a crop it is the
parent's next column, or the first element of the following stride row when the row ends there.
The chroma is read from those elements whatever they hold, so the last column of such a crop
is only as right as the bytes that follow it.

# Arguments

* `packed_image` - Source packed image, a crop is accepted.
* `dst` - A mutable slice to store the converted ", $px_fmt_name, " data.
* `dst_stride` - Elements per row for the ", $px_fmt_name, " image data.
* `range` - The YUV range (limited or full).
* `matrix` - The YUV standard matrix (BT.601 or BT.709).

# Errors

Returns an error when the source or destination plane is shorter than its geometry.")]
        pub fn $method(
            packed_image: &YuvPackedImage<u8>,
            dst: &mut [u8],
            dst_stride: u32,
            range: YuvRange,
            matrix: YuvStandardMatrix,
        ) -> Result<(), YuvError> {
            yuy2_to_rgb_impl::<{ $px_fmt as u8 }, { $yuy_fmt as usize }>(
                packed_image,
                dst,
                dst_stride,
                range,
                matrix,
            )
        }
    };
}

d_cnv!(yuyv422_to_rgb, YuvSourceChannels::Rgb, Yuy2Description::YUYV, "YUYV", "RGB");
d_cnv!(yuyv422_to_bgr, YuvSourceChannels::Bgr, Yuy2Description::YUYV, "YUYV", "BGR");
d_cnv!(yuyv422_to_rgba, YuvSourceChannels::Rgba, Yuy2Description::YUYV, "YUYV", "RGBA");
d_cnv!(yuyv422_to_bgra, YuvSourceChannels::Bgra, Yuy2Description::YUYV, "YUYV", "BGRA");
d_cnv!(yvyu422_to_rgb, YuvSourceChannels::Rgb, Yuy2Description::YVYU, "YVYU", "RGB");
d_cnv!(yvyu422_to_bgr, YuvSourceChannels::Bgr, Yuy2Description::YVYU, "YVYU", "BGR");
d_cnv!(yvyu422_to_rgba, YuvSourceChannels::Rgba, Yuy2Description::YVYU, "YVYU", "RGBA");
d_cnv!(yvyu422_to_bgra, YuvSourceChannels::Bgra, Yuy2Description::YVYU, "YVYU", "BGRA");
d_cnv!(uyvy422_to_rgb, YuvSourceChannels::Rgb, Yuy2Description::UYVY, "UYVY", "RGB");
d_cnv!(uyvy422_to_bgr, YuvSourceChannels::Bgr, Yuy2Description::UYVY, "UYVY", "BGR");
d_cnv!(uyvy422_to_rgba, YuvSourceChannels::Rgba, Yuy2Description::UYVY, "UYVY", "RGBA");
d_cnv!(uyvy422_to_bgra, YuvSourceChannels::Bgra, Yuy2Description::UYVY, "UYVY", "BGRA");
d_cnv!(vyuy422_to_rgb, YuvSourceChannels::Rgb, Yuy2Description::VYUY, "VYUY", "RGB");
d_cnv!(vyuy422_to_bgr, YuvSourceChannels::Bgr, Yuy2Description::VYUY, "VYUY", "BGR");
d_cnv!(vyuy422_to_rgba, YuvSourceChannels::Rgba, Yuy2Description::VYUY, "VYUY", "RGBA");
d_cnv!(vyuy422_to_bgra, YuvSourceChannels::Bgra, Yuy2Description::VYUY, "VYUY", "BGRA");

/// Converts a packed image of any [`Yuy2Description`] to RGB.
///
/// Used to decode a crop with the order it actually carries, see [`crate::Roi::packed_order`].
pub fn yuy2_to_rgb(
    packed_image: &YuvPackedImage<u8>,
    order: Yuy2Description,
    dst: &mut [u8],
    dst_stride: u32,
    range: YuvRange,
    matrix: YuvStandardMatrix,
) -> Result<(), YuvError> {
    match order {
        Yuy2Description::YUYV => yuyv422_to_rgb(packed_image, dst, dst_stride, range, matrix),
        Yuy2Description::UYVY => uyvy422_to_rgb(packed_image, dst, dst_stride, range, matrix),
        Yuy2Description::YVYU => yvyu422_to_rgb(packed_image, dst, dst_stride, range, matrix),
        Yuy2Description::VYUY => vyuy422_to_rgb(packed_image, dst, dst_stride, range, matrix),
    }
}
