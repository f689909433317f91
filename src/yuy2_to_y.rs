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
use crate::yuv_error::MismatchedSize;
use crate::{YuvError, YuvGrayImageMut, YuvPackedImage};
#[cfg(feature = "rayon")]
use rayon::iter::{IndexedParallelIterator, ParallelIterator};
#[cfg(feature = "rayon")]
use rayon::prelude::{ParallelSlice, ParallelSliceMut};

/// Extracts the luma plane of a packed 4:2:2 image whose pixels start with luma.
///
/// Every pixel contributes the first element of its two element cell, so this
/// holds for YUYV and YVYU, and for views that start on an odd pixel of either:
/// such a view still begins on a luma sample. The chroma bytes are never read.
///
/// # Arguments
///
/// * `gray_image` - Target gray image, must have the same dimensions as `packed_image`.
/// * `packed_image` - Source packed image, usually a crop.
///
/// # Errors
///
/// Returns an error when the planes do not hold their declared geometry or the
/// dimensions differ.
pub fn yuyv422_to_gray(
    gray_image: &mut YuvGrayImageMut<u8>,
    packed_image: &YuvPackedImage<u8>,
) -> Result<(), YuvError> {
    packed_image.check_constraints()?;
    gray_image.check_constraints()?;
    if gray_image.width != packed_image.width {
        return Err(YuvError::DestinationSizeMismatch(MismatchedSize {
            expected: packed_image.width as usize,
            received: gray_image.width as usize,
        }));
    }
    if gray_image.height != packed_image.height {
        return Err(YuvError::DestinationSizeMismatch(MismatchedSize {
            expected: packed_image.height as usize,
            received: gray_image.height as usize,
        }));
    }

    let width = packed_image.width as usize;
    let height = packed_image.height as usize;
    if width == 0 || height == 0 {
        return Ok(());
    }

    let y_stride = gray_image.y_stride as usize;
    let yuy_stride = packed_image.yuy_stride as usize;

    let iter;
    #[cfg(feature = "rayon")]
    {
        iter = gray_image
            .y_plane
            .borrow_mut()
            .par_chunks_mut(y_stride)
            .zip(packed_image.yuy.par_chunks(yuy_stride));
    }
    #[cfg(not(feature = "rayon"))]
    {
        iter = gray_image
            .y_plane
            .borrow_mut()
            .chunks_mut(y_stride)
            .zip(packed_image.yuy.chunks(yuy_stride));
    }

    iter.take(height).for_each(|(y_dst, yuy_src)| {
        for (dst, pixel) in y_dst[..width]
            .iter_mut()
            .zip(yuy_src[..width * 2].chunks_exact(2))
        {
            *dst = pixel[0];
        }
    });

    Ok(())
}
