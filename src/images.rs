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
use crate::yuv_error::{check_overflow_v2, check_overflow_v3, check_packed_plane, check_y8_channel};
use crate::YuvError;
use std::fmt::Debug;

#[derive(Debug)]
pub enum BufferStoreMut<'a, T: Copy + Debug> {
    Borrowed(&'a mut [T]),
    Owned(Vec<T>),
}

impl<T: Copy + Debug> BufferStoreMut<'_, T> {
    pub fn borrow(&self) -> &[T] {
        match self {
            Self::Borrowed(p_ref) => p_ref,
            Self::Owned(vec) => vec,
        }
    }

    pub fn borrow_mut(&mut self) -> &mut [T] {
        match self {
            Self::Borrowed(p_ref) => p_ref,
            Self::Owned(vec) => vec,
        }
    }
}

/// Width that a packed 4:2:2 encoding of `width` pixels actually covers.
///
/// A trailing unpaired column is dropped, never padded.
#[inline]
pub const fn yuyv_effective_width(width: u32) -> u32 {
    width & !1
}

#[derive(Debug, Clone)]
/// Non-mutable representation of a packed 4:2:2 image, two elements per pixel.
///
/// The plane may begin anywhere inside a larger buffer, see [`YuvPackedImage::crop`].
pub struct YuvPackedImage<'a, T>
where
    T: Copy + Debug,
{
    pub yuy: &'a [T],
    /// Stride here always means Elements per row.
    pub yuy_stride: u32,
    pub width: u32,
    pub height: u32,
}

impl<T> YuvPackedImage<'_, T>
where
    T: Copy + Debug,
{
    /// Checks that every row holds `width * 2` elements.
    pub fn check_constraints(&self) -> Result<(), YuvError> {
        let row_elements = check_overflow_v2(self.width as usize, 2)?;
        check_packed_plane(self.yuy, self.yuy_stride, row_elements, self.height)
    }

    /// Checks that every row holds whole macropixels, including the trailing
    /// one of an odd width.
    pub fn check_constraints_macropixels(&self) -> Result<(), YuvError> {
        let row_elements = check_overflow_v2((self.width as usize).div_ceil(2), 4)?;
        check_packed_plane(self.yuy, self.yuy_stride, row_elements, self.height)
    }
}

#[derive(Debug)]
/// Mutable representation of a packed 4:2:2 image
pub struct YuvPackedImageMut<'a, T>
where
    T: Copy + Debug,
{
    pub yuy: BufferStoreMut<'a, T>,
    /// Stride here always means Elements per row.
    pub yuy_stride: u32,
    pub width: u32,
    pub height: u32,
}

impl<'a, T> YuvPackedImageMut<'a, T>
where
    T: Copy + Debug,
{
    pub fn check_constraints(&self) -> Result<(), YuvError> {
        let row_elements = check_overflow_v2(self.width as usize, 2)?;
        check_packed_plane(
            self.yuy.borrow(),
            self.yuy_stride,
            row_elements,
            self.height,
        )
    }

    pub fn to_fixed(&'a self) -> YuvPackedImage<'a, T> {
        YuvPackedImage {
            yuy: self.yuy.borrow(),
            yuy_stride: self.yuy_stride,
            width: self.width,
            height: self.height,
        }
    }
}

impl<T> YuvPackedImageMut<'_, T>
where
    T: Default + Clone + Copy + Debug,
{
    /// Allocates a tightly packed target for a `width` x `height` source.
    ///
    /// The stored width is the even truncated one, see [`yuyv_effective_width`].
    /// Fails with [`YuvError::PointerOverflow`] when the row does not fit a `u32` stride.
    pub fn alloc(width: u32, height: u32) -> Result<Self, YuvError> {
        let width = yuyv_effective_width(width);
        let yuy_stride = width.checked_mul(2).ok_or(YuvError::PointerOverflow)?;
        let yuy_length = check_overflow_v3(width as usize, 2, height as usize)?;
        Ok(Self {
            yuy: BufferStoreMut::Owned(vec![T::default(); yuy_length]),
            yuy_stride,
            width,
            height,
        })
    }
}

#[derive(Debug, Clone)]
/// Represents YUV gray non-mutable image
pub struct YuvGrayImage<'a, T>
where
    T: Copy + Debug,
{
    pub y_plane: &'a [T],
    /// Stride here always means Elements per row.
    pub y_stride: u32,
    pub width: u32,
    pub height: u32,
}

impl<T> YuvGrayImage<'_, T>
where
    T: Copy + Debug,
{
    pub fn check_constraints(&self) -> Result<(), YuvError> {
        check_y8_channel(self.y_plane, self.y_stride, self.width, self.height)
    }
}

#[derive(Debug)]
/// Represents YUV gray mutable image
pub struct YuvGrayImageMut<'a, T>
where
    T: Copy + Debug,
{
    pub y_plane: BufferStoreMut<'a, T>,
    /// Stride here always means Elements per row.
    pub y_stride: u32,
    pub width: u32,
    pub height: u32,
}

impl<'a, T> YuvGrayImageMut<'a, T>
where
    T: Copy + Debug,
{
    pub fn check_constraints(&self) -> Result<(), YuvError> {
        check_y8_channel(
            self.y_plane.borrow(),
            self.y_stride,
            self.width,
            self.height,
        )
    }

    pub fn to_fixed(&'a self) -> YuvGrayImage<'a, T> {
        YuvGrayImage {
            y_plane: self.y_plane.borrow(),
            y_stride: self.y_stride,
            width: self.width,
            height: self.height,
        }
    }
}

impl<T> YuvGrayImageMut<'_, T>
where
    T: Copy + Debug + Clone + Default,
{
    /// Allocates mutable target gray image
    pub fn alloc(width: u32, height: u32) -> Self {
        let y_target = vec![T::default(); width as usize * height as usize];
        Self {
            y_plane: BufferStoreMut::Owned(y_target),
            y_stride: width,
            width,
            height,
        }
    }

    /// Consumes the image and returns its plane, copied out when it was borrowed.
    pub fn into_vec(self) -> Vec<T> {
        match self.y_plane {
            BufferStoreMut::Borrowed(p_ref) => p_ref.to_vec(),
            BufferStoreMut::Owned(vec) => vec,
        }
    }
}
