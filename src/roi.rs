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
//! Region-of-interest views over packed and gray planes.
//!
//! Crops never copy. A crop of a packed image is the parent slice advanced by
//! `y * stride + x * 2` elements with the parent stride kept, exactly what a
//! matrix header over shared memory does. Because a pixel is two elements, an
//! odd `x` starts the view on the second half of a macropixel.
use crate::images::BufferStoreMut;
use crate::yuv_error::{check_overflow_v2, RoiOutOfBounds};
use crate::yuv_support::Yuy2Description;
use crate::{YuvError, YuvGrayImage, YuvGrayImageMut, YuvPackedImage, YuvPackedImageMut};
use std::fmt::Debug;

/// Axis aligned rectangle in pixels of the image it is applied to.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
pub struct Roi {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Roi {
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Roi {
        Roi {
            x,
            y,
            width,
            height,
        }
    }

    /// Exclusive right edge.
    #[inline]
    pub const fn right(&self) -> u64 {
        self.x as u64 + self.width as u64
    }

    /// Exclusive bottom edge.
    #[inline]
    pub const fn bottom(&self) -> u64 {
        self.y as u64 + self.height as u64
    }

    #[inline]
    pub const fn fits(&self, width: u32, height: u32) -> bool {
        self.right() <= width as u64 && self.bottom() <= height as u64
    }

    /// `true` when the left edge splits a packed macropixel.
    #[inline]
    pub const fn splits_macropixel(&self) -> bool {
        self.x & 1 == 1
    }

    /// Byte order a packed reader sees at the start of this crop when the parent is `base`.
    #[inline]
    pub const fn packed_order(&self, base: Yuy2Description) -> Yuy2Description {
        base.shifted_by(self.x)
    }

    fn check_fits(&self, width: u32, height: u32) -> Result<(), YuvError> {
        if !self.fits(width, height) {
            return Err(YuvError::RoiOutOfBounds(RoiOutOfBounds {
                roi: *self,
                width,
                height,
            }));
        }
        Ok(())
    }
}

impl<'a, T> YuvPackedImage<'a, T>
where
    T: Copy + Debug,
{
    /// Borrows the `roi` part of this image, two elements per pixel.
    ///
    /// The view keeps the parent stride and runs to the end of the parent slice,
    /// so a trailing macropixel past `roi.width` stays readable when the parent has it.
    pub fn crop(&self, roi: Roi) -> Result<YuvPackedImage<'a, T>, YuvError> {
        self.check_constraints()?;
        roi.check_fits(self.width, self.height)?;
        let offset = check_overflow_v2(roi.y as usize, self.yuy_stride as usize)?
            + roi.x as usize * 2;
        let yuy = if roi.width == 0 || roi.height == 0 {
            &self.yuy[..0]
        } else {
            &self.yuy[offset..]
        };
        Ok(YuvPackedImage {
            yuy,
            yuy_stride: self.yuy_stride,
            width: roi.width,
            height: roi.height,
        })
    }

    /// Copies the visible pixels into a tightly packed owned image.
    pub fn to_compact(&self) -> Result<YuvPackedImageMut<'static, T>, YuvError> {
        self.check_constraints()?;
        let row_elements = self.width as usize * 2;
        let mut yuy = Vec::with_capacity(row_elements * self.height as usize);
        if row_elements != 0 && self.height != 0 {
            for row in self
                .yuy
                .chunks(self.yuy_stride as usize)
                .take(self.height as usize)
            {
                yuy.extend_from_slice(&row[..row_elements]);
            }
        }
        Ok(YuvPackedImageMut {
            yuy: BufferStoreMut::Owned(yuy),
            yuy_stride: row_elements as u32,
            width: self.width,
            height: self.height,
        })
    }
}

impl<'a, T> YuvGrayImage<'a, T>
where
    T: Copy + Debug,
{
    /// Views the first `width * height` elements of `data` as one element per pixel.
    ///
    /// Applied to packed 4:2:2 bytes this is the mis-typed wrapping: only half of
    /// the buffer is covered and every row holds the left half of a real row,
    /// so the right half shows up as the following row.
    pub fn reinterpret(data: &'a [T], width: u32, height: u32) -> Result<Self, YuvError> {
        let image = YuvGrayImage {
            y_plane: data,
            y_stride: width,
            width,
            height,
        };
        image.check_constraints()?;
        Ok(image)
    }

    /// Borrows the `roi` part of this plane, one element per pixel.
    pub fn crop(&self, roi: Roi) -> Result<YuvGrayImage<'a, T>, YuvError> {
        self.check_constraints()?;
        roi.check_fits(self.width, self.height)?;
        let offset =
            check_overflow_v2(roi.y as usize, self.y_stride as usize)? + roi.x as usize;
        let y_plane = if roi.width == 0 || roi.height == 0 {
            &self.y_plane[..0]
        } else {
            &self.y_plane[offset..]
        };
        Ok(YuvGrayImage {
            y_plane,
            y_stride: self.y_stride,
            width: roi.width,
            height: roi.height,
        })
    }

    /// Deep copy into a tightly packed owned plane.
    pub fn to_compact(&self) -> Result<YuvGrayImageMut<'static, T>, YuvError> {
        self.check_constraints()?;
        let width = self.width as usize;
        let mut y_plane = Vec::with_capacity(width * self.height as usize);
        if width != 0 && self.height != 0 {
            for row in self
                .y_plane
                .chunks(self.y_stride as usize)
                .take(self.height as usize)
            {
                y_plane.extend_from_slice(&row[..width]);
            }
        }
        Ok(YuvGrayImageMut {
            y_plane: BufferStoreMut::Owned(y_plane),
            y_stride: self.width,
            width: self.width,
            height: self.height,
        })
    }
}
