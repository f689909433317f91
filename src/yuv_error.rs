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
use crate::roi::Roi;
use std::error::Error;
use std::fmt::{Display, Formatter};

#[derive(Debug, Copy, Clone, Ord, PartialOrd, Eq, PartialEq)]
pub struct MismatchedSize {
    pub expected: usize,
    pub received: usize,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct RoiOutOfBounds {
    pub roi: Roi,
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Copy, Clone, Ord, PartialOrd, Eq, PartialEq)]
pub struct StrideTooSmall {
    pub minimum: usize,
    pub received: usize,
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub enum YuvError {
    DestinationSizeMismatch(MismatchedSize),
    MinimumDestinationSizeMismatch(MismatchedSize),
    SourceSizeMismatch(MismatchedSize),
    PackedPlaneSizeMismatch(MismatchedSize),
    LumaPlaneSizeMismatch(MismatchedSize),
    StrideTooSmall(StrideTooSmall),
    RoiOutOfBounds(RoiOutOfBounds),
    PointerOverflow,
}

impl Display for YuvError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            YuvError::DestinationSizeMismatch(size) => f.write_fmt(format_args!(
                "Destination size mismatch: expected={}, received={}",
                size.expected, size.received
            )),
            YuvError::MinimumDestinationSizeMismatch(size) => f.write_fmt(format_args!(
                "Destination must have size at least {} but it is {}",
                size.expected, size.received
            )),
            YuvError::SourceSizeMismatch(size) => f.write_fmt(format_args!(
                "Source image must have size at least {} but it is {}",
                size.expected, size.received
            )),
            YuvError::PackedPlaneSizeMismatch(size) => f.write_fmt(format_args!(
                "Packed plane have invalid size, it must be at least {}, but it was {}",
                size.expected, size.received
            )),
            YuvError::LumaPlaneSizeMismatch(size) => f.write_fmt(format_args!(
                "Luma plane have invalid size, it must be at least {}, but it was {}",
                size.expected, size.received
            )),
            YuvError::StrideTooSmall(stride) => f.write_fmt(format_args!(
                "Stride must be at least {} elements, but it was {}",
                stride.minimum, stride.received
            )),
            YuvError::RoiOutOfBounds(oob) => f.write_fmt(format_args!(
                "ROI x={}, y={}, width={}, height={} does not fit into {}x{} image",
                oob.roi.x, oob.roi.y, oob.roi.width, oob.roi.height, oob.width, oob.height
            )),
            YuvError::PointerOverflow => f.write_str("Image size overflow pointer capabilities"),
        }
    }
}

impl Error for YuvError {}

#[inline]
pub(crate) fn check_overflow_v2(v0: usize, v1: usize) -> Result<usize, YuvError> {
    v0.checked_mul(v1).ok_or(YuvError::PointerOverflow)
}

#[inline]
pub(crate) fn check_overflow_v3(v0: usize, v1: usize, v2: usize) -> Result<usize, YuvError> {
    let product0 = check_overflow_v2(v0, v1)?;
    check_overflow_v2(product0, v2)
}

/// Number of elements a strided plane must hold: every row but the last spans
/// the full stride, the last one only needs `row_elements`.
#[inline]
pub(crate) fn strided_plane_size(
    stride: usize,
    row_elements: usize,
    height: usize,
) -> Result<usize, YuvError> {
    if height == 0 || row_elements == 0 {
        return Ok(0);
    }
    if stride < row_elements {
        return Err(YuvError::StrideTooSmall(StrideTooSmall {
            minimum: row_elements,
            received: stride,
        }));
    }
    check_overflow_v2(stride, height - 1)?
        .checked_add(row_elements)
        .ok_or(YuvError::PointerOverflow)
}

#[inline]
pub(crate) fn check_rgba_source<V>(
    arr: &[V],
    rgba_stride: u32,
    width: u32,
    height: u32,
    channels: usize,
) -> Result<(), YuvError> {
    let row_elements = check_overflow_v2(width as usize, channels)?;
    check_overflow_v3(width as usize, height as usize, channels)?;
    let required = strided_plane_size(rgba_stride as usize, row_elements, height as usize)?;
    if arr.len() < required {
        return Err(YuvError::SourceSizeMismatch(MismatchedSize {
            expected: required,
            received: arr.len(),
        }));
    }
    Ok(())
}

#[inline]
pub(crate) fn check_rgba_destination<V>(
    arr: &[V],
    rgba_stride: u32,
    width: u32,
    height: u32,
    channels: usize,
) -> Result<(), YuvError> {
    let row_elements = check_overflow_v2(width as usize, channels)?;
    check_overflow_v3(width as usize, height as usize, channels)?;
    let required = strided_plane_size(rgba_stride as usize, row_elements, height as usize)?;
    if arr.len() < required {
        return Err(YuvError::MinimumDestinationSizeMismatch(MismatchedSize {
            expected: required,
            received: arr.len(),
        }));
    }
    Ok(())
}

#[inline]
pub(crate) fn check_packed_plane<V>(
    data: &[V],
    stride: u32,
    row_elements: usize,
    height: u32,
) -> Result<(), YuvError> {
    let required = strided_plane_size(stride as usize, row_elements, height as usize)?;
    if data.len() < required {
        return Err(YuvError::PackedPlaneSizeMismatch(MismatchedSize {
            expected: required,
            received: data.len(),
        }));
    }
    Ok(())
}

#[inline]
pub(crate) fn check_y8_channel<V>(
    data: &[V],
    stride: u32,
    width: u32,
    height: u32,
) -> Result<(), YuvError> {
    check_overflow_v2(width as usize, height as usize)?;
    let required = strided_plane_size(stride as usize, width as usize, height as usize)?;
    if data.len() < required {
        return Err(YuvError::LumaPlaneSizeMismatch(MismatchedSize {
            expected: required,
            received: data.len(),
        }));
    }
    Ok(())
}
