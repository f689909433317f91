/*
 * // Copyright (c) the Radzivon Bartoshyk. All rights reserved.
 * //
 * // Use of this source code is governed by a BSD-style
 * // license that can be found in the LICENSE file.
 */

/// Declares YUV range Limited (TV) or Full
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum YuvRange {
    /// Limited range Y ∈ [16, 235], UV ∈ [16, 240]
    Limited,
    /// Full range Y ∈ [0, 255], UV ∈ [0, 255]
    Full,
}

/// Matrix used to turn YCbCr back into RGB.
///
/// The encoder always writes BT.601, BT.709 is for reading buffers produced elsewhere.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum YuvStandardMatrix {
    Bt601,
    Bt709,
}

impl YuvStandardMatrix {
    /// Red and blue luma weights.
    #[inline]
    pub const fn kr_kb(self) -> (f32, f32) {
        match self {
            YuvStandardMatrix::Bt601 => (0.299f32, 0.114f32),
            YuvStandardMatrix::Bt709 => (0.2126f32, 0.0722f32),
        }
    }
}

/// 8-bit YCbCr to RGB coefficients in fixed point with `precision` fractional bits.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) struct InverseTransform {
    pub(crate) y_coef: i32,
    pub(crate) cr_coef: i32,
    pub(crate) cb_coef: i32,
    pub(crate) g_coef_1: i32,
    pub(crate) g_coef_2: i32,
    pub(crate) bias_y: i32,
    pub(crate) bias_uv: i32,
}

impl InverseTransform {
    pub(crate) fn new(range: YuvRange, matrix: YuvStandardMatrix, precision: u32) -> Self {
        let (bias_y, range_y, range_uv) = match range {
            YuvRange::Limited => (16, 219f32, 224f32),
            YuvRange::Full => (0, 255f32, 255f32),
        };
        let (kr, kb) = matrix.kr_kb();
        let kg = 1f32 - kr - kb;
        let y_scale = 255f32 / range_y;
        let uv_scale = 255f32 / range_uv;
        let one = (1i32 << precision) as f32;
        let fixed = |coef: f32| (coef * one).round() as i32;
        InverseTransform {
            y_coef: fixed(y_scale),
            cr_coef: fixed(2f32 * (1f32 - kr) * uv_scale),
            cb_coef: fixed(2f32 * (1f32 - kb) * uv_scale),
            g_coef_1: fixed((2f32 * ((1f32 - kr) * kr / kg)) * uv_scale),
            g_coef_2: fixed((2f32 * ((1f32 - kb) * kb / kg)) * uv_scale),
            bias_y,
            bias_uv: 128,
        }
    }
}

/// Interleaved 8-bit layouts, used as a const generic tag.
#[repr(u8)]
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) enum YuvSourceChannels {
    Rgb = 0,
    Rgba = 1,
    Bgra = 2,
    Bgr = 3,
}

impl From<u8> for YuvSourceChannels {
    #[inline(always)]
    fn from(value: u8) -> Self {
        match value {
            0 => YuvSourceChannels::Rgb,
            1 => YuvSourceChannels::Rgba,
            2 => YuvSourceChannels::Bgra,
            3 => YuvSourceChannels::Bgr,
            _ => {
                unimplemented!("Unknown value {}", value)
            }
        }
    }
}

impl YuvSourceChannels {
    #[inline(always)]
    pub(crate) const fn has_alpha(&self) -> bool {
        matches!(self, YuvSourceChannels::Rgba | YuvSourceChannels::Bgra)
    }

    #[inline(always)]
    const fn is_bgr(&self) -> bool {
        matches!(self, YuvSourceChannels::Bgr | YuvSourceChannels::Bgra)
    }

    #[inline(always)]
    pub(crate) const fn get_channels_count(&self) -> usize {
        if self.has_alpha() {
            4
        } else {
            3
        }
    }

    #[inline(always)]
    pub(crate) const fn get_r_channel_offset(&self) -> usize {
        if self.is_bgr() {
            2
        } else {
            0
        }
    }

    #[inline(always)]
    pub(crate) const fn get_g_channel_offset(&self) -> usize {
        1
    }

    #[inline(always)]
    pub(crate) const fn get_b_channel_offset(&self) -> usize {
        2 - self.get_r_channel_offset()
    }

    /// Only meaningful when [`Self::has_alpha`].
    #[inline(always)]
    pub(crate) const fn get_a_channel_offset(&self) -> usize {
        3
    }
}

/// Byte order of a 4:2:2 macropixel, two luma samples sharing one chroma pair.
#[repr(usize)]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Yuy2Description {
    YUYV = 0,
    UYVY = 1,
    YVYU = 2,
    VYUY = 3,
}

impl Yuy2Description {
    /// Maps the const generic tag of a decoder back to the order.
    #[inline(always)]
    pub(crate) const fn from_tag(tag: usize) -> Yuy2Description {
        match tag {
            0 => Yuy2Description::YUYV,
            1 => Yuy2Description::UYVY,
            2 => Yuy2Description::YVYU,
            _ => Yuy2Description::VYUY,
        }
    }

    #[inline]
    pub const fn get_u_position(&self) -> usize {
        match self {
            Yuy2Description::YUYV => 1,
            Yuy2Description::UYVY => 0,
            Yuy2Description::YVYU => 3,
            Yuy2Description::VYUY => 2,
        }
    }

    #[inline]
    pub const fn get_v_position(&self) -> usize {
        match self {
            Yuy2Description::YUYV => 3,
            Yuy2Description::UYVY => 2,
            Yuy2Description::YVYU => 1,
            Yuy2Description::VYUY => 0,
        }
    }

    #[inline(always)]
    pub const fn get_first_y_position(&self) -> usize {
        match self {
            Yuy2Description::YUYV | Yuy2Description::YVYU => 0,
            Yuy2Description::UYVY | Yuy2Description::VYUY => 1,
        }
    }

    #[inline]
    pub const fn get_second_y_position(&self) -> usize {
        self.get_first_y_position() + 2
    }

    /// Order a reader observes when it starts `pixels` pixels into a row of this order.
    ///
    /// Every pixel occupies two bytes, so an odd shift lands in the middle of a
    /// macropixel and the U and V slots trade places.
    #[inline]
    pub const fn shifted_by(&self, pixels: u32) -> Yuy2Description {
        if pixels & 1 == 0 {
            return *self;
        }
        match self {
            Yuy2Description::YUYV => Yuy2Description::YVYU,
            Yuy2Description::YVYU => Yuy2Description::YUYV,
            Yuy2Description::UYVY => Yuy2Description::VYUY,
            Yuy2Description::VYUY => Yuy2Description::UYVY,
        }
    }
}
