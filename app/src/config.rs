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
use anyhow::{bail, Context, Result};
use std::path::PathBuf;
use std::str::FromStr;
use yuyv_probe::Roi;

pub(crate) const DEFAULT_INPUT: &str = "image/DSC_0822.JPG";
pub(crate) const DEFAULT_OUTPUT: &str = "output";
pub(crate) const DEFAULT_EVEN_ROI: Roi = Roi::new(2000, 2000, 1000, 1000);
pub(crate) const DEFAULT_ODD_ROI: Roi = Roi::new(2001, 2001, 1001, 1001);
pub(crate) const DEFAULT_SYNTH_SIZE: u32 = 3000;
pub(crate) const DEFAULT_MIN_SIZE: u32 = 2500;

/// Probe configuration from environment/args
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Config {
    /// Image to encode, a synthetic one is used when it can't be read
    pub(crate) input: PathBuf,
    /// Directory receiving the result images
    pub(crate) output_dir: PathBuf,
    /// Crop that starts on a macropixel boundary
    pub(crate) even_roi: Roi,
    /// Crop that starts in the middle of a macropixel
    pub(crate) odd_roi: Roi,
    /// Side of the synthesized square image
    pub(crate) synth_size: u32,
    /// Smallest side the source is resized to
    pub(crate) min_size: u32,
}

impl Config {
    pub(crate) fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok(), std::env::args().nth(1))
    }

    /// Builds the config from a variable lookup, the positional argument wins over
    /// `YUYV_PROBE_INPUT`.
    fn from_lookup(var: impl Fn(&str) -> Option<String>, positional: Option<String>) -> Result<Self> {
        let input = positional
            .or_else(|| var("YUYV_PROBE_INPUT"))
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_INPUT));

        let output_dir = var("YUYV_PROBE_OUTPUT")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT));

        let even_roi = match var("YUYV_PROBE_EVEN_ROI") {
            Some(value) => parse_roi(&value).context("Invalid YUYV_PROBE_EVEN_ROI")?,
            None => DEFAULT_EVEN_ROI,
        };

        let odd_roi = match var("YUYV_PROBE_ODD_ROI") {
            Some(value) => parse_roi(&value).context("Invalid YUYV_PROBE_ODD_ROI")?,
            None => DEFAULT_ODD_ROI,
        };

        let synth_size = parse_var(&var, "YUYV_PROBE_SYNTH_SIZE", DEFAULT_SYNTH_SIZE)?;
        let min_size = parse_var(&var, "YUYV_PROBE_MIN_SIZE", DEFAULT_MIN_SIZE)?;
        if synth_size == 0 {
            bail!("YUYV_PROBE_SYNTH_SIZE must be positive");
        }

        Ok(Self {
            input,
            output_dir,
            even_roi,
            odd_roi,
            synth_size,
            min_size,
        })
    }
}

fn parse_var<T>(var: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match var(key) {
        Some(value) => value
            .trim()
            .parse()
            .with_context(|| format!("Invalid {key} value {value:?}")),
        None => Ok(default),
    }
}

/// Parses `x,y,width,height`.
pub(crate) fn parse_roi(value: &str) -> Result<Roi> {
    let parts = value
        .split(',')
        .map(|part| part.trim().parse::<u32>())
        .collect::<Result<Vec<_>, _>>()
        .with_context(|| format!("Malformed ROI {value:?}"))?;
    match parts.as_slice() {
        &[x, y, width, height] => {
            if width == 0 || height == 0 {
                bail!("ROI {value:?} is empty");
            }
            Ok(Roi::new(x, y, width, height))
        }
        _ => bail!("ROI {value:?} must have four components x,y,width,height"),
    }
}
