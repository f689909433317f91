//! Packed YUYV (YUY2) encoding of RGB images, and the views needed to probe how
//! crops of a 4:2:2 buffer read back at even and odd pixel offsets.
#![forbid(unsafe_code)]

mod images;
mod rgb_to_yuyv;
mod roi;
mod yuv_error;
mod yuv_support;
mod yuy2_to_rgb;
mod yuy2_to_y;

pub use yuv_support::YuvRange;
pub use yuv_support::YuvStandardMatrix;
pub use yuv_support::Yuy2Description;

pub use yuv_error::MismatchedSize;
pub use yuv_error::RoiOutOfBounds;
pub use yuv_error::StrideTooSmall;
pub use yuv_error::YuvError;

pub use images::yuyv_effective_width;
pub use images::BufferStoreMut;
pub use images::YuvGrayImage;
pub use images::YuvGrayImageMut;
pub use images::YuvPackedImage;
pub use images::YuvPackedImageMut;

pub use roi::Roi;

pub use rgb_to_yuyv::bgr_to_yuyv422;
pub use rgb_to_yuyv::bgr_to_yuyv422_owned;
pub use rgb_to_yuyv::bgra_to_yuyv422;
pub use rgb_to_yuyv::bgra_to_yuyv422_owned;
pub use rgb_to_yuyv::rgb_to_yuyv422;
pub use rgb_to_yuyv::rgb_to_yuyv422_owned;
pub use rgb_to_yuyv::rgba_to_yuyv422;
pub use rgb_to_yuyv::rgba_to_yuyv422_owned;

pub use yuy2_to_y::yuyv422_to_gray;

pub use yuy2_to_rgb::yuy2_to_rgb;
pub use yuy2_to_rgb::uyvy422_to_bgr;
pub use yuy2_to_rgb::uyvy422_to_bgra;
pub use yuy2_to_rgb::uyvy422_to_rgb;
pub use yuy2_to_rgb::uyvy422_to_rgba;
pub use yuy2_to_rgb::vyuy422_to_bgr;
pub use yuy2_to_rgb::vyuy422_to_bgra;
pub use yuy2_to_rgb::vyuy422_to_rgb;
pub use yuy2_to_rgb::vyuy422_to_rgba;
pub use yuy2_to_rgb::yuyv422_to_bgr;
pub use yuy2_to_rgb::yuyv422_to_bgra;
pub use yuy2_to_rgb::yuyv422_to_rgb;
pub use yuy2_to_rgb::yuyv422_to_rgba;
pub use yuy2_to_rgb::yvyu422_to_bgr;
pub use yuy2_to_rgb::yvyu422_to_bgra;
pub use yuy2_to_rgb::yvyu422_to_rgb;
pub use yuy2_to_rgb::yvyu422_to_rgba;
