//! Image decoding into a normalized single-channel intensity map.
//!
//! Decoding happens in two steps so each can be tested on its own:
//! [`pixel_array`] exposes the raw samples of a decoded image as an
//! n-dimensional array (`(h, w)` for single-channel images, `(h, w, c)`
//! otherwise), and [`to_gray01`] reduces such an array to a `[0, 1]` map.

use image::{DynamicImage, ImageFormat, ImageReader};
use ndarray::{s, Array, Array2, ArrayD, Axis, Dimension, Ix2, Ix3, IxDyn};
use std::io::Cursor;
use std::path::Path;

use crate::error::DecodeError;

/// Normalized grayscale intensities, indexed `[row, column]`.
pub type GrayMap = Array2<f32>;

/// Weights for R, G and B when collapsing color to luminance.
pub const LUMA_WEIGHTS: [f32; 3] = [0.2125, 0.7154, 0.0721];

/// Samples above this value mark the array as 8-bit style and trigger `/ 255`.
const UNIT_RANGE_MAX: f32 = 1.0;

/// Read, decode and normalize the image at `path`.
pub fn decode_gray01(path: &Path) -> Result<GrayMap, DecodeError> {
    let bytes = std::fs::read(path)?;
    let image = decode_bytes(&bytes, path)?;
    let image = if stored_as_gray_png(&bytes) {
        drop_expanded_alpha(image)
    } else {
        image
    };
    to_gray01(pixel_array(&image)?)
}

/// Decode an in-memory file. The format is detected from content first and
/// from the extension as a fallback.
fn decode_bytes(bytes: &[u8], path: &Path) -> Result<DynamicImage, DecodeError> {
    let mut reader = ImageReader::new(Cursor::new(bytes)).with_guessed_format()?;
    if reader.format().is_none() {
        let format = ImageFormat::from_path(path)
            .map_err(|_| DecodeError::Corrupt("unrecognized image format".to_string()))?;
        reader.set_format(format);
    }
    reader
        .decode()
        .map_err(|e| DecodeError::Corrupt(e.to_string()))
}

/// Whether `bytes` is a PNG whose header declares plain grayscale. The PNG
/// decoder expands a `tRNS` transparency key on such files into an alpha
/// channel that the file never stored.
fn stored_as_gray_png(bytes: &[u8]) -> bool {
    let mut decoder = png::Decoder::new(Cursor::new(bytes));
    decoder
        .read_header_info()
        .is_ok_and(|info| info.color_type == png::ColorType::Grayscale)
}

/// Strip the alpha channel of a gray+alpha image, keeping intensities as is.
fn drop_expanded_alpha(image: DynamicImage) -> DynamicImage {
    match image {
        DynamicImage::ImageLumaA8(_) => DynamicImage::ImageLuma8(image.to_luma8()),
        DynamicImage::ImageLumaA16(_) => DynamicImage::ImageLuma16(image.to_luma16()),
        other => other,
    }
}

/// Raw sample values of `image` as `f32`, without any rescaling.
pub fn pixel_array(image: &DynamicImage) -> Result<ArrayD<f32>, DecodeError> {
    let (w, h) = (image.width(), image.height());
    match image {
        DynamicImage::ImageLuma8(buf) => samples_to_array(w, h, 1, buf.as_raw()),
        DynamicImage::ImageLumaA8(buf) => samples_to_array(w, h, 2, buf.as_raw()),
        DynamicImage::ImageRgb8(buf) => samples_to_array(w, h, 3, buf.as_raw()),
        DynamicImage::ImageRgba8(buf) => samples_to_array(w, h, 4, buf.as_raw()),
        DynamicImage::ImageLuma16(buf) => samples_to_array(w, h, 1, buf.as_raw()),
        DynamicImage::ImageLumaA16(buf) => samples_to_array(w, h, 2, buf.as_raw()),
        DynamicImage::ImageRgb16(buf) => samples_to_array(w, h, 3, buf.as_raw()),
        DynamicImage::ImageRgba16(buf) => samples_to_array(w, h, 4, buf.as_raw()),
        DynamicImage::ImageRgb32F(buf) => samples_to_array(w, h, 3, buf.as_raw()),
        DynamicImage::ImageRgba32F(buf) => samples_to_array(w, h, 4, buf.as_raw()),
        other => samples_to_array(w, h, 4, other.to_rgba32f().as_raw()),
    }
}

fn samples_to_array<T>(
    width: u32,
    height: u32,
    channels: usize,
    samples: &[T],
) -> Result<ArrayD<f32>, DecodeError>
where
    T: Copy + Into<f32>,
{
    let (h, w) = (height as usize, width as usize);
    let shape = if channels == 1 {
        vec![h, w]
    } else {
        vec![h, w, channels]
    };
    let data: Vec<f32> = samples.iter().map(|&v| v.into()).collect();
    ArrayD::from_shape_vec(IxDyn(&shape), data).map_err(|e| DecodeError::Corrupt(e.to_string()))
}

/// Reduce a raw pixel array to a single-channel map in `[0, 1]`.
///
/// - `(h, w)`: values are intensities already.
/// - `(h, w, c)` with `c >= 3`: channels past the third are dropped, then
///   R, G, B are combined with [`LUMA_WEIGHTS`].
///
/// In both cases the array is divided by 255 when its maximum exceeds 1.0.
/// Anything else is [`DecodeError::UnsupportedShape`].
pub fn to_gray01(pixels: ArrayD<f32>) -> Result<GrayMap, DecodeError> {
    let unsupported = |shape: &[usize]| DecodeError::UnsupportedShape {
        shape: shape.to_vec(),
    };

    match pixels.ndim() {
        2 => {
            if pixels.is_empty() {
                return Err(DecodeError::Empty);
            }
            let mut gray = pixels
                .into_dimensionality::<Ix2>()
                .map_err(|e| DecodeError::Corrupt(e.to_string()))?;
            scale_to_unit(&mut gray);
            Ok(gray)
        }
        3 => {
            if pixels.len_of(Axis(2)) < 3 {
                return Err(unsupported(pixels.shape()));
            }
            if pixels.is_empty() {
                return Err(DecodeError::Empty);
            }
            let rgb = pixels
                .into_dimensionality::<Ix3>()
                .map_err(|e| DecodeError::Corrupt(e.to_string()))?;
            let mut rgb = rgb.slice_move(s![.., .., ..3]);
            scale_to_unit(&mut rgb);
            Ok(rgb.map_axis(Axis(2), |px| {
                LUMA_WEIGHTS[0] * px[0] + LUMA_WEIGHTS[1] * px[1] + LUMA_WEIGHTS[2] * px[2]
            }))
        }
        _ => Err(unsupported(pixels.shape())),
    }
}

/// Divide by 255 in place if any sample exceeds the unit range.
fn scale_to_unit<D: Dimension>(values: &mut Array<f32, D>) {
    let max = values.iter().copied().fold(f32::NEG_INFINITY, f32::max);
    if max > UNIT_RANGE_MAX {
        values.mapv_inplace(|v| v / 255.0);
    }
}
