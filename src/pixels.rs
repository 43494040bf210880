//! Decoded-image buffer conversion
//! Host images arrive as HWC float32 arrays with components in 0.0-1.0.

use image::{DynamicImage, RgbImage, RgbaImage};

use crate::error::{Result, SaverError};

/// A decoded image from the pipeline, HWC layout, components in 0.0-1.0.
#[derive(Debug, Clone)]
pub struct ImageTensor {
    pub width: u32,
    pub height: u32,
    pub channels: usize,
    pub data: Vec<f32>,
}

impl ImageTensor {
    pub fn new(width: u32, height: u32, channels: usize, data: Vec<f32>) -> Self {
        Self {
            width,
            height,
            channels,
            data,
        }
    }

    /// Quantize to an 8-bit image buffer.
    ///
    /// Components are scaled by 255 and clamped. Single-channel data is
    /// replicated across RGB; 3 channels map to RGB, 4 to RGBA. Any other
    /// channel count is rejected.
    pub fn to_image(&self) -> Result<DynamicImage> {
        let bytes: Vec<u8> = self
            .data
            .iter()
            .map(|&value| (value * 255.0).clamp(0.0, 255.0) as u8)
            .collect();

        let expected = self.width as usize * self.height as usize * self.channels;
        if bytes.len() != expected {
            return Err(SaverError::ShapeMismatch {
                width: self.width,
                height: self.height,
                channels: self.channels,
                actual: bytes.len(),
            });
        }

        match self.channels {
            1 => {
                let mut rgb = Vec::with_capacity(bytes.len() * 3);
                for &value in &bytes {
                    rgb.extend_from_slice(&[value, value, value]);
                }
                Ok(DynamicImage::ImageRgb8(rgb_buffer(self.width, self.height, rgb)?))
            }
            3 => Ok(DynamicImage::ImageRgb8(rgb_buffer(
                self.width,
                self.height,
                bytes,
            )?)),
            4 => {
                let buffer = RgbaImage::from_raw(self.width, self.height, bytes).ok_or(
                    SaverError::ShapeMismatch {
                        width: self.width,
                        height: self.height,
                        channels: 4,
                        actual: self.data.len(),
                    },
                )?;
                Ok(DynamicImage::ImageRgba8(buffer))
            }
            other => Err(SaverError::UnsupportedChannels(other)),
        }
    }
}

fn rgb_buffer(width: u32, height: u32, bytes: Vec<u8>) -> Result<RgbImage> {
    let actual = bytes.len();
    RgbImage::from_raw(width, height, bytes).ok_or(SaverError::ShapeMismatch {
        width,
        height,
        channels: 3,
        actual,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgb_quantization_clamps() {
        let tensor = ImageTensor::new(1, 2, 3, vec![0.0, 0.5, 1.0, -0.2, 1.7, 0.25]);
        let image = tensor.to_image().unwrap();
        let rgb = image.as_rgb8().unwrap();
        assert_eq!(rgb.get_pixel(0, 0).0, [0, 127, 255]);
        assert_eq!(rgb.get_pixel(0, 1).0, [0, 255, 63]);
    }

    #[test]
    fn test_grayscale_is_replicated() {
        let tensor = ImageTensor::new(2, 1, 1, vec![0.0, 1.0]);
        let image = tensor.to_image().unwrap();
        let rgb = image.as_rgb8().unwrap();
        assert_eq!(rgb.get_pixel(0, 0).0, [0, 0, 0]);
        assert_eq!(rgb.get_pixel(1, 0).0, [255, 255, 255]);
    }

    #[test]
    fn test_unsupported_channel_count() {
        let tensor = ImageTensor::new(1, 1, 2, vec![0.0, 0.0]);
        assert!(matches!(
            tensor.to_image(),
            Err(SaverError::UnsupportedChannels(2))
        ));
    }

    #[test]
    fn test_shape_mismatch_is_rejected() {
        let tensor = ImageTensor::new(2, 2, 3, vec![0.0; 3]);
        assert!(matches!(
            tensor.to_image(),
            Err(SaverError::ShapeMismatch { .. })
        ));
    }
}
