use crate::utils::VerifyError;
use image::{GrayImage, ImageBuffer, Luma, RgbImage};
use imageproc::contrast::{otsu_level, threshold};
use imageproc::filter::median_filter;
use log::debug;

pub struct ImageProcessor;

impl ImageProcessor {
    /// Decode uploaded bytes into a 3-channel pixel matrix.
    pub fn decode(image_data: &[u8]) -> Result<RgbImage, VerifyError> {
        let img = image::load_from_memory(image_data)
            .map_err(|e| VerifyError::InvalidImage(format!("Failed to decode image: {}", e)))?;
        Ok(img.to_rgb8())
    }

    pub fn process_bytes(image_data: &[u8]) -> Result<GrayImage, VerifyError> {
        let rgb = Self::decode(image_data)?;
        Ok(Self::normalize(&rgb))
    }

    /// Grayscale, denoise, Otsu binarization, then a 2x2 closing.
    /// The order matters: thresholding must see the denoised image and the
    /// closing must see the binary one.
    pub fn normalize(img: &RgbImage) -> GrayImage {
        let gray = image::imageops::grayscale(img);

        let denoised = median_filter(&gray, 1, 1);

        let level = otsu_level(&denoised);
        debug!("Otsu threshold level: {}", level);
        let binary = threshold(&denoised, level);

        Self::close_2x2(&binary)
    }

    /// Morphological closing with a 2x2 square structuring element.
    pub fn close_2x2(img: &GrayImage) -> GrayImage {
        let dilated = Self::apply_2x2(img, &[(-1, 0), (0, -1), (-1, -1)], u8::max);
        Self::apply_2x2(&dilated, &[(1, 0), (0, 1), (1, 1)], u8::min)
    }

    // Offsets outside the image are ignored.
    fn apply_2x2(img: &GrayImage, offsets: &[(i64, i64)], pick: fn(u8, u8) -> u8) -> GrayImage {
        let (width, height) = img.dimensions();
        ImageBuffer::from_fn(width, height, |x, y| {
            let mut value = img.get_pixel(x, y)[0];
            for &(dx, dy) in offsets {
                let nx = x as i64 + dx;
                let ny = y as i64 + dy;
                if nx >= 0 && ny >= 0 && nx < width as i64 && ny < height as i64 {
                    value = pick(value, img.get_pixel(nx as u32, ny as u32)[0]);
                }
            }
            Luma([value])
        })
    }
}
