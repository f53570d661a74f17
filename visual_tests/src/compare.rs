use crate::{Result, VisualTestError};
use image::{Rgba, RgbaImage};
use image_compare::Algorithm;
use std::path::Path;

/// Result of comparing two images
pub struct CompareResult {
    /// Similarity score from 0.0 to 1.0
    pub similarity: f64,
}

/// Compare two images using SSIM
pub fn compare_images(reference: &RgbaImage, captured: &RgbaImage) -> Result<CompareResult> {
    if reference.dimensions() != captured.dimensions() {
        return Err(VisualTestError::Compare(format!(
            "Image dimensions don't match: reference {:?} vs captured {:?}",
            reference.dimensions(),
            captured.dimensions()
        )));
    }

    let ref_rgb = image::DynamicImage::ImageRgba8(reference.clone()).to_rgb8();
    let cap_rgb = image::DynamicImage::ImageRgba8(captured.clone()).to_rgb8();

    let result =
        image_compare::rgb_similarity_structure(&Algorithm::MSSIMSimple, &ref_rgb, &cap_rgb)
            .map_err(|e| VisualTestError::Compare(format!("SSIM comparison failed: {}", e)))?;

    Ok(CompareResult {
        similarity: result.score,
    })
}

/// Write an image highlighting differing pixels in red
pub fn generate_diff_image(
    reference: &RgbaImage,
    captured: &RgbaImage,
    output: &Path,
) -> Result<()> {
    let (width, height) = reference.dimensions();
    let diff_img = RgbaImage::from_fn(width, height, |x, y| {
        let ref_pixel = reference.get_pixel(x, y);
        let Some(cap_pixel) = captured.get_pixel_checked(x, y) else {
            return Rgba([255, 0, 255, 255]);
        };

        let diff = pixel_difference(ref_pixel, cap_pixel);
        if diff > 10 {
            let intensity = (diff as f32 / 255.0 * 200.0 + 55.0) as u8;
            Rgba([intensity, 0, 0, 255])
        } else {
            Rgba([cap_pixel[0] / 3, cap_pixel[1] / 3, cap_pixel[2] / 3, 255])
        }
    });

    diff_img.save(output)?;
    Ok(())
}

/// Maximum channel difference between two pixels
fn pixel_difference(a: &Rgba<u8>, b: &Rgba<u8>) -> u8 {
    (0..3)
        .map(|i| a[i].abs_diff(b[i]))
        .max()
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_images_are_fully_similar() {
        let img = RgbaImage::from_fn(16, 16, |x, y| Rgba([(x * 16) as u8, (y * 16) as u8, 0, 255]));
        let result = compare_images(&img, &img).unwrap();
        assert!(result.similarity > 0.999);
    }

    #[test]
    fn size_mismatch_is_an_error() {
        let a = RgbaImage::new(4, 4);
        let b = RgbaImage::new(4, 5);
        assert!(matches!(
            compare_images(&a, &b),
            Err(VisualTestError::Compare(_))
        ));
    }

    #[test]
    fn channel_difference() {
        assert_eq!(
            pixel_difference(&Rgba([10, 200, 0, 255]), &Rgba([20, 100, 0, 0])),
            100
        );
    }
}
