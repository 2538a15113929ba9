use std::path::Path;

use anyhow::{Context, Result};
use image::DynamicImage;
use ra_core::frame::FrameBuffer;

/// Charge une image depuis le disque (PNG, JPEG, BMP).
///
/// Les fichiers animés ne sont pas décodés au-delà de leur première frame.
///
/// # Errors
/// Returns an error if the file cannot be opened, decoded, or is empty.
///
/// # Example
/// ```no_run
/// use ra_source::image::load_image;
/// use std::path::Path;
/// let frame = load_image(Path::new("portrait.png")).unwrap();
/// ```
pub fn load_image(path: &Path) -> Result<FrameBuffer> {
    let img = image::open(path).with_context(|| format!("Impossible de charger {}", path.display()))?;
    let frame = from_dynamic(&img).with_context(|| format!("Image inutilisable : {}", path.display()))?;
    log::info!(
        "Image chargée : {} ({}×{})",
        path.display(),
        frame.width(),
        frame.height()
    );
    Ok(frame)
}

/// Convert an already decoded image into an RGBA frame buffer.
///
/// # Errors
/// Returns an error for a zero-area image.
///
/// # Example
/// ```
/// use image::{DynamicImage, RgbImage};
/// use ra_source::image::from_dynamic;
/// let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(3, 2, image::Rgb([1, 2, 3])));
/// let frame = from_dynamic(&img).unwrap();
/// assert_eq!(frame.pixel(2, 1), (1, 2, 3, 255));
/// ```
pub fn from_dynamic(img: &DynamicImage) -> Result<FrameBuffer> {
    let rgba = img.to_rgba8();
    let (width, height) = rgba.dimensions();
    Ok(FrameBuffer::from_rgba(width, height, rgba.into_raw())?)
}

#[cfg(test)]
mod tests {
    use image::{Rgba, RgbaImage};

    use super::*;

    #[test]
    fn png_round_trip_through_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gradient.png");
        let img = RgbaImage::from_fn(4, 3, |x, y| Rgba([(x * 60) as u8, (y * 80) as u8, 7, 200]));
        img.save(&path).unwrap();

        let frame = load_image(&path).unwrap();
        assert_eq!((frame.width(), frame.height()), (4, 3));
        assert_eq!(frame.pixel(3, 2), (180, 160, 7, 200));
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_image(&dir.path().join("absent.png")).unwrap_err();
        assert!(err.to_string().contains("Impossible de charger"));
    }

    #[test]
    fn garbage_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.png");
        std::fs::write(&path, b"not an image").unwrap();
        assert!(load_image(&path).is_err());
    }

    #[test]
    fn empty_image_rejected() {
        let img = DynamicImage::ImageRgba8(RgbaImage::new(0, 0));
        assert!(from_dynamic(&img).is_err());
    }
}
