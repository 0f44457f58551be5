//! Saving rendered faces to disk.
//!
//! JPEG (quality-controlled, alpha stripped), PNG and TIFF (RGBA
//! passthrough). File naming follows the skybox convention
//! `<name>_<suffix>.<ext>` consumed by the shader descriptor.

use image::ImageFormat;
use image::codecs::jpeg::JpegEncoder;
use log::debug;
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use crate::face::Face;
use crate::imagebuf::ImageBuf;

/// Default JPEG quality.
pub const JPEG_QUALITY: u8 = 92;

/// Output container for face images.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Jpg,
    Png,
    Tif,
}

impl OutputFormat {
    /// All formats in CLI order.
    pub fn all() -> &'static [OutputFormat] {
        &[OutputFormat::Jpg, OutputFormat::Png, OutputFormat::Tif]
    }

    /// File extension without the dot.
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Jpg => "jpg",
            OutputFormat::Png => "png",
            OutputFormat::Tif => "tif",
        }
    }

    /// Parse a CLI/file-extension spelling.
    pub fn parse(s: &str) -> Result<Self, EncodeError> {
        match s.trim().to_ascii_lowercase().as_str() {
            "jpg" | "jpeg" => Ok(OutputFormat::Jpg),
            "png" => Ok(OutputFormat::Png),
            "tif" | "tiff" => Ok(OutputFormat::Tif),
            other => Err(EncodeError::UnknownFormat(other.to_string())),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.extension())
    }
}

/// Errors while persisting a rendered face.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EncodeError {
    /// Filesystem error (create/write).
    Io(String),
    /// Codec error from the image encoder.
    Image(String),
    /// Output format not one of jpg/png/tif.
    UnknownFormat(String),
}

impl std::fmt::Display for EncodeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EncodeError::Io(msg) => write!(f, "I/O error: {}", msg),
            EncodeError::Image(msg) => write!(f, "Image encoding error: {}", msg),
            EncodeError::UnknownFormat(name) => write!(f, "Unknown output format: '{}'", name),
        }
    }
}

impl std::error::Error for EncodeError {}

/// Output path `<dir>/<name>_<suffix>.<ext>` for one full-quality face.
pub fn face_path(dir: &Path, name: &str, face: Face, format: OutputFormat) -> PathBuf {
    dir.join(format!("{}_{}.{}", name, face.suffix(), format.extension()))
}

/// Output path `<dir>/<name>_<suffix>_preview.<ext>` for one preview face.
pub fn preview_path(dir: &Path, name: &str, face: Face, format: OutputFormat) -> PathBuf {
    dir.join(format!(
        "{}_{}_preview.{}",
        name,
        face.suffix(),
        format.extension()
    ))
}

/// Write one image to `path` in the given format.
pub fn save_image(
    img: &ImageBuf,
    path: &Path,
    format: OutputFormat,
    quality: u8,
) -> Result<(), EncodeError> {
    debug!(
        "Saving {}x{} image to {}",
        img.width(),
        img.height(),
        path.display()
    );
    match format {
        OutputFormat::Jpg => {
            let file = File::create(path)
                .map_err(|e| EncodeError::Io(format!("{}: {}", path.display(), e)))?;
            let writer = BufWriter::new(file);
            let rgb = img.to_rgb_image();
            JpegEncoder::new_with_quality(writer, quality.clamp(1, 100))
                .encode(
                    rgb.as_raw(),
                    rgb.width(),
                    rgb.height(),
                    image::ExtendedColorType::Rgb8,
                )
                .map_err(|e| EncodeError::Image(e.to_string()))?;
        }
        OutputFormat::Png => {
            img.clone()
                .into_rgba_image()
                .save_with_format(path, ImageFormat::Png)
                .map_err(|e| EncodeError::Image(e.to_string()))?;
        }
        OutputFormat::Tif => {
            img.clone()
                .into_rgba_image()
                .save_with_format(path, ImageFormat::Tiff)
                .map_err(|e| EncodeError::Image(e.to_string()))?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_parse_and_extension() {
        assert_eq!(OutputFormat::parse("jpg").unwrap(), OutputFormat::Jpg);
        assert_eq!(OutputFormat::parse("JPEG").unwrap(), OutputFormat::Jpg);
        assert_eq!(OutputFormat::parse("png").unwrap(), OutputFormat::Png);
        assert_eq!(OutputFormat::parse("tiff").unwrap(), OutputFormat::Tif);
        assert!(matches!(
            OutputFormat::parse("bmp"),
            Err(EncodeError::UnknownFormat(name)) if name == "bmp"
        ));
        for format in OutputFormat::all() {
            assert_eq!(format.to_string(), format.extension());
        }
    }

    #[test]
    fn test_output_paths_follow_skybox_naming() {
        let dir = Path::new("/tmp/out");
        let full = face_path(dir, "alpine", Face::Front, OutputFormat::Jpg);
        assert_eq!(full, PathBuf::from("/tmp/out/alpine_ft.jpg"));
        let preview = preview_path(dir, "alpine", Face::Up, OutputFormat::Png);
        assert_eq!(preview, PathBuf::from("/tmp/out/alpine_up_preview.png"));
    }

    /// Test: saving into a missing directory
    /// Validates: the error surfaces instead of panicking
    #[test]
    fn test_save_into_missing_dir_fails() {
        let img = ImageBuf::new(2, 2);
        let path = Path::new("/nonexistent-panocube-dir/face.jpg");
        let result = save_image(&img, path, OutputFormat::Jpg, JPEG_QUALITY);
        assert!(matches!(result, Err(EncodeError::Io(_))));
    }

    /// Test: PNG write/read round trip in the temp directory
    #[test]
    fn test_save_png_roundtrip() {
        let mut img = ImageBuf::new(2, 2);
        img.put_pixel(0, 0, [255, 0, 0, 255]);
        img.put_pixel(1, 1, [0, 0, 255, 255]);

        let path = std::env::temp_dir().join(format!("panocube-test-{}.png", std::process::id()));
        save_image(&img, &path, OutputFormat::Png, JPEG_QUALITY).unwrap();

        let back = image::open(&path).unwrap().to_rgba8();
        assert_eq!(back.dimensions(), (2, 2));
        assert_eq!(back.get_pixel(0, 0).0, [255, 0, 0, 255]);
        assert_eq!(back.get_pixel(1, 1).0, [0, 0, 255, 255]);

        let _ = std::fs::remove_file(&path);
    }
}
