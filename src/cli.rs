use clap::Parser;
use std::path::PathBuf;

// Build version with filter info
const VERSION_INFO: &str = const_format::concatcp!(
    env!("CARGO_PKG_VERSION"), "\n",
    "Filters: lanczos (radius 5), linear\n",
    "Formats: jpg, png, tif\n",
    "Target: ", std::env::consts::ARCH, "-", std::env::consts::OS
);

/// Equirectangular panorama to cube map converter
#[derive(Parser, Debug)]
#[command(author, version = VERSION_INFO, about, long_about = None)]
pub struct Args {
    /// Path to the equirectangular panorama (PNG, JPEG, TIFF, TGA)
    #[arg(value_name = "PANORAMA")]
    pub input: PathBuf,

    /// Output directory (default: next to the input file)
    #[arg(short = 'o', long = "out", value_name = "DIR")]
    pub out: Option<PathBuf>,

    /// Skybox name used in file names and the shader (default: input file stem)
    #[arg(short = 'n', long = "name", value_name = "NAME")]
    pub name: Option<String>,

    /// Horizontal rotation of the panorama in degrees
    #[arg(short = 'r', long = "rotation", value_name = "DEGREES", default_value = "180")]
    pub rotation: f32,

    /// Resampling filter: lanczos or linear
    #[arg(short = 'f', long = "filter", value_name = "FILTER", default_value = "lanczos")]
    pub filter: String,

    /// Cap face edge length in pixels (default: source width / 4)
    #[arg(short = 's', long = "size", value_name = "PIXELS")]
    pub size: Option<usize>,

    /// Preview face edge length in pixels
    #[arg(long = "preview-size", value_name = "PIXELS", default_value = "200")]
    pub preview_size: usize,

    /// Skip the fast preview pass, render full faces only
    #[arg(long = "no-previews")]
    pub no_previews: bool,

    /// Output format: jpg, png or tif
    #[arg(long = "format", value_name = "FORMAT", default_value = "jpg")]
    pub format: String,

    /// JPEG quality (1-100)
    #[arg(short = 'q', long = "quality", value_name = "N", default_value = "92")]
    pub quality: u8,

    /// Render only these faces (rt, lf, ft, bk, up, dn; can be specified multiple times)
    #[arg(long = "face", value_name = "FACE")]
    pub faces: Vec<String>,

    /// Worker threads (default: CPU count, capped at face count)
    #[arg(short = 'w', long = "workers", value_name = "N")]
    pub workers: Option<usize>,

    /// Also write an unfolded 4x3 cross sheet of all six faces
    #[arg(short = 'c', long = "cross")]
    pub cross: bool,

    /// Skip writing the Quake 3 .shader descriptor
    #[arg(long = "no-shader")]
    pub no_shader: bool,

    /// Enable debug logging to file (default: panocube.log)
    #[arg(short = 'l', long = "log", value_name = "LOG_FILE")]
    pub log_file: Option<Option<PathBuf>>,

    /// Increase logging verbosity (default: warn, -v: info, -vv: debug, -vvv+: trace)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    pub verbosity: u8,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["panocube", "pano.jpg"]).unwrap();
        assert_eq!(args.input, PathBuf::from("pano.jpg"));
        assert_eq!(args.rotation, 180.0);
        assert_eq!(args.filter, "lanczos");
        assert_eq!(args.format, "jpg");
        assert_eq!(args.quality, 92);
        assert_eq!(args.preview_size, 200);
        assert!(args.faces.is_empty());
        assert!(!args.cross);
        assert!(!args.no_previews);
        assert!(!args.no_shader);
    }

    #[test]
    fn test_repeatable_faces_and_overrides() {
        let args = Args::try_parse_from([
            "panocube",
            "pano.png",
            "--face", "ft",
            "--face", "bk",
            "-r", "90",
            "-f", "linear",
            "-s", "512",
            "--format", "png",
            "-w", "2",
        ])
        .unwrap();
        assert_eq!(args.faces, vec!["ft".to_string(), "bk".to_string()]);
        assert_eq!(args.rotation, 90.0);
        assert_eq!(args.filter, "linear");
        assert_eq!(args.size, Some(512));
        assert_eq!(args.format, "png");
        assert_eq!(args.workers, Some(2));
    }
}
