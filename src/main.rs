use anyhow::{Context, bail};
use clap::Parser;
use log::{debug, error, info, warn};
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;

use panocube::cli::Args;
use panocube::compose::assemble_cross;
use panocube::encode::{OutputFormat, face_path, preview_path, save_image};
use panocube::face::Face;
use panocube::imagebuf::ImageBuf;
use panocube::jobs::{FaceResult, JobConfig, Pass, RenderPool};
use panocube::kernel::Filter;
use panocube::shader::write_shader;

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    setup_logger(&args);

    info!("Panocube skybox converter starting...");
    debug!("Command-line args: {:?}", args);

    run(&args)
}

fn setup_logger(args: &Args) {
    // Determine log level based on verbosity flags
    // 0 (default) = warn, 1 (-v) = info, 2 (-vv) = debug, 3+ (-vvv) = trace
    let log_level = match args.verbosity {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };

    if let Some(log_path_opt) = &args.log_file {
        // File logging with specified verbosity level
        let log_path = log_path_opt
            .as_ref()
            .cloned()
            .unwrap_or_else(|| PathBuf::from("panocube.log"));

        let file = std::fs::File::create(&log_path).expect("Failed to create log file");

        env_logger::Builder::new()
            .filter_level(log_level)
            .format_timestamp_millis()
            .target(env_logger::Target::Pipe(Box::new(file)))
            .init();

        info!(
            "Logging to file: {} (level: {:?})",
            log_path.display(),
            log_level
        );
    } else {
        // Console logging with specified verbosity level (respects RUST_LOG if set)
        let default_level = match args.verbosity {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        };

        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
            .format_timestamp_millis()
            .init();
    }
}

/// Faces to render: `--face` flags deduplicated into canonical order, or all six.
fn selected_faces(args: &Args) -> anyhow::Result<Vec<Face>> {
    if args.faces.is_empty() {
        return Ok(Face::all().to_vec());
    }
    let mut faces: Vec<Face> = Vec::new();
    for name in &args.faces {
        let face = Face::from_str(name)?;
        if !faces.contains(&face) {
            faces.push(face);
        }
    }
    faces.sort_by_key(|f| f.index());
    Ok(faces)
}

fn run(args: &Args) -> anyhow::Result<()> {
    let filter = Filter::from_str(&args.filter)?;
    let format = OutputFormat::parse(&args.format)?;
    let faces = selected_faces(args)?;

    let out_dir = match &args.out {
        Some(dir) => dir.clone(),
        None => match args.input.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
            _ => PathBuf::from("."),
        },
    };
    std::fs::create_dir_all(&out_dir)
        .with_context(|| format!("Failed to create output directory {}", out_dir.display()))?;

    let name = match &args.name {
        Some(name) => name.clone(),
        None => args
            .input
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("skybox")
            .to_string(),
    };

    info!("Loading panorama: {}", args.input.display());
    let pano = image::open(&args.input)
        .with_context(|| format!("Failed to load panorama {}", args.input.display()))?
        .to_rgba8();
    let src = ImageBuf::from_rgba_image(pano);
    if src.width() != 2 * src.height() {
        warn!(
            "Panorama is {}x{}, expected a 2:1 equirectangular aspect",
            src.width(),
            src.height()
        );
    }

    let face_list: Vec<&str> = faces.iter().map(|f| f.suffix()).collect();
    info!(
        "Panorama {}x{} -> faces [{}], filter {}, rotation {} deg",
        src.width(),
        src.height(),
        face_list.join(", "),
        filter,
        args.rotation
    );

    let config = JobConfig {
        faces: faces.clone(),
        rotation: args.rotation.to_radians(),
        filter,
        max_width: args.size,
        preview_width: if args.no_previews {
            None
        } else {
            Some(args.preview_size)
        },
    };

    let threads = args
        .workers
        .unwrap_or_else(|| num_cpus::get().min(config.faces.len()))
        .max(1);
    debug!("Spawning {} worker thread(s)", threads);

    let pool = RenderPool::spawn(Arc::new(src), &config, threads);

    let mut full_faces: Vec<Option<ImageBuf>> = vec![None; 6];
    let mut failed = 0usize;

    for FaceResult {
        face,
        pass,
        outcome,
    } in pool.results().iter()
    {
        match outcome {
            Ok(img) => {
                let path = match pass {
                    Pass::Preview => preview_path(&out_dir, &name, face, format),
                    Pass::Full => face_path(&out_dir, &name, face, format),
                };
                match save_image(&img, &path, format, args.quality) {
                    Ok(()) => {
                        info!(
                            "Wrote {} face {} ({}x{}) to {}",
                            pass,
                            face,
                            img.width(),
                            img.height(),
                            path.display()
                        );
                        if pass == Pass::Full {
                            full_faces[face.index()] = Some(img);
                        }
                    }
                    Err(e) => {
                        error!("Failed to save {} face {}: {}", pass, face, e);
                        if pass == Pass::Full {
                            failed += 1;
                        }
                    }
                }
            }
            Err(e) => {
                error!("Failed to render {} face {}: {}", pass, face, e);
                if pass == Pass::Full {
                    failed += 1;
                }
            }
        }
    }

    let complete = faces.len() == 6 && full_faces.iter().all(Option::is_some);

    if !args.no_shader {
        if complete {
            let path = write_shader(&out_dir, &name)
                .with_context(|| format!("Failed to write shader descriptor for '{}'", name))?;
            info!("Wrote shader descriptor to {}", path.display());
        } else {
            warn!("Skipping shader descriptor: not all six faces were rendered");
        }
    }

    if args.cross {
        if complete {
            let ordered: Vec<ImageBuf> = full_faces.into_iter().flatten().collect();
            let sheet = assemble_cross(&ordered).context("Failed to assemble cross sheet")?;
            let path = out_dir.join(format!("{}_cross.{}", name, format.extension()));
            save_image(&sheet, &path, format, args.quality)
                .with_context(|| format!("Failed to save cross sheet {}", path.display()))?;
            info!("Wrote cross sheet to {}", path.display());
        } else {
            warn!("Skipping cross sheet: not all six faces were rendered");
        }
    }

    if failed > 0 {
        bail!("{} face(s) failed", failed);
    }

    info!(
        "Done: {} face(s) written to {}",
        faces.len(),
        out_dir.display()
    );
    Ok(())
}
