//! Per-face render jobs.
//!
//! Each cube face is one isolated unit of work: a worker renders the fast
//! linear preview first, then the full-quality pass, and streams both
//! results back over a channel. Faces run concurrently on a small pool of
//! named threads sharing the read-only source image; the pool owns nothing
//! else, so dropping the receiver abandons whatever is still queued.

use crossbeam_channel::{Receiver, Sender, unbounded};
use log::{debug, info, trace};
use std::sync::Arc;
use std::thread;

use crate::convert::{ConvertError, RenderRequest, render_face};
use crate::face::Face;
use crate::imagebuf::ImageBuf;
use crate::kernel::Filter;

/// Default preview pass edge cap.
pub const PREVIEW_WIDTH: usize = 200;

/// Which of the two sequential passes produced a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pass {
    /// Low-resolution linear pass.
    Preview,
    /// Full-resolution pass with the configured kernel.
    Full,
}

impl std::fmt::Display for Pass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Pass::Preview => write!(f, "preview"),
            Pass::Full => write!(f, "full"),
        }
    }
}

/// Parameters shared by all face jobs of one conversion.
#[derive(Debug, Clone)]
pub struct JobConfig {
    pub faces: Vec<Face>,
    /// Longitude rotation in radians.
    pub rotation: f32,
    /// Kernel of the full-quality pass (previews always use linear).
    pub filter: Filter,
    /// Optional cap on the full-pass face edge.
    pub max_width: Option<usize>,
    /// Preview edge cap; `None` skips the preview pass entirely.
    pub preview_width: Option<usize>,
}

impl Default for JobConfig {
    fn default() -> Self {
        Self {
            faces: Face::all().to_vec(),
            rotation: std::f32::consts::PI,
            filter: Filter::Lanczos,
            max_width: None,
            preview_width: Some(PREVIEW_WIDTH),
        }
    }
}

/// One streamed result: which face, which pass, and how it went.
#[derive(Debug)]
pub struct FaceResult {
    pub face: Face,
    pub pass: Pass,
    pub outcome: Result<ImageBuf, ConvertError>,
}

/// Pool of worker threads rendering face jobs.
///
/// Workers exit when the job queue drains; the result channel closes once
/// the last worker is done, so receivers simply iterate to completion.
pub struct RenderPool {
    results: Receiver<FaceResult>,
    _handles: Vec<thread::JoinHandle<()>>,
}

impl RenderPool {
    /// Queue one job per configured face and spawn up to `threads` workers.
    pub fn spawn(src: Arc<ImageBuf>, config: &JobConfig, threads: usize) -> Self {
        let (job_tx, job_rx) = unbounded::<Face>();
        let (result_tx, result_rx) = unbounded::<FaceResult>();

        for face in &config.faces {
            // The matching receiver is still alive, the send cannot fail.
            let _ = job_tx.send(*face);
        }
        drop(job_tx);

        let worker_count = threads.max(1).min(config.faces.len().max(1));
        info!(
            "Starting {} render workers for {} faces",
            worker_count,
            config.faces.len()
        );

        let mut handles = Vec::with_capacity(worker_count);
        for worker_id in 0..worker_count {
            let jobs = job_rx.clone();
            let results = result_tx.clone();
            let src = Arc::clone(&src);
            let config = config.clone();

            let handle = thread::Builder::new()
                .name(format!("panocube-worker-{}", worker_id))
                .spawn(move || {
                    trace!("Render worker {} started", worker_id);
                    while let Ok(face) = jobs.recv() {
                        run_face(&src, &config, face, &results);
                    }
                    trace!("Render worker {} stopped", worker_id);
                })
                .expect("Failed to spawn render worker");
            handles.push(handle);
        }
        drop(result_tx);

        Self {
            results: result_rx,
            _handles: handles,
        }
    }

    /// Result stream; closes after the last worker finishes.
    pub fn results(&self) -> &Receiver<FaceResult> {
        &self.results
    }
}

/// Render both passes of one face, preview first, and report each result.
/// A dropped receiver just means the caller abandoned the conversion.
fn run_face(src: &ImageBuf, config: &JobConfig, face: Face, results: &Sender<FaceResult>) {
    if let Some(preview_width) = config.preview_width {
        let request = RenderRequest {
            face,
            rotation: config.rotation,
            filter: Filter::Linear,
            max_width: Some(preview_width),
        };
        debug!("Face {}: preview pass (cap {})", face, preview_width);
        let outcome = render_face(src, &request);
        let _ = results.send(FaceResult {
            face,
            pass: Pass::Preview,
            outcome,
        });
    }

    let request = RenderRequest {
        face,
        rotation: config.rotation,
        filter: config.filter,
        max_width: config.max_width,
    };
    debug!("Face {}: full pass", face);
    let outcome = render_face(src, &request);
    let _ = results.send(FaceResult {
        face,
        pass: Pass::Full,
        outcome,
    });
}
