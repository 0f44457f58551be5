//! PANOCUBE - Equirectangular panorama to cube map converter library
//!
//! Re-exports all modules for use by binary targets.

// Rendering engine (pixels, kernels, geometry, resampling)
pub mod convert;
pub mod face;
pub mod imagebuf;
pub mod kernel;
pub mod projection;

// App modules
pub mod cli;
pub mod compose;
pub mod encode;
pub mod jobs;
pub mod shader;

// Re-export commonly used types from the engine
pub use convert::{ConvertError, RenderRequest, Resampler, render_face};
pub use face::Face;
pub use imagebuf::{CHANNELS, ImageBuf};
pub use kernel::Filter;

// Re-export the job runner
pub use jobs::{FaceResult, JobConfig, Pass, RenderPool};
