// SPDX-License-Identifier: GPL-3.0-only

//! framecam - camera capture with decorative frame compositing
//!
//! This library drives a camera capture session (front/back switching,
//! photo preset), captures single stills, composites a fixed decorative
//! frame overlay onto them, and saves the result to the user's photo
//! library.
//!
//! # Architecture
//!
//! The crate is organized into several modules:
//!
//! - [`backends`]: camera backend abstraction and session manager
//! - [`pipelines`]: single-shot photo pipeline (capture → composite → encode → save)
//! - [`overlay`]: the built-in decorative frame asset
//! - [`flash`]: flash modes and sysfs LED control
//! - [`config`]: read-only user configuration
//! - [`storage`]: photo library paths and lookups

pub mod backends;
pub mod config;
pub mod constants;
pub mod errors;
pub mod flash;
pub mod overlay;
pub mod pipelines;
pub mod storage;

// Re-export commonly used types
pub use backends::camera::{CameraSessionManager, SessionState};
pub use config::Config;
pub use errors::{AppError, AppResult};
pub use flash::FlashMode;
pub use pipelines::photo::{PhotoCapture, PhotoPipeline};
