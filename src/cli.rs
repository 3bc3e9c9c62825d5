// SPDX-License-Identifier: GPL-3.0-only

//! CLI commands for camera operations
//!
//! This module provides command-line functionality for:
//! - Listing available cameras
//! - Taking a framed photo
//! - Running a preview session
//! - Showing the latest saved photo

use framecam::backends::camera::types::DevicePosition;
use framecam::backends::camera::{CameraSessionManager, default_backend};
use framecam::config::Config;
use framecam::flash::FlashMode;
use framecam::overlay;
use framecam::pipelines::photo::{PhotoCapture, PhotoPipeline};
use framecam::storage;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tracing::warn;

type CliResult = Result<(), Box<dyn std::error::Error>>;

/// List all available cameras
pub fn list_cameras() -> CliResult {
    let backend = default_backend();
    let devices = backend.enumerate_devices();

    if devices.is_empty() {
        println!("No cameras found.");
        return Ok(());
    }

    println!("Available cameras:");
    println!();
    for device in &devices {
        println!("  [{}] {} ({})", device.path, device.name, device.position);
    }

    Ok(())
}

/// Take a photo with the decorative frame composited on
pub fn take_photo(
    camera: Option<DevicePosition>,
    no_overlay: bool,
    flash: FlashMode,
    output: Option<PathBuf>,
    open_after: bool,
) -> CliResult {
    let config = Config::load();

    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(async {
        let manager = setup_session(&config, camera).await?;

        // One shutter press: exactly one result
        println!("Capturing...");
        let result = PhotoCapture::request(&manager, flash).await?;

        // The session is done once the shutter result is in
        manager.stop();
        manager.wait_idle().await;

        // Failed captures are logged and drop the request, never abort
        let photo = match result {
            Ok(photo) => photo,
            Err(e) => {
                warn!(error = %e, "Capture failed, no photo produced");
                println!("No photo captured.");
                return Ok(());
            }
        };
        let flash_fired = photo.flash_fired;

        let mut pipeline = PhotoPipeline::new();
        pipeline.set_quality(config.jpeg_quality);
        if !no_overlay {
            pipeline.set_overlay(overlay::load(&config)?);
        }

        let output_dir = output
            .or_else(|| config.output_dir.clone())
            .unwrap_or_else(storage::photo_library_dir);
        storage::ensure_library_dir(&output_dir)?;

        match pipeline.process_and_save(photo, output_dir).await {
            Ok(outcome) => {
                println!("Photo saved: {}", outcome.path.display());
                if flash_fired {
                    println!("Flash fired.");
                }
                if open_after {
                    open::that(&outcome.path)?;
                }
            }
            Err(e) => {
                warn!(error = %e, "Failed to save photo");
                println!("Photo could not be saved.");
            }
        }

        Ok(())
    })
}

/// Run the capture session and report frame statistics
pub fn run_preview(camera: Option<DevicePosition>, seconds: u64) -> CliResult {
    let config = Config::load();

    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(async {
        let manager = setup_session(&config, camera).await?;

        println!("Previewing for {} seconds (Ctrl-C to stop)...", seconds);

        let started = Instant::now();
        let deadline = Duration::from_secs(seconds);
        let mut frames: u64 = 0;

        loop {
            if started.elapsed() >= deadline {
                break;
            }

            tokio::select! {
                _ = tokio::signal::ctrl_c() => {
                    println!("Interrupted.");
                    break;
                }
                _ = tokio::time::sleep(Duration::from_millis(33)) => {
                    if manager.capture_frame().is_ok() {
                        frames += 1;
                    }
                }
            }
        }

        manager.stop();
        manager.wait_idle().await;

        let elapsed = started.elapsed().as_secs_f64();
        if elapsed > 0.0 {
            println!(
                "Delivered {} frames in {:.1}s ({:.1} fps)",
                frames,
                elapsed,
                frames as f64 / elapsed
            );
        }

        Ok(())
    })
}

/// Show the most recently saved photo
pub fn show_latest(open_after: bool) -> CliResult {
    let config = Config::load();
    let library = config
        .output_dir
        .clone()
        .unwrap_or_else(storage::photo_library_dir);

    let rt = tokio::runtime::Runtime::new()?;
    let latest = rt.block_on(storage::latest_photo(library.clone()));

    match latest {
        Some(path) => {
            println!("{}", path.display());
            if open_after {
                open::that(&path)?;
            }
        }
        None => println!("No photos in {}", library.display()),
    }

    Ok(())
}

/// Discover devices, pick the requested camera, configure, and start
async fn setup_session(
    config: &Config,
    requested: Option<DevicePosition>,
) -> Result<CameraSessionManager, Box<dyn std::error::Error>> {
    let manager = CameraSessionManager::new(default_backend());

    manager.discover_devices();
    let Some(active) = manager.active_device() else {
        return Err("No cameras found".into());
    };

    // Flip to the requested position when the default is the other one
    let wanted = requested.unwrap_or(config.startup_camera);
    manager.configure_session();
    if active.position != wanted {
        // Switch restarts the session by itself
        manager.switch_camera();
    } else {
        manager.start();
    }
    manager.wait_idle().await;

    let device = manager.active_device().ok_or("No active camera")?;
    println!("Using camera: {} ({})", device.name, device.position);

    if !manager.session_has_input() {
        println!("Warning: camera input unavailable, preview is non-functional");
    }

    Ok(manager)
}
