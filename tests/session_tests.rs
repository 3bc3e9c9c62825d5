// SPDX-License-Identifier: GPL-3.0-only

//! Integration tests for the camera session lifecycle

use framecam::backends::camera::synthetic::SyntheticBackend;
use framecam::backends::camera::types::{
    BackendError, BackendResult, CameraDevice, DevicePosition, SessionPreset,
};
use framecam::backends::camera::{
    CameraBackend, CameraSessionManager, FrameSource, SessionState,
};
use std::sync::Arc;

fn device(name: &str, path: &str, position: DevicePosition) -> CameraDevice {
    CameraDevice {
        name: name.to_string(),
        path: path.to_string(),
        position,
    }
}

fn manager_with(devices: Vec<CameraDevice>) -> CameraSessionManager {
    CameraSessionManager::new(Arc::new(SyntheticBackend::with_devices(devices)))
}

#[tokio::test]
async fn discovery_prefers_back_camera() {
    let manager = manager_with(vec![
        device("Front", "cam:front", DevicePosition::Front),
        device("Back", "cam:back", DevicePosition::Back),
    ]);

    manager.discover_devices();

    let active = manager.active_device().expect("device selected");
    assert_eq!(active.position, DevicePosition::Back);
    assert_eq!(manager.state(), SessionState::DeviceReady);
    assert_eq!(manager.devices().len(), 2);
}

#[tokio::test]
async fn discovery_falls_back_to_front_camera() {
    let manager = manager_with(vec![device("Front", "cam:front", DevicePosition::Front)]);

    manager.discover_devices();

    let active = manager.active_device().expect("device selected");
    assert_eq!(active.position, DevicePosition::Front);
}

#[tokio::test]
async fn discovery_with_no_devices_stays_uninitialized() {
    let manager = manager_with(Vec::new());

    manager.discover_devices();

    assert!(manager.active_device().is_none());
    assert_eq!(manager.state(), SessionState::Uninitialized);
}

#[tokio::test]
async fn stop_before_start_is_tolerated() {
    let manager = manager_with(vec![device("Back", "cam:back", DevicePosition::Back)]);
    manager.discover_devices();
    manager.configure_session();

    manager.stop();
    manager.wait_idle().await;

    // No error, session stays configured
    assert_eq!(manager.state(), SessionState::SessionConfigured);
}

#[tokio::test]
async fn start_then_stop_applies_in_submission_order() {
    let manager = manager_with(vec![device("Back", "cam:back", DevicePosition::Back)]);
    manager.discover_devices();
    manager.configure_session();

    manager.start();
    manager.stop();
    manager.wait_idle().await;

    assert_eq!(manager.state(), SessionState::Stopped);
}

#[tokio::test]
async fn switch_changes_device_when_two_exist() {
    let manager = manager_with(vec![
        device("Back", "cam:back", DevicePosition::Back),
        device("Front", "cam:front", DevicePosition::Front),
    ]);
    manager.discover_devices();
    manager.configure_session();
    manager.start();
    manager.wait_idle().await;

    let before = manager.active_device().expect("active before switch");
    manager.switch_camera();
    manager.wait_idle().await;
    let after = manager.active_device().expect("active after switch");

    assert_ne!(before.path, after.path);
    // Switch restarts the session
    assert_eq!(manager.state(), SessionState::Running);
}

#[tokio::test]
async fn switch_reassigns_the_same_device_when_alone() {
    let manager = manager_with(vec![device("Back", "cam:back", DevicePosition::Back)]);
    manager.discover_devices();
    manager.configure_session();
    manager.start();
    manager.wait_idle().await;

    let before = manager.active_device().expect("active before switch");
    manager.switch_camera();
    manager.wait_idle().await;
    let after = manager.active_device().expect("active after switch");

    assert_eq!(before.path, after.path);
    assert_eq!(manager.state(), SessionState::Running);
}

#[tokio::test]
async fn switching_twice_returns_to_the_original_device() {
    let manager = manager_with(vec![
        device("Back", "cam:back", DevicePosition::Back),
        device("Front", "cam:front", DevicePosition::Front),
    ]);
    manager.discover_devices();
    manager.configure_session();

    let original = manager.active_device().expect("original device");
    manager.switch_camera();
    manager.switch_camera();
    manager.wait_idle().await;

    let current = manager.active_device().expect("current device");
    assert_eq!(original.path, current.path);
}

#[tokio::test]
async fn capture_requires_a_running_session() {
    let manager = manager_with(vec![device("Back", "cam:back", DevicePosition::Back)]);
    manager.discover_devices();
    manager.configure_session();

    // Configured but never started
    assert!(manager.capture_frame().is_err());

    manager.start();
    manager.wait_idle().await;
    assert!(manager.capture_frame().is_ok());
}

/// Backend whose devices exist but can never be opened (busy hardware)
struct BusyBackend {
    devices: Vec<CameraDevice>,
}

impl CameraBackend for BusyBackend {
    fn enumerate_devices(&self) -> Vec<CameraDevice> {
        self.devices.clone()
    }

    fn open_stream(
        &self,
        device: &CameraDevice,
        _preset: SessionPreset,
    ) -> BackendResult<Box<dyn FrameSource>> {
        Err(BackendError::OpenFailed(format!(
            "{} is busy",
            device.name
        )))
    }

    fn is_available(&self) -> bool {
        true
    }
}

#[tokio::test]
async fn configuration_failure_leaves_session_without_input() {
    let manager = CameraSessionManager::new(Arc::new(BusyBackend {
        devices: vec![device("Back", "cam:back", DevicePosition::Back)],
    }));
    manager.discover_devices();
    manager.configure_session();

    // The session exists but the preview is non-functional
    assert_eq!(manager.state(), SessionState::SessionConfigured);
    assert!(!manager.session_has_input());

    manager.start();
    manager.wait_idle().await;
    assert!(manager.capture_frame().is_err());
}
