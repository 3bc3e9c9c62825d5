// SPDX-License-Identifier: GPL-3.0-only

//! Camera session lifecycle manager
//!
//! The manager owns the device inventory and the single active capture
//! session, and provides:
//! - Device discovery with front/back classification
//! - Session construction (photo preset, JPEG output downstream)
//! - Start/stop/switch lifecycle applied in submission order

use super::types::{CameraDevice, CameraFrame, DevicePosition, SessionPreset};
use super::{CameraBackend, FrameSource};
use crate::errors::CameraError;
use futures::channel::oneshot;
use std::fmt;
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// Lifecycle states of the capture session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    /// No devices discovered yet
    #[default]
    Uninitialized,
    /// Devices discovered, default device selected
    DeviceReady,
    /// Capture session built for the active device
    SessionConfigured,
    /// Frame delivery in progress
    Running,
    /// Frame delivery ended
    Stopped,
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionState::Uninitialized => write!(f, "uninitialized"),
            SessionState::DeviceReady => write!(f, "device-ready"),
            SessionState::SessionConfigured => write!(f, "configured"),
            SessionState::Running => write!(f, "running"),
            SessionState::Stopped => write!(f, "stopped"),
        }
    }
}

/// The active capture pipeline: device → input stream → photo output
///
/// A session whose input could not be attached stays alive but delivers no
/// frames (non-functional preview).
pub struct CaptureSession {
    device: CameraDevice,
    preset: SessionPreset,
    source: Option<Box<dyn FrameSource>>,
    running: bool,
}

impl CaptureSession {
    fn new(
        device: CameraDevice,
        preset: SessionPreset,
        source: Option<Box<dyn FrameSource>>,
    ) -> Self {
        Self {
            device,
            preset,
            source,
            running: false,
        }
    }

    pub fn device(&self) -> &CameraDevice {
        &self.device
    }

    pub fn preset(&self) -> SessionPreset {
        self.preset
    }

    pub fn has_input(&self) -> bool {
        self.source.is_some()
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    fn start(&mut self) {
        if self.running {
            debug!(device = %self.device.name, "Session already running");
            return;
        }
        self.running = true;
        info!(device = %self.device.name, "Capture session started");
    }

    fn stop(&mut self) {
        if !self.running {
            debug!(device = %self.device.name, "Session already stopped");
            return;
        }
        self.running = false;
        info!(device = %self.device.name, "Capture session stopped");
    }

    fn grab_frame(&mut self) -> Result<CameraFrame, CameraError> {
        if !self.running {
            return Err(CameraError::NotRunning);
        }
        let source = self.source.as_mut().ok_or(CameraError::NoInput)?;
        source
            .grab()
            .map_err(|e| CameraError::BackendError(e.to_string()))
    }
}

/// Commands applied by the session worker in FIFO submission order
enum SessionCommand {
    Start,
    Stop,
    Switch,
    /// Acknowledges that every previously submitted command has been applied
    Sync(oneshot::Sender<()>),
}

/// Internal manager state
#[derive(Default)]
struct ManagerState {
    back: Option<CameraDevice>,
    front: Option<CameraDevice>,
    active: Option<CameraDevice>,
    session: Option<CaptureSession>,
    state: SessionState,
}

/// Camera session manager
///
/// Owns the device inventory and the single active capture session.
/// Thread-safe and cheap to clone.
#[derive(Clone)]
pub struct CameraSessionManager {
    backend: Arc<dyn CameraBackend>,
    state: Arc<Mutex<ManagerState>>,
    commands: mpsc::UnboundedSender<SessionCommand>,
}

impl CameraSessionManager {
    /// Create a manager on the given backend and spawn its session worker
    ///
    /// Must be called from within a tokio runtime. The worker exits when the
    /// last manager handle is dropped.
    pub fn new(backend: Arc<dyn CameraBackend>) -> Self {
        let state = Arc::new(Mutex::new(ManagerState::default()));
        let (commands, rx) = mpsc::unbounded_channel();

        tokio::spawn(run_worker(Arc::clone(&state), Arc::clone(&backend), rx));

        Self {
            backend,
            state,
            commands,
        }
    }

    /// Current lifecycle state
    pub fn state(&self) -> SessionState {
        self.state.lock().unwrap().state
    }

    /// The currently selected device, if any
    pub fn active_device(&self) -> Option<CameraDevice> {
        self.state.lock().unwrap().active.clone()
    }

    /// Devices retained by discovery (back slot first, then front)
    pub fn devices(&self) -> Vec<CameraDevice> {
        let state = self.state.lock().unwrap();
        state
            .back
            .iter()
            .chain(state.front.iter())
            .cloned()
            .collect()
    }

    /// Whether the active session has a usable input
    pub fn session_has_input(&self) -> bool {
        self.state
            .lock()
            .unwrap()
            .session
            .as_ref()
            .is_some_and(|s| s.has_input())
    }

    /// Enumerate camera hardware and select the default device
    ///
    /// Partitions devices by position and retains one back-facing and one
    /// front-facing reference. The back camera becomes the default active
    /// device when present, else the front one. An empty enumeration is
    /// logged and leaves the manager uninitialized.
    pub fn discover_devices(&self) {
        let devices = self.backend.enumerate_devices();
        let mut guard = self.state.lock().unwrap();
        let state = &mut *guard;

        for device in devices {
            match device.position {
                DevicePosition::Back if state.back.is_none() => state.back = Some(device),
                DevicePosition::Front if state.front.is_none() => state.front = Some(device),
                _ => {
                    debug!(device = %device.name, position = %device.position, "Ignoring device")
                }
            }
        }

        state.active = state.back.clone().or_else(|| state.front.clone());

        match &state.active {
            Some(device) => {
                info!(device = %device.name, position = %device.position, "Selected default camera");
                state.state = SessionState::DeviceReady;
            }
            None => warn!("No camera devices found"),
        }
    }

    /// Build a new capture session bound to the active device
    ///
    /// Uses the fixed photo quality preset. A configuration failure is
    /// logged and leaves the session without an input; callers must tolerate
    /// the resulting non-functional preview.
    pub fn configure_session(&self) {
        let mut state = self.state.lock().unwrap();
        configure_locked(&mut state, self.backend.as_ref());
    }

    /// Begin frame delivery (fire-and-forget, applied in submission order)
    pub fn start(&self) {
        self.submit(SessionCommand::Start);
    }

    /// End frame delivery (fire-and-forget, applied in submission order)
    ///
    /// A stop submitted after a start is always applied after it. Stopping
    /// without a prior start is a no-op.
    pub fn stop(&self) {
        self.submit(SessionCommand::Stop);
    }

    /// Switch between front and back camera
    ///
    /// Applied as one worker step: stop the current session, flip the active
    /// device, reconfigure, restart. With a single discovered device the
    /// flip reassigns the same device.
    pub fn switch_camera(&self) {
        self.submit(SessionCommand::Switch);
    }

    /// Wait until every previously submitted command has been applied
    pub async fn wait_idle(&self) {
        let (tx, rx) = oneshot::channel();
        self.submit(SessionCommand::Sync(tx));
        let _ = rx.await;
    }

    /// Grab one frame from the running session
    pub fn capture_frame(&self) -> Result<CameraFrame, CameraError> {
        let mut state = self.state.lock().unwrap();
        let session = state.session.as_mut().ok_or(CameraError::NotConfigured)?;
        session.grab_frame()
    }

    fn submit(&self, command: SessionCommand) {
        if self.commands.send(command).is_err() {
            warn!("Session worker is gone, command dropped");
        }
    }
}

/// Applies session commands in FIFO order
///
/// Running start/stop/switch on a single task gives them a defined
/// happens-before: a stop submitted after a start can never overtake it.
async fn run_worker(
    state: Arc<Mutex<ManagerState>>,
    backend: Arc<dyn CameraBackend>,
    mut commands: mpsc::UnboundedReceiver<SessionCommand>,
) {
    while let Some(command) = commands.recv().await {
        match command {
            SessionCommand::Start => {
                let mut guard = state.lock().unwrap();
                let state = &mut *guard;
                match state.session.as_mut() {
                    Some(session) => {
                        session.start();
                        state.state = SessionState::Running;
                    }
                    None => warn!("Start requested without a configured session"),
                }
            }
            SessionCommand::Stop => {
                let mut guard = state.lock().unwrap();
                let state = &mut *guard;
                match state.session.as_mut() {
                    Some(session) if session.is_running() => {
                        session.stop();
                        state.state = SessionState::Stopped;
                    }
                    _ => debug!("Stop requested with no running session"),
                }
            }
            SessionCommand::Switch => {
                let mut guard = state.lock().unwrap();
                switch_locked(&mut guard, backend.as_ref());
            }
            SessionCommand::Sync(ack) => {
                let _ = ack.send(());
            }
        }
    }
}

/// Stop the current session, flip the active device, reconfigure, restart
fn switch_locked(state: &mut ManagerState, backend: &dyn CameraBackend) {
    if let Some(session) = state.session.as_mut()
        && session.is_running()
    {
        session.stop();
    }

    let next = match state.active.as_ref().map(|d| d.position) {
        Some(DevicePosition::Back) => state.front.clone().or_else(|| state.back.clone()),
        Some(_) => state.back.clone().or_else(|| state.front.clone()),
        None => {
            warn!("Switch requested before discovery");
            return;
        }
    };

    state.active = next;
    if let Some(device) = &state.active {
        info!(device = %device.name, position = %device.position, "Switched camera");
    }

    configure_locked(state, backend);

    if let Some(session) = state.session.as_mut() {
        session.start();
        state.state = SessionState::Running;
    }
}

/// Replace the session with one bound to the active device
fn configure_locked(state: &mut ManagerState, backend: &dyn CameraBackend) {
    let Some(device) = state.active.clone() else {
        warn!("Cannot configure session without a device");
        return;
    };

    // The previous session is fully stopped before the rebuild
    if let Some(mut old) = state.session.take()
        && old.is_running()
    {
        old.stop();
    }

    let preset = SessionPreset::Photo;
    let source = match backend.open_stream(&device, preset) {
        Ok(source) => Some(source),
        Err(e) => {
            warn!(
                device = %device.name,
                error = %e,
                "Session configuration failed, input not attached"
            );
            None
        }
    };

    state.session = Some(CaptureSession::new(device, preset, source));
    state.state = SessionState::SessionConfigured;
}
