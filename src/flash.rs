// SPDX-License-Identifier: GPL-3.0-only

//! Flash modes and hardware flash LED control via Linux sysfs
//!
//! Discovers flash LEDs exposed at `/sys/class/leds/*:flash`. Uses torch
//! mode (brightness file) which is group-writable by `feedbackd`, avoiding
//! the root-only `flash_strobe`/`flash_brightness` interface.

use crate::constants;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Flash firing policy for a capture request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FlashMode {
    /// Never fire
    Off,
    /// Fire only when the scene is dark
    #[default]
    Auto,
    /// Always fire
    On,
}

impl FlashMode {
    /// Cycle to the next mode: Off -> Auto -> On -> Off
    pub fn next(self) -> Self {
        match self {
            FlashMode::Off => FlashMode::Auto,
            FlashMode::Auto => FlashMode::On,
            FlashMode::On => FlashMode::Off,
        }
    }

    /// Decide whether to fire for a scene with the given mean luma
    pub fn should_fire(&self, mean_luma: u8) -> bool {
        match self {
            FlashMode::Off => false,
            FlashMode::On => true,
            FlashMode::Auto => mean_luma < constants::flash::AUTO_LUMA_THRESHOLD,
        }
    }
}

impl std::str::FromStr for FlashMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "off" => Ok(FlashMode::Off),
            "auto" => Ok(FlashMode::Auto),
            "on" => Ok(FlashMode::On),
            other => Err(format!("Unknown flash mode: {}", other)),
        }
    }
}

/// A flash LED device discovered via sysfs
#[derive(Debug, Clone)]
pub struct FlashDevice {
    /// Sysfs path, e.g. `/sys/class/leds/white:flash`
    path: PathBuf,
    /// Maximum brightness value (from `max_brightness` file)
    max_brightness: u32,
    /// Human-readable name (directory basename)
    name: String,
}

impl FlashDevice {
    /// Scan `/sys/class/leds/` for entries matching `*:flash` and return
    /// all devices that we can write to.
    pub fn discover() -> Vec<FlashDevice> {
        Self::discover_in(Path::new("/sys/class/leds"))
    }

    fn discover_in(leds_dir: &Path) -> Vec<FlashDevice> {
        let Ok(entries) = std::fs::read_dir(leds_dir) else {
            debug!(path = %leds_dir.display(), "Cannot read LED directory — flash discovery skipped");
            return Vec::new();
        };

        let mut devices = Vec::new();

        for entry in entries.flatten() {
            let name = entry.file_name();
            let Some(name_str) = name.to_str() else {
                continue;
            };

            // Match entries like "white:flash", "yellow:flash"
            if !name_str.ends_with(":flash") {
                continue;
            }

            let led_path = entry.path();
            let max_brightness_path = led_path.join("max_brightness");

            let max_brightness = match std::fs::read_to_string(&max_brightness_path) {
                Ok(s) => match s.trim().parse::<u32>() {
                    Ok(v) if v > 0 => v,
                    _ => {
                        warn!(
                            path = %max_brightness_path.display(),
                            "Invalid max_brightness value"
                        );
                        continue;
                    }
                },
                Err(e) => {
                    warn!(
                        path = %max_brightness_path.display(),
                        error = %e,
                        "Cannot read max_brightness"
                    );
                    continue;
                }
            };

            // Verify we can write to brightness
            let brightness_path = led_path.join("brightness");
            if let Err(e) = std::fs::OpenOptions::new()
                .write(true)
                .open(&brightness_path)
            {
                warn!(
                    path = %brightness_path.display(),
                    error = %e,
                    "Cannot write brightness — user may need to be in 'feedbackd' group"
                );
                continue;
            }

            info!(name = name_str, max_brightness, "Discovered flash LED");

            devices.push(FlashDevice {
                path: led_path,
                max_brightness,
                name: name_str.to_string(),
            });
        }

        devices
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Turn the torch on (full brightness) or off
    pub fn set_torch(&self, on: bool) -> io::Result<()> {
        let value = if on { self.max_brightness } else { 0 };
        std::fs::write(self.path.join("brightness"), value.to_string())
    }
}

/// All flash LEDs on the system, driven together best-effort
pub struct FlashController {
    devices: Vec<FlashDevice>,
}

impl FlashController {
    pub fn discover() -> Self {
        Self {
            devices: FlashDevice::discover(),
        }
    }

    /// Whether any controllable LED was found
    pub fn is_present(&self) -> bool {
        !self.devices.is_empty()
    }

    pub fn torch_on(&self) {
        self.set_all(true);
    }

    pub fn torch_off(&self) {
        self.set_all(false);
    }

    fn set_all(&self, on: bool) {
        for device in &self.devices {
            if let Err(e) = device.set_torch(on) {
                warn!(name = device.name(), error = %e, "Failed to set flash LED");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flash_mode_cycles_through_all_modes() {
        assert_eq!(FlashMode::Off.next(), FlashMode::Auto);
        assert_eq!(FlashMode::Auto.next(), FlashMode::On);
        assert_eq!(FlashMode::On.next(), FlashMode::Off);
    }

    #[test]
    fn auto_fires_only_in_the_dark() {
        assert!(FlashMode::Auto.should_fire(10));
        assert!(!FlashMode::Auto.should_fire(200));
        assert!(FlashMode::On.should_fire(200));
        assert!(!FlashMode::Off.should_fire(10));
    }

    #[test]
    fn flash_mode_parses_case_insensitively() {
        assert_eq!("Auto".parse::<FlashMode>(), Ok(FlashMode::Auto));
        assert_eq!("OFF".parse::<FlashMode>(), Ok(FlashMode::Off));
        assert!("strobe".parse::<FlashMode>().is_err());
    }

    #[test]
    fn discovery_tolerates_missing_leds_dir() {
        let devices = FlashDevice::discover_in(Path::new("/nonexistent/leds"));
        assert!(devices.is_empty());
    }
}
