// SPDX-License-Identifier: GPL-3.0-only

//! Application-wide constants

/// Photo output naming
pub mod photo {
    /// Filename prefix for saved photos
    pub const FILE_PREFIX: &str = "IMG";

    /// Timestamp component of photo filenames
    pub const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";
}

/// Flash behavior tuning
pub mod flash {
    use std::time::Duration;

    /// Mean luma (0-255) below which auto flash fires
    pub const AUTO_LUMA_THRESHOLD: u8 = 64;

    /// Delay between torch-on and the flash-lit frame grab
    pub const FIRE_SETTLE: Duration = Duration::from_millis(120);
}

/// Synthetic backend frame geometry
pub mod synthetic {
    pub const FRAME_WIDTH: u32 = 1280;
    pub const FRAME_HEIGHT: u32 = 720;
}

/// Recognized photo file formats
pub mod file_formats {
    /// Extensions the photo library scans for
    pub const IMAGE_EXTENSIONS: [&str; 3] = ["jpg", "jpeg", "png"];

    /// Check if a file extension is a recognized image format
    pub fn is_image_extension(ext: &str) -> bool {
        IMAGE_EXTENSIONS.iter().any(|e| ext.eq_ignore_ascii_case(e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn image_extensions_match_case_insensitively() {
        assert!(file_formats::is_image_extension("jpg"));
        assert!(file_formats::is_image_extension("JPEG"));
        assert!(file_formats::is_image_extension("Png"));
        assert!(!file_formats::is_image_extension("mp4"));
        assert!(!file_formats::is_image_extension(""));
    }
}
