//! Page media toggles from the settings menu.
//!
//! Music off mutes every `<audio>` and `<video>`; video off pauses and hides
//! every `<video>`. The toolbar re-applies the flags on each page load.

use tracing::info;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaToggles {
    music: bool,
    video: bool,
}

impl MediaToggles {
    pub fn new() -> Self {
        Self {
            music: true,
            video: true,
        }
    }

    pub fn music_enabled(&self) -> bool {
        self.music
    }

    pub fn video_enabled(&self) -> bool {
        self.video
    }

    /// Flips the music flag and returns the new state.
    pub fn toggle_music(&mut self) -> bool {
        self.music = !self.music;
        info!("Music {}", if self.music { "enabled" } else { "disabled" });
        self.music
    }

    /// Flips the video flag and returns the new state.
    pub fn toggle_video(&mut self) -> bool {
        self.video = !self.video;
        info!("Video {}", if self.video { "enabled" } else { "disabled" });
        self.video
    }

    /// Script applying both flags to the current page.
    pub fn apply_script(&self) -> String {
        format!(
            "if(window.__stark_applyMedia)window.__stark_applyMedia({},{})",
            self.music, self.video
        )
    }
}

impl Default for MediaToggles {
    fn default() -> Self {
        Self::new()
    }
}
