use crate::constants::DEFAULT_VOLUME;

/// Play/pause/volume state shared by the UI and the audio element.
///
/// Every setter is last-writer-wins; the web layer mirrors the result onto the
/// media element after each change.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AudioControls {
    volume: f32,
    playing: bool,
}

impl Default for AudioControls {
    fn default() -> Self {
        Self {
            volume: DEFAULT_VOLUME,
            playing: false,
        }
    }
}

impl AudioControls {
    pub fn with_volume(volume: f32) -> Self {
        let mut c = Self::default();
        c.set_volume(volume);
        c
    }

    /// Volume as a gain multiplier in 0..=1. NaN is treated as silence.
    pub fn volume(&self) -> f32 {
        self.volume
    }

    pub fn set_volume(&mut self, volume: f32) {
        self.volume = if volume.is_nan() {
            0.0
        } else {
            volume.clamp(0.0, 1.0)
        };
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn play(&mut self) {
        self.playing = true;
    }

    pub fn pause(&mut self) {
        self.playing = false;
    }

    pub fn toggle(&mut self) -> bool {
        self.playing = !self.playing;
        self.playing
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn volume_is_a_clamped_multiplier() {
        let mut c = AudioControls::default();
        c.set_volume(75.0);
        assert_eq!(c.volume(), 1.0);
        c.set_volume(-1.0);
        assert_eq!(c.volume(), 0.0);
        c.set_volume(f32::NAN);
        assert_eq!(c.volume(), 0.0);
        c.set_volume(0.25);
        assert_eq!(c.volume(), 0.25);
    }

    #[test]
    fn play_pause_are_idempotent() {
        let mut c = AudioControls::default();
        c.play();
        c.play();
        assert!(c.is_playing());
        c.pause();
        c.pause();
        assert!(!c.is_playing());
        assert!(c.toggle());
        assert!(!c.toggle());
    }
}
