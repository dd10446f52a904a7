//! Tunable scene parameters.
//!
//! Defaults mirror `constants.rs`; the web frontend overrides a few of them
//! from the page URL before building the scene.

use crate::constants::*;
use crate::error::{FxError, FxResult};

#[derive(Clone, Debug, PartialEq)]
pub struct DustParams {
    pub count: usize,
    pub cube_side: f32,
}

impl Default for DustParams {
    fn default() -> Self {
        Self {
            count: DUST_COUNT,
            cube_side: DUST_CUBE_SIDE,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct FireworkParams {
    pub particles: usize,
}

impl Default for FireworkParams {
    fn default() -> Self {
        Self {
            particles: BURST_PARTICLES,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct SpawnerParams {
    pub interval_sec: f32,
    pub min: [f32; 3],
    pub max: [f32; 3],
    pub palette: Vec<[f32; 3]>,
}

impl Default for SpawnerParams {
    fn default() -> Self {
        Self {
            interval_sec: SPAWN_INTERVAL_SEC,
            min: SPAWN_MIN,
            max: SPAWN_MAX,
            palette: FIREWORK_PALETTE.to_vec(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct RingParams {
    pub radius: f32,
    pub instances: usize,
    pub fft_size: u32,
}

impl Default for RingParams {
    fn default() -> Self {
        Self {
            radius: RING_RADIUS,
            instances: RING_INSTANCES,
            fft_size: RING_FFT_SIZE,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct FrameParams {
    pub width: f32,
    pub height: f32,
    pub bars: usize,
    pub fft_size: u32,
    pub smoothing: f64,
}

impl Default for FrameParams {
    fn default() -> Self {
        Self {
            width: FRAME_WIDTH,
            height: FRAME_HEIGHT,
            bars: FRAME_BARS,
            fft_size: FRAME_FFT_SIZE,
            smoothing: FRAME_SMOOTHING,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct StageParams {
    pub countdown_sec: f32,
    pub launch_sec: f32,
}

impl Default for StageParams {
    fn default() -> Self {
        Self {
            countdown_sec: COUNTDOWN_SEC,
            launch_sec: LAUNCH_TRANSITION_SEC,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct SceneParams {
    pub seed: u64,
    pub audio_url: String,
    pub volume: f32,
    pub dust: DustParams,
    pub firework: FireworkParams,
    pub spawner: SpawnerParams,
    pub ring: RingParams,
    pub frame: FrameParams,
    pub stage: StageParams,
}

impl Default for SceneParams {
    fn default() -> Self {
        Self {
            seed: 2025,
            audio_url: "audio/celebration.mp3".to_string(),
            volume: DEFAULT_VOLUME,
            dust: DustParams::default(),
            firework: FireworkParams::default(),
            spawner: SpawnerParams::default(),
            ring: RingParams::default(),
            frame: FrameParams::default(),
            stage: StageParams::default(),
        }
    }
}

impl SceneParams {
    /// Apply a single `key=value` override (as found in a URL query string).
    /// Unknown keys are ignored; malformed values are an error.
    pub fn apply_override(&mut self, key: &str, value: &str) -> FxResult<()> {
        let bad = || FxError::InvalidParams(format!("{key}={value}"));
        match key {
            "seed" => self.seed = value.parse().map_err(|_| bad())?,
            "dust" => self.dust.count = value.parse().map_err(|_| bad())?,
            "countdown" => self.stage.countdown_sec = value.parse().map_err(|_| bad())?,
            "volume" => self.volume = value.parse().map_err(|_| bad())?,
            "bars" => self.frame.bars = value.parse().map_err(|_| bad())?,
            "audio" => self.audio_url = value.to_string(),
            _ => log::debug!("ignoring unknown parameter {key}"),
        }
        Ok(())
    }

    /// Apply an override only if the result still validates; otherwise the
    /// params are left exactly as they were.
    pub fn apply_checked(&mut self, key: &str, value: &str) -> FxResult<()> {
        let mut next = self.clone();
        next.apply_override(key, value)?;
        next.validate()
            .map_err(|e| FxError::InvalidParams(format!("{key}={value}: {e}")))?;
        *self = next;
        Ok(())
    }

    pub fn validate(&self) -> FxResult<()> {
        let fail = |msg: &str| Err(FxError::InvalidParams(msg.to_string()));
        if self.dust.count == 0 || self.dust.cube_side <= 0.0 {
            return fail("dust field needs a positive count and cube size");
        }
        if self.firework.particles == 0 {
            return fail("bursts need at least one particle");
        }
        if self.spawner.interval_sec <= 0.0 || self.spawner.palette.is_empty() {
            return fail("spawner needs a positive interval and a palette");
        }
        if (0..3).any(|i| self.spawner.min[i] > self.spawner.max[i]) {
            return fail("spawn volume min exceeds max");
        }
        if self.ring.instances == 0 || self.ring.radius <= 0.0 {
            return fail("ring needs instances and a positive radius");
        }
        if self.frame.bars == 0 || self.frame.width <= 0.0 || self.frame.height <= 0.0 {
            return fail("frame needs bars and a positive size");
        }
        if !self.ring.fft_size.is_power_of_two() || !self.frame.fft_size.is_power_of_two() {
            return fail("fft sizes must be powers of two");
        }
        let stage = &self.stage;
        if !stage.countdown_sec.is_finite()
            || stage.countdown_sec < 0.0
            || !stage.launch_sec.is_finite()
            || stage.launch_sec <= 0.0
        {
            return fail("stage durations out of range");
        }
        if self.audio_url.is_empty() {
            return fail("audio url is empty");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        assert_eq!(SceneParams::default().validate(), Ok(()));
    }

    #[test]
    fn overrides_apply_and_reject_garbage() {
        let mut p = SceneParams::default();
        p.apply_override("dust", "500").unwrap();
        p.apply_override("seed", "7").unwrap();
        p.apply_override("audio", "a.ogg").unwrap();
        p.apply_override("nonsense", "1").unwrap();
        assert_eq!(p.dust.count, 500);
        assert_eq!(p.seed, 7);
        assert_eq!(p.audio_url, "a.ogg");
        assert!(matches!(
            p.apply_override("dust", "lots"),
            Err(FxError::InvalidParams(_))
        ));
    }

    #[test]
    fn validation_catches_zero_counts() {
        let mut p = SceneParams::default();
        p.dust.count = 0;
        assert!(p.validate().is_err());

        let mut p = SceneParams::default();
        p.spawner.palette.clear();
        assert!(p.validate().is_err());

        let mut p = SceneParams::default();
        p.ring.fft_size = 100;
        assert!(p.validate().is_err());

        let mut p = SceneParams::default();
        p.stage.countdown_sec = f32::NAN;
        assert!(p.validate().is_err());
    }

    #[test]
    fn out_of_range_override_is_rolled_back() {
        let mut p = SceneParams::default();
        p.apply_checked("seed", "9").unwrap();
        for (key, value) in [("dust", "0"), ("bars", "0"), ("countdown", "-1"), ("audio", "")] {
            let before = p.clone();
            assert!(
                matches!(p.apply_checked(key, value), Err(FxError::InvalidParams(_))),
                "{key}={value}"
            );
            assert_eq!(p, before, "{key}={value} leaked into params");
        }
        assert_eq!(p.seed, 9);
        assert_eq!(p.validate(), Ok(()));

        p.apply_checked("countdown", "3").unwrap();
        assert_eq!(p.stage.countdown_sec, 3.0);
    }
}
