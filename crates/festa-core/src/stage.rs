use crate::constants::{CAMERA_Z, CAMERA_Z_COUNTDOWN};
use crate::params::StageParams;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Phase {
    Countdown { remaining: f32 },
    Ready,
    Launching { elapsed: f32 },
    Celebrating,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StageEvent {
    CountdownFinished,
    LaunchStarted,
    CelebrationStarted,
}

/// Countdown, launch transition and celebration, in that order.
pub struct Stage {
    phase: Phase,
    launch_sec: f32,
}

impl Stage {
    pub fn new(params: &StageParams) -> Self {
        let phase = if params.countdown_sec > 0.0 {
            Phase::Countdown {
                remaining: params.countdown_sec,
            }
        } else {
            Phase::Ready
        };
        Self {
            phase,
            launch_sec: params.launch_sec.max(f32::EPSILON),
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_celebrating(&self) -> bool {
        self.phase == Phase::Celebrating
    }

    /// Start the launch transition. Allowed during the countdown (skips it)
    /// and once it is finished; ignored afterwards.
    pub fn launch(&mut self) -> Option<StageEvent> {
        match self.phase {
            Phase::Countdown { .. } | Phase::Ready => {
                log::info!("[stage] launch");
                self.phase = Phase::Launching { elapsed: 0.0 };
                Some(StageEvent::LaunchStarted)
            }
            _ => None,
        }
    }

    pub fn tick(&mut self, dt: f32) -> Option<StageEvent> {
        let dt = dt.max(0.0);
        match self.phase {
            Phase::Countdown { remaining } => {
                let remaining = remaining - dt;
                if remaining <= 0.0 {
                    log::info!("[stage] countdown finished");
                    self.phase = Phase::Ready;
                    Some(StageEvent::CountdownFinished)
                } else {
                    self.phase = Phase::Countdown { remaining };
                    None
                }
            }
            Phase::Launching { elapsed } => {
                let elapsed = elapsed + dt;
                if elapsed >= self.launch_sec {
                    log::info!("[stage] celebrating");
                    self.phase = Phase::Celebrating;
                    Some(StageEvent::CelebrationStarted)
                } else {
                    self.phase = Phase::Launching { elapsed };
                    None
                }
            }
            Phase::Ready | Phase::Celebrating => None,
        }
    }

    /// Whole seconds left on the countdown, or `None` outside it.
    pub fn countdown_label(&self) -> Option<String> {
        match self.phase {
            Phase::Countdown { remaining } => Some(format!("{}", remaining.ceil() as u32)),
            _ => None,
        }
    }

    /// 0 before launch, 1 once celebrating; smoothstep in between.
    pub fn launch_progress(&self) -> f32 {
        match self.phase {
            Phase::Countdown { .. } | Phase::Ready => 0.0,
            Phase::Launching { elapsed } => {
                let t = (elapsed / self.launch_sec).clamp(0.0, 1.0);
                t * t * (3.0 - 2.0 * t)
            }
            Phase::Celebrating => 1.0,
        }
    }

    /// Camera distance for the current phase: pulled back until launch, then
    /// dollies in.
    pub fn camera_z(&self) -> f32 {
        CAMERA_Z_COUNTDOWN + (CAMERA_Z - CAMERA_Z_COUNTDOWN) * self.launch_progress()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stage(countdown: f32) -> Stage {
        Stage::new(&StageParams {
            countdown_sec: countdown,
            launch_sec: 2.0,
        })
    }

    #[test]
    fn full_sequence() {
        let mut s = stage(3.0);
        assert_eq!(s.countdown_label().as_deref(), Some("3"));
        assert_eq!(s.tick(1.5), None);
        assert_eq!(s.countdown_label().as_deref(), Some("2"));
        assert_eq!(s.tick(1.5), Some(StageEvent::CountdownFinished));
        assert_eq!(s.phase(), Phase::Ready);
        assert_eq!(s.tick(10.0), None);
        assert_eq!(s.launch(), Some(StageEvent::LaunchStarted));
        assert_eq!(s.tick(1.0), None);
        assert!((s.launch_progress() - 0.5).abs() < 1e-6);
        assert_eq!(s.tick(1.0), Some(StageEvent::CelebrationStarted));
        assert!(s.is_celebrating());
        assert_eq!(s.camera_z(), CAMERA_Z);
    }

    #[test]
    fn launch_can_skip_countdown_but_not_repeat() {
        let mut s = stage(10.0);
        assert_eq!(s.camera_z(), CAMERA_Z_COUNTDOWN);
        assert_eq!(s.launch(), Some(StageEvent::LaunchStarted));
        assert_eq!(s.launch(), None);
        s.tick(5.0);
        assert_eq!(s.launch(), None);
    }

    #[test]
    fn zero_countdown_starts_ready() {
        let s = stage(0.0);
        assert_eq!(s.phase(), Phase::Ready);
        assert_eq!(s.countdown_label(), None);
    }
}
