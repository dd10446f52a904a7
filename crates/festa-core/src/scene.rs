use crate::audio::AudioControls;
use crate::camera::Ray;
use crate::constants::{LAUNCH_SALVO, SPRITE_SIZE};
use crate::dust::DustField;
use crate::error::FxResult;
use crate::params::SceneParams;
use crate::spawner::FireworkSpawner;
use crate::spectrum::FrequencySource;
use crate::stage::{Stage, StageEvent};
use crate::texture::{sprite_texture, SpriteTexture};
use crate::visualizer::{FrameVisualizer, RingVisualizer};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Everything a single rendered frame needs from the outside world.
///
/// Missing collaborators are `None` and the matching effect skips the frame.
#[derive(Default)]
pub struct FrameInput<'a> {
    pub dt: f32,
    pub elapsed: f32,
    pub pointer_ray: Option<Ray>,
    pub ring_source: Option<&'a mut dyn FrequencySource>,
    pub frame_source: Option<&'a mut dyn FrequencySource>,
}

/// All effects of the celebration, stepped together once per frame.
pub struct Scene {
    pub stage: Stage,
    pub dust: DustField,
    pub fireworks: FireworkSpawner,
    pub ring: RingVisualizer,
    pub frame: FrameVisualizer,
    pub audio: AudioControls,
    pub sprite: SpriteTexture,
    rng: StdRng,
    torn_down: bool,
}

impl Scene {
    pub fn new(params: &SceneParams) -> FxResult<Self> {
        params.validate()?;
        let mut rng = StdRng::seed_from_u64(params.seed);
        let dust = DustField::new(&params.dust, &mut rng);
        log::info!(
            "[scene] seed={} dust={} ring={} frame_bars={}",
            params.seed,
            dust.len(),
            params.ring.instances,
            params.frame.bars
        );
        Ok(Self {
            stage: Stage::new(&params.stage),
            dust,
            fireworks: FireworkSpawner::new(params.spawner.clone(), &params.firework),
            ring: RingVisualizer::new(&params.ring),
            frame: FrameVisualizer::new(&params.frame),
            audio: AudioControls::with_volume(params.volume),
            sprite: sprite_texture(SPRITE_SIZE),
            rng,
            torn_down: false,
        })
    }

    pub fn pointer_down(&mut self) {
        self.dust.trigger_shockwave();
    }

    pub fn launch(&mut self) -> Option<StageEvent> {
        if self.torn_down {
            return None;
        }
        let event = self.stage.launch();
        if event.is_some() {
            self.on_event(StageEvent::LaunchStarted);
        }
        event
    }

    pub fn step(&mut self, input: FrameInput<'_>) -> Option<StageEvent> {
        let event = if self.torn_down {
            None
        } else {
            self.stage.tick(input.dt)
        };
        if let Some(ev) = event {
            self.on_event(ev);
        }

        if let Some(ray) = &input.pointer_ray {
            self.dust.update(ray);
        }
        self.fireworks.advance(input.dt, &mut self.rng);
        self.fireworks.update(input.dt);
        self.ring.update(input.ring_source, input.elapsed);
        self.frame.update(input.frame_source);
        event
    }

    /// Stop launching fireworks and silence audio. Bursts in flight finish
    /// on their own.
    pub fn teardown(&mut self) {
        self.torn_down = true;
        self.fireworks.deactivate();
        self.audio.pause();
    }

    fn on_event(&mut self, event: StageEvent) {
        match event {
            StageEvent::LaunchStarted => {
                for _ in 0..LAUNCH_SALVO {
                    self.fireworks.spawn(&mut self.rng);
                }
            }
            StageEvent::CelebrationStarted => {
                self.fireworks.activate();
                self.audio.play();
            }
            StageEvent::CountdownFinished => {}
        }
    }
}
