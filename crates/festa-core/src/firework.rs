use crate::constants::*;
use glam::Vec3;
use rand::Rng;
use std::f32::consts::TAU;

/// Unique, monotonically increasing burst identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BurstId(pub u64);

/// Where expired sub-particles are parked so they fall outside the view.
pub const HIDDEN_POSITION: Vec3 = Vec3::new(0.0, BURST_HIDDEN_Y, 0.0);

/// Uniformly distributed unit vector (y is the polar axis).
///
/// The inclination is drawn as `acos(2v - 1)` so that samples do not bunch
/// up at the poles.
pub fn random_unit_vector<R: Rng + ?Sized>(rng: &mut R) -> Vec3 {
    let azimuth = rng.gen::<f32>() * TAU;
    let inclination = (2.0 * rng.gen::<f32>() - 1.0).clamp(-1.0, 1.0).acos();
    let (sin_i, cos_i) = inclination.sin_cos();
    let (sin_a, cos_a) = azimuth.sin_cos();
    Vec3::new(sin_i * cos_a, cos_i, sin_i * sin_a)
}

/// One firework explosion: a fixed set of sub-particles that fly outward,
/// fall, slow down and expire. Expired slots stay in place.
pub struct Burst {
    id: BurstId,
    origin: Vec3,
    color: Vec3,
    positions: Box<[Vec3]>,
    velocities: Box<[Vec3]>,
    lives: Box<[f32]>,
    opacity: f32,
}

impl Burst {
    pub fn new<R: Rng + ?Sized>(
        id: BurstId,
        origin: Vec3,
        color: Vec3,
        count: usize,
        rng: &mut R,
    ) -> Self {
        let velocities: Box<[Vec3]> = (0..count)
            .map(|_| random_unit_vector(rng) * rng.gen_range(BURST_SPEED_MIN..=BURST_SPEED_MAX))
            .collect();
        let lives: Box<[f32]> = (0..count)
            .map(|_| rng.gen_range(BURST_LIFE_MIN..=BURST_LIFE_MAX))
            .collect();
        Self {
            id,
            origin,
            color,
            positions: vec![origin; count].into_boxed_slice(),
            velocities,
            lives,
            opacity: 1.0,
        }
    }

    pub fn id(&self) -> BurstId {
        self.id
    }

    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    pub fn color(&self) -> Vec3 {
        self.color
    }

    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    pub fn velocities(&self) -> &[Vec3] {
        &self.velocities
    }

    pub fn lives(&self) -> &[f32] {
        &self.lives
    }

    pub fn live_count(&self) -> usize {
        self.lives.iter().filter(|l| **l > 0.0).count()
    }

    /// True once every sub-particle has expired. The burst is still kept
    /// until the spawner evicts it.
    pub fn is_spent(&self) -> bool {
        self.live_count() == 0
    }

    pub fn update(&mut self, dt: f32) {
        let dt = dt.max(0.0);
        let step = BURST_SPEED_SCALE * dt;
        let particles = self
            .positions
            .iter_mut()
            .zip(self.velocities.iter_mut())
            .zip(self.lives.iter_mut());
        for ((pos, vel), life) in particles {
            if *life <= 0.0 {
                continue;
            }
            *pos += *vel * step;
            vel.y -= BURST_GRAVITY;
            *vel *= BURST_DRAG;
            *life -= BURST_LIFE_DECAY_PER_SEC * dt;
            if *life <= 0.0 {
                *pos = HIDDEN_POSITION;
            }
        }
        // Fades on its own clock, independent of sub-particle life
        self.opacity = (self.opacity - BURST_FADE_PER_SEC * dt).max(0.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn burst(count: usize) -> Burst {
        let mut rng = StdRng::seed_from_u64(11);
        Burst::new(BurstId(1), Vec3::new(1.0, 20.0, -3.0), Vec3::X, count, &mut rng)
    }

    #[test]
    fn new_burst_starts_at_origin_fully_alive() {
        let b = burst(80);
        assert_eq!(b.len(), 80);
        assert!(b.positions().iter().all(|p| *p == b.origin()));
        assert!(b
            .lives()
            .iter()
            .all(|l| (BURST_LIFE_MIN..=BURST_LIFE_MAX).contains(l)));
        for v in b.velocities() {
            let s = v.length();
            assert!(s >= BURST_SPEED_MIN - 1e-4 && s <= BURST_SPEED_MAX + 1e-4);
        }
        assert_eq!(b.opacity(), 1.0);
    }

    #[test]
    fn expired_particles_are_parked_not_removed() {
        let mut b = burst(40);
        for _ in 0..120 {
            b.update(1.0 / 60.0);
        }
        assert_eq!(b.len(), 40);
        assert!(b.is_spent());
        assert!(b.positions().iter().all(|p| *p == HIDDEN_POSITION));
    }

    #[test]
    fn opacity_fades_on_its_own_rate() {
        let mut b = burst(10);
        b.update(1.0);
        assert!((b.opacity() - (1.0 - BURST_FADE_PER_SEC)).abs() < 1e-6);
        for _ in 0..10 {
            b.update(1.0);
        }
        assert_eq!(b.opacity(), 0.0);
    }

    #[test]
    fn zero_dt_keeps_positions() {
        let mut b = burst(10);
        b.update(0.0);
        assert!(b.positions().iter().all(|p| *p == b.origin()));
    }
}
