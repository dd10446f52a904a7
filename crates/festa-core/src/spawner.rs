use crate::constants::ACTIVE_BURST_CAP;
use crate::firework::{Burst, BurstId};
use crate::params::{FireworkParams, SpawnerParams};
use glam::Vec3;
use rand::Rng;
use smallvec::SmallVec;

/// Periodically launches bursts and keeps only the most recent ones.
///
/// Eviction is purely by age (FIFO), never by whether a burst has expired.
pub struct FireworkSpawner {
    params: SpawnerParams,
    particles_per_burst: usize,
    bursts: SmallVec<[Burst; ACTIVE_BURST_CAP]>,
    next_id: u64,
    accum_sec: f32,
    active: bool,
}

impl FireworkSpawner {
    pub fn new(params: SpawnerParams, firework: &FireworkParams) -> Self {
        Self {
            params,
            particles_per_burst: firework.particles,
            bursts: SmallVec::new(),
            next_id: 0,
            accum_sec: 0.0,
            active: false,
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn activate(&mut self) {
        if !self.active {
            log::debug!("[fireworks] spawner activated");
        }
        self.active = true;
    }

    /// Stop launching. Bursts already in flight keep animating.
    pub fn deactivate(&mut self) {
        if self.active {
            log::debug!("[fireworks] spawner deactivated");
        }
        self.active = false;
        self.accum_sec = 0.0;
    }

    pub fn bursts(&self) -> &[Burst] {
        &self.bursts
    }

    /// Launch one burst now, evicting the oldest when the cap is exceeded.
    pub fn spawn<R: Rng + ?Sized>(&mut self, rng: &mut R) -> BurstId {
        let id = BurstId(self.next_id);
        self.next_id += 1;
        let (min, max) = (self.params.min, self.params.max);
        let origin = Vec3::new(
            rng.gen_range(min[0]..=max[0]),
            rng.gen_range(min[1]..=max[1]),
            rng.gen_range(min[2]..=max[2]),
        );
        let color = Vec3::from(self.params.palette[rng.gen_range(0..self.params.palette.len())]);
        let burst = Burst::new(id, origin, color, self.particles_per_burst, rng);
        self.bursts.push(burst);
        while self.bursts.len() > ACTIVE_BURST_CAP {
            let evicted = self.bursts.remove(0);
            log::debug!("[fireworks] evicted burst {:?}", evicted.id());
        }
        log::debug!(
            "[fireworks] burst {:?} at ({:.1},{:.1},{:.1}) active={}",
            id,
            origin.x,
            origin.y,
            origin.z,
            self.bursts.len()
        );
        id
    }

    /// Advance the launch clock, spawning one burst per elapsed interval.
    /// Returns how many bursts were launched.
    pub fn advance<R: Rng + ?Sized>(&mut self, dt: f32, rng: &mut R) -> usize {
        if !self.active {
            return 0;
        }
        self.accum_sec += dt.max(0.0);
        let mut launched = 0;
        while self.accum_sec >= self.params.interval_sec {
            self.accum_sec -= self.params.interval_sec;
            self.spawn(rng);
            launched += 1;
        }
        launched
    }

    /// Step every burst still held by the spawner.
    pub fn update(&mut self, dt: f32) {
        for burst in self.bursts.iter_mut() {
            burst.update(dt);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn spawner() -> FireworkSpawner {
        FireworkSpawner::new(SpawnerParams::default(), &FireworkParams::default())
    }

    #[test]
    fn inactive_spawner_does_not_launch() {
        let mut s = spawner();
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(s.advance(10.0, &mut rng), 0);
        assert!(s.bursts().is_empty());
    }

    #[test]
    fn launches_once_per_interval() {
        let mut s = spawner();
        let mut rng = StdRng::seed_from_u64(1);
        s.activate();
        assert_eq!(s.advance(0.5, &mut rng), 0);
        assert_eq!(s.advance(0.5, &mut rng), 1);
        // A long frame catches up on every missed interval
        assert_eq!(s.advance(1.7, &mut rng), 2);
        assert_eq!(s.bursts().len(), 3);
    }

    #[test]
    fn deactivate_keeps_in_flight_bursts() {
        let mut s = spawner();
        let mut rng = StdRng::seed_from_u64(1);
        s.activate();
        s.advance(2.0, &mut rng);
        let before = s.bursts().len();
        s.deactivate();
        assert_eq!(s.advance(5.0, &mut rng), 0);
        assert_eq!(s.bursts().len(), before);
        s.update(0.1);
        assert_eq!(s.bursts().len(), before);
    }

    #[test]
    fn spawn_stays_within_volume_and_palette() {
        let mut s = spawner();
        let mut rng = StdRng::seed_from_u64(9);
        let params = SpawnerParams::default();
        for _ in 0..50 {
            s.spawn(&mut rng);
        }
        for b in s.bursts() {
            let o = b.origin();
            for i in 0..3 {
                assert!(o[i] >= params.min[i] && o[i] <= params.max[i]);
            }
            assert!(params.palette.iter().any(|c| Vec3::from(*c) == b.color()));
        }
    }
}
