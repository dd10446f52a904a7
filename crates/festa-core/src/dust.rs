use crate::camera::Ray;
use crate::color::hsl_to_rgb;
use crate::constants::*;
use crate::params::DustParams;
use glam::Vec3;
use rand::Rng;

/// Ambient point cloud that springs back to its rest positions and is pushed
/// away from the pointer ray. Buffers are sized once and mutated in place.
pub struct DustField {
    positions: Box<[Vec3]>,
    origins: Box<[Vec3]>,
    velocities: Box<[Vec3]>,
    colors: Box<[Vec3]>,
    shockwave: f32,
}

impl DustField {
    pub fn new<R: Rng + ?Sized>(params: &DustParams, rng: &mut R) -> Self {
        let half = params.cube_side * 0.5;
        let origins: Box<[Vec3]> = (0..params.count)
            .map(|_| {
                Vec3::new(
                    rng.gen_range(-half..=half),
                    rng.gen_range(-half..=half),
                    rng.gen_range(-half..=half),
                )
            })
            .collect();
        let colors: Box<[Vec3]> = (0..params.count)
            .map(|_| {
                let hue = DUST_HUE_MIN + rng.gen::<f32>() * DUST_HUE_SPAN;
                hsl_to_rgb(hue, DUST_SATURATION, DUST_LIGHTNESS)
            })
            .collect();
        Self {
            positions: origins.clone(),
            velocities: vec![Vec3::ZERO; params.count].into_boxed_slice(),
            origins,
            colors,
            shockwave: 0.0,
        }
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

    pub fn origins(&self) -> &[Vec3] {
        &self.origins
    }

    pub fn velocities(&self) -> &[Vec3] {
        &self.velocities
    }

    pub fn colors(&self) -> &[Vec3] {
        &self.colors
    }

    pub fn shockwave(&self) -> f32 {
        self.shockwave
    }

    /// Pointer-down impulse. Repeated calls simply reset the strength.
    pub fn trigger_shockwave(&mut self) {
        self.shockwave = SHOCKWAVE_TRIGGER;
    }

    /// Advance one rendered frame against the current pointer ray.
    pub fn update(&mut self, ray: &Ray) {
        self.shockwave *= SHOCKWAVE_DECAY;
        let radius = REPEL_RADIUS_BASE + self.shockwave * REPEL_RADIUS_SHOCK;
        let force = REPEL_FORCE_BASE + self.shockwave * REPEL_FORCE_SHOCK;

        let particles = self
            .positions
            .iter_mut()
            .zip(self.velocities.iter_mut())
            .zip(self.origins.iter());
        for ((pos, vel), origin) in particles {
            let closest = ray.closest_point(*pos);
            let away = *pos - closest;
            let d = away.length();
            if d < radius {
                *vel += away.normalize_or_zero() * ((radius - d) / radius) * force;
            }
            *vel += (*origin - *pos) * DUST_SPRING;
            *vel *= DUST_DAMPING;
            *pos += *vel;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn field(count: usize) -> DustField {
        let mut rng = StdRng::seed_from_u64(3);
        DustField::new(
            &DustParams {
                count,
                ..Default::default()
            },
            &mut rng,
        )
    }

    #[test]
    fn particles_start_inside_cube_at_rest() {
        let f = field(500);
        for p in f.positions() {
            assert!(p.abs().max_element() <= DUST_CUBE_SIDE * 0.5);
        }
        assert_eq!(f.positions(), f.origins());
        assert!(f.velocities().iter().all(|v| *v == Vec3::ZERO));
    }

    #[test]
    fn particle_near_ray_is_pushed_away() {
        let mut f = field(1);
        let p = f.positions()[0];
        // Ray passing 5 units beside the particle along -Z
        let ray = Ray::new(Vec3::new(p.x + 5.0, p.y, 500.0), Vec3::NEG_Z);
        f.update(&ray);
        assert!(f.positions()[0].x < p.x);
    }

    #[test]
    fn far_particle_only_feels_the_spring() {
        let mut f = field(1);
        let p = f.positions()[0];
        let ray = Ray::new(Vec3::new(p.x + 500.0, p.y, 500.0), Vec3::NEG_Z);
        f.update(&ray);
        assert_eq!(f.positions()[0], p);
    }

    #[test]
    fn displaced_particles_return_home() {
        let mut f = field(50);
        let ray = Ray::new(Vec3::new(0.0, 0.0, 500.0), Vec3::NEG_Z);
        f.trigger_shockwave();
        for _ in 0..5 {
            f.update(&ray);
        }
        let far_ray = Ray::new(Vec3::new(10_000.0, 0.0, 0.0), Vec3::X);
        for _ in 0..600 {
            f.update(&far_ray);
        }
        for (p, o) in f.positions().iter().zip(f.origins()) {
            assert!((*p - *o).length() < 0.5);
        }
    }
}
