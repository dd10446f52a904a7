use super::BarInstance;
use crate::color::hsl_to_rgb;
use crate::constants::*;
use crate::params::RingParams;
use crate::spectrum::{FrequencySource, Spectrum};
use glam::{EulerRot, Mat4, Quat, Vec3};
use std::f32::consts::{FRAC_PI_2, TAU};

/// Ring of bars around the origin, each stretched radially by one frequency bin.
pub struct RingVisualizer {
    radius: f32,
    bars: Box<[BarInstance]>,
    spectrum: Spectrum,
    group_rotation: Vec3,
}

impl RingVisualizer {
    pub fn new(params: &RingParams) -> Self {
        let n = params.instances;
        let mut vis = Self {
            radius: params.radius,
            bars: vec![BarInstance::default(); n].into_boxed_slice(),
            spectrum: Spectrum::with_bins(params.fft_size as usize / 2),
            group_rotation: Vec3::ZERO,
        };
        for i in 0..n {
            vis.place(i, RING_SCALE_BASE);
        }
        vis
    }

    pub fn bars(&self) -> &[BarInstance] {
        &self.bars
    }

    pub fn spectrum(&self) -> &Spectrum {
        &self.spectrum
    }

    /// Euler angles (XYZ) of the whole ring.
    pub fn group_rotation(&self) -> Vec3 {
        self.group_rotation
    }

    pub fn group_matrix(&self) -> Mat4 {
        let r = self.group_rotation;
        Mat4::from_quat(Quat::from_euler(EulerRot::XYZ, r.x, r.y, r.z))
    }

    /// Bin sampled by instance `i`: the ring spans the lower half of the spectrum.
    pub fn bin_index(i: usize, instances: usize, bins: usize) -> usize {
        if instances == 0 || bins == 0 {
            return 0;
        }
        let idx = (i as f32 / instances as f32 * (bins / 2) as f32).floor() as usize;
        idx.min(bins - 1)
    }

    pub fn update(&mut self, source: Option<&mut dyn FrequencySource>, elapsed_sec: f32) {
        let Some(source) = source else {
            return;
        };
        self.spectrum.refresh(source);
        let average = self.spectrum.average();
        let n = self.bars.len();
        for i in 0..n {
            let idx = Self::bin_index(i, n, self.spectrum.len());
            let bin = self.spectrum.bins().get(idx).copied().unwrap_or(0) as f32;
            let scale_y = RING_SCALE_BASE + bin / RING_BIN_DIVISOR + average / RING_AVERAGE_DIVISOR;
            self.place(i, scale_y);
        }

        let hue = (elapsed_sec * RING_HUE_PER_SEC).rem_euclid(1.0);
        let tint = hsl_to_rgb(hue, RING_SATURATION, RING_LIGHTNESS);
        let emissive = RING_EMISSIVE_BASE + average / RING_EMISSIVE_AVERAGE_DIVISOR;
        for bar in self.bars.iter_mut() {
            bar.color = tint;
            bar.emissive = emissive;
        }

        let drift = |axis: usize| {
            let [freq, amp] = RING_DRIFT[axis];
            (elapsed_sec * freq).sin() * amp
        };
        self.group_rotation = Vec3::new(drift(0), drift(1), drift(2));
    }

    fn place(&mut self, i: usize, scale_y: f32) {
        let angle = i as f32 / self.bars.len() as f32 * TAU;
        let reach = self.radius + scale_y * 0.5;
        let bar = &mut self.bars[i];
        bar.position = Vec3::new(angle.cos() * reach, angle.sin() * reach, 0.0);
        // Local Y points along the radius
        bar.rotation_z = angle - FRAC_PI_2;
        bar.scale = scale_y;
    }
}
