use super::BarInstance;
use crate::color::hsl_to_rgb;
use crate::constants::*;
use crate::params::FrameParams;
use crate::spectrum::{FrequencySource, Spectrum};
use glam::Vec3;
use std::f32::consts::{FRAC_PI_2, PI};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Edge {
    Top,
    Right,
    Bottom,
    Left,
}

impl Edge {
    /// Rotation about Z that turns a bar's local Y axis to face away from the frame.
    pub fn outward_rotation(self) -> f32 {
        match self {
            Edge::Top => 0.0,
            Edge::Right => -FRAC_PI_2,
            Edge::Bottom => PI,
            Edge::Left => FRAC_PI_2,
        }
    }

    pub fn scale_axis(self) -> ScaleAxis {
        match self {
            Edge::Top | Edge::Bottom => ScaleAxis::Vertical,
            Edge::Left | Edge::Right => ScaleAxis::Horizontal,
        }
    }
}

/// World axis along which a bar grows.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScaleAxis {
    Vertical,
    Horizontal,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BarPlacement {
    pub position: Vec3,
    pub edge: Edge,
    pub rotation_z: f32,
}

/// Spread `count` bars evenly along the perimeter of a `width` x `height`
/// rectangle centered at the origin, walking clockwise from the top-left corner.
pub fn frame_placements(width: f32, height: f32, count: usize) -> Vec<BarPlacement> {
    let (hw, hh) = (width * 0.5, height * 0.5);
    let perimeter = 2.0 * (width + height);
    let spacing = if count == 0 { 0.0 } else { perimeter / count as f32 };
    (0..count)
        .map(|i| {
            let d = i as f32 * spacing;
            let (edge, x, y) = if d < width {
                (Edge::Top, -hw + d, hh)
            } else if d < width + height {
                (Edge::Right, hw, hh - (d - width))
            } else if d < 2.0 * width + height {
                (Edge::Bottom, hw - (d - width - height), -hh)
            } else {
                (Edge::Left, -hw, -hh + (d - 2.0 * width - height))
            };
            BarPlacement {
                position: Vec3::new(x, y, 0.0),
                edge,
                rotation_z: edge.outward_rotation(),
            }
        })
        .collect()
}

/// Bars around a rectangle, each driven by a proportional slice of the spectrum.
pub struct FrameVisualizer {
    placements: Box<[BarPlacement]>,
    bars: Box<[BarInstance]>,
    spectrum: Spectrum,
}

impl FrameVisualizer {
    pub fn new(params: &FrameParams) -> Self {
        let placements = frame_placements(params.width, params.height, params.bars);
        let bars: Box<[BarInstance]> = placements
            .iter()
            .map(|p| BarInstance {
                position: p.position,
                rotation_z: p.rotation_z,
                scale: FRAME_SCALE_BASE,
                ..Default::default()
            })
            .collect();
        Self {
            placements: placements.into_boxed_slice(),
            bars,
            spectrum: Spectrum::with_bins(params.fft_size as usize / 2),
        }
    }

    pub fn placements(&self) -> &[BarPlacement] {
        &self.placements
    }

    pub fn bars(&self) -> &[BarInstance] {
        &self.bars
    }

    pub fn spectrum(&self) -> &Spectrum {
        &self.spectrum
    }

    pub fn update(&mut self, source: Option<&mut dyn FrequencySource>) {
        let Some(source) = source else {
            return;
        };
        self.spectrum.refresh(source);
        let len = self.spectrum.len();
        let n = self.bars.len();
        for (i, bar) in self.bars.iter_mut().enumerate() {
            let idx = i * len / n;
            let v = self.spectrum.bins().get(idx).copied().unwrap_or(0) as f32 / 255.0;
            bar.scale = FRAME_SCALE_BASE + v * FRAME_SCALE_SPAN;
            bar.color = hsl_to_rgb(
                i as f32 / n as f32,
                FRAME_SATURATION,
                FRAME_LIGHTNESS_BASE + v * FRAME_LIGHTNESS_SPAN,
            );
            bar.emissive = FRAME_EMISSIVE_BASE + v * FRAME_EMISSIVE_SPAN;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corners_and_edges() {
        let p = frame_placements(4.0, 2.0, 12); // spacing 1.0
        assert_eq!(p[0].position, Vec3::new(-2.0, 1.0, 0.0));
        assert_eq!(p[0].edge, Edge::Top);
        assert_eq!(p[4].edge, Edge::Right);
        assert_eq!(p[4].position, Vec3::new(2.0, 1.0, 0.0));
        assert_eq!(p[6].edge, Edge::Bottom);
        assert_eq!(p[6].position, Vec3::new(2.0, -1.0, 0.0));
        assert_eq!(p[10].edge, Edge::Left);
        assert_eq!(p[10].position, Vec3::new(-2.0, -1.0, 0.0));
        assert_eq!(p[11].position, Vec3::new(-2.0, 0.0, 0.0));
    }

    #[test]
    fn rotation_grows_bars_along_the_edge_axis() {
        for p in frame_placements(9.0, 5.0, 40) {
            let (s, c) = p.rotation_z.sin_cos();
            // local +Y after rotation about Z
            let grow = Vec3::new(-s, c, 0.0);
            match p.edge.scale_axis() {
                ScaleAxis::Vertical => assert!(grow.x.abs() < 1e-6 && grow.y.abs() > 0.999),
                ScaleAxis::Horizontal => assert!(grow.y.abs() < 1e-6 && grow.x.abs() > 0.999),
            }
            // and points away from the rectangle's center
            assert!(grow.dot(p.position) > 0.0);
        }
    }

    #[test]
    fn bars_map_proportionally_into_spectrum() {
        let mut vis = FrameVisualizer::new(&FrameParams {
            width: 4.0,
            height: 2.0,
            bars: 4,
            ..Default::default()
        });
        let mut src = vec![0u8; 8];
        src[2] = 255; // read by bar 1
        vis.update(Some(&mut src));
        assert!((vis.bars()[0].scale - FRAME_SCALE_BASE).abs() < 1e-6);
        assert!((vis.bars()[1].scale - (FRAME_SCALE_BASE + FRAME_SCALE_SPAN)).abs() < 1e-6);
        assert!(vis.bars()[1].emissive > vis.bars()[0].emissive);
    }

    #[test]
    fn empty_frame_has_no_bars() {
        assert!(frame_placements(10.0, 10.0, 0).is_empty());
    }
}
