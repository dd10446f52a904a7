use crate::constants::DUST_ALPHA;
use festa_core::{DustField, FireworkSpawner, BURST_POINT_SIZE, DUST_POINT_SIZE};

/// One camera-facing sprite: xyz + size, rgba.
#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct PointInstance {
    pub(crate) pos_size: [f32; 4],
    pub(crate) color: [f32; 4],
}

const ATTRS: [wgpu::VertexAttribute; 2] =
    wgpu::vertex_attr_array![0 => Float32x4, 1 => Float32x4];

pub(crate) fn layout() -> wgpu::VertexBufferLayout<'static> {
    wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<PointInstance>() as u64,
        step_mode: wgpu::VertexStepMode::Instance,
        attributes: &ATTRS,
    }
}

pub(crate) fn push_dust(out: &mut Vec<PointInstance>, dust: &DustField) {
    out.extend(
        dust.positions()
            .iter()
            .zip(dust.colors())
            .map(|(p, c)| PointInstance {
                pos_size: [p.x, p.y, p.z, DUST_POINT_SIZE],
                color: [c.x, c.y, c.z, DUST_ALPHA],
            }),
    );
}

/// Live sub-particles only; expired ones are parked far below and skipped.
pub(crate) fn push_bursts(out: &mut Vec<PointInstance>, fireworks: &FireworkSpawner) {
    for burst in fireworks.bursts() {
        let alpha = burst.opacity();
        if alpha <= 0.0 {
            continue;
        }
        let c = burst.color();
        for (p, life) in burst.positions().iter().zip(burst.lives()) {
            if *life <= 0.0 {
                continue;
            }
            out.push(PointInstance {
                pos_size: [p.x, p.y, p.z, BURST_POINT_SIZE],
                color: [c.x, c.y, c.z, alpha],
            });
        }
    }
}
