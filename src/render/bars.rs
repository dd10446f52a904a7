use festa_core::{
    BarInstance, FrameVisualizer, RingVisualizer, FRAME_BAR_THICKNESS, RING_BAR_DEPTH,
    RING_BAR_WIDTH,
};
use glam::Mat4;

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct CubeVertex {
    position: [f32; 3],
    normal: [f32; 3],
}

/// Model matrix columns plus rgb and emissive intensity.
#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct BarInstanceRaw {
    model: [[f32; 4]; 4],
    color: [f32; 4],
}

const VERTEX_ATTRS: [wgpu::VertexAttribute; 2] =
    wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3];
const INSTANCE_ATTRS: [wgpu::VertexAttribute; 5] = wgpu::vertex_attr_array![
    2 => Float32x4, 3 => Float32x4, 4 => Float32x4, 5 => Float32x4, 6 => Float32x4
];

pub(crate) fn layouts() -> [wgpu::VertexBufferLayout<'static>; 2] {
    [
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<CubeVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &VERTEX_ATTRS,
        },
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<BarInstanceRaw>() as u64,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &INSTANCE_ATTRS,
        },
    ]
}

/// Unit cube centered on the origin, 36 vertices with flat normals.
pub(crate) fn unit_cube() -> Vec<CubeVertex> {
    // (normal, tangent u, tangent v) per face
    const FACES: [([f32; 3], [f32; 3], [f32; 3]); 6] = [
        ([1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]),
        ([-1.0, 0.0, 0.0], [0.0, 0.0, 1.0], [0.0, 1.0, 0.0]),
        ([0.0, 1.0, 0.0], [0.0, 0.0, 1.0], [1.0, 0.0, 0.0]),
        ([0.0, -1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, 1.0]),
        ([0.0, 0.0, 1.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
        ([0.0, 0.0, -1.0], [0.0, 1.0, 0.0], [1.0, 0.0, 0.0]),
    ];
    let corner = |n: [f32; 3], u: [f32; 3], v: [f32; 3], su: f32, sv: f32| CubeVertex {
        position: [
            0.5 * (n[0] + su * u[0] + sv * v[0]),
            0.5 * (n[1] + su * u[1] + sv * v[1]),
            0.5 * (n[2] + su * u[2] + sv * v[2]),
        ],
        normal: n,
    };
    let mut out = Vec::with_capacity(36);
    for (n, u, v) in FACES {
        for (su, sv) in [
            (-1.0, -1.0),
            (1.0, -1.0),
            (1.0, 1.0),
            (-1.0, -1.0),
            (1.0, 1.0),
            (-1.0, 1.0),
        ] {
            out.push(corner(n, u, v, su, sv));
        }
    }
    out
}

fn raw(model: Mat4, bar: &BarInstance) -> BarInstanceRaw {
    BarInstanceRaw {
        model: model.to_cols_array_2d(),
        color: [bar.color.x, bar.color.y, bar.color.z, bar.emissive],
    }
}

/// Ring bars live inside the drifting group transform.
pub(crate) fn push_ring(out: &mut Vec<BarInstanceRaw>, ring: &RingVisualizer) {
    let group = ring.group_matrix();
    out.extend(
        ring.bars()
            .iter()
            .map(|b| raw(group * b.model_matrix(RING_BAR_WIDTH, RING_BAR_DEPTH), b)),
    );
}

pub(crate) fn push_frame(out: &mut Vec<BarInstanceRaw>, frame: &FrameVisualizer) {
    out.extend(
        frame
            .bars()
            .iter()
            .map(|b| raw(b.model_matrix(FRAME_BAR_THICKNESS, FRAME_BAR_THICKNESS), b)),
    );
}
