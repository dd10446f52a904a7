// Shared simulation tuning constants used by the core effects and the web frontend.

// Dust field
pub const DUST_COUNT: usize = 2000;
pub const DUST_CUBE_SIDE: f32 = 200.0; // particles spawn in [-side/2, side/2]^3
pub const DUST_HUE_MIN: f32 = 0.10;
pub const DUST_HUE_SPAN: f32 = 0.08; // narrow pastel band
pub const DUST_SATURATION: f32 = 0.7;
pub const DUST_LIGHTNESS: f32 = 0.8;
pub const DUST_POINT_SIZE: f32 = 1.6;

pub const SHOCKWAVE_TRIGGER: f32 = 2.0; // strength after a pointer-down
pub const SHOCKWAVE_DECAY: f32 = 0.92; // per frame
pub const REPEL_RADIUS_BASE: f32 = 30.0;
pub const REPEL_RADIUS_SHOCK: f32 = 40.0;
pub const REPEL_FORCE_BASE: f32 = 2.0;
pub const REPEL_FORCE_SHOCK: f32 = 15.0;
pub const DUST_SPRING: f32 = 0.015;
pub const DUST_DAMPING: f32 = 0.92;

// Firework burst
pub const BURST_PARTICLES: usize = 80;
pub const BURST_SPEED_MIN: f32 = 0.5;
pub const BURST_SPEED_MAX: f32 = 1.3;
pub const BURST_LIFE_MIN: f32 = 0.8;
pub const BURST_LIFE_MAX: f32 = 1.0;
pub const BURST_SPEED_SCALE: f32 = 15.0; // world units per (velocity * second)
pub const BURST_GRAVITY: f32 = 0.02; // subtracted from velocity.y every frame
pub const BURST_DRAG: f32 = 0.96;
pub const BURST_LIFE_DECAY_PER_SEC: f32 = 0.8;
pub const BURST_FADE_PER_SEC: f32 = 0.3; // opacity, independent of sub-particle life
pub const BURST_POINT_SIZE: f32 = 2.4;
// Parking spot for expired sub-particles, far below the visible volume
pub const BURST_HIDDEN_Y: f32 = -10_000.0;

// Firework spawner
pub const SPAWN_INTERVAL_SEC: f32 = 0.8;
pub const ACTIVE_BURSTS_KEPT: usize = 10;
pub const ACTIVE_BURST_CAP: usize = ACTIVE_BURSTS_KEPT + 1;
pub const SPAWN_MIN: [f32; 3] = [-30.0, 10.0, -15.0];
pub const SPAWN_MAX: [f32; 3] = [30.0, 30.0, 15.0];
pub const LAUNCH_SALVO: usize = 3; // bursts fired together when the stage launches

pub const FIREWORK_PALETTE: [[f32; 3]; 5] = [
    [1.0, 0.27, 0.27], // red
    [1.0, 0.84, 0.0],  // gold
    [0.27, 0.67, 1.0], // blue
    [0.6, 1.0, 0.4],   // green
    [1.0, 0.4, 0.85],  // pink
];

// Circular visualizer
pub const RING_FFT_SIZE: u32 = 128; // 64 usable bins
pub const RING_RADIUS: f32 = 14.0;
pub const RING_INSTANCES: usize = 64;
pub const RING_BAR_WIDTH: f32 = 0.6;
pub const RING_BAR_DEPTH: f32 = 0.6;
pub const RING_SCALE_BASE: f32 = 0.4;
pub const RING_BIN_DIVISOR: f32 = 25.0;
pub const RING_AVERAGE_DIVISOR: f32 = 60.0;
pub const RING_HUE_PER_SEC: f32 = 0.1;
pub const RING_SATURATION: f32 = 0.8;
pub const RING_LIGHTNESS: f32 = 0.6;
pub const RING_EMISSIVE_BASE: f32 = 0.5;
pub const RING_EMISSIVE_AVERAGE_DIVISOR: f32 = 64.0;
// Group drift: (frequency, amplitude) per axis
pub const RING_DRIFT: [[f32; 2]; 3] = [[0.3, 0.25], [0.2, 0.35], [0.15, 0.15]];

// Rectangular visualizer
pub const FRAME_FFT_SIZE: u32 = 512;
pub const FRAME_SMOOTHING: f64 = 0.8;
pub const FRAME_WIDTH: f32 = 90.0;
pub const FRAME_HEIGHT: f32 = 50.0;
pub const FRAME_BARS: usize = 160;
pub const FRAME_BAR_THICKNESS: f32 = 0.8;
pub const FRAME_SCALE_BASE: f32 = 0.3;
pub const FRAME_SCALE_SPAN: f32 = 3.5;
pub const FRAME_SATURATION: f32 = 0.85;
pub const FRAME_LIGHTNESS_BASE: f32 = 0.35;
pub const FRAME_LIGHTNESS_SPAN: f32 = 0.4;
pub const FRAME_EMISSIVE_BASE: f32 = 0.2;
pub const FRAME_EMISSIVE_SPAN: f32 = 1.8;

// Stage timing
pub const COUNTDOWN_SEC: f32 = 10.0;
pub const LAUNCH_TRANSITION_SEC: f32 = 2.5;

// Sprite texture
pub const SPRITE_SIZE: u32 = 32;
// (radius fraction, alpha) pairs from center to rim
pub const SPRITE_STOPS: [[f32; 2]; 4] = [[0.0, 1.0], [0.2, 0.8], [0.4, 0.3], [1.0, 0.0]];

// Audio
pub const DEFAULT_VOLUME: f32 = 0.5;

// Camera
pub const CAMERA_FOV_DEG: f32 = 60.0;
pub const CAMERA_NEAR: f32 = 0.1;
pub const CAMERA_FAR: f32 = 1000.0;
pub const CAMERA_Z: f32 = 120.0; // celebrating
pub const CAMERA_Z_COUNTDOWN: f32 = 170.0; // pulled back before launch
