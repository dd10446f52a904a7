// Web-frontend tuning constants (DOM hooks and draw styling).

// DOM element ids
pub const CANVAS_ID: &str = "app-canvas";
pub const START_OVERLAY_ID: &str = "start-overlay";
pub const LAUNCH_BUTTON_ID: &str = "launch-button";
pub const COUNTDOWN_ID: &str = "countdown";
pub const PLAY_BUTTON_ID: &str = "play-toggle";

// Background
pub const CLEAR_RGB: [f64; 3] = [0.01, 0.01, 0.04];

// Point alpha for the dust cloud (fireworks use burst opacity)
pub const DUST_ALPHA: f32 = 0.8;

// Longest frame step fed to the simulation; longer gaps (tab switch) are clamped
pub const MAX_FRAME_DT: f32 = 0.1;

// Query-string keys understood by the page
pub const PARAM_KEYS: [&str; 6] = ["seed", "dust", "countdown", "volume", "bars", "audio"];
