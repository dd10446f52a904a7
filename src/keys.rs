// Keyboard shortcuts. Pure so host tests can include this file directly.

pub const VOLUME_STEP: f32 = 0.05;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyAction {
    Launch,
    TogglePlayback,
    VolumeUp,
    VolumeDown,
    Stop,
}

#[inline]
pub fn key_action(key: &str) -> Option<KeyAction> {
    match key {
        "Enter" => Some(KeyAction::Launch),
        " " | "p" | "P" => Some(KeyAction::TogglePlayback),
        "ArrowUp" | "+" | "=" => Some(KeyAction::VolumeUp),
        "ArrowDown" | "-" | "_" => Some(KeyAction::VolumeDown),
        "Escape" => Some(KeyAction::Stop),
        _ => None,
    }
}

/// Volume after one step in the given direction, kept in 0..=1.
#[inline]
pub fn stepped_volume(volume: f32, up: bool) -> f32 {
    let next = if up {
        volume + VOLUME_STEP
    } else {
        volume - VOLUME_STEP
    };
    next.clamp(0.0, 1.0)
}
