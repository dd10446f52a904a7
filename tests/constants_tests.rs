// Host-side tests for constants and their relationships.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod constants {
    include!("../src/constants.rs");
}

use constants::*;
use festa_core::{SceneParams, CAMERA_FAR, CAMERA_Z_COUNTDOWN, DUST_CUBE_SIDE};

#[test]
#[allow(clippy::assertions_on_constants)]
fn draw_constants_are_within_reasonable_bounds() {
    assert!(DUST_ALPHA > 0.0 && DUST_ALPHA <= 1.0);
    assert!(MAX_FRAME_DT > 0.0 && MAX_FRAME_DT <= 0.25);
    for c in CLEAR_RGB {
        assert!((0.0..=0.1).contains(&c), "background should stay dark");
    }
}

#[test]
fn dom_ids_are_distinct() {
    let ids = [
        CANVAS_ID,
        START_OVERLAY_ID,
        LAUNCH_BUTTON_ID,
        COUNTDOWN_ID,
        PLAY_BUTTON_ID,
    ];
    for (i, a) in ids.iter().enumerate() {
        assert!(!a.is_empty());
        for b in &ids[i + 1..] {
            assert_ne!(a, b);
        }
    }
}

#[test]
fn every_query_key_is_understood_by_scene_params() {
    let samples = [
        ("seed", "7"),
        ("dust", "100"),
        ("countdown", "3"),
        ("volume", "0.2"),
        ("bars", "40"),
        ("audio", "music.ogg"),
    ];
    assert_eq!(samples.len(), PARAM_KEYS.len());
    let mut params = SceneParams::default();
    for key in PARAM_KEYS {
        let (_, value) = samples
            .iter()
            .find(|(k, _)| *k == key)
            .expect("sample for every key");
        params.apply_override(key, value).unwrap();
    }
    params.validate().unwrap();
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn whole_dust_cube_is_inside_the_far_plane() {
    let farthest = CAMERA_Z_COUNTDOWN + DUST_CUBE_SIDE * 0.5 * 3f32.sqrt();
    assert!(farthest < CAMERA_FAR);
}
