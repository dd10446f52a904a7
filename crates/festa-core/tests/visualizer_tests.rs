// Host-side integration tests for the audio visualizers.

use festa_core::*;

#[test]
fn ring_without_source_is_a_noop() {
    let mut vis = RingVisualizer::new(&RingParams::default());
    let before = vis.bars().to_vec();
    let rot = vis.group_rotation();
    vis.update(None, 12.5);
    assert_eq!(vis.bars(), before.as_slice());
    assert_eq!(vis.group_rotation(), rot);
}

#[test]
fn ring_drifts_with_time_not_audio() {
    let mut vis = RingVisualizer::new(&RingParams::default());
    let mut quiet = vec![0u8; 64];
    let mut loud = vec![255u8; 64];
    vis.update(Some(&mut quiet), 4.0);
    let r_quiet = vis.group_rotation();
    vis.update(Some(&mut loud), 4.0);
    assert_eq!(vis.group_rotation(), r_quiet);
    vis.update(Some(&mut loud), 9.0);
    assert_ne!(vis.group_rotation(), r_quiet);
}

#[test]
fn ring_emissive_tracks_average() {
    let mut vis = RingVisualizer::new(&RingParams::default());
    let mut quiet = vec![0u8; 64];
    let mut loud = vec![200u8; 64];
    vis.update(Some(&mut quiet), 1.0);
    let e_quiet = vis.bars()[0].emissive;
    vis.update(Some(&mut loud), 1.0);
    let e_loud = vis.bars()[0].emissive;
    assert!((e_quiet - RING_EMISSIVE_BASE).abs() < 1e-6);
    assert!(e_loud > e_quiet);
}

#[test]
fn frame_placements_are_pure() {
    let a = frame_placements(FRAME_WIDTH, FRAME_HEIGHT, FRAME_BARS);
    let b = frame_placements(FRAME_WIDTH, FRAME_HEIGHT, FRAME_BARS);
    assert_eq!(a, b);
    assert_eq!(a.len(), FRAME_BARS);
    let c = frame_placements(FRAME_WIDTH, FRAME_HEIGHT, FRAME_BARS + 1);
    assert_ne!(a, c);
}

#[test]
fn frame_placements_stay_on_perimeter() {
    let (w, h) = (30.0f32, 12.0f32);
    for p in frame_placements(w, h, 97) {
        let on_vertical = (p.position.x.abs() - w / 2.0).abs() < 1e-3;
        let on_horizontal = (p.position.y.abs() - h / 2.0).abs() < 1e-3;
        assert!(on_vertical || on_horizontal, "{p:?}");
        assert!(p.position.x.abs() <= w / 2.0 + 1e-3);
        assert!(p.position.y.abs() <= h / 2.0 + 1e-3);
    }
}

#[test]
fn frame_uses_every_edge() {
    let p = frame_placements(FRAME_WIDTH, FRAME_HEIGHT, FRAME_BARS);
    for edge in [Edge::Top, Edge::Right, Edge::Bottom, Edge::Left] {
        assert!(p.iter().any(|b| b.edge == edge), "{edge:?} missing");
    }
}

#[test]
fn frame_without_source_is_a_noop() {
    let mut vis = FrameVisualizer::new(&FrameParams::default());
    let before = vis.bars().to_vec();
    vis.update(None);
    assert_eq!(vis.bars(), before.as_slice());
}

#[test]
fn frame_full_scale_on_saturated_input() {
    let mut vis = FrameVisualizer::new(&FrameParams::default());
    let mut src = vec![255u8; (FRAME_FFT_SIZE / 2) as usize];
    vis.update(Some(&mut src));
    for bar in vis.bars() {
        assert!((bar.scale - (FRAME_SCALE_BASE + FRAME_SCALE_SPAN)).abs() < 1e-5);
        assert!((bar.emissive - (FRAME_EMISSIVE_BASE + FRAME_EMISSIVE_SPAN)).abs() < 1e-5);
    }
    // Placements do not move with audio
    for (bar, p) in vis.bars().iter().zip(vis.placements()) {
        assert_eq!(bar.position, p.position);
        assert_eq!(bar.rotation_z, p.rotation_z);
    }
}

fn lightness(c: glam::Vec3) -> f32 {
    (c.max_element() + c.min_element()) * 0.5
}

#[test]
fn frame_lightness_follows_bin_level() {
    let n = FRAME_BARS;
    let mut vis = FrameVisualizer::new(&FrameParams::default());
    let mut silent = vec![0u8; (FRAME_FFT_SIZE / 2) as usize];
    vis.update(Some(&mut silent));
    let quiet: Vec<_> = vis.bars().iter().map(|b| b.color).collect();

    let mut saturated = vec![255u8; (FRAME_FFT_SIZE / 2) as usize];
    vis.update(Some(&mut saturated));
    for (i, (bar, q)) in vis.bars().iter().zip(&quiet).enumerate() {
        let hue = i as f32 / n as f32;
        let expect_quiet = festa_core::color::hsl_to_rgb(hue, FRAME_SATURATION, FRAME_LIGHTNESS_BASE);
        let expect_loud = festa_core::color::hsl_to_rgb(
            hue,
            FRAME_SATURATION,
            FRAME_LIGHTNESS_BASE + FRAME_LIGHTNESS_SPAN,
        );
        assert!((*q - expect_quiet).abs().max_element() < 1e-5, "bar {i}");
        assert!((bar.color - expect_loud).abs().max_element() < 1e-5, "bar {i}");
        assert!((lightness(*q) - FRAME_LIGHTNESS_BASE).abs() < 1e-4);
        assert!((lightness(bar.color) - (FRAME_LIGHTNESS_BASE + FRAME_LIGHTNESS_SPAN)).abs() < 1e-4);
    }
}
