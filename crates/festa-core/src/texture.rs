use crate::constants::SPRITE_STOPS;

/// Square RGBA8 sprite shared by every point-based effect.
#[derive(Clone, Debug, PartialEq)]
pub struct SpriteTexture {
    pub size: u32,
    pub rgba: Vec<u8>,
}

impl SpriteTexture {
    pub fn alpha_at(&self, x: u32, y: u32) -> u8 {
        self.rgba[((y * self.size + x) * 4 + 3) as usize]
    }
}

/// Build the soft radial-gradient sprite: white, alpha falling off from the
/// center to the inscribed circle and zero outside it.
pub fn sprite_texture(size: u32) -> SpriteTexture {
    let size = size.max(1);
    let half = size as f32 * 0.5;
    let mut rgba = Vec::with_capacity((size * size * 4) as usize);
    for y in 0..size {
        for x in 0..size {
            let dx = x as f32 + 0.5 - half;
            let dy = y as f32 + 0.5 - half;
            let r = (dx * dx + dy * dy).sqrt() / half;
            let a = (gradient_alpha(r) * 255.0).round() as u8;
            rgba.extend_from_slice(&[255, 255, 255, a]);
        }
    }
    SpriteTexture { size, rgba }
}

fn gradient_alpha(r: f32) -> f32 {
    let mut prev = SPRITE_STOPS[0];
    if r <= prev[0] {
        return prev[1];
    }
    for stop in &SPRITE_STOPS[1..] {
        if r <= stop[0] {
            let t = (r - prev[0]) / (stop[0] - prev[0]);
            return prev[1] + (stop[1] - prev[1]) * t;
        }
        prev = *stop;
    }
    prev[1]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alpha_falls_off_from_center() {
        let tex = sprite_texture(32);
        assert_eq!(tex.rgba.len(), 32 * 32 * 4);
        let center = tex.alpha_at(16, 16);
        let mid = tex.alpha_at(22, 16);
        let corner = tex.alpha_at(0, 0);
        assert!(center > 230);
        assert!(mid < center && mid > 0);
        assert_eq!(corner, 0);
    }

    #[test]
    fn gradient_hits_stops() {
        assert!((gradient_alpha(0.0) - 1.0).abs() < 1e-6);
        assert!((gradient_alpha(0.2) - 0.8).abs() < 1e-6);
        assert!((gradient_alpha(0.4) - 0.3).abs() < 1e-6);
        assert_eq!(gradient_alpha(1.5), 0.0);
    }
}
