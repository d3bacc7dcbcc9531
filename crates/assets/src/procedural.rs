//! Generated textures used when the image files are unavailable.

use crate::{TextureImage, TextureSource};
use std::f32::consts::PI;

/// Integer hash to [0, 1). Deterministic across platforms.
fn hash(x: u32, y: u32, seed: u32) -> f32 {
    let mut h = x
        .wrapping_mul(0x8da6_b343)
        ^ y.wrapping_mul(0xd816_3841)
        ^ seed.wrapping_mul(0xcb1a_b31f);
    h ^= h >> 13;
    h = h.wrapping_mul(0x5bd1_e995);
    h ^= h >> 15;
    (h & 0x00ff_ffff) as f32 / 16_777_216.0
}

fn to_byte(v: f32) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}

fn image(width: u32, height: u32, mut shade: impl FnMut(u32, u32) -> [f32; 4]) -> TextureImage {
    let mut rgba = Vec::with_capacity((width * height * 4) as usize);
    for y in 0..height {
        for x in 0..width {
            rgba.extend(shade(x, y).map(to_byte));
        }
    }
    TextureImage {
        width,
        height,
        rgba,
        source: TextureSource::Procedural,
    }
}

/// Equirectangular sky: scattered stars over a faint band of tinted dust.
pub fn starfield(width: u32, height: u32, seed: u32, tint: [f32; 3]) -> TextureImage {
    image(width, height, |x, y| {
        let lat = (y as f32 / height as f32 - 0.5) * PI;
        let lon = x as f32 / width as f32 * 2.0 * PI;
        // Dust band along a tilted great circle.
        let band = (lat + 0.35 * (lon + seed as f32).sin()).abs();
        let dust = (-band * band * 18.0).exp() * (0.6 + 0.4 * hash(x / 8, y / 8, seed));

        let star = hash(x, y, seed);
        let brightness = if star > 0.997 {
            0.6 + 0.4 * hash(y, x, seed)
        } else {
            0.0
        };

        let c = tint.map(|t| t * dust * 0.35 + brightness);
        [c[0], c[1], c[2], 1.0]
    })
}

/// Latitude bands in pale yellows and browns, like a gas giant.
pub fn banded_planet(width: u32, height: u32) -> TextureImage {
    image(width, height, |x, y| {
        let v = y as f32 / height as f32;
        let wobble = 0.01 * (x as f32 / width as f32 * 2.0 * PI * 3.0).sin();
        let bands = (v * 38.0 + wobble * 40.0).sin() * 0.5 + 0.5;
        let fine = hash(0, (v * 400.0) as u32, 7) * 0.08;
        let l = 0.65 + 0.25 * bands + fine;
        [l * 0.95, l * 0.85, l * 0.62, 1.0]
    })
}

/// Radial ring profile, inner edge at u = 0, with alpha gaps.
pub fn ring_gradient(width: u32) -> TextureImage {
    image(width, 1, |x, _| {
        let u = x as f32 / width as f32;
        let density = 0.5 + 0.5 * (u * 60.0).sin() * (u * 7.0).cos();
        // Main gap about two thirds out.
        let gap = if (0.62..0.68).contains(&u) { 0.1 } else { 1.0 };
        let alpha = (density * gap).clamp(0.0, 1.0) * 0.9;
        let l = 0.7 + 0.2 * density;
        [l, l * 0.92, l * 0.8, alpha]
    })
}

/// Accretion disk: white hot at the inner edge, cooling to red outward.
pub fn disk_gradient(width: u32) -> TextureImage {
    image(width, 1, |x, _| {
        let u = x as f32 / width as f32;
        let heat = (1.0 - u).powf(1.5);
        let streaks = 0.85 + 0.15 * hash(x, 0, 3);
        [
            (0.6 + 0.4 * heat) * streaks,
            (0.15 + 0.8 * heat) * streaks,
            (0.05 + 0.7 * heat * heat) * streaks,
            (1.0 - u).sqrt(),
        ]
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_is_deterministic_and_bounded() {
        assert_eq!(hash(3, 4, 5), hash(3, 4, 5));
        assert_ne!(hash(3, 4, 5), hash(4, 3, 5));
        for i in 0..1000 {
            let h = hash(i, i * 7, 11);
            assert!((0.0..1.0).contains(&h));
        }
    }

    #[test]
    fn starfields_differ_by_seed() {
        let a = starfield(64, 32, 1, [1.0, 1.0, 1.0]);
        let b = starfield(64, 32, 2, [1.0, 1.0, 1.0]);
        assert_eq!(a.rgba.len(), 64 * 32 * 4);
        assert_ne!(a.rgba, b.rgba);
        assert!(a.rgba.chunks(4).all(|p| p[3] == 255));
    }

    #[test]
    fn disk_is_hottest_inside() {
        let disk = disk_gradient(64);
        let inner = &disk.rgba[..4];
        let outer = &disk.rgba[disk.rgba.len() - 4..];
        assert!(inner[2] > outer[2]);
        assert!(inner[3] > outer[3]);
    }

    #[test]
    fn rings_have_a_gap() {
        let rings = ring_gradient(100);
        let alpha_at = |u: usize| rings.rgba[u * 4 + 3];
        assert!(alpha_at(65) < 30);
    }
}
