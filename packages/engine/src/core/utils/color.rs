//! Packed ABGR colors.
//!
//! Cells store colors as `0xAABBGGRR`, so on little-endian targets the bytes are
//! `[R, G, B, A]` and the raster can be copied straight into an `ImageData`.

pub const RAINBOW_SATURATION: f32 = 0.8;
pub const RAINBOW_VALUE: f32 = 0.9;

/// Fully transparent pixel. Used as "nothing drawn" on the particle scratch raster.
pub const TRANSPARENT: u32 = 0;

#[inline]
pub const fn pack_abgr(r: u8, g: u8, b: u8, a: u8) -> u32 {
    ((a as u32) << 24) | ((b as u32) << 16) | ((g as u32) << 8) | (r as u32)
}

#[inline]
pub const fn rgb(r: u8, g: u8, b: u8) -> u32 {
    pack_abgr(r, g, b, 255)
}

#[inline]
pub const fn unpack_abgr(c: u32) -> (u8, u8, u8, u8) {
    (c as u8, (c >> 8) as u8, (c >> 16) as u8, (c >> 24) as u8)
}

#[inline]
pub const fn with_alpha(c: u32, a: u8) -> u32 {
    (c & 0x00ff_ffff) | ((a as u32) << 24)
}

/// `h` in degrees, `s` and `v` in `[0, 1]`.
pub fn hsv_to_rgb(h: f32, s: f32, v: f32) -> (u8, u8, u8) {
    let h = h.rem_euclid(360.0) / 60.0;
    let c = v * s;
    let x = c * (1.0 - ((h % 2.0) - 1.0).abs());
    let m = v - c;

    let (r, g, b) = if h < 1.0 {
        (c, x, 0.0)
    } else if h < 2.0 {
        (x, c, 0.0)
    } else if h < 3.0 {
        (0.0, c, x)
    } else if h < 4.0 {
        (0.0, x, c)
    } else if h < 5.0 {
        (x, 0.0, c)
    } else {
        (c, 0.0, x)
    };

    let to_byte = |f: f32| ((f + m) * 255.0).round().clamp(0.0, 255.0) as u8;
    (to_byte(r), to_byte(g), to_byte(b))
}

/// Hue in whole degrees for a rainbow cell spawned on `tick`.
///
/// `jitter` is the position offset used by emitters; pointer paints pass 0.
#[inline]
pub fn rainbow_hue(tick: u64, jitter: u32) -> u32 {
    (((tick % 360) as u32) + jitter) % 360
}

pub fn rainbow_color(tick: u64, jitter: u32) -> u32 {
    let hue = rainbow_hue(tick, jitter);
    let (r, g, b) = hsv_to_rgb(hue as f32, RAINBOW_SATURATION, RAINBOW_VALUE);
    rgb(r, g, b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn abgr_byte_order_matches_canvas() {
        let c = pack_abgr(0x11, 0x22, 0x33, 0x44);
        assert_eq!(c.to_le_bytes(), [0x11, 0x22, 0x33, 0x44]);
        assert_eq!(unpack_abgr(c), (0x11, 0x22, 0x33, 0x44));
    }

    #[test]
    fn hsv_primaries() {
        assert_eq!(hsv_to_rgb(0.0, 1.0, 1.0), (255, 0, 0));
        assert_eq!(hsv_to_rgb(120.0, 1.0, 1.0), (0, 255, 0));
        assert_eq!(hsv_to_rgb(240.0, 1.0, 1.0), (0, 0, 255));
        assert_eq!(hsv_to_rgb(360.0, 1.0, 1.0), (255, 0, 0));
    }

    #[test]
    fn rainbow_hue_wraps() {
        assert_eq!(rainbow_hue(0, 0), 0);
        assert_eq!(rainbow_hue(359, 0), 359);
        assert_eq!(rainbow_hue(360, 0), 0);
        assert_eq!(rainbow_hue(350, 20), 10);
        assert_eq!(rainbow_hue(725, 0), 5);
    }

    #[test]
    fn rainbow_is_opaque_and_time_varying() {
        let a = rainbow_color(0, 0);
        let b = rainbow_color(120, 0);
        assert_eq!(a >> 24, 0xff);
        assert_ne!(a, b);
        assert_eq!(rainbow_color(5, 0), rainbow_color(365, 0));
    }

    #[test]
    fn with_alpha_keeps_rgb() {
        let c = rgb(1, 2, 3);
        assert_eq!(unpack_abgr(with_alpha(c, 128)), (1, 2, 3, 128));
    }
}
