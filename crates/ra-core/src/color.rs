/// RGB [0,255] vers HSV, chaque composante dans [0.0, 1.0].
///
/// # Example
/// ```
/// use ra_core::color::rgb_to_hsv;
/// let (h, s, v) = rgb_to_hsv(0, 255, 0);
/// assert!((h - 1.0 / 3.0).abs() < 0.01);
/// assert!((s - 1.0).abs() < 0.01 && (v - 1.0).abs() < 0.01);
/// ```
#[must_use]
pub fn rgb_to_hsv(r: u8, g: u8, b: u8) -> (f32, f32, f32) {
    let [r, g, b] = [r, g, b].map(|c| f32::from(c) / 255.0);
    let value = r.max(g).max(b);
    let chroma = value - r.min(g).min(b);
    if chroma <= 0.0 {
        return (0.0, 0.0, value);
    }

    let sector = if value == r {
        (g - b) / chroma
    } else if value == g {
        2.0 + (b - r) / chroma
    } else {
        4.0 + (r - g) / chroma
    };
    ((sector / 6.0).rem_euclid(1.0), chroma / value, value)
}

/// HSV vers RGB [0,255], arrondi au plus proche.
///
/// # Example
/// ```
/// use ra_core::color::hsv_to_rgb;
/// assert_eq!(hsv_to_rgb(0.0, 1.0, 1.0), (255, 0, 0));
/// assert_eq!(hsv_to_rgb(0.5, 0.0, 0.5), (128, 128, 128));
/// ```
#[must_use]
pub fn hsv_to_rgb(h: f32, s: f32, v: f32) -> (u8, u8, u8) {
    // Formule par canal : k = (n + 6h) mod 6, c = v - v*s*max(0, min(k, 4-k, 1)).
    let channel = |n: f32| {
        let k = (n + h.rem_euclid(1.0) * 6.0).rem_euclid(6.0);
        let c = v - v * s * k.min(4.0 - k).clamp(0.0, 1.0);
        (c * 255.0).round().clamp(0.0, 255.0) as u8
    };
    (channel(5.0), channel(3.0), channel(1.0))
}

/// HSV Bright : force V=1.0, le glyphe encode déjà la luminance.
///
/// # Example
/// ```
/// use ra_core::color::apply_hsv_bright;
/// let (r, g, b) = apply_hsv_bright(100, 25, 25, 1.0);
/// assert_eq!(r, 255);
/// assert!(g < r && b < r);
/// ```
#[must_use]
pub fn apply_hsv_bright(r: u8, g: u8, b: u8, saturation_boost: f32) -> (u8, u8, u8) {
    let (h, s, _v) = rgb_to_hsv(r, g, b);
    let s = (s * saturation_boost).clamp(0.0, 1.0);
    hsv_to_rgb(h, s, 1.0)
}

/// Luminance perceptuelle BT.709, normalisée [0.0, 1.0].
///
/// # Example
/// ```
/// use ra_core::color::luminance;
/// assert_eq!(luminance(0, 0, 0), 0.0);
/// assert!((luminance(255, 255, 255) - 1.0).abs() < 1e-6);
/// ```
#[inline(always)]
#[must_use]
pub fn luminance(r: u8, g: u8, b: u8) -> f32 {
    let l = (0.2126 * f32::from(r) + 0.7152 * f32::from(g) + 0.0722 * f32::from(b)) / 255.0;
    l.clamp(0.0, 1.0)
}

/// Composite a straight-alpha pixel over an opaque background.
///
/// # Example
/// ```
/// use ra_core::color::composite_over;
/// assert_eq!(composite_over((200, 100, 0), 0, (10, 20, 30)), (10, 20, 30));
/// assert_eq!(composite_over((200, 100, 0), 255, (10, 20, 30)), (200, 100, 0));
/// ```
#[must_use]
pub fn composite_over(fg: (u8, u8, u8), alpha: u8, bg: (u8, u8, u8)) -> (u8, u8, u8) {
    let a = u32::from(alpha);
    let inv = 255 - a;
    let mix = |f: u8, b: u8| ((u32::from(f) * a + u32::from(b) * inv + 127) / 255) as u8;
    (mix(fg.0, bg.0), mix(fg.1, bg.1), mix(fg.2, bg.2))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rgb_hsv_roundtrip() {
        for r in (0..=255).step_by(51) {
            for g in (0..=255).step_by(51) {
                for b in (0..=255).step_by(51) {
                    let (r, g, b) = (r as u8, g as u8, b as u8);
                    let (h, s, v) = rgb_to_hsv(r, g, b);
                    let (r2, g2, b2) = hsv_to_rgb(h, s, v);
                    assert!((i16::from(r) - i16::from(r2)).abs() <= 1, "R : {r} vs {r2}");
                    assert!((i16::from(g) - i16::from(g2)).abs() <= 1, "G : {g} vs {g2}");
                    assert!((i16::from(b) - i16::from(b2)).abs() <= 1, "B : {b} vs {b2}");
                }
            }
        }
    }

    #[test]
    fn hsv_bright_keeps_hue() {
        let (h, _s, _v) = rgb_to_hsv(200, 50, 50);
        let (r2, g2, b2) = apply_hsv_bright(200, 50, 50, 1.0);
        let (h2, _s2, v2) = rgb_to_hsv(r2, g2, b2);
        assert!((h - h2).abs() < 0.01, "Hue shifted: {h} vs {h2}");
        assert!((v2 - 1.0).abs() < 0.01, "V not 1.0: {v2}");
    }

    #[test]
    fn luminance_weights_green_most() {
        assert!(luminance(0, 255, 0) > luminance(255, 0, 0));
        assert!(luminance(255, 0, 0) > luminance(0, 0, 255));
    }

    #[test]
    fn composite_half_alpha() {
        let (r, g, b) = composite_over((255, 255, 255), 128, (0, 0, 0));
        assert_eq!((r, g, b), (128, 128, 128));
    }
}
