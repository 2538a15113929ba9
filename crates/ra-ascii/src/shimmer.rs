use ra_core::config::RenderConfig;
use ra_core::frame::{Sample, SampleGrid};

/// Poids de l'onde diagonale vs bruit par cellule.
const WAVE_WEIGHT: f32 = 0.75;
const JITTER_WEIGHT: f32 = 0.25;

/// Gains par canal du shimmer couleur sur les cellules à dominante bleue.
const BLUE_GAINS: (f32, f32, f32) = (60.0, 30.0, 80.0);

/// Perturbation de luminosité par frame.
///
/// Fonction pure de (échantillon de base, x, y, index de frame) : aucune
/// horloge ni état global, une frame donnée se reproduit toujours à l'identique.
///
/// # Example
/// ```
/// use ra_core::frame::Sample;
/// use ra_ascii::shimmer::Shimmer;
///
/// let shimmer = Shimmer::default();
/// let base = Sample { luminance: 0.5, rgb: (10, 20, 200) };
/// let a = shimmer.perturb(base, 3, 7, 12);
/// assert_eq!(a, shimmer.perturb(base, 3, 7, 12));
/// assert!((0.0..=1.0).contains(&a.luminance));
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Shimmer {
    /// Amplitude maximale sur la luminance.
    pub amplitude: f32,
    /// Longueur d'onde diagonale, en cellules.
    pub wavelength: f32,
    /// Avance de phase par frame, en radians.
    pub speed: f32,
}

impl Default for Shimmer {
    fn default() -> Self {
        Self {
            amplitude: 0.2,
            wavelength: 6.0,
            speed: 0.3,
        }
    }
}

impl Shimmer {
    /// Extract shimmer settings from a render config.
    #[must_use]
    pub fn from_config(config: &RenderConfig) -> Self {
        Self {
            amplitude: config.shimmer_amplitude,
            wavelength: config.shimmer_wavelength.max(f32::EPSILON),
            speed: config.shimmer_speed,
        }
    }

    /// Diagonal wave value in [-1, 1] for cell (x, y) at `frame`.
    #[inline(always)]
    #[must_use]
    pub fn wave(&self, x: u16, y: u16, frame: u32) -> f32 {
        let phase = frame as f32 * self.speed;
        ((f32::from(x) + f32::from(y)) / self.wavelength + phase).sin()
    }

    /// Perturb one sample. Luminance stays within [0, 1].
    #[inline]
    #[must_use]
    pub fn perturb(&self, base: Sample, x: u16, y: u16, frame: u32) -> Sample {
        let wave = self.wave(x, y, frame);
        let offset = self.amplitude * (WAVE_WEIGHT * wave + JITTER_WEIGHT * jitter(x, y, frame));
        let luminance = (base.luminance + offset).clamp(0.0, 1.0);

        let (r, g, b) = base.rgb;
        let rgb = if b > r && b > g {
            let f = self.amplitude * wave;
            (
                shift(r, BLUE_GAINS.0 * f),
                shift(g, BLUE_GAINS.1 * f),
                shift(b, BLUE_GAINS.2 * f),
            )
        } else {
            base.rgb
        };

        Sample { luminance, rgb }
    }

    /// Perturbed copy of a whole grid. The base grid is never modified.
    #[must_use]
    pub fn apply(&self, base: &SampleGrid, frame: u32) -> SampleGrid {
        let width = usize::from(base.width.max(1));
        let samples = base
            .samples
            .iter()
            .enumerate()
            .map(|(i, &s)| {
                let x = (i % width) as u16;
                let y = (i / width) as u16;
                self.perturb(s, x, y, frame)
            })
            .collect();
        SampleGrid {
            samples,
            width: base.width,
            height: base.height,
        }
    }
}

#[inline(always)]
fn shift(channel: u8, delta: f32) -> u8 {
    (f32::from(channel) + delta).round().clamp(0.0, 255.0) as u8
}

/// Bruit déterministe [-1, 1] par (x, y, frame), hash entier + pas LCG.
#[inline(always)]
fn jitter(x: u16, y: u16, frame: u32) -> f32 {
    let mut seed = u32::from(x).wrapping_mul(0x9E37_79B1)
        ^ u32::from(y).wrapping_mul(0x85EB_CA77)
        ^ frame.wrapping_mul(0xC2B2_AE3D);
    seed ^= seed >> 15;
    seed = seed.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
    seed ^= seed >> 13;
    (f64::from(seed) / f64::from(u32::MAX) * 2.0 - 1.0) as f32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gradient(width: u16, height: u16) -> SampleGrid {
        let mut grid = SampleGrid::new(width, height);
        for (i, s) in grid.samples.iter_mut().enumerate() {
            let l = i as f32 / (usize::from(width) * usize::from(height)) as f32;
            *s = Sample {
                luminance: l,
                rgb: ((i * 3) as u8, (i * 5) as u8, 180),
            };
        }
        grid
    }

    #[test]
    fn frames_are_reproducible() {
        let shimmer = Shimmer::default();
        let base = gradient(12, 5);
        for frame in [0, 1, 7, 999] {
            assert_eq!(shimmer.apply(&base, frame), shimmer.apply(&base, frame));
        }
    }

    #[test]
    fn consecutive_frames_differ() {
        let shimmer = Shimmer::default();
        let base = gradient(12, 5);
        assert_ne!(shimmer.apply(&base, 0), shimmer.apply(&base, 1));
    }

    #[test]
    fn luminance_stays_in_range() {
        let shimmer = Shimmer {
            amplitude: 1.0,
            ..Shimmer::default()
        };
        let base = gradient(20, 10);
        for frame in 0..50 {
            let grid = shimmer.apply(&base, frame);
            assert!(grid
                .samples
                .iter()
                .all(|s| (0.0..=1.0).contains(&s.luminance)));
        }
    }

    #[test]
    fn offset_bounded_by_amplitude() {
        let shimmer = Shimmer::default();
        let base = Sample {
            luminance: 0.5,
            rgb: (100, 100, 100),
        };
        for frame in 0..40 {
            for x in 0..10 {
                let s = shimmer.perturb(base, x, 2, frame);
                assert!((s.luminance - 0.5).abs() <= shimmer.amplitude + 1e-6);
                assert_eq!(s.rgb, base.rgb, "gris : pas de shimmer couleur");
            }
        }
    }

    #[test]
    fn zero_amplitude_is_identity() {
        let shimmer = Shimmer {
            amplitude: 0.0,
            ..Shimmer::default()
        };
        let base = gradient(6, 4);
        assert_eq!(shimmer.apply(&base, 17), base);
    }

    #[test]
    fn jitter_is_bounded() {
        for x in 0..32 {
            for f in 0..32 {
                let j = jitter(x, x / 2, f);
                assert!((-1.0..=1.0).contains(&j));
            }
        }
    }

    #[test]
    fn blue_cells_shift_by_channel_gains() {
        let shimmer = Shimmer::default();
        let base = Sample {
            luminance: 0.4,
            rgb: (20, 40, 200),
        };
        let mut moved = false;
        for frame in 0..8 {
            for x in 0..12 {
                let f = shimmer.amplitude * shimmer.wave(x, 3, frame);
                let expected = (shift(20, 60.0 * f), shift(40, 30.0 * f), shift(200, 80.0 * f));
                let out = shimmer.perturb(base, x, 3, frame);
                assert_eq!(out.rgb, expected, "({x}, 3) frame {frame}");
                moved |= out.rgb != base.rgb;
            }
        }
        assert!(moved, "aucun décalage couleur sur une cellule bleue");
    }

    #[test]
    fn blue_shift_saturates_instead_of_wrapping() {
        let shimmer = Shimmer {
            amplitude: 1.0,
            ..Shimmer::default()
        };
        let base = Sample {
            luminance: 0.5,
            rgb: (0, 0, 250),
        };
        // sin(9 / 6) ≈ 1 : pic positif.
        assert!(shimmer.wave(9, 0, 0) > 0.99);
        assert_eq!(shimmer.perturb(base, 9, 0, 0).rgb, (60, 30, 255));
        // sin(28 / 6) ≈ -1 : pic négatif, r et g bloqués à 0.
        assert!(shimmer.wave(28, 0, 0) < -0.99);
        let low = shimmer.perturb(base, 28, 0, 0).rgb;
        assert_eq!((low.0, low.1), (0, 0));
        assert!(low.2 < 250 && low.2 >= 170);
    }

    #[test]
    fn non_blue_cells_keep_their_color() {
        let shimmer = Shimmer {
            amplitude: 1.0,
            ..Shimmer::default()
        };
        for rgb in [(200, 40, 30), (30, 200, 90), (120, 10, 120)] {
            let base = Sample {
                luminance: 0.5,
                rgb,
            };
            for frame in 0..10 {
                for x in 0..16 {
                    assert_eq!(shimmer.perturb(base, x, x / 3, frame).rgb, rgb);
                }
            }
        }
    }
}
