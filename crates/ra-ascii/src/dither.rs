//! Diffusion d'erreur Floyd–Steinberg sur le champ de luminance.
//!
//! Strictement séquentiel : chaque cellule dépend de l'erreur accumulée par
//! les cellules précédentes dans l'ordre de balayage. Ne pas paralléliser.

use crate::palette::{level_index, level_value};

/// Noyau (dx, dy, poids) : droite, bas-gauche, bas, bas-droite.
pub const FLOYD_STEINBERG: [(i32, usize, f32); 4] = [
    (1, 0, 7.0 / 16.0),
    (-1, 1, 3.0 / 16.0),
    (0, 1, 5.0 / 16.0),
    (1, 1, 1.0 / 16.0),
];

/// Accumulateur d'erreur pour une seule passe de tramage.
///
/// Créé par passe, jeté ensuite ; jamais partagé entre frames.
#[derive(Debug)]
pub struct DitherState {
    error: Vec<f32>,
    width: usize,
    height: usize,
}

impl DitherState {
    /// Zeroed accumulator for a `width`×`height` field.
    #[must_use]
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            error: vec![0.0; width * height],
            width,
            height,
        }
    }

    /// Error accumulated so far at (x, y).
    #[inline(always)]
    #[must_use]
    pub fn error_at(&self, x: usize, y: usize) -> f32 {
        self.error[y * self.width + x]
    }

    /// Spread `residual` from (x, y) to its unvisited neighbours.
    ///
    /// Shares falling outside the grid are dropped; their sum is returned so
    /// that `distributed + dropped == residual`.
    pub fn diffuse(&mut self, x: usize, y: usize, residual: f32) -> f32 {
        let mut dropped = 0.0;
        for &(dx, dy, weight) in &FLOYD_STEINBERG {
            let share = residual * weight;
            let nx = x as i64 + i64::from(dx);
            let ny = y + dy;
            if nx < 0 || nx as usize >= self.width || ny >= self.height {
                dropped += share;
                continue;
            }
            self.error[ny * self.width + nx as usize] += share;
        }
        dropped
    }
}

/// Quantize `field` to `levels` levels with Floyd–Steinberg diffusion.
///
/// Scan order is row-major, left to right, top to bottom. Each value plus its
/// accumulated error is clamped to [0, 1], snapped to the nearest level
/// `k / (levels - 1)`, and the residual is diffused. Returns the quantized
/// luminance per cell.
///
/// # Example
/// ```
/// use ra_ascii::dither::error_diffuse;
/// // 50 % gray on 2 levels alternates between black and white.
/// let out = error_diffuse(&[0.5; 4], 4, 1, 2);
/// assert_eq!(out, vec![1.0, 0.0, 1.0, 0.0]);
/// ```
#[must_use]
pub fn error_diffuse(field: &[f32], width: usize, height: usize, levels: usize) -> Vec<f32> {
    debug_assert_eq!(field.len(), width * height);
    let mut state = DitherState::new(width, height);
    let mut out = Vec::with_capacity(field.len());

    for y in 0..height {
        for x in 0..width {
            let pre = (field[y * width + x] + state.error_at(x, y)).clamp(0.0, 1.0);
            let post = level_value(level_index(pre, levels), levels);
            state.diffuse(x, y, pre - post);
            out.push(post);
        }
    }
    out
}

/// Quantize each value independently (no diffusion, hard banding).
#[must_use]
pub fn quantize_plain(field: &[f32], levels: usize) -> Vec<f32> {
    field
        .iter()
        .map(|&l| level_value(level_index(l, levels), levels))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kernel_weights_sum_to_one() {
        let total: f32 = FLOYD_STEINBERG.iter().map(|k| k.2).sum();
        assert!((total - 1.0).abs() < 1e-6);
    }

    #[test]
    fn interior_cell_conserves_error() {
        let mut state = DitherState::new(3, 3);
        let dropped = state.diffuse(1, 1, 0.32);
        assert!(dropped.abs() < 1e-7);
        let mut distributed = 0.0;
        for y in 0..3 {
            for x in 0..3 {
                distributed += state.error_at(x, y);
            }
        }
        assert!((distributed - 0.32).abs() < 1e-6);
        assert!((state.error_at(2, 1) - 0.14).abs() < 1e-6);
        assert!((state.error_at(0, 2) - 0.06).abs() < 1e-6);
        assert!((state.error_at(1, 2) - 0.10).abs() < 1e-6);
        assert!((state.error_at(2, 2) - 0.02).abs() < 1e-6);
    }

    #[test]
    fn boundary_cells_drop_out_of_grid_shares() {
        for &(x, y) in &[(0, 0), (3, 0), (0, 2), (3, 2), (2, 2)] {
            let mut state = DitherState::new(4, 3);
            let residual = -0.2;
            let dropped = state.diffuse(x, y, residual);
            let distributed: f32 = state.error.iter().sum();
            assert!(
                (distributed + dropped - residual).abs() < 1e-6,
                "fuite d'erreur en ({x}, {y})"
            );
        }
        // Bottom-right corner keeps nothing.
        let mut state = DitherState::new(4, 3);
        assert!((state.diffuse(3, 2, 0.5) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn residual_stays_within_half_step() {
        let levels = 5;
        let step = 1.0 / (levels - 1) as f32;
        let field: Vec<f32> = (0..64).map(|i| (i as f32 * 0.37).sin().abs()).collect();
        let mut state = DitherState::new(8, 8);
        for y in 0..8 {
            for x in 0..8 {
                let pre = (field[y * 8 + x] + state.error_at(x, y)).clamp(0.0, 1.0);
                let post = level_value(level_index(pre, levels), levels);
                assert!((pre - post).abs() <= step / 2.0 + 1e-6);
                state.diffuse(x, y, pre - post);
            }
        }
    }

    #[test]
    fn output_values_are_levels() {
        let field: Vec<f32> = (0..30).map(|i| i as f32 / 29.0).collect();
        let out = error_diffuse(&field, 6, 5, 4);
        for v in out {
            let k = v * 3.0;
            assert!((k - k.round()).abs() < 1e-5, "{v} n'est pas un niveau");
        }
    }

    #[test]
    fn dithering_preserves_mean_brightness() {
        let field = vec![0.3; 400];
        let out = error_diffuse(&field, 20, 20, 2);
        let mean: f32 = out.iter().sum::<f32>() / 400.0;
        assert!((mean - 0.3).abs() < 0.05, "moyenne {mean}");
        // Without diffusion the same field collapses to black.
        assert!(quantize_plain(&field, 2).iter().all(|&v| v == 0.0));
    }

    #[test]
    fn diffusion_is_deterministic() {
        let field: Vec<f32> = (0..48).map(|i| (i % 7) as f32 / 6.0).collect();
        assert_eq!(error_diffuse(&field, 8, 6, 3), error_diffuse(&field, 8, 6, 3));
    }
}
