//! Résolution des dimensions de grille avant le resampling.
//!
//! Le resampler reçoit toujours des dimensions déjà résolues ; toute la
//! correction d'aspect vit ici.

use crate::error::CoreError;

/// Rapport hauteur/largeur d'une cellule de terminal (police monospace).
pub const DEFAULT_CELL_ASPECT: f32 = 2.0;

/// Largeur utilisée quand rien n'est demandé et qu'aucun terminal n'est connu.
pub const DEFAULT_WIDTH: u16 = 100;

/// Resolve the character grid size for a `src_w`×`src_h` image.
///
/// `aspect` is the cell height/width ratio: a source pixel row spans
/// `1 / aspect` as much vertical room as a column does horizontally.
///
/// # Errors
/// [`CoreError::Config`] for a requested dimension of 0, a zero-area source
/// or a non-positive aspect.
///
/// # Example
/// ```
/// use ra_core::sizing::resolve_grid_size;
/// // 200×100 image, 80 columns → 20 rows with 2:1 cells.
/// assert_eq!(resolve_grid_size(200, 100, Some(80), None, None, 2.0).unwrap(), (80, 20));
/// ```
pub fn resolve_grid_size(
    src_w: u32,
    src_h: u32,
    width: Option<u16>,
    height: Option<u16>,
    terminal: Option<(u16, u16)>,
    aspect: f32,
) -> Result<(u16, u16), CoreError> {
    if src_w == 0 || src_h == 0 {
        return Err(CoreError::Config(format!(
            "image source vide ({src_w}×{src_h})"
        )));
    }
    if !(aspect.is_finite() && aspect > 0.0) {
        return Err(CoreError::Config(format!(
            "aspect_ratio doit être > 0 (reçu {aspect})"
        )));
    }
    if width == Some(0) || height == Some(0) {
        return Err(CoreError::Config(format!(
            "grille de surface nulle demandée ({}×{})",
            width.map_or_else(|| "auto".to_string(), |w| w.to_string()),
            height.map_or_else(|| "auto".to_string(), |h| h.to_string()),
        )));
    }

    let src_w = f64::from(src_w);
    let src_h = f64::from(src_h);
    let aspect = f64::from(aspect);
    let rows_for = |w: f64| src_h * w / src_w / aspect;
    let cols_for = |h: f64| src_w * h * aspect / src_h;

    let size = match (width, height, terminal) {
        (Some(w), Some(h), _) => (w, h),
        (Some(w), None, _) => (w, to_dim(rows_for(f64::from(w)))),
        (None, Some(h), _) => (to_dim(cols_for(f64::from(h))), h),
        (None, None, Some((cols, rows))) if cols > 0 && rows > 0 => {
            let h = rows_for(f64::from(cols));
            if h <= f64::from(rows) {
                (cols, to_dim(h))
            } else {
                (to_dim(cols_for(f64::from(rows))).min(cols), rows)
            }
        }
        (None, None, _) => (DEFAULT_WIDTH, to_dim(rows_for(f64::from(DEFAULT_WIDTH)))),
    };
    log::debug!("Grille résolue : {}×{}", size.0, size.1);
    Ok(size)
}

fn to_dim(v: f64) -> u16 {
    v.round().clamp(1.0, f64::from(u16::MAX)) as u16
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_dimensions_win() {
        let size = resolve_grid_size(640, 480, Some(10), Some(7), Some((200, 50)), 2.0).unwrap();
        assert_eq!(size, (10, 7));
    }

    #[test]
    fn height_only_derives_width() {
        // 100×100, 25 rows with 2:1 cells → 50 columns.
        assert_eq!(
            resolve_grid_size(100, 100, None, Some(25), None, 2.0).unwrap(),
            (50, 25)
        );
    }

    #[test]
    fn terminal_fit_limits_rows() {
        // Tall image: width-first would need 80 rows, terminal has 24.
        let (w, h) = resolve_grid_size(100, 400, None, None, Some((40, 24)), 2.0).unwrap();
        assert_eq!(h, 24);
        assert!(w <= 40);
        assert_eq!(w, 12);
    }

    #[test]
    fn terminal_fit_uses_all_columns_for_wide_images() {
        let (w, h) = resolve_grid_size(400, 100, None, None, Some((80, 24)), 2.0).unwrap();
        assert_eq!((w, h), (80, 10));
    }

    #[test]
    fn default_width_without_terminal() {
        let (w, h) = resolve_grid_size(100, 100, None, None, None, 2.0).unwrap();
        assert_eq!((w, h), (DEFAULT_WIDTH, 50));
    }

    #[test]
    fn tiny_results_never_zero() {
        let (w, h) = resolve_grid_size(1000, 1, Some(3), None, None, 2.0).unwrap();
        assert_eq!((w, h), (3, 1));
    }

    #[test]
    fn zero_request_is_config_error() {
        assert!(resolve_grid_size(10, 10, Some(0), None, None, 2.0).is_err());
        assert!(resolve_grid_size(10, 10, None, Some(0), None, 2.0).is_err());
        assert!(resolve_grid_size(10, 10, Some(5), None, None, 0.0).is_err());
    }
}
