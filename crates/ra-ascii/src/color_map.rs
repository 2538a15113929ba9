use ra_core::color::apply_hsv_bright;
use ra_core::config::{ColorMode, RenderConfig};

/// Réglages couleur du compositor.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ColorSettings {
    /// Escapes truecolor on/off.
    pub enabled: bool,
    /// Méthode de mapping.
    pub mode: ColorMode,
    /// Saturation boost (HsvBright uniquement).
    pub saturation: f32,
}

impl Default for ColorSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            mode: ColorMode::Direct,
            saturation: 1.0,
        }
    }
}

impl ColorSettings {
    /// Extract color settings from a render config.
    #[must_use]
    pub fn from_config(config: &RenderConfig) -> Self {
        Self {
            enabled: config.color_enabled,
            mode: config.color_mode,
            saturation: config.saturation,
        }
    }
}

/// Map a cell color according to the selected color mode.
///
/// Each cell is mapped from its own sample; nothing is blended across cells.
///
/// # Example
/// ```
/// use ra_ascii::color_map::map_color;
/// use ra_core::config::ColorMode;
/// assert_eq!(map_color(200, 50, 50, ColorMode::Direct, 1.0), (200, 50, 50));
/// assert_eq!(map_color(200, 50, 50, ColorMode::Quantized, 1.0), (204, 51, 51));
/// ```
#[must_use]
pub fn map_color(r: u8, g: u8, b: u8, mode: ColorMode, saturation: f32) -> (u8, u8, u8) {
    match mode {
        ColorMode::Direct => (r, g, b),
        ColorMode::HsvBright => apply_hsv_bright(r, g, b, saturation),
        ColorMode::Quantized => quantize(r, g, b),
    }
}

/// Arrondit chaque canal au niveau le plus proche du cube 6×6×6.
fn quantize(r: u8, g: u8, b: u8) -> (u8, u8, u8) {
    let snap = |c: u8| ((u16::from(c) * 5 + 127) / 255 * 51) as u8;
    (snap(r), snap(g), snap(b))
}
