use ra_core::config::RenderConfig;

/// Ajustement de tonalité appliqué à la luminance avant quantification.
///
/// # Example
/// ```
/// use ra_ascii::luminance::Tone;
/// let tone = Tone { invert: true, ..Tone::default() };
/// assert!((tone.apply(0.25) - 0.75).abs() < 1e-6);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tone {
    /// Inverser la luminance (pour fond clair).
    pub invert: bool,
    /// Contraste, multiplié autour de 0.5.
    pub contrast: f32,
    /// Offset ajouté après le contraste.
    pub brightness: f32,
}

impl Default for Tone {
    fn default() -> Self {
        Self {
            invert: false,
            contrast: 1.0,
            brightness: 0.0,
        }
    }
}

impl Tone {
    /// Extract tone settings from a render config.
    #[must_use]
    pub fn from_config(config: &RenderConfig) -> Self {
        Self {
            invert: config.invert,
            contrast: config.contrast,
            brightness: config.brightness,
        }
    }

    /// `true` when [`Tone::apply`] is the identity.
    #[must_use]
    pub fn is_neutral(&self) -> bool {
        !self.invert && (self.contrast - 1.0).abs() < f32::EPSILON && self.brightness == 0.0
    }

    /// Apply invert, then contrast and brightness. Result clamped to [0, 1].
    #[inline(always)]
    #[must_use]
    pub fn apply(&self, lum: f32) -> f32 {
        if self.is_neutral() {
            return lum;
        }
        let lum = if self.invert { 1.0 - lum } else { lum };
        let adjusted = (lum - 0.5) * self.contrast + 0.5 + self.brightness;
        adjusted.clamp(0.0, 1.0)
    }
}
