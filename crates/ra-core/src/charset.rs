use crate::error::CoreError;

/// Rampe classique de 10 glyphes.
pub const CHARSET_DEFAULT: &str = " .:-=+*#%@";

/// Blocs Unicode à densité croissante.
pub const CHARSET_BLOCKS: &str = " ░▒▓█";

/// Points et cercles, rendu doux.
pub const CHARSET_DOTS: &str = " .:oØ@";

/// 45 caractères, dégradé fin pour les grandes grilles.
pub const CHARSET_DENSE: &str = " .,:;l!i><~+_-?][}{1)(|/tfjrxnuvczXYUJCLQ0NWM";

/// Emoji ordonnés par poids visuel (curated, pas linéaire).
pub const CHARSET_EMOJI: &str = " 🎵💧🔥⚡✨";

/// Names accepted by [`Charset::preset`].
pub const PRESET_NAMES: &[&str] = &["default", "blocks", "dots", "dense", "emoji"];

/// Tag used for user supplied sequences.
pub const CUSTOM_NAME: &str = "custom";

/// Ordered glyph ramp, sparse/dark first, dense/bright last.
///
/// Presets and custom sequences share this one type; the name is only a tag
/// and never influences mapping.
///
/// # Example
/// ```
/// use ra_core::charset::Charset;
/// let cs = Charset::preset("blocks").unwrap();
/// assert_eq!(cs.len(), 5);
/// assert_eq!(cs.glyph(0), ' ');
/// assert_eq!(cs.glyph(4), '█');
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Charset {
    name: String,
    glyphs: Vec<char>,
}

impl Charset {
    /// Build a named preset.
    ///
    /// # Errors
    /// Returns [`CoreError::Config`] if `name` is not a known preset.
    pub fn preset(name: &str) -> Result<Self, CoreError> {
        let glyphs = match name {
            "default" => CHARSET_DEFAULT,
            "blocks" => CHARSET_BLOCKS,
            "dots" => CHARSET_DOTS,
            "dense" => CHARSET_DENSE,
            "emoji" => CHARSET_EMOJI,
            other => {
                return Err(CoreError::Config(format!(
                    "charset inconnu '{other}' (attendu : {})",
                    PRESET_NAMES.join(", ")
                )));
            }
        };
        Self::build(name, glyphs)
    }

    /// Build a charset from a user supplied ordered sequence.
    ///
    /// # Errors
    /// Returns [`CoreError::Config`] if the sequence has fewer than 2 glyphs
    /// or contains a duplicate.
    ///
    /// # Example
    /// ```
    /// use ra_core::charset::Charset;
    /// assert!(Charset::custom(" #").is_ok());
    /// assert!(Charset::custom("#").is_err());
    /// assert!(Charset::custom(" ##").is_err());
    /// ```
    pub fn custom(sequence: &str) -> Result<Self, CoreError> {
        Self::build(CUSTOM_NAME, sequence)
    }

    /// Preset name if `selection` matches one, otherwise a custom sequence.
    ///
    /// # Errors
    /// Same as [`Charset::custom`].
    pub fn resolve(selection: &str) -> Result<Self, CoreError> {
        if PRESET_NAMES.contains(&selection) {
            Self::preset(selection)
        } else {
            Self::custom(selection)
        }
    }

    fn build(name: &str, sequence: &str) -> Result<Self, CoreError> {
        let glyphs: Vec<char> = sequence.chars().collect();
        if glyphs.len() < 2 {
            return Err(CoreError::Config(format!(
                "charset '{name}' : au moins 2 caractères requis, {} fourni(s)",
                glyphs.len()
            )));
        }
        for (i, ch) in glyphs.iter().enumerate() {
            if glyphs[..i].contains(ch) {
                return Err(CoreError::Config(format!(
                    "charset '{name}' : caractère dupliqué '{ch}'"
                )));
            }
        }
        Ok(Self {
            name: name.to_string(),
            glyphs,
        })
    }

    /// Preset name or `"custom"`.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Glyphs in ramp order.
    #[must_use]
    pub fn glyphs(&self) -> &[char] {
        &self.glyphs
    }

    /// Number of quantization levels. Always ≥ 2.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    /// Never true: construction rejects short charsets.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    /// Glyph at ramp position `index`, clamped to the last glyph.
    #[inline(always)]
    #[must_use]
    pub fn glyph(&self, index: usize) -> char {
        self.glyphs[index.min(self.glyphs.len() - 1)]
    }

    /// Ramp position of `ch`, if it belongs to this charset.
    #[must_use]
    pub fn position(&self, ch: char) -> Option<usize> {
        self.glyphs.iter().position(|&c| c == ch)
    }

    /// `true` if `ch` belongs to this charset.
    #[must_use]
    pub fn contains(&self, ch: char) -> bool {
        self.glyphs.contains(&ch)
    }
}

impl Default for Charset {
    fn default() -> Self {
        Self {
            name: "default".to_string(),
            glyphs: CHARSET_DEFAULT.chars().collect(),
        }
    }
}
