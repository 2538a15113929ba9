use ra_core::charset::Charset;

/// Index de niveau pour une luminance [0.0, 1.0] sur `levels` niveaux.
///
/// `floor(l * (levels - 1) + 0.5)`, borné à `[0, levels - 1]`. Une valeur non
/// finie retombe sur 0.
///
/// # Example
/// ```
/// use ra_ascii::palette::level_index;
/// assert_eq!(level_index(0.0, 10), 0);
/// assert_eq!(level_index(0.5, 10), 5);
/// assert_eq!(level_index(1.0, 10), 9);
/// assert_eq!(level_index(7.0, 10), 9);
/// ```
#[inline(always)]
#[must_use]
pub fn level_index(lum: f32, levels: usize) -> usize {
    if levels < 2 || !lum.is_finite() {
        return 0;
    }
    let max = (levels - 1) as f32;
    (lum * max + 0.5).floor().clamp(0.0, max) as usize
}

/// Luminance représentée par le niveau `index`.
#[inline(always)]
#[must_use]
pub fn level_value(index: usize, levels: usize) -> f32 {
    if levels < 2 {
        return 0.0;
    }
    index.min(levels - 1) as f32 / (levels - 1) as f32
}

/// Maps luminance to glyphs of one charset.
///
/// Pure and stateless apart from the charset it owns.
///
/// # Example
/// ```
/// use ra_core::charset::Charset;
/// use ra_ascii::palette::PaletteMapper;
/// let mapper = PaletteMapper::new(Charset::preset("blocks").unwrap());
/// assert_eq!(mapper.map(0.0), ' ');
/// assert_eq!(mapper.map(1.0), '█');
/// ```
#[derive(Clone, Debug)]
pub struct PaletteMapper {
    charset: Charset,
}

impl PaletteMapper {
    /// Wrap a validated charset.
    #[must_use]
    pub fn new(charset: Charset) -> Self {
        Self { charset }
    }

    /// Active charset.
    #[must_use]
    pub fn charset(&self) -> &Charset {
        &self.charset
    }

    /// Number of quantization levels (charset length).
    #[inline]
    #[must_use]
    pub fn levels(&self) -> usize {
        self.charset.len()
    }

    /// Glyph for a luminance value.
    #[inline(always)]
    #[must_use]
    pub fn map(&self, lum: f32) -> char {
        self.charset.glyph(level_index(lum, self.levels()))
    }
}
