use ra_core::charset::Charset;
use ra_core::config::RenderConfig;
use ra_core::error::CoreError;
use ra_core::frame::{AsciiCell, AsciiGrid, FrameBuffer, SampleGrid};

use crate::color_map::{self, ColorSettings};
use crate::dither;
use crate::luminance::Tone;
use crate::palette::PaletteMapper;
use crate::resample;

/// Compositor orchestre la conversion échantillons → grille ASCII.
///
/// Resampling, ajustement de tonalité, tramage optionnel, mapping de glyphes
/// et de couleur. Immuable une fois construit.
///
/// # Example
/// ```
/// use ra_core::charset::Charset;
/// use ra_core::frame::FrameBuffer;
/// use ra_ascii::compositor::Compositor;
///
/// let compositor = Compositor::new(Charset::default());
/// let frame = FrameBuffer::filled(10, 10, [255, 255, 255, 255]).unwrap();
/// let grid = compositor.process(&frame, 5, 3).unwrap();
/// assert!(grid.cells.iter().all(|c| c.ch == '@'));
/// ```
#[derive(Clone, Debug)]
pub struct Compositor {
    palette: PaletteMapper,
    tone: Tone,
    dither: bool,
    color: ColorSettings,
    background: Option<(u8, u8, u8)>,
}

impl Compositor {
    /// Compositor with neutral tone, no dithering and no color.
    #[must_use]
    pub fn new(charset: Charset) -> Self {
        Self {
            palette: PaletteMapper::new(charset),
            tone: Tone::default(),
            dither: false,
            color: ColorSettings::default(),
            background: None,
        }
    }

    /// Build from a render config.
    ///
    /// # Errors
    /// [`CoreError::Config`] if the configured charset is invalid.
    pub fn from_config(config: &RenderConfig) -> Result<Self, CoreError> {
        Ok(Self {
            palette: PaletteMapper::new(config.charset()?),
            tone: Tone::from_config(config),
            dither: config.dither_enabled,
            color: ColorSettings::from_config(config),
            background: config.background_rgb(),
        })
    }

    /// Enable or disable Floyd–Steinberg diffusion.
    #[must_use]
    pub fn with_dither(mut self, dither: bool) -> Self {
        self.dither = dither;
        self
    }

    /// Replace the color settings.
    #[must_use]
    pub fn with_color(mut self, color: ColorSettings) -> Self {
        self.color = color;
        self
    }

    /// Replace the tone settings.
    #[must_use]
    pub fn with_tone(mut self, tone: Tone) -> Self {
        self.tone = tone;
        self
    }

    /// Active charset.
    #[must_use]
    pub fn charset(&self) -> &Charset {
        self.palette.charset()
    }

    /// Color settings, used by the encoder to decide on escapes.
    #[must_use]
    pub fn color(&self) -> ColorSettings {
        self.color
    }

    /// Resample `frame` onto a `width`×`height` grid of samples.
    ///
    /// # Errors
    /// See [`resample::resample`].
    pub fn sample(
        &self,
        frame: &FrameBuffer,
        width: u16,
        height: u16,
    ) -> Result<SampleGrid, CoreError> {
        resample::resample(frame, width, height, self.background)
    }

    /// Map samples to glyphs and colors.
    ///
    /// Only luminance goes through tone and dithering; colors come straight
    /// from each cell's own sample. Each cell keeps the quantized level that
    /// selected its glyph, with or without dithering.
    #[must_use]
    pub fn render(&self, samples: &SampleGrid) -> AsciiGrid {
        let width = usize::from(samples.width);
        let height = usize::from(samples.height);
        let levels = self.palette.levels();

        let mut field = samples.luminance_field();
        if !self.tone.is_neutral() {
            for l in &mut field {
                *l = self.tone.apply(*l);
            }
        }
        let field = if self.dither {
            dither::error_diffuse(&field, width, height, levels)
        } else {
            dither::quantize_plain(&field, levels)
        };

        let mut grid = AsciiGrid::new(samples.width, samples.height);
        for ((cell, sample), &lum) in grid.cells.iter_mut().zip(&samples.samples).zip(&field) {
            let (r, g, b) = sample.rgb;
            let fg = if self.color.enabled {
                color_map::map_color(r, g, b, self.color.mode, self.color.saturation)
            } else {
                (r, g, b)
            };
            *cell = AsciiCell {
                ch: self.palette.map(lum),
                fg,
                luminance: lum,
            };
        }
        grid
    }

    /// Resample then render in one go.
    ///
    /// # Errors
    /// See [`Compositor::sample`].
    pub fn process(
        &self,
        frame: &FrameBuffer,
        width: u16,
        height: u16,
    ) -> Result<AsciiGrid, CoreError> {
        let samples = self.sample(frame, width, height)?;
        Ok(self.render(&samples))
    }
}
