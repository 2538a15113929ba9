use crate::error::CoreError;

/// Buffer de pixels source, immuable une fois construit.
///
/// Stocke les pixels en RGBA row-major, 4 bytes par pixel. Les entrées RGB
/// sont étendues en RGBA opaque à la construction.
///
/// # Example
/// ```
/// use ra_core::frame::FrameBuffer;
/// let fb = FrameBuffer::from_rgb(2, 1, &[255, 0, 0, 0, 0, 255]).unwrap();
/// assert_eq!(fb.pixel(0, 0), (255, 0, 0, 255));
/// assert_eq!(fb.pixel(1, 0), (0, 0, 255, 255));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameBuffer {
    data: Vec<u8>,
    width: u32,
    height: u32,
}

impl FrameBuffer {
    /// Wrap an RGBA buffer.
    ///
    /// # Errors
    /// [`CoreError::InvalidDimensions`] for a zero-area buffer,
    /// [`CoreError::InvalidInput`] if `data.len() != width * height * 4`.
    pub fn from_rgba(width: u32, height: u32, data: Vec<u8>) -> Result<Self, CoreError> {
        let expected = checked_len(width, height, 4)?;
        if data.len() != expected {
            return Err(CoreError::InvalidInput(format!(
                "buffer RGBA de {} octets, {expected} attendus pour {width}×{height}",
                data.len()
            )));
        }
        Ok(Self {
            data,
            width,
            height,
        })
    }

    /// Expand an RGB buffer into opaque RGBA.
    ///
    /// # Errors
    /// Same as [`FrameBuffer::from_rgba`], with 3 bytes per pixel.
    pub fn from_rgb(width: u32, height: u32, data: &[u8]) -> Result<Self, CoreError> {
        let expected = checked_len(width, height, 3)?;
        if data.len() != expected {
            return Err(CoreError::InvalidInput(format!(
                "buffer RGB de {} octets, {expected} attendus pour {width}×{height}",
                data.len()
            )));
        }
        let mut rgba = Vec::with_capacity(expected / 3 * 4);
        for px in data.chunks_exact(3) {
            rgba.extend_from_slice(&[px[0], px[1], px[2], 255]);
        }
        Ok(Self {
            data: rgba,
            width,
            height,
        })
    }

    /// Uniform buffer, handy for tests and placeholders.
    ///
    /// # Errors
    /// [`CoreError::InvalidDimensions`] for a zero-area buffer.
    pub fn filled(width: u32, height: u32, rgba: [u8; 4]) -> Result<Self, CoreError> {
        let len = checked_len(width, height, 4)?;
        let data = rgba.iter().copied().cycle().take(len).collect();
        Ok(Self {
            data,
            width,
            height,
        })
    }

    /// Width in pixels.
    #[inline]
    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    #[inline]
    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Raw RGBA bytes.
    #[must_use]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Pixel (x, y) en (r, g, b, a).
    #[inline(always)]
    #[must_use]
    pub fn pixel(&self, x: u32, y: u32) -> (u8, u8, u8, u8) {
        debug_assert!(x < self.width && y < self.height, "pixel out of bounds");
        let idx = (y as usize * self.width as usize + x as usize) * 4;
        match self.data.get(idx..idx + 4) {
            Some(px) => (px[0], px[1], px[2], px[3]),
            None => (0, 0, 0, 0),
        }
    }
}

fn checked_len(width: u32, height: u32, channels: usize) -> Result<usize, CoreError> {
    if width == 0 || height == 0 {
        return Err(CoreError::InvalidDimensions { width, height });
    }
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|n| n.checked_mul(channels))
        .ok_or(CoreError::InvalidDimensions { width, height })
}

/// One resampled cell before glyph mapping.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Sample {
    /// Luminance BT.709 [0.0, 1.0].
    pub luminance: f32,
    /// Couleur moyenne du bloc source.
    pub rgb: (u8, u8, u8),
}

/// Grille d'échantillons produite par le resampler.
///
/// Partagée en lecture seule entre toutes les frames d'une animation.
#[derive(Clone, Debug, PartialEq)]
pub struct SampleGrid {
    /// Flat array of samples, row-major.
    pub samples: Vec<Sample>,
    /// Width in cells.
    pub width: u16,
    /// Height in cells.
    pub height: u16,
}

impl SampleGrid {
    /// Zeroed grid of the given size.
    #[must_use]
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            samples: vec![Sample::default(); usize::from(width) * usize::from(height)],
            width,
            height,
        }
    }

    /// Sample at (x, y).
    #[inline(always)]
    #[must_use]
    pub fn get(&self, x: u16, y: u16) -> &Sample {
        &self.samples[usize::from(y) * usize::from(self.width) + usize::from(x)]
    }

    /// Luminance field in scan order.
    #[must_use]
    pub fn luminance_field(&self) -> Vec<f32> {
        self.samples.iter().map(|s| s.luminance).collect()
    }
}

/// Grille de sortie ASCII. Dimensions fixes pour toute la passe de rendu.
///
/// # Example
/// ```
/// use ra_core::frame::{AsciiGrid, AsciiCell};
/// let mut grid = AsciiGrid::new(80, 24);
/// grid.set(0, 0, AsciiCell { ch: '@', fg: (255, 0, 0), luminance: 1.0 });
/// assert_eq!(grid.get(0, 0).ch, '@');
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct AsciiGrid {
    /// Cells in row-major order.
    pub cells: Vec<AsciiCell>,
    /// Width in characters.
    pub width: u16,
    /// Height in characters.
    pub height: u16,
}

/// One rendered character position.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AsciiCell {
    /// Glyphe choisi dans le charset actif.
    pub ch: char,
    /// Couleur de premier plan.
    pub fg: (u8, u8, u8),
    /// Niveau quantifié, dans [0, 1], qui a sélectionné le glyphe.
    pub luminance: f32,
}

impl Default for AsciiCell {
    fn default() -> Self {
        Self {
            ch: ' ',
            fg: (0, 0, 0),
            luminance: 0.0,
        }
    }
}

impl AsciiGrid {
    /// Grille remplie de cellules vides.
    ///
    /// # Example
    /// ```
    /// use ra_core::frame::AsciiGrid;
    /// let grid = AsciiGrid::new(80, 24);
    /// assert_eq!(grid.cells.len(), 80 * 24);
    /// ```
    #[must_use]
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            cells: vec![AsciiCell::default(); usize::from(width) * usize::from(height)],
            width,
            height,
        }
    }

    /// Overwrite the cell at (x, y).
    #[inline(always)]
    pub fn set(&mut self, x: u16, y: u16, cell: AsciiCell) {
        self.cells[usize::from(y) * usize::from(self.width) + usize::from(x)] = cell;
    }

    /// Cell at (x, y).
    #[inline(always)]
    #[must_use]
    pub fn get(&self, x: u16, y: u16) -> &AsciiCell {
        &self.cells[usize::from(y) * usize::from(self.width) + usize::from(x)]
    }

    /// Iterate over rows as slices.
    pub fn rows(&self) -> impl Iterator<Item = &[AsciiCell]> {
        self.cells.chunks(usize::from(self.width.max(1)))
    }
}
