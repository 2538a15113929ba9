use std::fmt::Write as _;
use std::io;

use ra_core::frame::{AsciiCell, AsciiGrid};

/// Séquence de reset SGR.
pub const RESET: &str = "\x1b[0m";

/// Escape truecolor (24 bits) foreground.
///
/// # Example
/// ```
/// use ra_render::ansi::fg_escape;
/// assert_eq!(fg_escape(255, 0, 10), "\x1b[38;2;255;0;10m");
/// ```
#[must_use]
pub fn fg_escape(r: u8, g: u8, b: u8) -> String {
    format!("\x1b[38;2;{r};{g};{b}m")
}

/// Sérialise une grille en lignes de texte, une par rangée.
///
/// Le glyphe est choisi en amont ; l'encodeur ne fait que l'entourer de la
/// couleur de sa propre cellule.
///
/// # Example
/// ```
/// use ra_core::frame::{AsciiCell, AsciiGrid};
/// use ra_render::ansi::AnsiEncoder;
///
/// let mut grid = AsciiGrid::new(2, 1);
/// grid.set(0, 0, AsciiCell { ch: '#', fg: (1, 2, 3), luminance: 0.8 });
/// assert_eq!(AnsiEncoder::new(false).lines(&grid), vec!["# ".to_string()]);
/// assert_eq!(
///     AnsiEncoder::new(true).encode_cell(grid.get(0, 0)),
///     "\x1b[38;2;1;2;3m#\x1b[0m"
/// );
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AnsiEncoder {
    color: bool,
}

impl AnsiEncoder {
    /// Encoder with or without color escapes.
    #[must_use]
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    /// `true` if escapes are emitted.
    #[must_use]
    pub fn color(&self) -> bool {
        self.color
    }

    /// Append one cell to `out`.
    #[inline]
    pub fn push_cell(&self, out: &mut String, cell: &AsciiCell) {
        if self.color {
            let (r, g, b) = cell.fg;
            // fmt::Write sur String ne peut pas échouer.
            let _ = write!(out, "\x1b[38;2;{r};{g};{b}m{}{RESET}", cell.ch);
        } else {
            out.push(cell.ch);
        }
    }

    /// One cell as a standalone string.
    #[must_use]
    pub fn encode_cell(&self, cell: &AsciiCell) -> String {
        let mut out = String::new();
        self.push_cell(&mut out, cell);
        out
    }

    /// One row of cells as a line (no trailing newline).
    #[must_use]
    pub fn encode_row(&self, row: &[AsciiCell]) -> String {
        let per_cell = if self.color { 24 } else { 1 };
        let mut out = String::with_capacity(row.len() * per_cell);
        for cell in row {
            self.push_cell(&mut out, cell);
        }
        out
    }

    /// All rows, one string per grid row.
    #[must_use]
    pub fn lines(&self, grid: &AsciiGrid) -> Vec<String> {
        grid.rows().map(|row| self.encode_row(row)).collect()
    }

    /// Rows joined with `\n`, no trailing newline.
    #[must_use]
    pub fn encode_grid(&self, grid: &AsciiGrid) -> String {
        self.lines(grid).join("\n")
    }

    /// Write every row followed by a newline.
    ///
    /// # Errors
    /// Propagates I/O errors from `out`.
    pub fn write_grid<W: io::Write>(&self, out: &mut W, grid: &AsciiGrid) -> io::Result<()> {
        for row in grid.rows() {
            out.write_all(self.encode_row(row).as_bytes())?;
            out.write_all(b"\n")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use ra_ascii::compositor::Compositor;
    use ra_core::charset::Charset;
    use ra_core::frame::FrameBuffer;

    use super::*;

    fn mid_gray_grid() -> AsciiGrid {
        let frame = FrameBuffer::filled(2, 2, [128, 128, 128, 255]).unwrap();
        Compositor::new(Charset::default()).process(&frame, 2, 2).unwrap()
    }

    #[test]
    fn mid_gray_plain_lines() {
        let lines = AnsiEncoder::new(false).lines(&mid_gray_grid());
        assert_eq!(lines, vec!["++".to_string(), "++".to_string()]);
    }

    #[test]
    fn mid_gray_colored_cells_share_escape() {
        let encoder = AnsiEncoder::new(true);
        let grid = mid_gray_grid();
        let expected = format!("{}+{RESET}", fg_escape(128, 128, 128));
        for cell in &grid.cells {
            assert_eq!(encoder.encode_cell(cell), expected);
        }
        assert_eq!(encoder.lines(&grid)[0], expected.repeat(2));
    }

    #[test]
    fn color_does_not_change_glyphs() {
        let frame = FrameBuffer::from_rgb(3, 1, &[0, 0, 0, 128, 128, 128, 255, 255, 255]).unwrap();
        let grid = Compositor::new(Charset::default()).process(&frame, 3, 1).unwrap();
        let plain = AnsiEncoder::new(false).encode_grid(&grid);
        let colored = AnsiEncoder::new(true).encode_grid(&grid);
        let stripped: String = colored
            .split(RESET)
            .filter_map(|chunk| chunk.rsplit('m').next())
            .collect();
        assert_eq!(plain, " +@");
        assert_eq!(stripped, plain);
    }

    #[test]
    fn write_grid_emits_one_line_per_row() {
        let mut out = Vec::new();
        let grid = AsciiGrid::new(3, 4);
        AnsiEncoder::new(false).write_grid(&mut out, &grid).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text, "   \n   \n   \n   \n");
    }
}
