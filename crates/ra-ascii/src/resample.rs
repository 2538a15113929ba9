use ra_core::color::{composite_over, luminance};
use ra_core::error::CoreError;
use ra_core::frame::{FrameBuffer, Sample, SampleGrid};
use rayon::prelude::*;

/// Resample a pixel buffer onto a `width`×`height` cell grid.
///
/// Each cell averages the block of source pixels it covers (box filter).
/// When the grid is larger than the source, blocks shrink to a single pixel
/// and sampling degenerates to nearest/duplicate.
///
/// No aspect guessing happens here: `width` and `height` are final. Callers
/// derive them with [`ra_core::sizing::resolve_grid_size`], which assumes
/// cells twice as tall as wide ([`ra_core::sizing::DEFAULT_CELL_ASPECT`]).
///
/// Alpha is ignored unless `background` is set, in which case every pixel is
/// composited over it before averaging.
///
/// # Errors
/// [`CoreError::Config`] if `width` or `height` is 0.
///
/// # Example
/// ```
/// use ra_core::frame::FrameBuffer;
/// use ra_ascii::resample::resample;
///
/// let frame = FrameBuffer::filled(8, 8, [255, 255, 255, 255]).unwrap();
/// let grid = resample(&frame, 4, 2, None).unwrap();
/// assert_eq!(grid.samples.len(), 8);
/// assert!((grid.get(3, 1).luminance - 1.0).abs() < 1e-6);
/// ```
pub fn resample(
    frame: &FrameBuffer,
    width: u16,
    height: u16,
    background: Option<(u8, u8, u8)>,
) -> Result<SampleGrid, CoreError> {
    if width == 0 || height == 0 {
        return Err(CoreError::Config(format!(
            "grille de surface nulle ({width}×{height})"
        )));
    }

    let mut grid = SampleGrid::new(width, height);
    let (sw, sh) = (frame.width(), frame.height());

    // Les cellules sont indépendantes : parallélisme par ligne sans effet sur le résultat.
    grid.samples
        .par_chunks_mut(usize::from(width))
        .enumerate()
        .for_each(|(cy, row)| {
            let (y0, y1) = span(cy as u32, u32::from(height), sh);
            for (cx, sample) in row.iter_mut().enumerate() {
                let (x0, x1) = span(cx as u32, u32::from(width), sw);
                *sample = average_block(frame, x0, x1, y0, y1, background);
            }
        });

    Ok(grid)
}

/// Source range `[start, end)` covered by cell `index` of `cells`.
#[inline(always)]
fn span(index: u32, cells: u32, source: u32) -> (u32, u32) {
    let start = (u64::from(index) * u64::from(source) / u64::from(cells)) as u32;
    let end = (u64::from(index + 1) * u64::from(source) / u64::from(cells)) as u32;
    let start = start.min(source - 1);
    (start, end.clamp(start + 1, source))
}

fn average_block(
    frame: &FrameBuffer,
    x0: u32,
    x1: u32,
    y0: u32,
    y1: u32,
    background: Option<(u8, u8, u8)>,
) -> Sample {
    let (mut sr, mut sg, mut sb) = (0u64, 0u64, 0u64);
    for y in y0..y1 {
        for x in x0..x1 {
            let (r, g, b, a) = frame.pixel(x, y);
            let (r, g, b) = match background {
                Some(bg) => composite_over((r, g, b), a, bg),
                None => (r, g, b),
            };
            sr += u64::from(r);
            sg += u64::from(g);
            sb += u64::from(b);
        }
    }
    let count = u64::from(x1 - x0) * u64::from(y1 - y0);
    let avg = |sum: u64| ((sum + count / 2) / count) as u8;
    let rgb = (avg(sr), avg(sg), avg(sb));

    Sample {
        luminance: luminance(rgb.0, rgb.1, rgb.2),
        rgb,
    }
}
