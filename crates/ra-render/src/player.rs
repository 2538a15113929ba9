//! Boucle de lecture : frame → terminal → attente → frame suivante.

use std::io::Write;
use std::sync::atomic::{AtomicBool, Ordering};

use anyhow::{Context, Result};
use crossterm::QueueableCommand;
use crossterm::cursor::MoveTo;
use crossterm::terminal::{Clear, ClearType};
use ra_ascii::animation::FrameGenerator;

use crate::ansi::{AnsiEncoder, RESET};
use crate::pacing::FramePacer;

/// Résumé d'une lecture.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlaybackReport {
    /// Frames entirely written to the sink.
    pub frames_emitted: u32,
    /// `true` if playback stopped on the cancel flag.
    pub cancelled: bool,
    /// Measured rate, animated runs with at least two frames only.
    pub achieved_fps: Option<f64>,
}

/// Play every frame of `generator` into `out`.
///
/// Static runs write the single frame and return without clearing or
/// sleeping. Animated runs clear and home the cursor before each frame,
/// wait only between frames, and reset attributes at the end, including
/// after a cancellation. A frame is always written whole.
///
/// # Errors
/// Propagates write and flush failures on `out`.
///
/// # Example
/// ```
/// use std::sync::Arc;
/// use std::sync::atomic::AtomicBool;
/// use ra_core::animation::AnimationSpec;
/// use ra_core::charset::Charset;
/// use ra_core::frame::FrameBuffer;
/// use ra_ascii::animation::FrameGenerator;
/// use ra_ascii::compositor::Compositor;
/// use ra_ascii::shimmer::Shimmer;
/// use ra_render::ansi::AnsiEncoder;
/// use ra_render::player::play;
///
/// let compositor = Compositor::new(Charset::default());
/// let frame = FrameBuffer::filled(2, 2, [128, 128, 128, 255]).unwrap();
/// let base = Arc::new(compositor.sample(&frame, 2, 2).unwrap());
/// let mut generator =
///     FrameGenerator::new(compositor, base, AnimationSpec::still(), Shimmer::default());
///
/// let mut out = Vec::new();
/// let report = play(&mut generator, &mut out, &AnsiEncoder::new(false), &AtomicBool::new(false)).unwrap();
/// assert_eq!(report.frames_emitted, 1);
/// assert_eq!(String::from_utf8(out).unwrap(), "++\n++\n");
/// ```
pub fn play<W: Write>(
    generator: &mut FrameGenerator,
    out: &mut W,
    encoder: &AnsiEncoder,
    cancel: &AtomicBool,
) -> Result<PlaybackReport> {
    let Some(interval) = generator.frame_interval() else {
        let mut frames_emitted = 0;
        if let Some(grid) = generator.next_frame() {
            encoder.write_grid(out, &grid).context("Écriture de la frame")?;
            out.flush().context("Flush du terminal")?;
            frames_emitted = 1;
        }
        return Ok(PlaybackReport {
            frames_emitted,
            cancelled: false,
            achieved_fps: None,
        });
    };

    let mut pacer = FramePacer::new(interval);
    let mut cancelled = false;

    while let Some(grid) = generator.next_frame() {
        out.queue(Clear(ClearType::All))?;
        out.queue(MoveTo(0, 0))?;
        encoder.write_grid(out, &grid).context("Écriture de la frame")?;
        out.flush().context("Flush du terminal")?;
        pacer.tick();

        if cancel.load(Ordering::Relaxed) || (generator.has_next() && !pacer.wait(cancel)) {
            generator.cancel();
            cancelled = true;
            break;
        }
    }

    out.write_all(RESET.as_bytes())?;
    out.flush()?;

    let achieved_fps = pacer.achieved_fps();
    if let Some(fps) = achieved_fps {
        log::debug!(
            "Lecture : {} frame(s), {fps:.1} fps mesurés (cible {:.1})",
            pacer.frames(),
            generator.spec().fps()
        );
    }
    if cancelled {
        log::info!("Lecture interrompue après {} frame(s)", pacer.frames());
    }

    Ok(PlaybackReport {
        frames_emitted: pacer.frames(),
        cancelled,
        achieved_fps,
    })
}
