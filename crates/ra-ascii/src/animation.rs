//! Générateur de frames shimmer.
//!
//! Le générateur ne dort jamais : il produit la frame `i` à la demande et
//! laisse la boucle d'ordonnancement (le player) gérer le délai et
//! l'annulation entre deux frames.

use std::sync::Arc;
use std::time::Duration;

use ra_core::animation::AnimationSpec;
use ra_core::frame::{AsciiGrid, SampleGrid};

use crate::compositor::Compositor;
use crate::shimmer::Shimmer;

/// Current state of the generator.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GeneratorState {
    /// Nothing emitted yet.
    Idle,
    /// Frame `n` was the last one handed out.
    Rendering(u32),
    /// Finished or cancelled. Terminal.
    Done,
}

/// Produces the ordered frames of one render pass.
///
/// The base samples are computed once by the caller and shared read-only.
/// Frame `i` is a pure function of (base, spec, shimmer, `i`).
///
/// # Example
/// ```
/// use std::sync::Arc;
/// use ra_core::animation::AnimationSpec;
/// use ra_core::charset::Charset;
/// use ra_core::frame::FrameBuffer;
/// use ra_ascii::animation::{FrameGenerator, GeneratorState};
/// use ra_ascii::compositor::Compositor;
/// use ra_ascii::shimmer::Shimmer;
///
/// let compositor = Compositor::new(Charset::default());
/// let frame = FrameBuffer::filled(4, 4, [90, 90, 200, 255]).unwrap();
/// let base = Arc::new(compositor.sample(&frame, 4, 2).unwrap());
/// let spec = AnimationSpec::new(3, 10.0).unwrap();
/// let mut generator = FrameGenerator::new(compositor, base, spec, Shimmer::default());
///
/// assert_eq!(generator.state(), GeneratorState::Idle);
/// assert_eq!(generator.by_ref().count(), 3);
/// assert_eq!(generator.state(), GeneratorState::Done);
/// ```
#[derive(Debug)]
pub struct FrameGenerator {
    compositor: Compositor,
    base: Arc<SampleGrid>,
    base_grid: AsciiGrid,
    spec: AnimationSpec,
    shimmer: Shimmer,
    state: GeneratorState,
}

impl FrameGenerator {
    /// Build a generator; renders the unperturbed base grid once.
    #[must_use]
    pub fn new(
        compositor: Compositor,
        base: Arc<SampleGrid>,
        spec: AnimationSpec,
        shimmer: Shimmer,
    ) -> Self {
        let base_grid = compositor.render(&base);
        log::debug!(
            "Générateur : {}×{}, {} frame(s)",
            base.width,
            base.height,
            spec.emitted_frames()
        );
        Self {
            compositor,
            base,
            base_grid,
            spec,
            shimmer,
            state: GeneratorState::Idle,
        }
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> GeneratorState {
        self.state
    }

    /// Animation parameters.
    #[must_use]
    pub fn spec(&self) -> AnimationSpec {
        self.spec
    }

    /// Compositor used for every frame.
    #[must_use]
    pub fn compositor(&self) -> &Compositor {
        &self.compositor
    }

    /// Unperturbed grid.
    #[must_use]
    pub fn base_grid(&self) -> &AsciiGrid {
        &self.base_grid
    }

    /// Délai à respecter entre deux frames, `None` en mode statique.
    #[must_use]
    pub fn frame_interval(&self) -> Option<Duration> {
        self.spec.frame_interval()
    }

    /// Render frame `index` without touching the state machine.
    ///
    /// Static specs always yield the base grid.
    #[must_use]
    pub fn frame(&self, index: u32) -> AsciiGrid {
        if self.spec.is_static() {
            return self.base_grid.clone();
        }
        let perturbed = self.shimmer.apply(&self.base, index);
        self.compositor.render(&perturbed)
    }

    /// `true` if [`FrameGenerator::next_frame`] would yield another frame.
    #[must_use]
    pub fn has_next(&self) -> bool {
        match self.state {
            GeneratorState::Idle => true,
            GeneratorState::Rendering(i) => i + 1 < self.spec.emitted_frames(),
            GeneratorState::Done => false,
        }
    }

    /// Advance the state machine and return the next frame.
    pub fn next_frame(&mut self) -> Option<AsciiGrid> {
        let index = match self.state {
            GeneratorState::Idle => 0,
            GeneratorState::Rendering(i) if i + 1 < self.spec.emitted_frames() => i + 1,
            GeneratorState::Rendering(_) | GeneratorState::Done => {
                self.state = GeneratorState::Done;
                return None;
            }
        };
        self.state = GeneratorState::Rendering(index);
        Some(self.frame(index))
    }

    /// Stop after the frame already handed out. No partial frame is produced.
    pub fn cancel(&mut self) {
        if self.state != GeneratorState::Done {
            log::info!("Animation annulée ({:?})", self.state);
        }
        self.state = GeneratorState::Done;
    }
}

impl Iterator for FrameGenerator {
    type Item = AsciiGrid;

    fn next(&mut self) -> Option<AsciiGrid> {
        self.next_frame()
    }
}
