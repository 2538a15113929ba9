use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

/// Granularité max d'un sommeil, pour réagir vite à l'annulation.
pub const SLEEP_SLICE: Duration = Duration::from_millis(20);

/// Cadence les frames sur une horloge à échéances.
///
/// Chaque échéance est calculée depuis la précédente, pas depuis la fin du
/// rendu : le temps d'encodage est absorbé tant qu'il reste sous l'intervalle.
/// Si une frame prend du retard, l'échéance suivante repart de maintenant.
///
/// # Example
/// ```
/// use std::sync::atomic::AtomicBool;
/// use std::time::Duration;
/// use ra_render::pacing::FramePacer;
///
/// let cancel = AtomicBool::new(false);
/// let mut pacer = FramePacer::new(Duration::from_millis(1));
/// pacer.tick();
/// assert!(pacer.wait(&cancel));
/// pacer.tick();
/// assert_eq!(pacer.frames(), 2);
/// ```
#[derive(Debug)]
pub struct FramePacer {
    interval: Duration,
    started: Option<Instant>,
    deadline: Option<Instant>,
    last: Option<Instant>,
    frames: u32,
}

impl FramePacer {
    /// Pacer with a fixed interval between frames.
    #[must_use]
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            started: None,
            deadline: None,
            last: None,
            frames: 0,
        }
    }

    /// Frames recorded so far.
    #[must_use]
    pub fn frames(&self) -> u32 {
        self.frames
    }

    /// Appeler une fois par frame, APRÈS l'écriture sur le terminal.
    pub fn tick(&mut self) {
        let now = Instant::now();
        self.started.get_or_insert(now);
        self.last = Some(now);
        self.frames += 1;
        let next = match self.deadline {
            Some(deadline) if deadline + self.interval > now => deadline + self.interval,
            _ => now + self.interval,
        };
        self.deadline = Some(next);
    }

    /// Sleep until the next deadline, in slices of at most [`SLEEP_SLICE`].
    ///
    /// Returns `false` as soon as `cancel` is observed set.
    pub fn wait(&self, cancel: &AtomicBool) -> bool {
        let Some(deadline) = self.deadline else {
            return !cancel.load(Ordering::Relaxed);
        };
        loop {
            if cancel.load(Ordering::Relaxed) {
                return false;
            }
            let now = Instant::now();
            if now >= deadline {
                return true;
            }
            std::thread::sleep((deadline - now).min(SLEEP_SLICE));
        }
    }

    /// Frames par seconde effectivement atteintes entre la première et la
    /// dernière frame. `None` avec moins de deux frames.
    #[must_use]
    pub fn achieved_fps(&self) -> Option<f64> {
        let (Some(first), Some(last)) = (self.started, self.last) else {
            return None;
        };
        let secs = last.duration_since(first).as_secs_f64();
        (self.frames >= 2 && secs > 0.0).then(|| f64::from(self.frames - 1) / secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_fps_before_two_frames() {
        let mut pacer = FramePacer::new(Duration::from_millis(5));
        assert_eq!(pacer.achieved_fps(), None);
        pacer.tick();
        assert_eq!(pacer.achieved_fps(), None);
    }

    #[test]
    fn wait_honours_interval() {
        let cancel = AtomicBool::new(false);
        let mut pacer = FramePacer::new(Duration::from_millis(30));
        let start = Instant::now();
        pacer.tick();
        assert!(pacer.wait(&cancel));
        assert!(start.elapsed() >= Duration::from_millis(30));
    }

    #[test]
    fn cancel_interrupts_wait_promptly() {
        let cancel = AtomicBool::new(true);
        let mut pacer = FramePacer::new(Duration::from_secs(10));
        pacer.tick();
        let start = Instant::now();
        assert!(!pacer.wait(&cancel));
        assert!(start.elapsed() < Duration::from_secs(1));
    }

    #[test]
    fn achieved_fps_close_to_target() {
        let cancel = AtomicBool::new(false);
        let mut pacer = FramePacer::new(Duration::from_millis(10));
        for _ in 0..5 {
            pacer.tick();
            pacer.wait(&cancel);
        }
        pacer.tick();
        let fps = pacer.achieved_fps().unwrap();
        assert!(fps > 0.0 && fps <= 101.0, "fps = {fps}");
    }
}
