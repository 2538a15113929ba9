use std::time::Duration;

use crate::error::CoreError;

/// Plus long délai accepté entre deux frames.
pub const MAX_FRAME_INTERVAL: Duration = Duration::from_secs(3600);

/// Paramètres d'animation validés.
///
/// `frames == 0` est la politique statique explicite : une seule frame non
/// perturbée, sans boucle de délai.
///
/// # Example
/// ```
/// use ra_core::animation::AnimationSpec;
/// let spec = AnimationSpec::new(30, 10.0).unwrap();
/// assert_eq!(spec.frame_interval().unwrap().as_millis(), 100);
/// assert!(AnimationSpec::new(30, 0.0).is_err());
/// assert!(AnimationSpec::new(0, 0.0).unwrap().is_static());
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AnimationSpec {
    frames: u32,
    fps: f32,
    interval: Option<Duration>,
}

impl AnimationSpec {
    /// Validate and build an animation spec.
    ///
    /// # Errors
    /// [`CoreError::Config`] if `frames > 0` and `fps` is not a finite
    /// positive number, or if the resulting interval exceeds
    /// [`MAX_FRAME_INTERVAL`].
    pub fn new(frames: u32, fps: f32) -> Result<Self, CoreError> {
        if frames == 0 {
            return Ok(Self {
                frames,
                fps,
                interval: None,
            });
        }
        if !(fps.is_finite() && fps > 0.0) {
            return Err(CoreError::Config(format!(
                "fps doit être > 0 pour animer {frames} frames (reçu {fps})"
            )));
        }
        let interval = Duration::try_from_secs_f64(1.0 / f64::from(fps))
            .ok()
            .filter(|d| *d <= MAX_FRAME_INTERVAL)
            .ok_or_else(|| {
                CoreError::Config(format!(
                    "fps trop faible ({fps}) : délai max {} s entre deux frames",
                    MAX_FRAME_INTERVAL.as_secs()
                ))
            })?;
        Ok(Self {
            frames,
            fps,
            interval: Some(interval),
        })
    }

    /// Single unperturbed frame.
    #[must_use]
    pub fn still() -> Self {
        Self {
            frames: 0,
            fps: 0.0,
            interval: None,
        }
    }

    /// `true` when no animation is requested.
    #[inline]
    #[must_use]
    pub fn is_static(&self) -> bool {
        self.frames == 0
    }

    /// Requested shimmer frames (0 for static).
    #[inline]
    #[must_use]
    pub fn frames(&self) -> u32 {
        self.frames
    }

    /// Number of frames actually emitted: `frames`, or 1 when static.
    #[inline]
    #[must_use]
    pub fn emitted_frames(&self) -> u32 {
        self.frames.max(1)
    }

    /// Frames per second. Meaningless when static.
    #[inline]
    #[must_use]
    pub fn fps(&self) -> f32 {
        self.fps
    }

    /// Délai entre deux frames, `None` en mode statique.
    #[must_use]
    pub fn frame_interval(&self) -> Option<Duration> {
        self.interval
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_and_nan_fps_rejected() {
        assert!(AnimationSpec::new(5, -1.0).is_err());
        assert!(AnimationSpec::new(5, f32::NAN).is_err());
        assert!(AnimationSpec::new(5, f32::INFINITY).is_err());
    }

    #[test]
    fn static_spec_ignores_fps() {
        let spec = AnimationSpec::new(0, -3.0).unwrap();
        assert!(spec.is_static());
        assert_eq!(spec.emitted_frames(), 1);
        assert_eq!(spec.frame_interval(), None);
        assert_eq!(spec, AnimationSpec::new(0, -3.0).unwrap());
    }

    #[test]
    fn interval_matches_fps() {
        let spec = AnimationSpec::new(3, 4.0).unwrap();
        assert_eq!(spec.frame_interval(), Some(Duration::from_millis(250)));
        assert_eq!(spec.emitted_frames(), 3);
    }

    #[test]
    fn vanishing_fps_is_config_error() {
        let err = AnimationSpec::new(2, 1e-30).unwrap_err();
        assert!(err.is_config());
        assert!(AnimationSpec::new(2, 1.0 / 7200.0).is_err());
        let slowest = AnimationSpec::new(2, 1.0 / 1800.0).unwrap();
        assert!(slowest.frame_interval().unwrap() <= MAX_FRAME_INTERVAL);
    }
}
