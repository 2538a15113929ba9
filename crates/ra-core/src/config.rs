use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::animation::AnimationSpec;
use crate::charset::Charset;
use crate::error::CoreError;
use crate::sizing::DEFAULT_CELL_ASPECT;

/// Configuration complète du rendu.
///
/// Chargée depuis TOML puis surchargée par la ligne de commande.
///
/// # Example
/// ```
/// use ra_core::config::RenderConfig;
/// let config = RenderConfig::default();
/// assert_eq!(config.charset, "default");
/// assert_eq!(config.animate, 0);
/// ```
#[allow(clippy::struct_excessive_bools)]
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct RenderConfig {
    // === Grille ===
    /// Largeur demandée en caractères. `None` = dérivée.
    pub width: Option<u16>,
    /// Hauteur demandée en caractères. `None` = dérivée.
    pub height: Option<u16>,
    /// Adapter la grille au terminal quand ni width ni height ne sont fixés.
    pub fit_term: bool,
    /// Rapport hauteur/largeur d'une cellule, 2.0 pour la plupart des polices.
    pub aspect_ratio: f32,

    // === Conversion ===
    /// Nom de preset (default, blocks, dots, dense, emoji) ou séquence custom.
    pub charset: String,
    /// Diffusion d'erreur Floyd–Steinberg sur la luminance.
    pub dither_enabled: bool,
    /// Luminance inversée, pour les terminaux à fond clair.
    pub invert: bool,
    /// Contraste [0.1, 3.0]. 1.0 = neutre.
    pub contrast: f32,
    /// Décalage de luminosité dans [-1.0, 1.0], 0.0 par défaut.
    pub brightness: f32,
    /// Couleur de fond pour composer l'alpha. `None` = alpha ignoré.
    pub background: Option<[u8; 3]>,

    // === Couleur ===
    /// Émettre les escapes 24 bits par cellule.
    pub color_enabled: bool,
    /// Transformation appliquée à la couleur de chaque cellule.
    pub color_mode: ColorMode,
    /// Saturation boost [0.0, 3.0]. 1.0 = neutre.
    pub saturation: f32,

    // === Animation ===
    /// Nombre de frames shimmer. 0 = rendu statique unique.
    pub animate: u32,
    /// Frames par seconde quand `animate > 0`.
    pub fps: f32,
    /// Amplitude du shimmer sur la luminance [0.0, 1.0].
    pub shimmer_amplitude: f32,
    /// Longueur d'onde diagonale du shimmer, en cellules.
    pub shimmer_wavelength: f32,
    /// Avance de phase par frame, en radians.
    pub shimmer_speed: f32,
}

/// Color mapping mode.
///
/// # Example
/// ```
/// use ra_core::config::ColorMode;
/// assert!(matches!(ColorMode::default(), ColorMode::Direct));
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub enum ColorMode {
    /// RGB direct du bloc source.
    #[default]
    Direct,
    /// Teinte et saturation gardées, V poussé à 1.0.
    HsvBright,
    /// Quantifié sur un cube 6×6×6.
    Quantized,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: None,
            height: None,
            fit_term: false,
            aspect_ratio: DEFAULT_CELL_ASPECT,
            charset: "default".to_string(),
            dither_enabled: false,
            invert: false,
            contrast: 1.0,
            brightness: 0.0,
            background: None,
            color_enabled: false,
            color_mode: ColorMode::Direct,
            saturation: 1.0,
            animate: 0,
            fps: 10.0,
            shimmer_amplitude: 0.2,
            shimmer_wavelength: 6.0,
            shimmer_speed: 0.3,
        }
    }
}

impl RenderConfig {
    /// Clamp soft numeric fields to their valid ranges.
    /// Run after every TOML load and CLI override.
    ///
    /// Hard errors (fps, zero-size grid, charset) are left to [`Self::validate`].
    pub fn clamp_all(&mut self) {
        self.contrast = self.contrast.clamp(0.1, 3.0);
        self.brightness = self.brightness.clamp(-1.0, 1.0);
        self.saturation = self.saturation.clamp(0.0, 3.0);
        self.shimmer_amplitude = self.shimmer_amplitude.clamp(0.0, 1.0);
        self.shimmer_wavelength = self.shimmer_wavelength.clamp(0.5, 1000.0);
        self.shimmer_speed = self.shimmer_speed.clamp(-10.0, 10.0);
    }

    /// Reject configurations the pipeline cannot honour.
    ///
    /// # Errors
    /// [`CoreError::Config`] for an invalid charset, a zero grid dimension,
    /// a non-positive aspect ratio or a non-positive fps while animating.
    pub fn validate(&self) -> Result<(), CoreError> {
        self.charset()?;
        self.animation_spec()?;
        if self.width == Some(0) || self.height == Some(0) {
            return Err(CoreError::Config(
                "width et height doivent être > 0".to_string(),
            ));
        }
        if !(self.aspect_ratio.is_finite() && self.aspect_ratio > 0.0) {
            return Err(CoreError::Config(format!(
                "aspect_ratio doit être > 0 (reçu {})",
                self.aspect_ratio
            )));
        }
        Ok(())
    }

    /// Active charset.
    ///
    /// # Errors
    /// See [`Charset::resolve`].
    pub fn charset(&self) -> Result<Charset, CoreError> {
        Charset::resolve(&self.charset)
    }

    /// Animation parameters.
    ///
    /// # Errors
    /// See [`AnimationSpec::new`].
    pub fn animation_spec(&self) -> Result<AnimationSpec, CoreError> {
        AnimationSpec::new(self.animate, self.fps)
    }

    /// Background as a tuple for the resampler.
    #[must_use]
    pub fn background_rgb(&self) -> Option<(u8, u8, u8)> {
        self.background.map(|[r, g, b]| (r, g, b))
    }
}

/// Document TOML brut, avant fusion avec les défauts.
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    render: Option<RenderSection>,
    animation: Option<AnimationSection>,
}

/// `[render]` table. Every key is optional.
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RenderSection {
    width: Option<u16>,
    height: Option<u16>,
    fit_term: Option<bool>,
    aspect_ratio: Option<f32>,
    charset: Option<String>,
    dither: Option<bool>,
    invert: Option<bool>,
    contrast: Option<f32>,
    brightness: Option<f32>,
    background: Option<[u8; 3]>,
    color: Option<bool>,
    color_mode: Option<ColorMode>,
    saturation: Option<f32>,
}

/// Animation section of the TOML config, all fields optional.
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct AnimationSection {
    frames: Option<u32>,
    fps: Option<f32>,
    shimmer_amplitude: Option<f32>,
    shimmer_wavelength: Option<f32>,
    shimmer_speed: Option<f32>,
}

/// Parse un document TOML et fusionne avec les valeurs par défaut.
///
/// # Errors
/// Returns an error if the document is not valid TOML for this schema.
///
/// # Example
/// ```
/// use ra_core::config::parse_config;
/// let config = parse_config("[render]\ncharset = \"blocks\"\n").unwrap();
/// assert_eq!(config.charset, "blocks");
/// ```
pub fn parse_config(content: &str) -> Result<RenderConfig> {
    let file: ConfigFile = toml::from_str(content).context("Erreur de parsing TOML")?;

    let mut config = RenderConfig::default();

    if let Some(r) = file.render {
        if r.width.is_some() {
            config.width = r.width;
        }
        if r.height.is_some() {
            config.height = r.height;
        }
        if let Some(v) = r.fit_term {
            config.fit_term = v;
        }
        if let Some(v) = r.aspect_ratio {
            config.aspect_ratio = v;
        }
        if let Some(v) = r.charset {
            config.charset = v;
        }
        if let Some(v) = r.dither {
            config.dither_enabled = v;
        }
        if let Some(v) = r.invert {
            config.invert = v;
        }
        if let Some(v) = r.contrast {
            config.contrast = v;
        }
        if let Some(v) = r.brightness {
            config.brightness = v;
        }
        if r.background.is_some() {
            config.background = r.background;
        }
        if let Some(v) = r.color {
            config.color_enabled = v;
        }
        if let Some(v) = r.color_mode {
            config.color_mode = v;
        }
        if let Some(v) = r.saturation {
            config.saturation = v;
        }
    }

    if let Some(a) = file.animation {
        if let Some(v) = a.frames {
            config.animate = v;
        }
        if let Some(v) = a.fps {
            config.fps = v;
        }
        if let Some(v) = a.shimmer_amplitude {
            config.shimmer_amplitude = v;
        }
        if let Some(v) = a.shimmer_wavelength {
            config.shimmer_wavelength = v;
        }
        if let Some(v) = a.shimmer_speed {
            config.shimmer_speed = v;
        }
    }

    config.clamp_all();
    Ok(config)
}

/// Lit un fichier TOML, les clés absentes gardent leur valeur par défaut.
///
/// # Errors
/// Returns an error if the file cannot be read or parsed.
///
/// # Example
/// ```no_run
/// use ra_core::config::load_config;
/// use std::path::Path;
/// let config = load_config(Path::new("reiscii.toml")).unwrap();
/// ```
pub fn load_config(path: &Path) -> Result<RenderConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Impossible de lire {}", path.display()))?;
    parse_config(&content).with_context(|| format!("Config invalide dans {}", path.display()))
}
