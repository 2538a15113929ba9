use std::path::PathBuf;

use clap::Parser;
use ra_core::config::{ColorMode, RenderConfig};

/// reiscii : image vers art ASCII truecolor, avec shimmer animé.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Image source (PNG, JPEG, BMP).
    pub image: PathBuf,

    /// Fichier de configuration TOML. Défaut : reiscii.toml s'il existe.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Largeur de sortie en caractères.
    #[arg(short, long)]
    pub width: Option<u16>,

    /// Hauteur de sortie en caractères.
    #[arg(long)]
    pub height: Option<u16>,

    /// Adapter la grille à la taille du terminal.
    #[arg(long, default_value_t = false)]
    pub fit_term: bool,

    /// Charset : default, blocks, dots, dense, emoji, ou une séquence custom.
    #[arg(long)]
    pub charset: Option<String>,

    /// Activer la couleur truecolor.
    #[arg(long, default_value_t = false, conflicts_with = "no_color")]
    pub color: bool,

    /// Désactiver la couleur.
    #[arg(long, default_value_t = false)]
    pub no_color: bool,

    /// Mode couleur : direct, hsv, quantized.
    #[arg(long)]
    pub color_mode: Option<String>,

    /// Tramage Floyd–Steinberg sur la luminance.
    #[arg(long, default_value_t = false)]
    pub dither: bool,

    /// Inverser la luminance (fond clair).
    #[arg(long, default_value_t = false)]
    pub invert: bool,

    /// Nombre de frames shimmer. 0 = rendu statique.
    #[arg(long)]
    pub animate: Option<u32>,

    /// Frames par seconde de l'animation.
    #[arg(long)]
    pub fps: Option<f32>,

    /// Niveau de log : error, warn, info, debug, trace.
    #[arg(long, default_value = "warn")]
    pub log_level: String,
}

impl Cli {
    /// Apply command-line overrides on top of a loaded config.
    ///
    /// Boolean flags only ever switch a feature on; `--no-color` is the one
    /// way to switch color off.
    pub fn apply_overrides(&self, config: &mut RenderConfig) {
        if let Some(w) = self.width {
            config.width = Some(w);
        }
        if let Some(h) = self.height {
            config.height = Some(h);
        }
        if self.fit_term {
            config.fit_term = true;
        }
        if let Some(ref charset) = self.charset {
            config.charset.clone_from(charset);
        }
        if self.color {
            config.color_enabled = true;
        }
        if self.no_color {
            config.color_enabled = false;
        }
        if let Some(ref mode) = self.color_mode {
            config.color_mode = match mode.as_str() {
                "direct" => ColorMode::Direct,
                "hsv" | "hsv-bright" => ColorMode::HsvBright,
                "quantized" => ColorMode::Quantized,
                _ => {
                    log::warn!("Mode couleur inconnu '{mode}', utilisation du défaut.");
                    config.color_mode
                }
            };
        }
        if self.dither {
            config.dither_enabled = true;
        }
        if self.invert {
            config.invert = true;
        }
        if let Some(frames) = self.animate {
            config.animate = frames;
        }
        if let Some(fps) = self.fps {
            config.fps = fps;
        }
    }
}
