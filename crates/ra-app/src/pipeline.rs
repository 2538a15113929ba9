use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use ra_ascii::animation::FrameGenerator;
use ra_ascii::compositor::Compositor;
use ra_ascii::shimmer::Shimmer;
use ra_core::config::{RenderConfig, load_config};
use ra_core::frame::FrameBuffer;
use ra_core::sizing::resolve_grid_size;

/// Fichier de config lu quand `--config` n'est pas donné.
pub const DEFAULT_CONFIG_PATH: &str = "reiscii.toml";

/// Load the render config.
///
/// An explicit path must exist. Without one, [`DEFAULT_CONFIG_PATH`] is used
/// when present, defaults otherwise.
///
/// # Errors
/// Returns an error if the config file cannot be read or parsed.
pub fn resolve_config(explicit: Option<&Path>) -> Result<RenderConfig> {
    if let Some(path) = explicit {
        return load_config(path);
    }
    let path = PathBuf::from(DEFAULT_CONFIG_PATH);
    if path.exists() {
        load_config(&path)
    } else {
        log::info!("Pas de {DEFAULT_CONFIG_PATH}, utilisation des défauts.");
        Ok(RenderConfig::default())
    }
}

/// Taille du terminal utilisable pour la grille, une ligne laissée au prompt.
#[must_use]
pub fn terminal_size() -> Option<(u16, u16)> {
    match crossterm::terminal::size() {
        Ok((cols, rows)) => Some((cols, rows.saturating_sub(1).max(1))),
        Err(e) => {
            log::warn!("Taille du terminal indisponible ({e}), largeur par défaut.");
            None
        }
    }
}

/// Build the frame generator for one render pass.
///
/// Sizes the grid, samples the image once, and wraps the result with the
/// configured shimmer and animation spec. `terminal` is only consulted when
/// `fit_term` is set and neither dimension is fixed.
///
/// # Errors
/// Returns an error for an invalid config or an unusable image.
pub fn build_generator(
    config: &RenderConfig,
    frame: &FrameBuffer,
    terminal: Option<(u16, u16)>,
) -> Result<FrameGenerator> {
    config.validate().context("Configuration rejetée")?;
    let terminal = if config.fit_term { terminal } else { None };
    let (width, height) = resolve_grid_size(
        frame.width(),
        frame.height(),
        config.width,
        config.height,
        terminal,
        config.aspect_ratio,
    )?;
    log::info!(
        "Grille {width}×{height}, charset '{}', dither {}, couleur {}",
        config.charset,
        config.dither_enabled,
        config.color_enabled
    );

    let compositor = Compositor::from_config(config)?;
    let base = Arc::new(compositor.sample(frame, width, height)?);
    let spec = config.animation_spec()?;
    Ok(FrameGenerator::new(
        compositor,
        base,
        spec,
        Shimmer::from_config(config),
    ))
}
