use std::io::{BufWriter, Write};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use anyhow::Result;
use clap::Parser;
use ra_render::ansi::AnsiEncoder;

pub mod cli;
pub mod pipeline;

fn main() -> Result<()> {
    // 1. Parser CLI
    let cli = cli::Cli::parse();

    // 2. Initialiser le logging
    env_logger::Builder::new()
        .filter_level(cli.log_level.parse().unwrap_or(log::LevelFilter::Warn))
        .init();

    // 3. Charger la config puis appliquer les overrides CLI
    let mut config = pipeline::resolve_config(cli.config.as_deref())?;
    cli.apply_overrides(&mut config);
    config.clamp_all();
    config.validate()?;

    // 4. Décoder l'image
    let frame = ra_source::image::load_image(&cli.image)?;

    // 5. Construire le générateur (échantillonnage unique)
    let terminal = if config.fit_term {
        pipeline::terminal_size()
    } else {
        None
    };
    let mut generator = pipeline::build_generator(&config, &frame, terminal)?;

    // 6. Ctrl+C : arrêt propre entre deux frames
    let cancel = Arc::new(AtomicBool::new(false));
    {
        let cancel = Arc::clone(&cancel);
        if let Err(e) = ctrlc::set_handler(move || cancel.store(true, Ordering::Relaxed)) {
            log::warn!("Handler Ctrl+C non installé : {e}");
        }
    }

    // 7. Lecture
    let encoder = AnsiEncoder::new(generator.compositor().color().enabled);
    let stdout = std::io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    let report = ra_render::player::play(&mut generator, &mut out, &encoder, &cancel)?;
    out.flush()?;

    if report.cancelled {
        // Ligne propre pour le prompt après l'interruption.
        writeln!(out)?;
        out.flush()?;
    }
    log::info!("{} frame(s) rendue(s)", report.frames_emitted);
    Ok(())
}
