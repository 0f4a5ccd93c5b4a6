use std::io::{self, BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use ca_core::config::{DitherConfig, load_config};
use ca_core::grid::CellGrid;
use ca_dither::engine::BitmapDither;
use ca_render::canvas::GridView;
use ca_render::export::{LineEnding, write_ansi, write_text};
use clap::Parser;
use ratatui::{TerminalOptions, Viewport};

pub mod cli;

use cli::{Cli, Format};

fn main() -> Result<()> {
    // 1. Parser CLI
    let cli = Cli::parse();

    // 2. Initialiser le logging
    env_logger::Builder::new()
        .filter_level(cli.log_level.parse().unwrap_or(log::LevelFilter::Warn))
        .init();

    if cli.list {
        print!("{}", cli::option_listing());
        return Ok(());
    }
    let Some(ref image_path) = cli.image else {
        anyhow::bail!("Aucune image spécifiée.");
    };

    // 3. Charger la config puis appliquer les overrides CLI
    let mut config = resolve_config(cli.config.as_deref())?;
    cli.apply_overrides(&mut config);
    log::info!(
        "tramage {} / couleurs {} / glyphes {}",
        config.algorithm.name(),
        config.color_mode.name(),
        config.charset.name()
    );

    // 4. Charger l'image
    let mut img = ca_source::load_image(image_path)?;
    img.bitmap.set_gamma(config.gamma);

    // 5. Taille de sortie (police 6×10 supposée)
    let (cols, lines) = cli.output_size(img.width(), img.height())?;
    log::info!(
        "{}x{} px → {cols}x{lines} cellules",
        img.width(),
        img.height()
    );

    // 6. Tramage
    let mut grid = CellGrid::new(cols, lines);
    let engine = BitmapDither::new(config);
    engine.draw_bitmap(
        &mut grid,
        0,
        0,
        i32::from(cols) - 1,
        i32::from(lines) - 1,
        &img.bitmap,
        &img.pixels,
    );

    // 7. Sortie
    match cli.format {
        Format::Ansi => write_stdout(|out| write_ansi(out, &grid, LineEnding::Lf)),
        Format::Utf8 => write_stdout(|out| write_text(out, &grid, LineEnding::Lf)),
        Format::Utf8cr => write_stdout(|out| write_text(out, &grid, LineEnding::CrLf)),
        Format::Tui => show_inline(&grid, lines),
    }
}

/// Resolve config: --config if given and present, defaults otherwise.
fn resolve_config(path: Option<&Path>) -> Result<DitherConfig> {
    match path {
        Some(path) if path.exists() => load_config(path),
        Some(path) => {
            log::warn!(
                "Config introuvable : {}. Utilisation des défauts.",
                path.display()
            );
            Ok(DitherConfig::default())
        }
        None => Ok(DitherConfig::default()),
    }
}

fn write_stdout<F>(write: F) -> Result<()>
where
    F: FnOnce(&mut BufWriter<io::StdoutLock<'static>>) -> io::Result<()>,
{
    let mut out = BufWriter::new(io::stdout().lock());
    write(&mut out).context("Écriture sur la sortie standard impossible")?;
    out.flush().context("Écriture sur la sortie standard impossible")
}

/// Draw the grid once in an inline viewport below the prompt.
fn show_inline(grid: &CellGrid, lines: u16) -> Result<()> {
    let mut terminal = ratatui::try_init_with_options(TerminalOptions {
        viewport: Viewport::Inline(lines),
    })
    .context("Initialisation du terminal impossible")?;

    let result = terminal
        .draw(|frame| frame.render_widget(GridView::new(grid), frame.area()))
        .map(|_| ())
        .context("Rendu du terminal impossible");

    // Restaurer le terminal (TOUJOURS, même en cas d'erreur)
    ratatui::restore();
    println!();
    result
}
