use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use gpui::{App, Application, SharedString};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use canvas_chess::ui::FileAssets;
use canvas_chess::{BoardConfig, ChessBoard, Mode, app};

/// Interactive chessboard with drag-and-drop moves and a setup editor.
#[derive(Parser, Debug)]
#[command(name = "canvas-chess", version)]
struct Args {
    /// JSON board configuration
    #[arg(long)]
    config: Option<PathBuf>,

    /// Initial position, overrides the config
    #[arg(long)]
    fen: Option<String>,

    /// `play` or `setup`, overrides the config
    #[arg(long)]
    mode: Option<Mode>,

    /// Start with black at the bottom
    #[arg(long)]
    flip: bool,

    /// Piece sprite sheet (PNG, 2 rows x 6 columns of 55 px cells)
    #[arg(long)]
    pieces: Option<String>,
}

fn load_config(args: &Args) -> anyhow::Result<BoardConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let json = fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            BoardConfig::from_json_str(&json)
                .with_context(|| format!("invalid config {}", path.display()))?
        }
        None => BoardConfig::default(),
    };
    if let Some(fen) = &args.fen {
        config.fen = fen.clone();
    }
    if let Some(mode) = args.mode {
        config.mode = mode;
    }
    Ok(config)
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    let config = load_config(&args)?;
    let title = SharedString::from(
        config
            .container
            .clone()
            .unwrap_or_else(|| "Canvas Chess".to_string()),
    );

    let mut board = ChessBoard::new(config).context("failed to create board")?;
    if args.flip {
        board.flip();
    }

    let assets = FileAssets::new();
    if let Some(path) = &args.pieces {
        let sheet = assets
            .sprite_sheet(path)
            .with_context(|| format!("failed to load sprite sheet {path}"))?;
        board.set_sprite_sheet(sheet);
    }
    info!(fen = %board.fen(), mode = %board.mode(), "starting");

    Application::new().with_assets(assets).run(move |cx: &mut App| {
        if let Err(err) = app::run(cx, board, title) {
            error!("{err:#}");
            cx.quit();
        }
    });
    Ok(())
}
