//! serp-view - Entry Point

use clap::Parser;
use serp_view::integration::SearchView;
use serp_view::model::{AppError, FixedScreen, ScreenSizeCategory};
use serp_view::runner::{PreviewLog, ScriptRunner, TitleLog};
use serp_view::source::{results_channel, ScriptReader};
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::PathBuf;
use tracing::info;

/// serp-view - drive a search results view from an NDJSON script
#[derive(Parser, Debug)]
#[command(name = "serp-view")]
#[command(version)]
#[command(about = "Responsive view-state coordinator for a search results page")]
pub struct Args {
    /// Path to NDJSON command script (reads from stdin if not provided)
    pub script: Option<PathBuf>,

    /// Initial screen size category
    #[arg(long, value_parser = ["xs", "sm", "md", "lg", "xl"])]
    pub screen: Option<String>,

    /// Path to server app-data JSON
    #[arg(long)]
    pub app_data: Option<PathBuf>,

    /// Path to configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Args {
    /// Parsed `--screen` value.
    fn screen_override(&self) -> Option<ScreenSizeCategory> {
        // value_parser restricts the accepted strings
        self.screen.as_deref().and_then(|s| s.parse().ok())
    }
}

fn main() -> Result<(), AppError> {
    let args = Args::parse();

    // Defaults → Config File → Env Vars → CLI Args
    let config = {
        let config_file = serp_view::config::load_config_with_precedence(args.config.clone())?;
        let merged = serp_view::config::merge_config(config_file);
        let with_env = serp_view::config::apply_env_overrides(merged);
        serp_view::config::apply_cli_overrides(
            with_env,
            args.screen_override(),
            args.app_data.clone(),
        )
    };

    serp_view::logging::init(&config.log_file_path)?;

    info!(config = ?config, "Configuration loaded and resolved");

    let app_data = config
        .app_data_path
        .as_ref()
        .map(serp_view::config::load_app_data)
        .transpose()?;

    let input: Box<dyn BufRead> = match &args.script {
        Some(path) => Box::new(BufReader::new(File::open(path)?)),
        None => Box::new(std::io::stdin().lock()),
    };

    let screen = FixedScreen::new(config.initial_screen);
    let (publisher, subscription) = results_channel();
    let view = SearchView::new(
        &screen,
        subscription,
        app_data,
        TitleLog::default(),
        PreviewLog::default(),
    );
    let mut runner = ScriptRunner::new(view, &screen, publisher);

    let mut reader = ScriptReader::new(input);
    let mut out = BufWriter::new(std::io::stdout().lock());
    runner.run(&mut reader, &mut out)?;
    out.flush()?;

    Ok(())
}
