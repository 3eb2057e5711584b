//! resonate - terminal meditation with emotion-keyed healing tones
//!
//! Run with: cargo run -- --log-file resonate.log

mod app;
mod ui;

use std::{fs::File, path::PathBuf, sync::Mutex};

use clap::Parser;
use color_eyre::eyre::{Result as EyreResult, WrapErr};
use tracing_subscriber::EnvFilter;

use app::App;
use resonate::{
    config::{DEFAULT_COUNTDOWN_SECS, DEFAULT_PHASE_INTERVAL_MS, DEFAULT_VOLUME},
    tone::{OfflineBackend, ToneEngine},
    wave::{canvas::PIXEL_RATIO_RANGE, WavePattern},
    EngineConfig,
};

#[derive(Parser, Debug)]
#[command(name = "resonate")]
#[command(about = "Sit with an emotion: a healing tone and a halftone wave")]
struct Args {
    /// Initial countdown in seconds
    #[arg(long, default_value_t = DEFAULT_COUNTDOWN_SECS)]
    duration: u32,

    /// Tone volume, 0.0 to 1.0
    #[arg(long, default_value_t = DEFAULT_VOLUME)]
    volume: f32,

    /// Start with tones muted
    #[arg(long)]
    muted: bool,

    /// Wave pattern: sine or fractal
    #[arg(long, default_value = "sine")]
    pattern: WavePattern,

    #[arg(long, default_value_t = DEFAULT_PHASE_INTERVAL_MS)]
    phase_interval_ms: u64,

    /// Terminal pixels per logical wave pixel
    #[arg(long, default_value_t = 0.25, value_parser = parse_pixel_ratio)]
    pixel_ratio: f32,

    /// Never open an audio device
    #[arg(long)]
    no_audio: bool,

    #[arg(long, default_value = "info")]
    log_level: String,

    /// Write logs here; the terminal belongs to the UI
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn parse_pixel_ratio(s: &str) -> Result<f32, String> {
    let ratio: f32 = s.parse().map_err(|_| format!("'{s}' is not a number"))?;
    if !PIXEL_RATIO_RANGE.contains(&ratio) {
        return Err(format!(
            "{ratio} is outside {}..={}",
            PIXEL_RATIO_RANGE.start(),
            PIXEL_RATIO_RANGE.end()
        ));
    }
    Ok(ratio)
}

impl Args {
    fn engine_config(&self) -> EngineConfig {
        let mut config = EngineConfig::default();
        config.tone.volume = self.volume;
        config.wave.pattern = self.pattern;
        config.session.countdown_secs = self.duration;
        config.session.phase_interval_ms = self.phase_interval_ms;
        config
    }
}

fn main() -> EyreResult<()> {
    color_eyre::install()?;
    let args = Args::parse();
    init_tracing(&args)?;

    let config = args.engine_config();
    config.validate().wrap_err("invalid configuration")?;

    let tone = if args.no_audio {
        ToneEngine::new(Box::new(OfflineBackend::unavailable()), config.tone.clone())
    } else {
        ToneEngine::with_default_output(config.tone.clone())
    }
    .muted(args.muted);

    tracing::info!(
        volume = config.tone.volume,
        pattern = ?config.wave.pattern,
        duration = config.session.countdown_secs,
        "starting"
    );

    let mut app = App::new(config, tone, args.pixel_ratio);
    let mut terminal = ratatui::init();
    let result = app.run(&mut terminal);
    ratatui::restore();
    result
}

fn init_tracing(args: &Args) -> EyreResult<()> {
    let Some(path) = &args.log_file else {
        return Ok(());
    };

    let level = &args.log_level;
    let filter = EnvFilter::builder()
        .with_default_directive(
            level
                .parse()
                .wrap_err_with(|| format!("invalid --log-level: {level}"))?,
        )
        .from_env_lossy();
    let file = File::create(path)
        .wrap_err_with(|| format!("failed to create log file {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}
