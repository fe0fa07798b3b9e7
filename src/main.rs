// std
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};
// crates
use clap::Parser;
use crossbeam::channel;
use rand::SeedableRng;
use rand_chacha::ChaCha12Rng;
// internal
use omikuji::runner::{run_interactive, run_trials, spawn_stdin_reader};
use omikuji::settings::{load_json_from_file, Settings};

mod log;

/// Draw an omikuji fortune.
/// Pipes together the cli arguments with the execution
#[derive(Parser)]
pub struct OmikujiApp {
    /// Json file path, on `Settings` format
    #[clap(long, short)]
    input_settings: Option<PathBuf>,
    /// Run this many draw/reset cycles in simulated time and report the counts
    #[clap(long)]
    trials: Option<usize>,
    #[clap(long, default_value = "plain")]
    log_format: log::LogFormat,
    #[clap(long, default_value = "stderr")]
    log_to: log::LogOutput,
}

impl OmikujiApp {
    pub fn run(self) -> anyhow::Result<()> {
        let Self {
            input_settings,
            trials,
            log_format: _,
            log_to: _,
        } = self;
        let settings: Settings = match input_settings {
            Some(path) => load_json_from_file(&path)?,
            None => Settings::default(),
        };
        tracing::info!("Settings: {}", serde_json::to_string(&settings)?);

        let seed = settings.seed.unwrap_or_else(|| {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|elapsed| elapsed.as_secs())
                .unwrap_or_default()
        });
        tracing::info!(seed, "seeding draws");
        let rng = ChaCha12Rng::seed_from_u64(seed);

        match trials {
            Some(trials) => {
                let summary = run_trials(settings.controller, rng, trials)?;
                let missing: Vec<_> = summary.missing().collect();
                if !missing.is_empty() {
                    tracing::warn!("never drawn over {trials} trials: {}", missing.join(", "));
                }
                let summary = serde_json::to_string(&summary)?;
                tracing::info!("TrialSummary: {summary}");
                println!("{summary}");
            }
            None => {
                let (stop_tx, stop_rx) = channel::bounded(1);
                ctrlc::set_handler(move || {
                    let _ = stop_tx.try_send(());
                })?;
                let commands = spawn_stdin_reader();
                let mut stdout = std::io::stdout();
                run_interactive(&settings, rng, commands, stop_rx, &mut stdout)?;
            }
        }
        Ok(())
    }
}

fn main() -> anyhow::Result<()> {
    let app: OmikujiApp = OmikujiApp::parse();
    let guard = log::config_tracing(app.log_format, &app.log_to)?;

    if let Err(e) = app.run() {
        tracing::error!("error: {}", e);
        drop(guard);
        std::process::exit(1);
    }
    Ok(())
}
