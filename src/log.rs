use std::{
    path::{Path, PathBuf},
    str::FromStr,
};
use tracing::level_filters::LevelFilter;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

#[derive(Default, Copy, Clone, Debug)]
pub enum LogFormat {
    #[default]
    Plain,
    Json,
}

impl FromStr for LogFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(LogFormat::Json),
            "plain" => Ok(LogFormat::Plain),
            _ => Err(anyhow::anyhow!("Unknown log format")),
        }
    }
}

#[derive(Default, Clone, Debug)]
pub enum LogOutput {
    StdOut,
    #[default]
    StdErr,
    File(PathBuf),
}

impl FromStr for LogOutput {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "stdout" => Ok(Self::StdOut),
            "stderr" => Ok(Self::StdErr),
            _ => Ok(Self::File(PathBuf::from(s.trim()))),
        }
    }
}

/// Installs the global subscriber. `RUST_LOG` overrides the default `info`
/// level. The returned guard must outlive all logging.
pub fn config_tracing(fmt: LogFormat, log_to: &LogOutput) -> anyhow::Result<WorkerGuard> {
    let (writer, guard) = match log_to {
        LogOutput::StdOut => tracing_appender::non_blocking(std::io::stdout()),
        LogOutput::StdErr => tracing_appender::non_blocking(std::io::stderr()),
        LogOutput::File(path) => {
            let directory = path
                .parent()
                .filter(|dir| !dir.as_os_str().is_empty())
                .unwrap_or_else(|| Path::new("."));
            let file_name = path
                .file_name()
                .ok_or_else(|| anyhow::anyhow!("log path `{}` has no file name", path.display()))?;
            tracing_appender::non_blocking(tracing_appender::rolling::never(directory, file_name))
        }
    };

    let mut layers: Vec<Box<dyn Layer<_> + Send + Sync>> = vec![];
    match fmt {
        LogFormat::Plain => layers.push(
            tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(matches!(log_to, LogOutput::StdOut | LogOutput::StdErr))
                .boxed(),
        ),
        LogFormat::Json => layers.push(
            tracing_subscriber::fmt::layer()
                .json()
                .with_writer(writer)
                .boxed(),
        ),
    }

    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy();

    tracing_subscriber::registry()
        .with(filter)
        .with(layers)
        .try_init()?;

    Ok(guard)
}
