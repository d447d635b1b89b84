use clap::{Parser, ValueEnum};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Sets the level of logging; `RUST_LOG` takes precedence
    #[arg(long, value_enum, default_value_t = TraceLevel::Info)]
    pub trace: TraceLevel,

    /// Overrides the data provider's base URL (and `STOCKLENS_BASE_URL`)
    #[arg(long)]
    pub base_url: Option<String>,
}

#[derive(ValueEnum, Copy, Clone, Debug, PartialEq, Eq)]
pub enum TraceLevel {
    Debug,
    Info,
    Warn,
    Error,
}

impl From<TraceLevel> for log::LevelFilter {
    fn from(level: TraceLevel) -> Self {
        match level {
            TraceLevel::Debug => log::LevelFilter::Debug,
            TraceLevel::Info => log::LevelFilter::Info,
            TraceLevel::Warn => log::LevelFilter::Warn,
            TraceLevel::Error => log::LevelFilter::Error,
        }
    }
}
