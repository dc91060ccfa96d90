use clap::Parser;

use crate::application::data::{ColorChoice, LogLevel};

/// Inspect how a hierarchical name is tokenized and serialized.
#[derive(Parser, Debug, Clone)]
#[command(version)]
pub struct Cli {
    /// The delimited text of the name, or its components with --components
    #[arg(required = true)]
    pub input: Vec<String>,

    /// Delimiter separating the components
    #[clap(long, short, default_value = ".")]
    pub delimiter: String,

    /// Render the display string with this delimiter instead
    #[clap(long, short)]
    pub render: Option<String>,

    /// Treat every input argument as one already escaped component
    #[clap(long, short)]
    pub components: bool,

    #[clap(long, short, default_value = "warn", value_enum)]
    pub log_level: LogLevel,

    #[clap(long, default_value = "auto", value_enum)]
    pub color: ColorChoice,
}
