use crate::cli::Cli;

#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub input: Vec<String>,
    pub delimiter: String,
    pub render: Option<String>,
    pub components: bool,
}

impl From<Cli> for RuntimeConfig {
    fn from(cli: Cli) -> Self {
        Self {
            input: cli.input,
            delimiter: cli.delimiter,
            render: cli.render,
            components: cli.components,
        }
    }
}
