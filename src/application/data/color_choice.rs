use clap::ValueEnum;
use supports_color::Stream;

#[derive(Debug, Clone, Copy, ValueEnum, Default)]
pub enum ColorChoice {
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorChoice {
    pub fn apply(&self) {
        let enabled = match self {
            ColorChoice::Auto => supports_color::on(Stream::Stdout).is_some(),
            ColorChoice::Always => true,
            ColorChoice::Never => false,
        };
        colored::control::set_override(enabled);
    }
}
