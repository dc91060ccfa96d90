use clap::ValueEnum;
use tracing::Level;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum LogLevel {
    /// Includes tokenizer output for every derived name
    Trace,
    Debug,
    Info,
    #[default]
    Warn,
    Error,
    Silent,
}

impl LogLevel {
    pub fn to_tracing_level(self) -> Option<Level> {
        match self {
            LogLevel::Trace => Some(Level::TRACE),
            LogLevel::Debug => Some(Level::DEBUG),
            LogLevel::Info => Some(Level::INFO),
            LogLevel::Warn => Some(Level::WARN),
            LogLevel::Error => Some(Level::ERROR),
            LogLevel::Silent => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(LogLevel::Trace, Some(Level::TRACE))]
    #[case(LogLevel::Warn, Some(Level::WARN))]
    #[case(LogLevel::Silent, None)]
    fn maps_to_tracing_levels(#[case] level: LogLevel, #[case] expected: Option<Level>) {
        assert_eq!(level.to_tracing_level(), expected);
    }

    #[test]
    fn defaults_to_warn() {
        assert_eq!(LogLevel::default(), LogLevel::Warn);
    }
}
