use colored::Colorize;
use hiername::contract::Error as ContractError;
use hiername::names::{ComponentListName, Name, StringName, parse_delimiter};
use snafu::prelude::*;
use tracing::debug;

use crate::application::RuntimeConfig;

pub struct Application;

impl Application {
    pub fn run(app_config: impl Into<RuntimeConfig>) -> Result<(), ApplicationError> {
        let app_config: RuntimeConfig = app_config.into();
        print!("{}", Self::inspect(&app_config)?);
        Ok(())
    }

    /// Builds the name described by the config and renders the report.
    pub fn inspect(app_config: &RuntimeConfig) -> Result<String, ApplicationError> {
        let delimiter = parse_delimiter(&app_config.delimiter).context(DelimiterSnafu {
            delimiter: app_config.delimiter.clone(),
        })?;
        let render = app_config
            .render
            .as_deref()
            .map(parse_delimiter)
            .transpose()
            .context(DelimiterSnafu {
                delimiter: app_config.render.clone().unwrap_or_default(),
            })?;

        let name: Box<dyn Name> = if app_config.components {
            let mut name = ComponentListName::empty(delimiter);
            for component in &app_config.input {
                name.append(component).context(NameSnafu)?;
            }
            Box::new(name)
        } else {
            let [text] = app_config.input.as_slice() else {
                return TooManyInputsSnafu {
                    count: app_config.input.len(),
                }
                .fail();
            };
            Box::new(StringName::with_delimiter(text.as_str(), delimiter).context(NameSnafu)?)
        };
        debug!("Inspecting {:?}", name);

        Ok(Self::report(name.as_ref(), render))
    }

    fn report(name: &dyn Name, render: Option<char>) -> String {
        let display = render.map_or_else(|| name.as_string(), |d| name.as_string_with(d));

        let mut lines = vec![format!("{} {}", "components:".bold(), name.no_components())];
        lines.extend(
            name.components()
                .iter()
                .enumerate()
                .map(|(i, component)| format!("  {} {}", format!("[{i}]").cyan(), component)),
        );
        lines.push(format!("{} {}", "data:".bold(), name.as_data_string()));
        lines.push(format!("{} {}", "display:".bold(), display));
        lines.push(format!("{} {:016x}", "hash:".bold(), name.hash_code()));

        lines.iter().map(|line| format!("{line}\n")).collect()
    }
}

#[derive(Debug, Snafu)]
pub enum ApplicationError {
    #[snafu(display("Invalid delimiter '{}'", delimiter))]
    DelimiterError {
        delimiter: String,
        source: ContractError,
    },
    #[snafu(display("Expected exactly one text to parse, got {}", count))]
    TooManyInputsError { count: usize },
    #[snafu(display("Failed to build the name"))]
    NameError { source: ContractError },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(input: &[&str], delimiter: &str) -> RuntimeConfig {
        RuntimeConfig {
            input: input.iter().map(|s| s.to_string()).collect(),
            delimiter: delimiter.to_string(),
            render: None,
            components: false,
        }
    }

    #[test]
    fn inspect_lists_components_of_text() {
        colored::control::set_override(false);
        let report = Application::inspect(&config(&[r"my\/name/other\/name"], "/")).unwrap();
        assert!(report.contains("components: 2"));
        assert!(report.contains(r"[0] my\/name"));
        assert!(report.contains(r"data: my\/name/other\/name"));
        assert!(report.contains("display: my/name/other/name"));
    }

    #[test]
    fn inspect_renders_with_alternative_delimiter() {
        colored::control::set_override(false);
        let mut app_config = config(&["oss", "cs", "fau"], ".");
        app_config.components = true;
        app_config.render = Some("+".to_string());
        let report = Application::inspect(&app_config).unwrap();
        assert!(report.contains("components: 3"));
        assert!(report.contains("display: oss+cs+fau"));
    }

    #[test]
    fn report_ends_every_line() {
        colored::control::set_override(false);
        let name = StringName::new("a.b").unwrap();
        let report = Application::report(&name, None);
        assert_eq!(report.lines().count(), 6);
        assert!(report.ends_with('\n'));
        assert!(report.starts_with("components: 2\n  [0] a\n  [1] b\n"));
    }

    #[test]
    fn inspect_rejects_long_delimiters() {
        let result = Application::inspect(&config(&["oss.fau.de"], "..."));
        assert!(matches!(result, Err(ApplicationError::DelimiterError { .. })));
    }

    #[test]
    fn inspect_rejects_several_texts() {
        let result = Application::inspect(&config(&["a", "b"], "."));
        assert!(matches!(
            result,
            Err(ApplicationError::TooManyInputsError { count: 2 })
        ));
    }

    #[test]
    fn inspect_reports_unescaped_components() {
        let mut app_config = config(&["a.b"], ".");
        app_config.components = true;
        let result = Application::inspect(&app_config);
        assert!(matches!(result, Err(ApplicationError::NameError { .. })));
    }
}
