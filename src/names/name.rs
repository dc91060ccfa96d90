use std::fmt;
use std::hash::Hasher;

use metrohash::MetroHash64;
use snafu::ensure;
use tracing::trace;

use crate::contract::{IllegalArgumentSnafu, InvalidStateSnafu, Result};
use crate::names::escape;

pub const DEFAULT_DELIMITER: char = '.';

/// Validates a textual delimiter, which must be exactly one character.
pub fn parse_delimiter(text: &str) -> Result<char> {
    let mut chars = text.chars();
    match (chars.next(), chars.next()) {
        (Some(delimiter), None) => Ok(delimiter),
        _ => IllegalArgumentSnafu {
            message: format!("delimiter {text:?} must be exactly one character"),
        }
        .fail(),
    }
}

/// The contract shared by every name representation.
///
/// Components are stored escaped for the name's delimiter. The mutators work
/// in place on a single owner; the `*ed`/`with_*` derivations leave the
/// receiver untouched and return a fresh name instead.
pub trait Name: fmt::Debug {
    fn delimiter(&self) -> char;

    fn no_components(&self) -> usize;

    fn component(&self, i: usize) -> Result<String>;

    /// All components in order, still escaped.
    fn components(&self) -> Vec<String>;

    fn set_component(&mut self, i: usize, c: &str) -> Result<()>;

    fn insert(&mut self, i: usize, c: &str) -> Result<()>;

    fn append(&mut self, c: &str) -> Result<()>;

    fn remove(&mut self, i: usize) -> Result<()>;

    fn is_empty(&self) -> bool {
        self.no_components() == 0
    }

    fn as_string(&self) -> String {
        self.as_string_with(self.delimiter())
    }

    /// Renders the logical components joined by `delimiter`.
    ///
    /// Escape markers are stripped, so the result does not generally parse
    /// back into the same name.
    fn as_string_with(&self, delimiter: char) -> String {
        let own = self.delimiter();
        self.components()
            .iter()
            .map(|c| escape::unescape(c, own))
            .collect::<Vec<_>>()
            .join(delimiter.to_string().as_str())
    }

    /// The canonical serialization: parsing it with the same delimiter
    /// reconstructs the same components.
    fn as_data_string(&self) -> String {
        let delimiter = self.delimiter();
        self.components()
            .iter()
            .map(|c| escape::canonicalize(c, delimiter))
            .collect::<Vec<_>>()
            .join(delimiter.to_string().as_str())
    }

    fn hash_code(&self) -> u64 {
        let mut hasher = MetroHash64::default();
        hasher.write(self.as_data_string().as_bytes());
        hasher.finish()
    }

    /// Names are equal when their data strings are. The hash code only
    /// short-circuits the common unequal case.
    fn is_equal(&self, other: &dyn Name) -> bool {
        self.hash_code() == other.hash_code() && self.as_data_string() == other.as_data_string()
    }

    /// Appends every component of `other`, re-escaped for this name's
    /// delimiter. Nothing is appended unless all components fit.
    fn concat(&mut self, other: &dyn Name) -> Result<()> {
        let (from, to) = (other.delimiter(), self.delimiter());
        let incoming = other
            .components()
            .iter()
            .map(|c| escape::reescape(c, from, to))
            .collect::<Vec<_>>();

        for c in &incoming {
            ensure!(
                escape::is_escaped(c, to),
                IllegalArgumentSnafu {
                    message: format!("component {c:?} cannot be represented with delimiter {to:?}"),
                }
            );
        }

        let expected = self.no_components() + other.no_components();
        for c in &incoming {
            self.append(c)?;
        }
        trace!("Concatenated {} components", incoming.len());

        ensure!(
            self.no_components() == expected,
            InvalidStateSnafu {
                message: format!(
                    "concat produced {} components, expected {expected}",
                    self.no_components()
                ),
            }
        );
        Ok(())
    }

    fn with_component(&self, i: usize, c: &str) -> Result<Self>
    where
        Self: Sized + Clone,
    {
        let mut derived = self.clone();
        derived.set_component(i, c)?;
        Ok(derived)
    }

    fn inserted(&self, i: usize, c: &str) -> Result<Self>
    where
        Self: Sized + Clone,
    {
        let mut derived = self.clone();
        derived.insert(i, c)?;
        Ok(derived)
    }

    fn appended(&self, c: &str) -> Result<Self>
    where
        Self: Sized + Clone,
    {
        let mut derived = self.clone();
        derived.append(c)?;
        Ok(derived)
    }

    fn removed(&self, i: usize) -> Result<Self>
    where
        Self: Sized + Clone,
    {
        let mut derived = self.clone();
        derived.remove(i)?;
        Ok(derived)
    }

    fn concatenated(&self, other: &dyn Name) -> Result<Self>
    where
        Self: Sized + Clone,
    {
        let mut derived = self.clone();
        derived.concat(other)?;
        Ok(derived)
    }
}

/// Shared precondition checks for the representations.
pub(crate) fn check_index(i: usize, bound: usize) -> Result<()> {
    ensure!(
        i < bound,
        IllegalArgumentSnafu {
            message: format!("index {i} out of range 0..{bound}"),
        }
    );
    Ok(())
}

pub(crate) fn check_insert_index(i: usize, count: usize) -> Result<()> {
    ensure!(
        i <= count,
        IllegalArgumentSnafu {
            message: format!("insert index {i} out of range 0..={count}"),
        }
    );
    Ok(())
}

pub(crate) fn check_escaped(c: &str, delimiter: char) -> Result<()> {
    ensure!(
        escape::is_escaped(c, delimiter),
        IllegalArgumentSnafu {
            message: format!("component {c:?} is not escaped for delimiter {delimiter:?}"),
        }
    );
    Ok(())
}
