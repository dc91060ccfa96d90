use std::fmt;
use std::hash::{Hash, Hasher};

use crate::contract::Result;
use crate::names::name::{check_escaped, check_index, check_insert_index};
use crate::names::{DEFAULT_DELIMITER, Name, escape};

/// A name backed by an explicit list of components.
///
/// The constructors keep components that are already escaped and escape any
/// bare delimiter, so stored components always parse back as one component.
/// [`ComponentListName::from_logical`] escapes raw values instead.
#[derive(Debug, Clone)]
pub struct ComponentListName {
    delimiter: char,
    components: Vec<String>,
}

impl ComponentListName {
    pub fn new<I, S>(components: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::with_delimiter(components, DEFAULT_DELIMITER)
    }

    pub fn with_delimiter<I, S>(components: I, delimiter: char) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            delimiter,
            components: components
                .into_iter()
                .map(|c| {
                    let c: String = c.into();
                    escape::canonicalize(&c, delimiter)
                })
                .collect(),
        }
    }

    /// A name without components.
    pub fn empty(delimiter: char) -> Self {
        Self {
            delimiter,
            components: Vec::new(),
        }
    }

    /// Builds a name from unescaped values, escaping each one.
    pub fn from_logical<I, S>(values: I, delimiter: char) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            delimiter,
            components: values
                .into_iter()
                .map(|v| escape::escape(v.as_ref(), delimiter))
                .collect(),
        }
    }
}

impl Default for ComponentListName {
    fn default() -> Self {
        Self::empty(DEFAULT_DELIMITER)
    }
}

impl Name for ComponentListName {
    fn delimiter(&self) -> char {
        self.delimiter
    }

    fn no_components(&self) -> usize {
        self.components.len()
    }

    fn component(&self, i: usize) -> Result<String> {
        check_index(i, self.components.len())?;
        Ok(self.components[i].clone())
    }

    fn components(&self) -> Vec<String> {
        self.components.clone()
    }

    fn set_component(&mut self, i: usize, c: &str) -> Result<()> {
        check_index(i, self.components.len())?;
        check_escaped(c, self.delimiter)?;
        self.components[i] = c.to_string();
        Ok(())
    }

    fn insert(&mut self, i: usize, c: &str) -> Result<()> {
        check_insert_index(i, self.components.len())?;
        check_escaped(c, self.delimiter)?;
        self.components.insert(i, c.to_string());
        Ok(())
    }

    fn append(&mut self, c: &str) -> Result<()> {
        check_escaped(c, self.delimiter)?;
        self.components.push(c.to_string());
        Ok(())
    }

    fn remove(&mut self, i: usize) -> Result<()> {
        check_index(i, self.components.len())?;
        self.components.remove(i);
        Ok(())
    }
}

impl fmt::Display for ComponentListName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_string())
    }
}

impl<N: Name> PartialEq<N> for ComponentListName {
    fn eq(&self, other: &N) -> bool {
        self.is_equal(other)
    }
}

impl Eq for ComponentListName {}

impl Hash for ComponentListName {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_data_string().hash(state);
    }
}
