use std::fmt;
use std::hash::{Hash, Hasher};

use snafu::ensure;
use tracing::trace;

use crate::contract::{IllegalArgumentSnafu, InvalidStateSnafu, Result};
use crate::names::name::{check_escaped, check_index, check_insert_index};
use crate::names::{DEFAULT_DELIMITER, Name, escape};

/// A name backed by a single delimited text.
///
/// Components are derived from the text on demand. A text always holds at
/// least one component, so a name whose last component was removed is kept
/// as an empty text with a component count of zero.
#[derive(Debug, Clone)]
pub struct StringName {
    delimiter: char,
    name: String,
    no_components: usize,
}

impl StringName {
    pub fn new(source: impl Into<String>) -> Result<Self> {
        Self::with_delimiter(source, DEFAULT_DELIMITER)
    }

    pub fn with_delimiter(source: impl Into<String>, delimiter: char) -> Result<Self> {
        let name = source.into();
        ensure!(
            !escape::has_dangling_escape(&name, delimiter),
            IllegalArgumentSnafu {
                message: format!("{name:?} ends in a dangling escape character"),
            }
        );

        let no_components = escape::split(&name, delimiter).len();
        Ok(Self {
            delimiter,
            name,
            no_components,
        })
    }

    /// The backing text, exactly as stored.
    pub fn as_str(&self) -> &str {
        &self.name
    }

    fn split(&self) -> Vec<&str> {
        if self.no_components == 0 {
            return Vec::new();
        }
        escape::split(&self.name, self.delimiter)
    }

    fn owned_components(&self) -> Vec<String> {
        self.split().into_iter().map(str::to_string).collect()
    }

    fn store(&mut self, components: Vec<String>) -> Result<()> {
        let expected = components.len();
        self.name = components.join(self.delimiter.to_string().as_str());
        self.no_components = expected;

        if expected > 0 {
            let parsed = escape::split(&self.name, self.delimiter).len();
            ensure!(
                parsed == expected,
                InvalidStateSnafu {
                    message: format!("{:?} parses into {parsed} components, expected {expected}", self.name),
                }
            );
        }
        trace!("Stored name {:?} with {} components", self.name, expected);
        Ok(())
    }
}

impl Name for StringName {
    fn delimiter(&self) -> char {
        self.delimiter
    }

    fn no_components(&self) -> usize {
        self.no_components
    }

    fn component(&self, i: usize) -> Result<String> {
        check_index(i, self.no_components)?;
        let components = self.split();
        components
            .get(i)
            .map(|c| c.to_string())
            .ok_or_else(|| {
                InvalidStateSnafu {
                    message: format!("{:?} has no component {i}", self.name),
                }
                .build()
            })
    }

    fn components(&self) -> Vec<String> {
        self.owned_components()
    }

    fn set_component(&mut self, i: usize, c: &str) -> Result<()> {
        check_index(i, self.no_components)?;
        check_escaped(c, self.delimiter)?;

        let mut components = self.owned_components();
        components[i] = c.to_string();
        self.store(components)
    }

    fn insert(&mut self, i: usize, c: &str) -> Result<()> {
        check_insert_index(i, self.no_components)?;
        check_escaped(c, self.delimiter)?;

        let mut components = self.owned_components();
        components.insert(i, c.to_string());
        self.store(components)
    }

    fn append(&mut self, c: &str) -> Result<()> {
        check_escaped(c, self.delimiter)?;

        if self.no_components > 0 {
            self.name.push(self.delimiter);
        }
        self.name.push_str(c);
        self.no_components += 1;
        Ok(())
    }

    fn remove(&mut self, i: usize) -> Result<()> {
        check_index(i, self.no_components)?;

        let mut components = self.owned_components();
        components.remove(i);
        self.store(components)
    }
}

impl fmt::Display for StringName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_string())
    }
}

impl<N: Name> PartialEq<N> for StringName {
    fn eq(&self, other: &N) -> bool {
        self.is_equal(other)
    }
}

impl Eq for StringName {}

impl Hash for StringName {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_data_string().hash(state);
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::contract::Error;

    #[test]
    fn insert_places_component_at_index() {
        let mut n = StringName::new("oss.fau.de").unwrap();
        n.insert(1, "cs").unwrap();
        assert_eq!(n.as_string(), "oss.cs.fau.de");
        assert_eq!(n.as_str(), "oss.cs.fau.de");
    }

    #[test]
    fn append_and_remove() {
        let mut n = StringName::new("oss.cs.fau").unwrap();
        n.append("de").unwrap();
        assert_eq!(n.as_string(), "oss.cs.fau.de");
        n.remove(0).unwrap();
        assert_eq!(n.as_string(), "cs.fau.de");
    }

    #[test]
    fn custom_delimiter_insert() {
        let mut n = StringName::with_delimiter("oss#fau#de", '#').unwrap();
        n.insert(1, "cs").unwrap();
        assert_eq!(n.as_string(), "oss#cs#fau#de");
    }

    #[test]
    fn text_without_delimiter_is_one_component() {
        let mut n = StringName::with_delimiter("oss.cs.fau.de", '#').unwrap();
        assert_eq!(n.no_components(), 1);
        assert_eq!(n.as_string(), "oss.cs.fau.de");
        n.append("people").unwrap();
        assert_eq!(n.as_string(), "oss.cs.fau.de#people");
    }

    #[rstest]
    #[case("", '.', 1)]
    #[case("///", '/', 4)]
    #[case(r"Oh\.\.\.", '.', 1)]
    #[case(r"Oh\\.\\.\\.", '.', 4)]
    fn counts_components(#[case] text: &str, #[case] delimiter: char, #[case] expected: usize) {
        let n = StringName::with_delimiter(text, delimiter).unwrap();
        assert_eq!(n.no_components(), expected);
    }

    #[test]
    fn only_delimiters_yields_empty_components() {
        let mut n = StringName::with_delimiter("///", '/').unwrap();
        assert_eq!(n.as_string(), "///");
        assert!(n.components().iter().all(String::is_empty));
        n.append("people").unwrap();
        assert_eq!(n.as_string(), "////people");
    }

    #[test]
    fn escaped_delimiters_render_literally() {
        let n = StringName::with_delimiter(r"my\/name/other\/name", '/').unwrap();
        assert_eq!(n.no_components(), 2);
        assert_eq!(n.as_string(), "my/name/other/name");
        assert_eq!(n.as_data_string(), r"my\/name/other\/name");
        assert_eq!(n.as_string_with('-'), "my/name-other/name");
    }

    #[test]
    fn removing_every_component_leaves_an_empty_name() {
        let mut n = StringName::new("solo").unwrap();
        n.remove(0).unwrap();
        assert!(n.is_empty());
        assert_eq!(n.as_string(), "");
        n.append("again").unwrap();
        assert_eq!(n.no_components(), 1);
        assert_eq!(n.as_str(), "again");
    }

    #[test]
    fn insert_empty_component() {
        let mut n = StringName::new("oss.fau.de").unwrap();
        n.insert(1, "").unwrap();
        assert_eq!(n.no_components(), 4);
        assert_eq!(n.as_str(), "oss..fau.de");
    }

    #[test]
    fn rejects_dangling_escape() {
        assert!(matches!(
            StringName::new(r"oss\"),
            Err(Error::IllegalArgumentError { .. })
        ));
    }

    #[rstest]
    #[case(999)]
    #[case(3)]
    fn out_of_range_indices_are_preconditions(#[case] i: usize) {
        let mut n = StringName::new("oss.fau.de").unwrap();
        assert!(matches!(n.component(i), Err(Error::IllegalArgumentError { .. })));
        assert!(matches!(n.set_component(i, "x"), Err(Error::IllegalArgumentError { .. })));
        assert!(matches!(n.remove(i), Err(Error::IllegalArgumentError { .. })));
        assert_eq!(n.as_str(), "oss.fau.de");
    }

    #[test]
    fn insert_past_end_is_rejected() {
        let mut n = StringName::new("oss.fau.de").unwrap();
        assert!(matches!(n.insert(4, ""), Err(Error::IllegalArgumentError { .. })));
        assert!(n.insert(3, "").is_ok());
    }

    #[test]
    fn unescaped_components_are_rejected() {
        let mut n = StringName::new("oss.fau.de").unwrap();
        assert!(matches!(n.set_component(0, r"\\.abc"), Err(Error::IllegalArgumentError { .. })));
        assert!(matches!(n.insert(0, r"\\.abc"), Err(Error::IllegalArgumentError { .. })));
        assert!(matches!(n.append(r"\\.abc"), Err(Error::IllegalArgumentError { .. })));
        assert_eq!(n.no_components(), 3);
    }

    #[test]
    fn escaped_component_can_be_set() {
        let mut n = StringName::new("oss.fau.de").unwrap();
        n.set_component(1, r"f\.a\.u").unwrap();
        assert_eq!(n.no_components(), 3);
        assert_eq!(n.component(1).unwrap(), r"f\.a\.u");
        assert_eq!(n.as_string(), "oss.f.a.u.de");
    }

    #[test]
    fn derivations_leave_receiver_untouched() {
        let n = StringName::with_delimiter(r"my\/name/other\/name", '/').unwrap();
        let shorter = n.removed(0).unwrap();
        assert_eq!(n.no_components(), 2);
        assert_eq!(shorter.no_components(), 1);
        assert_eq!(shorter.as_string(), "other/name");
    }

    #[test]
    fn clone_is_equal_and_independent() {
        let n = StringName::with_delimiter(r"my\/name/other\/name", '/').unwrap();
        let mut copy = n.clone();
        assert!(n.is_equal(&copy));
        assert_eq!(n.as_data_string(), copy.as_data_string());
        copy.append("more").unwrap();
        assert!(!n.is_equal(&copy));
        assert_eq!(n.no_components(), 2);
    }

    #[test]
    fn delimiter_equal_to_escape_splits_everywhere() {
        let mut n = StringName::with_delimiter(r"1\2\3\4", '\\').unwrap();
        assert_eq!(n.no_components(), 4);
        assert_eq!(n.as_string_with('+'), "1+2+3+4");
        n.append("5").unwrap();
        assert_eq!(n.as_string(), r"1\2\3\4\5");
    }
}
