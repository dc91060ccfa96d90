//! Hierarchical names: sequences of components separated by a single-character
//! delimiter, with an escape character making delimiters literal.
//!
//! Two interchangeable representations implement the [`Name`] contract:
//! [`StringName`] keeps one delimited text and derives components from it,
//! [`ComponentListName`] keeps the components themselves.

mod component_list_name;
pub mod escape;
mod name;
mod string_name;

pub use component_list_name::ComponentListName;
pub use escape::ESCAPE_CHARACTER;
pub use name::{DEFAULT_DELIMITER, Name, parse_delimiter};
pub use string_name::StringName;
