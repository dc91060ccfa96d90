//! Escape-aware tokenizing and serializing of name components.
//!
//! A component is stored escaped: a literal delimiter or escape character
//! inside it is prefixed with [`ESCAPE_CHARACTER`]. When a name's delimiter
//! is the escape character itself the delimiter takes priority and escaping
//! is disabled for that name: every occurrence is a boundary.

use tracing::trace;

pub const ESCAPE_CHARACTER: char = '\\';

pub fn escaping_enabled(delimiter: char) -> bool {
    delimiter != ESCAPE_CHARACTER
}

/// Splits `text` into its components, leaving each one escaped.
///
/// An escape character absorbs the character after it, so an escaped
/// delimiter never ends a component. The trailing slice is always emitted,
/// which means a text without delimiters (even the empty one) yields exactly
/// one component.
pub fn split(text: &str, delimiter: char) -> Vec<&str> {
    let mut components = Vec::new();
    let mut start = 0;
    let mut chars = text.char_indices();

    while let Some((i, c)) = chars.next() {
        if c == delimiter {
            components.push(&text[start..i]);
            start = i + c.len_utf8();
        } else if c == ESCAPE_CHARACTER {
            chars.next();
        }
    }
    components.push(&text[start..]);

    trace!("Split {:?} on {:?} into {} components", text, delimiter, components.len());
    components
}

/// Strips escape markers, producing the logical value of a component.
pub fn unescape(component: &str, delimiter: char) -> String {
    if !escaping_enabled(delimiter) {
        return component.to_string();
    }

    let mut result = String::with_capacity(component.len());
    let mut chars = component.chars();
    while let Some(c) = chars.next() {
        if c == ESCAPE_CHARACTER {
            // A dangling escape carries no character and is dropped.
            if let Some(next) = chars.next() {
                result.push(next);
            }
        } else {
            result.push(c);
        }
    }
    result
}

/// Escapes a logical value so it can be stored as a single component.
pub fn escape(logical: &str, delimiter: char) -> String {
    if !escaping_enabled(delimiter) {
        return logical.to_string();
    }

    let mut result = String::with_capacity(logical.len());
    for c in logical.chars() {
        if c == ESCAPE_CHARACTER || c == delimiter {
            result.push(ESCAPE_CHARACTER);
        }
        result.push(c);
    }
    result
}

/// Checks that `component` contains no bare delimiter and no dangling escape.
pub fn is_escaped(component: &str, delimiter: char) -> bool {
    if !escaping_enabled(delimiter) {
        return !component.contains(delimiter);
    }

    let mut chars = component.chars();
    while let Some(c) = chars.next() {
        if c == ESCAPE_CHARACTER {
            if chars.next().is_none() {
                return false;
            }
        } else if c == delimiter {
            return false;
        }
    }
    true
}

/// Produces the round-trippable form of a component.
///
/// Sequences that are already escaped are kept, bare delimiters get an escape
/// prefix and a dangling escape is itself escaped.
pub fn canonicalize(component: &str, delimiter: char) -> String {
    if !escaping_enabled(delimiter) {
        return component.to_string();
    }

    let mut result = String::with_capacity(component.len() + 2);
    let mut chars = component.chars();
    while let Some(c) = chars.next() {
        if c == ESCAPE_CHARACTER {
            result.push(ESCAPE_CHARACTER);
            result.push(chars.next().unwrap_or(ESCAPE_CHARACTER));
        } else {
            if c == delimiter {
                result.push(ESCAPE_CHARACTER);
            }
            result.push(c);
        }
    }
    result
}

/// Moves an escaped component from one delimiter's escaping to another's.
pub fn reescape(component: &str, from: char, to: char) -> String {
    if from == to {
        return component.to_string();
    }
    escape(&unescape(component, from), to)
}

/// Whether `text` ends in an escape character that escapes nothing.
pub fn has_dangling_escape(text: &str, delimiter: char) -> bool {
    if !escaping_enabled(delimiter) {
        return false;
    }

    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        if c == ESCAPE_CHARACTER && chars.next().is_none() {
            return true;
        }
    }
    false
}
