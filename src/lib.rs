//! Hierarchical, delimiter-separated names and an in-memory tree whose node
//! identities are expressed through them.

#![allow(clippy::enum_variant_names)]

pub mod contract;
pub mod filesystem;
pub mod names;
