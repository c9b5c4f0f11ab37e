//! CLI command implementations.

pub(crate) mod sections;
pub(crate) mod serve;

pub(crate) use sections::SectionsArgs;
pub(crate) use serve::ServeArgs;
