//! CLI command implementations.

pub(crate) mod fetch;
pub(crate) mod version;

pub(crate) use fetch::FetchArgs;
