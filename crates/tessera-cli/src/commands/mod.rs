//! CLI command implementations

pub mod batch;
pub mod candidates;
pub mod fix;
pub mod layout;
pub mod signature;
pub mod smartblock;
pub mod validate;
