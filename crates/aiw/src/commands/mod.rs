//! Subcommand implementations

pub mod analyze;
pub mod convert;
pub mod lint;
pub mod platforms;
