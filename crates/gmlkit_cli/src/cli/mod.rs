pub mod commands;
pub mod convert;
pub mod prompt;
