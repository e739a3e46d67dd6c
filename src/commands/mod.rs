//! Command entry points

pub mod deploy;
pub mod plan;
