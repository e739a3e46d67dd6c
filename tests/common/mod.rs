//! Common test utilities for kube-deploy CLI and scenario tests.
//!
//! This module provides:
//! - `TestEnv`: Isolated environment with a config folder and stub tools
//! - Fixtures: Reusable config folder content

#![allow(dead_code)]

pub mod env;
pub mod fixtures;

pub use env::*;
pub use fixtures::*;
