//! Presentation Layer
//!
//! This layer handles:
//! - CLI argument parsing (via clap)
//! - Logging setup (via tracing-subscriber)
//! - Creating use cases with infrastructure dependencies
//!
//! ## Structure
//!
//! - `cli` - Command line definition
//! - `factory` - Creates use cases with proper dependencies (dependency injection)
//! - `logging` - Subscriber initialisation
//!
//! ## Usage
//!
//! ```ignore
//! use kube_deploy::presentation::factory;
//!
//! let source = factory::open_source(&args)?;
//! let plan = factory::resolve_plan(&source, &args, &env)?;
//! ```

pub mod cli;
pub mod factory;
pub mod logging;

pub use cli::{Cli, Commands, SourceArgs};
pub use factory::{create_deploy_use_case, resolve_plan};
