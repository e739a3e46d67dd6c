//! Value Objects
//!
//! Immutable types that are defined by their value rather than identity.

mod render_engine;
mod repo_alias;

pub use render_engine::{ParseRenderEngineError, RenderEngine, Renderer};
pub use repo_alias::RepoAlias;
