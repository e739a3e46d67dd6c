//! Domain Services
//!
//! Pure business logic services that operate on domain entities.
//! File access goes through the FileSystem port only.

pub mod config_merger;
pub mod folder_assembler;
pub mod interpolation;
pub mod render_engine_resolver;

pub use config_merger::{parse_yaml, ConfigMerger, GLOBAL_VARS_FILE, METADATA_FILES};
pub use folder_assembler::{ConventionFolder, FolderAssembler, CONVENTION_FOLDERS};
pub use interpolation::expand;
pub use render_engine_resolver::{resolve_engine, KUSTOMIZATION_FILES};
