//! Domain Layer
//!
//! The core of kube-deploy: configuration resolution and the deployment plan,
//! without direct I/O.
//!
//! ## Structure
//!
//! - `entities/` - Raw metadata, deploy units, helm charts, the effective config
//! - `value_objects/` - Render engines and helm repo aliases
//! - `services/` - Configuration merger, folder assembler, render-engine resolver
//! - `ports/` - Interface definitions for infrastructure (file system, cluster, decryption, events)
//!
//! ## Design Principles
//!
//! 1. **No I/O** - This layer never touches the file system or spawns processes directly
//! 2. **Explicit merges** - Every merge is a field-by-field function with stated precedence
//! 3. **Ports & Adapters** - All I/O goes through trait-defined ports

pub mod entities;
pub mod ports;
pub mod services;
pub mod value_objects;
