//! # Schema Layer
//!
//! Everything that understands the backend's declarative screen format:
//!
//! - [`types`]: the `SchemaDocument` / `ComponentNode` wire model
//! - [`registry`]: the closed `component_type` → `ComponentKind` mapping
//! - [`style`]: the mobile-unit → host-style translator
//!
//! This layer is pure data and pure functions; rendering lives in `render`.

pub mod registry;
pub mod style;
pub mod types;

pub use registry::{ComponentKind, FlexDirection};
pub use style::{Dim, HostStyle, translate};
pub use types::{ComponentNode, SchemaDocument, SchemaError};
