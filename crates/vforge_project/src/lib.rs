//! # vforge_project
//!
//! Project data model, type registry and item store for VForge.
//!
//! A project is a tree of typed asset files (actors, fonts, sounds, …).
//! Each kind of asset is described by a [`ProjectTypeSpec`]: a file-name
//! matcher, a JSON Schema for its data, editor/icon bindings and the list of
//! templates to regenerate when items of that type change. Runtime instances
//! are [`ProjectItem`]s, tagged with the [`Contributor`] that owns them —
//! user-authored items are mutable, engine/plugin/studio items are read-only
//! overlays.
//!
//! ## Example
//!
//! ```rust,no_run
//! use vforge_project::{ProjectLoader, TypeRegistry};
//!
//! let registry = TypeRegistry::new(vec![]).unwrap();
//! let loader = ProjectLoader::new("./my-game");
//! let store = loader.load(&registry).unwrap();
//! println!("{} items", store.len());
//! ```

pub mod error;
pub mod loader;
pub mod models;
pub mod registry;
pub mod store;

pub use error::{ProjectError, ProjectResult};
pub use loader::ProjectLoader;
pub use models::{Contributor, ProjectItem, ProjectTypeSpec};
pub use registry::TypeRegistry;
pub use store::ProjectStore;
