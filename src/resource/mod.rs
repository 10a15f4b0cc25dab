//! Scene source loading.
//!
//! The viewer needs six text resources before it can start: mesh
//! triangles, per-vertex temperatures, triangle indices, a metafile with
//! the model center, and the vertex and fragment shader sources. Loading
//! is abstracted behind [`ResourceLoader`] so hosts can read from disk,
//! fetch over HTTP, or serve from memory in tests.

mod loader;
mod sources;

#[cfg(feature = "http")]
pub use loader::HttpLoader;
pub use loader::{FsLoader, LoadError, MemoryLoader, ResourceLoader};
pub use sources::{parse_values, SceneSources, SourcePaths};
