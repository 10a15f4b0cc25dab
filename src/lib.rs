// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints.

// Broad lint groups
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
// Documentation
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::bare_urls)]
// No panicking in library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
// No debug/print artifacts
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
// Import hygiene
#![deny(clippy::wildcard_imports)]
// Complexity limits (thresholds in clippy.toml)
#![deny(clippy::cognitive_complexity)]
#![deny(clippy::too_many_lines)]
#![deny(clippy::excessive_nesting)]
// Function signature hygiene
#![deny(clippy::too_many_arguments)]
#![deny(clippy::fn_params_excessive_bools)]
// Clone / pass-by-value hygiene
#![deny(clippy::needless_pass_by_value)]
#![deny(clippy::implicit_clone)]
// String hygiene
#![deny(clippy::inefficient_to_string)]
#![deny(clippy::redundant_closure_for_method_calls)]
#![deny(clippy::manual_string_new)]
#![deny(clippy::str_to_string)]
// Cargo lints (warn, not deny since cargo lints can be noisy)
#![warn(clippy::cargo)]
// Unused / redundant code
#![deny(unused_results)]
#![deny(unused_qualifications)]
// Cast hygiene
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]

//! Camera and view-transform engine for an interactive FEM mesh viewer.
//!
//! femview turns pointer drags into model rotations and composes the
//! single model-view-projection matrix a shader pipeline needs each frame.
//! Rendering itself stays outside: the crate hands the matrix to a
//! [`TransformSink`], such as the wgpu [`gpu::TransformBinding`].
//!
//! # Key entry points
//!
//! - [`ViewComposer`] - owns frustum, camera pose, world transform and
//!   orientation; composes the per-frame transform
//! - [`camera::OrientationModel`] - drag-to-rotation strategies (arcball,
//!   Euler yaw/pitch)
//! - [`Viewer`] - session glue: loads a scene, routes host input, drives
//!   one frame per animation callback
//! - [`Options`] - runtime configuration with TOML presets
//!
//! # Data flow
//!
//! Host events become [`PointerEvent`]s; the
//! [`PointerTracker`](input::PointerTracker) turns them into drag samples,
//! the orientation model folds those into a rotation, and the composer
//! multiplies everything together as `P × V × S(s) × T(−t) × R × T(t)`.
//! A [`FrameClock`](util::FrameClock) supplies elapsed time for
//! continuous motion such as auto-rotation.

pub mod camera;
pub mod error;
pub mod gpu;
pub mod input;
pub mod math;
pub mod options;
pub mod resource;
pub mod util;
pub mod viewer;
#[cfg(feature = "web")]
pub mod web;

pub use camera::{CameraPose, ModelViewState, ViewComposer};
pub use error::ViewError;
pub use input::{Modifiers, PointerEvent};
pub use options::Options;
pub use viewer::{TransformSink, Viewer, ViewerBuilder};
