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
// Complexity limits
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

//! Orbit camera, hotspot scene switching and ground-plane marker placement
//! for splat scene viewers.
//!
//! Splatview is the interactive core of a point-cloud ("splat") viewer. It
//! drives a smoothed orbit camera with pan bounds, lets users drop and drag
//! simple placeholder markers on a rotated placement plane, and switches
//! between a main scene and embedded hotspot scenes. Drawing and asset
//! loading stay with the host engine behind the [`render::Renderer`] trait.
//!
//! # Key entry points
//!
//! - [`session::ViewerSession`] - the lifecycle handle; owns all state
//! - [`session::ViewerCommand`] - every host-callable operation as a value
//! - [`input::InputEvent`] - platform-agnostic pointer, touch and key input
//! - [`options::ViewerOptions`] - camera feel, bounds, plane and scene
//!   configuration with TOML presets
//! - [`render::HeadlessRenderer`] - in-memory renderer for tests and tools
//!
//! # Architecture
//!
//! Everything runs on the host's main thread. Input events and the
//! per-frame [`session::ViewerSession::tick`] run to completion one at a
//! time. Asset loads are the only asynchronous step: the renderer reports
//! through a [`render::LoadCompletion`] and the session applies results on
//! its next tick, so any number of events may land between a request and
//! its result.

pub mod camera;
pub mod error;
pub mod geometry;
pub mod input;
pub mod options;
pub mod placement;
pub mod render;
pub mod scene;
pub mod session;
pub mod util;

pub use error::SplatViewError;
pub use session::{ViewerCommand, ViewerEvent, ViewerSession};
