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
// Unused / redundant code
#![deny(unused_results)]
#![deny(unused_qualifications)]
// Cast hygiene
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]

//! Gesture controls that map pointer, wheel, touch and keyboard input to a
//! 3D object's orientation, position and scale.
//!
//! # Key entry points
//!
//! - [`controls::GestureController`] - the gesture state machine
//! - [`target::Target`] - the seam to whatever owns the transform
//! - [`input::InputEvent`] - platform-agnostic input
//! - [`options::Options`] - feature switches, speeds, bounds and bindings
//!
//! # Architecture
//!
//! Platform adapters (`input::winit` with the `viewer` feature,
//! `input::web` with the `web` feature) turn native events into
//! [`input::InputEvent`]s. The controller resolves each press to a gesture
//! through the binding table, keeps at most one gesture session, and feeds
//! per-event deltas to an accumulator that writes the target and notifies
//! observers. Listener subscriptions are requested from an
//! [`input::InputSource`], so the controller only asks for pointer-move
//! and pointer-up while a pointer gesture is active.
//!
//! ```
//! use grip::controls::GestureController;
//! use grip::input::{InputEvent, PointerInput, Unmanaged};
//! use grip::target::Transform;
//!
//! let mut controls = GestureController::with_defaults(Transform::IDENTITY, Unmanaged);
//! let _ = controls.handle_event(&InputEvent::PointerDown(PointerInput::mouse(0, 0.0, 0.0)));
//! let _ = controls.handle_event(&InputEvent::PointerMove(PointerInput::mouse(0, 30.0, 0.0)));
//! assert_ne!(controls.target().orientation, glam::Quat::IDENTITY);
//! ```

pub mod controls;
pub mod error;
pub mod input;
pub mod options;
pub mod target;
#[cfg(feature = "viewer")]
pub mod viewer;

pub use controls::{ControlEvent, GestureController, GestureKind};
pub use error::GripError;
pub use input::InputEvent;
pub use options::Options;
pub use target::{Target, Transform};
#[cfg(feature = "viewer")]
pub use viewer::{Viewer, ViewerBuilder};
