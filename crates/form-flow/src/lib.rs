//! Form-fill orchestration
//!
//! Drives the destination form one field at a time. Every target element is
//! owned by the host page and may appear late or never, so each step polls
//! under its own budget and a field that cannot be reached is given up
//! without stopping the rest of the run.

pub mod autocomplete;
pub mod catalogue;
pub mod errors;
pub mod filler;
pub mod guard;
pub mod types;

pub use autocomplete::{resolve, Resolution};
pub use catalogue::{FormCatalogue, Timing};
pub use errors::FlowError;
pub use filler::FormFiller;
pub use guard::{is_target_form_open, open_form};
pub use types::{Field, FieldKind, FieldOutcome, FieldState, FillReport};
