//! Shared model for the famrelay pipeline.
//!
//! Everything that crosses a crate boundary lives here: the normalized person
//! [`Record`], the provenance-tagged [`Envelope`] carried between pages, the
//! name-splitting policies adapters declare, and the pipeline error taxonomy.

pub mod envelope;
pub mod errors;
pub mod names;
pub mod record;

pub use envelope::{Envelope, SourceTag};
pub use errors::PipelineError;
pub use names::{split_full_name, NameParts, NameSplitPolicy};
pub use record::{Record, Sex};
