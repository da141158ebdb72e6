//! Record extraction
//!
//! One adapter per supported source site. Adapters only read the rendered
//! page and never fail: whatever markup is missing is left out of the
//! resulting [`Record`](famrelay_core_types::Record).

pub mod adapter;
pub mod selectors;
mod text;

pub use adapter::SiteAdapter;
pub use selectors::{FieldSource, SiteSelectors, SitesConfig};
