//! Envelope relay
//!
//! Carries a captured [`Envelope`](famrelay_core_types::Envelope) from the
//! page it was extracted on to the page that fills the form. Two single-slot
//! channels exist: the system clipboard survives a change of origin but may be
//! refused by the host, and the origin's own storage survives navigation
//! within one origin and is never permission gated. The reconciliation rule
//! picks between what the two channels hold.

pub mod channel;
pub mod clipboard;
pub mod errors;
pub mod memory;
pub mod reconcile;
pub mod relay;
pub mod storage;

pub use channel::{Channel, ChannelKind};
pub use clipboard::{ClipboardChannel, DEFAULT_CLIPBOARD_HOLD};
pub use errors::RelayError;
pub use memory::MemoryChannel;
pub use reconcile::{reconcile, ReconcilePolicy, Reconciled};
pub use relay::{publish, read, read_or_paste, ChannelRead, PasteFallback};
pub use storage::{OriginStorageChannel, DEFAULT_STORAGE_KEY};
