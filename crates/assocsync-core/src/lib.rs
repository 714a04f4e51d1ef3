//! # assocsync-core
//!
//! Reconciliation of instance-to-function associations against a control
//! plane that only offers associate, disassociate and a paginated list.
//!
//! ## Overview
//!
//! - [`id`] derives a composite ID from the two related identifiers and
//!   decodes it back.
//! - [`AssociationFinder`] establishes existence by scanning every page of
//!   the instance's list.
//! - [`Reconciler`] maps create/read/update/delete onto those primitives.
//!
//! Transports implement [`AssociationTransport`]; [`memory::MemoryTransport`]
//! is a process-local implementation.
//!
//! ## Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use assocsync_core::{Reconciler, memory::MemoryTransport};
//!
//! let reconciler = Reconciler::new(Arc::new(MemoryTransport::new()));
//! let assoc = reconciler
//!     .create("inst-1", "arn:aws:lambda:us-east-1:123456789012:function:router")
//!     .await?;
//! let id = assoc.id()?;
//! reconciler.delete(&id).await?;
//! ```

pub mod arn;
pub mod error;
pub mod finder;
pub mod id;
pub mod memory;
pub mod model;
pub mod reconciler;
pub mod transport;

pub use arn::{is_valid_arn, validate_arn};
pub use error::{AssociationError, ErrorCategory, Result, TransportError};
pub use finder::AssociationFinder;
pub use id::{ID_SEPARATOR, decode, encode};
pub use model::{Association, AssociationPage, AssociationState};
pub use reconciler::{Reconciler, ReconcilerConfig};
pub use transport::{AssociationTransport, MAX_PAGE_SIZE};

/// Type alias for a shareable transport.
pub type DynTransport = std::sync::Arc<dyn AssociationTransport>;
