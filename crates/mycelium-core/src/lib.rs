//! Core types and errors for the Mycelium growth simulator.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the identifiers, field descriptors and error enums shared by every
//! other crate in the workspace.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod field;
pub mod id;

pub use error::{PropagatorError, StepError};
pub use field::{FieldDef, FieldSet, FieldSetIter, ACTIVATOR, FIELD_DEFS, GLOW, SUBSTRATE, VEIN};
pub use id::{FieldId, TickId};
