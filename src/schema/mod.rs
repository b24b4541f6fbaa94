//! Knowledge-graph schema construction.
//!
//! # Data Flow
//! ```text
//! PropertyDecl / TypeDecl / EntityDecl / RelationDecl
//!     → builder.rs (assign ids, validate references, emit ops)
//!     → ops.rs (SET_TRIPLE / CREATE_RELATION primitives)
//!     → edit.rs (named, authored, immutable batch)
//!     → publish subsystem
//! ```
//!
//! # Design Decisions
//! - The builder is an owned value threaded through each step, never global
//! - Ids are assigned once at creation and never change
//! - An op may only reference ids created earlier, imported, or well-known

pub mod builder;
pub mod edit;
pub mod id;
pub mod ops;
pub mod system_ids;
pub mod types;
pub mod value;

pub use builder::EditBuilder;
pub use edit::Edit;
pub use id::Id;
pub use ops::{Op, Relation, Triple};
pub use types::{EntityDecl, PropertyDecl, RelationDecl, SchemaError, SchemaResult, TypeDecl};
pub use value::{PropertyValue, Value, ValueType};
