//! Declarative output schemas for the Crammer generation library.
//!
//! Generation backends produce unstructured text by nature; this crate
//! provides the declared shapes that pin a generation call to a
//! structured contract, and the pure validator that enforces the
//! contract on every returned payload.

mod shape;
mod validate;

pub use shape::{Field, Schema, UnionVariant};
pub use validate::{SchemaViolation, ViolationKind};
