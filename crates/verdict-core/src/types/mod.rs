//! Type system for Verdict
//!
//! Every value carries exactly one of four type tags. Types are checked
//! when expressions are built, so evaluation never sees an ill-typed tree.

pub mod value;

pub use value::{Value, ValueType};
