//! Core building blocks shared by every shelf crate: layered settings, the
//! module lifecycle contract, and request validation.

pub mod module;
pub mod registry;
pub mod settings;
pub mod validation;

pub use module::{InitCtx, Module};
pub use registry::ModuleRegistry;
pub use validation::{DecodeFields, FieldDecoder, FieldViolation, Validate};
