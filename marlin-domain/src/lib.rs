//! Marlin Domain Layer
//!
//! Pure domain logic with zero I/O dependencies.
//! Contains the order model, value objects, and credential types.

#![warn(missing_docs)]
#![warn(clippy::all)]

// Public modules
pub mod credentials;
pub mod order;
pub mod value_objects;

// Re-export commonly used types
pub use credentials::ApiCredentials;
pub use order::{
    OcoLegKind, OcoLegs, OrderLeg, OrderRecord, OrderRequest, OrderStatus, OrderType,
};
pub use value_objects::{DomainError, OrderSide, Price, Quantity, Symbol};
