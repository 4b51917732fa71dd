//! Domain layer
//!
//! Entities, value objects and the ports the application layer talks
//! through. Nothing here performs I/O.

pub mod entities;
pub mod ports;
pub mod value_objects;
