//! # Domain Module
//!
//! Core marketplace types, dictionary names and errors.

pub mod dictionaries;
pub mod entities;
pub mod errors;
pub mod value_objects;

pub use entities::*;
pub use errors::*;
pub use value_objects::*;
