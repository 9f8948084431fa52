//! Produce data model
//!
//! This module defines the produce record exchanged over the wire and the
//! product code format shared by every produce operation.

pub mod produce;

pub use produce::Produce;
