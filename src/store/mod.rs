//! This module provides the variable table and the engine trait that the server is
//! written against. [`VarStore`] is the only implementation: an insertion-ordered,
//! fixed-capacity table behind a single mutex, shared by every connection.

use crate::Result;

/// maximum number of variables the table will hold
pub const TABLE_CAPACITY: usize = 100;

/// maximum length, in bytes, of a variable name
pub const MAX_NAME_LEN: usize = 63;

/// maximum number of elements in a float array value; extra literal tokens are dropped
pub const ARRAY_CAPACITY: usize = 100;

/// A trait for the basic functionality of a variable store engine.
///
/// All three operations return their response already formatted for the wire, so every
/// implementation can keep its locking span limited to in-memory work and let the caller
/// transmit the result after the lock is released.
pub trait VarEngine: Clone + Send + 'static {
    /// Returns the names of all stored variables, one per line, in insertion order.
    ///
    /// An empty table yields an empty string, not an error.
    fn list(&self) -> Result<String>;

    /// Returns the formatted value of the variable `name`, or the literal
    /// `Variable not found.\n` text if no such variable exists.
    fn read(&self, name: &str) -> Result<String>;

    /// Applies a raw `name=value` assignment, creating the variable or overwriting its
    /// type and value in place.
    ///
    /// # Errors
    ///
    /// Returns one of the rejection variants of [`crate::VarError`] if the assignment is
    /// malformed, the name is empty or too long, or the table is full. A rejected
    /// assignment never mutates the table.
    fn set(&self, assignment: &str) -> Result<()>;
}

mod table;

pub use self::table::{Value, VarStore};
