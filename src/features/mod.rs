//! Feature implementations for blitz.

pub mod focus;
