//! Sample grammars built with [`mparse`].
//!
//! Each module builds its grammar from the public API only, and is tested in `tests/`. The `mparse-style` binary
//! parses a stylesheet file with [`style::stylesheet`] and prints it, or reports where parsing failed.

#![deny(missing_docs)]

pub mod calc;
pub mod json;
pub mod number;
pub mod style;
