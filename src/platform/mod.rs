//! Platform abstraction layer
//!
//! Maps browser key events onto simulation input. Kept free of web-sys
//! types so the mapping is testable natively.

pub mod input;

pub use input::{Key, Keyboard};
