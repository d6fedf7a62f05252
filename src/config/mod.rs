//! JSON configuration files consumed by the demo binary.
pub mod detect;
