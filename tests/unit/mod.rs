//! Component tests through the public API.

pub mod datetime;
pub mod decoders;
pub mod registry;
