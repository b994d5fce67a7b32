//! End-to-end dispatch against the embedded tables and standard bindings.

pub mod concurrency;
pub mod kvp_dispatch;
pub mod xml_dispatch;
