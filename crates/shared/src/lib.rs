//! Domain types, wire error payloads, and outbound link construction shared
//! by the chain client core and the GUI.

pub mod domain;
pub mod error;
pub mod links;
