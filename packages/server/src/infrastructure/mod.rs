//! Infrastructure layer: the in-memory session registry and the TCP transport.

pub mod repository;
pub mod transport;
