//! # Chirp Shared
//!
//! Request/response types shared between the API server and its clients.
//! Deliberately free of domain dependencies so it can compile for WASM
//! frontends as well.

pub mod dto;
pub mod response;

pub use response::ErrorResponse;
