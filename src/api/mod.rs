//! Wire types shared by both sides of the relay, plus the client-side
//! HTTP wrapper the terminal UI talks through.

pub mod client;
pub mod types;

pub use client::{ClientError, ProxyClient};
