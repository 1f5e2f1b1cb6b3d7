#![doc = include_str!(concat!(env!("OUT_DIR"), "/README_GENERATED.md"))]
#![deny(unused_crate_dependencies)]

pub mod client;
pub mod http;
pub mod persona;

pub use client::{ChatClient, DEFAULT_ENDPOINT};
pub use http::{HttpBackend, JsonReply, ReqwestBackend};

// tokio is test-only in this crate (async test runtime)
#[cfg(test)]
use tokio as _;
