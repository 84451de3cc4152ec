//! Backend access: the REST client and the background fetcher.

pub mod client;
pub mod fetcher;

pub use client::{HttpApi, MissionApi};
pub use fetcher::{FetchEvent, Fetcher};
