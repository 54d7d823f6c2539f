//! Retexture domain — re-skinning an existing model from a style prompt.

pub mod client;
pub mod wire;

pub use client::Retextures;
pub use wire::RetextureRequest;
