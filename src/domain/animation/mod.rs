//! Animation domain — animating a rigged model from an action prompt.

pub mod client;
pub mod wire;

pub use client::Animations;
pub use wire::AnimationRequest;
