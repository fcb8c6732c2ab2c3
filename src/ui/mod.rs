//! Presentation layer: gallery widgets and drag gesture tracking

pub mod drag;
pub mod gallery;
