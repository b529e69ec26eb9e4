//! HTTP handlers

pub mod children;
pub mod game;
