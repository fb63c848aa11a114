//! cei-site library crate.
//!
//! Carousel controller, mobile menu state and registration client for the
//! landing page, plus the terminal front-end that drives them.

pub mod carousel;
pub mod cli;
pub mod config;
pub mod event_loop;
pub mod menu;
pub mod registration;
pub mod renderer;
