//! Provides all of Tango's core functionality: the visible word lists, the admin gate and the
//! services behind the admin pages.

pub mod auth;
pub mod backend;
pub mod cards;
pub mod composer;
pub mod config;
pub mod domain;
pub mod error;
pub mod reactive;
pub mod seed;
pub mod storage;

pub use tango_core::{display_text, Category, Inspiration, NewInspiration, WordPair};
