//! # tonal-core
//!
//! Engine library for the tonal model. Owns the synchronized tonic/mode/
//! direction state, publishes change notifications, and handles the ambient
//! concerns: configuration, logging, and the replayable action log.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use tonal_core::config::Config;
//! use tonal_core::engine::TonalEngine;
//! use tonal_types::{Pitch, TonalAction};
//!
//! let config = Config::load();
//! let mut engine = TonalEngine::from_config(&config);
//! let notifications = engine.subscribe();
//!
//! engine.apply(&TonalAction::SelectTonic(Pitch::new(72)?))?;
//! for n in notifications.try_iter() {
//!     // forward to MIDI / audio / view collaborators
//! }
//! ```
//!
//! ## Module Overview
//!
//! - [`engine`]: `TonalEngine` applies `TonalAction`s through the reducer,
//!   publishes `Notification`s over crossbeam channels, answers pitch queries
//! - [`config`]: TOML configuration (embedded defaults + user override)
//! - [`action_log`]: append-only JSONL action log and startup replay

pub mod action_log;
pub mod config;
pub mod engine;

pub use engine::{PitchInfo, TonalEngine};
