//! Dispatch abstraction for front ends.

use crate::{Notification, TonalAction, TonalError};

/// Trait for dispatching actions to the tonal engine.
///
/// Front ends (touch, MIDI, command line) drive the engine through this trait
/// and route the returned notifications to their own collaborators.
pub trait Dispatcher {
    /// Dispatch an action and return the notifications it produced.
    fn dispatch(&mut self, action: &TonalAction) -> Result<Vec<Notification>, TonalError>;
}
