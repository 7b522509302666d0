//! # tonal-types
//!
//! Pure music-theory types and reducers for the tonal engine: modulo
//! arithmetic, rational approximation, pitch space, intervals, the mode table,
//! and the tonic/mode/direction synchronization reducer.
//!
//! Nothing here performs I/O. Everything except `reduce` is a pure function
//! of its arguments and safe to call from any thread.

pub mod action;
mod dispatch;
mod error;
pub mod interval;
pub mod mode;
pub mod modulo;
pub mod pitch;
pub mod ratio;
pub mod reduce;
mod state;
pub mod tuning;

pub use action::{Notification, OctaveStep, TonalAction};
pub use dispatch::Dispatcher;
pub use error::TonalError;
pub use interval::{consonance, interval, Consonance, Interval};
pub use mode::{Affinity, Mode, ModeInfo, PitchDirection};
pub use modulo::{modulo, ModuloDiagnostic, Residue};
pub use pitch::{is_valid_note_number, KeyState, Keyboard, Pitch, PitchClass};
pub use ratio::{approximate, Approximation, Fraction, RatioError, DEFAULT_TOLERANCE};
pub use state::{RangePolicy, TonalState};
pub use tuning::{IntervalRatios, JustFlavor};
