/// Error type for rejected pitch construction and state transitions.
///
/// A rejected transition leaves the state untouched and emits no notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TonalError {
    /// A note number outside 0..=127 reached pitch construction.
    NoteOutOfRange(i32),
    /// A mode index outside 0..=11.
    ModeOutOfRange(i32),
    /// An octave shift would move the tonic outside 0..=127.
    OctaveShiftOutOfRange { tonic: u8, step: i8 },
    /// A tonic or mode change would move the tonic outside 0..=127.
    TransitionOutOfRange { proposed: i32 },
}

impl std::fmt::Display for TonalError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoteOutOfRange(n) => write!(f, "note number {} outside 0..=127", n),
            Self::ModeOutOfRange(m) => write!(f, "mode index {} outside 0..=11", m),
            Self::OctaveShiftOutOfRange { tonic, step } => {
                write!(f, "cannot shift tonic {} by {} octave(s)", tonic, step)
            }
            Self::TransitionOutOfRange { proposed } => {
                write!(f, "transition would place tonic at {}", proposed)
            }
        }
    }
}

impl std::error::Error for TonalError {}
