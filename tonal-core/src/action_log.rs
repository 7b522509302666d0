//! Append-only JSONL log of tonal actions, and replay.
//!
//! Only actions that touch the tonal aggregate are logged; key activation is
//! high-frequency and irrelevant to restoring a session. Replaying the log
//! through the reducer rebuilds the tonic/mode/direction a session ended in.
//!
//! Sessions append to the same file. Each session header records whether the
//! session continued from a replay; a fresh session starts over from the
//! initial state.

use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

use serde::{Deserialize, Serialize};

use tonal_types::{reduce, Keyboard, Notification, TonalAction, TonalState};

/// Default log location: `<local data dir>/tonal/actions.jsonl`.
pub fn default_log_path() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("tonal")
        .join("actions.jsonl")
}

pub struct ActionLog {
    writer: BufWriter<File>,
    session_start: Instant,
}

#[derive(Serialize)]
struct SessionHeader {
    event: &'static str,
    epoch_ms: u128,
    pid: u32,
    resumed: bool,
}

#[derive(Serialize)]
struct LogEntry<'a> {
    t_ms: u128,
    action: &'a TonalAction,
    notifications: Vec<String>,
}

const SESSION_START: &str = "session_start";

/// Deserialized entry for replay; session headers carry `event` instead of `action`.
#[derive(Deserialize)]
struct ReplayEntry {
    action: Option<TonalAction>,
    event: Option<String>,
    resumed: Option<bool>,
}

impl ActionLog {
    /// Open (or create) the log at `path` for appending and write a session header.
    ///
    /// `resumed` marks a session that continues from a replay of this log.
    pub fn open(path: &Path, resumed: bool) -> std::io::Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        let mut writer = BufWriter::new(file);

        let header = SessionHeader {
            event: SESSION_START,
            epoch_ms: std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .unwrap_or_default()
                .as_millis(),
            pid: std::process::id(),
            resumed,
        };
        if let Ok(json) = serde_json::to_string(&header) {
            writeln!(writer, "{}", json)?;
            writer.flush()?;
        }

        Ok(Self {
            writer,
            session_start: Instant::now(),
        })
    }

    /// Log an applied action and the notifications it produced.
    pub fn record(&mut self, action: &TonalAction, notifications: &[Notification]) {
        if !action.is_tonal() {
            return;
        }
        let entry = LogEntry {
            t_ms: self.session_start.elapsed().as_millis(),
            action,
            notifications: notifications.iter().map(|n| n.to_string()).collect(),
        };
        if let Ok(json) = serde_json::to_string(&entry) {
            if let Err(e) = writeln!(self.writer, "{}", json).and_then(|_| self.writer.flush()) {
                log::warn!(target: "action_log", "failed to write action log: {}", e);
            }
        }
    }
}

/// Error type for action log replay.
#[derive(Debug)]
pub enum ReplayError {
    Io(std::io::Error),
}

impl From<std::io::Error> for ReplayError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl std::fmt::Display for ReplayError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "IO error: {}", e),
        }
    }
}

impl std::error::Error for ReplayError {}

/// Replay an action log on top of `initial`, returning the final state.
///
/// Actions the reducer rejects are skipped, mirroring what happened live.
/// Unparseable lines (e.g. a tail cut off mid-write) are skipped too.
pub fn replay_action_log(path: &Path, initial: TonalState) -> Result<TonalState, ReplayError> {
    let mut state = initial.clone();
    let mut keyboard = Keyboard::new();
    let file = File::open(path)?;
    for (index, line) in BufReader::new(file).lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let entry: ReplayEntry = match serde_json::from_str(&line) {
            Ok(e) => e,
            Err(e) => {
                log::warn!(target: "action_log", "skipping line {}: {}", index + 1, e);
                continue;
            }
        };
        if entry.event.as_deref() == Some(SESSION_START) && entry.resumed != Some(true) {
            state = initial.clone();
            keyboard = Keyboard::new();
        }
        if let Some(action) = entry.action {
            if let Err(e) = reduce::reduce_action(&action, &mut state, &mut keyboard) {
                log::debug!(target: "action_log", "replay skipped {:?}: {}", action, e);
            }
        }
    }
    Ok(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tonal_types::{Mode, OctaveStep, Pitch};

    #[test]
    fn replay_restores_final_state() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("actions.jsonl");

        let mut live = TonalState::new();
        let mut keyboard = Keyboard::new();
        let actions = [
            TonalAction::SelectMode(Mode::new(5).unwrap()),
            TonalAction::ActivatePitch { pitch: Pitch::new(64).unwrap(), velocity: 90 },
            TonalAction::ShiftOctave(OctaveStep::Down),
            TonalAction::SelectTonic(Pitch::new(62).unwrap()),
        ];
        {
            let mut log = ActionLog::open(&path, false).unwrap();
            for action in &actions {
                let n = reduce::reduce_action(action, &mut live, &mut keyboard).unwrap();
                log.record(action, &n);
            }
        }

        let replayed = replay_action_log(&path, TonalState::new()).unwrap();
        assert_eq!(replayed, live);
    }

    #[test]
    fn activation_actions_are_not_logged() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("actions.jsonl");
        {
            let mut log = ActionLog::open(&path, false).unwrap();
            log.record(&TonalAction::DeactivateAll, &[]);
            log.record(&TonalAction::ToggleLinkage(false), &[]);
        }
        let contents = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("session_start"));
        assert!(lines[1].contains("ToggleLinkage"));
    }

    #[test]
    fn resumed_session_continues_previous_state() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("actions.jsonl");
        for resumed in [false, true] {
            let mut log = ActionLog::open(&path, resumed).unwrap();
            log.record(&TonalAction::ShiftOctave(OctaveStep::Up), &[]);
        }
        let replayed = replay_action_log(&path, TonalState::new()).unwrap();
        assert_eq!(replayed.tonic.note(), 84);
        assert_eq!(replayed.octave_shift, 2);
    }

    #[test]
    fn fresh_session_starts_from_initial_state() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("actions.jsonl");

        let mut keyboard = Keyboard::new();
        let sessions = [
            TonalAction::SelectMode(Mode::new(5).unwrap()),
            TonalAction::ShiftOctave(OctaveStep::Up),
        ];
        let mut ended = Vec::new();
        for action in &sessions {
            let mut live = TonalState::new();
            let mut log = ActionLog::open(&path, false).unwrap();
            let n = reduce::reduce_action(action, &mut live, &mut keyboard).unwrap();
            log.record(action, &n);
            ended.push(live);
        }

        let replayed = replay_action_log(&path, TonalState::new()).unwrap();
        assert_eq!(ended.last(), Some(&replayed));
        assert_eq!(replayed.tonic.note(), 72);
        assert_eq!(replayed.mode.index(), 0);
    }

    #[test]
    fn truncated_tail_keeps_earlier_entries() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("actions.jsonl");
        {
            let mut log = ActionLog::open(&path, false).unwrap();
            log.record(&TonalAction::SelectMode(Mode::new(5).unwrap()), &[]);
        }
        let mut file = OpenOptions::new().append(true).open(&path).unwrap();
        write!(file, "{{\"t_ms\":12,\"action\":{{\"SelectMo").unwrap();
        drop(file);

        let replayed = replay_action_log(&path, TonalState::new()).unwrap();
        assert_eq!(replayed.mode.index(), 5);
    }

    #[test]
    fn garbage_lines_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("actions.jsonl");
        std::fs::write(&path, "{not json}\n{\"action\":{\"ShiftOctave\":\"Down\"}}\n").unwrap();
        let replayed = replay_action_log(&path, TonalState::new()).unwrap();
        assert_eq!(replayed.tonic.note(), 48);
    }

    #[test]
    fn missing_log_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            replay_action_log(&dir.path().join("none.jsonl"), TonalState::new()),
            Err(ReplayError::Io(_))
        ));
    }
}
