//! TonalEngine: owns the tonal state and delivers notifications.
//!
//! The engine is single-threaded. Front ends serialize their events into
//! `apply`; each transition runs to completion in the reducer before any
//! notification is published to subscribers.

use crossbeam_channel::{unbounded, Receiver, Sender};

use tonal_types::reduce::reduce_action;
use tonal_types::tuning::{et_freq, just_ratio, IntervalRatios, DEFAULT_A4};
use tonal_types::{
    interval, Consonance, Dispatcher, JustFlavor, Keyboard, Notification, OctaveStep, Pitch,
    RatioError, TonalAction, TonalError, TonalState, DEFAULT_TOLERANCE,
};

use crate::action_log::ActionLog;
use crate::config::Config;

/// Everything a labeling collaborator needs to know about one pitch.
#[derive(Debug, Clone, PartialEq)]
pub struct PitchInfo {
    pub pitch: Pitch,
    /// Signed distance from the tonic.
    pub distance: i32,
    /// Interval class relative to the tonic.
    pub class: u8,
    pub is_tonic: bool,
    pub is_octave: bool,
    pub consonance: Consonance,
    /// Whether the class belongs to the active mode.
    pub in_mode: bool,
    pub activated: bool,
    pub frequency: f64,
    pub just_ratio: f64,
    pub ratios: IntervalRatios,
}

pub struct TonalEngine {
    state: TonalState,
    keyboard: Keyboard,
    subscribers: Vec<Sender<Notification>>,
    action_log: Option<ActionLog>,
    tolerance: f64,
    tuning_a4: f64,
    just_flavor: JustFlavor,
}

impl Default for TonalEngine {
    fn default() -> Self {
        Self::new(TonalState::new())
    }
}

impl TonalEngine {
    pub fn new(state: TonalState) -> Self {
        Self {
            state,
            keyboard: Keyboard::new(),
            subscribers: Vec::new(),
            action_log: None,
            tolerance: DEFAULT_TOLERANCE,
            tuning_a4: DEFAULT_A4,
            just_flavor: JustFlavor::default(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        let state = config.initial_state();
        log::info!(
            target: "engine",
            "starting at tonic {} mode {} ({})",
            state.tonic,
            state.mode,
            state.direction.name()
        );
        Self {
            tolerance: config.tolerance(),
            tuning_a4: config.tuning_a4(),
            just_flavor: config.just_flavor(),
            ..Self::new(state)
        }
    }

    /// Replace the starting state, e.g. with one rebuilt from an action log.
    pub fn with_state(mut self, state: TonalState) -> Self {
        self.state = state;
        self
    }

    pub fn with_action_log(mut self, log: ActionLog) -> Self {
        self.action_log = Some(log);
        self
    }

    pub fn state(&self) -> &TonalState {
        &self.state
    }

    pub fn keyboard(&self) -> &Keyboard {
        &self.keyboard
    }

    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// New receiver for every notification published from now on.
    pub fn subscribe(&mut self) -> Receiver<Notification> {
        let (tx, rx) = unbounded();
        self.subscribers.push(tx);
        rx
    }

    /// Apply one inbound event.
    ///
    /// On error the state is unchanged and nothing is published.
    pub fn apply(&mut self, action: &TonalAction) -> Result<Vec<Notification>, TonalError> {
        match reduce_action(action, &mut self.state, &mut self.keyboard) {
            Ok(notifications) => {
                log::debug!(
                    target: "engine",
                    "{:?} -> {} notification(s)",
                    action,
                    notifications.len()
                );
                if let Some(log) = self.action_log.as_mut() {
                    log.record(action, &notifications);
                }
                self.publish(&notifications);
                Ok(notifications)
            }
            Err(e) => {
                log::warn!(target: "engine", "rejected {:?}: {}", action, e);
                Err(e)
            }
        }
    }

    fn publish(&mut self, notifications: &[Notification]) {
        if notifications.is_empty() {
            return;
        }
        // Drop subscribers whose receiver is gone.
        self.subscribers
            .retain(|tx| notifications.iter().all(|n| tx.send(*n).is_ok()));
    }

    pub fn can_shift_octave(&self, step: OctaveStep) -> bool {
        self.state.can_shift_octave(step)
    }

    /// Describe `pitch` relative to the current tonic and mode.
    pub fn describe(&self, pitch: Pitch) -> Result<PitchInfo, RatioError> {
        let iv = interval(self.state.tonic, pitch);
        Ok(PitchInfo {
            pitch,
            distance: iv.distance(),
            class: iv.class(),
            is_tonic: iv.is_tonic(),
            is_octave: iv.is_octave(),
            consonance: iv.consonance(),
            in_mode: self.state.mode.info().contains(iv.class()),
            activated: self.keyboard.is_activated(pitch),
            frequency: et_freq(pitch, self.tuning_a4),
            just_ratio: just_ratio(iv.distance(), self.just_flavor),
            ratios: IntervalRatios::for_interval(&iv, self.tolerance)?,
        })
    }
}

impl Dispatcher for TonalEngine {
    fn dispatch(&mut self, action: &TonalAction) -> Result<Vec<Notification>, TonalError> {
        self.apply(action)
    }
}
