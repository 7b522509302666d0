use crate::{Keyboard, Notification, Pitch};

pub(super) fn activate(keyboard: &mut Keyboard, pitch: Pitch, velocity: u8) -> Vec<Notification> {
    if keyboard.activate(pitch, velocity) {
        vec![Notification::PitchActivationChanged {
            pitch,
            activated: true,
            velocity: keyboard.key(pitch).velocity,
        }]
    } else {
        Vec::new()
    }
}

pub(super) fn deactivate(keyboard: &mut Keyboard, pitch: Pitch) -> Vec<Notification> {
    if keyboard.deactivate(pitch) {
        vec![released(pitch)]
    } else {
        Vec::new()
    }
}

pub(super) fn deactivate_all(keyboard: &mut Keyboard) -> Vec<Notification> {
    keyboard.deactivate_all().into_iter().map(released).collect()
}

fn released(pitch: Pitch) -> Notification {
    Notification::PitchActivationChanged {
        pitch,
        activated: false,
        velocity: 0,
    }
}
