//! Line commands typed at the prompt.

use tonal_types::{Mode, OctaveStep, Pitch, TonalAction};

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Action(TonalAction),
    /// Print the fraction for a ratio.
    Ratio(f64),
    /// Print interval details for a pitch.
    Describe(Pitch),
    State,
    Help,
    Quit,
}

pub const HELP: &str = "\
commands:
  tonic <note>          select tonic (60 or C4)
  mode <0-11>           select mode
  up | down             shift octave
  link on|off           direction follows mode bias
  auto on|off           tonic and mode rotate together
  on <note> [velocity]  activate a pitch
  off <note>            deactivate a pitch
  panic                 deactivate everything
  ratio <x>             approximate a ratio as a fraction
  describe <note>       interval details relative to the tonic
  state                 print the current state
  quit";

pub fn parse(line: &str) -> Result<Command, String> {
    let mut words = line.split_whitespace();
    let head = words.next().ok_or_else(|| "empty command".to_string())?;
    let args: Vec<&str> = words.collect();
    let arg = |i: usize| {
        args.get(i)
            .copied()
            .ok_or_else(|| format!("{}: missing argument", head))
    };

    let command = match head {
        "tonic" => Command::Action(TonalAction::SelectTonic(parse_pitch(arg(0)?)?)),
        "mode" => {
            let index: i32 = arg(0)?
                .parse()
                .map_err(|_| format!("not a mode index: {}", args[0]))?;
            Command::Action(TonalAction::SelectMode(
                Mode::new(index).map_err(|e| e.to_string())?,
            ))
        }
        "up" => Command::Action(TonalAction::ShiftOctave(OctaveStep::Up)),
        "down" => Command::Action(TonalAction::ShiftOctave(OctaveStep::Down)),
        "link" => Command::Action(TonalAction::ToggleLinkage(parse_switch(arg(0)?)?)),
        "auto" => Command::Action(TonalAction::ToggleAutoModeTonic(parse_switch(arg(0)?)?)),
        "on" => {
            let pitch = parse_pitch(arg(0)?)?;
            let velocity = match args.get(1) {
                Some(v) => v
                    .parse::<u8>()
                    .ok()
                    .filter(|v| *v <= 127)
                    .ok_or_else(|| format!("not a velocity: {}", v))?,
                None => 100,
            };
            Command::Action(TonalAction::ActivatePitch { pitch, velocity })
        }
        "off" => Command::Action(TonalAction::DeactivatePitch(parse_pitch(arg(0)?)?)),
        "panic" => Command::Action(TonalAction::DeactivateAll),
        "ratio" => Command::Ratio(parse_ratio(arg(0)?)?),
        "describe" => Command::Describe(parse_pitch(arg(0)?)?),
        "state" => Command::State,
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => return Err(format!("unknown command: {}", other)),
    };
    Ok(command)
}

fn parse_pitch(s: &str) -> Result<Pitch, String> {
    match s.parse::<i32>() {
        Ok(n) => Pitch::new(n).map_err(|e| e.to_string()),
        Err(_) => Pitch::from_name(s).ok_or_else(|| format!("not a pitch: {}", s)),
    }
}

fn parse_switch(s: &str) -> Result<bool, String> {
    match s {
        "on" | "true" | "1" => Ok(true),
        "off" | "false" | "0" => Ok(false),
        other => Err(format!("expected on/off, got {}", other)),
    }
}

/// `1.5` or `3/2`.
fn parse_ratio(s: &str) -> Result<f64, String> {
    let bad = || format!("not a ratio: {}", s);
    match s.split_once('/') {
        Some((n, d)) => {
            let n: f64 = n.parse().map_err(|_| bad())?;
            let d: f64 = d.parse().map_err(|_| bad())?;
            Ok(n / d)
        }
        None => s.parse().map_err(|_| bad()),
    }
}
