mod command;

use std::fs::File;
use std::io::{self, BufRead, Write};

use tonal_core::action_log::{default_log_path, replay_action_log, ActionLog};
use tonal_core::config::Config;
use tonal_core::TonalEngine;
use tonal_types::{approximate, Dispatcher, OctaveStep, TonalAction, TonalState};

use command::Command;

fn init_logging(verbose: bool) {
    use simplelog::{LevelFilter, WriteLogger};

    let log_level = if verbose { LevelFilter::Debug } else { LevelFilter::Warn };

    let log_path = dirs::config_dir()
        .unwrap_or_else(|| std::path::PathBuf::from("."))
        .join("tonal")
        .join("tonal.log");

    if let Some(parent) = log_path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }

    let log_file = match File::create(&log_path) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("cannot create log file {}: {}", log_path.display(), e);
            return;
        }
    };

    if WriteLogger::init(log_level, simplelog::Config::default(), log_file).is_ok() {
        log::info!("tonal starting (log level: {:?})", log_level);
    }
}

fn print_state(state: &TonalState, out: &mut impl Write) -> io::Result<()> {
    writeln!(
        out,
        "tonic {} ({})  mode {}  {}  octave shift {:+}  [auto {} / link {}]  can shift: {}{}",
        state.tonic,
        state.tonic.note(),
        state.mode,
        state.direction.name(),
        state.octave_shift,
        if state.auto_mode_tonic { "on" } else { "off" },
        if state.direction_linkage { "on" } else { "off" },
        if state.can_shift_octave(OctaveStep::Up) { "up " } else { "" },
        if state.can_shift_octave(OctaveStep::Down) { "down" } else { "" },
    )
}

fn run_action(
    dispatcher: &mut dyn Dispatcher,
    action: &TonalAction,
    out: &mut impl Write,
) -> io::Result<()> {
    if let Err(e) = dispatcher.dispatch(action) {
        writeln!(out, "rejected: {}", e)?;
    }
    Ok(())
}

fn main() -> io::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let verbose = args.iter().any(|a| a == "--verbose" || a == "-v");
    let record = args.iter().any(|a| a == "--record");
    let resume = args.iter().any(|a| a == "--resume");
    init_logging(verbose);

    let config = Config::load();
    let mut engine = TonalEngine::from_config(&config);

    let log_path = default_log_path();
    let mut resumed = false;
    if resume && log_path.exists() {
        match replay_action_log(&log_path, config.initial_state()) {
            Ok(state) => {
                engine = TonalEngine::from_config(&config).with_state(state);
                resumed = true;
            }
            Err(e) => log::warn!("could not replay {}: {}", log_path.display(), e),
        }
    }
    if record {
        match ActionLog::open(&log_path, resumed) {
            Ok(log) => engine = engine.with_action_log(log),
            Err(e) => log::warn!("could not open action log {}: {}", log_path.display(), e),
        }
    }

    let notifications = engine.subscribe();
    let stdin = io::stdin();
    let mut out = io::stdout();
    print_state(engine.state(), &mut out)?;

    for line in stdin.lock().lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        match command::parse(&line) {
            Ok(Command::Action(action)) => {
                run_action(&mut engine, &action, &mut out)?;
                for n in notifications.try_iter() {
                    writeln!(out, "  {}", n)?;
                }
            }
            Ok(Command::Ratio(x)) => match approximate(x, engine.tolerance()) {
                Ok(a) if a.is_converged() => writeln!(out, "{} ≈ {}", x, a.fraction())?,
                Ok(a) => writeln!(out, "{} ≈ {} (did not converge)", x, a.fraction())?,
                Err(e) => writeln!(out, "error: {}", e)?,
            },
            Ok(Command::Describe(pitch)) => match engine.describe(pitch) {
                Ok(info) => writeln!(
                    out,
                    "{}: {:+} semitones, class {} {:?}{}, {:.2} Hz, ratio {} (period {})",
                    info.pitch,
                    info.distance,
                    info.class,
                    info.consonance,
                    if info.in_mode { ", in mode" } else { "" },
                    info.frequency,
                    info.ratios.frequency_fraction.fraction(),
                    info.ratios.period_fraction,
                )?,
                Err(e) => writeln!(out, "error: {}", e)?,
            },
            Ok(Command::State) => print_state(engine.state(), &mut out)?,
            Ok(Command::Help) => writeln!(out, "{}", command::HELP)?,
            Ok(Command::Quit) => break,
            Err(e) => writeln!(out, "{}", e)?,
        }
    }

    Ok(())
}
