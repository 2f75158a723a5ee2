// Copyright (c) 2026 kanafall developers

mod cell;
mod charset;
mod column;
mod config;
mod field;
mod frame;
mod palette;
mod terminal;

use std::time::{Duration, Instant};

#[cfg(unix)]
use std::thread;

use clap::Parser;
use crossterm::event::{Event, KeyCode, KeyEventKind, KeyModifiers};
use rand::Rng;

#[cfg(unix)]
use signal_hook::consts::{SIGHUP, SIGINT, SIGTERM};
#[cfg(unix)]
use signal_hook::iterator::Signals;

use crate::config::Args;
use crate::field::Field;
use crate::frame::Frame;
use crate::terminal::{restore_terminal_best_effort, Terminal};

fn main() -> std::io::Result<()> {
    std::panic::set_hook(Box::new(|info| {
        restore_terminal_best_effort();
        eprintln!("{}", info);
    }));

    #[cfg(unix)]
    {
        if let Ok(mut signals) = Signals::new([SIGINT, SIGTERM, SIGHUP]) {
            thread::spawn(move || {
                if let Some(sig) = signals.forever().next() {
                    restore_terminal_best_effort();
                    std::process::exit(128 + sig);
                }
            });
        }
    }

    #[cfg(windows)]
    {
        if let Err(e) = ctrlc::set_handler(|| {
            restore_terminal_best_effort();
            std::process::exit(130);
        }) {
            eprintln!("failed to install Ctrl-C handler: {}", e);
        }
    }

    let args = Args::parse();
    let seed = args.seed.unwrap_or_else(|| rand::rng().random());

    let mut term = Terminal::new()?;
    // Size is snapshot once; resize mid-run is unsupported and resize
    // events are ignored below.
    let (width, height) = term.size()?;

    let mut field = Field::new(args.mode, width, height, seed);
    let mut frame = Frame::new(field.width, field.height);

    let interval = args.mode.frame_interval();
    let mut next_frame = Instant::now();

    'rain: loop {
        while Terminal::poll_event(Duration::from_millis(0))? {
            if let Event::Key(k) = Terminal::read_event()? {
                if k.kind != KeyEventKind::Press {
                    continue;
                }
                match (k.code, k.modifiers) {
                    (KeyCode::Esc, _) => break 'rain,
                    (KeyCode::Char('q'), _) => break 'rain,
                    (KeyCode::Char('c'), KeyModifiers::CONTROL) => break 'rain,
                    _ => {}
                }
            }
        }

        let now = Instant::now();
        if now < next_frame {
            let _ = Terminal::poll_event(next_frame - now)?;
            continue;
        }

        field.tick(&mut frame);
        term.draw(&mut frame)?;

        next_frame += interval;
        let now = Instant::now();
        if now > next_frame {
            next_frame = now;
        }
    }

    drop(term);
    Ok(())
}
