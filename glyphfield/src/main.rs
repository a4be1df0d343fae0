/*
Copyright 2020 Anish Jewalikar

Licensed under the Apache License, Version 2.0 (the "License");
you may not use this file except in compliance with the License.
You may obtain a copy of the License at

    http://www.apache.org/licenses/LICENSE-2.0

Unless required by applicable law or agreed to in writing, software
distributed under the License is distributed on an "AS IS" BASIS,
WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
See the License for the specific language governing permissions and
limitations under the License.
*/

//! Reference terminal driver: loads a grid file and steps it one tick
//! at a time under direct keyboard control.

use std::process::ExitCode;

use clap::Parser;
use crossterm::event::{self, Event, KeyCode};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use glyphfield_core::{Engine, Grid, PianoBits};
use log::{error, info, warn};

#[derive(Parser)]
#[command(
    name = "glyphfield",
    about = "Step a grid-based dataflow program one tick at a time"
)]
struct Cli {
    /// Path to the grid file to load.
    grid_file: String,
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    let grid = match Grid::load_file(&cli.grid_file) {
        Ok(grid) => grid,
        Err(err) => {
            warn!("couldn't load {}: {err}", cli.grid_file);
            return ExitCode::from(1);
        }
    };
    info!(
        "loaded {} ({}x{})",
        cli.grid_file,
        grid.width(),
        grid.height()
    );

    let mut engine = Engine::new(grid);
    print_grid(&engine);

    if let Err(err) = run_loop(&mut engine) {
        error!("terminal I/O error: {err}");
        return ExitCode::from(1);
    }
    ExitCode::from(0)
}

/// `q` quits, space advances one tick; any other key is ignored.
fn run_loop(engine: &mut Engine) -> std::io::Result<()> {
    enable_raw_mode()?;
    let result = (|| -> std::io::Result<()> {
        loop {
            match event::read()? {
                Event::Key(key) => match key.code {
                    KeyCode::Char('q') => break,
                    KeyCode::Char(' ') => {
                        engine.tick(PianoBits::NONE);
                        print_grid(engine);
                        print_events(engine);
                    }
                    _ => {}
                },
                _ => {}
            }
        }
        Ok(())
    })();
    disable_raw_mode()?;
    result
}

fn print_grid(engine: &Engine) {
    print!("{}", engine.grid().to_text());
    println!("tick {}", engine.tick_number());
}

fn print_events(engine: &Engine) {
    for event in engine.events().as_slice() {
        println!("{event:?}");
    }
}
