/*
 * Copyright (c):
 * 2023 zephyrj
 * zephyrj@protonmail.com
 *
 * This file is part of speedx.
 *
 * speedx is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * speedx is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with speedx. If not, see <https://www.gnu.org/licenses/>.
 */

mod animation;
mod demo;
mod error;
mod settings;

use std::env;
use std::path::PathBuf;
use std::process::ExitCode;
use clap::{Parser, Subcommand};
use tracing::{error, info};

use crate::animation::render::{GifRenderer, FRAME_SIZE};
use crate::error::SpeedxError;
use crate::settings::SpeedxSettings;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Settings file to load (defaults to speedx-conf.* in the current directory)
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Feed the configured ratio readings through the auto-shifter
    Shift,
    /// Animate a pair of meshing gears following the ratio readings into a gif
    Animate {
        /// Number of frames to draw
        #[arg(short, long)]
        frames: Option<u32>,

        /// Delay between frames in milliseconds
        #[arg(short, long)]
        interval_ms: Option<u64>,

        /// Gif file to write
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Write the current settings to speedx-conf.toml
    InitConfig,
}

fn init_logging() {
    match env::current_dir() {
        Ok(current_dir) => {
            let file_appender = tracing_appender::rolling::never(current_dir, "speedx.log");
            let subscriber = tracing_subscriber::fmt()
                .with_writer(file_appender)
                .with_ansi(false)
                .compact()
                .finish();
            match tracing::subscriber::set_global_default(subscriber) {
                Ok(_) => {
                    info!("Logging initialised");
                }
                Err(e) => {
                    eprintln!("Failed to init logging. {}", e.to_string());
                }
            }
        }
        Err(e) => {
            eprintln!("Failed to init logging. Couldn't determine current dir {}", e.to_string());
        }
    }
}

fn run(args: Args) -> Result<(), SpeedxError> {
    let settings = match &args.config {
        Some(path) => SpeedxSettings::load_from(path)?,
        None => SpeedxSettings::load()?
    };

    match args.command.unwrap_or(Command::Shift) {
        Command::Shift => {
            info!("Running shift demo");
            for line in demo::run_shift_demo(&settings)? {
                println!("{}", line);
            }
        }
        Command::Animate { frames, interval_ms, output } => {
            let frame_count = frames.unwrap_or(settings.frames);
            let frame_delay = u32::try_from(interval_ms.unwrap_or(settings.frame_interval_ms)).unwrap_or(u32::MAX);
            let output_path = output.unwrap_or_else(|| PathBuf::from(&settings.animation_output));
            let mut renderer = GifRenderer::create(&output_path, FRAME_SIZE, frame_delay)?;
            animation::run_animation(&settings, frame_count, |frame| renderer.draw_frame(frame))?;
            drop(renderer);
            println!("Animation of {} frames written to {}", frame_count, output_path.display());
        }
        Command::InitConfig => {
            settings.write()?;
            println!("Settings written to {}.toml", SpeedxSettings::CONFIG_FILENAME);
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    init_logging();
    let args = Args::parse();
    match run(args) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e.to_string());
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}
