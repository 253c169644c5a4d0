/// Tide - terminal music player
use clap::{Parser, Subcommand};
use crossbeam_channel::{select, unbounded, Receiver};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::thread;
use tide_cli::{commands, parse_line, render, CliConfig, Input, SimulatedMedia};
use tide_playback::{format_duration, ControllerEvent, PlayerRuntime};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "tide")]
#[command(about = "Tide Player terminal front end", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play the configured queue interactively
    Play {
        /// Configuration file path
        #[arg(short, long, default_value = "tide.toml", env = "TIDE_CONFIG")]
        config: PathBuf,

        /// Print each snapshot as a JSON line
        #[arg(long)]
        json: bool,
    },
    /// Render a number of seconds as M:SS
    FormatDuration {
        /// Seconds
        #[arg(allow_hyphen_values = true)]
        seconds: f64,
    },
}

fn main() -> anyhow::Result<()> {
    // Initialize tracing (stderr keeps stdout for snapshots)
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tide_cli=info,tide_playback=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Play { config, json } => {
            play(config, json)?;
        }
        Commands::FormatDuration { seconds } => {
            println!("{}", format_duration(seconds));
        }
    }

    Ok(())
}

fn play(config_path: PathBuf, json: bool) -> anyhow::Result<()> {
    let config = CliConfig::load(&config_path)?;
    config.validate()?;

    tracing::info!("Starting Tide Player");
    tracing::info!("Tracks: {}", config.tracks.len());

    let simulation = config.simulation.clone();
    let tracks = config.tracks.clone();
    let runtime = PlayerRuntime::spawn(config.tracks, config.playback, move |events| {
        SimulatedMedia::spawn(events, simulation, &tracks)
    })?;

    let lines = spawn_stdin_reader()?;
    eprintln!("{}", commands::HELP);

    let stdout = io::stdout();
    let mut last_line = String::new();

    loop {
        select! {
            recv(lines) -> line => {
                let Ok(line) = line else {
                    // stdin closed
                    break;
                };
                match parse_line(&line) {
                    Ok(Some(Input::Player(command))) => runtime.send(command)?,
                    Ok(Some(Input::Help)) => eprintln!("{}", commands::HELP),
                    Ok(Some(Input::Quit)) => break,
                    Ok(None) => {}
                    Err(e) => eprintln!("{}", e),
                }
            },
            recv(runtime.events()) -> event => {
                let Ok(event) = event else {
                    tracing::warn!("Playback thread exited");
                    break;
                };
                match event {
                    ControllerEvent::Snapshot(snapshot) => {
                        let output = if json {
                            render::render_json(&snapshot)?
                        } else {
                            render::render_line(&snapshot)
                        };
                        // Text mode only prints when the visible line changes
                        if json || output != last_line {
                            writeln!(stdout.lock(), "{}", output)?;
                            last_line = output;
                        }
                    }
                    ControllerEvent::TrackChanged { track_id, previous_track_id } => {
                        tracing::debug!(%track_id, %previous_track_id, "Track changed");
                    }
                    ControllerEvent::TrackFinished { track_id } => {
                        tracing::debug!(%track_id, "Track finished");
                    }
                }
            },
        }
    }

    runtime.shutdown();
    tracing::info!("Goodbye");
    Ok(())
}

/// Forward stdin lines to a channel; it disconnects at EOF
fn spawn_stdin_reader() -> io::Result<Receiver<String>> {
    let (tx, rx) = unbounded();
    thread::Builder::new()
        .name("tide-stdin".to_string())
        .spawn(move || {
            for line in io::stdin().lock().lines() {
                let Ok(line) = line else { break };
                if tx.send(line).is_err() {
                    break;
                }
            }
        })?;
    Ok(rx)
}
