//! Brick Wall entry point
//!
//! Headless native runner: the autopilot plays for a fixed number of
//! frames, and finished runs that make the leaderboard ask for a name on
//! stdin.
//!
//! Usage: `brick-wall [settings.json] [frames]`

use std::fmt;
use std::io::{self, BufRead, Write};
use std::num::ParseIntError;

use brick_wall::highscores::LeaderboardEntry;
use brick_wall::platform::{Autopilot, NamePrompt, Renderer, ScoreSink};
use brick_wall::sim::GameState;
use brick_wall::{Session, Settings, SettingsError};

/// Default run length (five minutes at 60 Hz)
const DEFAULT_FRAMES: u64 = 60 * 60 * 5;

/// Why the runner could not start
#[derive(Debug)]
enum RunError {
    Settings(SettingsError),
    /// Frame count argument is not a non-negative integer
    Frames { arg: String, source: ParseIntError },
}

impl fmt::Display for RunError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunError::Settings(e) => write!(f, "{e}"),
            RunError::Frames { arg, source } => {
                write!(f, "invalid frame count `{arg}`: {source}")
            }
        }
    }
}

impl std::error::Error for RunError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RunError::Settings(e) => Some(e),
            RunError::Frames { source, .. } => Some(source),
        }
    }
}

impl From<SettingsError> for RunError {
    fn from(e: SettingsError) -> Self {
        RunError::Settings(e)
    }
}

/// Parse the optional frame count argument
fn parse_frames(arg: Option<String>) -> Result<u64, RunError> {
    match arg {
        Some(arg) => arg
            .trim()
            .parse()
            .map_err(|source| RunError::Frames { arg, source }),
        None => Ok(DEFAULT_FRAMES),
    }
}

/// Reads a name from stdin; EOF or an empty line counts as cancelled
struct StdinPrompt;

impl NamePrompt for StdinPrompt {
    fn ask_name(&mut self) -> Option<String> {
        print!("New high score! Enter your 3 letters: ");
        let _ = io::stdout().flush();
        let mut line = String::new();
        match io::stdin().lock().read_line(&mut line) {
            Ok(0) | Err(_) => None,
            Ok(_) => Some(line),
        }
    }
}

/// Logs score and leaderboard changes
struct LogSink;

impl ScoreSink for LogSink {
    fn score_changed(&mut self, score: u64) {
        log::debug!("Score: {}", score);
    }

    fn leaderboard_changed(&mut self, entries: &[LeaderboardEntry]) {
        print_leaderboard(entries);
    }
}

/// Logs a one-line summary every few seconds of game time
struct LogRenderer {
    frame: u64,
}

impl Renderer for LogRenderer {
    fn draw(&mut self, state: &GameState) {
        self.frame += 1;
        if self.frame.is_multiple_of(600) {
            log::debug!(
                "frame {}: score={} ball=({:.1}, {:.1}) speed={:.2} blocks={}",
                self.frame,
                state.score,
                state.ball.pos.x,
                state.ball.pos.y,
                state.ball.speed(),
                state.grid.alive_count()
            );
        }
    }
}

fn print_leaderboard(entries: &[LeaderboardEntry]) {
    println!("Top scores:");
    if entries.is_empty() {
        println!("  (none)");
    }
    for (i, entry) in entries.iter().enumerate() {
        println!("  {}. {}  {} pts", i + 1, entry.name, entry.score);
    }
}

fn run() -> Result<(), RunError> {
    let mut args = std::env::args().skip(1);
    let settings = match args.next() {
        Some(path) => Settings::load(path)?,
        None => Settings::with_seed(rand::random()),
    };
    let frames = parse_frames(args.next())?;

    let mut session = Session::new(settings);
    let mut input = Autopilot;
    let mut prompt = StdinPrompt;
    let mut sink = LogSink;
    let mut renderer = LogRenderer { frame: 0 };

    for _ in 0..frames {
        session.frame(&mut input, &mut prompt, &mut sink, &mut renderer);
    }

    log::info!(
        "Finished {} frames, {} runs, current score {}",
        frames,
        session.runs(),
        session.state().score
    );
    print_leaderboard(session.leaderboard().top());
    Ok(())
}

fn main() {
    env_logger::init();
    log::info!("Brick Wall (native) starting...");

    if let Err(e) = run() {
        log::error!("{e}");
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
