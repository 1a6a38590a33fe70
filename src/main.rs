use std::io;
use std::panic;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::{Duration, Instant};

use clap::Parser;
use log::{info, LevelFilter};

use snake_pilot::config::{
    theme_by_name, GameConfig, GridSize, Theme, DEFAULT_GRID_HEIGHT, DEFAULT_GRID_WIDTH,
    DEFAULT_TICK_INTERVAL_MS,
};
use snake_pilot::game::{ControlMode, EndReason, Game, GameStatus};
use snake_pilot::input::{poll_input, wait_for_key, GameInput};
use snake_pilot::logger;
use snake_pilot::renderer::{restore_terminal, HeadlessRenderer, Renderer, TuiRenderer};
use snake_pilot::score::{load_high_score, record_high_score};

/// How long one input poll may block inside the render loop.
const INPUT_POLL_INTERVAL: Duration = Duration::from_millis(15);

#[derive(Debug, Parser)]
#[command(version, about = "Self-driving terminal Snake")]
struct Cli {
    /// Board width in cells.
    #[arg(long, default_value_t = DEFAULT_GRID_WIDTH)]
    width: u16,

    /// Board height in cells.
    #[arg(long, default_value_t = DEFAULT_GRID_HEIGHT)]
    height: u16,

    /// Start from a random cell and heading instead of the board center.
    #[arg(long)]
    random_init: bool,

    /// Seed for food placement and random starts; omit for a fresh run.
    #[arg(long)]
    seed: Option<u64>,

    /// Milliseconds between simulation ticks.
    #[arg(long, default_value_t = DEFAULT_TICK_INTERVAL_MS)]
    tick_ms: u64,

    /// Steer with the keyboard instead of the built-in route planner.
    #[arg(long)]
    manual: bool,

    /// Run without a terminal UI; the run plays out at full speed.
    #[arg(long)]
    headless: bool,

    /// Stop a headless run after this many ticks; 0 runs until the game ends.
    #[arg(long, default_value_t = 0)]
    max_ticks: u64,

    /// Color theme name.
    #[arg(long, default_value = "classic")]
    theme: String,

    /// Log file location.
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Log verbosity: off, error, warn, info, debug or trace.
    #[arg(long, default_value = "info", value_parser = parse_level)]
    log_level: LevelFilter,
}

fn parse_level(raw: &str) -> Result<LevelFilter, String> {
    raw.parse()
        .map_err(|_| format!("unknown log level '{raw}'"))
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = GameConfig {
        grid: GridSize {
            width: cli.width,
            height: cli.height,
        },
        random_init: cli.random_init,
        seed: cli.seed,
        tick_interval: Duration::from_millis(cli.tick_ms),
    };
    if let Err(error) = config.validate() {
        eprintln!("{error}");
        return ExitCode::from(2);
    }

    let Some(theme) = theme_by_name(&cli.theme) else {
        eprintln!("unknown theme '{}'", cli.theme);
        return ExitCode::from(2);
    };

    if cli.manual && cli.headless {
        eprintln!("--manual needs a terminal; drop --headless");
        return ExitCode::from(2);
    }

    let log_path = cli.log_file.clone().unwrap_or_else(logger::default_log_path);
    if let Err(error) = logger::init(&log_path, cli.log_level) {
        eprintln!("failed to open log file {}: {error}", log_path.display());
        return ExitCode::from(2);
    }

    let control = if cli.manual {
        ControlMode::Manual
    } else {
        ControlMode::Autopilot
    };

    let result = if cli.headless {
        run_headless(&config, control, cli.max_ticks)
    } else {
        run_tui(&config, control, theme)
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("{error}");
            ExitCode::FAILURE
        }
    }
}

fn run_headless(config: &GameConfig, control: ControlMode, max_ticks: u64) -> io::Result<()> {
    let mut game = Game::new(config, control);
    let mut renderer = HeadlessRenderer;

    while !game.is_over() {
        game.tick();
        renderer.render(&game)?;

        if max_ticks > 0 && game.tick_count >= max_ticks {
            info!("tick budget of {max_ticks} reached, stopping");
            break;
        }
    }

    report_run(&game);
    Ok(())
}

fn run_tui(config: &GameConfig, control: ControlMode, theme: &'static Theme) -> io::Result<()> {
    let best_score = load_high_score(config.grid)?;
    let mut game = Game::new(config, control);

    install_panic_hook();
    let mut renderer = TuiRenderer::new(theme, best_score)?;
    let mut last_tick = Instant::now();

    loop {
        renderer.render(&game)?;

        if let Some(input) = poll_input(INPUT_POLL_INTERVAL)? {
            match input {
                GameInput::Quit => break,
                GameInput::Pause => game.toggle_pause(),
                GameInput::Steer(direction) => game.steer(direction),
            }
        }

        if last_tick.elapsed() >= config.tick_interval {
            game.tick();
            last_tick = Instant::now();
        }

        if game.is_over() {
            renderer.set_best_score(best_score.max(game.snake.score()));
            renderer.render(&game)?;
            wait_for_key()?;
            break;
        }
    }

    drop(renderer);
    report_run(&game);
    Ok(())
}

/// Prints the final summary and records a new best score if one was set.
fn report_run(game: &Game) {
    let score = game.snake.score();
    let outcome = match (game.status, game.end_reason) {
        (GameStatus::Victory, _) => "board cleared",
        (_, Some(EndReason::WallCollision)) => "hit the wall",
        (_, Some(EndReason::BodyCollision)) => "ran into itself",
        (_, Some(EndReason::NoPath)) => "no route to food",
        _ => "stopped",
    };

    println!(
        "{outcome} after {} ticks, score {score}",
        game.tick_count
    );

    match record_high_score(game.snake.bounds(), score) {
        Ok(true) => println!("new best score for this board"),
        Ok(false) => {}
        Err(error) => eprintln!("failed to save high score: {error}"),
    }
}

fn install_panic_hook() {
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |panic_info| {
        let _ = restore_terminal();
        default_hook(panic_info);
    }));
}
