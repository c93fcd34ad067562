use clap::Parser;
use gridbot::{
    analyze, ActionProgram, Direction, EngineConfig, EventLog, EventSink, Level, LevelCatalog,
    LevelLoader, NullSink, Position, ProgramLoader, RobotError, RunEngine, DEFAULT_MAX_CALL_DEPTH,
};
use std::error::Error;
use std::path::Path;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Runs a robot action program against a level and reports whether it is solved.
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None, arg_required_else_help = true)]
#[clap(after_help = "EXAMPLES:
  gridbot --program algos/level-1.txt
  gridbot --program my-algo.txt --level my-level.json --json")]
struct Cli {
    /// The action program file to execute
    #[clap(short, long)]
    program: String,

    /// A level JSON file. Defaults to the built-in level named on the program's first line.
    #[clap(short, long)]
    level: Option<String>,

    /// Print the events as JSON instead of text
    #[clap(long)]
    json: bool,

    /// Print only the verdict, not each event
    #[clap(short, long)]
    quiet: bool,

    /// Reject recursive or dead subroutines before running
    #[clap(long)]
    strict: bool,

    /// Maximum nesting of subroutine invocations
    #[clap(long, default_value_t = DEFAULT_MAX_CALL_DEPTH)]
    max_depth: usize,
}

/// Prints each event as it happens.
struct Printer {
    step: usize,
}

impl EventSink for Printer {
    fn on_action(&mut self) {
        self.step += 1;
    }

    fn on_turn(&mut self, new: Direction, old: Direction) {
        println!("{:>4}  turn {} -> {}", self.step + 1, old, new);
    }

    fn on_move(&mut self, new: Position, old: Position) {
        println!("{:>4}  move {} -> {}", self.step + 1, old, new);
    }

    fn on_use_switch(&mut self, pos: Position) {
        println!("{:>4}  switch {}", self.step + 1, pos);
    }

    // The verdict line is printed by `run`.
    fn on_result(&mut self, _success: bool) {}
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match run(&cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(2)
        }
    }
}

fn run(cli: &Cli) -> Result<bool, Box<dyn Error>> {
    let program = ProgramLoader::load_program(Path::new(&cli.program))?;

    if cli.strict {
        analyze(&program)?;
    }

    let level = load_level(cli, &program)?;
    let config = EngineConfig::default().with_max_call_depth(cli.max_depth);

    let success = if cli.json {
        let mut log = EventLog::new();
        let result = RunEngine::with_config(&level, &program, &mut log, config).exec();
        println!("{}", serde_json::to_string_pretty(log.events())?);
        result?
    } else if cli.quiet {
        RunEngine::with_config(&level, &program, NullSink, config).exec()?
    } else {
        RunEngine::with_config(&level, &program, Printer { step: 0 }, config).exec()?
    };

    if !cli.json {
        let verdict = if success { "solved" } else { "not solved" };
        println!("{}: {}", level.name(), verdict);
    }

    Ok(success)
}

fn load_level(cli: &Cli, program: &ActionProgram) -> Result<Level, RobotError> {
    match &cli.level {
        Some(path) => LevelLoader::load_level(Path::new(path)),
        None => LevelCatalog::level_for(program),
    }
}
