/// Entry point: command-line front end for the solver.

use std::io::{self, Stdout};
use std::path::{Path, PathBuf};
use std::process::exit;

use clap::{Args, Parser, Subcommand};

use pushmo::config::PushmoConfig;
use pushmo::sim::event::SearchEvent;
use pushmo::sim::level::{embedded_pack, load_pack, resolve_path, Pack};
use pushmo::ui::renderer::{Overlay, Renderer};
use pushmo::{Board, Cell, Outcome, Solver};

#[derive(Parser)]
#[command(name = "pushmo", author, version, about = "Pushmo puzzle solver", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Solve one puzzle and print the checkpoints
    Solve(SolveArgs),
    /// List the puzzles in a file or the built-in set
    List {
        /// Puzzle file or pack (`.ppk`); built-in puzzles when omitted
        path: Option<PathBuf>,
    },
}

#[derive(Args)]
struct SolveArgs {
    /// Puzzle file or pack (`.ppk`); built-in puzzles when omitted
    path: Option<PathBuf>,

    /// 1-based puzzle number inside the pack
    #[arg(short, long, default_value_t = 1)]
    level: usize,

    /// Deepest a segment may be pulled out
    #[arg(long)]
    max_depth: Option<u8>,

    /// Give up after this many expansions, 0 = unlimited
    #[arg(long)]
    max_states: Option<usize>,

    /// Print every expansion with its possible locations
    #[arg(short, long)]
    verbose: bool,

    /// Plain output without terminal colors
    #[arg(long)]
    no_color: bool,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();
    let config = PushmoConfig::load();

    let result = match cli.command {
        Command::Solve(args) => run_solve(&config, args),
        Command::List { path } => run_list(&config, path.as_deref()),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        exit(1);
    }
}

type CliResult = Result<(), Box<dyn std::error::Error>>;

fn open_pack(config: &PushmoConfig, path: Option<&Path>) -> Result<Pack, pushmo::sim::level::LevelError> {
    match path {
        Some(p) => load_pack(&resolve_path(p, &config.puzzles_dir)),
        None => Ok(embedded_pack()),
    }
}

fn run_list(config: &PushmoConfig, path: Option<&Path>) -> CliResult {
    let pack = open_pack(config, path)?;
    println!("{}", pack.info.name);
    if !pack.info.author.is_empty() {
        println!("  by {}", pack.info.author);
    }
    if !pack.info.description.is_empty() {
        println!("  {}", pack.info.description);
    }
    for (i, def) in pack.levels.iter().enumerate() {
        let size = def.rows.first().map_or(0, |r| r.chars().count());
        println!("{:>3}. {} ({}x{})", i + 1, def.name, size, def.rows.len());
    }
    Ok(())
}

fn run_solve(config: &PushmoConfig, args: SolveArgs) -> CliResult {
    let pack = open_pack(config, args.path.as_deref())?;
    let def = pack.level(args.level)?;
    let board = def.board()?;

    let mut options = config.solver_options();
    if let Some(depth) = args.max_depth {
        options.max_depth = depth;
    }
    if let Some(limit) = args.max_states {
        options.max_states = (limit > 0).then_some(limit);
    }

    let color = config.display.color && !args.no_color;
    let mut out = Renderer::new(io::stdout(), color);

    out.line(&def.name)?;
    out.draw(&board, Overlay::Labels)?;
    out.line("")?;

    let mut solver = Solver::new(&board, options)?;
    let outcome = if args.verbose {
        let mut trace_err = None;
        let outcome = solver.run_with(|event| {
            if trace_err.is_none() {
                if let Err(e) = trace_event(&mut out, &board, event) {
                    trace_err = Some(e);
                }
            }
        });
        if let Some(e) = trace_err {
            return Err(e.into());
        }
        outcome
    } else {
        solver.run()
    };

    match outcome {
        Outcome::Solved(steps) => {
            if config.display.show_steps {
                for (n, step) in steps.iter().enumerate() {
                    out.line(&format!("-- Move {} --", n + 1))?;
                    out.draw(&board, Overlay::Depths { depths: &step.depths, avatar: step.cell })?;
                    out.line("")?;
                }
            }
            out.line(&format!("Solved in {} steps.", steps.len()))?;
        }
        Outcome::Unsolvable => out.line("Unsolvable.")?,
        Outcome::LimitReached => {
            out.line(&format!("Gave up after {} expansions.", solver.stats().expanded))?
        }
    }
    log::info!("{}", solver.stats());
    Ok(())
}

/// Verbose trace: each expansion with the cells it can reach.
fn trace_event(out: &mut Renderer<Stdout>, board: &Board, event: &SearchEvent) -> io::Result<()> {
    match event {
        SearchEvent::Expanded { moves, depths, entry, reach } => {
            let mut cells: Vec<Cell> = reach.iter().copied().collect();
            cells.sort_unstable();
            let list: Vec<String> = cells.iter().map(|c| c.to_string()).collect();
            out.line(&format!("Move {moves}: {depths} entering at {entry}"))?;
            out.draw(board, Overlay::Depths { depths, avatar: *entry })?;
            out.line(&format!("Possible locations: {}", list.join(" ")))?;
            out.line("")
        }
        SearchEvent::Duplicate { .. } => Ok(()),
        SearchEvent::GoalReached { moves, depths } => {
            out.line(&format!("Goal in sight after move {moves} at {depths}"))
        }
    }
}
