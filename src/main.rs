use std::io::{self, Write};

use anyhow::{bail, Context, Result};
use arbor::{
    parse_value, AnimationConfig, AvlTree, RunState, Step, TraversalController, TraversalKind,
    TraversalState, ValueBounds,
};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "arbor", about = "AVL tree engine with step-by-step traversal playback")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Build a tree from values and print it.
    Build {
        /// Values to insert, in order (duplicates are ignored).
        #[arg(allow_negative_numbers = true)]
        values: Vec<String>,
        /// Values to delete after building.
        #[arg(long, allow_negative_numbers = true)]
        delete: Vec<String>,
        /// Updates applied after deletes, written as `old=new`.
        #[arg(long, allow_hyphen_values = true)]
        update: Vec<String>,
    },
    /// Build a tree and play a traversal one step at a time.
    Traverse {
        /// Values to insert, in order.
        #[arg(allow_negative_numbers = true)]
        values: Vec<String>,
        /// Traversal order: in-order, pre-order, post-order or level-order.
        #[arg(long, default_value = "in-order")]
        order: TraversalKind,
        /// Pause between steps in milliseconds.
        #[arg(long, default_value_t = 500)]
        delay_ms: u64,
        /// Pause after this many steps, then resume (the walk restarts).
        #[arg(long)]
        pause_after: Option<usize>,
        /// Log every step at info level.
        #[arg(short, long)]
        verbose: bool,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "arbor=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Build {
            values,
            delete,
            update,
        } => run_build(values, delete, update)?,
        Commands::Traverse {
            values,
            order,
            delay_ms,
            pause_after,
            verbose,
        } => run_traverse(values, order, delay_ms, pause_after, verbose)?,
    }

    Ok(())
}

fn run_build(values: Vec<String>, delete: Vec<String>, update: Vec<String>) -> Result<()> {
    let mut tree = build_tree(&values)?;

    for raw in &delete {
        let value = parse(raw)?;
        if !tree.remove(&value) {
            println!("delete {}: not present", value);
        }
    }

    for raw in &update {
        let (old, new) = raw
            .split_once('=')
            .with_context(|| format!("update '{}' must be written as old=new", raw))?;
        let (old, new) = (parse(old)?, parse(new)?);
        tree.update(&old, new);
    }

    print!("{}", tree);
    let count = tree
        .validate()
        .context("tree failed its invariant check")?;
    println!("nodes={} height={}", count, tree.height());
    Ok(())
}

fn run_traverse(
    values: Vec<String>,
    order: TraversalKind,
    delay_ms: u64,
    pause_after: Option<usize>,
    verbose: bool,
) -> Result<()> {
    let tree = build_tree(&values)?;
    if tree.is_empty() {
        bail!("nothing to traverse: no values given");
    }
    print!("{}", tree);

    let config = AnimationConfig::from_millis(delay_ms).with_verbose(verbose);
    let mut controller = TraversalController::new(config);
    let handle = controller.pause_handle();

    let mut out = io::stdout();
    let mut pending_pause = pause_after;
    let mut observer = |step: &Step<i64>, state: &TraversalState<i64>| {
        let _ = writeln!(
            out,
            "{:>3}  {:<28} visited={:?}",
            step.index + 1,
            step.label,
            state.visited_sequence
        );
        let _ = out.flush();
        if pending_pause == Some(step.index + 1) {
            pending_pause = None;
            handle.request();
        }
    };

    controller.start(order, tree.root())?;
    let mut state = controller.run(&mut observer)?;

    if state == RunState::Paused {
        println!("-- paused; resuming restarts the {} walk from the first node", order);
        controller.resume(tree.root())?;
        state = controller.run(&mut observer)?;
    }

    println!(
        "{} traversal {}: {:?}",
        order,
        state,
        controller.visited_sequence()
    );
    Ok(())
}

fn build_tree(values: &[String]) -> Result<AvlTree<i64>> {
    let mut tree = AvlTree::new();
    for raw in values {
        tree.insert(parse(raw)?);
    }
    Ok(tree)
}

fn parse(raw: &str) -> Result<i64> {
    parse_value(raw, ValueBounds::default()).with_context(|| format!("invalid value '{}'", raw))
}
