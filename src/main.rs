//! Driver for the rebuild BST: builds a tree from random values, skews it with inserts, then
//! rebalances and prints it.
//!
//! ```bash
//! RUST_LOG=debug cargo run -- --initial 20 --inserts 10 --seed 7
//! ```

use clap::Parser;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rebuild_bst::Tree;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "rebuild_bst", about = "Exercise a BST that rebalances by rebuilding")]
struct Cli {
    /// How many random values in [0, 100) to build the tree from.
    #[arg(long, default_value_t = 20)]
    initial: usize,
    /// How many random values in [100, 200) to insert afterwards.
    #[arg(long, default_value_t = 10)]
    inserts: usize,
    /// Seed for reproducible runs. Seeded from entropy when absent.
    #[arg(long)]
    seed: Option<u64>,
}

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let mut rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let values: Vec<u32> = (0..cli.initial).map(|_| rng.gen_range(0..100)).collect();
    let mut tree = Tree::from_values(values);
    tracing::info!(nodes = tree.len(), balanced = tree.is_balanced(), "built tree");

    let inserts: Vec<u32> = (0..cli.inserts).map(|_| rng.gen_range(100..200)).collect();
    tracing::info!(?inserts, "inserting");
    for value in inserts {
        // Duplicates are logged by the tree and otherwise ignored.
        let _ = tree.insert(value);
    }
    tracing::info!(
        nodes = tree.len(),
        height = tree.height(),
        balanced = tree.is_balanced(),
        "after inserts"
    );

    tree.rebalance();
    tracing::info!(
        height = tree.height(),
        balanced = tree.is_balanced(),
        "after rebalance"
    );

    print!("{tree}");
}
