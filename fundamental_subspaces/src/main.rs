use std::process;

use anyhow::{Context, Result};
use clap::Parser;
use env_logger::Env;
use fundamental_subspaces::real_matrix::DEFAULT_ZERO_TOLERANCE;
use fundamental_subspaces::subspaces::params::DEFAULT_RANK_TOLERANCE;
use fundamental_subspaces::subspaces::{ReductionParams, Strategy, Subspace};
use fundamental_subspaces::Matrix;
use strum::IntoEnumIterator;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long)]
    pub rows: usize,

    #[arg(short, long)]
    pub cols: usize,

    /// Matrix entries in row-major order, comma separated
    #[arg(short, long, value_delimiter = ',', allow_hyphen_values = true)]
    pub values: Vec<f64>,

    #[arg(short, long, default_value_t = Strategy::Rref)]
    pub strategy: Strategy,

    #[arg(long, default_value_t = DEFAULT_ZERO_TOLERANCE)]
    pub zero_tolerance: f64,

    #[arg(long, default_value_t = DEFAULT_RANK_TOLERANCE)]
    pub rank_tolerance: f64,
}

fn run(args: &Args) -> Result<()> {
    let a = Matrix::from_flat(args.rows, args.cols, &args.values)
        .context("reshaping matrix values")?;
    let params = ReductionParams::new(args.zero_tolerance, args.rank_tolerance);
    let subspaces = args
        .strategy
        .extractor(params)
        .extract(&a)
        .with_context(|| format!("computing subspaces with {}", args.strategy))?;

    log::info!("Matrix rank: {}", subspaces.rank);
    for subspace in Subspace::iter() {
        let basis = subspaces.basis(subspace);
        if basis.number_of_columns == 0 {
            log::info!("{subspace} basis: empty (zero vector space)");
        } else {
            log::info!("{subspace} basis:\n{basis}");
        }
    }
    log::info!(
        "Validation (A * null space == 0): {}",
        subspaces.validate(&a, 1e-9)
    );
    Ok(())
}

fn main() {
    let args = Args::parse();
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();
    log::debug!("Running with: {args:?}");
    if let Err(err) = run(&args) {
        eprintln!("could not compute subspaces: {err:?}");
        process::exit(1)
    }
}
