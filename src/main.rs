use anyhow::Result;
use clap::{Parser, ValueEnum};
use link_rank::{page_rank::iterated::DanglingPolicy, Config};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Directory of .html pages
    corpus: PathBuf,

    /// Probability of following a link rather than teleporting
    #[arg(long, default_value_t = link_rank::DAMPING)]
    damping: f64,

    /// Length of the random walk
    #[arg(long, default_value_t = link_rank::SAMPLES)]
    samples: usize,

    /// Largest per-page change at which iteration stops
    #[arg(long, default_value_t = link_rank::TOLERANCE)]
    tolerance: f64,

    #[arg(long, default_value_t = link_rank::MAX_ITERATIONS)]
    max_iterations: usize,

    /// Seed for the random walk
    #[arg(long)]
    seed: Option<u64>,

    /// Where rank held by pages without links goes
    #[arg(long, value_enum, default_value_t = Dangling::Redistribute)]
    dangling: Dangling,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Dangling {
    Redistribute,
    Ignore,
}

impl From<Dangling> for DanglingPolicy {
    fn from(d: Dangling) -> Self {
        match d {
            Dangling::Redistribute => DanglingPolicy::Redistribute,
            Dangling::Ignore => DanglingPolicy::Ignore,
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = Config {
        damping: args.damping,
        samples: args.samples,
        tolerance: args.tolerance,
        max_iterations: args.max_iterations,
        dangling: args.dangling.into(),
        seed: args.seed,
    };

    let corpus = link_rank::crawl(&args.corpus)?;
    let (sampled, iterated) = link_rank::rank(&corpus, &config)?;

    println!("PageRank Results from Sampling (n = {})", config.samples);
    print!("{sampled}");
    println!("PageRank Results from Iteration");
    print!("{iterated}");
    Ok(())
}
