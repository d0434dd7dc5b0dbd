//! Cluster command handler

use anyhow::Result;
use bonsai_client::BonsaiClient;
use bonsai_core::domain::cluster::{ClusterMethod, DistanceMethod, TypingMethod};
use bonsai_core::dto::cluster::ClusterSamples;
use bonsai_runner::{CancelToken, JobRunner};
use clap::Args;
use colored::*;

use crate::progress::TerminalObserver;

/// Arguments of `bonsai cluster`
#[derive(Args)]
pub struct ClusterArgs {
    /// Typing result to cluster on (mlst, cgmlst, ska, minhash)
    typing_method: TypingMethod,

    /// Sample to include, repeat for every sample
    #[arg(short, long = "sample", required = true)]
    samples: Vec<String>,

    /// Clustering method (single, complete, average, neighbor_joining)
    #[arg(short, long, default_value = "single")]
    method: ClusterMethod,

    /// Distance method (jaccard, hamming)
    #[arg(short, long, default_value = "jaccard")]
    distance: DistanceMethod,
}

/// Submit a clustering job and print the resulting Newick tree
pub async fn handle_cluster_command(
    args: ClusterArgs,
    runner: &JobRunner<BonsaiClient, TerminalObserver>,
    cancel: &CancelToken,
) -> Result<()> {
    let req = ClusterSamples::new(args.samples)
        .with_method(args.method)
        .with_distance(args.distance);

    let tree = runner.cluster(args.typing_method, req, cancel).await?;

    if tree.is_empty_tree() {
        eprintln!("{}", "Clustering produced an empty tree.".yellow());
    }
    println!("{}", tree);

    Ok(())
}
