//! Similarity search command handler

use anyhow::Result;
use bonsai_client::BonsaiClient;
use bonsai_core::domain::cluster::{ClusterMethod, SimilarSample, TypingMethod};
use bonsai_core::dto::cluster::FindSimilar;
use bonsai_runner::{CancelToken, JobRunner};
use clap::Args;
use colored::*;

use crate::progress::TerminalObserver;

/// Arguments of `bonsai similar`
#[derive(Args)]
pub struct SimilarArgs {
    /// Reference sample ID
    sample_id: String,

    /// Minimum similarity score, between 0 and 1
    #[arg(short, long, default_value_t = 0.5)]
    similarity: f64,

    /// Maximum number of samples to return
    #[arg(short, long, default_value_t = 10)]
    limit: u32,

    /// Return every sample above the similarity threshold
    #[arg(long, conflicts_with = "limit")]
    no_limit: bool,

    /// Cluster the similar samples on this typing result and print a tree
    #[arg(long, value_name = "TYPING_METHOD")]
    cluster: Option<TypingMethod>,

    /// Clustering method used with --cluster
    #[arg(short, long, default_value = "single")]
    method: ClusterMethod,
}

impl SimilarArgs {
    /// Limit sent to the API; `None` asks for every hit
    fn limit(&self) -> Option<u32> {
        (!self.no_limit).then_some(self.limit)
    }
}

/// Submit a similarity search and print the hits, or their tree
pub async fn handle_similar_command(
    args: SimilarArgs,
    runner: &JobRunner<BonsaiClient, TerminalObserver>,
    cancel: &CancelToken,
) -> Result<()> {
    let req = FindSimilar::new(args.similarity).with_limit(args.limit());

    if let Some(typing_method) = args.cluster {
        let req = req.clustered(typing_method, args.method);
        let tree = runner
            .find_similar_and_cluster(&args.sample_id, req, cancel)
            .await?;
        println!("{}", tree);
        return Ok(());
    }

    let hits = runner.find_similar(&args.sample_id, req, cancel).await?;
    print_hits(&args.sample_id, &hits);

    Ok(())
}

fn print_hits(reference: &str, hits: &[SimilarSample]) {
    if hits.is_empty() {
        println!(
            "{}",
            format!("No samples similar to {} found.", reference).yellow()
        );
        return;
    }

    println!(
        "{}",
        format!("Found {} sample(s) similar to {}:", hits.len(), reference).bold()
    );
    println!();
    for hit in hits {
        println!(
            "  {} {:<30} {}",
            "▸".cyan(),
            hit.sample_id,
            format!("{:.3}", hit.similarity).dimmed()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct TestCli {
        #[command(flatten)]
        args: SimilarArgs,
    }

    fn parse(argv: &[&str]) -> Result<SimilarArgs, clap::Error> {
        let argv = std::iter::once("similar").chain(argv.iter().copied());
        TestCli::try_parse_from(argv).map(|cli| cli.args)
    }

    #[test]
    fn test_limit_defaults_to_ten() {
        let args = parse(&["s1"]).unwrap();
        assert_eq!(args.limit(), Some(10));
        assert_eq!(args.similarity, 0.5);
    }

    #[test]
    fn test_explicit_limit() {
        let args = parse(&["s1", "--limit", "25"]).unwrap();
        assert_eq!(args.limit(), Some(25));
    }

    #[test]
    fn test_no_limit_sends_null() {
        let args = parse(&["s1", "--no-limit"]).unwrap();
        assert_eq!(args.limit(), None);

        let req = FindSimilar::new(args.similarity).with_limit(args.limit());
        let body = serde_json::to_value(&req).unwrap();
        assert!(body["limit"].is_null());
    }

    #[test]
    fn test_no_limit_conflicts_with_limit() {
        assert!(parse(&["s1", "--limit", "5", "--no-limit"]).is_err());
    }
}
