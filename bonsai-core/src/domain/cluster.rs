//! Clustering domain types

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Typing result used as the basis for clustering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypingMethod {
    Mlst,
    Cgmlst,
    Ska,
    Minhash,
}

impl TypingMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            TypingMethod::Mlst => "mlst",
            TypingMethod::Cgmlst => "cgmlst",
            TypingMethod::Ska => "ska",
            TypingMethod::Minhash => "minhash",
        }
    }
}

/// Hierarchical clustering method
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClusterMethod {
    #[default]
    Single,
    Complete,
    Average,
    NeighborJoining,
}

impl ClusterMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            ClusterMethod::Single => "single",
            ClusterMethod::Complete => "complete",
            ClusterMethod::Average => "average",
            ClusterMethod::NeighborJoining => "neighbor_joining",
        }
    }
}

/// Method used to compute the distance matrix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DistanceMethod {
    #[default]
    Jaccard,
    Hamming,
}

impl DistanceMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            DistanceMethod::Jaccard => "jaccard",
            DistanceMethod::Hamming => "hamming",
        }
    }
}

macro_rules! impl_str_enum {
    ($ty:ty, $label:literal, [$($variant:expr),+ $(,)?]) => {
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $ty {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let variants = [$($variant),+];
                variants
                    .iter()
                    .find(|v| v.as_str().eq_ignore_ascii_case(s))
                    .copied()
                    .ok_or_else(|| {
                        let valid: Vec<&str> = variants.iter().map(|v| v.as_str()).collect();
                        format!("invalid {} '{}', expected one of: {}", $label, s, valid.join(", "))
                    })
            }
        }
    };
}

impl_str_enum!(
    TypingMethod,
    "typing method",
    [
        TypingMethod::Mlst,
        TypingMethod::Cgmlst,
        TypingMethod::Ska,
        TypingMethod::Minhash,
    ]
);
impl_str_enum!(
    ClusterMethod,
    "cluster method",
    [
        ClusterMethod::Single,
        ClusterMethod::Complete,
        ClusterMethod::Average,
        ClusterMethod::NeighborJoining,
    ]
);
impl_str_enum!(
    DistanceMethod,
    "distance method",
    [DistanceMethod::Jaccard, DistanceMethod::Hamming]
);

/// Clustering result in Newick format
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NewickTree(String);

impl NewickTree {
    pub fn new(tree: impl Into<String>) -> Self {
        Self(tree.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True when the tree holds no samples
    ///
    /// Clustering fewer than two samples yields `()`.
    pub fn is_empty_tree(&self) -> bool {
        let tree = self.0.trim().trim_end_matches(';');
        tree.is_empty() || tree == "()"
    }
}

impl fmt::Display for NewickTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Sample found by a similarity search
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimilarSample {
    pub sample_id: String,
    pub similarity: f64,
}
