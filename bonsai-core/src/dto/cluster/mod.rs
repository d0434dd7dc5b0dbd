//! Clustering and similarity search DTOs

use serde::{Deserialize, Serialize};

use crate::domain::cluster::{ClusterMethod, DistanceMethod, TypingMethod};

/// Request to cluster a set of samples, `POST /cluster/{typing_method}/`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClusterSamples {
    pub sample_ids: Vec<String>,
    pub method: ClusterMethod,
    pub distance: DistanceMethod,
}

impl ClusterSamples {
    pub fn new(sample_ids: Vec<String>) -> Self {
        Self {
            sample_ids,
            method: ClusterMethod::default(),
            distance: DistanceMethod::default(),
        }
    }

    pub fn with_method(mut self, method: ClusterMethod) -> Self {
        self.method = method;
        self
    }

    pub fn with_distance(mut self, distance: DistanceMethod) -> Self {
        self.distance = distance;
        self
    }

    /// At least two samples are needed to build a tree
    pub fn validate(&self) -> Result<(), String> {
        if self.sample_ids.len() < 2 {
            return Err(format!(
                "clustering requires at least 2 samples, got {}",
                self.sample_ids.len()
            ));
        }
        Ok(())
    }
}

/// Request to find samples similar to a reference, `POST /samples/{id}/similar`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FindSimilar {
    pub similarity: f64,
    pub limit: Option<u32>,
    pub cluster: bool,
    pub typing_method: Option<TypingMethod>,
    pub cluster_method: Option<ClusterMethod>,
}

impl FindSimilar {
    pub fn new(similarity: f64) -> Self {
        Self {
            similarity,
            ..Self::default()
        }
    }

    pub fn with_limit(mut self, limit: Option<u32>) -> Self {
        self.limit = limit;
        self
    }

    /// Also cluster the hits once they are found
    pub fn clustered(mut self, typing_method: TypingMethod, cluster_method: ClusterMethod) -> Self {
        self.cluster = true;
        self.typing_method = Some(typing_method);
        self.cluster_method = Some(cluster_method);
        self
    }

    pub fn validate(&self) -> Result<(), String> {
        if !(self.similarity > 0.0 && self.similarity <= 1.0) {
            return Err(format!(
                "similarity must be in (0, 1], got {}",
                self.similarity
            ));
        }
        Ok(())
    }
}

impl Default for FindSimilar {
    fn default() -> Self {
        Self {
            similarity: 0.5,
            limit: Some(10),
            cluster: false,
            typing_method: None,
            cluster_method: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_cluster_request_body() {
        let req = ClusterSamples::new(vec!["s1".to_string(), "s2".to_string()])
            .with_method(ClusterMethod::Average)
            .with_distance(DistanceMethod::Hamming);

        assert!(req.validate().is_ok());
        assert_eq!(
            serde_json::to_value(&req).unwrap(),
            json!({ "sample_ids": ["s1", "s2"], "method": "average", "distance": "hamming" })
        );
    }

    #[test]
    fn test_cluster_request_needs_two_samples() {
        let req = ClusterSamples::new(vec!["s1".to_string()]);
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_find_similar_defaults() {
        let req = FindSimilar::default();
        assert_eq!(req.similarity, 0.5);
        assert_eq!(req.limit, Some(10));
        assert!(!req.cluster);
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_find_similar_clustered() {
        let req = FindSimilar::new(0.8).clustered(TypingMethod::Minhash, ClusterMethod::Single);
        assert!(req.cluster);
        assert_eq!(
            serde_json::to_value(&req).unwrap(),
            json!({
                "similarity": 0.8,
                "limit": 10,
                "cluster": true,
                "typing_method": "minhash",
                "cluster_method": "single"
            })
        );
    }

    #[test]
    fn test_find_similar_rejects_bad_threshold() {
        assert!(FindSimilar::new(0.0).validate().is_err());
        assert!(FindSimilar::new(1.5).validate().is_err());
        assert!(FindSimilar::new(1.0).validate().is_ok());
    }
}
