//! Hybrid match pipeline: skill overlap + semantic similarity → one weighted score.

use std::sync::Arc;

use serde::Serialize;
use tracing::info;

use crate::embedding::{Embedder, EmbeddingError};
use crate::scoring::extractor::SkillExtractor;
use crate::scoring::fusion::{to_percentage, FusionWeights};
use crate::scoring::overlap::OverlapScorer;
use crate::scoring::semantic::SemanticScorer;
use crate::scoring::vocabulary::VocabularyStore;

/// Result of one analysis. All percentages are rounded to two decimals.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchResult {
    #[serde(rename = "semantic_match_percentage")]
    pub semantic_percentage: f64,
    #[serde(rename = "skill_match_percentage")]
    pub skill_percentage: f64,
    #[serde(rename = "final_match_percentage")]
    pub final_percentage: f64,
    pub matched_skills: Vec<String>,
    pub missing_skills: Vec<String>,
}

/// Stateless apart from its read-only collaborators; one instance serves all requests.
#[derive(Clone)]
pub struct Analyzer {
    extractor: SkillExtractor,
    semantic: SemanticScorer,
    weights: FusionWeights,
}

impl Analyzer {
    pub fn new(
        vocabulary: Arc<VocabularyStore>,
        embedder: Arc<dyn Embedder>,
        weights: FusionWeights,
    ) -> Self {
        Self {
            extractor: SkillExtractor::new(vocabulary),
            semantic: SemanticScorer::new(embedder),
            weights,
        }
    }

    pub fn embedder_name(&self) -> &'static str {
        self.semantic.embedder_name()
    }

    pub async fn analyze(
        &self,
        resume_text: &str,
        jd_text: &str,
    ) -> Result<MatchResult, EmbeddingError> {
        let resume_skills = self.extractor.extract(resume_text);
        let jd_skills = self.extractor.extract(jd_text);
        let overlap = OverlapScorer::score(&resume_skills, &jd_skills);

        let semantic = self.semantic.score(resume_text, jd_text).await?;
        let final_score = self.weights.fuse(semantic, overlap.ratio);

        let result = MatchResult {
            semantic_percentage: to_percentage(semantic),
            skill_percentage: to_percentage(overlap.ratio),
            final_percentage: to_percentage(final_score),
            matched_skills: overlap.matched.into_iter().collect(),
            missing_skills: overlap.missing.into_iter().collect(),
        };

        info!(
            resume_skills = resume_skills.len(),
            jd_skills = jd_skills.len(),
            matched = result.matched_skills.len(),
            semantic = result.semantic_percentage,
            skill = result.skill_percentage,
            final_score = result.final_percentage,
            "Match analysis complete"
        );

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::embedding::{EmbeddingVector, HashEmbedder};
    use async_trait::async_trait;

    const RESUME_A: &str = "Experienced in python and react, built rest api services";
    const JD_A: &str = "Looking for python developer with react and docker skills";

    fn analyzer_with(embedder: Arc<dyn Embedder>) -> Analyzer {
        Analyzer::new(
            Arc::new(VocabularyStore::with_default_skills().unwrap()),
            embedder,
            FusionWeights::default(),
        )
    }

    fn analyzer() -> Analyzer {
        analyzer_with(Arc::new(HashEmbedder::new(384)))
    }

    /// Always returns the same unit vector, so similarity is exactly 1.0.
    struct ConstantEmbedder;

    #[async_trait]
    impl Embedder for ConstantEmbedder {
        fn name(&self) -> &'static str {
            "constant"
        }

        async fn embed(&self, _text: &str) -> Result<EmbeddingVector, EmbeddingError> {
            Ok(vec![0.6, 0.8])
        }
    }

    #[tokio::test]
    async fn test_scenario_partial_skill_overlap() {
        let result = analyzer().analyze(RESUME_A, JD_A).await.unwrap();

        assert_eq!(result.matched_skills, vec!["python", "react"]);
        assert_eq!(result.missing_skills, vec!["docker"]);
        assert!((result.skill_percentage - 66.67).abs() < 0.01);
        assert!((0.0..=100.0).contains(&result.final_percentage));
    }

    #[tokio::test]
    async fn test_scenario_jd_without_vocabulary_skills() {
        let result = analyzer()
            .analyze(RESUME_A, "We want a friendly person who loves customers")
            .await
            .unwrap();

        assert_eq!(result.skill_percentage, 0.0);
        assert!(result.matched_skills.is_empty());
        assert!(result.missing_skills.is_empty());
    }

    #[tokio::test]
    async fn test_scenario_identical_texts() {
        let result = analyzer().analyze(JD_A, JD_A).await.unwrap();

        assert!((result.semantic_percentage - 100.0).abs() < 0.01);
        assert!((result.skill_percentage - 100.0).abs() < 0.01);
        assert!(result.final_percentage >= result.skill_percentage * 0.4);
    }

    #[tokio::test]
    async fn test_final_is_weighted_sum() {
        let result = analyzer_with(Arc::new(ConstantEmbedder))
            .analyze(RESUME_A, JD_A)
            .await
            .unwrap();

        assert!((result.semantic_percentage - 100.0).abs() < 0.01);
        // 0.6 × 1.0 + 0.4 × 2/3 = 0.8667
        assert!((result.final_percentage - 86.67).abs() < 0.01);
    }

    #[tokio::test]
    async fn test_empty_inputs_score_zero() {
        let result = analyzer().analyze("", "").await.unwrap();
        assert_eq!(result.semantic_percentage, 0.0);
        assert_eq!(result.skill_percentage, 0.0);
        assert_eq!(result.final_percentage, 0.0);
    }

    #[test]
    fn test_match_result_wire_field_names() {
        let result = MatchResult {
            semantic_percentage: 71.23,
            skill_percentage: 50.0,
            final_percentage: 62.74,
            matched_skills: vec!["python".to_string()],
            missing_skills: vec!["docker".to_string()],
        };
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["semantic_match_percentage"], 71.23);
        assert_eq!(json["skill_match_percentage"], 50.0);
        assert_eq!(json["final_match_percentage"], 62.74);
        assert_eq!(json["matched_skills"][0], "python");
        assert_eq!(json["missing_skills"][0], "docker");
    }
}
