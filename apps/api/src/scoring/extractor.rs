//! Skill extraction: which vocabulary phrases occur in a text as whole words/phrases.

use std::collections::BTreeSet;
use std::sync::Arc;

use crate::scoring::vocabulary::VocabularyStore;

/// Skill phrases found in one document. Sorted so responses are stable.
pub type SkillSet = BTreeSet<String>;

#[derive(Debug, Clone)]
pub struct SkillExtractor {
    vocabulary: Arc<VocabularyStore>,
}

impl SkillExtractor {
    pub fn new(vocabulary: Arc<VocabularyStore>) -> Self {
        Self { vocabulary }
    }

    /// Lowercases `text` once and tests every precompiled phrase matcher against it.
    /// Empty text yields an empty set.
    pub fn extract(&self, text: &str) -> SkillSet {
        if text.trim().is_empty() {
            return SkillSet::new();
        }
        let text = text.to_lowercase();
        self.vocabulary
            .matchers()
            .iter()
            .filter(|m| m.is_match(&text))
            .map(|m| m.phrase.clone())
            .collect()
    }
}
