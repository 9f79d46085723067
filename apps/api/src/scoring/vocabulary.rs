//! Controlled skill vocabulary with one precompiled matcher per phrase.

use regex::Regex;

/// Compiled-in skill phrases, lowercase. Multi-word phrases and symbols are matched literally.
#[rustfmt::skip]
pub const DEFAULT_SKILLS: &[&str] = &[
    // Programming languages
    "c", "c++", "java", "python", "javascript", "typescript",
    // Web
    "html", "css", "sass", "tailwind", "bootstrap",
    "react", "next.js", "vue", "angular",
    // Backend & APIs
    "node.js", "express", "fastapi", "flask",
    "rest api", "graphql",
    // Databases
    "mongodb", "mysql", "postgresql", "sqlite", "redis",
    // DevOps & cloud
    "docker", "kubernetes",
    "aws", "azure", "gcp",
    "ci/cd", "github actions",
    // Version control & tools
    "git", "github", "gitlab", "bitbucket",
    "postman", "swagger",
    // Real-time & messaging
    "socket.io", "websocket", "rabbitmq", "kafka",
    // CS fundamentals
    "data structures", "dsa",
    "algorithms",
    "oops", "dbms", "operating systems", "computer networks",
    // Stacks
    "mern", "mean", "jamstack",
    // Testing
    "unit testing", "integration testing",
    "jest", "mocha", "chai", "selenium",
    // AI / ML / NLP
    "machine learning", "deep learning",
    "nlp", "transformers", "bert", "sbert",
    "scikit-learn", "tensorflow", "pytorch",
    // Data & analytics
    "pandas", "numpy", "matplotlib", "seaborn",
    // Security
    "authentication", "authorization",
    "jwt", "oauth",
    // Other
    "problem solving", "system design",
    "microservices", "mvc architecture",
];

/// A vocabulary phrase and the matcher that finds it in lowercased text.
#[derive(Debug)]
pub struct SkillMatcher {
    pub phrase: String,
    pattern: Regex,
}

impl SkillMatcher {
    fn new(phrase: String) -> Result<Self, regex::Error> {
        // \b would reject "c++ " (no word boundary after '+'), so bound on non-word chars instead.
        let pattern = Regex::new(&format!(r"(?:^|\W){}(?:\W|$)", regex::escape(&phrase)))?;
        Ok(Self { phrase, pattern })
    }

    /// `text` must already be lowercased.
    pub fn is_match(&self, text: &str) -> bool {
        self.pattern.is_match(text)
    }
}

/// Immutable after construction; shared read-only across requests.
#[derive(Debug)]
pub struct VocabularyStore {
    matchers: Vec<SkillMatcher>,
}

impl VocabularyStore {
    /// Builds the store, lowercasing and trimming phrases and skipping blanks.
    pub fn new<I, S>(phrases: I) -> Result<Self, regex::Error>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let matchers = phrases
            .into_iter()
            .map(|p| p.as_ref().trim().to_lowercase())
            .filter(|p| !p.is_empty())
            .map(SkillMatcher::new)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { matchers })
    }

    pub fn with_default_skills() -> Result<Self, regex::Error> {
        Self::new(DEFAULT_SKILLS)
    }

    pub fn matchers(&self) -> &[SkillMatcher] {
        &self.matchers
    }

    #[cfg(test)]
    pub fn contains(&self, phrase: &str) -> bool {
        self.matchers.iter().any(|m| m.phrase == phrase)
    }

    pub fn len(&self) -> usize {
        self.matchers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matchers.is_empty()
    }
}
