//! Set-based skill overlap between a résumé and a job description.


use crate::scoring::extractor::SkillSet;

#[derive(Debug, Clone, PartialEq)]
pub struct OverlapScore {
    /// JD skills the résumé also has.
    pub matched: SkillSet,
    /// JD skills the résumé lacks.
    pub missing: SkillSet,
    /// |matched| / |jd|, or exactly 0.0 when the JD has no recognised skills.
    pub ratio: f64,
}

pub struct OverlapScorer;

impl OverlapScorer {
    pub fn score(resume_skills: &SkillSet, jd_skills: &SkillSet) -> OverlapScore {
        let matched: SkillSet = jd_skills.intersection(resume_skills).cloned().collect();
        let missing: SkillSet = jd_skills.difference(resume_skills).cloned().collect();

        let ratio = if jd_skills.is_empty() {
            0.0
        } else {
            matched.len() as f64 / jd_skills.len() as f64
        };

        OverlapScore {
            matched,
            missing,
            ratio,
        }
    }
}
