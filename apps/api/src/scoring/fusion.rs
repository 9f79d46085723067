//! Weighted fusion of the semantic and skill scores.

use anyhow::{bail, Result};

/// Hybrid score weights. The product defaults are 0.6 semantic / 0.4 skill overlap;
/// they can be overridden at startup but never per request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FusionWeights {
    pub semantic: f64,
    pub skill: f64,
}

impl Default for FusionWeights {
    fn default() -> Self {
        Self {
            semantic: 0.6,
            skill: 0.4,
        }
    }
}

impl FusionWeights {
    pub fn new(semantic: f64, skill: f64) -> Result<Self> {
        for (name, w) in [("semantic", semantic), ("skill", skill)] {
            if !w.is_finite() || w < 0.0 {
                bail!("{name} weight must be a finite non-negative number, got {w}");
            }
        }
        Ok(Self { semantic, skill })
    }

    /// final = semantic_weight × semantic + skill_weight × skill_ratio
    pub fn fuse(&self, semantic: f64, skill_ratio: f64) -> f64 {
        self.semantic * semantic + self.skill * skill_ratio
    }
}

/// Converts a 0–1 score to a percentage rounded to two decimals (half away from zero).
pub fn to_percentage(value: f64) -> f64 {
    (value * 100.0 * 100.0).round() / 100.0
}
