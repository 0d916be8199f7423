use serde::{Deserialize, Serialize};

use crate::error::{AdvisorError, AdvisorResult};

/// Market-wide demand boundaries, computed offline by the analysis pipeline.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DemandThresholds {
    /// Average predicted trips across the market.
    pub average_demand: f64,
    /// Boundary above which demand counts as high.
    pub high_demand: f64,
}

impl DemandThresholds {
    /// The classification tiers assume `average_demand <= high_demand`.
    pub fn validate(&self) -> AdvisorResult<()> {
        if self.average_demand > self.high_demand {
            return Err(AdvisorError::InvalidThresholds {
                average_demand: self.average_demand,
                high_demand: self.high_demand,
            });
        }
        Ok(())
    }
}
