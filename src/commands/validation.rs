use crate::error::DistributionError;
use crate::models::assumptions::Assumptions;

pub const FULL_DISTRIBUTION: u32 = 100;

/// Enabled channels must share exactly 100 % of the R1 target.
pub fn validate_distribution(assumptions: &Assumptions) -> Result<(), DistributionError> {
    let total = assumptions.total_distribution();

    if total == FULL_DISTRIBUTION {
        Ok(())
    } else {
        Err(DistributionError {
            total,
            delta: total as i64 - FULL_DISTRIBUTION as i64,
        })
    }
}
