// Settings module
// Week/month boundary configuration supplied by the caller

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutSettings {
    /// 0 = Sunday, 1 = Monday, ... 6 = Saturday
    pub first_day_of_week: u8,
    /// Number of week rows rendered in a month view
    pub month_weeks: u8,
    /// Surface track reconciler contract violations as errors instead of
    /// falling back to raw order.
    pub strict_reconciliation: bool,
}

impl Default for LayoutSettings {
    fn default() -> Self {
        Self {
            first_day_of_week: 0, // Sunday
            month_weeks: 6,
            strict_reconciliation: cfg!(debug_assertions),
        }
    }
}

impl LayoutSettings {
    pub fn validate(&self) -> Result<(), String> {
        if self.first_day_of_week > 6 {
            return Err(format!(
                "first_day_of_week must be 0-6, got {}",
                self.first_day_of_week
            ));
        }
        if !(4..=6).contains(&self.month_weeks) {
            return Err(format!(
                "month_weeks must be between 4 and 6, got {}",
                self.month_weeks
            ));
        }
        Ok(())
    }
}
