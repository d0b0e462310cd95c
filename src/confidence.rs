// ===== sweepcore/src/confidence.rs =====
//! Online calibration tracker: a Beta posterior over "was the last
//! prediction right". Starts from the uninformative (1, 1) prior and only
//! ever accumulates weight, so the mean is always defined.

use crate::error::{SwResult, SweepError};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BetaConfidence {
    success_weight: f64,
    failure_weight: f64,
    threshold: Option<f64>,
}

impl Default for BetaConfidence {
    fn default() -> Self {
        Self::new()
    }
}

impl BetaConfidence {
    pub fn new() -> Self {
        Self {
            success_weight: 1.0,
            failure_weight: 1.0,
            threshold: None,
        }
    }

    /// Hard update: add `magnitude` to the matching weight. `magnitude` is
    /// a graded outcome quality in [0, 1].
    pub fn record(&mut self, success: bool, magnitude: f64) -> SwResult<()> {
        validate_unit("magnitude", magnitude)?;
        if success {
            self.success_weight += magnitude;
        } else {
            self.failure_weight += magnitude;
        }
        Ok(())
    }

    /// Soft update from a predicted hazard probability `p` and the realized
    /// truth: the probability mass the prediction put on what actually
    /// happened goes to the success weight, the rest to the failure weight.
    pub fn record_soft(&mut self, p: f64, realized_hazard: bool) -> SwResult<()> {
        validate_unit("probability", p)?;
        let on_outcome = if realized_hazard { p } else { 1.0 - p };
        self.success_weight += on_outcome;
        self.failure_weight += 1.0 - on_outcome;
        Ok(())
    }

    pub fn mean(&self) -> f64 {
        let total = self.success_weight + self.failure_weight;
        if total == 0.0 {
            return 0.0;
        }
        self.success_weight / total
    }

    pub fn variance(&self) -> f64 {
        let total = self.success_weight + self.failure_weight;
        if total == 0.0 {
            return 0.0;
        }
        (self.success_weight * self.failure_weight) / (total * total * (total + 1.0))
    }

    pub fn set_threshold(&mut self, tau: f64) -> SwResult<()> {
        validate_unit("threshold", tau)?;
        self.threshold = Some(tau);
        Ok(())
    }

    pub fn threshold(&self) -> Option<f64> {
        self.threshold
    }

    pub fn success_weight(&self) -> f64 {
        self.success_weight
    }

    pub fn failure_weight(&self) -> f64 {
        self.failure_weight
    }

    /// Back to the uninformative prior. Only ever done on explicit request.
    pub fn reset(&mut self) {
        self.success_weight = 1.0;
        self.failure_weight = 1.0;
        self.threshold = None;
    }
}

fn validate_unit(name: &str, value: f64) -> SwResult<()> {
    if !(0.0..=1.0).contains(&value) {
        return Err(SweepError::Validation(format!(
            "{} {} outside [0, 1]",
            name, value
        )));
    }
    Ok(())
}
