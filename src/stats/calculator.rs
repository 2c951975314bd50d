//! Statistics Calculator Module
//! Summary figures quoted in the section notes.

use statrs::statistics::Statistics;

/// How the gender gap is distributed across countries.
#[derive(Debug, Clone, PartialEq)]
pub struct GapSummary {
    pub count: usize,
    /// Countries where women outlive men
    pub female_longer: usize,
    pub mean_gap: f64,
}

impl GapSummary {
    pub fn female_longer_share(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.female_longer as f64 / self.count as f64
        }
    }
}

/// Agreement between actual and predicted life expectancy.
#[derive(Debug, Clone, PartialEq)]
pub struct PredictionAccuracy {
    pub count: usize,
    pub r_squared: f64,
    pub mean_absolute_error: f64,
    /// Mean of predicted - actual; positive means the model overestimates
    pub mean_bias: f64,
}

/// Summary statistics over the country table.
pub struct StatsCalculator;

impl StatsCalculator {
    /// Summarize gap values, skipping missing ones.
    pub fn gap_summary(gaps: &[Option<f64>]) -> Option<GapSummary> {
        let values: Vec<f64> = gaps.iter().flatten().copied().collect();
        if values.is_empty() {
            return None;
        }

        Some(GapSummary {
            count: values.len(),
            female_longer: values.iter().filter(|&&g| g > 0.0).count(),
            mean_gap: values.iter().mean(),
        })
    }

    /// Compare predictions with actual values over the rows that have both.
    pub fn prediction_accuracy(
        actual: &[Option<f64>],
        predicted: &[Option<f64>],
    ) -> Option<PredictionAccuracy> {
        let pairs: Vec<(f64, f64)> = actual
            .iter()
            .zip(predicted)
            .filter_map(|(a, p)| Some(((*a)?, (*p)?)))
            .collect();
        if pairs.is_empty() {
            return None;
        }

        let actual_mean = pairs.iter().map(|(a, _)| *a).mean();
        let ss_tot: f64 = pairs.iter().map(|(a, _)| (a - actual_mean).powi(2)).sum();
        let ss_res: f64 = pairs.iter().map(|(a, p)| (a - p).powi(2)).sum();

        // Constant actual values leave R² undefined; call it perfect only if the
        // residuals vanish too.
        let r_squared = if ss_tot > 0.0 {
            1.0 - ss_res / ss_tot
        } else if ss_res == 0.0 {
            1.0
        } else {
            f64::NAN
        };

        Some(PredictionAccuracy {
            count: pairs.len(),
            r_squared,
            mean_absolute_error: pairs.iter().map(|(a, p)| (p - a).abs()).mean(),
            mean_bias: pairs.iter().map(|(a, p)| p - a).mean(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gap_summary_counts_positive_gaps() {
        let summary =
            StatsCalculator::gap_summary(&[Some(4.0), Some(-1.0), None, Some(6.0)]).unwrap();
        assert_eq!(summary.count, 3);
        assert_eq!(summary.female_longer, 2);
        assert!((summary.mean_gap - 3.0).abs() < 1e-12);
        assert!((summary.female_longer_share() - 2.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn gap_summary_of_nothing_is_none() {
        assert!(StatsCalculator::gap_summary(&[None, None]).is_none());
    }

    #[test]
    fn perfect_prediction_has_unit_r_squared() {
        let actual = [Some(60.0), Some(70.0), Some(80.0)];
        let accuracy = StatsCalculator::prediction_accuracy(&actual, &actual).unwrap();
        assert_eq!(accuracy.r_squared, 1.0);
        assert_eq!(accuracy.mean_absolute_error, 0.0);
        assert_eq!(accuracy.mean_bias, 0.0);
    }

    #[test]
    fn biased_prediction_is_reported() {
        let actual = [Some(60.0), Some(70.0), Some(80.0), Some(75.0)];
        let predicted = [Some(61.0), Some(71.0), Some(81.0), None];
        let accuracy = StatsCalculator::prediction_accuracy(&actual, &predicted).unwrap();
        assert_eq!(accuracy.count, 3);
        assert!((accuracy.mean_bias - 1.0).abs() < 1e-12);
        assert!((accuracy.mean_absolute_error - 1.0).abs() < 1e-12);
        // ss_res = 3, ss_tot = 200
        assert!((accuracy.r_squared - (1.0 - 3.0 / 200.0)).abs() < 1e-12);
    }
}
