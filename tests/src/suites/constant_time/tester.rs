// src/suites/constant_time/tester.rs
use statrs::distribution::{ContinuousCDF, StudentsT};
use std::hint::black_box;
use std::time::Instant;

use super::config::TestConfig;

#[derive(Debug, thiserror::Error)]
pub enum TimingError {
    #[error("not enough samples after outlier removal: {remaining} left")]
    TooFewSamples { remaining: usize },

    #[error("timer resolution too coarse: mean sample time is zero")]
    ZeroMean,
}

// Results of comparing two timing distributions
#[derive(Debug)]
pub struct TimingAnalysis {
    pub mean_a: f64,
    pub mean_b: f64,
    pub std_dev_a: f64,
    pub std_dev_b: f64,
    pub mean_ratio: f64,
    pub t_statistic: f64,
    pub degrees_of_freedom: f64,
    pub p_value: f64,
    pub combined_score: f64,
    pub is_constant_time: bool,
}

impl TimingAnalysis {
    pub fn report(&self, name: &str) -> String {
        format!(
            "{} timing analysis:\n  Mean times: {:.2} ns vs {:.2} ns\n  Mean ratio: {:.3}\n  \
             t-statistic: {:.3} (df {:.1}, p {:.4})\n  Combined score: {:.3}\n  \
             Relative std dev: {:.3} / {:.3}",
            name,
            self.mean_a,
            self.mean_b,
            self.mean_ratio,
            self.t_statistic,
            self.degrees_of_freedom,
            self.p_value,
            self.combined_score,
            self.std_dev_a / self.mean_a,
            self.std_dev_b / self.mean_b,
        )
    }
}

pub struct TimingTester {
    pub num_samples: usize,
    pub num_iterations: usize,
}

impl TimingTester {
    pub fn new(num_samples: usize, num_iterations: usize) -> Self {
        Self {
            num_samples,
            num_iterations,
        }
    }

    pub fn from_config(config: &TestConfig) -> Self {
        Self::new(config.num_samples, config.num_iterations)
    }

    /// Time `f` over the batch of `inputs`, once per sample
    ///
    /// Each sample is the average time of one pass over the batch, in
    /// nanoseconds.
    pub fn measure_batch<T: Copy, R, F>(&self, inputs: &[T], mut f: F) -> Vec<u128>
    where
        F: FnMut(T) -> R,
    {
        let mut times = Vec::with_capacity(self.num_samples);
        for _ in 0..self.num_samples {
            let start = Instant::now();
            for _ in 0..self.num_iterations {
                for &input in inputs {
                    black_box(f(black_box(input)));
                }
            }
            let elapsed = start.elapsed().as_nanos();
            times.push(elapsed / self.num_iterations as u128);
        }
        times
    }

    pub fn warm_up<T: Copy, R, F>(&self, rounds: usize, inputs: &[T], mut f: F)
    where
        F: FnMut(T) -> R,
    {
        for _ in 0..rounds {
            for &input in inputs {
                black_box(f(black_box(input)));
            }
        }
    }

    pub fn mean(times: &[u128]) -> f64 {
        let sum: u128 = times.iter().sum();
        sum as f64 / times.len() as f64
    }

    pub fn variance(times: &[u128], mean: f64) -> f64 {
        let ss: f64 = times
            .iter()
            .map(|&t| {
                let d = t as f64 - mean;
                d * d
            })
            .sum();
        ss / (times.len() as f64 - 1.0)
    }

    // Remove outliers using the IQR method
    pub fn remove_outliers(times: &[u128]) -> Vec<u128> {
        if times.len() < 4 {
            return times.to_vec();
        }

        let mut sorted = times.to_vec();
        sorted.sort_unstable();

        let q1 = sorted[sorted.len() / 4] as f64;
        let q3 = sorted[sorted.len() * 3 / 4] as f64;
        let iqr = q3 - q1;
        let lower_bound = q1 - 1.5 * iqr;
        let upper_bound = q3 + 1.5 * iqr;

        times
            .iter()
            .filter(|&&t| (t as f64) >= lower_bound && (t as f64) <= upper_bound)
            .copied()
            .collect()
    }

    // Welch's t-statistic and Welch-Satterthwaite degrees of freedom
    fn welch(times_a: &[u128], times_b: &[u128]) -> (f64, f64) {
        let mean_a = Self::mean(times_a);
        let mean_b = Self::mean(times_b);
        let term_a = Self::variance(times_a, mean_a) / times_a.len() as f64;
        let term_b = Self::variance(times_b, mean_b) / times_b.len() as f64;

        let t = (mean_a - mean_b).abs() / (term_a + term_b).sqrt();
        let df = (term_a + term_b).powi(2)
            / (term_a.powi(2) / (times_a.len() as f64 - 1.0)
                + term_b.powi(2) / (times_b.len() as f64 - 1.0));
        (t, df)
    }

    pub fn p_value(t_stat: f64, df: f64) -> f64 {
        if !t_stat.is_finite() {
            // Zero variance in both samples: identical when the means match.
            return if t_stat.is_nan() { 1.0 } else { 0.0 };
        }
        if df < 1.0 || !df.is_finite() {
            return 1.0;
        }
        match StudentsT::new(0.0, 1.0, df) {
            Ok(dist) => (2.0 * (1.0 - dist.cdf(t_stat.abs()))).clamp(0.0, 1.0),
            Err(_) => 1.0,
        }
    }

    // Combined score weighting the mean ratio, the t-statistic and noise
    pub fn combined_score(mean_ratio: f64, t_stat: f64, rel_std_dev_a: f64, rel_std_dev_b: f64) -> f64 {
        let max_rel_std_dev = f64::max(rel_std_dev_a, rel_std_dev_b);
        let t_stat = if t_stat.is_finite() { t_stat } else { 0.0 };

        let score = 1.0
            + (mean_ratio - 1.0) * 0.5
            + (t_stat / 10.0) * 0.2
            + max_rel_std_dev * 0.3;

        if score.is_nan() || score.is_infinite() || score < 1.0 {
            mean_ratio
        } else {
            score
        }
    }

    pub fn analyze_constant_time(
        &self,
        times_a: &[u128],
        times_b: &[u128],
        config: &TestConfig,
    ) -> Result<TimingAnalysis, TimingError> {
        let clean_a = Self::remove_outliers(times_a);
        let clean_b = Self::remove_outliers(times_b);

        let remaining = clean_a.len().min(clean_b.len());
        if remaining < 2 {
            return Err(TimingError::TooFewSamples { remaining });
        }

        let mean_a = Self::mean(&clean_a);
        let mean_b = Self::mean(&clean_b);
        if mean_a == 0.0 || mean_b == 0.0 {
            return Err(TimingError::ZeroMean);
        }
        let std_dev_a = Self::variance(&clean_a, mean_a).sqrt();
        let std_dev_b = Self::variance(&clean_b, mean_b).sqrt();

        let mean_ratio = if mean_a > mean_b {
            mean_a / mean_b
        } else {
            mean_b / mean_a
        };

        let (t_stat, df) = Self::welch(&clean_a, &clean_b);
        let p_value = Self::p_value(t_stat, df);
        let combined_score =
            Self::combined_score(mean_ratio, t_stat, std_dev_a / mean_a, std_dev_b / mean_b);

        Ok(TimingAnalysis {
            mean_a,
            mean_b,
            std_dev_a,
            std_dev_b,
            mean_ratio,
            t_statistic: t_stat,
            degrees_of_freedom: df,
            p_value,
            combined_score,
            is_constant_time: mean_ratio <= config.mean_ratio_max
                && combined_score <= config.combined_score_threshold,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remove_outliers_drops_spike() {
        let times = [100u128, 101, 99, 100, 102, 98, 100, 5000];
        let clean = TimingTester::remove_outliers(&times);
        assert!(!clean.contains(&5000));
        assert_eq!(clean.len(), 7);
    }

    #[test]
    fn test_identical_distributions_pass() {
        let tester = TimingTester::new(8, 1);
        let a = [100u128, 102, 98, 101, 99, 100, 103, 97];
        let b = [101u128, 99, 100, 102, 98, 100, 97, 103];
        let analysis = tester
            .analyze_constant_time(&a, &b, &TestConfig::default())
            .unwrap();
        assert!(analysis.is_constant_time, "{}", analysis.report("identical"));
        assert!(analysis.p_value > 0.5);
    }

    #[test]
    fn test_divergent_distributions_fail() {
        let tester = TimingTester::new(8, 1);
        let a = [100u128, 102, 98, 101, 99, 100, 103, 97];
        let b = [200u128, 202, 198, 201, 199, 200, 203, 197];
        let analysis = tester
            .analyze_constant_time(&a, &b, &TestConfig::default())
            .unwrap();
        assert!(!analysis.is_constant_time);
        assert!(analysis.mean_ratio > 1.9);
    }

    #[test]
    fn test_zero_mean_rejected() {
        let tester = TimingTester::new(4, 1);
        let zeros = [0u128; 4];
        assert!(matches!(
            tester.analyze_constant_time(&zeros, &zeros, &TestConfig::default()),
            Err(TimingError::ZeroMean)
        ));
    }
}
