//! Summary statistics over repeated runs
//!
//! Sample mean, sample standard deviation, and the 95% confidence
//! half-width from the Student t distribution. The t table covers up
//! to 30 degrees of freedom; larger samples use the normal value 1.96.

/// Two-tailed 95% critical values for 1..=30 degrees of freedom.
const T_TABLE_95: [f64; 30] = [
    12.706, 4.303, 3.182, 2.776, 2.571, 2.447, 2.365, 2.306, 2.262, 2.228, 2.201, 2.179, 2.160,
    2.145, 2.131, 2.120, 2.110, 2.101, 2.093, 2.086, 2.080, 2.074, 2.069, 2.064, 2.060, 2.056,
    2.052, 2.048, 2.045, 2.042,
];

pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Sample standard deviation (n - 1 denominator); zero for fewer than
/// two values.
pub fn std_dev(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let m = mean(values);
    let ss: f64 = values.iter().map(|v| (v - m) * (v - m)).sum();
    (ss / (values.len() - 1) as f64).sqrt()
}

/// Half-width of the 95% confidence interval around the sample mean.
pub fn confidence_interval_95(values: &[f64]) -> f64 {
    let n = values.len();
    if n < 2 {
        return 0.0;
    }
    let df = n - 1;
    let t = if df <= T_TABLE_95.len() { T_TABLE_95[df - 1] } else { 1.96 };
    t * std_dev(values) / (n as f64).sqrt()
}
