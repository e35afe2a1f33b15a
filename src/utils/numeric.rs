//! 上游字段类型很松散（NULL、非法值都有可能），统一在这里转成数字。
//! 这里的转换和求和都不会失败，也不会溢出。

/// 缺失、NaN、无穷都按 0 处理
pub fn to_number(value: Option<f64>) -> f64 {
    match value {
        Some(v) if v.is_finite() => v,
        _ => 0.0,
    }
}

/// 单个计数字段（连胜）取整，超出 i64 范围时饱和
pub fn to_integer(value: Option<f64>) -> i64 {
    to_number(value).trunc() as i64
}

/// 先按原始数值求和，最后只取整一次；超出 i64 范围时饱和
pub fn sum_to_integer<I>(values: I) -> i64
where
    I: IntoIterator<Item = Option<f64>>,
{
    let total: f64 = values.into_iter().map(to_number).sum();
    // `as` 转换本身饱和，NaN 得 0
    total.round() as i64
}

/// 整数合计，溢出时饱和
pub fn saturating_total<I>(values: I) -> i64
where
    I: IntoIterator<Item = i64>,
{
    values.into_iter().fold(0, i64::saturating_add)
}

pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

pub fn average(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sums_raw_values_before_rounding() {
        assert_eq!(sum_to_integer([Some(0.5), Some(0.5)]), 1);
        assert_eq!(sum_to_integer([Some(0.6), Some(0.6)]), 1);
        assert_eq!(sum_to_integer([Some(0.4), None, Some(f64::NAN), Some(0.4)]), 1);
        assert_eq!(sum_to_integer(Vec::<Option<f64>>::new()), 0);
    }

    #[test]
    fn huge_values_saturate_instead_of_overflowing() {
        assert_eq!(sum_to_integer([Some(9.0e18), Some(9.0e18)]), i64::MAX);
        assert_eq!(sum_to_integer([Some(f64::MAX), Some(f64::MAX)]), i64::MAX);
        assert_eq!(sum_to_integer([Some(-9.0e18), Some(-9.0e18)]), i64::MIN);
        assert_eq!(saturating_total([i64::MAX, 1, 2]), i64::MAX);
        assert_eq!(saturating_total([3, 4]), 7);
    }

    #[test]
    fn coercion_never_fails() {
        assert_eq!(to_number(None), 0.0);
        assert_eq!(to_number(Some(f64::NAN)), 0.0);
        assert_eq!(to_number(Some(f64::INFINITY)), 0.0);
        assert_eq!(to_integer(Some(99.9)), 99);
        assert_eq!(round1(84.96), 85.0);
        assert_eq!(average(&[]), 0.0);
        assert_eq!(average(&[80.0, 90.0]), 85.0);
    }
}
