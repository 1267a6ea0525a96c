/// Rounds to a fixed number of decimal places (half away from zero).
#[inline]
pub fn round_to(val: f64, decimals: u32) -> f64 {
    if !val.is_finite() {
        return 0.0;
    }
    let factor = 10f64.powi(decimals as i32);
    (val * factor).round() / factor
}

/// Splits 100% into `parts` equal shares, each rounded to `decimals`.
/// Returns 0 when there is nothing to split.
#[inline]
pub fn equal_share(parts: usize, decimals: u32) -> f64 {
    if parts == 0 {
        return 0.0;
    }
    round_to(100.0 / parts as f64, decimals)
}

/// Percentage difference of `price` below `base`, rounded to a whole number.
/// Positive means a discount. 0 when either side is missing.
pub fn discount_pct(price: f64, base: f64) -> f64 {
    if base <= 0.0 || price <= 0.0 {
        return 0.0;
    }
    ((1.0 - price / base) * 100.0).round()
}
