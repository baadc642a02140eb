use rand::Rng;
use std::time::Duration;

/// Exponential backoff with jitter: `base * 2^attempt`, ±30%.
pub fn calculate_backoff_delay(attempt: u32, base: Duration) -> Duration {
    // Cap the exponent so a misconfigured attempt count cannot overflow
    let capped_attempt = attempt.min(10);

    let base_ms = u64::try_from(base.as_millis()).unwrap_or(u64::MAX);
    let delay_ms = base_ms.saturating_mul(2_u64.saturating_pow(capped_attempt));

    let jitter_factor = rand::thread_rng().gen_range(0.7..1.3);
    let delay_with_jitter = (delay_ms as f64 * jitter_factor).round() as u64;

    Duration::from_millis(delay_with_jitter)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backoff_progression() {
        let base = Duration::from_millis(1300);

        let delay0 = calculate_backoff_delay(0, base);
        let delay1 = calculate_backoff_delay(1, base);
        let delay2 = calculate_backoff_delay(2, base);

        assert!(delay0.as_millis() >= 910 && delay0.as_millis() <= 1690); // 1.3s ±30%
        assert!(delay1.as_millis() >= 1820 && delay1.as_millis() <= 3380); // 2.6s ±30%
        assert!(delay2.as_millis() >= 3640 && delay2.as_millis() <= 6760); // 5.2s ±30%
    }

    #[test]
    fn test_backoff_cap() {
        let base = Duration::from_secs(1);

        // 1s * 2^10 = 1024s, jitter 0.7-1.3
        let delay_high = calculate_backoff_delay(20, base);
        let delay_capped = calculate_backoff_delay(10, base);

        assert!(delay_high.as_secs() >= 716 && delay_high.as_secs() <= 1332);
        assert!(delay_capped.as_secs() >= 716 && delay_capped.as_secs() <= 1332);
    }

    #[test]
    fn test_zero_base() {
        assert_eq!(calculate_backoff_delay(3, Duration::ZERO), Duration::ZERO);
    }
}
