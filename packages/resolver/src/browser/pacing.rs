//! Human-pace interaction delays.
//!
//! Autocomplete widgets on the target sites ignore synthetic instant
//! input; randomized keystroke timing keeps them responsive.

use rand::Rng;
use std::time::Duration;

/// Random delay between min_ms and max_ms.
pub fn random_delay(min_ms: u64, max_ms: u64) -> Duration {
    let mut rng = rand::thread_rng();
    Duration::from_millis(rng.gen_range(min_ms..=max_ms))
}

/// Delay between keystrokes (30-120ms).
pub fn typing_delay() -> Duration {
    random_delay(30, 120)
}

/// Delay between discrete interactions like click-then-type (50-200ms).
pub fn action_delay() -> Duration {
    random_delay(50, 200)
}

/// Sleep for a random inter-action delay.
pub async fn pause() {
    tokio::time::sleep(action_delay()).await;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delays_within_bounds() {
        for _ in 0..50 {
            let d = typing_delay();
            assert!(d >= Duration::from_millis(30) && d <= Duration::from_millis(120));

            let d = action_delay();
            assert!(d >= Duration::from_millis(50) && d <= Duration::from_millis(200));
        }
    }
}
