use rand::Rng;
use std::ops::RangeInclusive;
use std::time::Duration;
use tokio::time::sleep;

/// Random pause inserted after every attempt.
#[derive(Debug, Clone)]
pub struct Pacer {
    range_ms: RangeInclusive<u64>,
}

impl Pacer {
    pub fn new(range_ms: RangeInclusive<u64>) -> Self {
        Self { range_ms }
    }

    pub fn next_delay(&self) -> Duration {
        self.next_delay_with(&mut rand::thread_rng())
    }

    pub fn next_delay_with<R: Rng + ?Sized>(&self, rng: &mut R) -> Duration {
        Duration::from_millis(rng.gen_range(self.range_ms.clone()))
    }

    pub async fn wait(&self, delay: Duration) {
        sleep(delay).await;
    }
}

impl Default for Pacer {
    fn default() -> Self {
        Self::new(3000..=4000)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use tokio::time::Instant;

    #[test]
    fn delays_stay_inside_default_window() {
        let pacer = Pacer::default();
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..1000 {
            let delay = pacer.next_delay_with(&mut rng).as_millis();
            assert!((3000..=4000).contains(&delay), "{delay}ms out of range");
        }
    }

    #[test]
    fn degenerate_range_is_fixed() {
        let pacer = Pacer::new(250..=250);
        assert_eq!(pacer.next_delay(), Duration::from_millis(250));
    }

    #[tokio::test(start_paused = true)]
    async fn wait_suspends_for_requested_time() {
        let start = Instant::now();
        Pacer::default().wait(Duration::from_millis(3500)).await;
        assert!(start.elapsed() >= Duration::from_millis(3500));
    }
}
