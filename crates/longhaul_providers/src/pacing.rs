use std::time::Duration;

use parking_lot::Mutex;
use tokio::time::Instant;

/// Spaces outbound requests so a shared upstream service is never queried
/// more often than its usage policy allows.
///
/// The pacer owns no timer of its own; callers await `acquire` before each
/// request. Constructing it with `Duration::ZERO` disables pacing entirely,
/// which is what tests do.
pub struct RequestPacer {
    min_interval: Duration,
    last_request: Mutex<Option<Instant>>,
}

impl RequestPacer {
    pub fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            last_request: Mutex::new(None),
        }
    }

    pub fn unpaced() -> Self {
        Self::new(Duration::ZERO)
    }

    /// Waits until the next request may go out and claims that slot.
    pub async fn acquire(&self) {
        if self.min_interval.is_zero() {
            return;
        }

        loop {
            let wait = {
                let mut last = self.last_request.lock();
                let now = Instant::now();

                match *last {
                    Some(previous) if now < previous + self.min_interval => {
                        Some(previous + self.min_interval - now)
                    }
                    _ => {
                        *last = Some(now);
                        None
                    }
                }
            };

            match wait {
                Some(wait) => tokio::time::sleep(wait).await,
                None => return,
            }
        }
    }
}
