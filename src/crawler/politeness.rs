//! Inter-request pacing
//!
//! The paginator and the collective crawl call [`Politeness::pause`] between
//! page fetches instead of sleeping inline, so tests can run with [`NoDelay`].

use std::time::Duration;

/// Rate-limiter collaborator invoked between consecutive page fetches
#[allow(async_fn_in_trait)]
pub trait Politeness {
    async fn pause(&self);
}

/// Sleeps a fixed interval
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedDelay {
    delay: Duration,
}

impl FixedDelay {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }
}

impl Politeness for FixedDelay {
    async fn pause(&self) {
        if !self.delay.is_zero() {
            tracing::trace!("Politeness pause {:?}", self.delay);
            tokio::time::sleep(self.delay).await;
        }
    }
}

/// Never waits
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoDelay;

impl Politeness for NoDelay {
    async fn pause(&self) {}
}
