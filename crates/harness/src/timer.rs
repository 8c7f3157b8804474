//! Timed blocks

use std::time::Instant;

use crate::report::{Measurement, Metric, Reporter};

/// Times blocks on the monotonic clock and reports each one
pub struct PhaseTimer<R: Reporter> {
    reporter: R,
}

impl<R: Reporter> PhaseTimer<R> {
    /// Timer forwarding to `reporter`
    pub fn new(reporter: R) -> Self {
        Self { reporter }
    }

    /// Run `body` and report its elapsed seconds under `metric`
    pub fn time_block<T>(&mut self, metric: Metric, body: impl FnOnce() -> T) -> T {
        let start = Instant::now();
        let out = body();
        self.emit(metric, start);
        out
    }

    /// Run a fallible `body`; report only if it succeeds
    ///
    /// A failed block emits nothing, so a run never reports timing for work
    /// that did not complete.
    pub fn try_time_block<T, E>(
        &mut self,
        metric: Metric,
        body: impl FnOnce() -> Result<T, E>,
    ) -> Result<T, E> {
        let start = Instant::now();
        let out = body()?;
        self.emit(metric, start);
        Ok(out)
    }

    /// Reporter this timer forwards to
    pub fn reporter(&self) -> &R {
        &self.reporter
    }

    /// Give back the reporter
    pub fn into_reporter(self) -> R {
        self.reporter
    }

    fn emit(&mut self, metric: Metric, start: Instant) {
        let elapsed = start.elapsed().as_secs_f64();
        self.reporter.report(&Measurement::seconds(metric, elapsed));
    }
}
