//! Tick abstraction for the fixed-period control loop.

/// Default scheduling period of the control loop in milliseconds.
pub const TICK_PERIOD_MS: u32 = 10;

/// Trait for abstracting the fixed-period tick source.
///
/// Implement this on top of a free-running millisecond counter (SysTick or
/// similar). The control loop calls [`wait_period`](TickTimer::wait_period)
/// once per iteration.
pub trait TickTimer {
    /// Blocks until the next `period_ms` boundary of the millisecond counter.
    ///
    /// The first call only aligns the counter to a period boundary.
    fn wait_period(&mut self, period_ms: u32);
}
