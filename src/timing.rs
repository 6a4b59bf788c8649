//! Wall-clock timing wrapper for extraction calls.

use std::time::Instant;

/// Round seconds to 3 decimal places, the resolution reported to callers.
fn round3(seconds: f64) -> f64 {
    (seconds * 1000.0).round() / 1000.0
}

/// Invoke `op` exactly once and measure its wall-clock duration.
///
/// Returns the operation's value together with elapsed seconds (monotonic
/// clock, rounded to 3 decimals). A failing operation propagates unchanged:
/// no retry, no suppression, and no elapsed time, since the call did not
/// return normally.
pub fn measure<T, E, F>(op: F) -> Result<(T, f64), E>
where
    F: FnOnce() -> Result<T, E>,
{
    let start = Instant::now();
    let value = op()?;
    Ok((value, round3(start.elapsed().as_secs_f64())))
}
