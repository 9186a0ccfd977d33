//! Duration parsing utilities.

use anyhow::Context;
use std::time::Duration;

/// Parse a duration string like "1h", "5m", "30s", "30" into a [`Duration`].
/// Supports:
/// - Plain numbers (interpreted as seconds): "30"
/// - Seconds suffix: "30s"
/// - Minutes suffix: "5m"
/// - Hours suffix: "1h"
pub fn parse_duration(s: &str) -> anyhow::Result<Duration> {
    let s = s.trim();
    if s.is_empty() {
        anyhow::bail!("Empty duration string");
    }

    let secs = if let Some(num_str) = s.strip_suffix('h') {
        let hours: u64 = num_str
            .parse()
            .with_context(|| format!("Invalid hours value: {num_str}"))?;
        hours * 3600
    } else if let Some(num_str) = s.strip_suffix('m') {
        let minutes: u64 = num_str
            .parse()
            .with_context(|| format!("Invalid minutes value: {num_str}"))?;
        minutes * 60
    } else if let Some(num_str) = s.strip_suffix('s') {
        num_str
            .parse()
            .with_context(|| format!("Invalid seconds value: {num_str}"))?
    } else {
        s.parse()
            .with_context(|| format!("Invalid duration value: {s}"))?
    };

    if secs == 0 {
        anyhow::bail!("Duration must be greater than zero: {s}");
    }
    Ok(Duration::from_secs(secs))
}
