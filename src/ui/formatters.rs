use crate::core::context::UnitBase;

const DECIMAL_UNITS: [&str; 9] = ["B", "KB", "MB", "GB", "TB", "PB", "EB", "ZB", "YB"];
const BINARY_UNITS: [&str; 9] = ["B", "KiB", "MiB", "GiB", "TiB", "PiB", "EiB", "ZiB", "YiB"];

/// Upper bound of the Normal band (inclusive)
pub const WARNING_THRESHOLD: f32 = 75.0;
/// Lower bound of the Critical band (inclusive)
pub const CRITICAL_THRESHOLD: f32 = 90.0;

/// Severity band of a percentage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Band {
    Normal,
    Warning,
    Critical,
}

/// Clamp a percentage to [0, 100] and classify it.
///
/// 75 is still Normal and 90 is already Critical.
pub fn classify(percent: f32) -> (f32, Band) {
    let clamped = if percent.is_nan() {
        0.0
    } else {
        percent.clamp(0.0, 100.0)
    };

    let band = if clamped <= WARNING_THRESHOLD {
        Band::Normal
    } else if clamped < CRITICAL_THRESHOLD {
        Band::Warning
    } else {
        Band::Critical
    };

    (clamped, band)
}

/// Pick the largest unit such that `bytes / base^k >= 1` and round to one decimal.
///
/// Negative input yields `(0.0, "B")`. Not memoized: the base can change
/// between calls.
pub fn humanize(bytes: f64, base: UnitBase) -> (f64, &'static str) {
    if bytes.is_nan() || bytes < 0.0 {
        return (0.0, "B");
    }

    let units = match base {
        UnitBase::Decimal => &DECIMAL_UNITS,
        UnitBase::Binary => &BINARY_UNITS,
    };
    let factor = base.factor();

    let mut exponent = 0;
    let mut scaled = bytes;
    while exponent + 1 < units.len() && scaled >= factor {
        scaled /= factor;
        exponent += 1;
    }

    ((scaled * 10.0).round() / 10.0, units[exponent])
}

/// Human-readable byte count, e.g. `9.8 KiB`
pub fn format_bytes(bytes: u64, base: UnitBase) -> String {
    let (value, unit) = humanize(bytes as f64, base);
    format!("{:.1} {}", value, unit)
}

/// Human-readable throughput, e.g. `1.2 MiB/s`
pub fn format_rate(bytes_per_sec: f64, base: UnitBase) -> String {
    let (value, unit) = humanize(bytes_per_sec, base);
    format!("{:.1} {}/s", value, unit)
}

/// Percentage with one decimal after clamping
pub fn format_percent(percent: f32) -> String {
    format!("{:.1}", classify(percent).0)
}
