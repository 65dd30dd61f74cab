//! `MM:SS` timestamps inside analysis timelines.

/// Converts `"M:SS"` (minutes and seconds) to whole seconds.
///
/// Anything other than exactly two colon-separated integers yields `0`, so
/// one malformed timestamp costs a segment its duration instead of failing
/// the whole analysis.
#[must_use]
pub fn parse_time(t: &str) -> i64 {
    let parts: Vec<&str> = t.trim().split(':').collect();
    let [minutes, seconds] = parts.as_slice() else {
        return 0;
    };
    let (Ok(minutes), Ok(seconds)) = (
        minutes.trim().parse::<i64>(),
        seconds.trim().parse::<i64>(),
    ) else {
        return 0;
    };
    minutes
        .checked_mul(60)
        .and_then(|m| m.checked_add(seconds))
        .unwrap_or(0)
}

/// Splits `"MM:SS-MM:SS"` into start and end seconds.
///
/// A range without exactly one `-` separator is `(0, 0)`.
#[must_use]
pub fn parse_time_range(range: &str) -> (i64, i64) {
    match range.split('-').collect::<Vec<_>>().as_slice() {
        [start, end] => (parse_time(start), parse_time(end)),
        _ => (0, 0),
    }
}
