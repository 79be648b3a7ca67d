/// Text formatting for counts and durations.

/// Abbreviates a view count to two significant digits with a magnitude
/// suffix: 1_234_567 -> "1.2M", 12_345_678 -> "12M", 950 -> "950".
///
/// A missing count renders a placeholder instead of failing.
pub fn abbreviate_count(count: Option<u64>) -> String {

    const SCALES: [(u64, &str); 3] = [(1_000_000_000, "B"), (1_000_000, "M"), (1_000, "K")];

    let Some(count) = count else { return String::from("-") };
    for (scale, suffix) in SCALES {
        if count >= scale {
            let scaled = count as f64 / scale as f64;
            return if scaled >= 10.0 { format!("{scaled:.0}{suffix}") }
            else {
                let digits = format!("{scaled:.1}");
                let digits = digits.strip_suffix(".0").unwrap_or(&digits);
                format!("{digits}{suffix}")
            };
        }
    }

    count.to_string()
}

/// Duration tag text: "m:ss", or "h:mm:ss" past the hour mark. Zero is a
/// valid duration and renders "0:00"; absence is the caller's concern.
pub fn duration_str(seconds: u64) -> String {

    let (m, s) = (seconds / 60, seconds % 60);
    let (h, m) = (m / 60, m % 60);

    if h == 0 { format!("{m}:{s:02}") }
    else { format!("{h}:{m:02}:{s:02}") }
}
