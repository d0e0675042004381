use std::time::Duration;

/// Clock readout in `HH:MM:SS`, the way the session screen displays both
/// stopwatch and countdown values.
#[must_use]
pub fn format_clock(value: Duration) -> String {
    let total = value.as_secs();
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let seconds = total % 60;
    format!("{hours:02}:{minutes:02}:{seconds:02}")
}

/// Elapsed time in words for the summary screen, e.g. `"12 min 05 s"`.
#[must_use]
pub fn format_elapsed(value: Duration) -> String {
    let total = value.as_secs();
    let minutes = total / 60;
    let seconds = total % 60;
    if minutes == 0 {
        format!("{seconds} s")
    } else {
        format!("{minutes} min {seconds:02} s")
    }
}
