use chrono::{Local, Timelike};

pub fn local_hour() -> u32 {
    Local::now().hour()
}

/// Greeting prefix for the given local hour; empty late at night and early morning.
pub fn greeting(hour: u32) -> &'static str {
    match hour {
        8..=11 => "Good morning. ",
        12..=17 => "Good afternoon. ",
        18..=22 => "Good evening. ",
        _ => "",
    }
}

/// `M min S s`, or `M min` for whole minutes.
pub fn format_duration(seconds: u64) -> String {
    let min = seconds / 60;
    let sec = seconds % 60;
    if sec != 0 {
        format!("{} min {} s", min, sec)
    } else {
        format!("{} min", min)
    }
}

/// Zero-padded `mm:ss` for a non-negative number of seconds.
pub fn format_countdown(remaining_seconds: u64) -> String {
    let minutes = remaining_seconds / 60;
    let seconds = remaining_seconds - minutes * 60;
    format!("{:02}:{:02}", minutes, seconds)
}
