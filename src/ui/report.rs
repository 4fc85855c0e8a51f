use crate::models::score::ResultRecord;
use crate::utils::time::format_duration;

/// Banner header and title earned by a score.
pub fn level(score: f64) -> (&'static str, &'static str) {
    if score >= 90.0 {
        (
            "Congratulations! You are now",
            "ADVANCED CERTIFIED SYSTEM ADMINISTRATOR",
        )
    } else if score >= 75.0 {
        ("Congratulations! You are now", "CERTIFIED SYSTEM ADMINISTRATOR")
    } else {
        ("Never mind. You have already made", "A GREAT PROGRESS")
    }
}

pub fn result_card(record: &ResultRecord) -> String {
    let (header, title) = level(record.score);
    format!(
        "Time:  {}\nScore: {} pts\n{}\n  {}\n",
        format_duration(record.duration),
        record.rounded_score(),
        header,
        title
    )
}

pub fn statistics_table(records: &[ResultRecord]) -> String {
    let mut out = format!(
        "{:<4} {:<10} {:<20} {}\n",
        "#", "Score", "End time", "Duration"
    );
    if records.is_empty() {
        out.push_str(&format!("{:<4} {:<10} {:<20} {}\n", "/", "/", "/", "/"));
        return out;
    }
    for (i, record) in records.iter().enumerate() {
        out.push_str(&format!(
            "{:<4} {:<10} {:<20} {}\n",
            i + 1,
            format!("{} pts", record.rounded_score()),
            record.end_time,
            format_duration(record.duration)
        ));
    }
    out
}
