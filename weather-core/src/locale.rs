//! Fixed pt-PT date formatting.

use chrono::{DateTime, Datelike, TimeZone, Timelike, Weekday};

const MONTHS: [&str; 12] = [
    "janeiro", "fevereiro", "março", "abril", "maio", "junho", "julho", "agosto", "setembro",
    "outubro", "novembro", "dezembro",
];

pub fn weekday_short(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "seg.",
        Weekday::Tue => "ter.",
        Weekday::Wed => "qua.",
        Weekday::Thu => "qui.",
        Weekday::Fri => "sex.",
        Weekday::Sat => "sáb.",
        Weekday::Sun => "dom.",
    }
}

pub fn weekday_long(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "segunda-feira",
        Weekday::Tue => "terça-feira",
        Weekday::Wed => "quarta-feira",
        Weekday::Thu => "quinta-feira",
        Weekday::Fri => "sexta-feira",
        Weekday::Sat => "sábado",
        Weekday::Sun => "domingo",
    }
}

/// e.g. `segunda-feira, 19 de outubro às 14:05`
pub fn format_date_time<Tz: TimeZone>(at: &DateTime<Tz>) -> String {
    format!(
        "{}, {} de {} às {:02}:{:02}",
        weekday_long(at.weekday()),
        at.day(),
        MONTHS[at.month0() as usize],
        at.hour(),
        at.minute(),
    )
}
