//! Per-day helpers for the home screen: quote of the day and a random
//! chapter pointer.

use chrono::{Datelike, NaiveDate};
use rand_core::{OsRng, RngCore};
use serde::Serialize;

/// A short quotation with its source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DailyQuote {
    pub text: &'static str,
    pub source: &'static str,
}

const QUOTES: &[DailyQuote] = &[
    DailyQuote {
        text: "כל ישראל יש להם חלק לעולם הבא",
        source: "משנה סנהדרין י, א",
    },
    DailyQuote {
        text: "על שלשה דברים העולם עומד: על התורה ועל העבודה ועל גמילות חסדים",
        source: "פרקי אבות א, ב",
    },
    DailyQuote {
        text: "הוי מקבל את כל האדם בסבר פנים יפות",
        source: "פרקי אבות א, טו",
    },
    DailyQuote {
        text: "יהי כבוד חברך חביב עליך כשלך",
        source: "פרקי אבות ב, י",
    },
    DailyQuote {
        text: "לא עליך המלאכה לגמור, ולא אתה בן חורין להבטל ממנה",
        source: "פרקי אבות ב, טז",
    },
    DailyQuote {
        text: "איזהו חכם? הלומד מכל אדם",
        source: "פרקי אבות ד, א",
    },
    DailyQuote {
        text: "שויתי ה' לנגדי תמיד",
        source: "תהלים טז, ח",
    },
];

/// The quote for a calendar day; the same day always yields the same quote
pub fn daily_quote_for(date: NaiveDate) -> DailyQuote {
    let index = date.num_days_from_ce().rem_euclid(QUOTES.len() as i32) as usize;
    QUOTES[index]
}

/// Uniform integer in `[1, max]` from the OS RNG; `max == 0` is treated as 1
pub fn random_number(max: u32) -> u32 {
    let max = max.max(1);

    // Rejection sampling keeps the draw unbiased
    let zone = u32::MAX - (u32::MAX % max);
    loop {
        let value = OsRng.next_u32();
        if value < zone {
            return value % max + 1;
        }
    }
}

/// Format a chapter ordinal as an id, e.g. `kitzur_orach_chaim-007`
pub fn chapter_id(prefix: &str, number: u32) -> String {
    format!("{}-{:03}", prefix, number)
}
