use std::collections::HashMap;

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    #[error("missing {0} line")]
    MissingLine(&'static str),

    #[error("invalid number {0:?}")]
    InvalidNumber(String),

    #[error("guest {line}: missing {field:?}")]
    MissingField { line: usize, field: &'static str },

    #[error("guest {line}: invalid date {value:?}")]
    InvalidDate { line: usize, value: String },

    #[error("guest {line}: check-out {check_out} before check-in {check_in}")]
    Reversed {
        line: usize,
        check_in: NaiveDate,
        check_out: NaiveDate,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Guest {
    pub name: String,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
}

impl Guest {
    /// Parses a flat object such as
    /// `{"name": "A", "check-in": "2021-01-01", "check-out": "2021-01-04"}`.
    pub fn parse(line: usize, input: &str) -> Result<Self, Error> {
        static PATTERN: Lazy<Regex> =
            Lazy::new(|| Regex::new(r#""([^"]*)"\s*:\s*"([^"]*)""#).unwrap());
        let fields = PATTERN
            .captures_iter(input)
            .map(|cap| {
                let (_, [k, v]) = cap.extract::<2>();
                (k, v)
            })
            .collect::<HashMap<_, _>>();

        let date = |field: &'static str| -> Result<NaiveDate, Error> {
            let value = fields
                .get(field)
                .ok_or(Error::MissingField { line, field })?;
            NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| Error::InvalidDate {
                line,
                value: value.to_string(),
            })
        };
        let check_in = date("check-in")?;
        let check_out = date("check-out")?;
        if check_out < check_in {
            return Err(Error::Reversed {
                line,
                check_in,
                check_out,
            });
        }

        Ok(Self {
            name: fields.get("name").map(|s| s.to_string()).unwrap_or_default(),
            check_in,
            check_out,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub capacity: usize,
    pub guests: Vec<Guest>,
}

fn parse_number(line: Option<&str>, what: &'static str) -> Result<usize, Error> {
    let line = line.ok_or(Error::MissingLine(what))?.trim();
    line.parse()
        .map_err(|_| Error::InvalidNumber(line.to_string()))
}

impl Request {
    /// Capacity on the first line, guest count on the second, then one guest
    /// per line.
    pub fn parse(input: &str) -> Result<Self, Error> {
        let mut lines = input.lines();
        let capacity = parse_number(lines.next(), "capacity")?;
        let n = parse_number(lines.next(), "guest count")?;
        let guests = (0..n)
            .map(|i| {
                let line = lines.next().ok_or(Error::MissingLine("guest"))?;
                Guest::parse(i, line)
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { capacity, guests })
    }
}

// Check-outs sort first so a same-day turnover never overlaps
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Event {
    CheckOut,
    CheckIn,
}

/// Whether the hotel never holds more than `capacity` guests at once.
pub fn check_capacity(capacity: usize, guests: &[Guest]) -> bool {
    let mut events = guests
        .iter()
        .flat_map(|g| [(g.check_in, Event::CheckIn), (g.check_out, Event::CheckOut)])
        .collect::<Vec<_>>();
    events.sort();

    let mut current: isize = 0;
    for (date, event) in events {
        match event {
            Event::CheckIn => current += 1,
            Event::CheckOut => current -= 1,
        }
        // Negative only inside a same-day stay, which never exceeds anything
        if usize::try_from(current).is_ok_and(|current| current > capacity) {
            log::debug!("{} guests on {}", current, date);
            return false;
        }
    }
    true
}
