//! `chapter:verse` references as typed by a user.
//!
//! Accepted shapes: `C:V`, `C:V-W` and `C:V-C:W`, with `.` allowed in place
//! of `:` and whitespace ignored anywhere. Ranges never cross chapters.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReferenceError {
    #[error("empty reference; enter chapter:verse like 2:255 or 5.6-10")]
    Empty,
    #[error("missing chapter:verse separator in '{0}'; enter chapter:verse like 2:255 or 5.6-10")]
    MissingSeparator(String),
    #[error("'{0}' is not a valid chapter or verse number")]
    InvalidNumber(String),
    #[error("cross-chapter ranges are not supported ({start} to {end})")]
    CrossChapter { start: u32, end: u32 },
    #[error("range end {end} is before start {start}")]
    Backwards { start: u32, end: u32 },
}

/// A single verse or an inclusive verse range inside one chapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reference {
    pub chapter: u32,
    pub start: u32,
    pub end: u32,
}

impl Reference {
    pub fn single(chapter: u32, verse: u32) -> Self {
        Self {
            chapter,
            start: verse,
            end: verse,
        }
    }

    pub fn parse(input: &str) -> Result<Self, ReferenceError> {
        let compact: String = input
            .chars()
            .filter(|c| !c.is_whitespace())
            .map(|c| if c == '.' { ':' } else { c })
            .collect();
        if compact.is_empty() {
            return Err(ReferenceError::Empty);
        }

        let Some((left, right)) = compact.split_once('-') else {
            let (chapter, verse) = split_pair(&compact)?;
            return Ok(Self::single(chapter, verse));
        };

        let (chapter, start) = split_pair(left)?;
        let (end_chapter, end) = match right.split_once(':') {
            Some((ch, vs)) => (parse_number(ch)?, parse_number(vs)?),
            None => (chapter, parse_number(right)?),
        };

        if end_chapter != chapter {
            return Err(ReferenceError::CrossChapter {
                start: chapter,
                end: end_chapter,
            });
        }
        if end < start {
            return Err(ReferenceError::Backwards { start, end });
        }

        Ok(Self {
            chapter,
            start,
            end,
        })
    }

    pub fn is_single(&self) -> bool {
        self.start == self.end
    }

    /// Verse numbers covered by the reference, in order.
    pub fn verses(&self) -> impl Iterator<Item = u32> {
        self.start..=self.end
    }

    /// Store id of one verse of this chapter, e.g. `2:255`.
    pub fn verse_id(&self, verse: u32) -> String {
        format!("{}:{}", self.chapter, verse)
    }
}

impl fmt::Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_single() {
            write!(f, "{}:{}", self.chapter, self.start)
        } else {
            write!(f, "{}:{}-{}", self.chapter, self.start, self.end)
        }
    }
}

impl FromStr for Reference {
    type Err = ReferenceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Reference::parse(s)
    }
}

fn split_pair(raw: &str) -> Result<(u32, u32), ReferenceError> {
    let (chapter, verse) = raw
        .split_once(':')
        .ok_or_else(|| ReferenceError::MissingSeparator(raw.to_string()))?;
    Ok((parse_number(chapter)?, parse_number(verse)?))
}

fn parse_number(raw: &str) -> Result<u32, ReferenceError> {
    match raw.parse::<u32>() {
        Ok(value) if value > 0 => Ok(value),
        _ => Err(ReferenceError::InvalidNumber(raw.to_string())),
    }
}
