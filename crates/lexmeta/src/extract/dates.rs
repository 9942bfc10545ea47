//! Date extraction.
//!
//! The text is scanned independently with three patterns:
//!
//! | Pattern      | Example          |
//! |--------------|------------------|
//! | ISO          | `2024-01-31`     |
//! | Slash        | `31/1/2024`      |
//! | Long form    | `31 January 2024`|
//!
//! Every match is then normalized by trying, in order, ISO, day/month/year and
//! day/month-name/year. The first parse that succeeds gives the calendar date; a
//! match no parse accepts is a false positive and is dropped. Years must have
//! four digits and cannot be `0000`; month names must be spelled out in full (any
//! case).
//!
//! Matches are keyed by `(date, start, end)`, so the same date at two places in the
//! text yields two references. Overlapping matches from different patterns are not
//! merged unless their offsets coincide.

use super::*;

lazy_static! {
  static ref ISO_DATE: Regex = Regex::new(r"\b\d{4}-\d{2}-\d{2}\b").unwrap();
  static ref SLASH_DATE: Regex = Regex::new(r"\b\d{1,2}/\d{1,2}/\d{2,4}\b").unwrap();
  static ref LONG_DATE: Regex = Regex::new(r"\b\d{1,2} [A-Za-z]+ \d{4}\b").unwrap();
}

const MONTHS: [&str; 12] = [
  "january",
  "february",
  "march",
  "april",
  "may",
  "june",
  "july",
  "august",
  "september",
  "october",
  "november",
  "december",
];

/// A date found in the document text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateReference {
  /// Normalized calendar date, serialized as `YYYY-MM-DD`
  pub date:                NaiveDate,
  /// Text around the match, clamped to the document bounds
  pub surrounding_context: String,
}

/// A normalized date match and its byte span in the text.
///
/// Ordering is by date, then start, then end; this is also the uniqueness key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DateMatch {
  /// Normalized date
  pub date:  NaiveDate,
  /// Byte offset of the first matched character
  pub start: usize,
  /// Byte offset just past the match
  pub end:   usize,
}

/// Extracts, deduplicates and sorts all dates in `text`.
///
/// Each reference keeps up to `context_window` characters on either side of its match.
pub fn extract_dates(text: &str, context_window: usize) -> Vec<DateReference> {
  let matches = find_date_matches(text);
  let unique = dedup_and_sort(matches);
  debug!("Found {} dates", unique.len());

  unique
    .into_iter()
    .map(|m| DateReference {
      date:                m.date,
      surrounding_context: surrounding_context(text, m.start, m.end, context_window).to_string(),
    })
    .collect()
}

/// Runs the three date patterns over `text`, keeping every match that normalizes.
pub fn find_date_matches(text: &str) -> Vec<DateMatch> {
  [&*ISO_DATE, &*SLASH_DATE, &*LONG_DATE]
    .into_iter()
    .flat_map(|pattern| pattern.find_iter(text))
    .filter_map(|m| match normalize_date(m.as_str()) {
      Some(date) => {
        trace!("Date candidate {:?} at {}..{} -> {}", m.as_str(), m.start(), m.end(), date);
        Some(DateMatch { date, start: m.start(), end: m.end() })
      },
      None => {
        trace!("Discarding unparseable date candidate {:?}", m.as_str());
        None
      },
    })
    .collect()
}

/// Collapses identical `(date, start, end)` matches and sorts by that key.
pub fn dedup_and_sort(matches: impl IntoIterator<Item = DateMatch>) -> Vec<DateMatch> {
  matches.into_iter().collect::<BTreeSet<_>>().into_iter().collect()
}

/// Parses a date candidate as ISO, then day/month/year, then day/month-name/year.
pub fn normalize_date(candidate: &str) -> Option<NaiveDate> {
  parse_iso(candidate)
    .or_else(|| parse_day_month_year(candidate))
    .or_else(|| parse_day_month_name_year(candidate))
}

fn parse_iso(candidate: &str) -> Option<NaiveDate> {
  let [year, month, day] = split_exact::<3>(candidate, '-')?;
  NaiveDate::from_ymd_opt(year_of(year)?, digits(month, 2)?, digits(day, 2)?)
}

fn parse_day_month_year(candidate: &str) -> Option<NaiveDate> {
  let [day, month, year] = split_exact::<3>(candidate, '/')?;
  NaiveDate::from_ymd_opt(year_of(year)?, digits(month, 2)?, digits(day, 2)?)
}

fn parse_day_month_name_year(candidate: &str) -> Option<NaiveDate> {
  let [day, month, year] = split_exact::<3>(candidate, ' ')?;
  let month = MONTHS.iter().position(|name| name.eq_ignore_ascii_case(month))? as u32 + 1;
  NaiveDate::from_ymd_opt(year_of(year)?, month, digits(day, 2)?)
}

fn split_exact<const N: usize>(candidate: &str, separator: char) -> Option<[&str; N]> {
  let parts: Vec<&str> = candidate.split(separator).collect();
  parts.try_into().ok()
}

/// Parses 1 to `max_len` ASCII digits.
fn digits(part: &str, max_len: usize) -> Option<u32> {
  if part.is_empty() || part.len() > max_len || !part.bytes().all(|b| b.is_ascii_digit()) {
    return None;
  }
  part.parse().ok()
}

fn year_of(part: &str) -> Option<i32> {
  if part.len() != 4 {
    return None;
  }
  digits(part, 4).filter(|&year| year >= 1).map(|year| year as i32)
}

/// Slice of `text` spanning up to `window` characters before `start` and after `end`.
fn surrounding_context(text: &str, start: usize, end: usize, window: usize) -> &str {
  let from = text[..start].char_indices().rev().take(window).last().map_or(start, |(i, _)| i);
  let to = text[end..].char_indices().nth(window).map_or(text.len(), |(i, _)| end + i);
  &text[from..to]
}
