//! Comparators used by sorting.

use std::cmp::Ordering;

use unicode_normalization::{UnicodeNormalization, char::is_combining_mark};

use crate::record::SortValue;

/// Lexical comparison approximating a root-locale collation.
///
/// Levels, in order:
/// 1. base letters, ignoring case and accents (`é` sorts with `e`, before `f`)
/// 2. accents, unaccented first
/// 3. case, lowercase first
///
/// Identical strings compare `Equal`.
pub fn locale_cmp(a: &str, b: &str) -> Ordering {
  base_letters(a)
    .cmp(base_letters(b))
    .then_with(|| accented(a).cmp(accented(b)))
    // Lowercase code points sort above their uppercase forms, so the
    // case level compares in reverse.
    .then_with(|| b.cmp(a))
}

fn base_letters(s: &str) -> impl Iterator<Item = char> + '_ {
  s.nfkd()
    .filter(|c| !is_combining_mark(*c))
    .flat_map(char::to_lowercase)
}

fn accented(s: &str) -> impl Iterator<Item = char> + '_ {
  s.nfd().flat_map(char::to_lowercase)
}

/// Compare two sort values. Mixed kinds compare equal.
pub fn compare_values(a: SortValue<'_>, b: SortValue<'_>) -> Ordering {
  match (a, b) {
    (SortValue::Text(a), SortValue::Text(b)) => locale_cmp(a, b),
    (SortValue::Number(a), SortValue::Number(b)) => a.total_cmp(&b),
    _ => Ordering::Equal,
  }
}
