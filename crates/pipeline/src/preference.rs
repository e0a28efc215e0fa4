//! Preference ordering for already-categorized results (AI tools).
//!
//! A fixed-priority, multi-key comparison; each key only breaks ties left by
//! the previous one.

use crate::traits::Preferable;
use std::cmp::Ordering;

/// True when `text` contains any Arabic-script character.
pub fn contains_arabic(text: &str) -> bool {
    text.chars().any(|c| {
        matches!(c,
            '\u{0600}'..='\u{06FF}'
            | '\u{0750}'..='\u{077F}'
            | '\u{08A0}'..='\u{08FF}'
            | '\u{FB50}'..='\u{FDFF}'
            | '\u{FE70}'..='\u{FEFF}')
    })
}

/// Compare two items by preference; `Less` means `a` ranks first.
///
/// ## Keys, in priority order
/// 1. recommended first
/// 2. higher rating first (missing ratings last)
/// 3. Arabic support first, only when `arabic_query` is set
/// 4. higher popularity first
/// 5. cheaper pricing first (free < freemium < paid)
pub fn compare_preference<T: Preferable>(a: &T, b: &T, arabic_query: bool) -> Ordering {
    b.recommended()
        .cmp(&a.recommended())
        .then_with(|| compare_rating(a.rating(), b.rating()))
        .then_with(|| {
            if arabic_query {
                b.arabic_support().cmp(&a.arabic_support())
            } else {
                Ordering::Equal
            }
        })
        .then_with(|| popularity(b).total_cmp(&popularity(a)))
        .then_with(|| a.pricing().cmp(&b.pricing()))
}

/// Descending by rating; a present rating beats a missing one. NaN counts as
/// missing.
fn compare_rating(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a.filter(|r| !r.is_nan()), b.filter(|r| !r.is_nan())) {
        (Some(x), Some(y)) => y.total_cmp(&x),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// NaN popularity counts as unknown (0).
fn popularity<T: Preferable>(item: &T) -> f64 {
    let p = item.popularity();
    if p.is_nan() { 0.0 } else { p }
}

/// Stable preference sort; items equal on every key keep their input order.
pub fn sort_by_preference<T: Preferable>(mut items: Vec<T>, query: &str) -> Vec<T> {
    let arabic_query = contains_arabic(query);
    items.sort_by(|a, b| compare_preference(a, b, arabic_query));
    items
}
