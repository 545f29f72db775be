//! Filtering collections by a boolean query.

use crate::parser::parse_boolean_query;

/// Returns the items whose key text matches `query`, in input order.
///
/// The query is parsed once and evaluated against `key(item)` for every item.
///
/// ```
/// use boolq_query::filter_by_boolean_query;
///
/// let orgs = vec![("Shell plc", 1), ("BP plc", 2)];
/// let matched = filter_by_boolean_query("shell", orgs, |(name, _)| *name);
/// assert_eq!(matched, vec![("Shell plc", 1)]);
/// ```
pub fn filter_by_boolean_query<T, I, F, S>(query: &str, items: I, key: F) -> Vec<T>
where
    I: IntoIterator<Item = T>,
    F: Fn(&T) -> S,
    S: AsRef<str>,
{
    let expr = parse_boolean_query(query);
    items
        .into_iter()
        .filter(|item| expr.evaluate(key(item).as_ref()))
        .collect()
}

/// Like [`filter_by_boolean_query`], matching against each item's `Display` text.
pub fn filter_by_boolean_query_display<T, I>(query: &str, items: I) -> Vec<T>
where
    I: IntoIterator<Item = T>,
    T: ToString,
{
    filter_by_boolean_query(query, items, |item: &T| item.to_string())
}
