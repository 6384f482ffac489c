//! `filter_<field>=<value>` equality filters.
//!
//! Any query parameter named `filter_<field>` becomes an equality predicate on
//! `<field>`. Only single string values are accepted: a key that appears more
//! than once, or uses bracket syntax (`filter_role[]=...`), is array-valued and
//! is dropped. Accepted filters are combined with AND by the persistence layer.

pub const FILTER_PREFIX: &str = "filter_";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filters(Vec<(String, String)>);

impl Filters {
    /// Collects filters from raw query pairs, preserving first-seen order.
    pub fn from_pairs<'a, I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let candidates: Vec<(&str, &str)> = pairs
            .into_iter()
            .filter(|(key, _)| key.starts_with(FILTER_PREFIX))
            .collect();

        let filters = candidates
            .iter()
            .filter(|(key, _)| candidates.iter().filter(|(k, _)| k == key).count() == 1)
            .filter_map(|(key, value)| {
                let field = &key[FILTER_PREFIX.len()..];
                if field.is_empty() || field.contains('[') {
                    None
                } else {
                    Some((field.to_string(), (*value).to_string()))
                }
            })
            .collect();

        Self(filters)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(f, v)| (f.as_str(), v.as_str()))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }
}
