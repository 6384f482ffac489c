//! Sort specification from the `sort` and `order` query parameters.
//!
//! - `sort` absent: `createdAt` in `order` direction (default `desc`)
//! - `sort` is a JSON object, e.g. `{"lastName":1,"createdAt":"desc"}`: used as a
//!   multi-field sort in key order; `order` is ignored
//! - anything else: a single field name sorted in `order` direction

use serde_json::Value;

use crate::errors::AppError;

pub const DEFAULT_SORT_FIELD: &str = "createdAt";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

impl SortDirection {
    #[must_use]
    pub fn as_sql(&self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }

    fn from_order(order: &str) -> Option<Self> {
        match order.to_ascii_lowercase().as_str() {
            "asc" | "ascending" => Some(SortDirection::Asc),
            "desc" | "descending" => Some(SortDirection::Desc),
            _ => None,
        }
    }

    fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::Number(n) => match n.as_i64() {
                Some(1) => Some(SortDirection::Asc),
                Some(-1) => Some(SortDirection::Desc),
                _ => None,
            },
            Value::String(s) => Self::from_order(s),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortKey {
    pub field: String,
    pub direction: SortDirection,
}

impl SortKey {
    pub fn new(field: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            field: field.into(),
            direction,
        }
    }
}

/// Resolves `sort`/`order` into an ordered list of sort keys.
pub fn parse_sort(sort: Option<&str>, order: Option<&str>) -> Result<Vec<SortKey>, AppError> {
    let direction = match order.map(str::trim).filter(|s| !s.is_empty()) {
        None => SortDirection::default(),
        Some(order) => SortDirection::from_order(order)
            .ok_or_else(|| AppError::bad_request("order must be 'asc' or 'desc'"))?,
    };

    let Some(sort) = sort.map(str::trim).filter(|s| !s.is_empty()) else {
        return Ok(vec![SortKey::new(DEFAULT_SORT_FIELD, direction)]);
    };

    if let Ok(Value::Object(spec)) = serde_json::from_str::<Value>(sort) {
        let keys = spec
            .iter()
            .map(|(field, value)| {
                SortDirection::from_json(value)
                    .map(|direction| SortKey::new(field.clone(), direction))
                    .ok_or_else(|| {
                        AppError::bad_request(format!("Invalid sort direction for {field}"))
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        if keys.is_empty() {
            return Ok(vec![SortKey::new(DEFAULT_SORT_FIELD, direction)]);
        }
        return Ok(keys);
    }

    Ok(vec![SortKey::new(sort, direction)])
}
