//! Field projection from a `fields=` query parameter.
//!
//! `fields` is a comma-separated list of dot paths, e.g.
//! `firstName,metadata.phone,metadata.address`. It is parsed into a selection
//! tree and applied to the public JSON form of a record:
//!
//! ```text
//! firstName            -> Include
//! metadata             -> Nested { phone -> Include, address -> Include }
//! ```
//!
//! Rules:
//! - absent or empty input selects only `id`
//! - paths sharing a prefix merge into one nested node
//! - a whole-object path absorbs its sub-paths (`metadata,metadata.phone` keeps all of `metadata`)
//! - `id` is always part of the output when the record has one
//! - field names are not validated; unknown names select nothing
//! - `password` is never selectable

use std::collections::BTreeMap;

use serde_json::{Map, Value};

pub const ID_FIELD: &str = "id";

const WRITE_ONLY_FIELDS: &[&str] = &["password"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    Include,
    Nested(BTreeMap<String, Selection>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Projection {
    fields: BTreeMap<String, Selection>,
}

impl Default for Projection {
    /// Selects only the identifier.
    fn default() -> Self {
        let mut fields = BTreeMap::new();
        fields.insert(ID_FIELD.to_string(), Selection::Include);
        Self { fields }
    }
}

impl Projection {
    #[must_use]
    pub fn parse(fields: Option<&str>) -> Self {
        let Some(raw) = fields.map(str::trim).filter(|s| !s.is_empty()) else {
            return Self::default();
        };

        let mut tree = BTreeMap::new();
        for token in raw.split(',') {
            let segments: Vec<&str> = token
                .split('.')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .collect();

            match segments.first() {
                None => continue,
                Some(head) if WRITE_ONLY_FIELDS.contains(head) => continue,
                Some(_) => insert_path(&mut tree, &segments),
            }
        }

        if tree.is_empty() {
            return Self::default();
        }

        Self { fields: tree }
    }

    #[must_use]
    pub fn fields(&self) -> &BTreeMap<String, Selection> {
        &self.fields
    }

    /// Shapes `record` down to the selected fields. Non-object values pass through.
    #[must_use]
    pub fn apply(&self, record: &Value) -> Value {
        let Value::Object(source) = record else {
            return record.clone();
        };

        let mut out = Map::new();
        if let Some(id) = source.get(ID_FIELD) {
            out.insert(ID_FIELD.to_string(), id.clone());
        }
        project_into(&mut out, source, &self.fields);

        Value::Object(out)
    }
}

fn insert_path(tree: &mut BTreeMap<String, Selection>, segments: &[&str]) {
    let Some((head, rest)) = segments.split_first() else {
        return;
    };

    if rest.is_empty() {
        tree.insert((*head).to_string(), Selection::Include);
        return;
    }

    let node = tree
        .entry((*head).to_string())
        .or_insert_with(|| Selection::Nested(BTreeMap::new()));

    if let Selection::Nested(children) = node {
        insert_path(children, rest);
    }
}

fn project_into(
    out: &mut Map<String, Value>,
    source: &Map<String, Value>,
    selection: &BTreeMap<String, Selection>,
) {
    for (key, sel) in selection {
        if WRITE_ONLY_FIELDS.contains(&key.as_str()) {
            continue;
        }
        let Some(value) = source.get(key) else {
            continue;
        };

        match sel {
            Selection::Include => {
                out.insert(key.clone(), value.clone());
            }
            Selection::Nested(children) => {
                if let Value::Object(inner) = value {
                    let mut nested = Map::new();
                    project_into(&mut nested, inner, children);
                    out.insert(key.clone(), Value::Object(nested));
                }
            }
        }
    }
}
