//! Flattened before/after diff of module settings documents.

use std::collections::BTreeMap;

use serde_json::{Map, Value};

const PATH_SEPARATOR: char = '/';

/// One changed leaf. `None` on either side means the key was absent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeafChange {
    pub variable: String,
    pub old_value: Option<String>,
    pub new_value: Option<String>,
}

/// Flattens nested objects into `"a/b/c" -> value`. Empty objects have no
/// leaves.
#[must_use]
pub fn flatten(settings: &Map<String, Value>) -> BTreeMap<String, &Value> {
    let mut out = BTreeMap::new();
    walk(None, settings, &mut out);
    out
}

fn walk<'v>(
    prefix: Option<&str>,
    obj: &'v Map<String, Value>,
    out: &mut BTreeMap<String, &'v Value>,
) {
    for (key, value) in obj {
        let path = match prefix {
            Some(p) => format!("{p}{PATH_SEPARATOR}{key}"),
            None => key.clone(),
        };
        match value {
            Value::Object(nested) => walk(Some(&path), nested, out),
            leaf => {
                out.insert(path, leaf);
            }
        }
    }
}

fn render(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Removed keys come first, then changed, then added; each group in key order.
/// Leaves compare as JSON values, so `"1"` and `1` differ.
#[must_use]
pub fn diff(before: &Map<String, Value>, after: &Map<String, Value>) -> Vec<LeafChange> {
    let old = flatten(before);
    let new = flatten(after);

    let mut changes = Vec::new();
    for (key, old_value) in &old {
        match new.get(key) {
            None => changes.push(LeafChange {
                variable: key.clone(),
                old_value: Some(render(old_value)),
                new_value: None,
            }),
            Some(new_value) if new_value != old_value => changes.push(LeafChange {
                variable: key.clone(),
                old_value: Some(render(old_value)),
                new_value: Some(render(new_value)),
            }),
            Some(_) => {}
        }
    }
    changes.extend(
        new.iter()
            .filter(|(key, _)| !old.contains_key(*key))
            .map(|(key, value)| LeafChange {
                variable: key.clone(),
                old_value: None,
                new_value: Some(render(value)),
            }),
    );
    changes
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use serde_json::json;

    fn obj(v: Value) -> Map<String, Value> {
        match v {
            Value::Object(m) => m,
            _ => panic!("not an object"),
        }
    }

    #[test]
    fn flatten_joins_paths_and_skips_empty_objects() {
        let input = obj(json!({
            "a": {"b": 1, "c": {"d": "x"}},
            "e": {},
            "f": [1, 2],
            "g": true,
            "h": null
        }));
        let flat = flatten(&input);
        assert_eq!(flat.get("a/b"), Some(&&json!(1)));
        assert_eq!(flat.get("a/c/d"), Some(&&json!("x")));
        assert_eq!(flat.get("f"), Some(&&json!([1, 2])));
        assert_eq!(flat.get("g"), Some(&&json!(true)));
        assert_eq!(flat.get("h"), Some(&&Value::Null));
        assert!(!flat.keys().any(|k| k.starts_with('e')));
        assert_eq!(flat.len(), 5);
    }

    #[test]
    fn changed_leaf_is_the_only_row() {
        let changes = diff(
            &obj(json!({"a": {"b": 1, "c": 2}})),
            &obj(json!({"a": {"b": 1, "c": 3}})),
        );
        assert_eq!(
            changes,
            vec![LeafChange {
                variable: "a/c".to_owned(),
                old_value: Some("2".to_owned()),
                new_value: Some("3".to_owned()),
            }]
        );
    }

    #[test]
    fn removed_and_added_keys_have_null_sides() {
        let changes = diff(&obj(json!({"gone": "x"})), &obj(json!({"fresh": "y"})));
        assert_eq!(changes.len(), 2);
        assert_eq!(changes[0].variable, "gone");
        assert_eq!(changes[0].new_value, None);
        assert_eq!(changes[1].variable, "fresh");
        assert_eq!(changes[1].old_value, None);
        assert_eq!(changes[1].new_value.as_deref(), Some("y"));
    }

    #[test]
    fn equal_documents_produce_nothing() {
        let doc = obj(json!({"theme": {"mode": "dark"}}));
        assert!(diff(&doc, &doc).is_empty());
    }

    #[test]
    fn type_changes_are_logged_even_when_text_matches() {
        let changes = diff(
            &obj(json!({"k": "1", "n": null})),
            &obj(json!({"k": 1, "n": "null"})),
        );
        assert_eq!(
            changes,
            vec![
                LeafChange {
                    variable: "k".to_owned(),
                    old_value: Some("1".to_owned()),
                    new_value: Some("1".to_owned()),
                },
                LeafChange {
                    variable: "n".to_owned(),
                    old_value: Some("null".to_owned()),
                    new_value: Some("null".to_owned()),
                },
            ]
        );
    }

    #[test]
    fn leaves_render_strings_verbatim_and_the_rest_as_json() {
        assert_eq!(render(&json!("dark")), "dark");
        assert_eq!(render(&json!({"a": [1, true]})), r#"{"a":[1,true]}"#);
        assert_eq!(render(&Value::Null), "null");
    }
}
