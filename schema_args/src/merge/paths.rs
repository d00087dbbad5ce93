//! Dotted key-path access on JSON mappings.

use serde_json::{Map, Value};

/// Write `value` at `path`, creating intermediate mappings.
///
/// An intermediate key holding anything other than a mapping is replaced.
pub(crate) fn set_path(root: &mut Map<String, Value>, path: &[String], value: Value) {
    let Some((leaf, parents)) = path.split_last() else {
        return;
    };
    let mut current = root;
    for segment in parents {
        let slot = current
            .entry(segment.clone())
            .or_insert_with(|| Value::Object(Map::new()));
        if !slot.is_object() {
            *slot = Value::Object(Map::new());
        }
        let Value::Object(next) = slot else {
            return;
        };
        current = next;
    }
    current.insert(leaf.clone(), value);
}

/// Mutable access to the value at `path`, if every segment exists.
pub(crate) fn get_path_mut<'a>(
    root: &'a mut Map<String, Value>,
    path: &[String],
) -> Option<&'a mut Value> {
    let (leaf, parents) = path.split_last()?;
    let mut current = root;
    for segment in parents {
        current = current.get_mut(segment)?.as_object_mut()?;
    }
    current.get_mut(leaf)
}

/// Shared access to the value at `path`, if every segment exists.
pub(crate) fn get_path<'a>(root: &'a Map<String, Value>, path: &[String]) -> Option<&'a Value> {
    let (leaf, parents) = path.split_last()?;
    let mut current = root;
    for segment in parents {
        current = current.get(segment)?.as_object()?;
    }
    current.get(leaf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn path(p: &str) -> Vec<String> {
        p.split('.').map(ToOwned::to_owned).collect()
    }

    #[test]
    fn set_path_creates_intermediate_mappings() {
        let mut root = Map::new();
        set_path(&mut root, &path("database.host"), json!("db"));
        assert_eq!(Value::Object(root), json!({"database": {"host": "db"}}));
    }

    #[test]
    fn set_path_keeps_sibling_keys() {
        let Value::Object(mut root) = json!({"database": {"host": "db", "port": 1}}) else {
            panic!("literal is an object");
        };
        set_path(&mut root, &path("database.port"), json!(2));
        assert_eq!(get_path(&root, &path("database.host")), Some(&json!("db")));
        assert_eq!(get_path(&root, &path("database.port")), Some(&json!(2)));
    }

    #[test]
    fn set_path_replaces_scalar_parents() {
        let Value::Object(mut root) = json!({"database": "oops"}) else {
            panic!("literal is an object");
        };
        set_path(&mut root, &path("database.port"), json!(2));
        assert_eq!(Value::Object(root), json!({"database": {"port": 2}}));
    }
}
