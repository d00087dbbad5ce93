//! Default filling for keys no layer supplied.

use serde_json::{Map, Value};

use crate::schema::{Schema, TypeShape};
use crate::{ArgsResult, ArgsResultExt};

/// Insert defaults for every absent key of `schema`, recursing into nested
/// records.
///
/// A nested record's own default is applied before its leaves are filled,
/// so leaf factories only supply what the record-level default left out.
/// Plain `bool` fields without a factory default to `false`.
pub(crate) fn fill(schema: &Schema, map: &mut Map<String, Value>) -> ArgsResult<()> {
    for field in schema.fields() {
        let key = field.name();
        if !map.contains_key(key) {
            let value = match (field.default_factory(), field.shape()) {
                (Some(factory), _) => Some(factory().into_args()?),
                (None, TypeShape::Bool) => Some(Value::Bool(false)),
                (None, TypeShape::Record(_)) => Some(Value::Object(Map::new())),
                (None, _) => None,
            };
            if let Some(value) = value {
                map.insert(key.to_owned(), value);
            }
        }
        if let (TypeShape::Record(nested), Some(Value::Object(inner))) =
            (field.shape(), map.get_mut(key))
        {
            fill(&nested(), inner)?;
        }
    }
    Ok(())
}
