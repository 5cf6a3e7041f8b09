//! Shaping stored records into API response values.

use serde::Serialize;
use serde_json::Value;

/// Serialize a stored record for the API, flattening the Mongo `_id`
/// (extended-JSON `{"$oid": ...}`) into a plain `id` string.
pub fn record_to_api_value<T: Serialize>(record: &T) -> Value {
    let mut value = serde_json::to_value(record).unwrap_or(Value::Null);

    if let Value::Object(map) = &mut value {
        if let Some(raw_id) = map.remove("_id") {
            let id = match &raw_id {
                Value::Object(oid) => oid.get("$oid").cloned().unwrap_or(raw_id.clone()),
                _ => raw_id.clone(),
            };
            map.insert("id".to_string(), id);
        }
    }

    value
}

/// Map a whole result set.
pub fn records_to_api_values<T: Serialize>(records: &[T]) -> Vec<Value> {
    records.iter().map(record_to_api_value).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::oid::ObjectId;
    use serde::Serialize;

    #[derive(Serialize)]
    struct Rec {
        #[serde(rename = "_id")]
        id: ObjectId,
        title: String,
    }

    #[test]
    fn flattens_object_id() {
        let oid = ObjectId::new();
        let rec = Rec {
            id: oid,
            title: "t".to_string(),
        };
        let v = record_to_api_value(&rec);
        assert_eq!(v["id"], oid.to_hex());
        assert!(v.get("_id").is_none());
        assert_eq!(v["title"], "t");
    }
}
