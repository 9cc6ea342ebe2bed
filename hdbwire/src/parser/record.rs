use crate::{FieldKey, HdbValue};
use serde::ser::SerializeMap;
use std::sync::Arc;

/// A decoded row, or a decoded set of parameters.
///
/// The values are kept in column order; the keys are shared by all records
/// decoded with the same [`DecodePlan`](crate::DecodePlan).
pub struct Record {
    keys: Arc<[FieldKey]>,
    values: Vec<HdbValue>,
}

impl Record {
    pub(crate) fn new(keys: Arc<[FieldKey]>, values: Vec<HdbValue>) -> Self {
        debug_assert_eq!(keys.len(), values.len());
        Self { keys, values }
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True if the record has no fields.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The value of the field with the given name.
    ///
    /// If several columns share the name, the last one wins.
    pub fn get(&self, name: &str) -> Option<&HdbValue> {
        self.keys
            .iter()
            .rposition(|key| key.as_name() == Some(name))
            .map(|i| &self.values[i])
    }

    /// The value at the given position.
    pub fn get_index(&self, index: usize) -> Option<&HdbValue> {
        self.values.get(index)
    }

    /// Iterates over keys and values, in column order.
    pub fn iter(&self) -> impl Iterator<Item = (&FieldKey, &HdbValue)> {
        self.keys.iter().zip(self.values.iter())
    }

    /// The keys, in column order.
    pub fn keys(&self) -> &[FieldKey] {
        &self.keys
    }

    /// The values, in column order.
    pub fn values(&self) -> &[HdbValue] {
        &self.values
    }

    /// Consumes the record, returning its values.
    pub fn into_values(self) -> Vec<HdbValue> {
        self.values
    }
}

impl std::ops::Index<usize> for Record {
    type Output = HdbValue;
    fn index(&self, index: usize) -> &HdbValue {
        &self.values[index]
    }
}

impl std::fmt::Display for Record {
    fn fmt(&self, fmt: &mut std::fmt::Formatter) -> std::fmt::Result {
        for v in &self.values {
            write!(fmt, "{v}, ")?;
        }
        Ok(())
    }
}

impl std::fmt::Debug for Record {
    fn fmt(&self, fmt: &mut std::fmt::Formatter) -> std::fmt::Result {
        fmt.debug_map().entries(self.iter()).finish()
    }
}

impl serde::Serialize for Record {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (key, value) in self.iter() {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::Record;
    use crate::{FieldKey, HdbValue};

    fn record() -> Record {
        Record::new(
            vec![
                FieldKey::Name("A".into()),
                FieldKey::Name("B".into()),
                FieldKey::Name("A".into()),
            ]
            .into(),
            vec![HdbValue::INT(1), HdbValue::NULL, HdbValue::INT(3)],
        )
    }

    #[test]
    fn test_access() {
        let record = record();
        assert_eq!(record.len(), 3);
        assert_eq!(record.get("A"), Some(&HdbValue::INT(3)));
        assert_eq!(record.get("B"), Some(&HdbValue::NULL));
        assert_eq!(record.get("C"), None);
        assert_eq!(record.get_index(0), Some(&HdbValue::INT(1)));
        assert_eq!(record[2], HdbValue::INT(3));
        assert_eq!(record.to_string(), "1, <NULL>, 3, ");
    }

    #[test]
    fn test_serialize() {
        let record = Record::new(
            vec![FieldKey::Index(0), FieldKey::Index(1)].into(),
            vec![HdbValue::INT(1), HdbValue::STRING("x".to_string())],
        );
        assert_eq!(
            serde_json::to_string(&record).unwrap(),
            r#"{"0":1,"1":"x"}"#
        );
    }
}
