use crate::{
    protocol::reader::{self, ReadFn},
    ColumnDescriptor, DecodeStrategy, HdbError, HdbResult, HdbValue, KeyField, ReadFunction,
    Reader,
};
use std::sync::Arc;

/// Identifies a field within a [`Record`](crate::Record).
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum FieldKey {
    /// The column's name or display name.
    Name(Arc<str>),
    /// The column's position.
    Index(usize),
}

impl FieldKey {
    /// The name, if the key is a name.
    pub fn as_name(&self) -> Option<&str> {
        match self {
            FieldKey::Name(name) => Some(name),
            FieldKey::Index(_) => None,
        }
    }
}

impl std::fmt::Display for FieldKey {
    fn fmt(&self, fmt: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            FieldKey::Name(name) => write!(fmt, "{name}"),
            FieldKey::Index(i) => write!(fmt, "{i}"),
        }
    }
}

impl serde::Serialize for FieldKey {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            FieldKey::Name(name) => serializer.serialize_str(name),
            FieldKey::Index(i) => serializer.serialize_u64(*i as u64),
        }
    }
}

/// One step of a [`DecodePlan`]: which read to apply, with which argument.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct DecodeStep {
    /// The typed read.
    pub function: ReadFunction,
    /// The decimal fraction, for the reads that take one.
    pub fraction: Option<i16>,
}

/// The per-query decode recipe: one step per column, in column order.
///
/// Built once from the column descriptors and reused, read-only, for every row.
pub struct DecodePlan {
    keys: Arc<[FieldKey]>,
    steps: Vec<DecodeStep>,
    strategy: DecodeStrategy,
    // filled for DecodeStrategy::Compiled only
    bound: Vec<(ReadFn, i16)>,
}

impl DecodePlan {
    pub(crate) fn build(
        columns: &[ColumnDescriptor],
        key_field: Option<KeyField>,
        strategy: DecodeStrategy,
    ) -> HdbResult<Self> {
        let keys = columns
            .iter()
            .enumerate()
            .map(|(i, column)| field_key(i, column, key_field))
            .collect::<HdbResult<Arc<[FieldKey]>>>()?;

        let steps: Vec<DecodeStep> = columns
            .iter()
            .map(|column| {
                let function = column.data_type().read_function();
                DecodeStep {
                    function,
                    fraction: function.takes_fraction().then(|| column.fraction()),
                }
            })
            .collect();

        let bound = match strategy {
            DecodeStrategy::Interpreted => Vec::new(),
            DecodeStrategy::Compiled => steps
                .iter()
                .map(|step| (reader::bind(step.function), step.fraction.unwrap_or(0)))
                .collect(),
        };

        debug!(
            "DecodePlan::build(): {} steps, key field {key_field:?}, strategy {strategy:?}",
            steps.len()
        );
        Ok(Self {
            keys,
            steps,
            strategy,
            bound,
        })
    }

    /// Number of steps, which is the number of fields per record.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// True for a plan without columns.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// The field keys, in column order.
    pub fn keys(&self) -> &[FieldKey] {
        &self.keys
    }

    /// The steps, in column order.
    pub fn steps(&self) -> &[DecodeStep] {
        &self.steps
    }

    /// The strategy the plan is executed with.
    pub fn strategy(&self) -> DecodeStrategy {
        self.strategy
    }

    pub(crate) fn shared_keys(&self) -> Arc<[FieldKey]> {
        Arc::clone(&self.keys)
    }

    // Exactly one typed read per step.
    pub(crate) fn decode_values(&self, rdr: &mut Reader) -> HdbResult<Vec<HdbValue>> {
        match self.strategy {
            DecodeStrategy::Interpreted => self
                .steps
                .iter()
                .map(|step| rdr.read(step.function, step.fraction))
                .collect(),
            DecodeStrategy::Compiled => self
                .bound
                .iter()
                .map(|(read_fn, argument)| read_fn(rdr, *argument))
                .collect(),
        }
    }
}

impl std::fmt::Debug for DecodePlan {
    fn fmt(&self, fmt: &mut std::fmt::Formatter) -> std::fmt::Result {
        fmt.debug_struct("DecodePlan")
            .field("keys", &self.keys)
            .field("steps", &self.steps)
            .field("strategy", &self.strategy)
            .finish_non_exhaustive()
    }
}

fn field_key(
    index: usize,
    column: &ColumnDescriptor,
    key_field: Option<KeyField>,
) -> HdbResult<FieldKey> {
    let name = match key_field {
        None => return Ok(FieldKey::Index(index)),
        Some(KeyField::Name) => column.name(),
        Some(KeyField::ColumnDisplayName) => column.column_display_name(),
    };
    name.map(|name| FieldKey::Name(Arc::from(name))).ok_or_else(|| {
        warn!("column {index} ({column}) has no {key_field:?}");
        HdbError::Usage("a column descriptor lacks the requested key field")
    })
}

#[cfg(test)]
mod tests {
    use super::{DecodePlan, FieldKey};
    use crate::{ColumnDescriptor, DecodeStrategy, HdbError, KeyField, ReadFunction, TypeId};

    fn columns() -> Vec<ColumnDescriptor> {
        vec![
            ColumnDescriptor::new(TypeId::INT, 0)
                .with_name("P_ID")
                .with_column_display_name("ID"),
            ColumnDescriptor::new(TypeId::DECIMAL, 2)
                .with_name("P_AMOUNT")
                .with_column_display_name("AMOUNT"),
        ]
    }

    #[test]
    fn test_keys() {
        let plan =
            DecodePlan::build(&columns(), Some(KeyField::Name), DecodeStrategy::Compiled).unwrap();
        assert_eq!(
            plan.keys(),
            [FieldKey::Name("P_ID".into()), FieldKey::Name("P_AMOUNT".into())]
        );
        let plan = DecodePlan::build(
            &columns(),
            Some(KeyField::ColumnDisplayName),
            DecodeStrategy::Compiled,
        )
        .unwrap();
        assert_eq!(plan.keys()[1].as_name(), Some("AMOUNT"));
        let plan = DecodePlan::build(&columns(), None, DecodeStrategy::Interpreted).unwrap();
        assert_eq!(plan.keys(), [FieldKey::Index(0), FieldKey::Index(1)]);
    }

    #[test]
    fn test_steps() {
        let plan = DecodePlan::build(&columns(), None, DecodeStrategy::Compiled).unwrap();
        assert_eq!(plan.len(), 2);
        assert_eq!(plan.steps()[0].function, ReadFunction::ReadInt);
        assert_eq!(plan.steps()[0].fraction, None);
        assert_eq!(plan.steps()[1].function, ReadFunction::ReadDecimal);
        assert_eq!(plan.steps()[1].fraction, Some(2));
    }

    #[test]
    fn test_missing_key_field() {
        let columns = vec![ColumnDescriptor::new(TypeId::INT, 0).with_name("X")];
        assert!(matches!(
            DecodePlan::build(&columns, Some(KeyField::ColumnDisplayName), DecodeStrategy::Compiled),
            Err(HdbError::Usage(_))
        ));
    }
}
