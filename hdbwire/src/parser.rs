mod config;
mod decode_plan;
mod record;

pub use self::{
    config::{DecodeStrategy, KeyField, ParserConfig},
    decode_plan::{DecodePlan, DecodeStep, FieldKey},
    record::Record,
};

use crate::{ColumnDescriptor, DetachedLobFactory, HdbError, HdbResult, LobFactory, Reader};

/// Decodes the rows of a resultset, or a set of parameters, from their wire layout.
///
/// The parser is built once per statement from the column descriptors.
/// It keeps a [`DecodePlan`] for the configured key field; each `parse_*` call then
/// runs its own [`Reader`] over the given buffer.
/// LOB fields are handed to the injected [`LobFactory`].
#[derive(Debug)]
pub struct Parser<F: LobFactory = DetachedLobFactory> {
    columns: Vec<ColumnDescriptor>,
    lob_factory: F,
    config: ParserConfig,
    plan: DecodePlan,
}

impl<F: LobFactory> Parser<F> {
    /// Creates a parser with the default [`ParserConfig`].
    pub fn new(columns: Vec<ColumnDescriptor>, lob_factory: F) -> HdbResult<Self> {
        Self::with_config(columns, lob_factory, ParserConfig::default())
    }

    /// Creates a parser with the given configuration.
    ///
    /// Fails with [`HdbError::Usage`](crate::HdbError::Usage) if a column lacks the
    /// configured key field.
    pub fn with_config(
        columns: Vec<ColumnDescriptor>,
        lob_factory: F,
        config: ParserConfig,
    ) -> HdbResult<Self> {
        let plan = DecodePlan::build(&columns, config.key_field(), config.strategy())?;
        Ok(Self {
            columns,
            lob_factory,
            config,
            plan,
        })
    }

    /// The column descriptors.
    pub fn columns(&self) -> &[ColumnDescriptor] {
        &self.columns
    }

    /// The LOB factory.
    pub fn lob_factory(&self) -> &F {
        &self.lob_factory
    }

    /// The configuration.
    pub fn config(&self) -> ParserConfig {
        self.config
    }

    /// The plan for the configured key field.
    pub fn plan(&self) -> &DecodePlan {
        &self.plan
    }

    /// Builds a plan with another key field, using the configured strategy.
    pub fn build_decode_plan(&self, key_field: Option<KeyField>) -> HdbResult<DecodePlan> {
        DecodePlan::build(&self.columns, key_field, self.config.strategy())
    }

    /// Decodes the next record from the reader.
    #[allow(clippy::unused_self)]
    pub fn parse_row(&self, plan: &DecodePlan, rdr: &mut Reader) -> HdbResult<Record> {
        let values = plan.decode_values(rdr)?;
        trace!("parse_row(): {} values up to position {}", values.len(), rdr.position());
        Ok(Record::new(plan.shared_keys(), values))
    }

    /// Decodes all rows of a resultset buffer, in wire order.
    ///
    /// Fails with [`HdbError::Usage`](crate::HdbError::Usage) if the parser has no
    /// columns but the buffer is not empty.
    pub fn parse_all(&self, buffer: &[u8]) -> HdbResult<Vec<Record>> {
        if self.plan.is_empty() && !buffer.is_empty() {
            return Err(HdbError::Usage("no columns to decode a non-empty buffer"));
        }
        let mut rdr = Reader::new(buffer, &self.lob_factory);
        let mut records = Vec::new();
        while rdr.has_more() {
            records.push(self.parse_row(&self.plan, &mut rdr)?);
        }
        debug!("parse_all(): {} rows from {} bytes", records.len(), buffer.len());
        Ok(records)
    }

    /// Decodes a parameter buffer into a single record keyed by parameter name.
    pub fn parse_parameters(&self, buffer: &[u8]) -> HdbResult<Record> {
        let plan = if self.config.key_field() == Some(KeyField::Name) {
            None
        } else {
            Some(self.build_decode_plan(Some(KeyField::Name))?)
        };
        let mut rdr = Reader::new(buffer, &self.lob_factory);
        let record = self.parse_row(plan.as_ref().unwrap_or(&self.plan), &mut rdr)?;
        if rdr.has_more() {
            warn!(
                "parse_parameters(): {} unexpected bytes after the parameters",
                rdr.remaining()
            );
        }
        Ok(record)
    }
}

impl Parser {
    /// Decodes a parameter buffer, keeping LOB fields as [`DetachedLob`](crate::DetachedLob)s.
    pub fn parse_parameters_detached(
        columns: Vec<ColumnDescriptor>,
        buffer: &[u8],
    ) -> HdbResult<Record> {
        let config = ParserConfig::default().with_key_field(Some(KeyField::Name));
        Parser::with_config(columns, DetachedLobFactory, config)?.parse_parameters(buffer)
    }
}

#[cfg(test)]
mod tests {
    use super::{KeyField, Parser, ParserConfig};
    use crate::{ColumnDescriptor, DetachedLobFactory, HdbError, HdbValue, TypeId};

    fn columns() -> Vec<ColumnDescriptor> {
        vec![
            ColumnDescriptor::new(TypeId::INT, 0)
                .with_name("P_ID")
                .with_column_display_name("ID"),
            ColumnDescriptor::new(TypeId::BOOLEAN, 0)
                .with_name("P_FLAG")
                .with_column_display_name("FLAG"),
        ]
    }

    #[test]
    fn test_parse_all() {
        let parser = Parser::new(columns(), DetachedLobFactory).unwrap();
        let buffer = [1, 7, 0, 0, 0, 2, 0, 1];
        let records = parser.parse_all(&buffer).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].get("ID"), Some(&HdbValue::INT(7)));
        assert_eq!(records[0].get("FLAG"), Some(&HdbValue::BOOLEAN(true)));
        assert_eq!(records[1].get("ID"), Some(&HdbValue::NULL));
        assert_eq!(records[1].get("FLAG"), Some(&HdbValue::NULL));
        assert_eq!(parser.parse_all(&[]).unwrap().len(), 0);
    }

    #[test]
    fn test_parse_all_without_columns() {
        let parser = Parser::new(Vec::new(), DetachedLobFactory).unwrap();
        assert_eq!(parser.parse_all(&[]).unwrap().len(), 0);
        assert!(matches!(
            parser.parse_all(&[1, 2, 3]),
            Err(HdbError::Usage(_))
        ));
    }

    #[test]
    fn test_parse_parameters() {
        let parser = Parser::new(columns(), DetachedLobFactory).unwrap();
        let record = parser.parse_parameters(&[1, 9, 0, 0, 0, 0, 0xFF]).unwrap();
        assert_eq!(record.get("P_ID"), Some(&HdbValue::INT(9)));
        assert_eq!(record.get("P_FLAG"), Some(&HdbValue::BOOLEAN(false)));
        assert_eq!(record.get("ID"), None);

        let record = Parser::parse_parameters_detached(columns(), &[0, 2]).unwrap();
        assert_eq!(record.get("P_ID"), Some(&HdbValue::NULL));
        assert_eq!(record.get("P_FLAG"), Some(&HdbValue::BOOLEAN(true)));
    }

    #[test]
    fn test_truncated_row() {
        let parser = Parser::with_config(
            columns(),
            DetachedLobFactory,
            ParserConfig::default().with_key_field(Some(KeyField::Name)),
        )
        .unwrap();
        assert!(matches!(
            parser.parse_all(&[1, 7, 0]),
            Err(HdbError::BufferUnderrun { .. })
        ));
    }
}
