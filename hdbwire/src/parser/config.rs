/// How a [`DecodePlan`](crate::DecodePlan) is executed.
///
/// Both strategies decode identical values from identical input; they differ only
/// in how the typed read of a step is found.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum DecodeStrategy {
    /// Walks the plan and dispatches on each step's [`ReadFunction`](crate::ReadFunction).
    Interpreted,
    /// Binds each step to a function pointer when the plan is built,
    /// and calls these directly per row.
    #[default]
    Compiled,
}

/// Which identifier of a [`ColumnDescriptor`](crate::ColumnDescriptor) keys the
/// fields of a [`Record`](crate::Record).
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum KeyField {
    /// The name, as used for parameters.
    Name,
    /// The display name, as used for result columns.
    ColumnDisplayName,
}

/// Configuration of a [`Parser`](crate::Parser).
///
/// The default decodes with [`DecodeStrategy::Compiled`] and keys records by
/// [`KeyField::ColumnDisplayName`].
///
/// ```rust,ignore
/// let config = ParserConfig::default()
///     .with_strategy(DecodeStrategy::Interpreted)
///     .with_key_field(None);
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ParserConfig {
    strategy: DecodeStrategy,
    key_field: Option<KeyField>,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            strategy: DecodeStrategy::default(),
            key_field: Some(KeyField::ColumnDisplayName),
        }
    }
}

impl ParserConfig {
    /// Sets the decode strategy.
    #[must_use]
    pub fn with_strategy(mut self, strategy: DecodeStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Sets the key field of the default plan; `None` keys fields by position.
    #[must_use]
    pub fn with_key_field(mut self, key_field: Option<KeyField>) -> Self {
        self.key_field = key_field;
        self
    }

    /// The decode strategy.
    pub fn strategy(&self) -> DecodeStrategy {
        self.strategy
    }

    /// The key field of the default plan.
    pub fn key_field(&self) -> Option<KeyField> {
        self.key_field
    }
}
