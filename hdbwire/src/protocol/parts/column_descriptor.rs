use crate::TypeId;

/// Describes one column of a result set, or one parameter of a statement.
///
/// Result columns are identified by their display name, parameters by their name;
/// the `fraction` is the scale of decimal values.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ColumnDescriptor {
    data_type: TypeId,
    name: Option<String>,
    column_display_name: Option<String>,
    fraction: i16,
    length: i16,
}

impl ColumnDescriptor {
    /// Creates a descriptor without names.
    pub fn new(data_type: TypeId, fraction: i16) -> Self {
        Self {
            data_type,
            name: None,
            column_display_name: None,
            fraction,
            length: 0,
        }
    }

    /// Sets the name, as used for parameters.
    #[must_use]
    pub fn with_name<S: Into<String>>(mut self, name: S) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the display name, as used for result columns.
    #[must_use]
    pub fn with_column_display_name<S: Into<String>>(mut self, column_display_name: S) -> Self {
        self.column_display_name = Some(column_display_name.into());
        self
    }

    pub(crate) fn with_length(mut self, length: i16) -> Self {
        self.length = length;
        self
    }

    /// The value type.
    pub fn data_type(&self) -> TypeId {
        self.data_type
    }

    /// The name, if any.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// The display name, if any.
    pub fn column_display_name(&self) -> Option<&str> {
        self.column_display_name.as_deref()
    }

    /// The scale of decimal values.
    pub fn fraction(&self) -> i16 {
        self.fraction
    }

    /// The declared length (or precision), as far as the server reported it.
    pub fn length(&self) -> i16 {
        self.length
    }
}

impl std::fmt::Display for ColumnDescriptor {
    fn fmt(&self, fmt: &mut std::fmt::Formatter) -> std::fmt::Result {
        let id = self
            .column_display_name
            .as_deref()
            .or(self.name.as_deref())
            .unwrap_or("?");
        if self.data_type.is_decimal() {
            write!(fmt, "{id} {}({})", self.data_type, self.fraction)
        } else {
            write!(fmt, "{id} {}", self.data_type)
        }
    }
}
