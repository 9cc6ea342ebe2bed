use crate::{
    protocol::{util, Reader},
    ColumnDescriptor, DetachedLobFactory, HdbError, HdbResult, Part, PartKind, TypeId,
};
use std::ops::Deref;
use vec_map::VecMap;

/// List of the column descriptors of a resultset, as sent in a
/// `ResultSetMetadata` part.
#[derive(Clone, Debug)]
pub struct ResultSetMetadata(Vec<ColumnDescriptor>);

impl Deref for ResultSetMetadata {
    type Target = Vec<ColumnDescriptor>;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl std::fmt::Display for ResultSetMetadata {
    // Writes a header and then the data
    fn fmt(&self, fmt: &mut std::fmt::Formatter) -> std::fmt::Result {
        writeln!(fmt)?;
        for descriptor in &self.0 {
            write!(fmt, "{}, ", descriptor.column_display_name().unwrap_or(""))?;
        }
        writeln!(fmt)?;
        Ok(())
    }
}

struct InnerColumn {
    type_id: TypeId,
    fraction: i16,
    length: i16,
    columnname_idx: u32,
    displayname_idx: u32,
}

impl ResultSetMetadata {
    /// Parses the payload of a `ResultSetMetadata` part.
    pub fn parse(part: &Part) -> HdbResult<Self> {
        if part.kind() != PartKind::ResultSetMetadata {
            return Err(HdbError::Usage("not a ResultSetMetadata part"));
        }
        let count = part.argument_count();
        let mut rdr = Reader::new(part.buffer(), &DetachedLobFactory);
        let mut inner_columns = Vec::<InnerColumn>::with_capacity(count);
        let mut names = VecMap::<String>::new();

        trace!("ResultSetMetadata::parse: Got count = {count}");
        for _ in 0..count {
            let _column_options = rdr.read_u8()?;
            let type_code = rdr.read_u8()?;
            let fraction = rdr.read_i16_le()?;
            let length = rdr.read_i16_le()?;
            rdr.read_i16_le()?;
            let tablename_idx = rdr.read_u32_le()?;
            add_to_names(&mut names, tablename_idx);
            let schemaname_idx = rdr.read_u32_le()?;
            add_to_names(&mut names, schemaname_idx);
            let columnname_idx = rdr.read_u32_le()?;
            add_to_names(&mut names, columnname_idx);
            let displayname_idx = rdr.read_u32_le()?;
            add_to_names(&mut names, displayname_idx);

            inner_columns.push(InnerColumn {
                type_id: TypeId::try_new(type_code)?,
                fraction,
                length,
                columnname_idx,
                displayname_idx,
            });
        }
        // now we read the names
        let mut offset = 0;
        for _ in 0..names.len() {
            let nl = rdr.read_u8()?;
            let name = util::string_from_cesu8(rdr.read_slice(usize::from(nl))?.to_vec())
                .map_err(|_| HdbError::Cesu8)?;
            trace!("offset = {offset}, name = {name}");
            names.insert(offset, name);
            offset += usize::from(nl) + 1;
        }

        let lookup = |idx: u32| names.get(idx as usize).cloned();
        Ok(ResultSetMetadata(
            inner_columns
                .into_iter()
                .map(|inner| {
                    let mut descriptor = ColumnDescriptor::new(inner.type_id, inner.fraction)
                        .with_length(inner.length);
                    if let Some(name) = lookup(inner.columnname_idx) {
                        descriptor = descriptor.with_name(name);
                    }
                    if let Some(name) = lookup(inner.displayname_idx) {
                        descriptor = descriptor.with_column_display_name(name);
                    }
                    descriptor
                })
                .collect(),
        ))
    }

    /// Consumes the metadata, returning the column descriptors.
    pub fn into_inner(self) -> Vec<ColumnDescriptor> {
        self.0
    }
}

fn add_to_names(names: &mut VecMap<String>, offset: u32) {
    if offset != u32::MAX {
        let offset = offset as usize;
        if !names.contains_key(offset) {
            names.insert(offset, String::new());
        };
    }
}
