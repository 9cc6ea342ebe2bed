use crate::{
    protocol::{util, Reader},
    ColumnDescriptor, DetachedLobFactory, HdbError, HdbResult, Part, PartKind, TypeId,
};

/// Describes whether a parameter is used for input, output, or both.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ParameterDirection {
    /// input parameter
    IN,
    /// input and output parameter
    INOUT,
    /// output parameter
    OUT,
}

impl ParameterDirection {
    fn from_u8(v: u8) -> HdbResult<Self> {
        // it's done with three bits where always exactly one is 1 and the others are 0;
        // the other bits are not used,
        // so we can avoid bit handling and do it the simple way
        match v {
            1 => Ok(Self::IN),
            2 => Ok(Self::INOUT),
            4 => Ok(Self::OUT),
            _ => Err(crate::impl_err!("invalid value for ParameterDirection: {v}")),
        }
    }
}

/// The parameter descriptors of a statement, as sent in a `ParameterMetadata` part.
#[derive(Clone, Debug)]
pub struct ParameterMetadata {
    descriptors: Vec<ColumnDescriptor>,
    directions: Vec<ParameterDirection>,
}

impl ParameterMetadata {
    /// Parses the payload of a `ParameterMetadata` part.
    pub fn parse(part: &Part) -> HdbResult<Self> {
        if part.kind() != PartKind::ParameterMetadata {
            return Err(HdbError::Usage("not a ParameterMetadata part"));
        }
        let count = part.argument_count();
        let mut rdr = Reader::new(part.buffer(), &DetachedLobFactory);
        let mut descriptors = Vec::<ColumnDescriptor>::with_capacity(count);
        let mut directions = Vec::<ParameterDirection>::with_capacity(count);
        let mut name_offsets = Vec::<u32>::with_capacity(count);
        for _ in 0..count {
            // 16 byte each
            let _option = rdr.read_u8()?;
            let value_type = rdr.read_u8()?;
            directions.push(ParameterDirection::from_u8(rdr.read_u8()?)?);
            rdr.read_u8()?;
            name_offsets.push(rdr.read_u32_le()?);
            let length = rdr.read_i16_le()?;
            let fraction = rdr.read_i16_le()?;
            rdr.read_u32_le()?;
            descriptors
                .push(ColumnDescriptor::new(TypeId::try_new(value_type)?, fraction).with_length(length));
        }
        // read the parameter names
        for (descriptor, name_offset) in descriptors.iter_mut().zip(name_offsets.iter()) {
            if name_offset != &u32::MAX {
                let length = rdr.read_u8()?;
                let name = util::string_from_cesu8(rdr.read_slice(usize::from(length))?.to_vec())
                    .map_err(|_| HdbError::Cesu8)?;
                *descriptor = descriptor.clone().with_name(name);
            }
        }
        debug!("ParameterMetadata::parse: {count} parameters");
        Ok(Self {
            descriptors,
            directions,
        })
    }

    /// The descriptors, in parameter order.
    pub fn descriptors(&self) -> &[ColumnDescriptor] {
        &self.descriptors
    }

    /// The direction of the parameter at the given position.
    pub fn direction(&self, index: usize) -> Option<ParameterDirection> {
        self.directions.get(index).copied()
    }

    /// Iterates over the input parameters (IN and INOUT).
    pub fn iter_in(&self) -> impl Iterator<Item = &ColumnDescriptor> {
        self.descriptors
            .iter()
            .zip(self.directions.iter())
            .filter(|(_, d)| matches!(d, ParameterDirection::IN | ParameterDirection::INOUT))
            .map(|(p, _)| p)
    }

    /// Iterates over the output parameters (OUT and INOUT).
    pub fn iter_out(&self) -> impl Iterator<Item = &ColumnDescriptor> {
        self.descriptors
            .iter()
            .zip(self.directions.iter())
            .filter(|(_, d)| matches!(d, ParameterDirection::OUT | ParameterDirection::INOUT))
            .map(|(p, _)| p)
    }

    /// Consumes the metadata, returning the descriptors.
    pub fn into_inner(self) -> Vec<ColumnDescriptor> {
        self.descriptors
    }
}
