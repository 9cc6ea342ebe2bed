use crate::{
    protocol::{PartAttributes, PartKind, Reader},
    HdbError, HdbResult,
};
use byteorder::{LittleEndian, WriteBytesExt};

pub(crate) const PART_HEADER_SIZE: usize = 16;

// Bytes per line of the hex dump in inspect().
const INSPECT_LINE_WIDTH: usize = 32;

/// A typed payload section of a [`Segment`](crate::Segment).
///
/// The buffer is kept undecoded; tabular parts are decoded with a
/// [`Parser`](crate::Parser), metadata parts with
/// [`ResultSetMetadata`](crate::ResultSetMetadata) or
/// [`ParameterMetadata`](crate::ParameterMetadata).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Part {
    kind: PartKind,
    attributes: PartAttributes,
    argument_count: usize,
    buffer: Vec<u8>,
}

impl Part {
    /// Creates a part without attributes.
    pub fn new(kind: PartKind, argument_count: usize, buffer: Vec<u8>) -> Self {
        Self {
            kind,
            attributes: PartAttributes::default(),
            argument_count,
            buffer,
        }
    }

    /// Sets the attributes.
    #[must_use]
    pub fn with_attributes(mut self, attributes: PartAttributes) -> Self {
        self.attributes = attributes;
        self
    }

    /// The kind of the part.
    pub fn kind(&self) -> PartKind {
        self.kind
    }

    /// The attributes of the part.
    pub fn attributes(&self) -> PartAttributes {
        self.attributes
    }

    /// Number of arguments (e.g. rows, or fields) in the buffer.
    pub fn argument_count(&self) -> usize {
        self.argument_count
    }

    /// The raw payload.
    pub fn buffer(&self) -> &[u8] {
        &self.buffer
    }

    /// Consumes the part, returning the raw payload.
    pub fn into_buffer(self) -> Vec<u8> {
        self.buffer
    }

    // Header plus payload, and padding if requested.
    pub(crate) fn size(&self, with_padding: bool) -> usize {
        let size = self.buffer.len();
        PART_HEADER_SIZE + if with_padding { size + padsize(size) } else { size }
    }

    // Writes header, payload and padding; returns what remains of remaining_bufsize.
    #[allow(clippy::cast_possible_truncation)]
    #[allow(clippy::cast_possible_wrap)]
    pub(crate) fn emit(&self, remaining_bufsize: u32, w: &mut Vec<u8>) -> HdbResult<u32> {
        debug!(
            "Serializing part of kind {:?} with {} bytes",
            self.kind,
            self.buffer.len()
        );
        // PART HEADER 16 bytes
        w.write_i8(self.kind as i8)?;
        w.write_u8(self.attributes.bits())?;
        match self.argument_count {
            i if i < i16::MAX as usize => {
                w.write_i16::<LittleEndian>(i as i16)?;
                w.write_i32::<LittleEndian>(0)?;
            }
            i if i32::try_from(i).is_ok() => {
                w.write_i16::<LittleEndian>(-1)?;
                w.write_i32::<LittleEndian>(i as i32)?;
            }
            _ => {
                return Err(HdbError::Impl("argument count bigger than i32::MAX"));
            }
        }
        let size = i32::try_from(self.buffer.len())
            .map_err(|_| HdbError::Impl("part buffer bigger than i32::MAX"))?;
        w.write_i32::<LittleEndian>(size)?;
        w.write_i32::<LittleEndian>(i32::try_from(remaining_bufsize).unwrap_or(i32::MAX))?;

        w.extend_from_slice(&self.buffer);
        let padsize = padsize(self.buffer.len());
        w.resize(w.len() + padsize, 0_u8);

        let consumed = u32::try_from(self.size(true)).unwrap_or(u32::MAX);
        trace!(
            "remaining_bufsize: {}, size: {}, padsize: {}",
            remaining_bufsize,
            size,
            padsize
        );
        Ok(remaining_bufsize.saturating_sub(consumed))
    }

    // The last part of a segment may come without padding.
    #[allow(clippy::cast_sign_loss)]
    pub(crate) fn parse(rdr: &mut Reader, last: bool) -> HdbResult<Self> {
        let (kind, attributes, arg_size, argument_count) = parse_header(rdr)?;
        debug!(
            "parse() found part of kind {kind:?} with attributes {attributes:?}, \
             arg_size {arg_size} and no_of_args {argument_count}",
        );
        if arg_size > rdr.remaining() {
            return Err(HdbError::malformed(format!(
                "part of kind {kind:?} declares {arg_size} bytes, but only {} are left",
                rdr.remaining()
            )));
        }
        let buffer = rdr.read_slice(arg_size)?.to_vec();

        let padsize = 7 - (arg_size + 7) % 8;
        if padsize <= rdr.remaining() {
            trace!("parse() skips over {padsize} padding bytes");
            rdr.skip(padsize)?;
        } else if !last {
            return Err(HdbError::malformed(format!(
                "part of kind {kind:?} is not padded"
            )));
        }

        Ok(Self {
            kind,
            attributes,
            argument_count,
            buffer,
        })
    }

    pub(crate) fn inspect(&self, out: &mut String) {
        out.push_str("    {\n");
        out.push_str(&format!("      kind: {},\n", self.kind));
        out.push_str(&format!("      attributes: {},\n", self.attributes.bits()));
        out.push_str(&format!("      argumentCount: {},\n", self.argument_count));
        if self.buffer.is_empty() {
            out.push_str("      buffer: []\n");
        } else {
            out.push_str("      buffer: [\n");
            for chunk in self.buffer.chunks(INSPECT_LINE_WIDTH) {
                out.push_str(&format!("        {}\n", hex::encode(chunk)));
            }
            out.push_str("      ]\n");
        }
        out.push_str("    }");
    }
}

#[allow(clippy::cast_sign_loss)]
fn parse_header(rdr: &mut Reader) -> HdbResult<(PartKind, PartAttributes, usize, usize)> {
    if rdr.remaining() < PART_HEADER_SIZE {
        return Err(HdbError::malformed(format!(
            "incomplete part header: {} bytes",
            rdr.remaining()
        )));
    }
    // PART HEADER: 16 bytes
    let kind = PartKind::from_i8(rdr.read_i8()?)?; // I1
    let attributes = PartAttributes::new(rdr.read_u8()?); // U1 (documented as I1)
    let no_of_argsi16 = rdr.read_i16_le()?; // I2
    let no_of_argsi32 = rdr.read_i32_le()?; // I4
    let arg_size = rdr.read_i32_le()?; // I4
    rdr.read_i32_le()?; // I4 remaining_packet_size

    let no_of_args = if no_of_argsi16 == -1 {
        no_of_argsi32
    } else {
        i32::from(no_of_argsi16)
    };
    if no_of_args < 0 || arg_size < 0 {
        return Err(HdbError::malformed(format!(
            "negative argument count ({no_of_args}) or buffer length ({arg_size})"
        )));
    }
    Ok((kind, attributes, arg_size as usize, no_of_args as usize))
}

pub(crate) fn padsize(size: usize) -> usize {
    match size {
        0 => 0,
        _ => 7 - (size - 1) % 8,
    }
}
