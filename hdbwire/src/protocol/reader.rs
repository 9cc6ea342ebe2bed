use crate::{
    protocol::parts::{hdb_value, length_indicator},
    types_impl::{
        datetime, decimal,
        lob::{self, LobFactory, LobKind},
        wire_decimal::FLOATING_FRACTION,
    },
    HdbError, HdbResult, HdbValue, ReadFunction,
};
use byteorder::{ByteOrder, LittleEndian};
use debug_ignore::DebugIgnore;

/// Signature of a typed read with its argument bound in, as used by compiled decode plans.
pub(crate) type ReadFn = for<'r, 'a> fn(&'r mut Reader<'a>, i16) -> HdbResult<HdbValue>;

/// A cursor over an immutable byte buffer that decodes typed values.
///
/// Every read checks the remaining length first; reading past the end fails with
/// [`HdbError::BufferUnderrun`] and leaves the cursor unchanged.
/// The buffer itself is never modified.
#[derive(Debug)]
pub struct Reader<'a> {
    buffer: &'a [u8],
    position: usize,
    lob_factory: DebugIgnore<&'a dyn LobFactory>,
}

impl<'a> Reader<'a> {
    /// Creates a reader positioned at the start of `buffer`.
    pub fn new(buffer: &'a [u8], lob_factory: &'a dyn LobFactory) -> Self {
        Self {
            buffer,
            position: 0,
            lob_factory: DebugIgnore(lob_factory),
        }
    }

    /// True while unread bytes remain.
    pub fn has_more(&self) -> bool {
        self.position < self.buffer.len()
    }

    /// Number of bytes consumed so far.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Number of unread bytes.
    pub fn remaining(&self) -> usize {
        self.buffer.len() - self.position
    }

    pub(crate) fn lob_factory(&self) -> &'a dyn LobFactory {
        *self.lob_factory
    }

    /// Decodes one value with the given typed read.
    ///
    /// `fraction` is only used by the decimal reads. A DECIMAL without fraction is
    /// treated as a floating decimal; the fixed-point reads require one.
    pub fn read(&mut self, function: ReadFunction, fraction: Option<i16>) -> HdbResult<HdbValue> {
        match function {
            ReadFunction::ReadTinyInt => self.read_tinyint(),
            ReadFunction::ReadSmallInt => self.read_smallint(),
            ReadFunction::ReadInt => self.read_int(),
            ReadFunction::ReadBigInt => self.read_bigint(),
            ReadFunction::ReadDecimal => self.read_decimal(fraction.unwrap_or(FLOATING_FRACTION)),
            ReadFunction::ReadFixed8 => self.read_fixed8(required_fraction(fraction)?),
            ReadFunction::ReadFixed12 => self.read_fixed12(required_fraction(fraction)?),
            ReadFunction::ReadFixed16 => self.read_fixed16(required_fraction(fraction)?),
            ReadFunction::ReadReal => self.read_real(),
            ReadFunction::ReadDouble => self.read_double(),
            ReadFunction::ReadBoolean => self.read_boolean(),
            ReadFunction::ReadString => self.read_string(),
            ReadFunction::ReadAlphanum => self.read_alphanum(),
            ReadFunction::ReadBinary => self.read_binary(),
            ReadFunction::ReadLongDate => self.read_longdate(),
            ReadFunction::ReadSecondDate => self.read_seconddate(),
            ReadFunction::ReadDayDate => self.read_daydate(),
            ReadFunction::ReadSecondTime => self.read_secondtime(),
            ReadFunction::ReadBLob => self.read_blob(),
            ReadFunction::ReadCLob => self.read_clob(),
            ReadFunction::ReadNCLob => self.read_nclob(),
        }
    }

    /// TINYINT: NULL indicator, then one unsigned byte.
    pub fn read_tinyint(&mut self) -> HdbResult<HdbValue> {
        hdb_value::parse_tinyint(self)
    }
    /// SMALLINT: NULL indicator, then an `i16`.
    pub fn read_smallint(&mut self) -> HdbResult<HdbValue> {
        hdb_value::parse_smallint(self)
    }
    /// INT: NULL indicator, then an `i32`.
    pub fn read_int(&mut self) -> HdbResult<HdbValue> {
        hdb_value::parse_int(self)
    }
    /// BIGINT: NULL indicator, then an `i64`.
    pub fn read_bigint(&mut self) -> HdbResult<HdbValue> {
        hdb_value::parse_bigint(self)
    }
    /// DECIMAL in the 16-byte floating format, rescaled to `fraction`.
    pub fn read_decimal(&mut self, fraction: i16) -> HdbResult<HdbValue> {
        decimal::parse_decimal(fraction, self)
    }
    /// FIXED8: NULL indicator, then an `i64` with `fraction` decimal places.
    pub fn read_fixed8(&mut self, fraction: i16) -> HdbResult<HdbValue> {
        decimal::parse_fixed8(fraction, self)
    }
    /// FIXED12: NULL indicator, then a 96-bit integer with `fraction` decimal places.
    pub fn read_fixed12(&mut self, fraction: i16) -> HdbResult<HdbValue> {
        decimal::parse_fixed12(fraction, self)
    }
    /// FIXED16: NULL indicator, then an `i128` with `fraction` decimal places.
    pub fn read_fixed16(&mut self, fraction: i16) -> HdbResult<HdbValue> {
        decimal::parse_fixed16(fraction, self)
    }
    /// REAL: an `f32`; all bits set is NULL.
    pub fn read_real(&mut self) -> HdbResult<HdbValue> {
        hdb_value::parse_real(self)
    }
    /// DOUBLE: an `f64`; all bits set is NULL.
    pub fn read_double(&mut self) -> HdbResult<HdbValue> {
        hdb_value::parse_double(self)
    }
    /// BOOLEAN: one byte, 0 is false, 1 is NULL, 2 is true.
    pub fn read_boolean(&mut self) -> HdbResult<HdbValue> {
        hdb_value::parse_bool(self)
    }
    /// Character types: length indicator, then CESU-8.
    pub fn read_string(&mut self) -> HdbResult<HdbValue> {
        hdb_value::parse_string(self)
    }
    /// ALPHANUM: length indicator, a second indicator, then the characters.
    pub fn read_alphanum(&mut self) -> HdbResult<HdbValue> {
        hdb_value::parse_alphanum(self)
    }
    /// Binary types: length indicator, then the bytes.
    pub fn read_binary(&mut self) -> HdbResult<HdbValue> {
        hdb_value::parse_binary(self)
    }
    /// LONGDATE: an `i64`.
    pub fn read_longdate(&mut self) -> HdbResult<HdbValue> {
        datetime::parse_longdate(self)
    }
    /// SECONDDATE: an `i64`.
    pub fn read_seconddate(&mut self) -> HdbResult<HdbValue> {
        datetime::parse_seconddate(self)
    }
    /// DAYDATE: an `i32`.
    pub fn read_daydate(&mut self) -> HdbResult<HdbValue> {
        datetime::parse_daydate(self)
    }
    /// SECONDTIME: an `i32`.
    pub fn read_secondtime(&mut self) -> HdbResult<HdbValue> {
        datetime::parse_secondtime(self)
    }
    /// BLOB: LOB descriptor, handed to the LOB factory.
    pub fn read_blob(&mut self) -> HdbResult<HdbValue> {
        lob::parse_lob(LobKind::BLob, self)
    }
    /// CLOB: LOB descriptor, handed to the LOB factory.
    pub fn read_clob(&mut self) -> HdbResult<HdbValue> {
        lob::parse_lob(LobKind::CLob, self)
    }
    /// NCLOB: LOB descriptor, handed to the LOB factory.
    pub fn read_nclob(&mut self) -> HdbResult<HdbValue> {
        lob::parse_lob(LobKind::NCLob, self)
    }

    // Primitives

    fn take(&mut self, n: usize) -> HdbResult<&'a [u8]> {
        if n > self.remaining() {
            return Err(HdbError::underrun(n, self.remaining()));
        }
        let slice = &self.buffer[self.position..self.position + n];
        self.position += n;
        Ok(slice)
    }

    pub(crate) fn skip(&mut self, n: usize) -> HdbResult<()> {
        self.take(n).map(|_| ())
    }

    pub(crate) fn read_slice(&mut self, n: usize) -> HdbResult<&'a [u8]> {
        self.take(n)
    }

    pub(crate) fn read_array<const N: usize>(&mut self) -> HdbResult<[u8; N]> {
        let mut array = [0_u8; N];
        array.copy_from_slice(self.take(N)?);
        Ok(array)
    }

    pub(crate) fn read_u8(&mut self) -> HdbResult<u8> {
        Ok(self.take(1)?[0])
    }

    pub(crate) fn read_i8(&mut self) -> HdbResult<i8> {
        Ok(i8::from_le_bytes(self.read_array()?))
    }

    pub(crate) fn read_i16_le(&mut self) -> HdbResult<i16> {
        Ok(LittleEndian::read_i16(self.take(2)?))
    }

    pub(crate) fn read_u16_le(&mut self) -> HdbResult<u16> {
        Ok(LittleEndian::read_u16(self.take(2)?))
    }

    pub(crate) fn read_i32_le(&mut self) -> HdbResult<i32> {
        Ok(LittleEndian::read_i32(self.take(4)?))
    }

    pub(crate) fn read_u32_le(&mut self) -> HdbResult<u32> {
        Ok(LittleEndian::read_u32(self.take(4)?))
    }

    pub(crate) fn read_i64_le(&mut self) -> HdbResult<i64> {
        Ok(LittleEndian::read_i64(self.take(8)?))
    }

    pub(crate) fn read_u64_le(&mut self) -> HdbResult<u64> {
        Ok(LittleEndian::read_u64(self.take(8)?))
    }

    pub(crate) fn read_i128_le(&mut self) -> HdbResult<i128> {
        Ok(LittleEndian::read_i128(self.take(16)?))
    }

    // True if the leading indicator byte of a fixed-size value signals NULL.
    pub(crate) fn read_null_indicator(&mut self) -> HdbResult<bool> {
        Ok(self.read_u8()? == 0)
    }

    // None for NULL.
    pub(crate) fn read_length_indicator(&mut self) -> HdbResult<Option<usize>> {
        let l8 = self.read_u8()?;
        length_indicator::parse(l8, self)
    }
}

fn required_fraction(fraction: Option<i16>) -> HdbResult<i16> {
    fraction.ok_or(HdbError::Usage("fixed-point reads require a fraction"))
}

// Binds a typed read to a function pointer; the fraction argument is ignored by
// the reads that don't take one.
pub(crate) fn bind(function: ReadFunction) -> ReadFn {
    match function {
        ReadFunction::ReadTinyInt => |rdr, _| rdr.read_tinyint(),
        ReadFunction::ReadSmallInt => |rdr, _| rdr.read_smallint(),
        ReadFunction::ReadInt => |rdr, _| rdr.read_int(),
        ReadFunction::ReadBigInt => |rdr, _| rdr.read_bigint(),
        ReadFunction::ReadDecimal => |rdr, fraction| rdr.read_decimal(fraction),
        ReadFunction::ReadFixed8 => |rdr, fraction| rdr.read_fixed8(fraction),
        ReadFunction::ReadFixed12 => |rdr, fraction| rdr.read_fixed12(fraction),
        ReadFunction::ReadFixed16 => |rdr, fraction| rdr.read_fixed16(fraction),
        ReadFunction::ReadReal => |rdr, _| rdr.read_real(),
        ReadFunction::ReadDouble => |rdr, _| rdr.read_double(),
        ReadFunction::ReadBoolean => |rdr, _| rdr.read_boolean(),
        ReadFunction::ReadString => |rdr, _| rdr.read_string(),
        ReadFunction::ReadAlphanum => |rdr, _| rdr.read_alphanum(),
        ReadFunction::ReadBinary => |rdr, _| rdr.read_binary(),
        ReadFunction::ReadLongDate => |rdr, _| rdr.read_longdate(),
        ReadFunction::ReadSecondDate => |rdr, _| rdr.read_seconddate(),
        ReadFunction::ReadDayDate => |rdr, _| rdr.read_daydate(),
        ReadFunction::ReadSecondTime => |rdr, _| rdr.read_secondtime(),
        ReadFunction::ReadBLob => |rdr, _| rdr.read_blob(),
        ReadFunction::ReadCLob => |rdr, _| rdr.read_clob(),
        ReadFunction::ReadNCLob => |rdr, _| rdr.read_nclob(),
    }
}
