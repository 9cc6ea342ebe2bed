use crate::{
    protocol::{util, Reader},
    types::{DayDate, LongDate, SecondDate, SecondTime},
    types_impl::lob::LobHandle,
    HdbResult,
};
use bigdecimal::BigDecimal;
use serde::ser::{Serialize, Serializer};

const ALPHANUM_PURELY_NUMERIC: u8 = 0b_1000_0000_u8;
const ALPHANUM_LENGTH_MASK: u8 = 0b_0111_1111_u8;

/// Enum for all database value types that can be decoded.
#[allow(non_camel_case_types)]
pub enum HdbValue {
    /// Representation of a database NULL value.
    NULL,
    /// Stores an 8-bit unsigned integer.
    /// The minimum value is 0. The maximum value is 255.
    TINYINT(u8),
    /// Stores a 16-bit signed integer.
    /// The minimum value is -32,768. The maximum value is 32,767.
    SMALLINT(i16),
    /// Stores a 32-bit signed integer.
    /// The minimum value is -2,147,483,648. The maximum value is 2,147,483,647.
    INT(i32),
    /// Stores a 64-bit signed integer.
    /// The minimum value is -9,223,372,036,854,775,808.
    /// The maximum value is 9,223,372,036,854,775,807.
    BIGINT(i64),

    /// Representation for fixed-point decimal values.
    ///
    /// The scale is the column's fraction, unless the column is a floating decimal.
    DECIMAL(BigDecimal),

    /// Stores a single-precision 32-bit floating-point number.
    REAL(f32),
    /// Stores a double-precision 64-bit floating-point number.
    DOUBLE(f64),

    /// BOOLEAN stores boolean values, which are TRUE or FALSE.
    BOOLEAN(bool),

    /// The DB returns all valid Strings as type STRING, independent of the concrete column type.
    STRING(String),

    /// In rare cases, when the database sends invalid CESU-8, we fall back to this type.
    DBSTRING(Vec<u8>),

    /// Stores binary data; also used for the spatial types GEOMETRY and POINT.
    BINARY(Vec<u8>),

    /// Timestamp with 10^-7 seconds precision, uses eight bytes.
    LONGDATE(LongDate),
    /// TIMESTAMP with second precision.
    SECONDDATE(SecondDate),
    /// DATE with day precision.
    DAYDATE(DayDate),
    /// TIME with second precision.
    SECONDTIME(SecondTime),

    /// A BLOB, CLOB or NCLOB, as produced by the [`LobFactory`](crate::LobFactory).
    LOB(Box<dyn LobHandle>),
}

impl HdbValue {
    /// Returns true if the value is a NULL value.
    pub fn is_null(&self) -> bool {
        matches!(*self, HdbValue::NULL)
    }

    /// The LOB handle, if this is a LOB value.
    pub fn as_lob(&self) -> Option<&dyn LobHandle> {
        match self {
            HdbValue::LOB(handle) => Some(handle.as_ref()),
            _ => None,
        }
    }
}

pub(crate) fn parse_tinyint(rdr: &mut Reader) -> HdbResult<HdbValue> {
    Ok(if rdr.read_null_indicator()? {
        HdbValue::NULL
    } else {
        HdbValue::TINYINT(rdr.read_u8()?)
    })
}

pub(crate) fn parse_smallint(rdr: &mut Reader) -> HdbResult<HdbValue> {
    Ok(if rdr.read_null_indicator()? {
        HdbValue::NULL
    } else {
        HdbValue::SMALLINT(rdr.read_i16_le()?)
    })
}

pub(crate) fn parse_int(rdr: &mut Reader) -> HdbResult<HdbValue> {
    Ok(if rdr.read_null_indicator()? {
        HdbValue::NULL
    } else {
        HdbValue::INT(rdr.read_i32_le()?)
    })
}

pub(crate) fn parse_bigint(rdr: &mut Reader) -> HdbResult<HdbValue> {
    Ok(if rdr.read_null_indicator()? {
        HdbValue::NULL
    } else {
        HdbValue::BIGINT(rdr.read_i64_le()?)
    })
}

pub(crate) fn parse_real(rdr: &mut Reader) -> HdbResult<HdbValue> {
    let bits = rdr.read_u32_le()?;
    Ok(if bits == u32::MAX {
        HdbValue::NULL
    } else {
        HdbValue::REAL(f32::from_bits(bits))
    })
}

pub(crate) fn parse_double(rdr: &mut Reader) -> HdbResult<HdbValue> {
    let bits = rdr.read_u64_le()?;
    Ok(if bits == u64::MAX {
        HdbValue::NULL
    } else {
        HdbValue::DOUBLE(f64::from_bits(bits))
    })
}

pub(crate) fn parse_bool(rdr: &mut Reader) -> HdbResult<HdbValue> {
    //(0x00 = FALSE, 0x01 = NULL, 0x02 = TRUE)
    match rdr.read_u8()? {
        0 => Ok(HdbValue::BOOLEAN(false)),
        1 => Ok(HdbValue::NULL),
        2 => Ok(HdbValue::BOOLEAN(true)),
        i => Err(crate::impl_err!("parse_bool: got bad value {i}")),
    }
}

pub(crate) fn parse_string(rdr: &mut Reader) -> HdbResult<HdbValue> {
    match rdr.read_length_indicator()? {
        None => Ok(HdbValue::NULL),
        Some(len) => {
            // In very most cases, we get correct cesu-8.
            // If not, we try utf8, and if that fails too, the original bytes are kept.
            let bytes = rdr.read_slice(len)?.to_vec();
            Ok(match util::string_from_cesu8(bytes) {
                Ok(s) => HdbValue::STRING(s),
                Err(bytes) => {
                    debug!("parse_string: keeping {} bytes of invalid CESU-8", bytes.len());
                    HdbValue::DBSTRING(bytes)
                }
            })
        }
    }
}

pub(crate) fn parse_alphanum(rdr: &mut Reader) -> HdbResult<HdbValue> {
    let Some(indicator1) = rdr.read_length_indicator()? else {
        return Ok(HdbValue::NULL);
    };
    // the first byte of the payload is a second indicator
    let data_length = indicator1
        .checked_sub(1)
        .ok_or_else(|| crate::impl_err!("ALPHANUM value without indicator"))?;
    let indicator2 = rdr.read_u8()?;
    let value = rdr.read_slice(data_length)?;

    let bytes = if indicator2 & ALPHANUM_PURELY_NUMERIC == 0 {
        value.to_vec()
    } else {
        // purely numeric -> prefix with leading zeros
        let field_length = usize::from(indicator2 & ALPHANUM_LENGTH_MASK);
        let mut padded = vec![b'0'; field_length.saturating_sub(data_length)];
        padded.extend_from_slice(value);
        padded
    };
    Ok(match util::string_from_cesu8(bytes) {
        Ok(s) => HdbValue::STRING(s),
        Err(bytes) => HdbValue::DBSTRING(bytes),
    })
}

pub(crate) fn parse_binary(rdr: &mut Reader) -> HdbResult<HdbValue> {
    match rdr.read_length_indicator()? {
        None => Ok(HdbValue::NULL),
        Some(len) => Ok(HdbValue::BINARY(rdr.read_slice(len)?.to_vec())),
    }
}

impl std::fmt::Display for HdbValue {
    fn fmt(&self, fmt: &mut std::fmt::Formatter) -> std::fmt::Result {
        match *self {
            HdbValue::NULL => write!(fmt, "<NULL>"),
            HdbValue::TINYINT(value) => write!(fmt, "{value}"),
            HdbValue::SMALLINT(value) => write!(fmt, "{value}"),
            HdbValue::INT(value) => write!(fmt, "{value}"),
            HdbValue::BIGINT(value) => write!(fmt, "{value}"),

            HdbValue::DECIMAL(ref value) => write!(fmt, "{value}"),

            HdbValue::REAL(value) => write!(fmt, "{value}"),
            HdbValue::DOUBLE(value) => write!(fmt, "{value}"),
            HdbValue::DBSTRING(ref bytes) => {
                if bytes.len() < 5_000 {
                    write!(fmt, "{bytes:?}")
                } else {
                    write!(fmt, "<STRING length = {}>", bytes.len())
                }
            }
            HdbValue::STRING(ref value) => {
                if value.len() < 10_000 {
                    write!(fmt, "{value}")
                } else {
                    write!(fmt, "<STRING length = {}>", value.len())
                }
            }
            HdbValue::BINARY(ref vec) => write!(fmt, "<BINARY length = {}>", vec.len()),
            HdbValue::LOB(ref handle) => {
                let descriptor = handle.descriptor();
                write!(
                    fmt,
                    "<{:?} length = {}>",
                    descriptor.kind, descriptor.total_byte_length
                )
            }
            HdbValue::BOOLEAN(value) => write!(fmt, "{value}"),
            HdbValue::LONGDATE(ref value) => write!(fmt, "{value}"),
            HdbValue::SECONDDATE(ref value) => write!(fmt, "{value}"),
            HdbValue::DAYDATE(ref value) => write!(fmt, "{value}"),
            HdbValue::SECONDTIME(ref value) => write!(fmt, "{value}"),
        }
    }
}

impl std::fmt::Debug for HdbValue {
    fn fmt(&self, fmt: &mut std::fmt::Formatter) -> std::fmt::Result {
        std::fmt::Display::fmt(&self, fmt)
    }
}

impl std::cmp::PartialEq for HdbValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (HdbValue::NULL, HdbValue::NULL) => true,
            (HdbValue::TINYINT(l), HdbValue::TINYINT(r)) => l == r,
            (HdbValue::SMALLINT(l), HdbValue::SMALLINT(r)) => l == r,
            (HdbValue::INT(l), HdbValue::INT(r)) => l == r,
            (HdbValue::BIGINT(l), HdbValue::BIGINT(r)) => l == r,
            (HdbValue::DECIMAL(l), HdbValue::DECIMAL(r)) => l == r,
            (HdbValue::REAL(l), HdbValue::REAL(r)) => l.to_bits() == r.to_bits(),
            (HdbValue::DOUBLE(l), HdbValue::DOUBLE(r)) => l.to_bits() == r.to_bits(),
            (HdbValue::BOOLEAN(l), HdbValue::BOOLEAN(r)) => l == r,
            (HdbValue::STRING(l), HdbValue::STRING(r)) => l == r,
            (HdbValue::DBSTRING(l), HdbValue::DBSTRING(r))
            | (HdbValue::BINARY(l), HdbValue::BINARY(r)) => l == r,
            (HdbValue::LONGDATE(l), HdbValue::LONGDATE(r)) => l == r,
            (HdbValue::SECONDDATE(l), HdbValue::SECONDDATE(r)) => l == r,
            (HdbValue::DAYDATE(l), HdbValue::DAYDATE(r)) => l == r,
            (HdbValue::SECONDTIME(l), HdbValue::SECONDTIME(r)) => l == r,
            (HdbValue::LOB(l), HdbValue::LOB(r)) => l.descriptor() == r.descriptor(),
            _ => false,
        }
    }
}

impl std::cmp::PartialEq<i32> for HdbValue {
    fn eq(&self, rhs: &i32) -> bool {
        match self {
            HdbValue::TINYINT(i) => i32::from(*i) == *rhs,
            HdbValue::SMALLINT(i) => i32::from(*i) == *rhs,
            HdbValue::INT(i) => *i == *rhs,
            HdbValue::BIGINT(i) => *i == i64::from(*rhs),
            _ => false,
        }
    }
}

impl std::cmp::PartialEq<&str> for HdbValue {
    fn eq(&self, rhs: &&str) -> bool {
        match self {
            HdbValue::STRING(ref s) => s == rhs,
            _ => false,
        }
    }
}

// Decimals and date/time values are serialized as their display strings,
// so that no precision is lost in formats like JSON.
impl Serialize for HdbValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match *self {
            HdbValue::NULL => serializer.serialize_none(),
            HdbValue::TINYINT(v) => serializer.serialize_u8(v),
            HdbValue::SMALLINT(v) => serializer.serialize_i16(v),
            HdbValue::INT(v) => serializer.serialize_i32(v),
            HdbValue::BIGINT(v) => serializer.serialize_i64(v),
            HdbValue::REAL(v) => serializer.serialize_f32(v),
            HdbValue::DOUBLE(v) => serializer.serialize_f64(v),
            HdbValue::BOOLEAN(v) => serializer.serialize_bool(v),
            HdbValue::STRING(ref s) => serializer.serialize_str(s),
            HdbValue::DBSTRING(ref bytes) | HdbValue::BINARY(ref bytes) => {
                serializer.serialize_bytes(bytes)
            }
            HdbValue::DECIMAL(ref v) => serializer.collect_str(v),
            HdbValue::LONGDATE(ref v) => serializer.collect_str(v),
            HdbValue::SECONDDATE(ref v) => serializer.collect_str(v),
            HdbValue::DAYDATE(ref v) => serializer.collect_str(v),
            HdbValue::SECONDTIME(ref v) => serializer.collect_str(v),
            HdbValue::LOB(ref handle) => handle.descriptor().serialize(serializer),
        }
    }
}
