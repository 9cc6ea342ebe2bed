use crate::{
    protocol::Reader,
    types_impl::wire_decimal::{is_null, wire_decimal_to_big_decimal},
    HdbValue, HdbResult,
};
use bigdecimal::BigDecimal;
use num::FromPrimitive;
use num_bigint::BigInt;

pub(crate) fn parse_decimal(fraction: i16, rdr: &mut Reader) -> HdbResult<HdbValue> {
    trace!("parse DECIMAL");
    let raw: [u8; 16] = rdr.read_array()?;
    Ok(if is_null(&raw) {
        HdbValue::NULL
    } else {
        HdbValue::DECIMAL(wire_decimal_to_big_decimal(raw, fraction))
    })
}

pub(crate) fn parse_fixed8(fraction: i16, rdr: &mut Reader) -> HdbResult<HdbValue> {
    trace!("parse FIXED8");
    if rdr.read_null_indicator()? {
        return Ok(HdbValue::NULL);
    }
    let bigint = BigInt::from_i64(rdr.read_i64_le()?).unwrap_or_default();
    Ok(HdbValue::DECIMAL(BigDecimal::new(bigint, i64::from(fraction))))
}

pub(crate) fn parse_fixed12(fraction: i16, rdr: &mut Reader) -> HdbResult<HdbValue> {
    trace!("parse FIXED12");
    if rdr.read_null_indicator()? {
        return Ok(HdbValue::NULL);
    }
    let bigint = BigInt::from_signed_bytes_le(rdr.read_slice(12)?);
    Ok(HdbValue::DECIMAL(BigDecimal::new(bigint, i64::from(fraction))))
}

pub(crate) fn parse_fixed16(fraction: i16, rdr: &mut Reader) -> HdbResult<HdbValue> {
    trace!("parse FIXED16");
    if rdr.read_null_indicator()? {
        return Ok(HdbValue::NULL);
    }
    let bigint = BigInt::from_i128(rdr.read_i128_le()?).unwrap_or_default();
    Ok(HdbValue::DECIMAL(BigDecimal::new(bigint, i64::from(fraction))))
}
