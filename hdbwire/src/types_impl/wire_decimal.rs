use bigdecimal::BigDecimal;
use byteorder::{ByteOrder, LittleEndian};
use num_bigint::{BigInt, Sign};

// The "wire decimal" is the 16-byte floating transport representation of HANA's DECIMAL type:
//
// MANTISSA     113-bit     Integer mantissa
//                          (byte 0; byte 14, lowest bit)
// EXPONENT      14-bit     Exponent, biased with 6176, leading to a range -6143 to +6144
//                          (byte 14, above lowest bit; byte 15, below highest bit)
// SIGN           1-bit     Sign: 0 is positive, 1 is negative
//                          (byte 15, highest bit)
//
// The represented number is (10^EXPONENT)*MANTISSA.

const EXPONENT_BIAS: i64 = 6176;

// The server sends this fraction for floating decimals that have no fixed scale.
pub(crate) const FLOATING_FRACTION: i16 = i16::MAX;

pub(crate) fn is_null(raw: &[u8; 16]) -> bool {
    raw[15] == 112 && raw[0..=14].iter().all(|el| *el == 0)
}

// Converts a non-null wire decimal; the result has exactly the given fraction as scale
// unless the fraction signals a floating decimal.
pub(crate) fn wire_decimal_to_big_decimal(mut raw: [u8; 16], fraction: i16) -> BigDecimal {
    let is_negative = (raw[15] & 0b_1000_0000_u8) != 0;
    raw[15] &= 0b_0111_1111_u8;
    let exponent = i64::from(LittleEndian::read_u16(&raw[14..=15]) >> 1) - EXPONENT_BIAS;
    raw[14] &= 0b_0000_0001_u8;
    let mantissa = BigInt::from_bytes_le(Sign::Plus, &raw[0..=14]);

    let big_decimal = if is_negative {
        -BigDecimal::new(mantissa, -exponent)
    } else {
        BigDecimal::new(mantissa, -exponent)
    };

    if fraction == FLOATING_FRACTION {
        big_decimal
    } else {
        big_decimal.with_scale(i64::from(fraction))
    }
}
