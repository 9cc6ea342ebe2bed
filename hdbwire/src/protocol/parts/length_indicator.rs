use crate::{protocol::Reader, HdbResult};

pub(crate) const MAX_1_BYTE_LENGTH: u8 = 245;
const LENGTH_INDICATOR_2BYTE: u8 = 246;
const LENGTH_INDICATOR_4BYTE: u8 = 247;
pub(crate) const LENGTH_INDICATOR_NULL: u8 = 255;

// Returns None for the NULL indicator.
pub(crate) fn parse(l8: u8, rdr: &mut Reader) -> HdbResult<Option<usize>> {
    match l8 {
        0..=MAX_1_BYTE_LENGTH => Ok(Some(usize::from(l8))),
        LENGTH_INDICATOR_2BYTE => Ok(Some(usize::from(rdr.read_u16_le()?))),
        LENGTH_INDICATOR_4BYTE => Ok(Some(rdr.read_u32_le()? as usize)),
        LENGTH_INDICATOR_NULL => Ok(None),
        _ => Err(crate::impl_err!("Unknown length indicator: {l8}")),
    }
}

#[cfg(test)]
mod tests {
    use crate::{DetachedLobFactory, HdbError, Reader};

    #[test]
    fn test_length_indicators() {
        let buffer = [
            245_u8, // one byte
            246, 0x10, 0x01, // two bytes: 272
            247, 0x00, 0x00, 0x01, 0x00, // four bytes: 65536
            255, // NULL
            250, // reserved
        ];
        let factory = DetachedLobFactory;
        let mut rdr = Reader::new(&buffer, &factory);
        assert_eq!(rdr.read_length_indicator().unwrap(), Some(245));
        assert_eq!(rdr.read_length_indicator().unwrap(), Some(272));
        assert_eq!(rdr.read_length_indicator().unwrap(), Some(65_536));
        assert_eq!(rdr.read_length_indicator().unwrap(), None);
        assert!(matches!(
            rdr.read_length_indicator(),
            Err(HdbError::ImplDetailed(_))
        ));
    }
}
