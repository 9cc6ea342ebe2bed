// --- CESU8 Stuff --- //

// Consumes the cesu8 bytes, returns a String with minimal allocation.
// Valid UTF-8 is accepted as well; if both decodings fail, the bytes are handed back.
pub(crate) fn string_from_cesu8(bytes: Vec<u8>) -> Result<String, Vec<u8>> {
    String::from_utf8(bytes).or_else(|e| {
        let bytes = e.into_bytes();
        let decoded = cesu8::from_cesu8(&bytes).map(|s| s.to_string()).ok();
        decoded.ok_or(bytes)
    })
}

#[cfg(test)]
mod tests {
    use super::string_from_cesu8;

    #[test]
    fn test_cesu8() {
        let s = "a\u{e4}\u{1F600}";
        let cesu8 = cesu8::to_cesu8(s).to_vec();
        assert_eq!(cesu8.len(), s.len() + 2);
        assert_eq!(string_from_cesu8(cesu8).unwrap(), s);
        assert_eq!(string_from_cesu8(s.as_bytes().to_vec()).unwrap(), s);
        assert_eq!(string_from_cesu8(vec![0xFF]).unwrap_err(), vec![0xFF]);
    }
}
