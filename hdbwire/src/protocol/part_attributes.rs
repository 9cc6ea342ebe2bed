use std::fmt;

// Last part in a sequence of parts (FETCH, array command EXECUTE)
const LAST_PACKET: u8 = 0b_0000_0001;

// Part in a sequence of parts
const NEXT_PACKET: u8 = 0b_0000_0010;

// First part in a sequence of parts
const FIRST_PACKET: u8 = 0b_0000_0100;

// Empty part, caused by “row not found” error
const ROW_NOT_FOUND: u8 = 0b_0000_1000;

// The resultset that produced this part is closed
const RESULTSET_IS_CLOSED: u8 = 0b_0001_0000;

/// Bit pattern in the header of a [`Part`](crate::Part).
#[derive(Clone, Copy, Default, Eq, PartialEq)]
pub struct PartAttributes(u8);
impl PartAttributes {
    /// Wraps the raw bits.
    pub fn new(bits: u8) -> Self {
        Self(bits)
    }

    /// The raw bits.
    pub fn bits(self) -> u8 {
        self.0
    }

    /// Last part in a sequence of parts.
    pub fn is_last_packet(self) -> bool {
        (self.0 & LAST_PACKET) != 0
    }
    /// Part in a sequence of parts.
    pub fn has_next_packet(self) -> bool {
        (self.0 & NEXT_PACKET) != 0
    }
    /// First part in a sequence of parts.
    pub fn is_first_packet(self) -> bool {
        (self.0 & FIRST_PACKET) != 0
    }
    /// Empty part, caused by “row not found” error.
    pub fn row_not_found(self) -> bool {
        (self.0 & ROW_NOT_FOUND) != 0
    }
    /// The resultset that produced this part is closed.
    pub fn resultset_is_closed(self) -> bool {
        (self.0 & RESULTSET_IS_CLOSED) != 0
    }
}

impl fmt::Debug for PartAttributes {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.0 == 0 {
            write!(f, "(NONE)")
        } else {
            let mut b = false;
            write!(f, "(")?;
            if self.is_last_packet() {
                b = true;
                write!(f, "IS_LAST_PACKET")?;
            };
            if self.has_next_packet() {
                b = w_and(b, f)?;
                write!(f, "HAS_NEXT_PACKET")?;
            };
            if self.is_first_packet() {
                b = w_and(b, f)?;
                write!(f, "IS_FIRST_PACKET_IN_A_SEQUENCE")?;
            };
            if self.row_not_found() {
                b = w_and(b, f)?;
                write!(f, "ROW_NOT_FOUND")?;
            };
            if self.resultset_is_closed() {
                w_and(b, f)?;
                write!(f, "RESULTSET_CLOSED")?;
            };
            write!(f, ")")
        }
    }
}

impl fmt::Binary for PartAttributes {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:b}", self.0)
    }
}

// write an ampersand (&) if required
fn w_and(b: bool, f: &mut fmt::Formatter) -> Result<bool, fmt::Error> {
    if b {
        write!(f, " & ")?;
    }
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::PartAttributes;

    #[test]
    fn test_debug() {
        assert_eq!(format!("{:?}", PartAttributes::default()), "(NONE)");
        assert_eq!(
            format!("{:?}", PartAttributes::new(0b_1_0001)),
            "(IS_LAST_PACKET & RESULTSET_CLOSED)"
        );
        assert!(PartAttributes::new(0b_1000).row_not_found());
    }
}
