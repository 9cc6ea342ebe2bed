use crate::{HdbError, HdbResult};

/// The kind of a segment.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum SegmentKind {
    /// Not yet set.
    #[default]
    Invalid = 0,
    /// Sent by the client.
    Request = 1,
    /// Regular answer of the server.
    Reply = 2,
    /// Answer of the server that carries an error part.
    Error = 5,
}

impl SegmentKind {
    pub(crate) fn from_i8(val: i8) -> HdbResult<Self> {
        match val {
            0 => Ok(Self::Invalid),
            1 => Ok(Self::Request),
            2 => Ok(Self::Reply),
            5 => Ok(Self::Error),
            _ => Err(HdbError::malformed(format!(
                "found unexpected value {val} for SegmentKind"
            ))),
        }
    }

    /// The protocol's name of the segment kind.
    pub fn label(self) -> &'static str {
        match self {
            Self::Invalid => "INVALID",
            Self::Request => "REQUEST",
            Self::Reply => "REPLY",
            Self::Error => "ERROR",
        }
    }
}

impl std::fmt::Display for SegmentKind {
    fn fmt(&self, fmt: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(fmt, "SegmentKind.{}", self.label())
    }
}
