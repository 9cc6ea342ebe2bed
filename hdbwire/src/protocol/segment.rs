use crate::{
    protocol::{part::PART_HEADER_SIZE, FunctionCode, Part, PartKind, Reader, SegmentKind},
    DetachedLobFactory, HdbError, HdbResult,
};
use byteorder::{LittleEndian, WriteBytesExt};

pub(crate) const SEGMENT_HEADER_SIZE: usize = 24;

/// Result of [`Segment::get_part`].
#[derive(Debug, PartialEq, Eq)]
pub enum PartMatch<'a> {
    /// No part of the requested kind.
    None,
    /// Exactly one part of the requested kind.
    One(&'a Part),
    /// All parts of the requested kind, in segment order.
    Many(Vec<&'a Part>),
}

impl<'a> PartMatch<'a> {
    /// The first matching part, if any.
    pub fn first(&self) -> Option<&'a Part> {
        match self {
            PartMatch::None => None,
            PartMatch::One(part) => Some(part),
            PartMatch::Many(parts) => parts.first().copied(),
        }
    }
}

/// One unit of a protocol message: kind, function code and an ordered list of parts.
///
/// Since there is no usecase for multiple segments in one message,
/// the message framing itself is left to the caller.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Segment {
    kind: SegmentKind,
    function_code: FunctionCode,
    parts: Vec<Part>,
}

impl Segment {
    /// Creates an empty segment.
    pub fn new(kind: SegmentKind, function_code: FunctionCode) -> Self {
        Self {
            kind,
            function_code,
            parts: Vec::new(),
        }
    }

    /// The kind of the segment.
    pub fn kind(&self) -> SegmentKind {
        self.kind
    }

    /// The function code of the segment.
    pub fn function_code(&self) -> FunctionCode {
        self.function_code
    }

    /// The parts, in segment order.
    pub fn parts(&self) -> &[Part] {
        &self.parts
    }

    /// Consumes the segment, returning its parts.
    pub fn into_parts(self) -> Vec<Part> {
        self.parts
    }

    /// Appends a part.
    pub fn push(&mut self, part: Part) {
        self.parts.push(part);
    }

    /// Finds the parts of the given kind.
    pub fn get_part(&self, kind: PartKind) -> PartMatch<'_> {
        let mut found: Vec<&Part> = self.parts.iter().filter(|p| p.kind() == kind).collect();
        match found.len() {
            0 => PartMatch::None,
            1 => PartMatch::One(found.remove(0)),
            _ => PartMatch::Many(found),
        }
    }

    /// Serializes the segment into its wire layout.
    ///
    /// `remaining_bufsize` is the space the surrounding message reports as available;
    /// each part header carries what is left of it after the segment header and the
    /// preceding parts.
    #[allow(clippy::cast_possible_truncation)]
    #[allow(clippy::cast_possible_wrap)]
    pub fn to_buffer(&self, remaining_bufsize: u32) -> HdbResult<Vec<u8>> {
        let size = SEGMENT_HEADER_SIZE + self.parts.iter().map(|p| p.size(true)).sum::<usize>();
        let size = i32::try_from(size).map_err(|_| HdbError::Impl("segment too big"))?;
        let no_of_parts = i16::try_from(self.parts.len())
            .map_err(|_| HdbError::Impl("too many parts in one segment"))?;
        debug!(
            "Serializing segment of kind {:?} with {no_of_parts} parts and {size} bytes",
            self.kind
        );

        let mut w = Vec::<u8>::with_capacity(size as usize);
        // SEGMENT HEADER 24 bytes
        w.write_i32::<LittleEndian>(size)?; // I4 Length including the header
        w.write_i32::<LittleEndian>(0)?; // I4 Offset within the message buffer
        w.write_i16::<LittleEndian>(no_of_parts)?; // I2 Number of contained parts
        w.write_i16::<LittleEndian>(1)?; // I2 Number of this segment, starting with 1
        w.write_i8(self.kind as i8)?; // I1 Segment kind
        w.write_u8(0)?; // filler
        w.write_i16::<LittleEndian>(self.function_code as i16)?; // I2 Function code
        w.write_u64::<LittleEndian>(0)?; // B[8] reserved, do not use

        let mut remaining_bufsize =
            remaining_bufsize.saturating_sub(SEGMENT_HEADER_SIZE as u32);
        for part in &self.parts {
            remaining_bufsize = part.emit(remaining_bufsize, &mut w)?;
        }
        Ok(w)
    }

    /// Parses a segment from its wire layout.
    ///
    /// Lengths and counts of the headers are validated; nothing partial is returned.
    /// Bytes beyond the declared segment length are ignored.
    /// Segments of every kind are accepted, so whatever [`Segment::to_buffer`] writes
    /// parses back into an equal segment.
    #[allow(clippy::cast_sign_loss)]
    pub fn parse(bytes: &[u8]) -> HdbResult<Self> {
        if bytes.len() < SEGMENT_HEADER_SIZE {
            return Err(HdbError::malformed(format!(
                "incomplete segment header: {} bytes",
                bytes.len()
            )));
        }
        let mut rdr = Reader::new(bytes, &DetachedLobFactory);
        let segment_size = rdr.read_i32_le()?; // I4
        let _offset = rdr.read_i32_le()?; // I4
        let no_of_parts = rdr.read_i16_le()?; // I2
        let _segment_number = rdr.read_i16_le()?; // I2
        let kind = SegmentKind::from_i8(rdr.read_i8()?)?; // I1
        rdr.skip(1)?; // filler
        let function_code = FunctionCode::from_i16(rdr.read_i16_le()?)?; // I2
        rdr.skip(8)?; // B[8] reserved

        if segment_size < SEGMENT_HEADER_SIZE as i32 || segment_size as usize > bytes.len() {
            return Err(HdbError::malformed(format!(
                "segment length {segment_size} does not fit a buffer of {} bytes",
                bytes.len()
            )));
        }
        if no_of_parts < 0 {
            return Err(HdbError::malformed(format!(
                "negative part count {no_of_parts}"
            )));
        }
        if segment_size as usize != bytes.len() {
            warn!(
                "Segment::parse(): ignoring {} bytes beyond the segment",
                bytes.len() - segment_size as usize
            );
        }
        debug!(
            "Segment::parse(): kind {kind:?}, function code {function_code:?}, \
             {no_of_parts} parts, {segment_size} bytes"
        );

        let body = &bytes[SEGMENT_HEADER_SIZE..segment_size as usize];
        let mut rdr = Reader::new(body, &DetachedLobFactory);
        let no_of_parts = no_of_parts as usize;
        let mut parts = Vec::with_capacity(no_of_parts);
        for i in 0..no_of_parts {
            if rdr.remaining() < PART_HEADER_SIZE {
                return Err(HdbError::malformed(format!(
                    "segment declares {no_of_parts} parts, but only {i} were found"
                )));
            }
            parts.push(Part::parse(&mut rdr, i + 1 == no_of_parts)?);
        }
        if rdr.has_more() {
            return Err(HdbError::malformed(format!(
                "{} unexpected bytes after the last part",
                rdr.remaining()
            )));
        }

        Ok(Self {
            kind,
            function_code,
            parts,
        })
    }

    /// A deterministic, human-readable dump of the segment.
    pub fn inspect(&self) -> String {
        let mut out = String::from("{\n");
        out.push_str(&format!("  kind: {},\n", self.kind));
        out.push_str(&format!("  functionCode: {},\n", self.function_code));
        out.push_str("  parts: [\n");
        for (i, part) in self.parts.iter().enumerate() {
            if i > 0 {
                out.push_str(",\n");
            }
            part.inspect(&mut out);
        }
        out.push_str("\n  ]\n}\n");
        out
    }
}

#[cfg(test)]
mod tests {
    use super::{PartMatch, Segment};
    use crate::{FunctionCode, HdbError, Part, PartKind, SegmentKind};

    #[test]
    fn test_default_segment() {
        let segment = Segment::default();
        assert_eq!(segment.kind(), SegmentKind::Invalid);
        assert_eq!(segment.function_code(), FunctionCode::Nil);
        assert!(segment.parts().is_empty());
        assert_eq!(
            hex::encode(segment.to_buffer(0).unwrap()),
            "180000000000000000000100000000000000000000000000"
        );
        assert_eq!(
            segment.inspect(),
            "{\n  kind: SegmentKind.INVALID,\n  functionCode: FunctionCode.NIL,\n  parts: [\n\n  ]\n}\n"
        );
    }

    #[test]
    fn test_get_part() {
        let mut segment = Segment::default();
        assert_eq!(segment.get_part(PartKind::ResultSet), PartMatch::None);

        let p1 = Part::new(PartKind::ResultSet, 1, vec![1]);
        let p2 = Part::new(PartKind::ResultSet, 1, vec![2]);
        segment.push(p1.clone());
        segment.push(Part::new(PartKind::StatementId, 1, vec![0; 8]));
        assert_eq!(segment.get_part(PartKind::ResultSet), PartMatch::One(&p1));

        segment.push(p2.clone());
        assert_eq!(
            segment.get_part(PartKind::ResultSet),
            PartMatch::Many(vec![&p1, &p2])
        );
        assert_eq!(segment.get_part(PartKind::ResultSet).first(), Some(&p1));
    }

    #[test]
    fn test_inspect_with_parts() {
        let mut segment = Segment::new(SegmentKind::Reply, FunctionCode::Select);
        segment.push(Part::new(PartKind::ResultSetId, 1, vec![0xAB; 8]));
        segment.push(Part::new(PartKind::ResultSet, 0, vec![]));
        assert_eq!(
            segment.inspect(),
            "{\n  kind: SegmentKind.REPLY,\n  functionCode: FunctionCode.SELECT,\n  parts: [\n\
             \x20   {\n\
             \x20     kind: PartKind.RESULT_SET_ID,\n\
             \x20     attributes: 0,\n\
             \x20     argumentCount: 1,\n\
             \x20     buffer: [\n\
             \x20       abababababababab\n\
             \x20     ]\n\
             \x20   },\n\
             \x20   {\n\
             \x20     kind: PartKind.RESULT_SET,\n\
             \x20     attributes: 0,\n\
             \x20     argumentCount: 0,\n\
             \x20     buffer: []\n\
             \x20   }\n  ]\n}\n"
        );
        assert_eq!(segment.inspect(), segment.clone().inspect());
    }

    #[test]
    fn test_request_round_trip() {
        let mut segment = Segment::new(SegmentKind::Request, FunctionCode::Nil);
        segment.push(Part::new(PartKind::Command, 1, b"select 1 from dummy".to_vec()));
        let bytes = segment.to_buffer(1024).unwrap();
        assert_eq!(bytes[12], SegmentKind::Request as u8);
        assert_eq!(Segment::parse(&bytes).unwrap(), segment);
    }

    #[test]
    fn test_malformed_input() {
        let mut bytes = Segment::default().to_buffer(0).unwrap();
        assert!(matches!(
            Segment::parse(&bytes[0..20]),
            Err(HdbError::MalformedSegment(_))
        ));

        // declared length exceeds the buffer
        bytes[0] = 0x40;
        assert!(matches!(
            Segment::parse(&bytes),
            Err(HdbError::MalformedSegment(_))
        ));

        // a part is announced, but missing
        bytes[0] = 0x18;
        bytes[8] = 1;
        assert!(matches!(
            Segment::parse(&bytes),
            Err(HdbError::MalformedSegment(_))
        ));
    }
}
