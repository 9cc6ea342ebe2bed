//! LOB values: the wire descriptor and the factory seam through which the
//! embedding driver turns descriptors into handles.

use crate::{protocol::Reader, HdbError, HdbResult, HdbValue};

/// The flavor of a LOB, as implied by the column's type code.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub enum LobKind {
    /// Binary LOB (BLOB, BLOCATOR, BINTEXT).
    BLob,
    /// Character LOB in CESU-8 with single-byte semantics (CLOB).
    CLob,
    /// Unicode character LOB (NCLOB, TEXT).
    NCLob,
}

/// Everything the wire tells about a non-NULL LOB value.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct LobDescriptor {
    /// Derived from the column's type code.
    pub kind: LobKind,
    /// The type code the server put into the LOB header.
    pub data_type: u8,
    /// True if `data` contains the complete remainder of the LOB.
    pub is_last_data: bool,
    /// Total length in characters, as reported by the server.
    pub total_char_length: u64,
    /// Total length in bytes, as reported by the server.
    pub total_byte_length: u64,
    /// Server-side handle for fetching further chunks.
    pub locator_id: u64,
    /// The inline chunk, empty if the server sent none.
    pub data: Vec<u8>,
}

impl LobDescriptor {
    /// True if the inline chunk is the complete LOB.
    pub fn is_complete(&self) -> bool {
        self.is_last_data && self.data.len() as u64 == self.total_byte_length
    }
}

/// A LOB value as produced by a [`LobFactory`].
///
/// What a handle can do beyond exposing its descriptor (lazy loading, streaming)
/// is up to the factory's implementation.
pub trait LobHandle: std::fmt::Debug + Send + Sync {
    /// The descriptor the handle was created from.
    fn descriptor(&self) -> &LobDescriptor;
}

/// Creates LOB handles from LOB descriptors found while decoding.
///
/// Called synchronously, once per non-NULL LOB field, in wire order.
/// Errors are propagated unchanged as [`HdbError::LobFactory`].
pub trait LobFactory {
    /// Turns a descriptor into a handle.
    fn create_lob(
        &self,
        descriptor: LobDescriptor,
    ) -> Result<Box<dyn LobHandle>, Box<dyn std::error::Error + Send + Sync>>;
}

/// A [`LobFactory`] that creates [`DetachedLob`]s, which just keep their descriptor.
#[derive(Clone, Copy, Debug, Default)]
pub struct DetachedLobFactory;

impl LobFactory for DetachedLobFactory {
    fn create_lob(
        &self,
        descriptor: LobDescriptor,
    ) -> Result<Box<dyn LobHandle>, Box<dyn std::error::Error + Send + Sync>> {
        Ok(Box::new(DetachedLob(descriptor)))
    }
}

/// A LOB that is not connected to any server-side resource.
///
/// Only the inline chunk is available.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DetachedLob(LobDescriptor);

impl DetachedLob {
    /// The inline bytes.
    pub fn data(&self) -> &[u8] {
        &self.0.data
    }

    /// The inline bytes, decoded from CESU-8 (with UTF-8 as fallback).
    pub fn text(&self) -> HdbResult<String> {
        crate::protocol::util::string_from_cesu8(self.0.data.clone())
            .map_err(|_| HdbError::Cesu8)
    }

    /// Consumes the LOB, returning its descriptor.
    pub fn into_descriptor(self) -> LobDescriptor {
        self.0
    }
}

impl From<LobDescriptor> for DetachedLob {
    fn from(descriptor: LobDescriptor) -> Self {
        Self(descriptor)
    }
}

impl LobHandle for DetachedLob {
    fn descriptor(&self) -> &LobDescriptor {
        &self.0
    }
}

pub(crate) fn parse_lob(kind: LobKind, rdr: &mut Reader) -> HdbResult<HdbValue> {
    let data_type = rdr.read_u8()?; // I1
    let options = rdr.read_u8()?; // I1
    let is_null = (options & 0b_1_u8) != 0;
    if is_null {
        trace!("parse {kind:?}: NULL");
        return Ok(HdbValue::NULL);
    }
    let is_data_included = (options & 0b_10_u8) != 0;
    let is_last_data = (options & 0b_100_u8) != 0;

    rdr.skip(2)?; // U2 (filler)
    let total_char_length = rdr.read_u64_le()?; // I8
    let total_byte_length = rdr.read_u64_le()?; // I8
    let locator_id = rdr.read_u64_le()?; // I8
    let chunk_length = rdr.read_u32_le()?; // I4
    let data = if is_data_included {
        rdr.read_slice(chunk_length as usize)?.to_vec() // B[chunk_length]
    } else {
        Vec::new()
    };
    trace!(
        "parse {kind:?}: locator_id = {locator_id}, {} of {total_byte_length} bytes inline",
        data.len()
    );

    let descriptor = LobDescriptor {
        kind,
        data_type,
        is_last_data,
        total_char_length,
        total_byte_length,
        locator_id,
        data,
    };
    rdr.lob_factory()
        .create_lob(descriptor)
        .map(HdbValue::LOB)
        .map_err(|source| HdbError::LobFactory { source })
}
