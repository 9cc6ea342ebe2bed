//! Decoding and encoding core of the SAP HANA SQL wire protocol.
//!
//! This crate does not connect to anything. It turns the bytes a HANA server sends
//! into typed values, and builds the segment and part framing a client sends.
//!
//! The main pieces are
//!
//! - the type registry ([`TypeId`]), which maps wire type codes to typed reads,
//! - the [`Reader`], a cursor over an immutable byte buffer that decodes typed values,
//! - the [`Parser`], which decodes rows and parameter sets into [`Record`]s
//!   using a [`DecodePlan`] that is built once per statement,
//! - [`Segment`] and [`Part`], the message framing, with parsing, serialization
//!   and a deterministic [`Segment::inspect`] dump.
//!
//! LOB values are not loaded by this crate; every LOB descriptor found while
//! decoding is handed to a [`LobFactory`], which the caller provides.
//! [`DetachedLobFactory`] keeps the descriptor and the inline data.
//!
//! ```rust,ignore
//! let metadata = ResultSetMetadata::parse(&metadata_part)?;
//! let parser = Parser::new(metadata.into_inner(), DetachedLobFactory)?;
//! for record in parser.parse_all(resultset_part.buffer())? {
//!     println!("{record}");
//! }
//! ```

#![deny(missing_debug_implementations)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]

#[macro_use]
extern crate log;
#[macro_use]
extern crate serde;

mod hdb_error;
mod parser;
mod protocol;
mod types_impl;

pub use crate::hdb_error::{HdbError, HdbResult};

pub use crate::parser::{
    DecodePlan, DecodeStep, DecodeStrategy, FieldKey, KeyField, Parser, ParserConfig, Record,
};

pub use crate::protocol::parts::{
    ColumnDescriptor, HdbValue, ParameterDirection, ParameterMetadata, ReadFunction,
    ResultSetMetadata, TypeId, WireWidth,
};
pub use crate::protocol::{
    FunctionCode, Part, PartAttributes, PartKind, PartMatch, Reader, Segment, SegmentKind,
};

pub use crate::types_impl::lob::{
    DetachedLob, DetachedLobFactory, LobDescriptor, LobFactory, LobHandle, LobKind,
};

/// Non-standard types that are used within the [`HdbValue`]s.
///
/// The date and time types keep the raw wire value and convert on demand
/// into the types of the `time` crate.
pub mod types {
    pub use crate::types_impl::datetime::{DayDate, LongDate, SecondDate, SecondTime};
}
