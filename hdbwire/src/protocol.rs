mod function_code;
pub(crate) mod part;
mod part_attributes;
mod partkind;
pub mod parts;
pub(crate) mod reader;
mod segment;
mod segment_kind;
pub(crate) mod util;

pub use self::{
    function_code::FunctionCode,
    part::Part,
    part_attributes::PartAttributes,
    partkind::PartKind,
    reader::Reader,
    segment::{PartMatch, Segment},
    segment_kind::SegmentKind,
};
