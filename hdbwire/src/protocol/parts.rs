mod column_descriptor;
pub(crate) mod hdb_value;
pub(crate) mod length_indicator;
mod parameter_metadata;
mod resultset_metadata;
mod type_id;

pub use self::{
    column_descriptor::ColumnDescriptor,
    hdb_value::HdbValue,
    parameter_metadata::{ParameterDirection, ParameterMetadata},
    resultset_metadata::ResultSetMetadata,
    type_id::{ReadFunction, TypeId, WireWidth},
};
