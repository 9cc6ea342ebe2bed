pub(crate) mod datetime;
pub(crate) mod decimal;
pub(crate) mod lob;
pub(crate) mod wire_decimal;
