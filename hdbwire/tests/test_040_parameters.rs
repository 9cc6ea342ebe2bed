mod test_utils;

use hdbwire::{
    DetachedLob, HdbResult, HdbValue, KeyField, ParameterMetadata, Parser, ParserConfig, Part,
    PartKind, TypeId,
};
use log::info;
use test_utils::*;

#[test] // cargo test --test test_040_parameters -- --nocapture
pub fn parameters() -> HdbResult<()> {
    let _log_handle = test_utils::init_logger();

    output_parameters()?;
    detached_lobs()?;
    Ok(())
}

fn parameter_metadata() -> HdbResult<ParameterMetadata> {
    let mut buffer = Vec::new();
    for (type_code, mode, name_offset) in [(3_u8, 4_u8, 0_u32), (26, 2, 6), (11, 4, 11)] {
        buffer.extend_from_slice(&[1, type_code, mode, 0]);
        buffer.extend_from_slice(&name_offset.to_le_bytes());
        buffer.extend_from_slice(&10_i16.to_le_bytes());
        buffer.extend_from_slice(&0_i16.to_le_bytes());
        buffer.extend_from_slice(&0_u32.to_le_bytes());
    }
    buffer.extend_from_slice(b"\x05COUNT\x04BODY\x06REMARK");
    ParameterMetadata::parse(&Part::new(PartKind::ParameterMetadata, 3, buffer))
}

fn values() -> Vec<u8> {
    let mut buffer = int(17);
    buffer.extend(inline_lob(26, "grüß".as_bytes()));
    buffer.extend(string("done"));
    buffer
}

fn output_parameters() -> HdbResult<()> {
    info!("parameters are keyed by name");
    let metadata = parameter_metadata()?;
    assert_eq!(metadata.iter_out().count(), 3);
    assert_eq!(metadata.descriptors()[1].data_type(), TypeId::NCLOB);

    let factory = CountingLobFactory::default();
    let parser = Parser::with_config(
        metadata.into_inner(),
        factory,
        ParserConfig::default().with_key_field(Some(KeyField::Name)),
    )?;
    let record = parser.parse_parameters(&values())?;
    assert_eq!(record.len(), 3);
    assert_eq!(record.get("COUNT"), Some(&HdbValue::INT(17)));
    assert_eq!(record.get("REMARK").unwrap(), &"done");
    let lob = record.get("BODY").and_then(HdbValue::as_lob).unwrap();
    assert_eq!(lob.descriptor().data, "grüß".as_bytes());
    assert_eq!(record.to_string(), format!("17, {}, done, ", record[1]));
    Ok(())
}

fn detached_lobs() -> HdbResult<()> {
    info!("the detached variant keeps LOB descriptors");
    let metadata = parameter_metadata()?;
    let mut buffer = values();
    // tolerated, but logged
    buffer.push(0);
    let record = Parser::parse_parameters_detached(metadata.into_inner(), &buffer)?;
    let descriptor = record.get("BODY").and_then(HdbValue::as_lob).unwrap().descriptor();
    assert!(descriptor.is_complete());
    assert_eq!(DetachedLob::from(descriptor.clone()).text()?, "grüß");
    Ok(())
}
