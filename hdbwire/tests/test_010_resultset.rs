mod test_utils;

use hdbwire::{
    ColumnDescriptor, DecodeStrategy, DetachedLobFactory, FieldKey, HdbError, HdbResult,
    HdbValue, KeyField, Parser, ParserConfig, TypeId,
};
use log::info;
use test_utils::*;

#[test] // cargo test --test test_010_resultset -- --nocapture
pub fn resultset() -> HdbResult<()> {
    let _log_handle = test_utils::init_logger();

    rows_and_keys()?;
    deterministic_output()?;
    decimal_scale()?;
    decimal_scale_of_all_fractions()?;
    out_of_range_dates()?;
    positional_keys()?;
    truncated_buffer()?;
    Ok(())
}

fn columns() -> Vec<ColumnDescriptor> {
    vec![
        column(TypeId::INT, 0, "ID"),
        column(TypeId::NVARCHAR, 0, "NAME"),
        column(TypeId::DECIMAL, 2, "PRICE"),
        column(TypeId::DOUBLE, 0, "RATIO"),
        column(TypeId::DAYDATE, 0, "SINCE"),
    ]
}

fn row(id: i32, name: Option<&str>, price: Option<(u64, i16)>) -> Vec<u8> {
    let mut bytes = int(id);
    bytes.extend(name.map_or_else(null_string, string));
    bytes.extend(price.map_or_else(null_decimal, |(m, e)| decimal(m, e)));
    bytes.extend(double(0.5));
    bytes.extend(daydate(730_120));
    bytes
}

fn buffer() -> Vec<u8> {
    let mut buffer = row(1, Some("first"), Some((12_345, -2)));
    buffer.extend(row(2, None, None));
    buffer.extend(row(3, Some("third"), Some((7, 0))));
    buffer
}

fn rows_and_keys() -> HdbResult<()> {
    info!("M rows with N fields each, keyed by display name");
    let parser = Parser::new(columns(), DetachedLobFactory)?;
    let records = parser.parse_all(&buffer())?;
    assert_eq!(records.len(), 3);
    for record in &records {
        assert_eq!(record.len(), 5);
        let names: Vec<_> = record.keys().iter().map(ToString::to_string).collect();
        assert_eq!(names, ["ID", "NAME", "PRICE", "RATIO", "SINCE"]);
    }
    assert_eq!(records[0].get("ID"), Some(&HdbValue::INT(1)));
    assert_eq!(records[0].get("NAME").unwrap(), &"first");
    assert_eq!(records[0].get("RATIO"), Some(&HdbValue::DOUBLE(0.5)));
    assert_eq!(records[0].get("SINCE").unwrap().to_string(), "2000-01-01");
    assert_eq!(records[1].get("NAME"), Some(&HdbValue::NULL));
    assert_eq!(records[1].get("PRICE"), Some(&HdbValue::NULL));
    assert_eq!(records[2].get("ID"), Some(&HdbValue::INT(3)));
    assert_eq!(records[2].get("P_ID"), None);
    Ok(())
}

fn deterministic_output() -> HdbResult<()> {
    info!("the same input decodes to the same output");
    let buffer = buffer();
    let parser = Parser::new(columns(), DetachedLobFactory)?;
    let first = serde_json::to_string(&parser.parse_all(&buffer)?).unwrap();
    let second = serde_json::to_string(&parser.parse_all(&buffer)?).unwrap();
    assert_eq!(first, second);
    assert!(first.starts_with(r#"[{"ID":1,"NAME":"first","PRICE":"123.45","RATIO":0.5,"#));
    Ok(())
}

fn decimal_scale() -> HdbResult<()> {
    info!("decimals carry the scale of their column");
    let parser = Parser::new(columns(), DetachedLobFactory)?;
    let records = parser.parse_all(&buffer())?;
    assert_eq!(records[0].get("PRICE").unwrap().to_string(), "123.45");
    assert_eq!(records[2].get("PRICE").unwrap().to_string(), "7.00");

    let columns = vec![column(TypeId::DECIMAL, 3, "AMOUNT")];
    let parser = Parser::new(columns, DetachedLobFactory)?;
    let records = parser.parse_all(&decimal(12_345, -2))?;
    assert_eq!(records[0].get("AMOUNT").unwrap().to_string(), "123.450");
    Ok(())
}

fn decimal_scale_of_all_fractions() -> HdbResult<()> {
    info!("every fraction becomes the scale, for DECIMAL and the FIXED types");
    let mut buffer = decimal(12_345, -2);
    buffer.extend(fixed8(-12_345));
    buffer.extend(fixed12(1_234_567_890_123));
    buffer.extend(fixed16(-9_876_543_210_987_654_321));

    for strategy in [DecodeStrategy::Interpreted, DecodeStrategy::Compiled] {
        for fraction in 0..=38_i16 {
            let columns = vec![
                column(TypeId::DECIMAL, fraction, "D"),
                column(TypeId::FIXED8, fraction, "F8"),
                column(TypeId::FIXED12, fraction, "F12"),
                column(TypeId::FIXED16, fraction, "F16"),
            ];
            let config = ParserConfig::default().with_strategy(strategy);
            let parser = Parser::with_config(columns, DetachedLobFactory, config)?;
            let records = parser.parse_all(&buffer)?;
            assert_eq!(records.len(), 1);
            for value in records[0].values() {
                let HdbValue::DECIMAL(ref decimal) = *value else {
                    panic!("expected a decimal, got {value:?}");
                };
                assert_eq!(
                    decimal.as_bigint_and_exponent().1,
                    i64::from(fraction),
                    "{strategy:?}, fraction {fraction}, value {decimal}"
                );
            }
        }
    }
    Ok(())
}

fn out_of_range_dates() -> HdbResult<()> {
    info!("records with out-of-range dates can still be printed");
    let columns = vec![
        column(TypeId::INT, 0, "ID"),
        column(TypeId::DAYDATE, 0, "SINCE"),
    ];
    let parser = Parser::new(columns, DetachedLobFactory)?;
    let mut buffer = int(1);
    buffer.extend(daydate(5_000_000));
    buffer.extend(int(2));
    buffer.extend(daydate(i32::MIN));
    let records = parser.parse_all(&buffer)?;
    assert_eq!(records[0].to_string(), "1, <DAYDATE raw=5000000>, ");
    assert!(format!("{:?}", records[0]).contains("<DAYDATE raw=5000000>"));
    assert_eq!(records[1].to_string(), "2, 0001-01-01, ");
    Ok(())
}

fn positional_keys() -> HdbResult<()> {
    info!("without key field, fields are keyed by position");
    let config = ParserConfig::default()
        .with_key_field(None)
        .with_strategy(DecodeStrategy::Interpreted);
    let parser = Parser::with_config(columns(), DetachedLobFactory, config)?;
    let records = parser.parse_all(&buffer())?;
    assert_eq!(records[0].keys()[4], FieldKey::Index(4));
    assert_eq!(records[0].get("ID"), None);
    assert_eq!(records[0].get_index(0), Some(&HdbValue::INT(1)));

    let plan = parser.build_decode_plan(Some(KeyField::Name))?;
    assert_eq!(plan.keys()[0].as_name(), Some("P_ID"));
    Ok(())
}

fn truncated_buffer() -> HdbResult<()> {
    info!("a truncated row fails with an underrun");
    let parser = Parser::new(columns(), DetachedLobFactory)?;
    let mut buffer = buffer();
    buffer.truncate(buffer.len() - 2);
    match parser.parse_all(&buffer) {
        Err(HdbError::BufferUnderrun { needed, available }) => {
            assert_eq!((needed, available), (4, 2));
        }
        other => panic!("expected an underrun, got {other:?}"),
    }
    Ok(())
}
