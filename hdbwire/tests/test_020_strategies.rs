mod test_utils;

use hdbwire::{
    ColumnDescriptor, DecodeStrategy, HdbResult, HdbValue, LobKind, Parser, ParserConfig, TypeId,
};
use log::info;
use test_utils::*;

#[test] // cargo test --test test_020_strategies -- --nocapture
pub fn strategies() -> HdbResult<()> {
    let _log_handle = test_utils::init_logger();

    identical_output()?;
    lob_factory_calls()?;
    Ok(())
}

fn columns() -> Vec<ColumnDescriptor> {
    vec![
        column(TypeId::BIGINT, 0, "ID"),
        column(TypeId::DECIMAL, 4, "AMOUNT"),
        column(TypeId::FIXED8, 2, "PRICE"),
        column(TypeId::VARCHAR, 0, "NOTE"),
        column(TypeId::CLOB, 0, "TEXT"),
        column(TypeId::BLOB, 0, "DATA"),
    ]
}

fn buffer() -> Vec<u8> {
    let mut buffer = Vec::new();
    for i in 0..4_u8 {
        buffer.extend(bigint(i64::from(i) * 1_000_000_007));
        buffer.extend(decimal(u64::from(i) * 31 + 5, -1));
        buffer.extend(bigint(i64::from(i) * 250));
        buffer.extend(string(&format!("note ä{i}")));
        if i % 2 == 0 {
            buffer.extend(inline_lob(25, format!("text {i}").as_bytes()));
            buffer.extend(null_lob(27));
        } else {
            buffer.extend(null_lob(25));
            buffer.extend(inline_lob(27, &[i; 5]));
        }
    }
    buffer
}

fn parse(strategy: DecodeStrategy) -> HdbResult<Vec<Vec<HdbValue>>> {
    let parser = Parser::with_config(
        columns(),
        CountingLobFactory::default(),
        ParserConfig::default().with_strategy(strategy),
    )?;
    assert_eq!(parser.plan().strategy(), strategy);
    Ok(parser
        .parse_all(&buffer())?
        .into_iter()
        .map(hdbwire::Record::into_values)
        .collect())
}

fn identical_output() -> HdbResult<()> {
    info!("both strategies decode the same values");
    let interpreted = parse(DecodeStrategy::Interpreted)?;
    let compiled = parse(DecodeStrategy::Compiled)?;
    assert_eq!(interpreted.len(), 4);
    assert_eq!(interpreted, compiled);

    assert_eq!(interpreted[1][1].to_string(), "3.6000");
    assert_eq!(compiled[1][1].to_string(), "3.6000");
    assert_eq!(compiled[2][2].to_string(), "5.00");
    assert_eq!(compiled[3][3], "note ä3");
    let lob = compiled[0][4].as_lob().unwrap();
    assert_eq!(lob.descriptor().kind, LobKind::CLob);
    assert_eq!(lob.descriptor().data, b"text 0");
    assert!(compiled[0][5].is_null());
    Ok(())
}

fn lob_factory_calls() -> HdbResult<()> {
    info!("the factory is called once per non-NULL LOB, in wire order");
    for strategy in [DecodeStrategy::Interpreted, DecodeStrategy::Compiled] {
        let parser = Parser::with_config(
            columns(),
            CountingLobFactory::default(),
            ParserConfig::default().with_strategy(strategy),
        )?;
        let records = parser.parse_all(&buffer())?;
        let lobs: Vec<_> = records
            .iter()
            .flat_map(|record| record.values().iter().filter_map(HdbValue::as_lob))
            .collect();
        assert_eq!(lobs.len(), 4);
        let data: Vec<&[u8]> = lobs.iter().map(|lob| lob.descriptor().data.as_slice()).collect();
        assert_eq!(data, [&b"text 0"[..], &[1; 5][..], &b"text 2"[..], &[3; 5][..]]);
        assert_eq!(parser.lob_factory().calls(), 4);
        for (number, lob) in lobs.iter().enumerate() {
            let debug = format!("{lob:?}");
            assert!(
                debug.starts_with(&format!("CountedLob {{ number: {number},")),
                "{debug}"
            );
        }
    }
    Ok(())
}
