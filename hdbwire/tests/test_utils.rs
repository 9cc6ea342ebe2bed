// advisable because not all test modules use all functions of this module:
#![allow(dead_code)]

use flexi_logger::{opt_format, Logger, LoggerHandle};
use hdbwire::{ColumnDescriptor, LobDescriptor, LobFactory, LobHandle, TypeId};
use std::sync::atomic::{AtomicUsize, Ordering};

// Returns a logger that prints out all info, warn and error messages.
pub fn init_logger() -> LoggerHandle {
    Logger::try_with_env_or_str("info")
        .unwrap()
        .format(opt_format)
        .start()
        .unwrap_or_else(|e| panic!("Logger initialization failed with {e}"))
}

pub fn column(type_id: TypeId, fraction: i16, name: &str) -> ColumnDescriptor {
    ColumnDescriptor::new(type_id, fraction)
        .with_name(format!("P_{name}"))
        .with_column_display_name(name)
}

// Builders for the wire representation of single values.

pub fn int(value: i32) -> Vec<u8> {
    let mut bytes = vec![1_u8];
    bytes.extend_from_slice(&value.to_le_bytes());
    bytes
}

pub fn bigint(value: i64) -> Vec<u8> {
    let mut bytes = vec![1_u8];
    bytes.extend_from_slice(&value.to_le_bytes());
    bytes
}

pub fn null_int() -> Vec<u8> {
    vec![0_u8]
}

pub fn double(value: f64) -> Vec<u8> {
    value.to_le_bytes().to_vec()
}

pub fn string(value: &str) -> Vec<u8> {
    assert!(value.len() <= 245);
    let mut bytes = vec![value.len() as u8];
    bytes.extend_from_slice(value.as_bytes());
    bytes
}

pub fn null_string() -> Vec<u8> {
    vec![255_u8]
}

// mantissa * 10^exponent, positive
pub fn decimal(mantissa: u64, exponent: i16) -> Vec<u8> {
    let mut raw = [0_u8; 16];
    raw[0..8].copy_from_slice(&mantissa.to_le_bytes());
    let biased = ((6176 + exponent) as u16) << 1;
    raw[14..16].copy_from_slice(&biased.to_le_bytes());
    raw.to_vec()
}

pub fn fixed8(value: i64) -> Vec<u8> {
    let mut bytes = vec![1_u8];
    bytes.extend_from_slice(&value.to_le_bytes());
    bytes
}

pub fn fixed12(value: i128) -> Vec<u8> {
    let mut bytes = vec![1_u8];
    bytes.extend_from_slice(&value.to_le_bytes()[0..12]);
    bytes
}

pub fn fixed16(value: i128) -> Vec<u8> {
    let mut bytes = vec![1_u8];
    bytes.extend_from_slice(&value.to_le_bytes());
    bytes
}

pub fn null_decimal() -> Vec<u8> {
    let mut raw = [0_u8; 16];
    raw[15] = 112;
    raw.to_vec()
}

pub fn daydate(value: i32) -> Vec<u8> {
    value.to_le_bytes().to_vec()
}

pub fn inline_lob(type_code: u8, data: &[u8]) -> Vec<u8> {
    let mut bytes = vec![type_code, 0b110, 0, 0];
    bytes.extend_from_slice(&(data.len() as u64).to_le_bytes());
    bytes.extend_from_slice(&(data.len() as u64).to_le_bytes());
    bytes.extend_from_slice(&42_u64.to_le_bytes());
    bytes.extend_from_slice(&(data.len() as u32).to_le_bytes());
    bytes.extend_from_slice(data);
    bytes
}

pub fn null_lob(type_code: u8) -> Vec<u8> {
    vec![type_code, 0b1]
}

// A LobFactory that counts its calls.
#[derive(Debug, Default)]
pub struct CountingLobFactory {
    calls: AtomicUsize,
}

impl CountingLobFactory {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[derive(Debug)]
pub struct CountedLob {
    pub number: usize,
    descriptor: LobDescriptor,
}

impl LobHandle for CountedLob {
    fn descriptor(&self) -> &LobDescriptor {
        &self.descriptor
    }
}

impl LobFactory for CountingLobFactory {
    fn create_lob(
        &self,
        descriptor: LobDescriptor,
    ) -> Result<Box<dyn LobHandle>, Box<dyn std::error::Error + Send + Sync>> {
        let number = self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(CountedLob { number, descriptor }))
    }
}
