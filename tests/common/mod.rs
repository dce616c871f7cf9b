// Тестовый кодировщик контейнера настроек (в библиотеке записи нет).
#![allow(dead_code)]

use byteorder::{LittleEndian, WriteBytesExt};
use std::fs;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use NxCfg::{Entry, SettingValue};

pub const STR: u8 = 0x01;
pub const U8: u8 = 0x02;
pub const U32: u8 = 0x03;

static NEXT_ID: AtomicU64 = AtomicU64::new(1);

pub fn unique_path(prefix: &str) -> PathBuf {
    let pid = std::process::id();
    let t = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    let id = NEXT_ID.fetch_add(1, Ordering::Relaxed);
    std::env::temp_dir().join(format!("nxcfgtest-{prefix}-{pid}-{t}-{id}"))
}

/// Запись с именем как есть (терминатор не добавляется).
pub fn raw_record(name: &[u8], ty: u8, value: &[u8]) -> Vec<u8> {
    let mut v = Vec::new();
    v.write_u32::<LittleEndian>(name.len() as u32).unwrap();
    v.extend_from_slice(name);
    v.write_u8(ty).unwrap();
    v.write_u32::<LittleEndian>(value.len() as u32).unwrap();
    v.extend_from_slice(value);
    v
}

/// Запись "owner!name" + NUL.
pub fn record(full_name: &str, ty: u8, value: &[u8]) -> Vec<u8> {
    let mut name = full_name.as_bytes().to_vec();
    name.push(0);
    raw_record(&name, ty, value)
}

pub fn u8_record(full_name: &str, v: u8) -> Vec<u8> {
    record(full_name, U8, &[v])
}

pub fn u32_record(full_name: &str, v: u32) -> Vec<u8> {
    record(full_name, U32, &v.to_le_bytes())
}

pub fn str_record(full_name: &str, s: &str) -> Vec<u8> {
    let mut b = s.as_bytes().to_vec();
    b.push(0);
    record(full_name, STR, &b)
}

/// Склеить записи и добавить заголовок с правильным размером.
pub fn container(records: &[Vec<u8>]) -> Vec<u8> {
    let body: Vec<u8> = records.concat();
    let mut out = Vec::with_capacity(4 + body.len());
    out.write_u32::<LittleEndian>((4 + body.len()) as u32).unwrap();
    out.extend_from_slice(&body);
    out
}

pub fn encode_entry(e: &Entry) -> Vec<u8> {
    let full = format!("{}!{}", e.owner, e.name);
    match &e.value {
        SettingValue::Str(s) => str_record(&full, s),
        SettingValue::U8(v) => u8_record(&full, *v),
        SettingValue::U32(v) => u32_record(&full, *v),
    }
}

pub fn encode_entries(entries: &[Entry]) -> Vec<u8> {
    let recs: Vec<Vec<u8>> = entries.iter().map(encode_entry).collect();
    container(&recs)
}

pub fn write_temp(prefix: &str, bytes: &[u8]) -> PathBuf {
    let p = unique_path(prefix);
    fs::write(&p, bytes).unwrap();
    p
}
