//! record — последовательный обход записей контейнера настроек.
//!
//! Формат записи: [name_size u32][name][type u8][value_size u32][value].
//!
//! Обход строго вперёд по курсору; каждое нарушение структуры — фатальная ошибка,
//! после которой walker больше ничего не отдаёт (частичных результатов нет).
//!
//! Использование:
//!   let declared = header::read_and_validate(&mut r, size)?;
//!   let mut walker = RecordWalker::new(r, declared);
//!   while let Some(entry) = walker.next_entry()? { /* ... */ }

use byteorder::{LittleEndian, ReadBytesExt};
use log::{debug, trace};
use std::io::Read;

use crate::consts::{HDR_SIZE, OWNER_SEPARATOR, REC_NAME_SIZE_LEN, REC_TYPE_VSIZE_LEN};
use crate::error::{CfgError, Result};
use crate::value::{SettingType, SettingValue};

/// Одна полностью провалидированная запись.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub owner: String,
    pub name: String,
    pub value: SettingValue,
    /// Смещение начала записи (только для диагностики).
    pub entry_offset: u64,
}

/// Разделить составное имя "owner!setting" по первому '!'.
/// Обе части могут быть пустыми.
#[inline]
pub fn split_owner(full: &str) -> Option<(&str, &str)> {
    full.split_once(OWNER_SEPARATOR)
}

/// Проверить сырое имя: валидный UTF-8, ровно один завершающий NUL и никаких других NUL.
/// Длина сравнивается в символах: после отрезания NUL должно остаться name_size - 1
/// символов, поэтому любое многобайтовое имя отвергается.
fn decode_name(raw: &[u8], entry_offset: u64) -> Result<&str> {
    let s = std::str::from_utf8(raw).map_err(|_| CfgError::MalformedName { entry_offset })?;
    let stripped = s.trim_end_matches('\0');
    if stripped.chars().count() + 1 != raw.len() || stripped.contains('\0') {
        return Err(CfgError::MalformedName { entry_offset });
    }
    Ok(stripped)
}

pub struct RecordWalker<R: Read> {
    reader: R,
    offset: u64,
    size: u64,
    failed: bool,
}

impl<R: Read> RecordWalker<R> {
    /// `reader` must already be positioned right after the container header.
    pub fn new(reader: R, declared_size: u32) -> Self {
        Self {
            reader,
            offset: HDR_SIZE as u64,
            size: declared_size as u64,
            failed: false,
        }
    }

    /// Текущая позиция курсора (абсолютное смещение в контейнере).
    pub fn offset(&self) -> u64 {
        self.offset
    }

    /// Считать следующую запись.
    ///
    /// - Ok(Some(entry)) — запись прочитана и провалидирована;
    /// - Ok(None)        — курсор ровно на declared_size, обход завершён;
    /// - Err(e)          — нарушение структуры, дальнейшие вызовы вернут Ok(None).
    pub fn next_entry(&mut self) -> Result<Option<Entry>> {
        if self.failed || self.offset >= self.size {
            return Ok(None);
        }
        let res = self.read_entry();
        if res.is_err() {
            self.failed = true;
        }
        res.map(Some)
    }

    fn bytes_left(&self) -> u64 {
        self.size.saturating_sub(self.offset)
    }

    fn read_entry(&mut self) -> Result<Entry> {
        let entry_offset = self.offset;

        // 1) name_size
        if self.bytes_left() < REC_NAME_SIZE_LEN as u64 {
            return Err(CfgError::TruncatedHeader {
                entry_offset,
                bytes_left: self.bytes_left(),
            });
        }
        let name_size = self.reader.read_u32::<LittleEndian>()?;
        self.offset += REC_NAME_SIZE_LEN as u64;

        // 2) имя + обязательные type/value_size должны поместиться
        if name_size == 0
            || self.offset + name_size as u64 + REC_TYPE_VSIZE_LEN as u64 > self.size
        {
            return Err(CfgError::TruncatedName {
                entry_offset,
                bytes_left: self.bytes_left(),
                name_size,
            });
        }

        // 3) имя
        let mut name_raw = vec![0u8; name_size as usize];
        self.reader.read_exact(&mut name_raw)?;
        self.offset += name_size as u64;
        let full_name = decode_name(&name_raw, entry_offset)?;

        // 4-5) owner!setting
        let (owner, name) =
            split_owner(full_name).ok_or(CfgError::MissingOwner { entry_offset })?;
        let (owner, name) = (owner.to_string(), name.to_string());

        // 6) type + value_size (место уже зарезервировано проверкой 2)
        let type_byte = self.reader.read_u8()?;
        let value_size = self.reader.read_u32::<LittleEndian>()?;
        self.offset += REC_TYPE_VSIZE_LEN as u64;
        trace!(
            "entry@0x{:X}: name_size=0x{:X} type=0x{:02X} value_size=0x{:X}",
            entry_offset,
            name_size,
            type_byte,
            value_size
        );

        // 7) значение
        if self.offset + value_size as u64 > self.size {
            return Err(CfgError::TruncatedValue {
                entry_offset,
                bytes_left: self.bytes_left(),
                value_size,
            });
        }

        // 8) значение целиком
        let mut raw = vec![0u8; value_size as usize];
        self.reader.read_exact(&mut raw)?;
        self.offset += value_size as u64;

        // 9-10) тег и ширина значения
        let kind = SettingType::from_tag(type_byte).ok_or(CfgError::UnknownType {
            entry_offset,
            type_byte,
        })?;
        let value = SettingValue::decode(kind, &raw, entry_offset)?;

        debug!("entry@0x{:X}: [{}] {} = {}", entry_offset, owner, name, value);
        Ok(Entry {
            owner,
            name,
            value,
            entry_offset,
        })
    }
}

impl<R: Read> Iterator for RecordWalker<R> {
    type Item = Result<Entry>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_entry().transpose()
    }
}
