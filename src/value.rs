//! value — типизированные значения настроек (STR / U8 / U32).
//!
//! Набор типов закрыт форматом: неизвестный тег — всегда ошибка, а не «пропуск».
//! Текстовая форма:
//!   str!"text"   u8!0xHH   u32!0xHHHHHHHH   (hex — верхний регистр, с ведущими нулями)

use byteorder::{ByteOrder, LittleEndian};
use std::fmt;

use crate::consts::{CFG_TYPE_STR, CFG_TYPE_U32, CFG_TYPE_U8, CFG_U32_LEN, CFG_U8_LEN};
use crate::error::{CfgError, Result};

/// Тег типа значения на проводе.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SettingType {
    Str,
    U8,
    U32,
}

impl SettingType {
    pub fn from_tag(tag: u8) -> Option<Self> {
        match tag {
            CFG_TYPE_STR => Some(SettingType::Str),
            CFG_TYPE_U8 => Some(SettingType::U8),
            CFG_TYPE_U32 => Some(SettingType::U32),
            _ => None,
        }
    }

    pub fn tag(self) -> u8 {
        match self {
            SettingType::Str => CFG_TYPE_STR,
            SettingType::U8 => CFG_TYPE_U8,
            SettingType::U32 => CFG_TYPE_U32,
        }
    }

    /// Фиксированная длина значения (None для STR).
    pub fn fixed_len(self) -> Option<usize> {
        match self {
            SettingType::Str => None,
            SettingType::U8 => Some(CFG_U8_LEN),
            SettingType::U32 => Some(CFG_U32_LEN),
        }
    }

    pub fn literal_prefix(self) -> &'static str {
        match self {
            SettingType::Str => "str",
            SettingType::U8 => "u8",
            SettingType::U32 => "u32",
        }
    }
}

/// Decoded value of one setting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingValue {
    Str(String),
    U8(u8),
    U32(u32),
}

impl SettingValue {
    /// Decode raw value bytes according to `kind`.
    ///
    /// `entry_offset` is only used for diagnostics.
    pub fn decode(kind: SettingType, raw: &[u8], entry_offset: u64) -> Result<Self> {
        if let Some(want) = kind.fixed_len() {
            if raw.len() != want {
                return Err(CfgError::ValueSizeMismatch {
                    entry_offset,
                    type_byte: kind.tag(),
                    expected: want,
                    found: raw.len(),
                });
            }
        }

        Ok(match kind {
            SettingType::Str => {
                let s = std::str::from_utf8(raw)
                    .map_err(|_| CfgError::MalformedString { entry_offset })?;
                SettingValue::Str(s.trim_end_matches('\0').to_string())
            }
            SettingType::U8 => SettingValue::U8(raw[0]),
            SettingType::U32 => SettingValue::U32(LittleEndian::read_u32(raw)),
        })
    }

    pub fn kind(&self) -> SettingType {
        match self {
            SettingValue::Str(_) => SettingType::Str,
            SettingValue::U8(_) => SettingType::U8,
            SettingValue::U32(_) => SettingType::U32,
        }
    }
}

impl fmt::Display for SettingValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prefix = self.kind().literal_prefix();
        match self {
            SettingValue::Str(s) => write!(f, "{}!\"{}\"", prefix, s),
            SettingValue::U8(v) => write!(f, "{}!0x{:02X}", prefix, v),
            SettingValue::U32(v) => write!(f, "{}!0x{:08X}", prefix, v),
        }
    }
}
