//! Fatal conditions of a decode pass.
//!
//! Every variant aborts the whole pass; nothing here is retried or skipped.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CfgError {
    /// Path is missing, is a directory, or cannot be opened.
    #[error("the provided path {} doesn't exist, points to a directory or can't be opened", path.display())]
    SourceUnavailable { path: PathBuf },

    /// Caller precondition: a container must be bigger than its header.
    #[error("invalid file size ({size} byte[s])")]
    FileTooSmall { size: u64 },

    /// File size beyond what the u32 header can declare or the configured limit.
    #[error("file size 0x{size:X} exceeds the allowed maximum 0x{max:X}")]
    FileTooLarge { size: u64, max: u64 },

    #[error("file size in header (0x{declared:X}) doesn't match actual file size (0x{actual:X})")]
    SizeMismatch { declared: u64, actual: u64 },

    #[error("invalid name size field length for config entry at offset 0x{entry_offset:X} (0x{bytes_left:X} byte[s] left)")]
    TruncatedHeader { entry_offset: u64, bytes_left: u64 },

    #[error("invalid name/type/value size field length for config entry at offset 0x{entry_offset:X} (0x{bytes_left:X} byte[s] left, 0x{name_size:X}-byte long name)")]
    TruncatedName {
        entry_offset: u64,
        bytes_left: u64,
        name_size: u32,
    },

    #[error("invalid value field length for config entry at offset 0x{entry_offset:X} (0x{bytes_left:X} byte[s] left, 0x{value_size:X}-byte long value)")]
    TruncatedValue {
        entry_offset: u64,
        bytes_left: u64,
        value_size: u32,
    },

    #[error("invalid stringified name for config entry at offset 0x{entry_offset:X}")]
    MalformedName { entry_offset: u64 },

    #[error("name for config entry at offset 0x{entry_offset:X} doesn't hold an owner")]
    MissingOwner { entry_offset: u64 },

    #[error("invalid value size for config entry at offset 0x{entry_offset:X} (type 0x{type_byte:02X} expects 0x{expected:X} byte[s], got 0x{found:X})")]
    ValueSizeMismatch {
        entry_offset: u64,
        type_byte: u8,
        expected: usize,
        found: usize,
    },

    /// STR payload is not valid UTF-8.
    #[error("invalid string value for config entry at offset 0x{entry_offset:X}")]
    MalformedString { entry_offset: u64 },

    #[error("unknown config value type for entry at offset 0x{entry_offset:X} (0x{type_byte:02X})")]
    UnknownType { entry_offset: u64, type_byte: u8 },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl CfgError {
    /// Offset of the record that triggered the error, if any.
    pub fn entry_offset(&self) -> Option<u64> {
        match self {
            CfgError::TruncatedHeader { entry_offset, .. }
            | CfgError::TruncatedName { entry_offset, .. }
            | CfgError::TruncatedValue { entry_offset, .. }
            | CfgError::MalformedName { entry_offset }
            | CfgError::MissingOwner { entry_offset }
            | CfgError::ValueSizeMismatch { entry_offset, .. }
            | CfgError::MalformedString { entry_offset }
            | CfgError::UnknownType { entry_offset, .. } => Some(*entry_offset),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, CfgError>;
