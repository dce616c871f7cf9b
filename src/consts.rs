//! Общие константы формата контейнера системных настроек.
//!
//! Формат (LE):
//! [total_size u32]
//! далее последовательность записей:
//! [name_size u32][name: name_size байт, последний = 0x00][type u8][value_size u32][value]

// -------- Container header --------
pub const HDR_SIZE: usize = 4;

// -------- Record --------
pub const REC_NAME_SIZE_LEN: usize = 4;
// type u8 + value_size u32, резервируются сразу после имени
pub const REC_TYPE_VSIZE_LEN: usize = 5;

/// Разделитель владельца и имени настройки: "owner!setting".
pub const OWNER_SEPARATOR: char = '!';

// -------- Value types --------
pub const CFG_TYPE_STR: u8 = 0x01;
pub const CFG_TYPE_U8: u8 = 0x02;
pub const CFG_TYPE_U32: u8 = 0x03;

// Фиксированная ширина значений
pub const CFG_U8_LEN: usize = 1;
pub const CFG_U32_LEN: usize = 4;
