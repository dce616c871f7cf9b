// src/header.rs — заголовок контейнера настроек
//
// Формат: первые 4 байта (LE u32) — полный размер контейнера, включая сам заголовок.
// Заявленный размер обязан совпадать с фактическим размером источника.

use byteorder::{LittleEndian, ReadBytesExt};
use log::trace;
use std::io::Read;

use crate::consts::HDR_SIZE;
use crate::error::{CfgError, Result};

/// Прочитать заявленный размер контейнера и сверить его с фактическим.
/// После успешного вызова reader стоит на смещении HDR_SIZE.
///
/// Контейнер ровно из заголовка (size=4) валиден и пуст. Файлы такого размера
/// отсекает вызывающий (см. source::check_preconditions), а не этот слой.
pub fn read_and_validate<R: Read>(reader: &mut R, actual_size: u64) -> Result<u32> {
    if actual_size < HDR_SIZE as u64 {
        return Err(CfgError::FileTooSmall { size: actual_size });
    }

    let declared = reader.read_u32::<LittleEndian>()?;
    trace!("header: declared=0x{:X} actual=0x{:X}", declared, actual_size);

    if declared as u64 != actual_size {
        return Err(CfgError::SizeMismatch {
            declared: declared as u64,
            actual: actual_size,
        });
    }
    Ok(declared)
}
