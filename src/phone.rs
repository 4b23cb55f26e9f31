//! Russian mobile numbers, stored as `+7 XXX XXX-XX-XX`.

use crate::error::{AppError, AppResult};

/// Accepts `+7`, `7`, `8` or a bare ten-digit number with any separators.
pub fn normalize_phone(raw: &str) -> AppResult<String> {
    let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
    let national = match digits.len() {
        10 => digits.as_str(),
        11 if digits.starts_with('7') || digits.starts_with('8') => &digits[1..],
        _ => {
            return Err(AppError::BadRequest(
                "Phone must look like +7 999 777-77-77".into(),
            ));
        }
    };
    Ok(format!(
        "+7 {} {}-{}-{}",
        &national[..3],
        &national[3..6],
        &national[6..8],
        &national[8..]
    ))
}

