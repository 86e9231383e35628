//! Fixed-width numeric decoding for the big- and little-endian encodings.
//!
//! A value is a packed array of elements. One element prints as a scalar,
//! anything else (including no elements at all) prints as `[a b c]`.

use crate::encoding::{BinaryType, ByteOrder};
use crate::error::{FormatError, Result};

macro_rules! decode_elements {
    ($data:expr, $order:expr, $ty:ty, $render:expr) => {{
        const WIDTH: usize = std::mem::size_of::<$ty>();
        $data
            .chunks_exact(WIDTH)
            .map(|chunk| {
                let mut raw = [0u8; WIDTH];
                raw.copy_from_slice(chunk);
                let value = match $order {
                    ByteOrder::Big => <$ty>::from_be_bytes(raw),
                    ByteOrder::Little => <$ty>::from_le_bytes(raw),
                };
                $render(value)
            })
            .collect::<Vec<String>>()
    }};
}

pub fn decode(data: &[u8], order: ByteOrder, ty: BinaryType) -> Result<String> {
    let width = ty.width();
    if data.len() % width != 0 {
        return Err(FormatError::ByteLengthMismatch {
            len: data.len(),
            width,
        });
    }

    let elements = match ty {
        BinaryType::Int8 => decode_elements!(data, order, i8, |v: i8| v.to_string()),
        BinaryType::Int16 => decode_elements!(data, order, i16, |v: i16| v.to_string()),
        BinaryType::Int32 => decode_elements!(data, order, i32, |v: i32| v.to_string()),
        BinaryType::Int64 => decode_elements!(data, order, i64, |v: i64| v.to_string()),
        BinaryType::Uint8 => decode_elements!(data, order, u8, |v: u8| v.to_string()),
        BinaryType::Uint16 => decode_elements!(data, order, u16, |v: u16| v.to_string()),
        BinaryType::Uint32 => decode_elements!(data, order, u32, |v: u32| v.to_string()),
        BinaryType::Uint64 => decode_elements!(data, order, u64, |v: u64| v.to_string()),
        BinaryType::Float32 => decode_elements!(data, order, f32, format_f32),
        BinaryType::Float64 => decode_elements!(data, order, f64, format_f64),
    };

    if data.len() == width {
        Ok(elements.into_iter().next().unwrap_or_default())
    } else {
        Ok(format!("[{}]", elements.join(" ")))
    }
}

fn format_f32(v: f32) -> String {
    if v.is_finite() {
        shortest(format!("{:e}", v), || v.to_string())
    } else {
        non_finite(v.is_nan(), v.is_sign_negative())
    }
}

fn format_f64(v: f64) -> String {
    if v.is_finite() {
        shortest(format!("{:e}", v), || v.to_string())
    } else {
        non_finite(v.is_nan(), v.is_sign_negative())
    }
}

/// Picks plain or exponent notation from the shortest round-trip digits.
/// Exponent notation is used when the decimal exponent is below -4 or at
/// least 21, written with an explicit sign and at least two digits.
fn shortest(scientific: String, plain: impl FnOnce() -> String) -> String {
    let Some((mantissa, exponent)) = scientific.split_once('e') else {
        return plain();
    };
    let exponent: i32 = match exponent.parse() {
        Ok(e) => e,
        Err(_) => return plain(),
    };
    if (-4..21).contains(&exponent) {
        return plain();
    }
    let sign = if exponent < 0 { '-' } else { '+' };
    format!("{}e{}{:02}", mantissa, sign, exponent.abs())
}

fn non_finite(is_nan: bool, negative: bool) -> String {
    match (is_nan, negative) {
        (true, _) => "NaN".to_string(),
        (false, true) => "-Inf".to_string(),
        (false, false) => "+Inf".to_string(),
    }
}
