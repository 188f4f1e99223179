//! Human-readable byte quantities for diagnostics.

/// Units used by [`bytes_to_string`]; values past EB stay in EB.
pub const BYTE_UNITS: [&str; 7] = ["B", "KB", "MB", "GB", "TB", "PB", "EB"];

/// Default number of fractional digits.
pub const DEFAULT_PRECISION: usize = 2;

/// A byte count that can be rendered by [`bytes_to_string`].
///
/// Implemented for unsigned magnitudes (totals) and signed deltas (current
/// usage, which may be negative).
pub trait ByteQuantity: Copy {
    fn as_f64(self) -> f64;
}

macro_rules! impl_byte_quantity {
    ($($t:ty),*) => {
        $(
            impl ByteQuantity for $t {
                #[inline]
                fn as_f64(self) -> f64 {
                    self as f64
                }
            }
        )*
    };
}

impl_byte_quantity!(u64, usize, u32, i64, isize, i32);

/// Render `bytes` scaled to the largest fitting binary unit with `precision`
/// fractional digits, e.g. `"512.00 MB"`. The sign of the input is kept.
pub fn bytes_to_string<B: ByteQuantity>(bytes: B, precision: usize) -> String {
    scaled_to_string(bytes.as_f64(), precision)
}

/// [`bytes_to_string`] with [`DEFAULT_PRECISION`].
pub fn format_bytes<B: ByteQuantity>(bytes: B) -> String {
    bytes_to_string(bytes, DEFAULT_PRECISION)
}

/// Largest precision `format!` accepts.
const MAX_FORMAT_PRECISION: usize = u16::MAX as usize;

fn scaled_to_string(mut value: f64, precision: usize) -> String {
    let precision = precision.min(MAX_FORMAT_PRECISION);
    let mut unit = 0;
    while value.abs() >= 1024.0 && unit < BYTE_UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    format!("{:.*} {}", precision, value, BYTE_UNITS[unit])
}
