//! Encoded-polyline codec.
//!
//! The wire format is the classic character-delta encoding: each coordinate
//! is a pair of signed deltas from the previous coordinate, scaled by
//! `10^precision`, zig-zag shifted, and emitted as base-64-ish printable
//! chunks of 5 bits offset by 63 (`'?'`).
//!
//! Precision is caller-supplied configuration.  Directions services emit
//! precision-6 geometry ([`PRECISION_6`]); the codec itself has no preferred
//! precision.  `decode(encode(path, k), k)` reproduces every coordinate
//! within `0.5 * 10^-k` degrees, and `encode` is deterministic, so golden
//! strings are stable across platforms.

use nav_core::Coordinate;

use crate::error::{GeometryError, GeometryResult};

/// Coordinate precision used by directions-service polylines: 6 decimal
/// digits, ~0.1 m of rounding at the equator.
pub const PRECISION_6: u32 = 6;

/// Continuation flag on each 5-bit chunk.
const CHUNK_CONT: u64 = 0x20;
/// Payload mask of each chunk.
const CHUNK_MASK: u64 = 0x1f;
/// Printable offset added to every chunk byte.
const CHUNK_OFFSET: u8 = 63;

// ── Decode ────────────────────────────────────────────────────────────────────

/// Decode an encoded polyline into a coordinate path.
///
/// Fails when the input ends mid-coordinate, contains a byte below `'?'`, or
/// produces a latitude outside ±90° / longitude outside ±180°.
pub fn decode(encoded: &str, precision: u32) -> GeometryResult<Vec<Coordinate>> {
    let factor = 10f64.powi(precision as i32);
    let bytes = encoded.as_bytes();

    let mut path = Vec::new();
    let mut idx = 0usize;
    let mut lat = 0i64;
    let mut lon = 0i64;

    while idx < bytes.len() {
        let (d_lat, after_lat) = decode_signed(bytes, idx)?;
        let (d_lon, after_lon) = decode_signed(bytes, after_lat)?;

        lat += d_lat;
        lon += d_lon;
        idx = after_lon;

        let coord = Coordinate::new(lon as f64 / factor, lat as f64 / factor);
        if !coord.in_range() {
            return Err(GeometryError::OutOfRange { lon: coord.lon, lat: coord.lat });
        }
        path.push(coord);
    }

    Ok(path)
}

/// Decode one zig-zag varint starting at `idx`; returns the value and the
/// index of the first byte after it.
fn decode_signed(bytes: &[u8], mut idx: usize) -> GeometryResult<(i64, usize)> {
    let mut accum: u64 = 0;
    let mut shift = 0u32;

    loop {
        let Some(&byte) = bytes.get(idx) else {
            return Err(GeometryError::Truncated(idx));
        };
        if byte < CHUNK_OFFSET {
            return Err(GeometryError::InvalidByte { byte, offset: idx });
        }
        // A value occupies at most 64 bits; more continuation chunks than
        // that is malformed input, not a bigger number.
        if shift >= u64::BITS {
            return Err(GeometryError::OverlongVarint(idx));
        }
        let chunk = (byte - CHUNK_OFFSET) as u64;
        accum |= (chunk & CHUNK_MASK) << shift;
        shift += 5;
        idx += 1;
        if chunk & CHUNK_CONT == 0 {
            break;
        }
    }

    // Undo the zig-zag shift: LSB carries the sign.
    let value = if accum & 1 == 1 {
        !((accum >> 1) as i64)
    } else {
        (accum >> 1) as i64
    };
    Ok((value, idx))
}

// ── Encode ────────────────────────────────────────────────────────────────────

/// Encode a coordinate path at the given precision.
pub fn encode(path: &[Coordinate], precision: u32) -> String {
    let factor = 10f64.powi(precision as i32);

    // Two varints per coordinate, usually 1-3 bytes each.
    let mut out = String::with_capacity(path.len() * 6);
    let mut prev_lat = 0i64;
    let mut prev_lon = 0i64;

    for coord in path {
        let lat = (coord.lat * factor).round() as i64;
        let lon = (coord.lon * factor).round() as i64;
        encode_signed(lat - prev_lat, &mut out);
        encode_signed(lon - prev_lon, &mut out);
        prev_lat = lat;
        prev_lon = lon;
    }

    out
}

fn encode_signed(value: i64, out: &mut String) {
    let mut accum = if value < 0 {
        !((value as u64) << 1)
    } else {
        (value as u64) << 1
    };

    while accum >= CHUNK_CONT {
        out.push(((CHUNK_CONT | (accum & CHUNK_MASK)) as u8 + CHUNK_OFFSET) as char);
        accum >>= 5;
    }
    out.push((accum as u8 + CHUNK_OFFSET) as char);
}
