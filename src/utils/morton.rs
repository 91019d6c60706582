//! Morton encoding of 3D points.

use crate::math::{Point, Real, Vector};
use crate::utils::safe_div;
use alloc::vec::Vec;

/// Number of bits of resolution per axis.
pub const MORTON_BITS_PER_AXIS: u32 = 20;

const AXIS_MASK: u64 = (1 << MORTON_BITS_PER_AXIS) - 1;

//---------------------------------------------------
// --- 20 bit resolution per channel morton curve ---
//---------------------------------------------------

// Repeatedly split and shift the bits until each original bit is followed by
// two zero bits:
// 0000000000 0000000000 0000000000 0000000000 1111111111 1111111111
// 0000000000 0000000000 1111111111 0000000000 0000000000 1111111111 shift 20
// 0000000000 1111100000 0000011111 0000000000 1111100000 0000011111 shift 10
// 0000110000 0011100001 1000000111 0000110000 0011100001 1000000111 shift  6
// 0000110000 1100100001 1000011001 0000110000 1100100001 1000011001 shift  2
// 0010010010 0100100100 1001001001 0010010010 0100100100 1001001001 shift  2
#[inline]
fn split_by_3_u64(a: u32) -> u64 {
    let mut x = a as u64 & AXIS_MASK; // we only look at the first 20 bits
    x = (x & 0x3ff) | (x & 0xffc00) << 20;
    x = (x & 0x7c000001f) | (x & 0xf8000003e0) << 10;
    x = (x & 0xe001c0038007) | (x & 0x30006000c0018) << 6;
    x = (x & 0xc0218043008601) | (x & 0xc00180030006) << 2;
    x = (x & 0x41208241048209) | (x & 0x82010402080410) << 2;
    x
}

/// Encode x,y,z integer coordinates into a u64 morton value.
///
/// Only the 20 least significant bits of each coordinate are used. Bit `i` of `x`, `y` and `z`
/// lands on bit `3 * i`, `3 * i + 1` and `3 * i + 2` of the result respectively.
#[inline]
pub fn morton_encode_u64(x: u32, y: u32, z: u32) -> u64 {
    split_by_3_u64(x) | split_by_3_u64(y) << 1 | split_by_3_u64(z) << 2
}

/// Encode a 3D position into a u64 morton value.
///
/// Input should be 0.0..=1.0 along each axis. Each coordinate is scaled to
/// `2^20 - 1` and truncated toward zero.
#[inline]
pub fn morton_encode_u64_unorm(p: Vector<Real>) -> u64 {
    let scale = AXIS_MASK as Real;
    let quantize = |e: Real| ((e * scale) as u64 & AXIS_MASK) as u32;
    morton_encode_u64(quantize(p.x), quantize(p.y), quantize(p.z))
}

/// Computes one Morton sort key per point of a point set.
///
/// The points are first translated so that their componentwise minimum is the
/// origin, then divided by their componentwise maximum. An axis along which all
/// the points share the same coordinate maps to zero.
pub fn morton_keys(points: &[Point<Real>]) -> Vec<u64> {
    let Some(first) = points.first() else {
        return Vec::new();
    };

    let mins = points.iter().fold(*first, |acc, pt| acc.inf(pt));
    let extents = points
        .iter()
        .fold(Vector::zeros(), |acc: Vector<Real>, pt| acc.sup(&(pt - mins)));

    points
        .iter()
        .map(|pt| morton_encode_u64_unorm((pt - mins).zip_map(&extents, safe_div)))
        .collect()
}
