/*!
 * Power-of-Two Rounding
 */

use crate::core::types::Size;

/// Smallest power of two greater than or equal to `n`
///
/// Returns `None` for `n == 0` and when the result does not fit in `Size`.
#[inline]
pub fn next_power_of_two(n: Size) -> Option<Size> {
    if n == 0 {
        return None;
    }
    n.checked_next_power_of_two()
}
