//! Pairing function
//!
//! A bijection from ℕ×ℕ onto ℕ, used to fold an ordered sequence of colors
//! into a single color. Values are unbounded, so folding never wraps.

use super::common::Color;
use num_bigint::BigUint;

/// `a² + a + b` if `a >= b`, else `a + b²`.
///
/// Enumerates pairs shell by shell: all pairs with `max(a, b) = m` land in
/// `[m², (m + 1)²)`.
pub fn pairing(a: &BigUint, b: &BigUint) -> BigUint {
    if a >= b {
        a * a + a + b
    } else {
        a + b * b
    }
}

/// Folds `items` into `seed` left to right: `seed := pairing(seed, item)`.
///
/// Order matters; callers canonicalize the sequence first.
pub fn fold<'a, I>(seed: Color, items: I) -> Color
where
    I: IntoIterator<Item = &'a Color>,
{
    let folded = items
        .into_iter()
        .fold(seed.as_biguint().clone(), |running, item| {
            pairing(&running, item.as_biguint())
        });
    Color::from_biguint(folded)
}
