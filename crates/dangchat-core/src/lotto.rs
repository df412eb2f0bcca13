//! Lotto set generation.
//!
//! Pure number-picking for the lotto screen: pool 1..=45, up to six fixed
//! inclusions, arbitrary exclusions, five sorted sets per run. The Oracle
//! is not involved; its luck enrichment rides the normal fetch path.

use rand::seq::SliceRandom;
use rand::Rng;
use thiserror::Error;

pub const POOL_MAX: u8 = 45;
pub const SET_LEN: usize = 6;
pub const SET_COUNT: usize = 5;
pub const MAX_FIXED: usize = 6;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LottoError {
    #[error("number {0} is outside 1..={POOL_MAX}")]
    OutOfRange(u8),

    #[error("number {0} cannot be both fixed and excluded")]
    Conflict(u8),

    #[error("at most {MAX_FIXED} numbers can be fixed")]
    TooManyFixed,

    #[error("not enough candidates left to fill a set")]
    PoolExhausted,
}

fn check_range(numbers: &[u8]) -> Result<(), LottoError> {
    match numbers.iter().find(|n| **n < 1 || **n > POOL_MAX) {
        Some(n) => Err(LottoError::OutOfRange(*n)),
        None => Ok(()),
    }
}

/// Generate [`SET_COUNT`] sorted sets of [`SET_LEN`] numbers, honoring fixed
/// inclusions and exclusions.
pub fn generate_sets<R: Rng + ?Sized>(
    included: &[u8],
    excluded: &[u8],
    rng: &mut R,
) -> Result<Vec<Vec<u8>>, LottoError> {
    check_range(included)?;
    check_range(excluded)?;
    if included.len() > MAX_FIXED {
        return Err(LottoError::TooManyFixed);
    }
    if let Some(n) = included.iter().find(|n| excluded.contains(n)) {
        return Err(LottoError::Conflict(*n));
    }

    let pool: Vec<u8> = (1..=POOL_MAX)
        .filter(|n| !excluded.contains(n) && !included.contains(n))
        .collect();
    let needed = SET_LEN - included.len();
    if pool.len() < needed {
        return Err(LottoError::PoolExhausted);
    }

    let mut sets = Vec::with_capacity(SET_COUNT);
    for _ in 0..SET_COUNT {
        let mut set: Vec<u8> = included.to_vec();
        set.extend(pool.choose_multiple(rng, needed).copied());
        set.sort_unstable();
        sets.push(set);
    }
    Ok(sets)
}
