//! Coin amounts.
//!
//! Amounts are fixed-point integers counted in atoms to avoid floating-point
//! errors. RPC interfaces report values as floating-point coins; those are
//! converted once, at the boundary, by [`Amount::from_coins`].

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::TypesError;

/// Atoms per coin.
pub const ATOMS_PER_COIN: i64 = 100_000_000;

/// Largest representable amount in atoms (21 million coins).
pub const MAX_ATOMS: i64 = 21_000_000 * ATOMS_PER_COIN;

/// An amount of coins, stored as atoms.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Amount(i64);

impl Amount {
    pub const ZERO: Self = Self(0);

    pub fn from_atoms(atoms: i64) -> Self {
        Self(atoms)
    }

    /// Convert a floating-point coin value, rounding to the nearest atom.
    pub fn from_coins(coins: f64) -> Result<Self, TypesError> {
        if !coins.is_finite() {
            return Err(TypesError::InvalidAmount(format!("{coins} is not finite")));
        }
        let atoms = (coins * ATOMS_PER_COIN as f64).round();
        if atoms.abs() > MAX_ATOMS as f64 {
            return Err(TypesError::InvalidAmount(format!(
                "{coins} exceeds the maximum supply"
            )));
        }
        Ok(Self(atoms as i64))
    }

    pub fn atoms(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        let per_coin = ATOMS_PER_COIN as u64;
        write!(f, "{sign}{}.{:08} DCR", abs / per_coin, abs % per_coin)
    }
}
