//! Process-wide display settings consulted at format time.

use serde::{Deserialize, Serialize};

/// Magnitude base used when turning byte counts into text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "u64", into = "u64")]
pub enum UnitBase {
    /// Powers of 1000 (KB, MB, GB...)
    Decimal,
    /// Powers of 1024 (KiB, MiB, GiB...)
    #[default]
    Binary,
}

impl UnitBase {
    pub fn factor(self) -> f64 {
        match self {
            UnitBase::Decimal => 1000.0,
            UnitBase::Binary => 1024.0,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            UnitBase::Decimal => UnitBase::Binary,
            UnitBase::Binary => UnitBase::Decimal,
        }
    }
}

impl TryFrom<u64> for UnitBase {
    type Error = String;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        match value {
            1000 => Ok(UnitBase::Decimal),
            1024 => Ok(UnitBase::Binary),
            other => Err(format!("unit base must be 1000 or 1024, got {}", other)),
        }
    }
}

impl From<UnitBase> for u64 {
    fn from(base: UnitBase) -> Self {
        match base {
            UnitBase::Decimal => 1000,
            UnitBase::Binary => 1024,
        }
    }
}

/// Shared mutable configuration.
///
/// Only the unit-base toggle writes to it; every formatting call site receives
/// a reference and reads the base on each call, so a toggle re-labels
/// snapshots that were already collected.
#[derive(Debug, Clone, Default)]
pub struct GlobalContext {
    unit_base: UnitBase,
}

impl GlobalContext {
    pub fn new(unit_base: UnitBase) -> Self {
        Self { unit_base }
    }

    pub fn unit_base(&self) -> UnitBase {
        self.unit_base
    }

    /// Flip between 1000 and 1024, returning the new base.
    pub fn toggle_unit_base(&mut self) -> UnitBase {
        self.unit_base = self.unit_base.toggled();
        log::info!("Unit base switched to {}", u64::from(self.unit_base));
        self.unit_base
    }
}
