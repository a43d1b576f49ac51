//! Undo actions as plain data, plus the engine that applies and reverses them.
//!
//! An upgrade never mutates a module directly. It asks `apply_delta` to move one
//! stat; the returned `UndoAction` records the delta that actually landed after
//! clamping. `revert` subtracts that delta and re-clamps, because other upgrades may
//! have moved the same stat in the meantime.
//!
//! A module may start outside the usual bounds (an authored interval below the floor,
//! a shooter with zero projectiles). The starting value is never pulled in on its
//! own: the bounds for that action are widened to include it, so revert lands back
//! on it.

use serde::{Deserialize, Serialize};

use crate::modules::UpgradeTarget;
use crate::stats::{StatBounds, StatKey, UpgradeError};

/// Reversal record for one applied stat change
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UndoAction {
    pub stat: StatKey,
    /// `after - before`, measured on the stored values
    pub delta: f64,
    pub bounds: StatBounds,
}

impl UndoAction {
    /// A change that hit its clamp before moving anything
    pub fn is_noop(&self) -> bool {
        self.delta == 0.0
    }
}

/// Move `stat` by `requested`, clamped to its bounds, and report what happened.
///
/// The delta is taken from the value read back from the module so float narrowing
/// and integer rounding are already accounted for.
pub fn apply_delta(
    target: &mut dyn UpgradeTarget,
    stat: StatKey,
    requested: f64,
) -> Result<UndoAction, UpgradeError> {
    let before = stat.read(target)?;
    let mut bounds = stat.bounds();
    if !bounds.contains(before) {
        bounds = bounds.widened_to(before);
    }
    let after = stat.quantize(bounds.clamp(stat.quantize(before + requested)));
    stat.write(target, after)?;
    let stored = stat.read(target)?;
    Ok(UndoAction {
        stat,
        delta: stored - before,
        bounds,
    })
}

/// Subtract the recorded delta and re-clamp. Returns the value left on the module.
///
/// When clamping interfered with this stat between apply and revert, the result is
/// not bit-exact; it is always inside `bounds`.
pub fn revert(target: &mut dyn UpgradeTarget, action: &UndoAction) -> Result<f64, UpgradeError> {
    let current = action.stat.read(target)?;
    let restored = action
        .stat
        .quantize(action.bounds.clamp(current - action.delta));
    action.stat.write(target, restored)?;
    action.stat.read(target)
}
