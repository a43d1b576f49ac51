//! Ordered record of everything the controller has applied to its target.

use serde::{Deserialize, Serialize};

use crate::modules::UpgradeTarget;
use crate::stats::UpgradeError;
use crate::undo::{revert, UndoAction};
use crate::upgrades::UpgradeKind;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppliedUpgrade {
    pub kind: UpgradeKind,
    pub undo: UndoAction,
    pub note: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UndoLedger {
    entries: Vec<AppliedUpgrade>,
}

impl UndoLedger {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[AppliedUpgrade] {
        &self.entries
    }

    pub fn get(&self, index: usize) -> Option<&AppliedUpgrade> {
        self.entries.get(index)
    }

    pub fn kinds(&self) -> Vec<UpgradeKind> {
        self.entries.iter().map(|e| e.kind).collect()
    }

    /// Kinds held by every slot except `index`
    pub fn kinds_except(&self, index: usize) -> Vec<UpgradeKind> {
        self.entries
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != index)
            .map(|(_, e)| e.kind)
            .collect()
    }

    pub fn push(&mut self, entry: AppliedUpgrade) {
        self.entries.push(entry);
    }

    /// Swap in a new entry at `index`; returns the old one
    pub fn replace(&mut self, index: usize, entry: AppliedUpgrade) -> Option<AppliedUpgrade> {
        let slot = self.entries.get_mut(index)?;
        Some(std::mem::replace(slot, entry))
    }

    pub fn remove(&mut self, index: usize) -> Option<AppliedUpgrade> {
        if index < self.entries.len() {
            Some(self.entries.remove(index))
        } else {
            None
        }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Revert one slot's stat change without removing the slot
    pub fn undo_at(
        &self,
        index: usize,
        target: &mut dyn UpgradeTarget,
    ) -> Result<bool, UpgradeError> {
        match self.entries.get(index) {
            Some(entry) => {
                revert(target, &entry.undo)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Revert every entry, newest first, then clear.
    ///
    /// Keeps going past a failing entry so one broken slot cannot strand the rest;
    /// the first error is returned.
    pub fn undo_all(&mut self, target: &mut dyn UpgradeTarget) -> Result<(), UpgradeError> {
        let mut first_error = None;
        for entry in self.entries.iter().rev() {
            if let Err(e) = revert(target, &entry.undo) {
                first_error.get_or_insert(e);
            }
        }
        self.entries.clear();
        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}
