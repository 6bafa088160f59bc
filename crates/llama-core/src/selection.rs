//! Keeper selection: at most two living llamas, in the order picked.

use crate::components::llama::LlamaId;
use crate::components::world::Herd;
use crate::error::CommandError;

pub const MAX_SELECTED: usize = 2;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    ids: Vec<LlamaId>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Selects or deselects a llama. Dead or unknown llamas are ignored and
    /// picking a third llama starts a fresh selection.
    pub fn toggle(&mut self, id: &LlamaId, herd: &Herd) {
        match herd.get(id) {
            Some(llama) if llama.is_alive() => {}
            _ => return,
        }
        if let Some(pos) = self.ids.iter().position(|selected| selected == id) {
            self.ids.remove(pos);
            return;
        }
        if self.ids.len() >= MAX_SELECTED {
            self.ids.clear();
        }
        self.ids.push(id.clone());
    }

    /// Drops ids of llamas that died or no longer exist.
    pub fn prune(&mut self, herd: &Herd) {
        self.ids
            .retain(|id| herd.get(id).is_some_and(|llama| llama.is_alive()));
    }

    pub fn breeding_pair(&self) -> Result<(LlamaId, LlamaId), CommandError> {
        match self.ids.as_slice() {
            [a, b] => Ok((a.clone(), b.clone())),
            other => Err(CommandError::BreedingNeedsTwo {
                selected: other.len(),
            }),
        }
    }

    /// The selected llama that comes first in the roster.
    pub fn first<'h>(&self, herd: &'h Herd) -> Result<&'h LlamaId, CommandError> {
        herd.iter()
            .map(|llama| &llama.id)
            .find(|id| self.contains(id))
            .ok_or(CommandError::NothingSelected)
    }

    pub fn contains(&self, id: &LlamaId) -> bool {
        self.ids.contains(id)
    }

    pub fn ids(&self) -> &[LlamaId] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }
}
