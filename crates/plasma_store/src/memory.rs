//! In-memory UTXO set

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use plasma_core::{Address, Position, Utxo, UtxoStore};

use crate::StoreError;

/// UTXO set held in memory, shareable across threads by cloning
#[derive(Clone, Default)]
pub struct MemoryUtxoStore {
    utxos: Arc<RwLock<HashMap<Position, Utxo>>>,
}

impl MemoryUtxoStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace the UTXO at its position
    pub fn insert(&self, utxo: Utxo) -> Result<(), StoreError> {
        let mut utxos = self.utxos.write().map_err(|_| StoreError::LockPoisoned)?;
        utxos.insert(utxo.position, utxo);
        Ok(())
    }

    /// Remove the UTXO at a position, returning it if it existed
    pub fn remove(&self, position: &Position) -> Result<Option<Utxo>, StoreError> {
        let mut utxos = self.utxos.write().map_err(|_| StoreError::LockPoisoned)?;
        Ok(utxos.remove(position))
    }

    /// All UTXOs currently spendable by `owner`
    pub fn owned_by(&self, owner: &Address) -> Result<Vec<Utxo>, StoreError> {
        let utxos = self.utxos.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(utxos
            .values()
            .filter(|utxo| utxo.owner == *owner)
            .cloned()
            .collect())
    }

    pub fn len(&self) -> Result<usize, StoreError> {
        let utxos = self.utxos.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(utxos.len())
    }

    pub fn is_empty(&self) -> Result<bool, StoreError> {
        Ok(self.len()? == 0)
    }
}

impl UtxoStore for MemoryUtxoStore {
    type Utxo = Utxo;

    fn get_utxo(&self, position: &Position) -> Option<Utxo> {
        match self.utxos.read() {
            Ok(utxos) => utxos.get(position).cloned(),
            Err(_) => {
                tracing::error!("UTXO store lock poisoned, treating {} as missing", position);
                None
            }
        }
    }
}
