//! Persistence layer for the UTXO set using fjall database

use fjall::{Config, Keyspace, PartitionCreateOptions, PersistMode};
use plasma_core::{Address, Position, Utxo, UtxoStore, ADDRESS_LENGTH};
use std::path::Path;

use crate::StoreError;

const RECORD_LENGTH: usize = 3 * ADDRESS_LENGTH + 8;

/// Database storage for unspent outputs, keyed by canonical position bytes
pub struct UtxoStorage {
    keyspace: Keyspace,
    partition: fjall::Partition,
}

impl UtxoStorage {
    /// Open or create a UTXO database
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let keyspace = Config::new(path)
            .open()
            .map_err(|e| StoreError::Storage(format!("Failed to open database: {}", e)))?;

        let partition = keyspace
            .open_partition("utxos", PartitionCreateOptions::default())
            .map_err(|e| StoreError::Storage(format!("Failed to open partition: {}", e)))?;

        Ok(Self {
            keyspace,
            partition,
        })
    }

    /// Store a UTXO, replacing any record at the same position
    pub fn store_utxo(&self, utxo: &Utxo) -> Result<(), StoreError> {
        let key = utxo.position.sign_bytes();
        let value = encode_record(utxo);

        self.partition
            .insert(key.as_slice(), value.as_slice())
            .map_err(|e| StoreError::Storage(format!("Failed to insert UTXO: {}", e)))?;

        tracing::debug!("Stored UTXO {} owned by {}", utxo.position, utxo.owner);
        Ok(())
    }

    /// Load the UTXO at a position
    pub fn load_utxo(&self, position: &Position) -> Result<Option<Utxo>, StoreError> {
        match self.partition.get(position.sign_bytes().as_slice()) {
            Ok(Some(value)) => decode_record(*position, &value).map(Some),
            Ok(None) => Ok(None),
            Err(e) => Err(StoreError::Storage(format!("Failed to get UTXO: {}", e))),
        }
    }

    /// Remove the UTXO at a position
    pub fn remove_utxo(&self, position: &Position) -> Result<(), StoreError> {
        self.partition
            .remove(position.sign_bytes().as_slice())
            .map_err(|e| StoreError::Storage(format!("Failed to remove UTXO: {}", e)))?;
        Ok(())
    }

    /// All stored UTXOs spendable by `owner`
    pub fn utxos_owned_by(&self, owner: &Address) -> Result<Vec<Utxo>, StoreError> {
        let mut utxos = Vec::new();

        for item in self.partition.iter() {
            let (key, value) = item.map_err(|e| {
                StoreError::Storage(format!("Failed to iterate partition: {}", e))
            })?;

            let Some(position) = Position::from_sign_bytes(&key) else {
                tracing::warn!("Skipping entry with malformed key of {} bytes", key.len());
                continue;
            };

            let utxo = decode_record(position, &value)?;
            if utxo.owner == *owner {
                utxos.push(utxo);
            }
        }

        Ok(utxos)
    }

    /// Flush the journal to disk
    pub fn flush(&self) -> Result<(), StoreError> {
        self.keyspace
            .persist(PersistMode::SyncAll)
            .map_err(|e| StoreError::Storage(format!("Failed to persist: {}", e)))
    }
}

impl UtxoStore for UtxoStorage {
    type Utxo = Utxo;

    fn get_utxo(&self, position: &Position) -> Option<Utxo> {
        match self.load_utxo(position) {
            Ok(utxo) => utxo,
            Err(e) => {
                tracing::error!("UTXO lookup at {} failed: {}", position, e);
                None
            }
        }
    }
}

fn encode_record(utxo: &Utxo) -> [u8; RECORD_LENGTH] {
    let mut record = [0u8; RECORD_LENGTH];
    record[0..20].copy_from_slice(utxo.owner.as_bytes());
    record[20..40].copy_from_slice(utxo.input_addresses[0].as_bytes());
    record[40..60].copy_from_slice(utxo.input_addresses[1].as_bytes());
    record[60..68].copy_from_slice(&utxo.amount.to_be_bytes());
    record
}

fn decode_record(position: Position, value: &[u8]) -> Result<Utxo, StoreError> {
    let corrupt = || StoreError::CorruptRecord { len: value.len() };
    if value.len() != RECORD_LENGTH {
        return Err(corrupt());
    }

    let address = |range: std::ops::Range<usize>| -> Result<Address, StoreError> {
        value[range].try_into().map(Address).map_err(|_| corrupt())
    };

    let owner = address(0..20)?;
    let input_addresses = [address(20..40)?, address(40..60)?];
    let amount = u64::from_be_bytes(value[60..68].try_into().map_err(|_| corrupt())?);

    Ok(Utxo::new(position, owner, input_addresses, amount))
}
