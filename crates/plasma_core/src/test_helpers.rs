//! Key generation and signing helpers for tests.
//!
//! The library itself only verifies; signing lives here so tests across the
//! workspace can build authentic transactions.

use crate::codec::{encode_signature, keccak256, pubkey_to_address};
use crate::types::{Address, EncodedSignature, Position};
use secp256k1::{Message, PublicKey, SecretKey, SECP256K1};

/// A secp256k1 key pair with its derived address
#[derive(Debug, Clone)]
pub struct TestKey {
    pub secret: SecretKey,
    pub public: PublicKey,
    pub address: Address,
}

impl TestKey {
    /// Generate a fresh random key
    pub fn random() -> Self {
        let (secret, public) = SECP256K1.generate_keypair(&mut secp256k1::rand::thread_rng());
        Self {
            secret,
            public,
            address: pubkey_to_address(&public),
        }
    }

    /// Sign an already hashed message
    pub fn sign_hash(&self, hash: &[u8; 32]) -> EncodedSignature {
        let message = Message::from_slice(hash).expect("32-byte digest");
        let signature = SECP256K1.sign_ecdsa_recoverable(&message, &self.secret);
        encode_signature(&signature)
    }

    /// Hash `bytes` with keccak256 and sign the digest
    pub fn sign(&self, bytes: &[u8]) -> EncodedSignature {
        self.sign_hash(&keccak256(bytes))
    }

    /// Confirmation signature over a position
    pub fn confirm(&self, position: &Position) -> EncodedSignature {
        self.sign(&position.sign_bytes())
    }
}

/// An address filled with a single byte, for records nobody needs to sign for
pub fn filler_address(byte: u8) -> Address {
    Address([byte; 20])
}
