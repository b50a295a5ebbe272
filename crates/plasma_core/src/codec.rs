//! Recoverable signature codec and address derivation

use crate::traits::CodecError;
use crate::types::{
    Address, EncodedSignature, ADDRESS_LENGTH, RAW_SIGNATURE_LENGTH, SECP256K1_SIGNATURE_PREFIX,
    SIGNATURE_HEADER_LENGTH,
};
use secp256k1::ecdsa::{RecoverableSignature, RecoveryId};
use secp256k1::{Message, PublicKey, SECP256K1};
use sha3::{Digest, Keccak256};

/// Digest used for transaction sign-bytes and position sign-bytes alike
pub fn keccak256(data: &[u8]) -> [u8; 32] {
    let mut hash = [0u8; 32];
    hash.copy_from_slice(&Keccak256::digest(data));
    hash
}

/// Derive the address of a public key: last 20 bytes of the keccak256 of
/// the uncompressed point without its `0x04` tag.
pub fn pubkey_to_address(public_key: &PublicKey) -> Address {
    let uncompressed = public_key.serialize_uncompressed();
    let hash = keccak256(&uncompressed[1..]);
    let mut address = [0u8; ADDRESS_LENGTH];
    address.copy_from_slice(&hash[32 - ADDRESS_LENGTH..]);
    Address(address)
}

/// Decoder for prefixed recoverable secp256k1 signatures
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SignatureCodec {
    prefix: [u8; 4],
}

impl Default for SignatureCodec {
    fn default() -> Self {
        Self::new(SECP256K1_SIGNATURE_PREFIX)
    }
}

impl SignatureCodec {
    /// Codec expecting the given 4-byte type prefix
    pub fn new(prefix: [u8; 4]) -> Self {
        Self { prefix }
    }

    pub fn prefix(&self) -> [u8; 4] {
        self.prefix
    }

    /// Validate the header and parse the raw `r || s || v` signature
    pub fn decode(&self, signature: &EncodedSignature) -> Result<RecoverableSignature, CodecError> {
        let bytes = signature.as_bytes();
        if bytes.len() < SIGNATURE_HEADER_LENGTH {
            return Err(CodecError::WrongLength {
                expected: SIGNATURE_HEADER_LENGTH + RAW_SIGNATURE_LENGTH,
                actual: bytes.len(),
            });
        }

        let (header, raw) = bytes.split_at(SIGNATURE_HEADER_LENGTH);
        if header[..4] != self.prefix {
            return Err(CodecError::WrongPrefix(hex::encode(&header[..4])));
        }

        let declared = header[4] as usize;
        if declared != RAW_SIGNATURE_LENGTH {
            return Err(CodecError::WrongLength {
                expected: RAW_SIGNATURE_LENGTH,
                actual: declared,
            });
        }
        if raw.len() != RAW_SIGNATURE_LENGTH {
            return Err(CodecError::WrongLength {
                expected: RAW_SIGNATURE_LENGTH,
                actual: raw.len(),
            });
        }

        let v = raw[64];
        if v > 3 {
            return Err(CodecError::InvalidRecoveryId(v));
        }
        let recovery_id =
            RecoveryId::from_i32(i32::from(v)).map_err(|_| CodecError::InvalidRecoveryId(v))?;

        RecoverableSignature::from_compact(&raw[..64], recovery_id)
            .map_err(|_| CodecError::Malformed)
    }

    /// Encode a recoverable signature with this codec's header
    pub fn encode(&self, signature: &RecoverableSignature) -> EncodedSignature {
        let (recovery_id, compact) = signature.serialize_compact();
        let mut bytes = Vec::with_capacity(SIGNATURE_HEADER_LENGTH + RAW_SIGNATURE_LENGTH);
        bytes.extend_from_slice(&self.prefix);
        bytes.push(RAW_SIGNATURE_LENGTH as u8);
        bytes.extend_from_slice(&compact);
        bytes.push(recovery_id.to_i32() as u8);
        EncodedSignature(bytes)
    }

    /// Recover the signer's address from a message hash and an encoded signature
    pub fn recover_address(
        &self,
        message_hash: &[u8; 32],
        signature: &EncodedSignature,
    ) -> Result<Address, CodecError> {
        let signature = self.decode(signature)?;
        let message = Message::from_slice(message_hash).map_err(|_| CodecError::Malformed)?;
        let public_key = SECP256K1
            .recover_ecdsa(&message, &signature)
            .map_err(|_| CodecError::RecoveryFailed)?;
        Ok(pubkey_to_address(&public_key))
    }
}

/// Decode with the default secp256k1 prefix
pub fn decode_signature(signature: &EncodedSignature) -> Result<RecoverableSignature, CodecError> {
    SignatureCodec::default().decode(signature)
}

/// Encode with the default secp256k1 prefix
pub fn encode_signature(signature: &RecoverableSignature) -> EncodedSignature {
    SignatureCodec::default().encode(signature)
}

/// Recover with the default secp256k1 prefix
pub fn recover_address(
    message_hash: &[u8; 32],
    signature: &EncodedSignature,
) -> Result<Address, CodecError> {
    SignatureCodec::default().recover_address(message_hash, signature)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::TestKey;
    use secp256k1::SecretKey;

    #[test]
    fn test_keccak256_empty_input() {
        assert_eq!(
            hex::encode(keccak256(b"")),
            "c5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470"
        );
    }

    #[test]
    fn test_address_of_secret_key_one() {
        let mut secret = [0u8; 32];
        secret[31] = 1;
        let secret_key = SecretKey::from_slice(&secret).unwrap();
        let public_key = PublicKey::from_secret_key(SECP256K1, &secret_key);

        assert_eq!(
            pubkey_to_address(&public_key).to_string(),
            "0x7e5f4552091a69125d5dfcb7b8c2659029395bdf"
        );
    }

    #[test]
    fn test_recover_signer_address() {
        let key = TestKey::random();
        let message = b"spend position 100";
        let signature = key.sign(message);

        assert_eq!(signature.as_bytes().len(), 70);
        assert_eq!(&signature.as_bytes()[..4], &SECP256K1_SIGNATURE_PREFIX);
        assert_eq!(signature.as_bytes()[4], 65);

        let recovered = recover_address(&keccak256(message), &signature).unwrap();
        assert_eq!(recovered, key.address);
    }

    #[test]
    fn test_recovery_is_deterministic() {
        let key = TestKey::random();
        let hash = keccak256(b"same input");
        let signature = key.sign_hash(&hash);

        let first = recover_address(&hash, &signature);
        let second = recover_address(&hash, &signature);
        assert_eq!(first, second);
    }

    #[test]
    fn test_other_message_recovers_other_address() {
        let key = TestKey::random();
        let signature = key.sign(b"original");
        match recover_address(&keccak256(b"tampered"), &signature) {
            Ok(address) => assert_ne!(address, key.address),
            Err(err) => assert_eq!(err, CodecError::RecoveryFailed),
        }
    }

    #[test]
    fn test_wrong_prefix_rejected() {
        let key = TestKey::random();
        let mut bytes = key.sign(b"msg").0;
        bytes[0] ^= 0xff;

        let err = decode_signature(&EncodedSignature(bytes)).unwrap_err();
        assert_eq!(err, CodecError::WrongPrefix("e9e1feea".to_string()));
    }

    #[test]
    fn test_custom_prefix_round_trip() {
        let key = TestKey::random();
        let codec = SignatureCodec::new([1, 2, 3, 4]);
        let hash = keccak256(b"msg");
        let default_encoded = key.sign_hash(&hash);
        let recoverable = decode_signature(&default_encoded).unwrap();

        let custom = codec.encode(&recoverable);
        assert_eq!(&custom.as_bytes()[..4], &[1u8, 2, 3, 4]);
        assert_eq!(codec.recover_address(&hash, &custom), Ok(key.address));
        assert!(matches!(
            recover_address(&hash, &custom),
            Err(CodecError::WrongPrefix(_))
        ));
        assert!(matches!(
            codec.recover_address(&hash, &default_encoded),
            Err(CodecError::WrongPrefix(_))
        ));
    }

    #[test]
    fn test_length_checks() {
        let key = TestKey::random();
        let signature = key.sign(b"msg");

        let empty = EncodedSignature::empty();
        assert_eq!(
            decode_signature(&empty).unwrap_err(),
            CodecError::WrongLength {
                expected: 70,
                actual: 0
            }
        );

        let mut wrong_declared = signature.clone();
        wrong_declared.0[4] = 64;
        assert_eq!(
            decode_signature(&wrong_declared).unwrap_err(),
            CodecError::WrongLength {
                expected: 65,
                actual: 64
            }
        );

        let mut truncated = signature.clone();
        truncated.0.pop();
        assert_eq!(
            decode_signature(&truncated).unwrap_err(),
            CodecError::WrongLength {
                expected: 65,
                actual: 64
            }
        );

        let mut extended = signature;
        extended.0.push(0);
        assert_eq!(
            decode_signature(&extended).unwrap_err(),
            CodecError::WrongLength {
                expected: 65,
                actual: 66
            }
        );
    }

    #[test]
    fn test_recovery_id_out_of_range() {
        let key = TestKey::random();
        let mut signature = key.sign(b"msg");
        let last = signature.0.len() - 1;
        signature.0[last] = 27;

        assert_eq!(
            decode_signature(&signature).unwrap_err(),
            CodecError::InvalidRecoveryId(27)
        );
    }

    #[test]
    fn test_zero_signature_fails() {
        let mut bytes = SECP256K1_SIGNATURE_PREFIX.to_vec();
        bytes.push(65);
        bytes.extend_from_slice(&[0u8; 65]);

        assert!(recover_address(&keccak256(b"msg"), &EncodedSignature(bytes)).is_err());
    }
}
