//! Core types for the plasma ante verifier

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Length of an address in bytes
pub const ADDRESS_LENGTH: usize = 20;

/// Length of a position's canonical encoding
pub const POSITION_SIGN_BYTES_LENGTH: usize = 8 + 2 + 1 + 8;

/// Account address: the right-most 20 bytes of `keccak256(pubkey)`.
///
/// The all-zero address is reserved and denotes an absent slot.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Address(pub [u8; ADDRESS_LENGTH]);

impl Address {
    /// Reserved address marking an unused input or confirmation slot
    pub const ZERO: Address = Address([0u8; ADDRESS_LENGTH]);

    pub fn from_bytes(bytes: [u8; ADDRESS_LENGTH]) -> Self {
        Address(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; ADDRESS_LENGTH] {
        &self.0
    }

    /// Whether this address names a real key holder (anything but `ZERO`)
    pub fn is_valid(&self) -> bool {
        *self != Self::ZERO
    }
}

impl AsRef<[u8]> for Address {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

/// Error returned when parsing an address from text
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AddressParseError {
    #[error("Invalid hex: {0}")]
    InvalidHex(#[from] hex::FromHexError),
    #[error("Address must be 20 bytes, got {0}")]
    WrongLength(usize),
}

impl FromStr for Address {
    type Err = AddressParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.strip_prefix("0x").unwrap_or(s);
        let bytes = hex::decode(digits)?;
        let bytes: [u8; ADDRESS_LENGTH] = bytes
            .as_slice()
            .try_into()
            .map_err(|_| AddressParseError::WrongLength(bytes.len()))?;
        Ok(Address(bytes))
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}

/// Location of a UTXO in the chain
#[derive(
    Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Position {
    /// Block the creating transaction was included in
    pub blknum: u64,
    /// Index of the transaction within its block
    pub txindex: u16,
    /// Output index within the transaction
    pub oindex: u8,
    /// Deposit nonce, non-zero only for deposit outputs
    pub depositnum: u64,
}

impl Position {
    pub fn new(blknum: u64, txindex: u16, oindex: u8, depositnum: u64) -> Self {
        Self {
            blknum,
            txindex,
            oindex,
            depositnum,
        }
    }

    /// Canonical encoding that confirmation signatures sign over
    pub fn sign_bytes(&self) -> [u8; POSITION_SIGN_BYTES_LENGTH] {
        let mut bytes = [0u8; POSITION_SIGN_BYTES_LENGTH];
        bytes[0..8].copy_from_slice(&self.blknum.to_be_bytes());
        bytes[8..10].copy_from_slice(&self.txindex.to_be_bytes());
        bytes[10] = self.oindex;
        bytes[11..19].copy_from_slice(&self.depositnum.to_be_bytes());
        bytes
    }

    /// Decode a position from its canonical encoding
    pub fn from_sign_bytes(bytes: &[u8]) -> Option<Self> {
        let bytes: &[u8; POSITION_SIGN_BYTES_LENGTH] = bytes.try_into().ok()?;
        let blknum = u64::from_be_bytes(bytes[0..8].try_into().ok()?);
        let txindex = u16::from_be_bytes(bytes[8..10].try_into().ok()?);
        let depositnum = u64::from_be_bytes(bytes[11..19].try_into().ok()?);
        Some(Self::new(blknum, txindex, bytes[10], depositnum))
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}, {}, {}, {})",
            self.blknum, self.txindex, self.oindex, self.depositnum
        )
    }
}

/// Unspent output as recorded by the ledger
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Utxo {
    pub position: Position,
    /// Current holder, the only key allowed to spend it
    pub owner: Address,
    /// Owners of the inputs of the transaction that created this output.
    /// The second entry is `Address::ZERO` when that transaction had one input.
    pub input_addresses: [Address; 2],
    pub amount: u64,
}

impl Utxo {
    pub fn new(
        position: Position,
        owner: Address,
        input_addresses: [Address; 2],
        amount: u64,
    ) -> Self {
        Self {
            position,
            owner,
            input_addresses,
            amount,
        }
    }
}

/// Type prefix of an amino encoded secp256k1 signature
pub const SECP256K1_SIGNATURE_PREFIX: [u8; 4] = [0x16, 0xE1, 0xFE, 0xEA];

/// Length of a raw recoverable signature (`r || s || v`)
pub const RAW_SIGNATURE_LENGTH: usize = 65;

/// Length of the header in front of the raw signature (prefix + length byte)
pub const SIGNATURE_HEADER_LENGTH: usize = 5;

/// A recoverable signature as carried on the wire: 4 type-prefix bytes,
/// one length byte, then the 65 raw bytes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EncodedSignature(#[serde(with = "hex::serde")] pub Vec<u8>);

impl EncodedSignature {
    /// Placeholder for an omitted signature
    pub fn empty() -> Self {
        EncodedSignature(Vec::new())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl From<Vec<u8>> for EncodedSignature {
    fn from(bytes: Vec<u8>) -> Self {
        EncodedSignature(bytes)
    }
}

/// Confirmation signatures for one input, one per input address of its UTXO
pub type ConfirmSigs = [EncodedSignature; 2];

/// One input of a spend
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpendInput {
    pub position: Position,
    /// Declared owner; `Address::ZERO` marks the slot as unused
    pub owner: Address,
    pub confirm_sigs: ConfirmSigs,
}

impl SpendInput {
    pub fn new(position: Position, owner: Address, confirm_sigs: ConfirmSigs) -> Self {
        Self {
            position,
            owner,
            confirm_sigs,
        }
    }

    pub fn is_present(&self) -> bool {
        self.owner.is_valid()
    }
}

/// One output of a spend
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpendOutput {
    pub owner: Address,
    pub amount: u64,
}

/// Spend of one or two UTXOs into up to two new outputs
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpendMsg {
    pub inputs: [SpendInput; 2],
    pub outputs: [SpendOutput; 2],
    pub fee: u64,
}

impl SpendMsg {
    /// Spend of a single input; the second input slot is left unused
    pub fn single(input: SpendInput, outputs: [SpendOutput; 2], fee: u64) -> Self {
        Self {
            inputs: [input, SpendInput::default()],
            outputs,
            fee,
        }
    }

    /// The second input, if its slot is in use
    pub fn second_input(&self) -> Option<&SpendInput> {
        Some(&self.inputs[1]).filter(|input| input.is_present())
    }

    /// Bytes covered by the ownership signatures.
    ///
    /// Confirmation signatures are excluded: they are produced by other
    /// parties and over a different message.
    pub fn sign_bytes(&self) -> Vec<u8> {
        let mut message = Vec::with_capacity(
            2 * (POSITION_SIGN_BYTES_LENGTH + ADDRESS_LENGTH) + 2 * (ADDRESS_LENGTH + 8) + 8,
        );
        for input in &self.inputs {
            message.extend_from_slice(&input.position.sign_bytes());
            message.extend_from_slice(input.owner.as_bytes());
        }
        for output in &self.outputs {
            message.extend_from_slice(output.owner.as_bytes());
            message.extend_from_slice(&output.amount.to_be_bytes());
        }
        message.extend_from_slice(&self.fee.to_be_bytes());
        message
    }

    /// Addresses that must sign, in input order
    pub fn signers(&self) -> Vec<Address> {
        let mut signers = vec![self.inputs[0].owner];
        if let Some(second) = self.second_input() {
            signers.push(second.owner);
        }
        signers
    }
}

/// A message handled by some other part of the application
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpaqueMsg {
    /// Name of the handler the message is routed to
    pub route: String,
    pub signers: Vec<Address>,
    #[serde(with = "hex::serde")]
    pub payload: Vec<u8>,
}

/// Decoded message payload of a transaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Msg {
    Spend(SpendMsg),
    Opaque(OpaqueMsg),
}

/// Transaction carrying a message and one signature per declared signer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseTx {
    pub msg: Msg,
    pub signatures: Vec<EncodedSignature>,
}

/// Transaction of a shape the ante handler does not authorize
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawTx {
    pub signatures: Vec<EncodedSignature>,
    #[serde(with = "hex::serde")]
    pub payload: Vec<u8>,
}

/// Decoded transaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tx {
    Base(BaseTx),
    Raw(RawTx),
}

impl Tx {
    pub fn signatures(&self) -> &[EncodedSignature] {
        match self {
            Tx::Base(tx) => &tx.signatures,
            Tx::Raw(tx) => &tx.signatures,
        }
    }

    pub fn as_base(&self) -> Option<&BaseTx> {
        match self {
            Tx::Base(tx) => Some(tx),
            Tx::Raw(_) => None,
        }
    }
}
