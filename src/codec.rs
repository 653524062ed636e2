//! Alephium address and byte-string codec.
//!
//! Addresses are base58 strings of `[kind byte] ++ body`. Contract (P2C)
//! bodies are 32-byte contract ids, and a token id is the contract id of the
//! token's contract, so converting a token id to an address is a base58
//! encoding with the P2C prefix.

use crate::error::{IndexerError, Result};

/// Number of shard groups on mainnet.
pub const TOTAL_NUMBER_OF_GROUPS: u8 = 4;

/// Length of contract ids, token ids and public key hashes.
pub const ID_LENGTH: usize = 32;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressKind {
    P2PKH,
    P2MPKH,
    P2SH,
    P2C,
}

impl AddressKind {
    fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            0x00 => Some(AddressKind::P2PKH),
            0x01 => Some(AddressKind::P2MPKH),
            0x02 => Some(AddressKind::P2SH),
            0x03 => Some(AddressKind::P2C),
            _ => None,
        }
    }

    pub fn prefix(self) -> u8 {
        match self {
            AddressKind::P2PKH => 0x00,
            AddressKind::P2MPKH => 0x01,
            AddressKind::P2SH => 0x02,
            AddressKind::P2C => 0x03,
        }
    }
}

/// Decodes a hex-packed byte string (as returned for `ByteVec` values) into UTF-8 text.
pub fn decode_hex(hex_string: &str) -> Result<String> {
    let bytes = hex::decode(hex_string)?;
    String::from_utf8(bytes).map_err(|e| IndexerError::decode(format!("invalid utf-8 in {}: {}", hex_string, e)))
}

fn decode_address(address: &str) -> Result<(AddressKind, Vec<u8>)> {
    let decoded = bs58::decode(address)
        .into_vec()
        .map_err(|e| IndexerError::address(format!("{}: {}", address, e)))?;
    let (&kind_byte, body) = decoded
        .split_first()
        .ok_or_else(|| IndexerError::address("address string is empty"))?;
    let kind = AddressKind::from_byte(kind_byte)
        .ok_or_else(|| IndexerError::address(format!("{}: unknown address type {}", address, kind_byte)))?;

    let well_formed = match kind {
        AddressKind::P2MPKH => body.len() > ID_LENGTH,
        _ => body.len() == ID_LENGTH,
    };
    if !well_formed {
        return Err(IndexerError::address(format!(
            "{}: unexpected body length {} for {:?}",
            address,
            body.len(),
            kind
        )));
    }
    Ok((kind, body.to_vec()))
}

fn djb2(bytes: &[u8]) -> u32 {
    bytes.iter().fold(5381u32, |hash, &b| {
        hash.wrapping_shl(5).wrapping_add(hash).wrapping_add(b as u32)
    })
}

fn xor_byte(value: u32) -> u8 {
    let [b0, b1, b2, b3] = value.to_be_bytes();
    b0 ^ b1 ^ b2 ^ b3
}

fn group_of_lockup_hash(hash: &[u8]) -> u8 {
    let hint = djb2(hash) | 1;
    xor_byte(hint) % TOTAL_NUMBER_OF_GROUPS
}

/// Shard group an address belongs to. Contract calls must be routed to this group.
pub fn group_of_address(address: &str) -> Result<u8> {
    let (kind, body) = decode_address(address)?;
    let group = match kind {
        AddressKind::P2PKH | AddressKind::P2SH => group_of_lockup_hash(&body),
        // Body is compact-int key count followed by the key hashes; the first key decides.
        AddressKind::P2MPKH => group_of_lockup_hash(&body[1..=ID_LENGTH]),
        AddressKind::P2C => body[ID_LENGTH - 1] % TOTAL_NUMBER_OF_GROUPS,
    };
    Ok(group)
}

/// Extracts the 32-byte contract id from a contract address.
pub fn contract_id_from_address(address: &str) -> Result<[u8; ID_LENGTH]> {
    let (kind, body) = decode_address(address)?;
    if kind != AddressKind::P2C {
        return Err(IndexerError::address(format!("{} is not a contract address", address)));
    }
    let mut id = [0u8; ID_LENGTH];
    id.copy_from_slice(&body);
    Ok(id)
}

pub fn address_from_contract_id(contract_id: &[u8]) -> Result<String> {
    if contract_id.len() != ID_LENGTH {
        return Err(IndexerError::decode(format!(
            "contract id must be {} bytes, got {}",
            ID_LENGTH,
            contract_id.len()
        )));
    }
    let mut bytes = Vec::with_capacity(ID_LENGTH + 1);
    bytes.push(AddressKind::P2C.prefix());
    bytes.extend_from_slice(contract_id);
    Ok(bs58::encode(bytes).into_string())
}

/// Converts a hex token id, as returned by pool contract calls, into the token's contract address.
pub fn address_from_token_id(token_id_hex: &str) -> Result<String> {
    let token_id = hex::decode(token_id_hex)?;
    address_from_contract_id(&token_id)
}
