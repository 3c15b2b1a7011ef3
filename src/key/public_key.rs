// Casper Codec Library: typed values, keys & call arguments
// Written in 2020 by
//     Dr. Maxim Orlovsky <orlovsky@pandoracore.com>
//
// To the extent possible under law, the author(s) have dedicated all
// copyright and related and neighboring rights to this software to
// the public domain worldwide. This software is distributed without
// any warranty.
//
// You should have received a copy of the MIT License
// along with this software.
// If not, see <https://opensource.org/licenses/MIT>.

//! Public keys of the supported signature algorithms. Only the key bytes are
//! handled here; signing and verification live outside of this library.

use std::fmt::{self, Display, Formatter};
use std::io;
use std::str::FromStr;

use amplify::hex::{FromHex, ToHex};
use num_derive::{FromPrimitive, ToPrimitive};
use num_traits::FromPrimitive;

use super::{blake2b256, AccountHash, AddressKind, Error};
use crate::strict_encoding::{self, StrictDecode, StrictEncode};

/// Signature algorithm of a public key
#[derive(
    Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Display, ToPrimitive, FromPrimitive,
)]
#[repr(u8)]
pub enum KeyAlgorithm {
    #[display("system")]
    System = 0,
    #[display("ed25519")]
    Ed25519 = 1,
    #[display("secp256k1")]
    Secp256k1 = 2,
}

impl_enum_strict_encoding!(KeyAlgorithm);

impl KeyAlgorithm {
    /// Length of the key bytes following the algorithm tag
    pub fn key_len(self) -> usize {
        match self {
            KeyAlgorithm::System => 0,
            KeyAlgorithm::Ed25519 => 32,
            KeyAlgorithm::Secp256k1 => 33,
        }
    }
}

/// Public key: algorithm tag followed by the key bytes. The textual form is
/// hex of the whole binary representation, including the tag.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub enum PublicKey {
    System,
    Ed25519([u8; 32]),
    /// Compressed SEC1 point
    Secp256k1([u8; 33]),
}

impl PublicKey {
    pub fn algorithm(&self) -> KeyAlgorithm {
        match self {
            PublicKey::System => KeyAlgorithm::System,
            PublicKey::Ed25519(_) => KeyAlgorithm::Ed25519,
            PublicKey::Secp256k1(_) => KeyAlgorithm::Secp256k1,
        }
    }

    /// Key bytes without the algorithm tag
    pub fn key_bytes(&self) -> &[u8] {
        match self {
            PublicKey::System => &[],
            PublicKey::Ed25519(key) => key,
            PublicKey::Secp256k1(key) => key,
        }
    }

    /// Constructs public key from the algorithm tag and the key bytes
    pub fn from_parts(algorithm: KeyAlgorithm, key: &[u8]) -> Result<PublicKey, Error> {
        if key.len() != algorithm.key_len() {
            return Err(Error::InvalidLength {
                kind: AddressKind::PublicKey,
                expected: algorithm.key_len(),
                found: key.len(),
            });
        }
        Ok(match algorithm {
            KeyAlgorithm::System => PublicKey::System,
            KeyAlgorithm::Ed25519 => {
                let mut inner = [0u8; 32];
                inner.copy_from_slice(key);
                PublicKey::Ed25519(inner)
            }
            KeyAlgorithm::Secp256k1 => {
                let mut inner = [0u8; 33];
                inner.copy_from_slice(key);
                PublicKey::Secp256k1(inner)
            }
        })
    }

    /// Hex of the algorithm tag followed by the key bytes
    pub fn to_hex(&self) -> String {
        let mut data = vec![self.algorithm() as u8];
        data.extend_from_slice(self.key_bytes());
        data.to_hex()
    }

    /// Account hash derived from the key: Blake2b-256 over the lower-case
    /// algorithm name, a zero byte and the key bytes
    pub fn to_account_hash(&self) -> AccountHash {
        let mut preimage = self.algorithm().to_string().into_bytes();
        preimage.push(0u8);
        preimage.extend_from_slice(self.key_bytes());
        AccountHash::new(blake2b256(preimage))
    }
}

impl Display for PublicKey {
    #[inline]
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for PublicKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let data = Vec::<u8>::from_hex(s)?;
        let (tag, key) = data.split_first().ok_or(Error::InvalidLength {
            kind: AddressKind::PublicKey,
            expected: 1,
            found: 0,
        })?;
        let algorithm = KeyAlgorithm::from_u8(*tag).ok_or_else(|| Error::InvalidFormat {
            kind: AddressKind::PublicKey,
            details: format!("unknown key algorithm tag {:#04x}", tag),
        })?;
        PublicKey::from_parts(algorithm, key)
    }
}

impl StrictEncode for PublicKey {
    fn strict_encode<E: io::Write>(&self, mut e: E) -> Result<usize, strict_encoding::Error> {
        let len = self.algorithm().strict_encode(&mut e)?;
        e.write_all(self.key_bytes())?;
        Ok(len + self.key_bytes().len())
    }
}

impl StrictDecode for PublicKey {
    fn strict_decode<D: io::Read>(mut d: D) -> Result<Self, strict_encoding::Error> {
        Ok(match KeyAlgorithm::strict_decode(&mut d)? {
            KeyAlgorithm::System => PublicKey::System,
            KeyAlgorithm::Ed25519 => PublicKey::Ed25519(StrictDecode::strict_decode(&mut d)?),
            KeyAlgorithm::Secp256k1 => PublicKey::Secp256k1(StrictDecode::strict_decode(&mut d)?),
        })
    }
}

impl_serde_str!(PublicKey);
impl_try_from_stringly!(PublicKey);
