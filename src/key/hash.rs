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

//! Base 32-byte hash and the family of prefixed hash identifiers built on it.

use std::cmp::Ordering;
use std::fmt::{self, Debug, Display, Formatter};
use std::hash::Hasher;
use std::io;
use std::marker::PhantomData;
use std::str::FromStr;

use amplify::hex::{FromHex, ToHex};
use blake2::digest::consts::U32;
use blake2::{Blake2b, Digest};

use super::{AddressKind, Error};
use crate::strict_encoding::{self, StrictDecode, StrictEncode};

type Blake2b256 = Blake2b<U32>;

/// Computes Blake2b hash with 32-byte output, used by the network for body
/// hashes and account hashes
pub fn blake2b256(data: impl AsRef<[u8]>) -> Hash {
    let mut engine = Blake2b256::new();
    engine.update(data.as_ref());
    Hash(engine.finalize().into())
}

/// Raw 32-byte hash, the base of all fixed-width identifiers
#[derive(Wrapper, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default, From)]
#[wrapper(Deref, BorrowSlice)]
pub struct Hash([u8; 32]);

impl Hash {
    /// Length of the hash in bytes
    pub const LEN: usize = 32;
    /// Length of the hash in hex characters
    pub const HEX_LEN: usize = Hash::LEN * 2;

    /// Parses exactly 64 hex characters, in any case
    #[inline]
    pub fn from_hex(s: &str) -> Result<Hash, Error> {
        Hash::parse_hex(s, AddressKind::Hash)
    }

    /// Constructs from exactly 32 bytes
    pub fn from_slice(slice: &[u8]) -> Result<Hash, Error> {
        if slice.len() != Hash::LEN {
            return Err(Error::InvalidLength {
                kind: AddressKind::Hash,
                expected: Hash::LEN,
                found: slice.len(),
            });
        }
        let mut inner = [0u8; 32];
        inner.copy_from_slice(slice);
        Ok(Hash(inner))
    }

    /// Lower-case hex representation
    #[inline]
    pub fn to_hex(&self) -> String {
        self.0.to_hex()
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    pub(crate) fn parse_hex(s: &str, kind: AddressKind) -> Result<Hash, Error> {
        if s.len() != Hash::HEX_LEN {
            return Err(Error::InvalidLength {
                kind,
                expected: Hash::HEX_LEN,
                found: s.len(),
            });
        }
        let bytes = Vec::<u8>::from_hex(s)?;
        let mut inner = [0u8; 32];
        inner.copy_from_slice(&bytes);
        Ok(Hash(inner))
    }
}

impl Debug for Hash {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Hash({})", self.to_hex())
    }
}

impl Display for Hash {
    #[inline]
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Hash {
    type Err = Error;

    #[inline]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Hash::from_hex(s)
    }
}

impl StrictEncode for Hash {
    #[inline]
    fn strict_encode<E: io::Write>(&self, e: E) -> Result<usize, strict_encoding::Error> {
        self.0.strict_encode(e)
    }
}

impl StrictDecode for Hash {
    #[inline]
    fn strict_decode<D: io::Read>(d: D) -> Result<Self, strict_encoding::Error> {
        <[u8; 32]>::strict_decode(d).map(Hash)
    }
}

impl_serde_str!(Hash);
impl_try_from_stringly!(Hash);
impl_into_string!(Hash);

/// Marker of a specific prefixed hash kind, defining its textual forms
pub trait HashKind {
    const KIND: AddressKind;

    /// Recognized literal prefixes; the first one is canonical
    const PREFIXES: &'static [&'static str];

    /// Short tag which may precede bare hex form (like `00` for accounts)
    const TAGGED: Option<&'static str> = None;
}

/// Textual form a prefixed hash was parsed from, reproduced on display
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum PrefixOrigin {
    /// Bare 64-character hex
    Bare,
    /// Hex preceded by a short tag, see [`HashKind::TAGGED`]
    Tagged,
    /// Canonical prefix
    Canonical,
    /// Legacy or alternate prefix with the given index in
    /// [`HashKind::PREFIXES`]
    Alternate(u8),
}

impl Default for PrefixOrigin {
    #[inline]
    fn default() -> Self {
        PrefixOrigin::Canonical
    }
}

/// 32-byte hash of a specific kind, remembering the prefix it was parsed
/// from. Equality, ordering and hashing are defined by the hash value only.
pub struct Prefixed<K: HashKind> {
    hash: Hash,
    origin: PrefixOrigin,
    kind: PhantomData<fn() -> K>,
}

impl<K: HashKind> Prefixed<K> {
    #[inline]
    pub fn new(hash: Hash) -> Self {
        Prefixed::with_origin(hash, PrefixOrigin::Canonical)
    }

    #[inline]
    pub fn with_origin(hash: Hash, origin: PrefixOrigin) -> Self {
        Prefixed {
            hash,
            origin,
            kind: PhantomData,
        }
    }

    #[inline]
    pub fn from_slice(slice: &[u8]) -> Result<Self, Error> {
        Hash::from_slice(slice).map(Prefixed::new)
    }

    #[inline]
    pub fn hash(&self) -> Hash {
        self.hash
    }

    #[inline]
    pub fn origin(&self) -> PrefixOrigin {
        self.origin
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8; 32] {
        self.hash.as_bytes()
    }

    /// Bare lower-case hex, regardless of the origin
    #[inline]
    pub fn to_hex(&self) -> String {
        self.hash.to_hex()
    }

    /// Canonically prefixed string, regardless of the origin
    pub fn to_prefixed_string(&self) -> String {
        format!("{}{}", K::PREFIXES[0], self.hash.to_hex())
    }

    /// Same hash with the canonical origin
    #[inline]
    pub fn to_canonical(&self) -> Self {
        Prefixed::new(self.hash)
    }
}

impl<K: HashKind> Clone for Prefixed<K> {
    #[inline]
    fn clone(&self) -> Self {
        *self
    }
}

impl<K: HashKind> Copy for Prefixed<K> {}

impl<K: HashKind> PartialEq for Prefixed<K> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.hash == other.hash
    }
}

impl<K: HashKind> Eq for Prefixed<K> {}

impl<K: HashKind> PartialOrd for Prefixed<K> {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<K: HashKind> Ord for Prefixed<K> {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        self.hash.cmp(&other.hash)
    }
}

impl<K: HashKind> std::hash::Hash for Prefixed<K> {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::hash::Hash::hash(&self.hash, state)
    }
}

impl<K: HashKind> From<Hash> for Prefixed<K> {
    #[inline]
    fn from(hash: Hash) -> Self {
        Prefixed::new(hash)
    }
}

impl<K: HashKind> From<[u8; 32]> for Prefixed<K> {
    #[inline]
    fn from(inner: [u8; 32]) -> Self {
        Prefixed::new(Hash::from(inner))
    }
}

impl<K: HashKind> Debug for Prefixed<K> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", K::KIND, self.to_prefixed_string())
    }
}

impl<K: HashKind> Display for Prefixed<K> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self.origin {
            PrefixOrigin::Bare => f.write_str(&self.to_hex()),
            PrefixOrigin::Tagged => {
                write!(f, "{}{}", K::TAGGED.unwrap_or_default(), self.to_hex())
            }
            PrefixOrigin::Canonical => f.write_str(&self.to_prefixed_string()),
            PrefixOrigin::Alternate(no) => {
                let prefix = K::PREFIXES.get(no as usize).unwrap_or(&K::PREFIXES[0]);
                write!(f, "{}{}", prefix, self.to_hex())
            }
        }
    }
}

impl<K: HashKind> FromStr for Prefixed<K> {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let longest = K::PREFIXES
            .iter()
            .enumerate()
            .filter(|(_, prefix)| s.starts_with(*prefix))
            .max_by_key(|(_, prefix)| prefix.len());
        if let Some((no, prefix)) = longest {
            let hash = Hash::parse_hex(&s[prefix.len()..], K::KIND)?;
            let origin = match no {
                0 => PrefixOrigin::Canonical,
                no => PrefixOrigin::Alternate(no as u8),
            };
            return Ok(Prefixed::with_origin(hash, origin));
        }
        match K::TAGGED {
            Some(tag) if s.len() == tag.len() + Hash::HEX_LEN && s.starts_with(tag) => {
                let hash = Hash::parse_hex(&s[tag.len()..], K::KIND)?;
                Ok(Prefixed::with_origin(hash, PrefixOrigin::Tagged))
            }
            _ if s.len() == Hash::HEX_LEN => {
                let hash = Hash::parse_hex(s, K::KIND)?;
                Ok(Prefixed::with_origin(hash, PrefixOrigin::Bare))
            }
            _ => Err(Error::NotFoundPrefix(s.to_owned())),
        }
    }
}

impl<K: HashKind> StrictEncode for Prefixed<K> {
    #[inline]
    fn strict_encode<E: io::Write>(&self, e: E) -> Result<usize, strict_encoding::Error> {
        self.hash.strict_encode(e)
    }
}

impl<K: HashKind> StrictDecode for Prefixed<K> {
    #[inline]
    fn strict_decode<D: io::Read>(d: D) -> Result<Self, strict_encoding::Error> {
        Hash::strict_decode(d).map(Prefixed::new)
    }
}

#[cfg(feature = "serde")]
mod _serde {
    use serde_crate::de::Error as _;
    use serde_crate::{Deserialize, Deserializer, Serialize, Serializer};

    use super::*;
    use crate::common::serde::CowHelper;

    impl<K: HashKind> Serialize for Prefixed<K> {
        fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            serializer.serialize_str(&self.to_string())
        }
    }

    impl<'de, K: HashKind> Deserialize<'de> for Prefixed<K> {
        fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
        where
            D: Deserializer<'de>,
        {
            let s = CowHelper::deserialize(deserializer)?;
            Prefixed::from_str(&s).map_err(D::Error::custom)
        }
    }
}

/// Kind marker for [`AccountHash`]
pub enum AccountKind {}

impl HashKind for AccountKind {
    const KIND: AddressKind = AddressKind::AccountHash;
    const PREFIXES: &'static [&'static str] = &["account-hash-"];
    const TAGGED: Option<&'static str> = Some("00");
}

/// Kind marker for [`TransferHash`]
pub enum TransferKind {}

impl HashKind for TransferKind {
    const KIND: AddressKind = AddressKind::TransferHash;
    const PREFIXES: &'static [&'static str] = &["transfer-"];
}

/// Kind marker for [`ContractHash`]
pub enum ContractKind {}

impl HashKind for ContractKind {
    const KIND: AddressKind = AddressKind::ContractHash;
    const PREFIXES: &'static [&'static str] = &["contract-", "hash-", "contract-wasm-"];
}

/// Kind marker for [`ContractPackageHash`]
pub enum ContractPackageKind {}

impl HashKind for ContractPackageKind {
    const KIND: AddressKind = AddressKind::ContractPackageHash;
    const PREFIXES: &'static [&'static str] =
        &["contract-package-", "package-", "contract-package-wasm-"];
}

/// Hash of an account main public key
pub type AccountHash = Prefixed<AccountKind>;

/// Hash of a transfer
pub type TransferHash = Prefixed<TransferKind>;

/// Hash of a stored contract
pub type ContractHash = Prefixed<ContractKind>;

/// Hash of a contract package
pub type ContractPackageHash = Prefixed<ContractPackageKind>;

#[cfg(test)]
mod test {
    use super::*;
    use crate::test_helpers::{hex, test_suite};

    const ACCOUNT: &str = "ee83ab5d92e183e2e92c1290a5979e2b7f7fac146c215de8042e2945bbad9760";

    #[test]
    fn test_hash_length() {
        assert!(Hash::from_hex(ACCOUNT).is_ok());
        assert_eq!(
            Hash::from_hex(&ACCOUNT[..62]),
            Err(Error::InvalidLength {
                kind: AddressKind::Hash,
                expected: 64,
                found: 62
            })
        );
        assert_eq!(
            Hash::from_hex(&format!("{}00", ACCOUNT)),
            Err(Error::InvalidLength {
                kind: AddressKind::Hash,
                expected: 64,
                found: 66
            })
        );
        assert!(matches!(
            Hash::from_hex(&ACCOUNT.replace('e', "g")),
            Err(Error::InvalidHex(_))
        ));
        assert!(Hash::from_slice(&[0u8; 31]).is_err());
        assert_eq!(Hash::from_slice(&[7u8; 32]).unwrap(), Hash::from([7u8; 32]));
    }

    #[test]
    fn test_hash_hex_case() {
        let upper = ACCOUNT.to_uppercase();
        let hash = Hash::from_hex(&upper).unwrap();
        assert_eq!(hash.to_hex(), ACCOUNT);
        assert_eq!(hash.to_string(), ACCOUNT);
        assert_eq!(Hash::from_str(ACCOUNT).unwrap(), hash);
    }

    #[test]
    fn test_hash_binary() {
        let hash = Hash::from_hex(ACCOUNT).unwrap();
        test_suite(&hash, &hex(ACCOUNT), 32);
    }

    #[test]
    fn test_blake2b256() {
        assert_eq!(
            blake2b256(b"").to_hex(),
            "0e5751c026e543b2e8ab2eb06099daa1d1e5df47778f7787faab45cdf12fe3a8"
        );
    }

    #[test]
    fn test_account_hash_forms() {
        let bare = AccountHash::from_str(ACCOUNT).unwrap();
        let prefixed = AccountHash::from_str(&format!("account-hash-{}", ACCOUNT)).unwrap();
        let tagged = AccountHash::from_str(&format!("00{}", ACCOUNT)).unwrap();

        assert_eq!(bare, prefixed);
        assert_eq!(prefixed, tagged);
        assert_eq!(bare.hash(), Hash::from_hex(ACCOUNT).unwrap());

        assert_eq!(bare.origin(), PrefixOrigin::Bare);
        assert_eq!(prefixed.origin(), PrefixOrigin::Canonical);
        assert_eq!(tagged.origin(), PrefixOrigin::Tagged);

        assert_eq!(bare.to_string(), ACCOUNT);
        assert_eq!(prefixed.to_string(), format!("account-hash-{}", ACCOUNT));
        assert_eq!(tagged.to_string(), format!("00{}", ACCOUNT));

        for form in [bare, prefixed, tagged] {
            assert_eq!(form.to_hex(), ACCOUNT);
            assert_eq!(form.to_prefixed_string(), format!("account-hash-{}", ACCOUNT));
        }
    }

    #[test]
    fn test_contract_hash_prefixes() {
        let canonical = ContractHash::from_str(&format!("contract-{}", ACCOUNT)).unwrap();
        let legacy = ContractHash::from_str(&format!("hash-{}", ACCOUNT)).unwrap();
        let wasm = ContractHash::from_str(&format!("contract-wasm-{}", ACCOUNT)).unwrap();

        assert_eq!(canonical, legacy);
        assert_eq!(legacy, wasm);
        assert_eq!(legacy.origin(), PrefixOrigin::Alternate(1));
        assert_eq!(wasm.origin(), PrefixOrigin::Alternate(2));
        assert_eq!(legacy.to_string(), format!("hash-{}", ACCOUNT));
        assert_eq!(wasm.to_string(), format!("contract-wasm-{}", ACCOUNT));
        assert_eq!(wasm.to_prefixed_string(), format!("contract-{}", ACCOUNT));
        assert_eq!(wasm.to_canonical().to_string(), format!("contract-{}", ACCOUNT));

        let package =
            ContractPackageHash::from_str(&format!("contract-package-wasm-{}", ACCOUNT)).unwrap();
        assert_eq!(package.origin(), PrefixOrigin::Alternate(2));
        assert_eq!(package.to_prefixed_string(), format!("contract-package-{}", ACCOUNT));
    }

    #[test]
    fn test_prefixed_failures() {
        assert_eq!(
            TransferHash::from_str("deploy-00"),
            Err(Error::NotFoundPrefix(s!("deploy-00")))
        );
        assert_eq!(
            TransferHash::from_str("transfer-00"),
            Err(Error::InvalidLength {
                kind: AddressKind::TransferHash,
                expected: 64,
                found: 2
            })
        );
        // `00` tag is recognized for accounts only
        assert!(TransferHash::from_str(&format!("00{}", ACCOUNT)).is_err());
    }

    #[test]
    fn test_prefixed_binary() {
        let hash = TransferHash::from_str(&format!("transfer-{}", ACCOUNT)).unwrap();
        let decoded = test_suite(&hash, &hex(ACCOUNT), 32);
        assert_eq!(decoded.origin(), PrefixOrigin::Canonical);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_prefixed_serde_keeps_origin() {
        let tagged = format!("\"00{}\"", ACCOUNT);
        let hash: AccountHash = serde_json::from_str(&tagged).unwrap();
        assert_eq!(serde_json::to_string(&hash).unwrap(), tagged);

        let hash: Hash = serde_json::from_str(&format!("\"{}\"", ACCOUNT)).unwrap();
        assert_eq!(hash.to_hex(), ACCOUNT);
    }
}
