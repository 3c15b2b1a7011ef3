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

//! Global-state keys and the family of addresses they are built from.
//!
//! Every address kind has three mutually consistent forms:
//! - raw fixed-width (or tag-discriminated) bytes, produced by
//!   [`StrictEncode`];
//! - [`Key`] binary form: a single tag byte followed by the address bytes;
//! - human-readable prefixed string, used by RPC and JSON.

mod bid_addr;
mod entity;
mod era;
mod hash;
mod public_key;
mod uref;

pub use bid_addr::{BalanceHoldAddr, BidAddr, BidAddrTag, HoldKind};
pub use entity::{
    BlockGlobalAddr, ByteCodeAddr, ByteCodeKind, EntityAddr, EntityKind, EntryPointAddr,
    EntryPointVersion, MessageAddr, NamedKeyAddr,
};
pub use era::Era;
pub use hash::{
    blake2b256, AccountHash, AccountKind, ContractHash, ContractKind, ContractPackageHash,
    ContractPackageKind, Hash, HashKind, PrefixOrigin, Prefixed, TransferHash, TransferKind,
};
pub use public_key::{KeyAlgorithm, PublicKey};
pub use uref::{AccessRights, URef};

use std::cmp::Reverse;
use std::fmt::{self, Display, Formatter};
use std::io;
use std::str::FromStr;

use amplify::hex::{FromHex, ToHex};
use num_derive::{FromPrimitive, ToPrimitive};

use crate::strict_encoding::{self, StrictDecode, StrictEncode};

/// Kinds of addresses, used for error reporting
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Display)]
#[display(Debug)]
pub enum AddressKind {
    Hash,
    AccountHash,
    TransferHash,
    ContractHash,
    ContractPackageHash,
    URef,
    Era,
    PublicKey,
    EntityAddr,
    ByteCodeAddr,
    NamedKeyAddr,
    MessageAddr,
    EntryPointAddr,
    BidAddr,
    BalanceHoldAddr,
    Key,
}

/// Errors parsing textual or raw forms of keys and addresses
#[derive(Clone, PartialEq, Eq, Hash, Debug, Display, Error)]
#[display(doc_comments)]
pub enum Error {
    /// `{0}` does not start with any known address prefix
    NotFoundPrefix(String),

    /// invalid {kind} format: {details}
    InvalidFormat { kind: AddressKind, details: String },

    /// invalid hex encoding: {0}
    InvalidHex(String),

    /// invalid {kind} length: expected {expected}, found {found}
    InvalidLength {
        kind: AddressKind,
        expected: usize,
        found: usize,
    },
}

impl From<amplify::hex::Error> for Error {
    #[inline]
    fn from(err: amplify::hex::Error) -> Self {
        Error::InvalidHex(err.to_string())
    }
}

/// Binary tags of [`Key`] variants
#[derive(
    Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Display, ToPrimitive, FromPrimitive,
)]
#[display(Debug)]
#[repr(u8)]
pub enum KeyTag {
    Account = 0,
    Hash = 1,
    URef = 2,
    Transfer = 3,
    DeployInfo = 4,
    EraInfo = 5,
    Balance = 6,
    Bid = 7,
    Withdraw = 8,
    Dictionary = 9,
    SystemEntityRegistry = 10,
    EraSummary = 11,
    Unbond = 12,
    ChainspecRegistry = 13,
    ChecksumRegistry = 14,
    BidAddr = 15,
    Package = 16,
    AddressableEntity = 17,
    ByteCode = 18,
    Message = 19,
    NamedKey = 20,
    BlockGlobal = 21,
    BalanceHold = 22,
    EntryPoint = 23,
}

impl_enum_strict_encoding!(KeyTag);

impl KeyTag {
    pub const ALL: [KeyTag; 24] = [
        KeyTag::Account,
        KeyTag::Hash,
        KeyTag::URef,
        KeyTag::Transfer,
        KeyTag::DeployInfo,
        KeyTag::EraInfo,
        KeyTag::Balance,
        KeyTag::Bid,
        KeyTag::Withdraw,
        KeyTag::Dictionary,
        KeyTag::SystemEntityRegistry,
        KeyTag::EraSummary,
        KeyTag::Unbond,
        KeyTag::ChainspecRegistry,
        KeyTag::ChecksumRegistry,
        KeyTag::BidAddr,
        KeyTag::Package,
        KeyTag::AddressableEntity,
        KeyTag::ByteCode,
        KeyTag::Message,
        KeyTag::NamedKey,
        KeyTag::BlockGlobal,
        KeyTag::BalanceHold,
        KeyTag::EntryPoint,
    ];

    /// Canonical prefix of the key string
    pub fn prefix(self) -> &'static str {
        match self {
            KeyTag::Account => "account-hash-",
            KeyTag::Hash => "hash-",
            KeyTag::URef => URef::PREFIX,
            KeyTag::Transfer => "transfer-",
            KeyTag::DeployInfo => "deploy-",
            KeyTag::EraInfo => Era::PREFIX,
            KeyTag::Balance => "balance-",
            KeyTag::Bid => "bid-",
            KeyTag::Withdraw => "withdraw-",
            KeyTag::Dictionary => "dictionary-",
            KeyTag::SystemEntityRegistry => "system-entity-registry-",
            KeyTag::EraSummary => "era-summary-",
            KeyTag::Unbond => "unbond-",
            KeyTag::ChainspecRegistry => "chainspec-registry-",
            KeyTag::ChecksumRegistry => "checksum-registry-",
            KeyTag::BidAddr => BidAddr::PREFIX,
            KeyTag::Package => "package-",
            KeyTag::AddressableEntity => EntityAddr::PREFIX,
            KeyTag::ByteCode => ByteCodeAddr::PREFIX,
            KeyTag::Message => MessageAddr::PREFIX,
            KeyTag::NamedKey => NamedKeyAddr::PREFIX,
            KeyTag::BlockGlobal => BlockGlobalAddr::BlockTime.prefix(),
            KeyTag::BalanceHold => BalanceHoldAddr::PREFIX,
            KeyTag::EntryPoint => EntryPointAddr::PREFIX,
        }
    }

    /// Resolves variant name used by the legacy `Key::<Variant>(...)` form
    fn from_variant_name(name: &str) -> Option<KeyTag> {
        match name {
            "Era" => Some(KeyTag::EraInfo),
            "SystemContractRegistry" => Some(KeyTag::SystemEntityRegistry),
            name => KeyTag::ALL.iter().copied().find(|tag| tag.to_string() == name),
        }
    }
}

lazy_static! {
    /// All recognized key prefixes, longest first
    static ref KEY_PREFIXES: Vec<(&'static str, KeyTag)> = {
        let mut prefixes = KeyTag::ALL
            .iter()
            .map(|tag| (tag.prefix(), *tag))
            .collect::<Vec<_>>();
        prefixes.push(("system-contract-registry-", KeyTag::SystemEntityRegistry));
        prefixes.push((BlockGlobalAddr::MessageCount.prefix(), KeyTag::BlockGlobal));
        prefixes.sort_by_key(|(prefix, _)| Reverse(prefix.len()));
        prefixes
    };
}

/// Key under which a value is stored in the global state
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub enum Key {
    Account(AccountHash),
    Hash(Hash),
    URef(URef),
    Transfer(TransferHash),
    DeployInfo(Hash),
    EraInfo(Era),
    Balance(Hash),
    Bid(AccountHash),
    Withdraw(AccountHash),
    Dictionary(Hash),
    SystemEntityRegistry,
    EraSummary,
    Unbond(AccountHash),
    ChainspecRegistry,
    ChecksumRegistry,
    BidAddr(BidAddr),
    Package(Hash),
    AddressableEntity(EntityAddr),
    ByteCode(ByteCodeAddr),
    Message(MessageAddr),
    NamedKey(NamedKeyAddr),
    BlockGlobal(BlockGlobalAddr),
    BalanceHold(BalanceHoldAddr),
    EntryPoint(EntryPointAddr),
}

/// Block-global keys pad the address byte up to the 32-byte key payload
const BLOCK_GLOBAL_PADDING: [u8; 31] = [0u8; 31];

impl Key {
    pub fn tag(&self) -> KeyTag {
        match self {
            Key::Account(_) => KeyTag::Account,
            Key::Hash(_) => KeyTag::Hash,
            Key::URef(_) => KeyTag::URef,
            Key::Transfer(_) => KeyTag::Transfer,
            Key::DeployInfo(_) => KeyTag::DeployInfo,
            Key::EraInfo(_) => KeyTag::EraInfo,
            Key::Balance(_) => KeyTag::Balance,
            Key::Bid(_) => KeyTag::Bid,
            Key::Withdraw(_) => KeyTag::Withdraw,
            Key::Dictionary(_) => KeyTag::Dictionary,
            Key::SystemEntityRegistry => KeyTag::SystemEntityRegistry,
            Key::EraSummary => KeyTag::EraSummary,
            Key::Unbond(_) => KeyTag::Unbond,
            Key::ChainspecRegistry => KeyTag::ChainspecRegistry,
            Key::ChecksumRegistry => KeyTag::ChecksumRegistry,
            Key::BidAddr(_) => KeyTag::BidAddr,
            Key::Package(_) => KeyTag::Package,
            Key::AddressableEntity(_) => KeyTag::AddressableEntity,
            Key::ByteCode(_) => KeyTag::ByteCode,
            Key::Message(_) => KeyTag::Message,
            Key::NamedKey(_) => KeyTag::NamedKey,
            Key::BlockGlobal(_) => KeyTag::BlockGlobal,
            Key::BalanceHold(_) => KeyTag::BalanceHold,
            Key::EntryPoint(_) => KeyTag::EntryPoint,
        }
    }

    /// Canonical prefixed string, same as `Display`
    #[inline]
    pub fn to_formatted_string(&self) -> String {
        self.to_string()
    }

    pub fn as_uref(&self) -> Option<&URef> {
        match self {
            Key::URef(uref) => Some(uref),
            _ => None,
        }
    }

    pub fn as_account(&self) -> Option<&AccountHash> {
        match self {
            Key::Account(account) => Some(account),
            _ => None,
        }
    }

    /// Parses a string starting with one of the registered prefixes,
    /// choosing the longest matching one
    fn from_prefixed_str(s: &str) -> Result<Key, Error> {
        let (prefix, tag) = KEY_PREFIXES
            .iter()
            .find(|(prefix, _)| s.starts_with(prefix))
            .ok_or_else(|| Error::NotFoundPrefix(s.to_owned()))?;
        let hash = || Hash::parse_hex(&s[prefix.len()..], AddressKind::Key);
        Ok(match tag {
            KeyTag::Account => Key::Account(AccountHash::from_str(s)?),
            KeyTag::Hash => Key::Hash(hash()?),
            KeyTag::URef => Key::URef(URef::from_str(s)?),
            KeyTag::Transfer => Key::Transfer(TransferHash::from_str(s)?),
            KeyTag::DeployInfo => Key::DeployInfo(hash()?),
            KeyTag::EraInfo => Key::EraInfo(Era::from_str(s)?),
            KeyTag::Balance => Key::Balance(hash()?),
            KeyTag::Bid => Key::Bid(AccountHash::new(hash()?)),
            KeyTag::Withdraw => Key::Withdraw(AccountHash::new(hash()?)),
            KeyTag::Dictionary => Key::Dictionary(hash()?),
            KeyTag::SystemEntityRegistry => {
                hash()?;
                Key::SystemEntityRegistry
            }
            KeyTag::EraSummary => {
                hash()?;
                Key::EraSummary
            }
            KeyTag::Unbond => Key::Unbond(AccountHash::new(hash()?)),
            KeyTag::ChainspecRegistry => {
                hash()?;
                Key::ChainspecRegistry
            }
            KeyTag::ChecksumRegistry => {
                hash()?;
                Key::ChecksumRegistry
            }
            KeyTag::BidAddr => Key::BidAddr(BidAddr::from_str(s)?),
            KeyTag::Package => Key::Package(hash()?),
            KeyTag::AddressableEntity => Key::AddressableEntity(EntityAddr::from_str(s)?),
            KeyTag::ByteCode => Key::ByteCode(ByteCodeAddr::from_str(s)?),
            KeyTag::Message => Key::Message(MessageAddr::from_str(s)?),
            KeyTag::NamedKey => Key::NamedKey(NamedKeyAddr::from_str(s)?),
            KeyTag::BlockGlobal => {
                let padding = Vec::<u8>::from_hex(&s[prefix.len()..])?;
                if padding.len() != BLOCK_GLOBAL_PADDING.len() {
                    return Err(Error::InvalidLength {
                        kind: AddressKind::Key,
                        expected: BLOCK_GLOBAL_PADDING.len(),
                        found: padding.len(),
                    });
                }
                let addr = if *prefix == BlockGlobalAddr::MessageCount.prefix() {
                    BlockGlobalAddr::MessageCount
                } else {
                    BlockGlobalAddr::BlockTime
                };
                Key::BlockGlobal(addr)
            }
            KeyTag::BalanceHold => Key::BalanceHold(BalanceHoldAddr::from_str(s)?),
            KeyTag::EntryPoint => Key::EntryPoint(EntryPointAddr::from_str(s)?),
        })
    }

    /// Parses legacy `Key::<Variant>(<inner>)` form, where the inner part
    /// may omit the variant prefix
    fn from_legacy_str(s: &str, legacy: &str) -> Result<Key, Error> {
        let invalid = |details: String| Error::InvalidFormat {
            kind: AddressKind::Key,
            details,
        };
        let (name, inner) = legacy
            .strip_suffix(')')
            .and_then(|body| body.split_once('('))
            .ok_or_else(|| invalid(format!("malformed legacy key `{}`", s)))?;
        let tag = KeyTag::from_variant_name(name)
            .ok_or_else(|| invalid(format!("unknown key variant `{}`", name)))?;

        let key = if tag == KeyTag::Account {
            Key::Account(AccountHash::from_str(inner)?)
        } else if KEY_PREFIXES
            .iter()
            .any(|(prefix, t)| *t == tag && inner.starts_with(prefix))
        {
            Key::from_prefixed_str(inner)?
        } else {
            Key::from_prefixed_str(&format!("{}{}", tag.prefix(), inner))?
        };

        if key.tag() != tag {
            return Err(invalid(format!(
                "legacy key `{}` holds {} key instead of {}",
                s,
                key.tag(),
                tag
            )));
        }
        Ok(key)
    }
}

impl Display for Key {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let prefix = self.tag().prefix();
        let zeros = Hash::default();
        match self {
            Key::Account(account) => f.write_str(&account.to_prefixed_string()),
            Key::Transfer(transfer) => f.write_str(&transfer.to_prefixed_string()),
            Key::Hash(hash)
            | Key::DeployInfo(hash)
            | Key::Balance(hash)
            | Key::Dictionary(hash)
            | Key::Package(hash) => write!(f, "{}{}", prefix, hash),
            Key::Bid(account) | Key::Withdraw(account) | Key::Unbond(account) => {
                write!(f, "{}{}", prefix, account.to_hex())
            }
            Key::SystemEntityRegistry
            | Key::EraSummary
            | Key::ChainspecRegistry
            | Key::ChecksumRegistry => write!(f, "{}{}", prefix, zeros),
            Key::BlockGlobal(addr) => {
                write!(f, "{}{}", addr.prefix(), BLOCK_GLOBAL_PADDING[..].to_hex())
            }
            Key::URef(uref) => Display::fmt(uref, f),
            Key::EraInfo(era) => Display::fmt(era, f),
            Key::BidAddr(addr) => Display::fmt(addr, f),
            Key::AddressableEntity(addr) => Display::fmt(addr, f),
            Key::ByteCode(addr) => Display::fmt(addr, f),
            Key::Message(addr) => Display::fmt(addr, f),
            Key::NamedKey(addr) => Display::fmt(addr, f),
            Key::BalanceHold(addr) => Display::fmt(addr, f),
            Key::EntryPoint(addr) => Display::fmt(addr, f),
        }
    }
}

impl FromStr for Key {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() == Hash::HEX_LEN && s.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Ok(Key::Hash(Hash::from_hex(s)?));
        }
        if let Some(legacy) = s.strip_prefix("Key::") {
            return Key::from_legacy_str(s, legacy);
        }
        if s.len() == Hash::HEX_LEN + 2 && s.starts_with("00") {
            return Ok(Key::Account(AccountHash::from_str(s)?));
        }
        Key::from_prefixed_str(s)
    }
}

impl StrictEncode for Key {
    fn strict_encode<E: io::Write>(&self, mut e: E) -> Result<usize, strict_encoding::Error> {
        let len = self.tag().strict_encode(&mut e)?;
        let zeros = Hash::default();
        Ok(len
            + match self {
                Key::Account(account)
                | Key::Bid(account)
                | Key::Withdraw(account)
                | Key::Unbond(account) => account.strict_encode(&mut e)?,
                Key::Hash(hash)
                | Key::DeployInfo(hash)
                | Key::Balance(hash)
                | Key::Dictionary(hash)
                | Key::Package(hash) => hash.strict_encode(&mut e)?,
                Key::URef(uref) => uref.strict_encode(&mut e)?,
                Key::Transfer(transfer) => transfer.strict_encode(&mut e)?,
                Key::EraInfo(era) => era.strict_encode(&mut e)?,
                Key::SystemEntityRegistry
                | Key::EraSummary
                | Key::ChainspecRegistry
                | Key::ChecksumRegistry => zeros.strict_encode(&mut e)?,
                Key::BidAddr(addr) => addr.strict_encode(&mut e)?,
                Key::AddressableEntity(addr) => addr.strict_encode(&mut e)?,
                Key::ByteCode(addr) => addr.strict_encode(&mut e)?,
                Key::Message(addr) => addr.strict_encode(&mut e)?,
                Key::NamedKey(addr) => addr.strict_encode(&mut e)?,
                Key::BlockGlobal(addr) => strict_encode_list!(e; addr, BLOCK_GLOBAL_PADDING),
                Key::BalanceHold(addr) => addr.strict_encode(&mut e)?,
                Key::EntryPoint(addr) => addr.strict_encode(&mut e)?,
            })
    }
}

impl StrictDecode for Key {
    fn strict_decode<D: io::Read>(mut d: D) -> Result<Self, strict_encoding::Error> {
        let tag = KeyTag::strict_decode(&mut d)?;
        log::trace!("decoding {} key", tag);
        Ok(match tag {
            KeyTag::Account => Key::Account(AccountHash::strict_decode(&mut d)?),
            KeyTag::Hash => Key::Hash(Hash::strict_decode(&mut d)?),
            KeyTag::URef => Key::URef(URef::strict_decode(&mut d)?),
            KeyTag::Transfer => Key::Transfer(TransferHash::strict_decode(&mut d)?),
            KeyTag::DeployInfo => Key::DeployInfo(Hash::strict_decode(&mut d)?),
            KeyTag::EraInfo => Key::EraInfo(Era::strict_decode(&mut d)?),
            KeyTag::Balance => Key::Balance(Hash::strict_decode(&mut d)?),
            KeyTag::Bid => Key::Bid(AccountHash::strict_decode(&mut d)?),
            KeyTag::Withdraw => Key::Withdraw(AccountHash::strict_decode(&mut d)?),
            KeyTag::Dictionary => Key::Dictionary(Hash::strict_decode(&mut d)?),
            KeyTag::SystemEntityRegistry => {
                Hash::strict_decode(&mut d)?;
                Key::SystemEntityRegistry
            }
            KeyTag::EraSummary => {
                Hash::strict_decode(&mut d)?;
                Key::EraSummary
            }
            KeyTag::Unbond => Key::Unbond(AccountHash::strict_decode(&mut d)?),
            KeyTag::ChainspecRegistry => {
                Hash::strict_decode(&mut d)?;
                Key::ChainspecRegistry
            }
            KeyTag::ChecksumRegistry => {
                Hash::strict_decode(&mut d)?;
                Key::ChecksumRegistry
            }
            KeyTag::BidAddr => Key::BidAddr(BidAddr::strict_decode(&mut d)?),
            KeyTag::Package => Key::Package(Hash::strict_decode(&mut d)?),
            KeyTag::AddressableEntity => {
                Key::AddressableEntity(EntityAddr::strict_decode(&mut d)?)
            }
            KeyTag::ByteCode => Key::ByteCode(ByteCodeAddr::strict_decode(&mut d)?),
            KeyTag::Message => Key::Message(MessageAddr::strict_decode(&mut d)?),
            KeyTag::NamedKey => Key::NamedKey(NamedKeyAddr::strict_decode(&mut d)?),
            KeyTag::BlockGlobal => {
                let addr = BlockGlobalAddr::strict_decode(&mut d)?;
                <[u8; 31]>::strict_decode(&mut d)?;
                Key::BlockGlobal(addr)
            }
            KeyTag::BalanceHold => Key::BalanceHold(BalanceHoldAddr::strict_decode(&mut d)?),
            KeyTag::EntryPoint => Key::EntryPoint(EntryPointAddr::strict_decode(&mut d)?),
        })
    }
}

impl_serde_str!(Key);
impl_try_from_stringly!(Key);
impl_into_string!(Key);

impl From<AccountHash> for Key {
    #[inline]
    fn from(account: AccountHash) -> Self {
        Key::Account(account)
    }
}

impl From<TransferHash> for Key {
    #[inline]
    fn from(transfer: TransferHash) -> Self {
        Key::Transfer(transfer)
    }
}

impl From<ContractHash> for Key {
    #[inline]
    fn from(contract: ContractHash) -> Self {
        Key::Hash(contract.hash())
    }
}

impl From<ContractPackageHash> for Key {
    #[inline]
    fn from(package: ContractPackageHash) -> Self {
        Key::Package(package.hash())
    }
}

impl From<URef> for Key {
    #[inline]
    fn from(uref: URef) -> Self {
        Key::URef(uref)
    }
}

impl From<Era> for Key {
    #[inline]
    fn from(era: Era) -> Self {
        Key::EraInfo(era)
    }
}

impl From<EntityAddr> for Key {
    #[inline]
    fn from(addr: EntityAddr) -> Self {
        Key::AddressableEntity(addr)
    }
}

impl From<BidAddr> for Key {
    #[inline]
    fn from(addr: BidAddr) -> Self {
        Key::BidAddr(addr)
    }
}
