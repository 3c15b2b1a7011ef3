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

//! Addresses of addressable entities and of the records they own: byte code,
//! named keys, messages and entry points; plus global block-level records.

use std::fmt::{self, Display, Formatter};
use std::io;
use std::str::FromStr;

use num_derive::{FromPrimitive, ToPrimitive};

use super::{AddressKind, Error, Hash};
use crate::strict_encoding::{self, StrictDecode, StrictEncode};

fn strip<'s>(s: &'s str, prefix: &str) -> Result<&'s str, Error> {
    s.strip_prefix(prefix)
        .ok_or_else(|| Error::NotFoundPrefix(s.to_owned()))
}

/// Splits `<head>-<tail>` at the last dash
fn split_last(s: &str, kind: AddressKind) -> Result<(&str, &str), Error> {
    s.rsplit_once('-').ok_or_else(|| Error::InvalidFormat {
        kind,
        details: format!("missing `-` separator in `{}`", s),
    })
}

#[derive(
    Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Display, ToPrimitive, FromPrimitive,
)]
#[display(Debug)]
#[repr(u8)]
pub enum EntityKind {
    System = 0,
    Account = 1,
    SmartContract = 2,
}

impl_enum_strict_encoding!(EntityKind);

/// Address of an addressable entity: its kind plus 32-byte hash
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub enum EntityAddr {
    System(Hash),
    Account(Hash),
    SmartContract(Hash),
}

impl EntityAddr {
    pub const PREFIX: &'static str = "entity-";

    pub fn new(kind: EntityKind, hash: Hash) -> Self {
        match kind {
            EntityKind::System => EntityAddr::System(hash),
            EntityKind::Account => EntityAddr::Account(hash),
            EntityKind::SmartContract => EntityAddr::SmartContract(hash),
        }
    }

    pub fn kind(&self) -> EntityKind {
        match self {
            EntityAddr::System(_) => EntityKind::System,
            EntityAddr::Account(_) => EntityKind::Account,
            EntityAddr::SmartContract(_) => EntityKind::SmartContract,
        }
    }

    pub fn hash(&self) -> Hash {
        match self {
            EntityAddr::System(hash)
            | EntityAddr::Account(hash)
            | EntityAddr::SmartContract(hash) => *hash,
        }
    }

    fn kind_prefix(kind: EntityKind) -> &'static str {
        match kind {
            EntityKind::System => "system-",
            EntityKind::Account => "account-",
            EntityKind::SmartContract => "contract-",
        }
    }
}

impl Display for EntityAddr {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}{}",
            EntityAddr::PREFIX,
            EntityAddr::kind_prefix(self.kind()),
            self.hash()
        )
    }
}

impl FromStr for EntityAddr {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rest = strip(s, EntityAddr::PREFIX)?;
        for kind in [EntityKind::System, EntityKind::Account, EntityKind::SmartContract] {
            if let Some(hex) = rest.strip_prefix(EntityAddr::kind_prefix(kind)) {
                let hash = Hash::parse_hex(hex, AddressKind::EntityAddr)?;
                return Ok(EntityAddr::new(kind, hash));
            }
        }
        Err(Error::InvalidFormat {
            kind: AddressKind::EntityAddr,
            details: format!("unknown entity kind in `{}`", s),
        })
    }
}

impl StrictEncode for EntityAddr {
    fn strict_encode<E: io::Write>(&self, mut e: E) -> Result<usize, strict_encoding::Error> {
        Ok(strict_encode_list!(e; self.kind(), self.hash()))
    }
}

impl StrictDecode for EntityAddr {
    fn strict_decode<D: io::Read>(mut d: D) -> Result<Self, strict_encoding::Error> {
        let kind = EntityKind::strict_decode(&mut d)?;
        Ok(EntityAddr::new(kind, Hash::strict_decode(&mut d)?))
    }
}

/// Address of a stored byte code
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub enum ByteCodeAddr {
    /// Placeholder for entities without byte code
    Empty,
    V1CasperWasm(Hash),
}

#[derive(
    Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Display, ToPrimitive, FromPrimitive,
)]
#[display(Debug)]
#[repr(u8)]
pub enum ByteCodeKind {
    Empty = 0,
    V1CasperWasm = 1,
}

impl_enum_strict_encoding!(ByteCodeKind);

impl ByteCodeAddr {
    pub const PREFIX: &'static str = "byte-code-";
    const EMPTY: &'static str = "empty-";
    const V1_WASM: &'static str = "v1-wasm-";

    pub fn kind(&self) -> ByteCodeKind {
        match self {
            ByteCodeAddr::Empty => ByteCodeKind::Empty,
            ByteCodeAddr::V1CasperWasm(_) => ByteCodeKind::V1CasperWasm,
        }
    }

    /// Hash of the byte code; all zeros for [`ByteCodeAddr::Empty`]
    pub fn hash(&self) -> Hash {
        match self {
            ByteCodeAddr::Empty => Hash::default(),
            ByteCodeAddr::V1CasperWasm(hash) => *hash,
        }
    }
}

impl Display for ByteCodeAddr {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let kind = match self {
            ByteCodeAddr::Empty => ByteCodeAddr::EMPTY,
            ByteCodeAddr::V1CasperWasm(_) => ByteCodeAddr::V1_WASM,
        };
        write!(f, "{}{}{}", ByteCodeAddr::PREFIX, kind, self.hash())
    }
}

impl FromStr for ByteCodeAddr {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rest = strip(s, ByteCodeAddr::PREFIX)?;
        if let Some(hex) = rest.strip_prefix(ByteCodeAddr::EMPTY) {
            Hash::parse_hex(hex, AddressKind::ByteCodeAddr)?;
            Ok(ByteCodeAddr::Empty)
        } else if let Some(hex) = rest.strip_prefix(ByteCodeAddr::V1_WASM) {
            Ok(ByteCodeAddr::V1CasperWasm(Hash::parse_hex(
                hex,
                AddressKind::ByteCodeAddr,
            )?))
        } else {
            Err(Error::InvalidFormat {
                kind: AddressKind::ByteCodeAddr,
                details: format!("unknown byte code kind in `{}`", s),
            })
        }
    }
}

impl StrictEncode for ByteCodeAddr {
    fn strict_encode<E: io::Write>(&self, mut e: E) -> Result<usize, strict_encoding::Error> {
        Ok(match self {
            ByteCodeAddr::Empty => self.kind().strict_encode(&mut e)?,
            ByteCodeAddr::V1CasperWasm(hash) => strict_encode_list!(e; self.kind(), hash),
        })
    }
}

impl StrictDecode for ByteCodeAddr {
    fn strict_decode<D: io::Read>(mut d: D) -> Result<Self, strict_encoding::Error> {
        Ok(match ByteCodeKind::strict_decode(&mut d)? {
            ByteCodeKind::Empty => ByteCodeAddr::Empty,
            ByteCodeKind::V1CasperWasm => ByteCodeAddr::V1CasperWasm(Hash::strict_decode(&mut d)?),
        })
    }
}

/// Address of a named key owned by an entity
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct NamedKeyAddr {
    pub entity: EntityAddr,
    /// Hash of the key name
    pub name_hash: Hash,
}

impl NamedKeyAddr {
    pub const PREFIX: &'static str = "named-key-";
}

impl Display for NamedKeyAddr {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}-{}", NamedKeyAddr::PREFIX, self.entity, self.name_hash)
    }
}

impl FromStr for NamedKeyAddr {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rest = strip(s, NamedKeyAddr::PREFIX)?;
        let (entity, name) = split_last(rest, AddressKind::NamedKeyAddr)?;
        Ok(NamedKeyAddr {
            entity: EntityAddr::from_str(entity)?,
            name_hash: Hash::parse_hex(name, AddressKind::NamedKeyAddr)?,
        })
    }
}

impl StrictEncode for NamedKeyAddr {
    fn strict_encode<E: io::Write>(&self, mut e: E) -> Result<usize, strict_encoding::Error> {
        Ok(strict_encode_list!(e; self.entity, self.name_hash))
    }
}

impl StrictDecode for NamedKeyAddr {
    fn strict_decode<D: io::Read>(mut d: D) -> Result<Self, strict_encoding::Error> {
        Ok(NamedKeyAddr {
            entity: EntityAddr::strict_decode(&mut d)?,
            name_hash: Hash::strict_decode(&mut d)?,
        })
    }
}

/// Address of a message topic, or of a single message within a topic
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct MessageAddr {
    pub entity: EntityAddr,
    pub topic_hash: Hash,
    /// Message index; `None` addresses the topic itself
    pub index: Option<u32>,
}

impl MessageAddr {
    pub const PREFIX: &'static str = "message-";
    const TOPIC: &'static str = "topic-";
}

impl Display for MessageAddr {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self.index {
            None => write!(
                f,
                "{}{}{}-{}",
                MessageAddr::PREFIX,
                MessageAddr::TOPIC,
                self.entity,
                self.topic_hash
            ),
            Some(index) => write!(
                f,
                "{}{}-{}-{:x}",
                MessageAddr::PREFIX,
                self.entity,
                self.topic_hash,
                index
            ),
        }
    }
}

impl FromStr for MessageAddr {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rest = strip(s, MessageAddr::PREFIX)?;
        if let Some(topic) = rest.strip_prefix(MessageAddr::TOPIC) {
            let (entity, topic_hash) = split_last(topic, AddressKind::MessageAddr)?;
            return Ok(MessageAddr {
                entity: EntityAddr::from_str(entity)?,
                topic_hash: Hash::parse_hex(topic_hash, AddressKind::MessageAddr)?,
                index: None,
            });
        }
        let (rest, index) = split_last(rest, AddressKind::MessageAddr)?;
        let (entity, topic_hash) = split_last(rest, AddressKind::MessageAddr)?;
        let index = u32::from_str_radix(index, 16).map_err(|_| Error::InvalidFormat {
            kind: AddressKind::MessageAddr,
            details: format!("invalid message index `{}`", index),
        })?;
        Ok(MessageAddr {
            entity: EntityAddr::from_str(entity)?,
            topic_hash: Hash::parse_hex(topic_hash, AddressKind::MessageAddr)?,
            index: Some(index),
        })
    }
}

impl StrictEncode for MessageAddr {
    fn strict_encode<E: io::Write>(&self, mut e: E) -> Result<usize, strict_encoding::Error> {
        Ok(strict_encode_list!(e; self.entity, self.topic_hash, self.index))
    }
}

impl StrictDecode for MessageAddr {
    fn strict_decode<D: io::Read>(mut d: D) -> Result<Self, strict_encoding::Error> {
        Ok(MessageAddr {
            entity: EntityAddr::strict_decode(&mut d)?,
            topic_hash: Hash::strict_decode(&mut d)?,
            index: Option::<u32>::strict_decode(&mut d)?,
        })
    }
}

#[derive(
    Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Display, ToPrimitive, FromPrimitive,
)]
#[display(Debug)]
#[repr(u8)]
pub enum EntryPointVersion {
    V1 = 0,
    V2 = 1,
}

impl_enum_strict_encoding!(EntryPointVersion);

/// Address of an entity entry point
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub enum EntryPointAddr {
    /// Entry point addressed by the hash of its name
    V1 { entity: EntityAddr, name_hash: Hash },
    /// Entry point addressed by its numeric selector
    V2 { entity: EntityAddr, selector: u32 },
}

impl EntryPointAddr {
    pub const PREFIX: &'static str = "entry-point-";
    const V1: &'static str = "v1-";
    const V2: &'static str = "v2-";

    pub fn version(&self) -> EntryPointVersion {
        match self {
            EntryPointAddr::V1 { .. } => EntryPointVersion::V1,
            EntryPointAddr::V2 { .. } => EntryPointVersion::V2,
        }
    }

    pub fn entity(&self) -> EntityAddr {
        match self {
            EntryPointAddr::V1 { entity, .. } | EntryPointAddr::V2 { entity, .. } => *entity,
        }
    }
}

impl Display for EntryPointAddr {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            EntryPointAddr::V1 { entity, name_hash } => write!(
                f,
                "{}{}{}-{}",
                EntryPointAddr::PREFIX,
                EntryPointAddr::V1,
                entity,
                name_hash
            ),
            EntryPointAddr::V2 { entity, selector } => write!(
                f,
                "{}{}{}-{}",
                EntryPointAddr::PREFIX,
                EntryPointAddr::V2,
                entity,
                selector
            ),
        }
    }
}

impl FromStr for EntryPointAddr {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rest = strip(s, EntryPointAddr::PREFIX)?;
        if let Some(v1) = rest.strip_prefix(EntryPointAddr::V1) {
            let (entity, name_hash) = split_last(v1, AddressKind::EntryPointAddr)?;
            Ok(EntryPointAddr::V1 {
                entity: EntityAddr::from_str(entity)?,
                name_hash: Hash::parse_hex(name_hash, AddressKind::EntryPointAddr)?,
            })
        } else if let Some(v2) = rest.strip_prefix(EntryPointAddr::V2) {
            let (entity, selector) = split_last(v2, AddressKind::EntryPointAddr)?;
            Ok(EntryPointAddr::V2 {
                entity: EntityAddr::from_str(entity)?,
                selector: selector.parse().map_err(|_| Error::InvalidFormat {
                    kind: AddressKind::EntryPointAddr,
                    details: format!("invalid entry point selector `{}`", selector),
                })?,
            })
        } else {
            Err(Error::InvalidFormat {
                kind: AddressKind::EntryPointAddr,
                details: format!("unknown entry point version in `{}`", s),
            })
        }
    }
}

impl StrictEncode for EntryPointAddr {
    fn strict_encode<E: io::Write>(&self, mut e: E) -> Result<usize, strict_encoding::Error> {
        Ok(match self {
            EntryPointAddr::V1 { entity, name_hash } => {
                strict_encode_list!(e; self.version(), entity, name_hash)
            }
            EntryPointAddr::V2 { entity, selector } => {
                strict_encode_list!(e; self.version(), entity, selector)
            }
        })
    }
}

impl StrictDecode for EntryPointAddr {
    fn strict_decode<D: io::Read>(mut d: D) -> Result<Self, strict_encoding::Error> {
        let version = EntryPointVersion::strict_decode(&mut d)?;
        let entity = EntityAddr::strict_decode(&mut d)?;
        Ok(match version {
            EntryPointVersion::V1 => EntryPointAddr::V1 {
                entity,
                name_hash: Hash::strict_decode(&mut d)?,
            },
            EntryPointVersion::V2 => EntryPointAddr::V2 {
                entity,
                selector: u32::strict_decode(&mut d)?,
            },
        })
    }
}

/// Global records maintained per block
#[derive(
    Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Display, ToPrimitive, FromPrimitive,
)]
#[display(Debug)]
#[repr(u8)]
pub enum BlockGlobalAddr {
    BlockTime = 0,
    MessageCount = 1,
}

impl_enum_strict_encoding!(BlockGlobalAddr);

impl BlockGlobalAddr {
    pub const ALL: [BlockGlobalAddr; 2] = [BlockGlobalAddr::BlockTime, BlockGlobalAddr::MessageCount];

    /// Prefix of the key string; the prefix is followed by 64 zero hex chars
    #[inline]
    pub fn prefix(self) -> &'static str {
        match self {
            BlockGlobalAddr::BlockTime => "block-time-",
            BlockGlobalAddr::MessageCount => "block-message-count-",
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::strict_encoding::strict_deserialize;
    use crate::test_helpers::{hex, test_suite_hex};

    const H1: &str = "1111111111111111111111111111111111111111111111111111111111111111";
    const H2: &str = "abababababababababababababababababababababababababababababababab";

    fn entity() -> EntityAddr {
        EntityAddr::Account(Hash::from_hex(H1).unwrap())
    }

    #[test]
    fn test_entity_kind_exhaustive() {
        test_enum_u8_exhaustive!(EntityKind;
            EntityKind::System => 0,
            EntityKind::Account => 1,
            EntityKind::SmartContract => 2
        );
    }

    #[test]
    fn test_entity_addr() {
        for (s, kind) in [
            ("entity-system-", EntityKind::System),
            ("entity-account-", EntityKind::Account),
            ("entity-contract-", EntityKind::SmartContract),
        ] {
            let addr = EntityAddr::from_str(&format!("{}{}", s, H1)).unwrap();
            assert_eq!(addr.kind(), kind);
            assert_eq!(addr.to_string(), format!("{}{}", s, H1));
            test_suite_hex(&addr, &format!("{:02x}{}", kind as u8, H1));
        }
        assert!(matches!(
            EntityAddr::from_str(&format!("entity-validator-{}", H1)),
            Err(Error::InvalidFormat {
                kind: AddressKind::EntityAddr,
                ..
            })
        ));
        assert_eq!(
            EntityAddr::from_str(H1),
            Err(Error::NotFoundPrefix(H1.to_owned()))
        );
    }

    #[test]
    fn test_byte_code_addr() {
        let zeros = "0".repeat(64);
        let empty = ByteCodeAddr::from_str(&format!("byte-code-empty-{}", zeros)).unwrap();
        assert_eq!(empty, ByteCodeAddr::Empty);
        assert_eq!(empty.to_string(), format!("byte-code-empty-{}", zeros));
        test_suite_hex(&empty, "00");

        let wasm = ByteCodeAddr::from_str(&format!("byte-code-v1-wasm-{}", H2)).unwrap();
        assert_eq!(wasm.hash().to_hex(), H2);
        assert_eq!(wasm.to_string(), format!("byte-code-v1-wasm-{}", H2));
        test_suite_hex(&wasm, &format!("01{}", H2));

        assert!(ByteCodeAddr::from_str(&format!("byte-code-v2-wasm-{}", H2)).is_err());
    }

    #[test]
    fn test_named_key_addr() {
        let s = format!("named-key-entity-account-{}-{}", H1, H2);
        let addr = NamedKeyAddr::from_str(&s).unwrap();
        assert_eq!(addr.entity, entity());
        assert_eq!(addr.name_hash.to_hex(), H2);
        assert_eq!(addr.to_string(), s);
        test_suite_hex(&addr, &format!("01{}{}", H1, H2));
    }

    #[test]
    fn test_message_addr() {
        let topic = format!("message-topic-entity-account-{}-{}", H1, H2);
        let addr = MessageAddr::from_str(&topic).unwrap();
        assert_eq!(addr.index, None);
        assert_eq!(addr.to_string(), topic);
        test_suite_hex(&addr, &format!("01{}{}00", H1, H2));

        let message = format!("message-entity-account-{}-{}-1f", H1, H2);
        let addr = MessageAddr::from_str(&message).unwrap();
        assert_eq!(addr.entity, entity());
        assert_eq!(addr.index, Some(31));
        assert_eq!(addr.to_string(), message);
        test_suite_hex(&addr, &format!("01{}{}011f000000", H1, H2));

        assert!(matches!(
            MessageAddr::from_str(&format!("message-entity-account-{}-{}-xyz", H1, H2)),
            Err(Error::InvalidFormat { .. })
        ));
    }

    #[test]
    fn test_entry_point_addr() {
        let v1 = format!("entry-point-v1-entity-account-{}-{}", H1, H2);
        let addr = EntryPointAddr::from_str(&v1).unwrap();
        assert_eq!(addr.version(), EntryPointVersion::V1);
        assert_eq!(addr.to_string(), v1);
        test_suite_hex(&addr, &format!("0001{}{}", H1, H2));

        let v2 = format!("entry-point-v2-entity-account-{}-42", H1);
        let addr = EntryPointAddr::from_str(&v2).unwrap();
        assert_eq!(
            addr,
            EntryPointAddr::V2 {
                entity: entity(),
                selector: 42
            }
        );
        assert_eq!(addr.to_string(), v2);
        test_suite_hex(&addr, &format!("0101{}2a000000", H1));

        assert!(EntryPointAddr::from_str(&format!("entry-point-v3-entity-account-{}-42", H1))
            .is_err());
    }

    #[test]
    fn test_block_global_addr() {
        test_enum_u8_exhaustive!(BlockGlobalAddr;
            BlockGlobalAddr::BlockTime => 0,
            BlockGlobalAddr::MessageCount => 1
        );
        assert_eq!(BlockGlobalAddr::MessageCount.prefix(), "block-message-count-");
    }

    #[test]
    fn test_truncated() {
        let mut data = hex(H1);
        data.insert(0, 0x02);
        data.pop();
        assert!(strict_deserialize::<EntityAddr>(&data).is_err());
    }
}
