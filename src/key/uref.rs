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

use std::fmt::{self, Display, Formatter};
use std::io;
use std::str::FromStr;

use num_derive::{FromPrimitive, ToPrimitive};
use num_traits::{FromPrimitive, ToPrimitive};

use super::{AddressKind, Error, Hash};
use crate::strict_encoding::{self, StrictDecode, StrictEncode};

/// Access rights granted by an unforgeable reference
#[derive(
    Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Display, Default, ToPrimitive,
    FromPrimitive,
)]
#[repr(u8)]
pub enum AccessRights {
    #[default]
    #[display("NONE")]
    None = 0,
    #[display("READ")]
    Read = 1,
    #[display("WRITE")]
    Write = 2,
    #[display("READ_WRITE")]
    ReadWrite = 3,
    #[display("ADD")]
    Add = 4,
    #[display("READ_ADD")]
    ReadAdd = 5,
    #[display("ADD_WRITE")]
    AddWrite = 6,
    #[display("READ_ADD_WRITE")]
    ReadAddWrite = 7,
}

impl_enum_strict_encoding!(AccessRights);

impl AccessRights {
    const READ: u8 = 0b001;
    const WRITE: u8 = 0b010;
    const ADD: u8 = 0b100;

    #[inline]
    fn bits(self) -> u8 {
        self as u8
    }

    #[inline]
    pub fn is_readable(self) -> bool {
        self.bits() & Self::READ != 0
    }

    #[inline]
    pub fn is_writeable(self) -> bool {
        self.bits() & Self::WRITE != 0
    }

    #[inline]
    pub fn is_addable(self) -> bool {
        self.bits() & Self::ADD != 0
    }
}

/// Unforgeable reference: 32-byte address plus access rights.
///
/// Textual form is `uref-<64 hex>-<3 octal digits>`, e.g. `uref-…-007`.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct URef {
    address: Hash,
    access_rights: AccessRights,
}

impl URef {
    pub const PREFIX: &'static str = "uref-";

    #[inline]
    pub fn new(address: Hash, access_rights: AccessRights) -> Self {
        URef {
            address,
            access_rights,
        }
    }

    #[inline]
    pub fn address(&self) -> Hash {
        self.address
    }

    #[inline]
    pub fn access_rights(&self) -> AccessRights {
        self.access_rights
    }

    /// Same address with different access rights
    #[inline]
    pub fn with_access_rights(self, access_rights: AccessRights) -> Self {
        URef {
            access_rights,
            ..self
        }
    }
}

impl Display for URef {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}-{:03o}",
            URef::PREFIX,
            self.address.to_hex(),
            self.access_rights.to_u8().ok_or(fmt::Error)?
        )
    }
}

impl FromStr for URef {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |details: &str| Error::InvalidFormat {
            kind: AddressKind::URef,
            details: format!("{} in `{}`", details, s),
        };
        let segments = s.split('-').collect::<Vec<_>>();
        let (addr, access) = match segments[..] {
            ["uref", addr, access] => (addr, access),
            [_, _, _] => return Err(Error::NotFoundPrefix(s.to_owned())),
            _ => return Err(invalid("expected exactly 3 `-`-separated segments")),
        };
        let address = Hash::parse_hex(addr, AddressKind::URef)?;
        if access.len() != 3 {
            return Err(invalid("access rights must be 3 octal digits"));
        }
        let access_rights = u8::from_str_radix(access, 8)
            .ok()
            .and_then(AccessRights::from_u8)
            .ok_or_else(|| invalid("unknown access rights"))?;
        Ok(URef::new(address, access_rights))
    }
}

impl StrictEncode for URef {
    fn strict_encode<E: io::Write>(&self, mut e: E) -> Result<usize, strict_encoding::Error> {
        Ok(strict_encode_list!(e; self.address, self.access_rights))
    }
}

impl StrictDecode for URef {
    fn strict_decode<D: io::Read>(mut d: D) -> Result<Self, strict_encoding::Error> {
        Ok(URef {
            address: Hash::strict_decode(&mut d)?,
            access_rights: AccessRights::strict_decode(&mut d)?,
        })
    }
}

impl_serde_str!(URef);
impl_try_from_stringly!(URef);

#[cfg(test)]
mod test {
    use super::*;
    use crate::strict_encoding::strict_deserialize;
    use crate::test_helpers::{hex, test_suite_hex};

    const ADDR: &str = "2f3a9d8e4c1b0a7e6f5d4c3b2a19080706050403020100ffeeddccbbaa998877";

    #[test]
    fn test_access_rights_exhaustive() {
        test_enum_u8_exhaustive!(AccessRights;
            AccessRights::None => 0,
            AccessRights::Read => 1,
            AccessRights::Write => 2,
            AccessRights::ReadWrite => 3,
            AccessRights::Add => 4,
            AccessRights::ReadAdd => 5,
            AccessRights::AddWrite => 6,
            AccessRights::ReadAddWrite => 7
        );
    }

    #[test]
    fn test_access_rights_bits() {
        assert!(AccessRights::ReadAddWrite.is_readable());
        assert!(AccessRights::ReadAddWrite.is_writeable());
        assert!(AccessRights::ReadAddWrite.is_addable());
        assert!(!AccessRights::AddWrite.is_readable());
        assert!(!AccessRights::None.is_addable());
        assert_eq!(AccessRights::ReadWrite.to_string(), "READ_WRITE");
    }

    #[test]
    fn test_uref_string() {
        let s = format!("uref-{}-007", ADDR);
        let uref = URef::from_str(&s).unwrap();
        assert_eq!(uref.access_rights(), AccessRights::ReadAddWrite);
        assert_eq!(uref.address().to_hex(), ADDR);
        assert_eq!(uref.to_string(), s);

        let uref = uref.with_access_rights(AccessRights::None);
        assert_eq!(uref.to_string(), format!("uref-{}-000", ADDR));
    }

    #[test]
    fn test_uref_string_failures() {
        assert!(matches!(
            URef::from_str(&format!("uref-{}", ADDR)),
            Err(Error::InvalidFormat {
                kind: AddressKind::URef,
                ..
            })
        ));
        assert!(matches!(
            URef::from_str(&format!("uref-{}-007-1", ADDR)),
            Err(Error::InvalidFormat { .. })
        ));
        assert!(matches!(
            URef::from_str(&format!("uref-{}-010", ADDR)),
            Err(Error::InvalidFormat { .. })
        ));
        assert!(matches!(
            URef::from_str(&format!("uref-{}-7", ADDR)),
            Err(Error::InvalidFormat { .. })
        ));
        assert!(matches!(
            URef::from_str("uref-00-007"),
            Err(Error::InvalidLength {
                kind: AddressKind::URef,
                expected: 64,
                found: 2
            })
        ));
        assert_eq!(
            URef::from_str(&format!("href-{}-007", ADDR)),
            Err(Error::NotFoundPrefix(format!("href-{}-007", ADDR)))
        );
    }

    #[test]
    fn test_uref_binary() {
        let uref = URef::from_str(&format!("uref-{}-003", ADDR)).unwrap();
        test_suite_hex(&uref, &format!("{}03", ADDR));

        let mut data = hex(ADDR);
        data.push(0x08);
        assert!(strict_deserialize::<URef>(&data).is_err());
    }
}
