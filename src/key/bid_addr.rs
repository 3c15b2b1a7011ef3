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

//! Variable-length addresses of auction bids and balance holds. Their
//! textual form is a prefix followed by hex of the binary representation.

use std::fmt::{self, Display, Formatter};
use std::io;
use std::str::FromStr;

use amplify::hex::{FromHex, ToHex};
use num_derive::{FromPrimitive, ToPrimitive};

use super::{AccountHash, AddressKind, Era, Error, Hash};
use crate::strict_encoding::{self, strict_deserialize, StrictDecode, StrictEncode};

fn parse_hex_encoded<T: StrictDecode>(
    s: &str,
    prefix: &str,
    kind: AddressKind,
) -> Result<T, Error> {
    let hex = s
        .strip_prefix(prefix)
        .ok_or_else(|| Error::NotFoundPrefix(s.to_owned()))?;
    let data = Vec::<u8>::from_hex(hex)?;
    strict_deserialize(&data).map_err(|err| Error::InvalidFormat {
        kind,
        details: err.to_string(),
    })
}

fn fmt_hex_encoded(
    f: &mut Formatter<'_>,
    prefix: &str,
    data: &impl StrictEncode,
) -> fmt::Result {
    write!(f, "{}{}", prefix, data.strict_serialize()?.to_hex())
}

#[derive(
    Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Display, ToPrimitive, FromPrimitive,
)]
#[display(Debug)]
#[repr(u8)]
pub enum BidAddrTag {
    Unified = 0,
    Validator = 1,
    Delegator = 2,
    Credit = 4,
}

impl_enum_strict_encoding!(BidAddrTag);

/// Address of an auction bid record
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub enum BidAddr {
    /// Legacy bid record combining validator and delegators
    Unified(AccountHash),
    Validator(AccountHash),
    Delegator {
        validator: AccountHash,
        delegator: AccountHash,
    },
    /// Validator credit for the given era
    Credit { validator: AccountHash, era: Era },
}

impl BidAddr {
    pub const PREFIX: &'static str = "bid-addr-";

    pub fn tag(&self) -> BidAddrTag {
        match self {
            BidAddr::Unified(_) => BidAddrTag::Unified,
            BidAddr::Validator(_) => BidAddrTag::Validator,
            BidAddr::Delegator { .. } => BidAddrTag::Delegator,
            BidAddr::Credit { .. } => BidAddrTag::Credit,
        }
    }

    pub fn validator(&self) -> AccountHash {
        match self {
            BidAddr::Unified(validator)
            | BidAddr::Validator(validator)
            | BidAddr::Delegator { validator, .. }
            | BidAddr::Credit { validator, .. } => *validator,
        }
    }
}

impl Display for BidAddr {
    #[inline]
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        fmt_hex_encoded(f, BidAddr::PREFIX, self)
    }
}

impl FromStr for BidAddr {
    type Err = Error;

    #[inline]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_hex_encoded(s, BidAddr::PREFIX, AddressKind::BidAddr)
    }
}

impl StrictEncode for BidAddr {
    fn strict_encode<E: io::Write>(&self, mut e: E) -> Result<usize, strict_encoding::Error> {
        let len = self.tag().strict_encode(&mut e)?;
        Ok(match self {
            BidAddr::Unified(validator) | BidAddr::Validator(validator) => {
                len + validator.strict_encode(&mut e)?
            }
            BidAddr::Delegator {
                validator,
                delegator,
            } => len + strict_encode_list!(e; validator, delegator),
            BidAddr::Credit { validator, era } => len + strict_encode_list!(e; validator, era),
        })
    }
}

impl StrictDecode for BidAddr {
    fn strict_decode<D: io::Read>(mut d: D) -> Result<Self, strict_encoding::Error> {
        let tag = BidAddrTag::strict_decode(&mut d)?;
        let validator = AccountHash::strict_decode(&mut d)?;
        Ok(match tag {
            BidAddrTag::Unified => BidAddr::Unified(validator),
            BidAddrTag::Validator => BidAddr::Validator(validator),
            BidAddrTag::Delegator => BidAddr::Delegator {
                validator,
                delegator: AccountHash::strict_decode(&mut d)?,
            },
            BidAddrTag::Credit => BidAddr::Credit {
                validator,
                era: Era::strict_decode(&mut d)?,
            },
        })
    }
}

#[derive(
    Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Display, ToPrimitive, FromPrimitive,
)]
#[display(Debug)]
#[repr(u8)]
pub enum HoldKind {
    Gas = 0,
    Processing = 1,
}

impl_enum_strict_encoding!(HoldKind);

/// Address of a balance hold placed on a purse at some block time
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct BalanceHoldAddr {
    pub kind: HoldKind,
    /// Address of the purse the hold is placed on
    pub purse: Hash,
    /// Block time in milliseconds since UNIX epoch
    pub block_time: u64,
}

impl BalanceHoldAddr {
    pub const PREFIX: &'static str = "balance-hold-";
}

impl Display for BalanceHoldAddr {
    #[inline]
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        fmt_hex_encoded(f, BalanceHoldAddr::PREFIX, self)
    }
}

impl FromStr for BalanceHoldAddr {
    type Err = Error;

    #[inline]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_hex_encoded(s, BalanceHoldAddr::PREFIX, AddressKind::BalanceHoldAddr)
    }
}

impl StrictEncode for BalanceHoldAddr {
    fn strict_encode<E: io::Write>(&self, mut e: E) -> Result<usize, strict_encoding::Error> {
        Ok(strict_encode_list!(e; self.kind, self.purse, self.block_time))
    }
}

impl StrictDecode for BalanceHoldAddr {
    fn strict_decode<D: io::Read>(mut d: D) -> Result<Self, strict_encoding::Error> {
        Ok(BalanceHoldAddr {
            kind: HoldKind::strict_decode(&mut d)?,
            purse: Hash::strict_decode(&mut d)?,
            block_time: u64::strict_decode(&mut d)?,
        })
    }
}
