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

use super::{AddressKind, Error};
use crate::strict_encoding::{self, StrictDecode, StrictEncode};

/// Era number, `era-<decimal>` in the textual form
#[derive(Wrapper, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default, From)]
#[wrapper(Deref)]
pub struct Era(u64);

impl Era {
    pub const PREFIX: &'static str = "era-";

    #[inline]
    pub fn number(self) -> u64 {
        self.0
    }
}

impl Display for Era {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", Era::PREFIX, self.0)
    }
}

impl FromStr for Era {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let number = s
            .strip_prefix(Era::PREFIX)
            .ok_or_else(|| Error::NotFoundPrefix(s.to_owned()))?;
        if number.is_empty() || !number.bytes().all(|b| b.is_ascii_digit()) {
            return Err(Error::InvalidFormat {
                kind: AddressKind::Era,
                details: format!("`{}` is not a decimal era number", number),
            });
        }
        number.parse().map(Era).map_err(|_| Error::InvalidFormat {
            kind: AddressKind::Era,
            details: format!("era number `{}` overflows 64 bits", number),
        })
    }
}

impl StrictEncode for Era {
    #[inline]
    fn strict_encode<E: io::Write>(&self, e: E) -> Result<usize, strict_encoding::Error> {
        self.0.strict_encode(e)
    }
}

impl StrictDecode for Era {
    #[inline]
    fn strict_decode<D: io::Read>(d: D) -> Result<Self, strict_encoding::Error> {
        u64::strict_decode(d).map(Era)
    }
}

impl_serde_str!(Era);
