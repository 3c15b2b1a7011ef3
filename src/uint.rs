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

//! Big unsigned integers used by the network for token amounts and balances.
//!
//! Binary form is variable-length: a single byte holding the number of
//! significant bytes, followed by these bytes in little-endian order. Zero is
//! encoded as a single `0x00` byte. Textual form (JSON) is a decimal string.

#![allow(clippy::assign_op_pattern, clippy::ptr_offset_with_cast)]

use std::io;

use ::uint::construct_uint;

use crate::strict_encoding::{Error, StrictDecode, StrictEncode};

construct_uint! {
    /// 128-bit unsigned integer
    pub struct U128(2);
}

construct_uint! {
    /// 256-bit unsigned integer
    pub struct U256(4);
}

construct_uint! {
    /// 512-bit unsigned integer
    pub struct U512(8);
}

/// Errors parsing decimal representation of big integers
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Display, Error)]
#[display(doc_comments)]
pub enum ParseError {
    /// decimal number contains invalid characters
    InvalidCharacter,

    /// decimal number does not fit into {0} bits
    Overflow(u16),
}

macro_rules! impl_big_uint {
    ($ty:ident, $bytes:expr) => {
        impl $ty {
            /// Maximal number of bytes in the binary representation
            pub const BYTES: usize = $bytes;

            /// Parses decimal string representation, used by JSON
            pub fn from_decimal(s: &str) -> Result<Self, ParseError> {
                if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
                    return Err(ParseError::InvalidCharacter);
                }
                $ty::from_dec_str(s).map_err(|_| ParseError::Overflow($bytes * 8))
            }

            /// Number of significant bytes
            #[inline]
            pub fn significant_bytes(&self) -> usize {
                ((self.bits() + 7) / 8) as usize
            }
        }

        impl StrictEncode for $ty {
            fn strict_encode<E: io::Write>(&self, mut e: E) -> Result<usize, Error> {
                let mut buf = [0u8; $bytes];
                self.to_little_endian(&mut buf);
                let len = self.significant_bytes();
                (len as u8).strict_encode(&mut e)?;
                e.write_all(&buf[..len])?;
                Ok(1 + len)
            }
        }

        impl StrictDecode for $ty {
            fn strict_decode<D: io::Read>(mut d: D) -> Result<Self, Error> {
                let len = u8::strict_decode(&mut d)? as usize;
                if len > $bytes {
                    return Err(Error::ValueOutOfRange(
                        stringify!($ty),
                        0..($bytes as u128 + 1),
                        len as u128,
                    ));
                }
                let mut buf = [0u8; $bytes];
                d.read_exact(&mut buf[..len])?;
                Ok($ty::from_little_endian(&buf))
            }
        }

        #[cfg(feature = "serde")]
        impl serde_crate::Serialize for $ty {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: serde_crate::Serializer,
            {
                serializer.serialize_str(&self.to_string())
            }
        }

        #[cfg(feature = "serde")]
        impl<'de> serde_crate::Deserialize<'de> for $ty {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: serde_crate::Deserializer<'de>,
            {
                use serde_crate::de::Error;

                let s = <crate::common::serde::CowHelper<'_> as serde_crate::Deserialize>::deserialize(
                    deserializer,
                )?;
                $ty::from_decimal(&s).map_err(D::Error::custom)
            }
        }
    };
}

impl_big_uint!(U128, 16);
impl_big_uint!(U256, 32);
impl_big_uint!(U512, 64);
