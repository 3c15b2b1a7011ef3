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

//! Binary encoding according to the strict rules used by the network for all
//! consensus-critical data: fixed-width integers are little-endian, every
//! variable-size collection is prefixed with its `u32` little-endian length,
//! optionals are prefixed with a single presence byte.

use amplify::IoError;
use core::ops::Range;
use std::fmt;
use std::io::{self, Read};

/// Binary encoding according to the strict rules applied to the
/// consensus-critical data structures. Any value participating in the body
/// hash computation MUST be serialized with this trait, since a single
/// diverging byte breaks signature verification on the network.
pub trait StrictEncode {
    /// Encode with the given [`std::io::Write`] instance; must return result
    /// with either amount of bytes encoded – or implementation-specific
    /// error type.
    fn strict_encode<E: io::Write>(&self, e: E) -> Result<usize, Error>;

    /// Serializes data as a byte array using [`StrictEncode::strict_encode`]
    fn strict_serialize(&self) -> Result<Vec<u8>, Error> {
        let mut e = vec![];
        let _ = self.strict_encode(&mut e)?;
        Ok(e)
    }
}

/// Binary decoding according to the strict rules applied to the
/// consensus-critical data structures.
pub trait StrictDecode: Sized {
    /// Decode with the given [`std::io::Read`] instance; must either
    /// construct an instance or return implementation-specific error type.
    fn strict_decode<D: io::Read>(d: D) -> Result<Self, Error>;

    /// Tries to deserialize byte array into the current type using
    /// [`StrictDecode::strict_decode`]. Fails if not all of the data were
    /// consumed.
    fn strict_deserialize(data: impl AsRef<[u8]>) -> Result<Self, Error> {
        strict_deserialize(&data)
    }
}

/// Convenience method for strict encoding of data structures implementing
/// [`StrictEncode`] into a byte vector.
pub fn strict_serialize<T>(data: &T) -> Result<Vec<u8>, Error>
where
    T: StrictEncode,
{
    let mut encoder = io::Cursor::new(vec![]);
    data.strict_encode(&mut encoder)?;
    Ok(encoder.into_inner())
}

/// Convenience method for strict decoding of data structures implementing
/// [`StrictDecode`] from any byte data source.
pub fn strict_deserialize<T>(data: &impl AsRef<[u8]>) -> Result<T, Error>
where
    T: StrictDecode,
{
    let mut decoder = io::Cursor::new(data.as_ref());
    let rv = T::strict_decode(&mut decoder)?;
    let consumed = decoder.position() as usize;

    // Fail if data are not consumed entirely.
    if consumed == data.as_ref().len() {
        Ok(rv)
    } else {
        Err(Error::DataNotEntirelyConsumed)
    }
}

/// Possible errors during strict encoding and decoding process
#[derive(Clone, PartialEq, Eq, Hash, Debug, Display, From, Error)]
#[display(doc_comments)]
pub enum Error {
    /// I/O error during data strict encoding: {0}
    #[from(io::Error)]
    #[from(io::ErrorKind)]
    Io(IoError),

    /// String data are not in valid UTF-8 encoding
    #[from(std::str::Utf8Error)]
    #[from(std::string::FromUtf8Error)]
    Utf8Conversion,

    /// A collection (slice, vector, string or other type) has more items
    /// ({0}) than 2^32-1 (i.e. maximum value which may be held by `u32` size
    /// representation)
    ExceedMaxItems(usize),

    /// Invalid value {0} met as an optional type byte, which must be equal to
    /// either 0 (no value) or 1
    WrongOptionalEncoding(u8),

    /// An unsupported value `{1}` for enum `{0}` encountered during decode
    /// operation
    EnumValueNotKnown(String, u8),

    /// Decoding resulted in value `{2}` for type `{0}` that exceeds the
    /// supported range {1:?}
    ValueOutOfRange(&'static str, Range<u128>, u128),

    /// Nested type definitions exceed the maximum depth of {0} levels
    ExceededRecursionDepth(u8),

    /// Data were not consumed entirely during strict decoding procedure
    DataNotEntirelyConsumed,

    /// Data integrity problem during strict decoding operation: {0}
    DataIntegrityError(String),
}

impl From<Error> for fmt::Error {
    #[inline]
    fn from(_: Error) -> Self {
        fmt::Error
    }
}

#[macro_export]
macro_rules! strict_encode_list {
    ( $encoder:ident; $($item:expr),+ ) => {
        {
            let mut len = 0usize;
            $(
                len += $item.strict_encode(&mut $encoder)?;
            )+
            len
        }
    };

    ( $encoder:ident; $len:ident; $($item:expr),+ ) => {
        {
            $(
                $len += $item.strict_encode(&mut $encoder)?;
            )+
            $len
        }
    }
}

/// Implements strict encoding for a fieldless `#[repr(u8)]` enum deriving
/// `num_derive::{FromPrimitive, ToPrimitive}`: the enum is encoded as a single
/// tag byte.
#[macro_export]
macro_rules! impl_enum_strict_encoding {
    ($type:ty) => {
        impl $crate::strict_encoding::StrictEncode for $type {
            #[inline]
            fn strict_encode<E: ::std::io::Write>(
                &self,
                e: E,
            ) -> Result<usize, $crate::strict_encoding::Error> {
                use ::num_traits::ToPrimitive;

                let tag = self.to_u8().ok_or_else(|| {
                    $crate::strict_encoding::Error::DataIntegrityError(format!(
                        "{} tag does not fit into a single byte",
                        stringify!($type)
                    ))
                })?;
                $crate::strict_encoding::StrictEncode::strict_encode(&tag, e)
            }
        }

        impl $crate::strict_encoding::StrictDecode for $type {
            #[inline]
            fn strict_decode<D: ::std::io::Read>(
                d: D,
            ) -> Result<Self, $crate::strict_encoding::Error> {
                use ::num_traits::FromPrimitive;

                let value = <u8 as $crate::strict_encoding::StrictDecode>::strict_decode(d)?;
                match Self::from_u8(value) {
                    Some(result) => Ok(result),
                    None => Err($crate::strict_encoding::Error::EnumValueNotKnown(
                        stringify!($type).to_string(),
                        value,
                    )),
                }
            }
        }
    };
}

/// Writes `u32` little-endian length prefix for a collection of `len` items
pub fn encode_len<E: io::Write>(len: usize, e: E) -> Result<usize, Error> {
    if len > u32::MAX as usize {
        return Err(Error::ExceedMaxItems(len));
    }
    (len as u32).strict_encode(e)
}

/// Reads `u32` little-endian length prefix
pub fn decode_len<D: io::Read>(d: D) -> Result<usize, Error> {
    u32::strict_decode(d).map(|len| len as usize)
}

/// Writes length-prefixed byte string
pub fn encode_bytes<E: io::Write>(data: &[u8], mut e: E) -> Result<usize, Error> {
    let len = encode_len(data.len(), &mut e)?;
    e.write_all(data)?;
    Ok(len + data.len())
}

/// Reads length-prefixed byte string
pub fn decode_bytes<D: io::Read>(mut d: D) -> Result<Vec<u8>, Error> {
    let len = decode_len(&mut d)?;
    read_exact_vec(d, len)
}

/// Reads exactly `len` bytes without trusting `len` for the buffer
/// pre-allocation, so a corrupted length prefix can't exhaust the memory.
pub fn read_exact_vec<D: io::Read>(d: D, len: usize) -> Result<Vec<u8>, Error> {
    let mut buf = Vec::with_capacity(len.min(u16::MAX as usize));
    d.take(len as u64).read_to_end(&mut buf)?;
    if buf.len() != len {
        return Err(io::ErrorKind::UnexpectedEof.into());
    }
    Ok(buf)
}

/// Taking implementation of little-endian integer encoding
mod number_little_endian {
    use std::io;

    use super::{Error, StrictDecode, StrictEncode};

    macro_rules! impl_le_number {
        ($ty:ty, $len:expr) => {
            impl StrictEncode for $ty {
                #[inline]
                fn strict_encode<E: io::Write>(&self, mut e: E) -> Result<usize, Error> {
                    e.write_all(&self.to_le_bytes())?;
                    Ok($len)
                }
            }

            impl StrictDecode for $ty {
                #[inline]
                fn strict_decode<D: io::Read>(mut d: D) -> Result<Self, Error> {
                    let mut buf = [0u8; $len];
                    d.read_exact(&mut buf)?;
                    Ok(<$ty>::from_le_bytes(buf))
                }
            }
        };
    }

    impl_le_number!(u8, 1);
    impl_le_number!(u16, 2);
    impl_le_number!(u32, 4);
    impl_le_number!(u64, 8);
    impl_le_number!(i32, 4);
    impl_le_number!(i64, 8);

    impl StrictEncode for bool {
        fn strict_encode<E: io::Write>(&self, mut e: E) -> Result<usize, Error> {
            (*self as u8).strict_encode(&mut e)
        }
    }

    impl StrictDecode for bool {
        fn strict_decode<D: io::Read>(mut d: D) -> Result<Self, Error> {
            match u8::strict_decode(&mut d)? {
                0 => Ok(false),
                1 => Ok(true),
                v => Err(Error::ValueOutOfRange("boolean", 0..2, v as u128)),
            }
        }
    }
}

mod compositional_types {
    use std::io;

    use super::{
        decode_bytes, decode_len, encode_bytes, encode_len, Error, StrictDecode,
        StrictEncode,
    };

    /// In terms of strict encoding, `Option` (optional values) are encoded
    /// with a single presence byte followed by the value itself, if any.
    impl<T> StrictEncode for Option<T>
    where
        T: StrictEncode,
    {
        fn strict_encode<E: io::Write>(&self, mut e: E) -> Result<usize, Error> {
            Ok(match self {
                None => 0u8.strict_encode(&mut e)?,
                Some(val) => 1u8.strict_encode(&mut e)? + val.strict_encode(&mut e)?,
            })
        }
    }

    impl<T> StrictDecode for Option<T>
    where
        T: StrictDecode,
    {
        fn strict_decode<D: io::Read>(mut d: D) -> Result<Self, Error> {
            match u8::strict_decode(&mut d)? {
                0u8 => Ok(None),
                1u8 => Ok(Some(T::strict_decode(&mut d)?)),
                invalid => Err(Error::WrongOptionalEncoding(invalid)),
            }
        }
    }

    /// Vectors are encoded as a `u32` little-endian item count followed by
    /// the items
    impl<T> StrictEncode for Vec<T>
    where
        T: StrictEncode,
    {
        fn strict_encode<E: io::Write>(&self, mut e: E) -> Result<usize, Error> {
            let mut len = encode_len(self.len(), &mut e)?;
            for item in self {
                len += item.strict_encode(&mut e)?;
            }
            Ok(len)
        }
    }

    impl<T> StrictDecode for Vec<T>
    where
        T: StrictDecode,
    {
        fn strict_decode<D: io::Read>(mut d: D) -> Result<Self, Error> {
            let len = decode_len(&mut d)?;
            let mut data = Vec::<T>::with_capacity(len.min(u8::MAX as usize));
            for _ in 0..len {
                data.push(T::strict_decode(&mut d)?);
            }
            Ok(data)
        }
    }

    impl<const LEN: usize> StrictEncode for [u8; LEN] {
        #[inline]
        fn strict_encode<E: io::Write>(&self, mut e: E) -> Result<usize, Error> {
            e.write_all(self)?;
            Ok(LEN)
        }
    }

    impl<const LEN: usize> StrictDecode for [u8; LEN] {
        #[inline]
        fn strict_decode<D: io::Read>(mut d: D) -> Result<Self, Error> {
            let mut buf = [0u8; LEN];
            d.read_exact(&mut buf)?;
            Ok(buf)
        }
    }

    impl StrictEncode for &str {
        fn strict_encode<E: io::Write>(&self, e: E) -> Result<usize, Error> {
            encode_bytes(self.as_bytes(), e)
        }
    }

    impl StrictEncode for String {
        fn strict_encode<E: io::Write>(&self, e: E) -> Result<usize, Error> {
            self.as_str().strict_encode(e)
        }
    }

    impl StrictDecode for String {
        fn strict_decode<D: io::Read>(d: D) -> Result<Self, Error> {
            Ok(String::from_utf8(decode_bytes(d)?)?)
        }
    }
}
