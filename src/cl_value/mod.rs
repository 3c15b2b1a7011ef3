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

//! Typed values: a closed union of payloads, each of them consistent with
//! its [`CLType`].
//!
//! Value bytes never include the type; the self-describing form (envelope)
//! is `u32 value length ‖ value bytes ‖ type bytes`, where the end of the
//! type is defined by the CLType grammar. [`StrictEncode`] and
//! [`StrictDecode`] of a [`CLValue`] operate on the envelope.

mod composite;
#[cfg(feature = "serde")]
mod json;
mod map;

pub use composite::{DynamicValue, ListValue, OptionValue, ResultValue};
pub use map::Map;

use std::fmt::{self, Display, Formatter};
use std::io;

use amplify::hex::ToHex;
#[cfg(feature = "serde")]
use serde_with::{hex::Hex, As};

use crate::cl_type::CLType;
use crate::key::{Key, PublicKey, URef};
use crate::strict_encoding::{
    self, decode_bytes, decode_len, encode_bytes, encode_len, read_exact_vec, StrictDecode,
    StrictEncode,
};
use crate::uint::{U128, U256, U512};

/// Errors constructing composite values
#[derive(Clone, PartialEq, Eq, Hash, Debug, Display, From, Error)]
#[display(doc_comments)]
pub enum Error {
    /// value of type {found} can't be used where {expected} is expected
    TypeMismatch { expected: CLType, found: CLType },

    /// map already contains key `{0}`
    DuplicateKey(String),

    /// value can't be encoded or decoded: {0}
    #[from]
    Encoding(strict_encoding::Error),
}

/// Value of one of the CLTypes
#[derive(Clone, PartialEq, Eq, Hash, Debug, From)]
pub enum CLValue {
    #[from]
    Bool(bool),
    #[from]
    I32(i32),
    #[from]
    I64(i64),
    #[from]
    U8(u8),
    #[from]
    U32(u32),
    #[from]
    U64(u64),
    #[from]
    U128(U128),
    #[from]
    U256(U256),
    #[from]
    U512(U512),
    Unit,
    #[from]
    String(String),
    #[from]
    Key(Key),
    #[from]
    URef(URef),
    #[from]
    PublicKey(PublicKey),
    #[from]
    Option(OptionValue),
    #[from]
    List(ListValue),
    /// Fixed-size byte array; the size is a part of the type
    ByteArray(Vec<u8>),
    #[from]
    Result(ResultValue),
    #[from]
    Map(Map),
    Tuple1(Box<CLValue>),
    Tuple2(Box<CLValue>, Box<CLValue>),
    Tuple3(Box<CLValue>, Box<CLValue>, Box<CLValue>),
    /// Opaque bytes of the `Any` type
    Any(Vec<u8>),
    #[from]
    Dynamic(DynamicValue),
}

impl From<&str> for CLValue {
    #[inline]
    fn from(s: &str) -> Self {
        CLValue::String(s.to_owned())
    }
}

impl CLValue {
    /// Maximum number of list items which may be decoded without consuming
    /// any input
    pub const MAX_EMPTY_ITEMS: usize = u16::MAX as usize;

    #[inline]
    pub fn some(value: CLValue) -> CLValue {
        CLValue::Option(OptionValue::some(value))
    }

    #[inline]
    pub fn none(inner_type: CLType) -> CLValue {
        CLValue::Option(OptionValue::none(inner_type))
    }

    #[inline]
    pub fn list(element_type: CLType, items: Vec<CLValue>) -> Result<CLValue, Error> {
        ListValue::new(element_type, items).map(CLValue::List)
    }

    #[inline]
    pub fn result_ok(value: CLValue) -> CLValue {
        CLValue::Result(ResultValue::ok(value))
    }

    #[inline]
    pub fn result_err(value: CLValue) -> CLValue {
        CLValue::Result(ResultValue::err(value))
    }

    /// Fixed-size byte array, which size must fit into `u32`
    pub fn byte_array(bytes: impl Into<Vec<u8>>) -> Result<CLValue, Error> {
        let bytes = bytes.into();
        byte_array_size(bytes.len())?;
        Ok(CLValue::ByteArray(bytes))
    }

    #[inline]
    pub fn tuple1(first: CLValue) -> CLValue {
        CLValue::Tuple1(Box::new(first))
    }

    #[inline]
    pub fn tuple2(first: CLValue, second: CLValue) -> CLValue {
        CLValue::Tuple2(Box::new(first), Box::new(second))
    }

    #[inline]
    pub fn tuple3(first: CLValue, second: CLValue, third: CLValue) -> CLValue {
        CLValue::Tuple3(Box::new(first), Box::new(second), Box::new(third))
    }

    /// Type of the value
    pub fn cl_type(&self) -> CLType {
        match self {
            CLValue::Bool(_) => CLType::Bool,
            CLValue::I32(_) => CLType::I32,
            CLValue::I64(_) => CLType::I64,
            CLValue::U8(_) => CLType::U8,
            CLValue::U32(_) => CLType::U32,
            CLValue::U64(_) => CLType::U64,
            CLValue::U128(_) => CLType::U128,
            CLValue::U256(_) => CLType::U256,
            CLValue::U512(_) => CLType::U512,
            CLValue::Unit => CLType::Unit,
            CLValue::String(_) => CLType::String,
            CLValue::Key(_) => CLType::Key,
            CLValue::URef(_) => CLType::URef,
            CLValue::PublicKey(_) => CLType::PublicKey,
            CLValue::Option(option) => CLType::option(option.inner_type().clone()),
            CLValue::List(list) => CLType::list(list.element_type().clone()),
            // oversized arrays can't be encoded, see `byte_array_size`
            CLValue::ByteArray(bytes) => {
                CLType::ByteArray(byte_array_size(bytes.len()).unwrap_or(u32::MAX))
            }
            CLValue::Result(result) => CLType::result(result.inner_type()),
            CLValue::Map(map) => CLType::map(map.key_type().clone(), map.value_type().clone()),
            CLValue::Tuple1(first) => CLType::tuple1(first.cl_type()),
            CLValue::Tuple2(first, second) => CLType::tuple2(first.cl_type(), second.cl_type()),
            CLValue::Tuple3(first, second, third) => {
                CLType::tuple3(first.cl_type(), second.cl_type(), third.cl_type())
            }
            CLValue::Any(_) => CLType::Any,
            CLValue::Dynamic(dynamic) => CLType::dynamic(dynamic.inner_type().clone()),
        }
    }

    /// Value bytes, without the type
    pub fn bytes(&self) -> Result<Vec<u8>, strict_encoding::Error> {
        let mut data = vec![];
        self.encode_into(&mut data)?;
        Ok(data)
    }

    /// Self-describing envelope: `u32 length ‖ value bytes ‖ type bytes`
    #[inline]
    pub fn to_bytes_with_type(&self) -> Result<Vec<u8>, strict_encoding::Error> {
        self.strict_serialize()
    }

    /// Parses self-describing envelope, failing on any residual data
    #[inline]
    pub fn from_bytes_with_type(data: impl AsRef<[u8]>) -> Result<CLValue, strict_encoding::Error> {
        CLValue::strict_deserialize(data)
    }

    /// Decodes value bytes under the given type. Fails if the data are not
    /// consumed entirely.
    pub fn from_bytes_by_type(
        data: impl AsRef<[u8]>,
        cl_type: &CLType,
    ) -> Result<CLValue, strict_encoding::Error> {
        let data = data.as_ref();
        log::trace!("decoding {} bytes of {} value", data.len(), cl_type);
        let mut cursor = io::Cursor::new(data);
        let value = CLValue::decode_from(&mut cursor, cl_type)?;
        if cursor.position() as usize != data.len() {
            return Err(strict_encoding::Error::DataNotEntirelyConsumed);
        }
        Ok(value)
    }

    /// Decodes value under the given type from a reader. Values of `Any` and
    /// dynamic types consume all the remaining data.
    #[inline]
    pub fn strict_decode_typed<D: io::Read>(
        mut d: D,
        cl_type: &CLType,
    ) -> Result<CLValue, strict_encoding::Error> {
        CLValue::decode_from(&mut d, cl_type)
    }

    /// Value together with its type, in the form used by JSON
    pub fn to_raw(&self) -> Result<RawCLValue, strict_encoding::Error> {
        Ok(RawCLValue {
            cl_type: self.cl_type(),
            bytes: self.bytes()?,
            #[cfg(feature = "serde")]
            parsed: Some(self.to_parsed_json()),
        })
    }

    fn encode_into(&self, e: &mut dyn io::Write) -> Result<usize, strict_encoding::Error> {
        Ok(match self {
            CLValue::Bool(val) => val.strict_encode(&mut *e)?,
            CLValue::I32(val) => val.strict_encode(&mut *e)?,
            CLValue::I64(val) => val.strict_encode(&mut *e)?,
            CLValue::U8(val) => val.strict_encode(&mut *e)?,
            CLValue::U32(val) => val.strict_encode(&mut *e)?,
            CLValue::U64(val) => val.strict_encode(&mut *e)?,
            CLValue::U128(val) => val.strict_encode(&mut *e)?,
            CLValue::U256(val) => val.strict_encode(&mut *e)?,
            CLValue::U512(val) => val.strict_encode(&mut *e)?,
            CLValue::Unit => 0,
            CLValue::String(val) => val.strict_encode(&mut *e)?,
            CLValue::Key(key) => key.strict_encode(&mut *e)?,
            CLValue::URef(uref) => uref.strict_encode(&mut *e)?,
            CLValue::PublicKey(pubkey) => pubkey.strict_encode(&mut *e)?,
            CLValue::Option(option) => match option.value() {
                None => 0u8.strict_encode(&mut *e)?,
                Some(value) => 1u8.strict_encode(&mut *e)? + value.encode_into(e)?,
            },
            CLValue::List(list) => {
                let mut len = encode_len(list.len(), &mut *e)?;
                for item in list.items() {
                    len += item.encode_into(e)?;
                }
                len
            }
            CLValue::ByteArray(bytes) => {
                byte_array_size(bytes.len())?;
                e.write_all(bytes)?;
                bytes.len()
            }
            CLValue::Any(bytes) => {
                e.write_all(bytes)?;
                bytes.len()
            }
            CLValue::Result(result) => {
                (result.is_ok() as u8).strict_encode(&mut *e)? + result.value().encode_into(e)?
            }
            CLValue::Map(map) => {
                let mut len = encode_len(map.len(), &mut *e)?;
                for (key, value) in map.iter() {
                    len += key.encode_into(e)?;
                    len += value.encode_into(e)?;
                }
                len
            }
            CLValue::Tuple1(first) => first.encode_into(e)?,
            CLValue::Tuple2(first, second) => first.encode_into(e)? + second.encode_into(e)?,
            CLValue::Tuple3(first, second, third) => {
                first.encode_into(e)? + second.encode_into(e)? + third.encode_into(e)?
            }
            CLValue::Dynamic(dynamic) => {
                e.write_all(dynamic.bytes())?;
                dynamic.bytes().len()
            }
        })
    }

    fn decode_from(
        d: &mut dyn io::Read,
        cl_type: &CLType,
    ) -> Result<CLValue, strict_encoding::Error> {
        Ok(match cl_type {
            CLType::Bool => CLValue::Bool(bool::strict_decode(&mut *d)?),
            CLType::I32 => CLValue::I32(i32::strict_decode(&mut *d)?),
            CLType::I64 => CLValue::I64(i64::strict_decode(&mut *d)?),
            CLType::U8 => CLValue::U8(u8::strict_decode(&mut *d)?),
            CLType::U32 => CLValue::U32(u32::strict_decode(&mut *d)?),
            CLType::U64 => CLValue::U64(u64::strict_decode(&mut *d)?),
            CLType::U128 => CLValue::U128(U128::strict_decode(&mut *d)?),
            CLType::U256 => CLValue::U256(U256::strict_decode(&mut *d)?),
            CLType::U512 => CLValue::U512(U512::strict_decode(&mut *d)?),
            CLType::Unit => CLValue::Unit,
            CLType::String => CLValue::String(String::strict_decode(&mut *d)?),
            CLType::Key => CLValue::Key(Key::strict_decode(&mut *d)?),
            CLType::URef => CLValue::URef(URef::strict_decode(&mut *d)?),
            CLType::PublicKey => CLValue::PublicKey(PublicKey::strict_decode(&mut *d)?),
            CLType::Option(inner) => match u8::strict_decode(&mut *d)? {
                0 => CLValue::none(inner.as_ref().clone()),
                1 => CLValue::some(CLValue::decode_from(d, inner)?),
                invalid => return Err(strict_encoding::Error::WrongOptionalEncoding(invalid)),
            },
            CLType::List(element) => {
                let count = decode_len(&mut *d)?;
                if count > CLValue::MAX_EMPTY_ITEMS && element.may_be_empty() {
                    return Err(strict_encoding::Error::DataIntegrityError(format!(
                        "list of {} items of zero-sized type {}",
                        count, element
                    )));
                }
                let mut items = Vec::with_capacity(count.min(u8::MAX as usize));
                if let CLType::ByteArray(size) = element.as_ref() {
                    for _ in 0..count {
                        items.push(CLValue::ByteArray(read_exact_vec(&mut *d, *size as usize)?));
                    }
                } else {
                    for _ in 0..count {
                        items.push(CLValue::decode_from(d, element)?);
                    }
                }
                CLValue::List(ListValue::with_decoded(element.as_ref().clone(), items))
            }
            CLType::ByteArray(size) => CLValue::ByteArray(read_exact_vec(&mut *d, *size as usize)?),
            CLType::Result(inner) => {
                let is_ok = match u8::strict_decode(&mut *d)? {
                    0 => false,
                    1 => true,
                    invalid => {
                        return Err(strict_encoding::Error::ValueOutOfRange(
                            "Result variant",
                            0..2,
                            invalid as u128,
                        ))
                    }
                };
                let value = CLValue::decode_from(d, inner)?;
                match is_ok {
                    true => CLValue::result_ok(value),
                    false => CLValue::result_err(value),
                }
            }
            CLType::Map { key, value } => {
                let count = decode_len(&mut *d)?;
                let mut map = Map::new(key.as_ref().clone(), value.as_ref().clone());
                for _ in 0..count {
                    let k = CLValue::decode_from(d, key)?;
                    let v = CLValue::decode_from(d, value)?;
                    map.append(k, v).map_err(|err| {
                        strict_encoding::Error::DataIntegrityError(err.to_string())
                    })?;
                }
                CLValue::Map(map)
            }
            CLType::Tuple1(first) => CLValue::tuple1(CLValue::decode_from(d, first)?),
            CLType::Tuple2(first, second) => {
                let first = CLValue::decode_from(d, first)?;
                CLValue::tuple2(first, CLValue::decode_from(d, second)?)
            }
            CLType::Tuple3(first, second, third) => {
                let first = CLValue::decode_from(d, first)?;
                let second = CLValue::decode_from(d, second)?;
                CLValue::tuple3(first, second, CLValue::decode_from(d, third)?)
            }
            CLType::Any => {
                let mut bytes = vec![];
                d.read_to_end(&mut bytes)?;
                CLValue::Any(bytes)
            }
            CLType::Dynamic(inner) => {
                let mut bytes = vec![];
                d.read_to_end(&mut bytes)?;
                CLValue::Dynamic(DynamicValue::new(inner.as_ref().clone(), bytes))
            }
        })
    }
}

/// Size of a byte array as declared by its type
fn byte_array_size(len: usize) -> Result<u32, strict_encoding::Error> {
    u32::try_from(len).map_err(|_| strict_encoding::Error::ExceedMaxItems(len))
}

impl StrictEncode for CLValue {
    fn strict_encode<E: io::Write>(&self, mut e: E) -> Result<usize, strict_encoding::Error> {
        let len = encode_bytes(&self.bytes()?, &mut e)?;
        Ok(len + self.cl_type().strict_encode(&mut e)?)
    }
}

impl StrictDecode for CLValue {
    fn strict_decode<D: io::Read>(mut d: D) -> Result<Self, strict_encoding::Error> {
        let bytes = decode_bytes(&mut d)?;
        let cl_type = CLType::strict_decode(&mut d)?;
        CLValue::from_bytes_by_type(bytes, &cl_type)
    }
}

fn fmt_list<'a>(
    f: &mut Formatter<'_>,
    open: &str,
    items: impl IntoIterator<Item = &'a CLValue>,
    close: &str,
) -> fmt::Result {
    f.write_str(open)?;
    for (no, item) in items.into_iter().enumerate() {
        if no > 0 {
            f.write_str(", ")?;
        }
        Display::fmt(item, f)?;
    }
    f.write_str(close)
}

/// Human-readable form, used for debugging and map key identity. It is not
/// a wire format.
impl Display for CLValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            CLValue::Bool(val) => Display::fmt(val, f),
            CLValue::I32(val) => Display::fmt(val, f),
            CLValue::I64(val) => Display::fmt(val, f),
            CLValue::U8(val) => Display::fmt(val, f),
            CLValue::U32(val) => Display::fmt(val, f),
            CLValue::U64(val) => Display::fmt(val, f),
            CLValue::U128(val) => Display::fmt(val, f),
            CLValue::U256(val) => Display::fmt(val, f),
            CLValue::U512(val) => Display::fmt(val, f),
            CLValue::Unit => f.write_str("()"),
            CLValue::String(val) => f.write_str(val),
            CLValue::Key(key) => Display::fmt(key, f),
            CLValue::URef(uref) => Display::fmt(uref, f),
            CLValue::PublicKey(pubkey) => Display::fmt(pubkey, f),
            CLValue::Option(option) => match option.value() {
                None => f.write_str("None"),
                Some(value) => write!(f, "Some({})", value),
            },
            CLValue::List(list) => fmt_list(f, "[", list.items(), "]"),
            CLValue::ByteArray(bytes) | CLValue::Any(bytes) => f.write_str(&bytes.to_hex()),
            CLValue::Result(result) if result.is_ok() => write!(f, "Ok({})", result.value()),
            CLValue::Result(result) => write!(f, "Err({})", result.value()),
            CLValue::Map(map) => {
                f.write_str("{")?;
                for (no, (key, value)) in map.iter().enumerate() {
                    if no > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}: {}", key, value)?;
                }
                f.write_str("}")
            }
            CLValue::Tuple1(first) => write!(f, "({},)", first),
            CLValue::Tuple2(first, second) => fmt_list(f, "(", [&**first, &**second], ")"),
            CLValue::Tuple3(first, second, third) => {
                fmt_list(f, "(", [&**first, &**second, &**third], ")")
            }
            CLValue::Dynamic(dynamic) => f.write_str(&dynamic.bytes().to_hex()),
        }
    }
}

/// Value in the JSON form: type, hex of the value bytes and an optional
/// structured echo of the value. Bytes are not decoded until requested.
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct RawCLValue {
    pub cl_type: CLType,

    #[cfg_attr(feature = "serde", serde(with = "As::<Hex>"))]
    pub bytes: Vec<u8>,

    /// Informational echo of the value, ignored by decoding
    #[cfg(feature = "serde")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parsed: Option<serde_json::Value>,
}

impl RawCLValue {
    pub fn new(cl_type: CLType, bytes: Vec<u8>) -> Self {
        RawCLValue {
            cl_type,
            bytes,
            #[cfg(feature = "serde")]
            parsed: None,
        }
    }

    /// Decodes the bytes under the declared type
    #[inline]
    pub fn decode(&self) -> Result<CLValue, strict_encoding::Error> {
        CLValue::from_bytes_by_type(&self.bytes, &self.cl_type)
    }
}

impl StrictEncode for RawCLValue {
    fn strict_encode<E: io::Write>(&self, mut e: E) -> Result<usize, strict_encoding::Error> {
        let len = encode_bytes(&self.bytes, &mut e)?;
        Ok(len + self.cl_type.strict_encode(&mut e)?)
    }
}

#[cfg(test)]
mod test {
    use std::str::FromStr;

    use super::*;
    use crate::key::{AccessRights, Hash};
    use crate::strict_encoding::strict_deserialize;
    use crate::test_helpers::hex;

    fn abc_map() -> Map {
        Map::new(CLType::String, CLType::I32)
            .with_entry(CLValue::from("ABC"), CLValue::I32(10))
            .unwrap()
    }

    fn samples() -> Vec<CLValue> {
        let hash = Hash::from([0x42; 32]);
        vec![
            CLValue::Bool(false),
            CLValue::I32(-10),
            CLValue::I64(i64::MAX),
            CLValue::U8(7),
            CLValue::U32(0xdead_beef),
            CLValue::U64(1),
            CLValue::U128(U128::from(1_000u64)),
            CLValue::U256(U256::zero()),
            CLValue::U512(U512::from(1_000_000_000u64)),
            CLValue::Unit,
            CLValue::from("hello"),
            CLValue::Key(Key::Hash(hash)),
            CLValue::URef(URef::new(hash, AccessRights::ReadAddWrite)),
            CLValue::PublicKey(PublicKey::Ed25519([1u8; 32])),
            CLValue::some(CLValue::U8(1)),
            CLValue::none(CLType::String),
            CLValue::list(CLType::U32, vec![CLValue::U32(1), CLValue::U32(2)]).unwrap(),
            CLValue::list(CLType::ByteArray(2), vec![
                CLValue::byte_array(vec![1, 2]).unwrap(),
                CLValue::byte_array(vec![3, 4]).unwrap(),
            ])
            .unwrap(),
            CLValue::list(CLType::Bool, vec![]).unwrap(),
            CLValue::byte_array([0xffu8; 32].to_vec()).unwrap(),
            CLValue::result_ok(CLValue::from("done")),
            CLValue::result_err(CLValue::U32(404)),
            CLValue::Map(abc_map()),
            CLValue::tuple1(CLValue::Bool(true)),
            CLValue::tuple2(CLValue::U8(1), CLValue::from("a")),
            CLValue::tuple3(CLValue::Unit, CLValue::I32(1), CLValue::none(CLType::Key)),
        ]
    }

    #[test]
    fn test_map_envelope_vector() {
        let value = CLValue::Map(abc_map());
        let envelope = value.to_bytes_with_type().unwrap();
        assert_eq!(envelope, hex("0f00000001000000030000004142430a000000110a01"));
        assert_eq!(CLValue::from_bytes_with_type(&envelope).unwrap(), value);
    }

    #[test]
    fn test_round_trips() {
        for value in samples() {
            let cl_type = value.cl_type();
            let bytes = value.bytes().unwrap();
            assert_eq!(CLValue::from_bytes_by_type(&bytes, &cl_type).unwrap(), value);

            let envelope = value.to_bytes_with_type().unwrap();
            assert_eq!(CLValue::from_bytes_with_type(&envelope).unwrap(), value);
            assert_eq!(&envelope[4..4 + bytes.len()], &bytes[..]);
            assert_eq!(&envelope[4 + bytes.len()..], &cl_type.strict_serialize().unwrap()[..]);
        }
    }

    #[test]
    fn test_value_bytes() {
        assert_eq!(CLValue::Bool(true).bytes().unwrap(), vec![0x01]);
        assert_eq!(CLValue::I32(10).bytes().unwrap(), hex("0a000000"));
        assert_eq!(CLValue::Unit.bytes().unwrap(), Vec::<u8>::new());
        assert_eq!(CLValue::from("ABC").bytes().unwrap(), hex("03000000414243"));
        assert_eq!(CLValue::some(CLValue::U8(5)).bytes().unwrap(), hex("0105"));
        assert_eq!(CLValue::none(CLType::U8).bytes().unwrap(), hex("00"));
        assert_eq!(CLValue::result_ok(CLValue::U8(5)).bytes().unwrap(), hex("0105"));
        assert_eq!(CLValue::result_err(CLValue::U8(5)).bytes().unwrap(), hex("0005"));
        assert_eq!(
            CLValue::tuple2(CLValue::U8(1), CLValue::Bool(true)).bytes().unwrap(),
            hex("0101")
        );
        // byte arrays are not length-prefixed
        assert_eq!(CLValue::byte_array(vec![9, 8]).unwrap().bytes().unwrap(), hex("0908"));
        assert_eq!(CLValue::U512(U512::from(0x0100u64)).bytes().unwrap(), hex("020001"));
    }

    #[test]
    fn test_types() {
        assert_eq!(
            CLValue::Map(abc_map()).cl_type(),
            CLType::map(CLType::String, CLType::I32)
        );
        assert_eq!(CLValue::none(CLType::Key).cl_type(), CLType::option(CLType::Key));
        assert_eq!(
            CLValue::byte_array(vec![0u8; 32]).unwrap().cl_type(),
            CLType::ByteArray(32)
        );
        assert_eq!(
            CLValue::result_err(CLValue::from("oops")).cl_type(),
            CLType::result(CLType::String)
        );
    }

    #[test]
    fn test_list_type_mismatch() {
        assert_eq!(
            CLValue::list(CLType::U8, vec![CLValue::U8(1), CLValue::Bool(true)]),
            Err(Error::TypeMismatch {
                expected: CLType::U8,
                found: CLType::Bool
            })
        );
    }

    #[test]
    fn test_zero_sized_list_items() {
        let units = CLValue::from_bytes_by_type(hex("03000000"), &CLType::list(CLType::Unit))
            .unwrap();
        assert_eq!(
            units,
            CLValue::list(CLType::Unit, vec![CLValue::Unit; 3]).unwrap()
        );

        let limit = (CLValue::MAX_EMPTY_ITEMS as u32).to_le_bytes();
        match CLValue::from_bytes_by_type(limit, &CLType::list(CLType::Unit)).unwrap() {
            CLValue::List(list) => assert_eq!(list.len(), CLValue::MAX_EMPTY_ITEMS),
            _ => panic!("list value expected"),
        }

        for element in [
            CLType::Unit,
            CLType::ByteArray(0),
            CLType::Any,
            CLType::tuple2(CLType::Unit, CLType::Unit),
        ] {
            assert!(matches!(
                CLValue::from_bytes_by_type(hex("ffffffff"), &CLType::list(element)),
                Err(strict_encoding::Error::DataIntegrityError(_))
            ));
        }
        // non-empty items are bounded by the input itself
        assert!(matches!(
            CLValue::from_bytes_by_type(hex("ffffffff01"), &CLType::list(CLType::U8)),
            Err(strict_encoding::Error::Io(_))
        ));
    }

    #[test]
    #[cfg(target_pointer_width = "64")]
    fn test_byte_array_size() {
        assert_eq!(byte_array_size(32), Ok(32));
        assert_eq!(byte_array_size(u32::MAX as usize), Ok(u32::MAX));
        assert_eq!(
            byte_array_size(u32::MAX as usize + 1),
            Err(strict_encoding::Error::ExceedMaxItems(u32::MAX as usize + 1))
        );
    }

    #[test]
    fn test_residual_data() {
        assert_eq!(
            CLValue::from_bytes_by_type([0x00u8], &CLType::Unit),
            Err(strict_encoding::Error::DataNotEntirelyConsumed)
        );
        assert_eq!(
            CLValue::from_bytes_by_type(hex("0a00000000"), &CLType::I32),
            Err(strict_encoding::Error::DataNotEntirelyConsumed)
        );
        let mut envelope = CLValue::Bool(true).to_bytes_with_type().unwrap();
        envelope.push(0x00);
        assert_eq!(
            CLValue::from_bytes_with_type(&envelope),
            Err(strict_encoding::Error::DataNotEntirelyConsumed)
        );
    }

    #[test]
    fn test_decode_failures() {
        assert_eq!(
            CLValue::from_bytes_by_type([0x02u8], &CLType::Bool),
            Err(strict_encoding::Error::ValueOutOfRange("boolean", 0..2, 2))
        );
        assert_eq!(
            CLValue::from_bytes_by_type([0x02u8, 0x05], &CLType::option(CLType::U8)),
            Err(strict_encoding::Error::WrongOptionalEncoding(2))
        );
        assert_eq!(
            CLValue::from_bytes_by_type([0x02u8, 0x05], &CLType::result(CLType::U8)),
            Err(strict_encoding::Error::ValueOutOfRange("Result variant", 0..2, 2))
        );
        assert!(matches!(
            CLValue::from_bytes_by_type([0x01u8, 0x02], &CLType::ByteArray(3)),
            Err(strict_encoding::Error::Io(_))
        ));
        // list claims more elements than present
        assert!(CLValue::from_bytes_by_type(hex("0500000001"), &CLType::list(CLType::U8)).is_err());
        // envelope with an unknown type tag
        assert!(strict_deserialize::<CLValue>(&hex("010000000130")).is_err());
    }

    #[test]
    fn test_duplicate_map_key_in_data() {
        let data = hex("02000000010000004101010000004102");
        let err = CLValue::from_bytes_by_type(&data, &CLType::map(CLType::String, CLType::U8))
            .unwrap_err();
        assert!(matches!(err, strict_encoding::Error::DataIntegrityError(_)));
    }

    #[test]
    fn test_any_and_dynamic_consume_rest() {
        let value = CLValue::from_bytes_by_type([1u8, 2, 3], &CLType::Any).unwrap();
        assert_eq!(value, CLValue::Any(vec![1, 2, 3]));
        assert_eq!(value.bytes().unwrap(), vec![1, 2, 3]);

        let ty = CLType::dynamic(CLType::U32);
        let value = CLValue::from_bytes_by_type(hex("2a000000"), &ty).unwrap();
        assert_eq!(value.cl_type(), ty);
        match &value {
            CLValue::Dynamic(dynamic) => assert_eq!(dynamic.resolve().unwrap(), CLValue::U32(42)),
            _ => panic!("dynamic value expected"),
        }
        // the envelope of a dynamic value carries its inner type
        assert_eq!(value.to_bytes_with_type().unwrap(), hex("040000002a00000004"));
        assert_eq!(
            CLValue::from_bytes_with_type(hex("040000002a00000004")).unwrap(),
            CLValue::U32(42)
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(CLValue::Map(abc_map()).to_string(), "{ABC: 10}");
        assert_eq!(
            CLValue::list(CLType::U8, vec![CLValue::U8(1), CLValue::U8(2)])
                .unwrap()
                .to_string(),
            "[1, 2]"
        );
        assert_eq!(CLValue::some(CLValue::Bool(true)).to_string(), "Some(true)");
        assert_eq!(CLValue::result_err(CLValue::from("x")).to_string(), "Err(x)");
        assert_eq!(CLValue::tuple2(CLValue::U8(1), CLValue::Unit).to_string(), "(1, ())");
        assert_eq!(CLValue::byte_array(vec![0xab]).unwrap().to_string(), "ab");
        assert_eq!(
            CLValue::Key(Key::from_str("era-5").unwrap()).to_string(),
            "era-5"
        );
    }

    #[test]
    fn test_raw_value() {
        let raw = RawCLValue::new(CLType::String, hex("03000000414243"));
        assert_eq!(raw.decode().unwrap(), CLValue::from("ABC"));
        assert_eq!(
            raw.strict_serialize().unwrap(),
            CLValue::from("ABC").to_bytes_with_type().unwrap()
        );
    }
}
