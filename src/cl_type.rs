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

//! CLType algebra: descriptors of the types of the values stored on-chain
//! and passed as call arguments.
//!
//! A type is either one of the simple (scalar) types, identified by a single
//! tag byte, or a composite type, encoded as its tag byte followed by the
//! encodings of the nested types in a tag-specific order:
//!
//! | type        | binary                                   | JSON                                  |
//! |-------------|------------------------------------------|---------------------------------------|
//! | simple      | `tag`                                    | `"Bool"`                              |
//! | `Option`    | `13 ‖ inner`                             | `{"Option": inner}`                   |
//! | `List`      | `14 ‖ element`                           | `{"List": element}`                   |
//! | `ByteArray` | `15 ‖ u32 size`                          | `{"ByteArray": size}`                 |
//! | `Result`    | `16 ‖ inner`                             | `{"Result": inner}`                   |
//! | `Map`       | `17 ‖ key ‖ value`                       | `{"Map": {"key": .., "value": ..}}`   |
//! | `TupleN`    | `18..=20 ‖ item_1 ‖ … ‖ item_n`          | `{"TupleN": [item_1, …, item_n]}`     |

use std::collections::HashMap;
use std::fmt::{self, Display, Formatter};
use std::io;

use num_derive::{FromPrimitive, ToPrimitive};
use num_traits::FromPrimitive;

use crate::strict_encoding::{self, StrictDecode, StrictEncode};

/// Tag bytes of the CLType binary grammar
#[derive(
    Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Display, ToPrimitive, FromPrimitive,
)]
#[display(Debug)]
#[repr(u8)]
pub enum TypeTag {
    Bool = 0,
    I32 = 1,
    I64 = 2,
    U8 = 3,
    U32 = 4,
    U64 = 5,
    U128 = 6,
    U256 = 7,
    U512 = 8,
    Unit = 9,
    String = 10,
    Key = 11,
    URef = 12,
    Option = 13,
    List = 14,
    ByteArray = 15,
    Result = 16,
    Map = 17,
    Tuple1 = 18,
    Tuple2 = 19,
    Tuple3 = 20,
    Any = 21,
    PublicKey = 22,
}

impl_enum_strict_encoding!(TypeTag);

/// CLType parsing errors
#[derive(Clone, PartialEq, Eq, Hash, Debug, Display, From, Error)]
#[display(doc_comments)]
pub enum Error {
    /// unknown CLType tag {0}
    InvalidTag(u8),

    /// `{0}` is not a registered CLType name
    UnregisteredName(String),

    /// invalid complex CLType shape: {0}
    InvalidComplexShape(String),

    /// CLType nesting exceeds the maximum depth of {0} levels
    ExceededRecursionDepth(u8),

    /// CLType binary data are invalid: {0}
    #[from]
    Encoding(strict_encoding::Error),
}

/// Type descriptor of a CLValue
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub enum CLType {
    Bool,
    I32,
    I64,
    U8,
    U32,
    U64,
    U128,
    U256,
    U512,
    Unit,
    String,
    Key,
    URef,
    PublicKey,
    Any,
    Option(Box<CLType>),
    List(Box<CLType>),
    /// Fixed-size byte array; the values are not length-prefixed
    ByteArray(u32),
    /// NB: the network encodes a single inner type for `Result`, which is
    /// used by both success and error variants of the value
    Result(Box<CLType>),
    Map {
        key: Box<CLType>,
        value: Box<CLType>,
    },
    Tuple1(Box<CLType>),
    Tuple2(Box<CLType>, Box<CLType>),
    Tuple3(Box<CLType>, Box<CLType>, Box<CLType>),
    /// Runtime-inferred type: encodes as the wrapped type, while values of
    /// this type are kept as opaque bytes
    Dynamic(Box<CLType>),
}

lazy_static! {
    static ref SIMPLE_TYPES: HashMap<&'static str, CLType> = {
        let mut m = HashMap::new();
        for ty in CLType::SIMPLE.iter() {
            m.insert(ty.name(), ty.clone());
        }
        m
    };
}

impl CLType {
    /// Maximum nesting of composite types accepted by the decoders
    pub const MAX_DEPTH: u8 = 50;

    /// All simple types, in the tag order
    pub const SIMPLE: [CLType; 15] = [
        CLType::Bool,
        CLType::I32,
        CLType::I64,
        CLType::U8,
        CLType::U32,
        CLType::U64,
        CLType::U128,
        CLType::U256,
        CLType::U512,
        CLType::Unit,
        CLType::String,
        CLType::Key,
        CLType::URef,
        CLType::Any,
        CLType::PublicKey,
    ];

    pub fn option(inner: CLType) -> CLType {
        CLType::Option(Box::new(inner))
    }

    pub fn list(element: CLType) -> CLType {
        CLType::List(Box::new(element))
    }

    pub fn result(inner: CLType) -> CLType {
        CLType::Result(Box::new(inner))
    }

    pub fn map(key: CLType, value: CLType) -> CLType {
        CLType::Map {
            key: Box::new(key),
            value: Box::new(value),
        }
    }

    pub fn tuple1(first: CLType) -> CLType {
        CLType::Tuple1(Box::new(first))
    }

    pub fn tuple2(first: CLType, second: CLType) -> CLType {
        CLType::Tuple2(Box::new(first), Box::new(second))
    }

    pub fn tuple3(first: CLType, second: CLType, third: CLType) -> CLType {
        CLType::Tuple3(Box::new(first), Box::new(second), Box::new(third))
    }

    pub fn dynamic(inner: CLType) -> CLType {
        CLType::Dynamic(Box::new(inner))
    }

    /// Decodes a single tag byte
    pub fn decode_tag(byte: u8) -> Result<TypeTag, Error> {
        TypeTag::from_u8(byte).ok_or(Error::InvalidTag(byte))
    }

    /// Constructs a simple type from its tag; returns `None` for the tags of
    /// composite types
    pub fn from_simple_tag(tag: TypeTag) -> Option<CLType> {
        Some(match tag {
            TypeTag::Bool => CLType::Bool,
            TypeTag::I32 => CLType::I32,
            TypeTag::I64 => CLType::I64,
            TypeTag::U8 => CLType::U8,
            TypeTag::U32 => CLType::U32,
            TypeTag::U64 => CLType::U64,
            TypeTag::U128 => CLType::U128,
            TypeTag::U256 => CLType::U256,
            TypeTag::U512 => CLType::U512,
            TypeTag::Unit => CLType::Unit,
            TypeTag::String => CLType::String,
            TypeTag::Key => CLType::Key,
            TypeTag::URef => CLType::URef,
            TypeTag::Any => CLType::Any,
            TypeTag::PublicKey => CLType::PublicKey,
            TypeTag::Option
            | TypeTag::List
            | TypeTag::ByteArray
            | TypeTag::Result
            | TypeTag::Map
            | TypeTag::Tuple1
            | TypeTag::Tuple2
            | TypeTag::Tuple3 => return None,
        })
    }

    /// Looks up simple type by its registered name
    pub fn from_name(name: &str) -> Result<CLType, Error> {
        SIMPLE_TYPES
            .get(name)
            .cloned()
            .ok_or_else(|| Error::UnregisteredName(name.to_owned()))
    }

    pub fn tag(&self) -> TypeTag {
        match self {
            CLType::Bool => TypeTag::Bool,
            CLType::I32 => TypeTag::I32,
            CLType::I64 => TypeTag::I64,
            CLType::U8 => TypeTag::U8,
            CLType::U32 => TypeTag::U32,
            CLType::U64 => TypeTag::U64,
            CLType::U128 => TypeTag::U128,
            CLType::U256 => TypeTag::U256,
            CLType::U512 => TypeTag::U512,
            CLType::Unit => TypeTag::Unit,
            CLType::String => TypeTag::String,
            CLType::Key => TypeTag::Key,
            CLType::URef => TypeTag::URef,
            CLType::PublicKey => TypeTag::PublicKey,
            CLType::Any => TypeTag::Any,
            CLType::Option(_) => TypeTag::Option,
            CLType::List(_) => TypeTag::List,
            CLType::ByteArray(_) => TypeTag::ByteArray,
            CLType::Result(_) => TypeTag::Result,
            CLType::Map { .. } => TypeTag::Map,
            CLType::Tuple1(_) => TypeTag::Tuple1,
            CLType::Tuple2(..) => TypeTag::Tuple2,
            CLType::Tuple3(..) => TypeTag::Tuple3,
            CLType::Dynamic(inner) => inner.tag(),
        }
    }

    /// Registered name of the type, used as a JSON string (for simple types)
    /// or as a JSON object key (for composite types)
    pub fn name(&self) -> &'static str {
        match self.tag() {
            TypeTag::Bool => "Bool",
            TypeTag::I32 => "I32",
            TypeTag::I64 => "I64",
            TypeTag::U8 => "U8",
            TypeTag::U32 => "U32",
            TypeTag::U64 => "U64",
            TypeTag::U128 => "U128",
            TypeTag::U256 => "U256",
            TypeTag::U512 => "U512",
            TypeTag::Unit => "Unit",
            TypeTag::String => "String",
            TypeTag::Key => "Key",
            TypeTag::URef => "URef",
            TypeTag::Option => "Option",
            TypeTag::List => "List",
            TypeTag::ByteArray => "ByteArray",
            TypeTag::Result => "Result",
            TypeTag::Map => "Map",
            TypeTag::Tuple1 => "Tuple1",
            TypeTag::Tuple2 => "Tuple2",
            TypeTag::Tuple3 => "Tuple3",
            TypeTag::Any => "Any",
            TypeTag::PublicKey => "PublicKey",
        }
    }

    #[inline]
    pub fn is_simple(&self) -> bool {
        CLType::from_simple_tag(self.tag()).is_some()
    }

    /// Strips all [`CLType::Dynamic`] wrappers
    pub fn resolved(&self) -> &CLType {
        match self {
            CLType::Dynamic(inner) => inner.resolved(),
            other => other,
        }
    }

    /// Checks whether a value of type `found` may be stored where a value of
    /// this type is expected; dynamic wrappers are transparent
    #[inline]
    pub fn accepts(&self, found: &CLType) -> bool {
        self.resolved() == found.resolved()
    }

    /// Whether a value of this type may be encoded with no bytes at all
    pub fn may_be_empty(&self) -> bool {
        match self {
            CLType::Unit | CLType::Any | CLType::ByteArray(0) => true,
            CLType::Tuple1(first) => first.may_be_empty(),
            CLType::Tuple2(first, second) => first.may_be_empty() && second.may_be_empty(),
            CLType::Tuple3(first, second, third) => {
                first.may_be_empty() && second.may_be_empty() && third.may_be_empty()
            }
            CLType::Dynamic(_) => true,
            _ => false,
        }
    }

    fn encode_into(&self, e: &mut dyn io::Write) -> Result<usize, strict_encoding::Error> {
        let tag = self.tag();
        Ok(match self {
            CLType::Option(inner) | CLType::List(inner) | CLType::Result(inner) => {
                tag.strict_encode(&mut *e)? + inner.encode_into(e)?
            }
            CLType::ByteArray(size) => tag.strict_encode(&mut *e)? + size.strict_encode(&mut *e)?,
            CLType::Map { key, value } => {
                tag.strict_encode(&mut *e)? + key.encode_into(e)? + value.encode_into(e)?
            }
            CLType::Tuple1(first) => tag.strict_encode(&mut *e)? + first.encode_into(e)?,
            CLType::Tuple2(first, second) => {
                tag.strict_encode(&mut *e)? + first.encode_into(e)? + second.encode_into(e)?
            }
            CLType::Tuple3(first, second, third) => {
                tag.strict_encode(&mut *e)?
                    + first.encode_into(e)?
                    + second.encode_into(e)?
                    + third.encode_into(e)?
            }
            CLType::Dynamic(inner) => inner.encode_into(e)?,
            _ => tag.strict_encode(&mut *e)?,
        })
    }

    fn decode_from(d: &mut dyn io::Read, depth: u8) -> Result<CLType, strict_encoding::Error> {
        if depth > CLType::MAX_DEPTH {
            return Err(strict_encoding::Error::ExceededRecursionDepth(CLType::MAX_DEPTH));
        }
        let tag = TypeTag::strict_decode(&mut *d)?;
        if let Some(simple) = CLType::from_simple_tag(tag) {
            return Ok(simple);
        }
        let depth = depth + 1;
        Ok(match tag {
            TypeTag::Option => CLType::option(CLType::decode_from(d, depth)?),
            TypeTag::List => CLType::list(CLType::decode_from(d, depth)?),
            TypeTag::Result => CLType::result(CLType::decode_from(d, depth)?),
            TypeTag::ByteArray => CLType::ByteArray(u32::strict_decode(&mut *d)?),
            TypeTag::Map => {
                let key = CLType::decode_from(d, depth)?;
                let value = CLType::decode_from(d, depth)?;
                CLType::map(key, value)
            }
            TypeTag::Tuple1 => CLType::tuple1(CLType::decode_from(d, depth)?),
            TypeTag::Tuple2 => {
                let first = CLType::decode_from(d, depth)?;
                CLType::tuple2(first, CLType::decode_from(d, depth)?)
            }
            TypeTag::Tuple3 => {
                let first = CLType::decode_from(d, depth)?;
                let second = CLType::decode_from(d, depth)?;
                CLType::tuple3(first, second, CLType::decode_from(d, depth)?)
            }
            simple => {
                return Err(strict_encoding::Error::DataIntegrityError(format!(
                    "simple type tag {} treated as a composite one",
                    simple
                )))
            }
        })
    }
}

impl StrictEncode for CLType {
    #[inline]
    fn strict_encode<E: io::Write>(&self, mut e: E) -> Result<usize, strict_encoding::Error> {
        self.encode_into(&mut e)
    }
}

impl StrictDecode for CLType {
    #[inline]
    fn strict_decode<D: io::Read>(mut d: D) -> Result<Self, strict_encoding::Error> {
        CLType::decode_from(&mut d, 0)
    }
}

impl Display for CLType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            CLType::Option(inner) | CLType::List(inner) | CLType::Result(inner) => {
                write!(f, "{}({})", self.name(), inner)
            }
            CLType::ByteArray(size) => write!(f, "ByteArray({})", size),
            CLType::Map { key, value } => write!(f, "Map({}, {})", key, value),
            CLType::Tuple1(first) => write!(f, "Tuple1({})", first),
            CLType::Tuple2(first, second) => write!(f, "Tuple2({}, {})", first, second),
            CLType::Tuple3(first, second, third) => {
                write!(f, "Tuple3({}, {}, {})", first, second, third)
            }
            CLType::Dynamic(inner) => Display::fmt(inner, f),
            simple => f.write_str(simple.name()),
        }
    }
}

#[cfg(feature = "serde")]
mod _serde {
    use serde_crate::de::Error as _;
    use serde_crate::ser::SerializeMap;
    use serde_crate::{Deserialize, Deserializer, Serialize, Serializer};
    use serde_json::Value;

    use super::*;

    #[derive(Serialize)]
    #[serde(crate = "serde_crate")]
    struct MapTypes<'a> {
        key: &'a CLType,
        value: &'a CLType,
    }

    impl CLType {
        /// Canonical JSON representation
        pub fn to_json(&self) -> Value {
            // Serialization of CLType into `serde_json::Value` never fails
            serde_json::to_value(self).unwrap_or(Value::Null)
        }

        /// Parses JSON representation: a bare string for simple types, or a
        /// single-key object for the composite ones
        pub fn from_json(value: &Value) -> Result<CLType, Error> {
            CLType::parse_json(value, 0)
        }

        fn parse_json(value: &Value, depth: u8) -> Result<CLType, Error> {
            if depth > CLType::MAX_DEPTH {
                return Err(Error::ExceededRecursionDepth(CLType::MAX_DEPTH));
            }
            let depth = depth + 1;
            let object = match value {
                Value::String(name) => return CLType::from_name(name),
                Value::Object(object) if object.len() == 1 => object,
                other => return Err(Error::InvalidComplexShape(other.to_string())),
            };
            let (name, inner) = object
                .iter()
                .next()
                .ok_or_else(|| Error::InvalidComplexShape(value.to_string()))?;
            let items = |count: usize| -> Result<Vec<CLType>, Error> {
                match inner {
                    Value::Array(items) if items.len() == count => items
                        .iter()
                        .map(|item| CLType::parse_json(item, depth))
                        .collect(),
                    _ => Err(Error::InvalidComplexShape(value.to_string())),
                }
            };
            Ok(match name.as_str() {
                "Option" => CLType::option(CLType::parse_json(inner, depth)?),
                "List" => CLType::list(CLType::parse_json(inner, depth)?),
                "Result" => CLType::result(CLType::parse_json(inner, depth)?),
                "ByteArray" => {
                    let size = inner
                        .as_u64()
                        .filter(|size| *size <= u32::MAX as u64)
                        .ok_or_else(|| Error::InvalidComplexShape(value.to_string()))?;
                    CLType::ByteArray(size as u32)
                }
                "Map" => match inner {
                    Value::Object(map) if map.len() == 2 => {
                        let key = map
                            .get("key")
                            .ok_or_else(|| Error::InvalidComplexShape(value.to_string()))?;
                        let val = map
                            .get("value")
                            .ok_or_else(|| Error::InvalidComplexShape(value.to_string()))?;
                        CLType::map(
                            CLType::parse_json(key, depth)?,
                            CLType::parse_json(val, depth)?,
                        )
                    }
                    _ => return Err(Error::InvalidComplexShape(value.to_string())),
                },
                "Tuple1" => {
                    let mut items = items(1)?.into_iter();
                    match items.next() {
                        Some(first) => CLType::tuple1(first),
                        None => return Err(Error::InvalidComplexShape(value.to_string())),
                    }
                }
                "Tuple2" => match &items(2)?[..] {
                    [first, second] => CLType::tuple2(first.clone(), second.clone()),
                    _ => return Err(Error::InvalidComplexShape(value.to_string())),
                },
                "Tuple3" => match &items(3)?[..] {
                    [first, second, third] => {
                        CLType::tuple3(first.clone(), second.clone(), third.clone())
                    }
                    _ => return Err(Error::InvalidComplexShape(value.to_string())),
                },
                other => return Err(Error::UnregisteredName(other.to_owned())),
            })
        }
    }

    impl Serialize for CLType {
        fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            match self {
                CLType::Option(inner) | CLType::List(inner) | CLType::Result(inner) => {
                    let mut map = serializer.serialize_map(Some(1))?;
                    map.serialize_entry(self.name(), inner)?;
                    map.end()
                }
                CLType::ByteArray(size) => {
                    let mut map = serializer.serialize_map(Some(1))?;
                    map.serialize_entry("ByteArray", size)?;
                    map.end()
                }
                CLType::Map { key, value } => {
                    let mut map = serializer.serialize_map(Some(1))?;
                    map.serialize_entry("Map", &MapTypes { key, value })?;
                    map.end()
                }
                CLType::Tuple1(first) => {
                    let mut map = serializer.serialize_map(Some(1))?;
                    map.serialize_entry("Tuple1", &[first])?;
                    map.end()
                }
                CLType::Tuple2(first, second) => {
                    let mut map = serializer.serialize_map(Some(1))?;
                    map.serialize_entry("Tuple2", &[first, second])?;
                    map.end()
                }
                CLType::Tuple3(first, second, third) => {
                    let mut map = serializer.serialize_map(Some(1))?;
                    map.serialize_entry("Tuple3", &[first, second, third])?;
                    map.end()
                }
                CLType::Dynamic(inner) => inner.serialize(serializer),
                simple => serializer.serialize_str(simple.name()),
            }
        }
    }

    impl<'de> Deserialize<'de> for CLType {
        fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
        where
            D: Deserializer<'de>,
        {
            let value = Value::deserialize(deserializer)?;
            CLType::from_json(&value).map_err(D::Error::custom)
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::strict_encoding::strict_deserialize;
    use crate::test_helpers::{hex, test_suite_hex};

    fn composite_samples() -> Vec<(CLType, &'static str)> {
        vec![
            (CLType::option(CLType::U8), "0d03"),
            (CLType::list(CLType::String), "0e0a"),
            (CLType::ByteArray(32), "0f20000000"),
            (CLType::result(CLType::Unit), "1009"),
            (CLType::map(CLType::String, CLType::I32), "110a01"),
            (CLType::tuple1(CLType::Key), "120b"),
            (CLType::tuple2(CLType::URef, CLType::U512), "130c08"),
            (CLType::tuple3(CLType::Bool, CLType::PublicKey, CLType::Any), "14001615"),
            (
                CLType::map(
                    CLType::list(CLType::ByteArray(4)),
                    CLType::option(CLType::tuple2(CLType::U64, CLType::I64)),
                ),
                "110e0f040000000d130502",
            ),
        ]
    }

    #[test]
    fn test_type_tag_exhaustive() {
        test_enum_u8_exhaustive!(TypeTag;
            TypeTag::Bool => 0, TypeTag::I32 => 1, TypeTag::I64 => 2,
            TypeTag::U8 => 3, TypeTag::U32 => 4, TypeTag::U64 => 5,
            TypeTag::U128 => 6, TypeTag::U256 => 7, TypeTag::U512 => 8,
            TypeTag::Unit => 9, TypeTag::String => 10, TypeTag::Key => 11,
            TypeTag::URef => 12, TypeTag::Option => 13, TypeTag::List => 14,
            TypeTag::ByteArray => 15, TypeTag::Result => 16, TypeTag::Map => 17,
            TypeTag::Tuple1 => 18, TypeTag::Tuple2 => 19, TypeTag::Tuple3 => 20,
            TypeTag::Any => 21, TypeTag::PublicKey => 22
        );
    }

    #[test]
    fn test_decode_tag() {
        assert_eq!(CLType::decode_tag(17), Ok(TypeTag::Map));
        assert_eq!(CLType::decode_tag(23), Err(Error::InvalidTag(23)));
    }

    #[test]
    fn test_simple_binary() {
        for (tag, ty) in CLType::SIMPLE.iter().enumerate() {
            let tag = if ty == &CLType::Any {
                21
            } else if ty == &CLType::PublicKey {
                22
            } else {
                tag as u8
            };
            assert_eq!(ty.strict_serialize().unwrap(), vec![tag]);
            assert_eq!(&CLType::strict_deserialize(&[tag]).unwrap(), ty);
            assert!(ty.is_simple());
        }
    }

    #[test]
    fn test_composite_binary() {
        for (ty, vector) in composite_samples() {
            test_suite_hex(&ty, vector);
            assert!(!ty.is_simple());
        }
    }

    #[test]
    fn test_truncated_binary() {
        // Map missing its value type
        assert!(strict_deserialize::<CLType>(&hex("110a")).is_err());
        // ByteArray with truncated size
        assert!(strict_deserialize::<CLType>(&hex("0f2000")).is_err());
        // Unknown tag
        assert_eq!(
            strict_deserialize::<CLType>(&[0x30]).unwrap_err(),
            strict_encoding::Error::EnumValueNotKnown(s!("TypeTag"), 0x30)
        );
    }

    #[test]
    fn test_recursion_depth() {
        let mut data = vec![0x0du8; CLType::MAX_DEPTH as usize + 2];
        data.push(0x00);
        assert_eq!(
            strict_deserialize::<CLType>(&data).unwrap_err(),
            strict_encoding::Error::ExceededRecursionDepth(CLType::MAX_DEPTH)
        );

        let mut data = vec![0x0du8; CLType::MAX_DEPTH as usize];
        data.push(0x00);
        assert!(strict_deserialize::<CLType>(&data).is_ok());
    }

    #[test]
    fn test_dynamic_encodes_transparently() {
        let ty = CLType::dynamic(CLType::list(CLType::U8));
        assert_eq!(ty.tag(), TypeTag::List);
        assert_eq!(ty.strict_serialize().unwrap(), hex("0e03"));
        assert_eq!(
            CLType::strict_deserialize(hex("0e03")).unwrap(),
            CLType::list(CLType::U8)
        );
        assert_eq!(ty.resolved(), &CLType::list(CLType::U8));
    }

    #[test]
    fn test_may_be_empty() {
        assert!(CLType::Unit.may_be_empty());
        assert!(CLType::ByteArray(0).may_be_empty());
        assert!(!CLType::ByteArray(1).may_be_empty());
        assert!(CLType::tuple2(CLType::Unit, CLType::Any).may_be_empty());
        assert!(!CLType::tuple2(CLType::Unit, CLType::U8).may_be_empty());
        assert!(!CLType::list(CLType::Unit).may_be_empty());
        assert!(!CLType::option(CLType::Unit).may_be_empty());
    }

    #[test]
    fn test_display() {
        assert_eq!(CLType::U512.to_string(), "U512");
        assert_eq!(
            CLType::map(CLType::String, CLType::option(CLType::I32)).to_string(),
            "Map(String, Option(I32))"
        );
        assert_eq!(CLType::ByteArray(32).to_string(), "ByteArray(32)");
    }

    #[test]
    fn test_from_name() {
        assert_eq!(CLType::from_name("PublicKey"), Ok(CLType::PublicKey));
        assert_eq!(
            CLType::from_name("bool"),
            Err(Error::UnregisteredName(s!("bool")))
        );
        assert_eq!(
            CLType::from_name("Option"),
            Err(Error::UnregisteredName(s!("Option")))
        );
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_json_round_trip() {
        for ty in CLType::SIMPLE.iter() {
            let json = serde_json::to_string(ty).unwrap();
            assert_eq!(json, format!("\"{}\"", ty.name()));
            assert_eq!(&serde_json::from_str::<CLType>(&json).unwrap(), ty);
        }
        for (ty, _) in composite_samples() {
            let json = serde_json::to_string(&ty).unwrap();
            assert_eq!(serde_json::from_str::<CLType>(&json).unwrap(), ty);
            assert_eq!(CLType::from_json(&ty.to_json()).unwrap(), ty);
        }
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_json_forms() {
        use serde_json::json;

        assert_eq!(CLType::option(CLType::U8).to_json(), json!({"Option": "U8"}));
        assert_eq!(CLType::ByteArray(32).to_json(), json!({"ByteArray": 32}));
        assert_eq!(
            CLType::map(CLType::String, CLType::list(CLType::Key)).to_json(),
            json!({"Map": {"key": "String", "value": {"List": "Key"}}})
        );
        assert_eq!(
            CLType::tuple3(CLType::U8, CLType::U32, CLType::U64).to_json(),
            json!({"Tuple3": ["U8", "U32", "U64"]})
        );
        assert_eq!(CLType::result(CLType::Unit).to_json(), json!({"Result": "Unit"}));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_json_failures() {
        use serde_json::json;

        assert_eq!(
            CLType::from_json(&json!("Int32")),
            Err(Error::UnregisteredName(s!("Int32")))
        );
        assert_eq!(
            CLType::from_json(&json!({"Vector": "U8"})),
            Err(Error::UnregisteredName(s!("Vector")))
        );
        assert!(matches!(
            CLType::from_json(&json!({"List": "U8", "Option": "U8"})),
            Err(Error::InvalidComplexShape(_))
        ));
        assert!(matches!(
            CLType::from_json(&json!({"Tuple2": ["U8"]})),
            Err(Error::InvalidComplexShape(_))
        ));
        assert!(matches!(
            CLType::from_json(&json!({"ByteArray": "32"})),
            Err(Error::InvalidComplexShape(_))
        ));
        assert!(matches!(
            CLType::from_json(&json!({"Map": {"key": "U8"}})),
            Err(Error::InvalidComplexShape(_))
        ));
        assert!(matches!(CLType::from_json(&json!(42)), Err(Error::InvalidComplexShape(_))));
    }
}
