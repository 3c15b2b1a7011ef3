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

//! Named call arguments of a deploy.
//!
//! Arguments received as JSON are kept in their raw form (type and hex of
//! the value bytes) and decoded only when their value is requested, so the
//! bytes entering the deploy body hash are exactly the received ones.

use std::io;
use std::sync::OnceLock;

use crate::cl_type::CLType;
use crate::cl_value::{CLValue, RawCLValue};
use crate::key::{blake2b256, Hash};
use crate::strict_encoding::{self, StrictDecode, StrictEncode};

#[derive(Clone, PartialEq, Eq, Hash, Debug, Display, From, Error)]
#[display(doc_comments)]
pub enum Error {
    /// argument `{0}` is not present
    ArgumentNotFound(String),

    /// invalid argument value: {0}
    #[from]
    Value(strict_encoding::Error),

    /// malformed JSON arguments: {0}
    Json(String),
}

#[derive(Clone, Debug)]
enum Source {
    Live(CLValue),
    Raw {
        raw: RawCLValue,
        decoded: OnceLock<CLValue>,
    },
}

/// Argument value, either constructed in place or received in the raw form
#[derive(Clone, Debug)]
pub struct Argument(Source);

impl Argument {
    #[inline]
    pub fn new(value: CLValue) -> Self {
        Argument(Source::Live(value))
    }

    #[inline]
    pub fn from_raw(raw: RawCLValue) -> Self {
        Argument(Source::Raw {
            raw,
            decoded: OnceLock::new(),
        })
    }

    /// Value of the argument. Raw arguments are decoded on the first call
    /// and the result is cached.
    pub fn value(&self) -> Result<&CLValue, Error> {
        match &self.0 {
            Source::Live(value) => Ok(value),
            Source::Raw { raw, decoded } => {
                if let Some(value) = decoded.get() {
                    return Ok(value);
                }
                let value = raw.decode()?;
                log::debug!("materialized raw argument of type {}", raw.cl_type);
                Ok(decoded.get_or_init(|| value))
            }
        }
    }

    pub fn cl_type(&self) -> CLType {
        match &self.0 {
            Source::Live(value) => value.cl_type(),
            Source::Raw { raw, .. } => raw.cl_type.clone(),
        }
    }

    /// Whether the value is available without decoding
    pub fn is_materialized(&self) -> bool {
        match &self.0 {
            Source::Live(_) => true,
            Source::Raw { decoded, .. } => decoded.get().is_some(),
        }
    }

    pub fn to_raw(&self) -> Result<RawCLValue, Error> {
        Ok(match &self.0 {
            Source::Live(value) => value.to_raw()?,
            Source::Raw { raw, .. } => raw.clone(),
        })
    }
}

impl From<CLValue> for Argument {
    #[inline]
    fn from(value: CLValue) -> Self {
        Argument::new(value)
    }
}

/// Arguments are equal if they have the same type and value bytes
impl PartialEq for Argument {
    fn eq(&self, other: &Self) -> bool {
        match (self.strict_serialize(), other.strict_serialize()) {
            (Ok(a), Ok(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Argument {}

impl StrictEncode for Argument {
    fn strict_encode<E: io::Write>(&self, e: E) -> Result<usize, strict_encoding::Error> {
        match &self.0 {
            Source::Live(value) => value.strict_encode(e),
            Source::Raw { raw, .. } => raw.strict_encode(e),
        }
    }
}

impl StrictDecode for Argument {
    #[inline]
    fn strict_decode<D: io::Read>(d: D) -> Result<Self, strict_encoding::Error> {
        Ok(Argument::new(CLValue::strict_decode(d)?))
    }
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct NamedArg {
    pub name: String,
    pub argument: Argument,
}

impl NamedArg {
    pub fn new(name: impl ToString, argument: impl Into<Argument>) -> Self {
        NamedArg {
            name: name.to_string(),
            argument: argument.into(),
        }
    }
}

impl StrictEncode for NamedArg {
    fn strict_encode<E: io::Write>(&self, mut e: E) -> Result<usize, strict_encoding::Error> {
        Ok(strict_encode_list!(e; self.name, self.argument))
    }
}

impl StrictDecode for NamedArg {
    fn strict_decode<D: io::Read>(mut d: D) -> Result<Self, strict_encoding::Error> {
        Ok(NamedArg {
            name: String::strict_decode(&mut d)?,
            argument: Argument::strict_decode(&mut d)?,
        })
    }
}

/// Ordered list of named arguments. Names are not required to be unique;
/// lookup returns the first match.
#[derive(Wrapper, Clone, PartialEq, Eq, Default, Debug, From)]
#[wrapper(Deref)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate", transparent)
)]
pub struct Args(Vec<NamedArg>);

impl Args {
    #[inline]
    pub fn new() -> Self {
        Args::default()
    }

    pub fn add_argument(
        &mut self,
        name: impl ToString,
        value: impl Into<Argument>,
    ) -> &mut Self {
        self.0.push(NamedArg::new(name, value));
        self
    }

    #[inline]
    pub fn with_argument(mut self, name: impl ToString, value: impl Into<Argument>) -> Self {
        self.add_argument(name, value);
        self
    }

    pub fn find(&self, name: &str) -> Result<&Argument, Error> {
        self.0
            .iter()
            .find(|arg| arg.name == name)
            .map(|arg| &arg.argument)
            .ok_or_else(|| Error::ArgumentNotFound(name.to_owned()))
    }

    #[inline]
    pub fn bytes(&self) -> Result<Vec<u8>, Error> {
        Ok(self.strict_serialize()?)
    }

    /// Parses `[[name, {cl_type, bytes, parsed?}], ...]` keeping the values
    /// raw
    #[cfg(feature = "serde")]
    pub fn from_raw_json(json: &str) -> Result<Args, Error> {
        serde_json::from_str(json).map_err(|err| Error::Json(err.to_string()))
    }
}

impl StrictEncode for Args {
    #[inline]
    fn strict_encode<E: io::Write>(&self, e: E) -> Result<usize, strict_encoding::Error> {
        self.0.strict_encode(e)
    }
}

impl StrictDecode for Args {
    #[inline]
    fn strict_decode<D: io::Read>(d: D) -> Result<Self, strict_encoding::Error> {
        Ok(Args(Vec::strict_decode(d)?))
    }
}

/// Deploy body hash: Blake2b-256 over the payment arguments bytes followed
/// by the session arguments bytes
pub fn body_hash(payment: &Args, session: &Args) -> Result<Hash, Error> {
    let mut data = payment.bytes()?;
    data.extend(session.bytes()?);
    Ok(blake2b256(data))
}

#[cfg(feature = "serde")]
mod _serde {
    use serde_crate::de::Error as _;
    use serde_crate::ser::Error as _;
    use serde_crate::{Deserialize, Deserializer, Serialize, Serializer};

    use super::*;

    impl Serialize for Argument {
        fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            self.to_raw()
                .map_err(S::Error::custom)?
                .serialize(serializer)
        }
    }

    impl<'de> Deserialize<'de> for Argument {
        #[inline]
        fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
        where
            D: Deserializer<'de>,
        {
            RawCLValue::deserialize(deserializer).map(Argument::from_raw)
        }
    }

    impl Serialize for NamedArg {
        #[inline]
        fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            (&self.name, &self.argument).serialize(serializer)
        }
    }

    impl<'de> Deserialize<'de> for NamedArg {
        fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
        where
            D: Deserializer<'de>,
        {
            let (name, argument) = <(String, Argument)>::deserialize(deserializer)?;
            if name.is_empty() {
                return Err(D::Error::custom("empty argument name"));
            }
            Ok(NamedArg { name, argument })
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::test_helpers::{hex, test_suite_hex};
    use crate::uint::U512;

    fn session() -> Args {
        Args::new().with_argument("test", CLValue::Bool(true))
    }

    fn payment() -> Args {
        let mut args = Args::new();
        args.add_argument("amount", CLValue::U512(U512::from(1_000_000_000u64)));
        args
    }

    #[test]
    fn test_args_bytes() {
        assert_eq!(session().bytes().unwrap(), hex("010000000400000074657374010000000100"));
        test_suite_hex(&session(), "010000000400000074657374010000000100");
        test_suite_hex(
            &payment(),
            "0100000006000000616d6f756e74050000000400ca9a3b08",
        );
        test_suite_hex(&Args::new(), "00000000");
    }

    #[test]
    fn test_find() {
        let args = session().with_argument("test", CLValue::Bool(false));
        assert_eq!(args.len(), 2);
        assert_eq!(args.find("test").unwrap().value().unwrap(), &CLValue::Bool(true));
        assert_eq!(
            args.find("amount"),
            Err(Error::ArgumentNotFound(s!("amount")))
        );
    }

    #[test]
    fn test_body_hash() {
        assert_eq!(
            body_hash(&payment(), &session()).unwrap(),
            Hash::from_hex("36f6117151f0237ced7748d6c6578819aa6a3f63724b48a6fe175dcb052a527f")
                .unwrap()
        );
        assert_eq!(
            body_hash(&payment(), &Args::new()).unwrap(),
            blake2b256(hex("0100000006000000616d6f756e74050000000400ca9a3b0800000000"))
        );
    }

    #[test]
    fn test_raw_argument() {
        let raw = Argument::from_raw(RawCLValue::new(CLType::U8, hex("0102")));
        assert!(!raw.is_materialized());
        assert_eq!(raw.cl_type(), CLType::U8);
        // malformed value bytes are kept as received
        assert_eq!(raw.strict_serialize().unwrap(), hex("02000000010203"));
        assert_eq!(
            raw.value(),
            Err(Error::Value(strict_encoding::Error::DataNotEntirelyConsumed))
        );
        assert!(!raw.is_materialized());

        let raw = Argument::from_raw(RawCLValue::new(CLType::U8, hex("07")));
        assert_eq!(raw, Argument::new(CLValue::U8(7)));
        assert_eq!(raw.value().unwrap(), &CLValue::U8(7));
        assert!(raw.is_materialized());
    }

    #[test]
    #[cfg(feature = "serde")]
    fn test_raw_json() {
        let json = r#"[
            ["amount", {"cl_type": "U512", "bytes": "0400ca9a3b", "parsed": "1000000000"}]
        ]"#;
        let args = Args::from_raw_json(json).unwrap();
        let amount = args.find("amount").unwrap();
        assert!(!amount.is_materialized());
        assert_eq!(args.bytes().unwrap(), payment().bytes().unwrap());
        assert!(!amount.is_materialized());
        assert_eq!(
            amount.value().unwrap(),
            &CLValue::U512(U512::from(1_000_000_000u64))
        );
        assert_eq!(args, payment());

        let echoed = serde_json::to_value(&session()).unwrap();
        assert_eq!(
            echoed,
            serde_json::json!([["test", {"cl_type": "Bool", "bytes": "01", "parsed": true}]])
        );

        assert!(matches!(Args::from_raw_json("{}"), Err(Error::Json(_))));
        assert!(matches!(
            Args::from_raw_json(r#"[["", {"cl_type": "Bool", "bytes": "01"}]]"#),
            Err(Error::Json(_))
        ));
    }
}
