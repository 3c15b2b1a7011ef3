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

//! JSON form of the values: `{"cl_type": …, "bytes": "<hex>", "parsed": …}`.
//! Only type and bytes are authoritative; the parsed echo is informational.

use amplify::hex::ToHex;
use serde_crate::de::Error as _;
use serde_crate::ser::Error as _;
use serde_crate::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{json, Value};

use super::{CLValue, RawCLValue};

impl CLValue {
    /// Structured JSON echo of the value.
    ///
    /// Numbers wider than 64 bits are emitted as decimal strings; keys,
    /// URefs and public keys use their textual form; byte arrays are hex.
    /// Opaque `Any` values have no structured form.
    pub fn to_parsed_json(&self) -> Value {
        match self {
            CLValue::Bool(val) => json!(val),
            CLValue::I32(val) => json!(val),
            CLValue::I64(val) => json!(val),
            CLValue::U8(val) => json!(val),
            CLValue::U32(val) => json!(val),
            CLValue::U64(val) => json!(val),
            CLValue::U128(val) => Value::String(val.to_string()),
            CLValue::U256(val) => Value::String(val.to_string()),
            CLValue::U512(val) => Value::String(val.to_string()),
            CLValue::Unit => Value::Null,
            CLValue::String(val) => Value::String(val.clone()),
            CLValue::Key(key) => Value::String(key.to_string()),
            CLValue::URef(uref) => Value::String(uref.to_string()),
            CLValue::PublicKey(pubkey) => Value::String(pubkey.to_hex()),
            CLValue::Option(option) => option
                .value()
                .map(CLValue::to_parsed_json)
                .unwrap_or(Value::Null),
            CLValue::List(list) => list.items().iter().map(CLValue::to_parsed_json).collect(),
            CLValue::ByteArray(bytes) => Value::String(bytes.to_hex()),
            CLValue::Any(_) => Value::Null,
            CLValue::Result(result) if result.is_ok() => {
                json!({ "Ok": result.value().to_parsed_json() })
            }
            CLValue::Result(result) => json!({ "Err": result.value().to_parsed_json() }),
            CLValue::Map(map) => map
                .iter()
                .map(|(key, value)| {
                    json!({ "key": key.to_parsed_json(), "value": value.to_parsed_json() })
                })
                .collect(),
            CLValue::Tuple1(first) => json!([first.to_parsed_json()]),
            CLValue::Tuple2(first, second) => {
                json!([first.to_parsed_json(), second.to_parsed_json()])
            }
            CLValue::Tuple3(first, second, third) => json!([
                first.to_parsed_json(),
                second.to_parsed_json(),
                third.to_parsed_json()
            ]),
            CLValue::Dynamic(dynamic) => dynamic
                .resolve()
                .map(|value| value.to_parsed_json())
                .unwrap_or(Value::Null),
        }
    }
}

impl Serialize for CLValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.to_raw()
            .map_err(S::Error::custom)?
            .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for CLValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        RawCLValue::deserialize(deserializer)?
            .decode()
            .map_err(D::Error::custom)
    }
}
