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

//! Payloads of composite CLValues. Each of them keeps the nested types
//! explicitly, so the type of the value is known even when it holds no
//! items (empty list, `None` option).

use super::{CLValue, Error};
use crate::cl_type::CLType;
use crate::strict_encoding;

/// Optional value of a known inner type
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct OptionValue {
    inner_type: CLType,
    value: Option<Box<CLValue>>,
}

impl OptionValue {
    #[inline]
    pub fn none(inner_type: CLType) -> Self {
        OptionValue {
            inner_type,
            value: None,
        }
    }

    #[inline]
    pub fn some(value: CLValue) -> Self {
        OptionValue {
            inner_type: value.cl_type(),
            value: Some(Box::new(value)),
        }
    }

    #[inline]
    pub fn inner_type(&self) -> &CLType {
        &self.inner_type
    }

    #[inline]
    pub fn value(&self) -> Option<&CLValue> {
        self.value.as_deref()
    }

    #[inline]
    pub fn is_some(&self) -> bool {
        self.value.is_some()
    }
}

/// Homogeneous list of values
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct ListValue {
    element_type: CLType,
    items: Vec<CLValue>,
}

impl ListValue {
    /// Constructs list checking that all items are of the element type
    pub fn new(element_type: CLType, items: Vec<CLValue>) -> Result<Self, Error> {
        if let Some(item) = items
            .iter()
            .find(|item| !element_type.accepts(&item.cl_type()))
        {
            return Err(Error::TypeMismatch {
                expected: element_type,
                found: item.cl_type(),
            });
        }
        Ok(ListValue {
            element_type,
            items,
        })
    }

    /// Constructs list from items decoded under the element type
    #[inline]
    pub(super) fn with_decoded(element_type: CLType, items: Vec<CLValue>) -> Self {
        ListValue {
            element_type,
            items,
        }
    }

    #[inline]
    pub fn element_type(&self) -> &CLType {
        &self.element_type
    }

    #[inline]
    pub fn items(&self) -> &[CLValue] {
        &self.items
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Success or failure value. The network declares a single inner type for
/// both variants.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct ResultValue {
    is_ok: bool,
    value: Box<CLValue>,
}

impl ResultValue {
    #[inline]
    pub fn ok(value: CLValue) -> Self {
        ResultValue {
            is_ok: true,
            value: Box::new(value),
        }
    }

    #[inline]
    pub fn err(value: CLValue) -> Self {
        ResultValue {
            is_ok: false,
            value: Box::new(value),
        }
    }

    #[inline]
    pub fn is_ok(&self) -> bool {
        self.is_ok
    }

    #[inline]
    pub fn value(&self) -> &CLValue {
        &self.value
    }

    #[inline]
    pub fn inner_type(&self) -> CLType {
        self.value.cl_type()
    }
}

/// Value of a runtime-inferred type, kept as opaque bytes until resolved
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct DynamicValue {
    inner_type: CLType,
    bytes: Vec<u8>,
}

impl DynamicValue {
    #[inline]
    pub fn new(inner_type: CLType, bytes: Vec<u8>) -> Self {
        DynamicValue { inner_type, bytes }
    }

    #[inline]
    pub fn inner_type(&self) -> &CLType {
        &self.inner_type
    }

    #[inline]
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Decodes the bytes under the inner type
    #[inline]
    pub fn resolve(&self) -> Result<CLValue, strict_encoding::Error> {
        CLValue::from_bytes_by_type(&self.bytes, &self.inner_type)
    }
}
