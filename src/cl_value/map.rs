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

use std::collections::HashMap;
use std::hash::{Hash, Hasher};

use super::{CLValue, Error};
use crate::cl_type::CLType;

/// Map of CLValues with declared key and value types.
///
/// Entries keep insertion order, which is the order of their binary
/// encoding. Keys are unique by their human-readable string form.
#[derive(Clone, Debug)]
pub struct Map {
    key_type: CLType,
    value_type: CLType,
    entries: Vec<(CLValue, CLValue)>,
    index: HashMap<String, usize>,
}

impl Map {
    pub fn new(key_type: CLType, value_type: CLType) -> Self {
        Map {
            key_type,
            value_type,
            entries: vec![],
            index: HashMap::new(),
        }
    }

    /// Appends new entry, failing if either key or value type does not match
    /// the declared one, or if the key is already present
    pub fn append(&mut self, key: CLValue, value: CLValue) -> Result<(), Error> {
        let key_type = key.cl_type();
        if !self.key_type.accepts(&key_type) {
            return Err(Error::TypeMismatch {
                expected: self.key_type.clone(),
                found: key_type,
            });
        }
        let value_type = value.cl_type();
        if !self.value_type.accepts(&value_type) {
            return Err(Error::TypeMismatch {
                expected: self.value_type.clone(),
                found: value_type,
            });
        }
        let id = key.to_string();
        if self.index.contains_key(&id) {
            return Err(Error::DuplicateKey(id));
        }
        self.index.insert(id, self.entries.len());
        self.entries.push((key, value));
        Ok(())
    }

    /// Consuming version of [`Map::append`]
    #[inline]
    pub fn with_entry(mut self, key: CLValue, value: CLValue) -> Result<Self, Error> {
        self.append(key, value)?;
        Ok(self)
    }

    /// Looks up value by the string form of its key
    pub fn get(&self, key: &str) -> Option<&CLValue> {
        self.index
            .get(key)
            .and_then(|pos| self.entries.get(*pos))
            .map(|(_, value)| value)
    }

    #[inline]
    pub fn key_type(&self) -> &CLType {
        &self.key_type
    }

    #[inline]
    pub fn value_type(&self) -> &CLType {
        &self.value_type
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates entries in their insertion order
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = (&CLValue, &CLValue)> {
        self.entries.iter().map(|(key, value)| (key, value))
    }
}

impl PartialEq for Map {
    fn eq(&self, other: &Self) -> bool {
        self.key_type == other.key_type
            && self.value_type == other.value_type
            && self.entries == other.entries
    }
}

impl Eq for Map {}

impl Hash for Map {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key_type.hash(state);
        self.value_type.hash(state);
        self.entries.hash(state);
    }
}
