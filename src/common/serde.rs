// Casper Codec Library: typed values, keys & call arguments
// Written in 2020 by
//     Dr. Maxim Orlovsky <orlovsky@pandoracore.com>
//  The serde.rs file written in 2020 by
//     Martin Habovstiak <martin.habovstiak@gmail.com>
//
// To the extent possible under law, the author(s) have dedicated all
// copyright and related and neighboring rights to this software to
// the public domain worldwide. This software is distributed without
// any warranty.
//
// You should have received a copy of the MIT License
// along with this software.
// If not, see <https://opensource.org/licenses/MIT>.

//! This module contains primitives used to implement serde support.

#[cfg(feature = "serde")]
use std::borrow::Cow;
#[cfg(feature = "serde")]
use std::ops::Deref;

/// This is a helper for deserializing using `FromStr` more efficiently.
///
/// The implementation of Deserialize for Cow doesn't borrow the string,
/// so it allocates needlessly if the string is going to be passed to `FromStr`.
///
/// Our CowHelper is written such that it borrows the str, avoiding the
/// allocation.
#[cfg(feature = "serde")]
#[derive(Deserialize)]
#[serde(crate = "serde_crate")]
pub(crate) struct CowHelper<'a>(#[serde(borrow)] Cow<'a, str>);

#[cfg(feature = "serde")]
impl<'a> Deref for CowHelper<'a> {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Implements serde for types having a canonical string representation: they
/// are serialized with `Display` and deserialized with `FromStr`, both in
/// human-readable and binary serializers, since the network RPC uses only
/// the textual form.
#[macro_export]
macro_rules! impl_serde_str {
    ($ty:ty) => {
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

                let s = <$crate::common::serde::CowHelper<'_> as serde_crate::Deserialize>::deserialize(
                    deserializer,
                )?;
                <$ty as ::std::str::FromStr>::from_str(&s).map_err(D::Error::custom)
            }
        }
    };
}
