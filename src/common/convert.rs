// Casper Codec Library: typed values, keys & call arguments
// Written in 2020 by
//     Dr. Maxim Orlovsky <orlovsky@pandoracore.com>
//  The convert.rs file written in 2020 by
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

//! Conversions between textual identifiers and string types

/// Implements `TryFrom` of the standard string types for a type parsed with
/// `FromStr`, failing with its parse error
#[macro_export]
macro_rules! impl_try_from_stringly {
    ($to:ty) => {
        impl_try_from_stringly!($to; &str, String, Box<str>, ::std::borrow::Cow<'_, str>);
    };

    ($to:ty; $($from:ty),+ $(,)?) => {
        $(
            impl ::std::convert::TryFrom<$from> for $to {
                type Error = <$to as ::std::str::FromStr>::Err;

                #[inline]
                fn try_from(value: $from) -> Result<Self, Self::Error> {
                    <$to as ::std::str::FromStr>::from_str(&value)
                }
            }
        )+
    };
}

/// Implements conversion of an identifier into its canonical string form
#[macro_export]
macro_rules! impl_into_string {
    ($from:ty) => {
        impl From<$from> for String {
            #[inline]
            fn from(value: $from) -> Self {
                value.to_string()
            }
        }
    };
}

#[cfg(test)]
mod test {
    use std::convert::TryFrom;

    use crate::key::{Era, Key};

    #[test]
    fn test_stringly_conversions() {
        let key = Key::try_from("era-3").unwrap();
        assert_eq!(key, Key::EraInfo(Era::from(3)));
        assert_eq!(Key::try_from(s!("era-3")).unwrap(), key);
        assert!(Key::try_from("era-").is_err());
        assert_eq!(String::from(key), "era-3");
    }
}
