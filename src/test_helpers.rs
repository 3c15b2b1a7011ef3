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

use std::fmt::Debug;

use amplify::hex::FromHex;

use crate::strict_encoding::{StrictDecode, StrictEncode};

/// Checks that all listed tags of a fieldless enum are mapped onto the
/// provided byte values, and that every other byte value fails to decode
#[macro_export]
macro_rules! test_enum_u8_exhaustive {
    ($enum:ident; $( $item:path => $val:expr ),+) => { {
        use ::num_traits::{FromPrimitive, ToPrimitive};

        $( assert_eq!($item.to_u8().unwrap(), $val); )+
        $( assert_eq!($enum::from_u8($val).unwrap(), $item); )+
        let mut set = ::std::collections::HashSet::new();
        $( set.insert($val); )+
        for x in 0..=u8::MAX {
            if !set.contains(&x) {
                assert_eq!($enum::from_u8(x), None);
                let decoded: Result<$enum, _> = $crate::strict_encoding::strict_deserialize(&[x]);
                assert_eq!(
                    decoded.unwrap_err(),
                    $crate::strict_encoding::Error::EnumValueNotKnown(stringify!($enum).to_string(), x)
                );
            }
        }
        $( assert_eq!($crate::strict_encoding::strict_serialize(&$item).unwrap(), &[$val]); )+
        $( assert_eq!($item, $crate::strict_encoding::strict_deserialize::<$enum>(&[$val]).unwrap()); )+
    } };
}

/// Parses hex test vector
pub fn hex(s: &str) -> Vec<u8> {
    Vec::<u8>::from_hex(s).expect("malformed test vector")
}

/// Test suite function to test against the vectors
pub fn test_suite<T: StrictEncode + StrictDecode + PartialEq + Debug>(
    object: &T,
    test_vec: &[u8],
    test_size: usize,
) -> T {
    let mut encoded_object: Vec<u8> = vec![];
    let write_1 = object.strict_encode(&mut encoded_object).unwrap();
    let decoded_object = T::strict_decode(&encoded_object[..]).unwrap();
    assert_eq!(write_1, test_size);
    assert_eq!(decoded_object, *object);
    encoded_object.clear();
    let write_2 = decoded_object.strict_encode(&mut encoded_object).unwrap();
    assert_eq!(encoded_object, test_vec);
    assert_eq!(write_2, test_size);
    decoded_object
}

/// Same as [`test_suite`], taking the test vector in hex
pub fn test_suite_hex<T: StrictEncode + StrictDecode + PartialEq + Debug>(
    object: &T,
    test_hex: &str,
) -> T {
    let test_vec = hex(test_hex);
    test_suite(object, &test_vec, test_vec.len())
}
