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

//! Client-side codec for the Casper network data model: the CLType algebra,
//! typed CLValues, the family of global-state keys and addresses, and
//! transaction call arguments. Every type here has a consensus-exact binary
//! representation (used for body hashes and signatures) and a canonical JSON
//! representation used by the node RPC.

#![allow(unused_braces)] // Rust compiler can't properly parse derivation macros
#![deny(
    non_upper_case_globals,
    non_camel_case_types,
    non_snake_case,
    unused_mut
)]

#[macro_use]
extern crate amplify;
#[macro_use]
extern crate lazy_static;

#[cfg(feature = "serde")]
#[macro_use]
extern crate serde_crate as serde;

#[macro_use]
mod common;
#[macro_use]
pub mod strict_encoding;
#[cfg(test)]
#[macro_use]
pub(crate) mod test_helpers;

pub mod args;
pub mod cl_type;
pub mod cl_value;
pub mod key;
pub mod uint;

pub use args::{body_hash, Args, Argument, NamedArg};
pub use cl_type::{CLType, TypeTag};
pub use cl_value::{CLValue, RawCLValue};
pub use key::{
    AccessRights, AccountHash, BalanceHoldAddr, BidAddr, BlockGlobalAddr, ByteCodeAddr,
    ContractHash, ContractPackageHash, EntityAddr, EntryPointAddr, Era, Hash, Key, KeyTag,
    MessageAddr, NamedKeyAddr, PublicKey, TransferHash, URef,
};
pub use strict_encoding::{StrictDecode, StrictEncode};
pub use uint::{U128, U256, U512};
