//! Types shared by the supply chain contracts: the error type, token and
//! result aliases, event tags and the supplier authority.
#![cfg_attr(not(feature = "std"), no_std)]
pub use crate::{authority::*, constants::*, errors::*, types::*};
use concordium_cis2::*;
use concordium_std::*;

mod authority;
mod constants;
mod errors;
mod types;
