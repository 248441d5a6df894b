//! A supply chain provenance contract using the Concordium Token Standard CIS2.
//!
//! # Description
//! Every token of this contract stands for one physical product batch. A
//! token is minted by a verified supplier against a fixed mint fee, which is
//! forwarded to the contract administrator. The token carries the provenance
//! of the batch (name, origin, batch number, quantity and a metadata URI),
//! none of which can change after minting.
//!
//! Two things do change over the life of a token: its owner, through the CIS2
//! `transfer` function, and a free-text status line, which only the current
//! owner may rewrite. The two are independent of each other.
//!
//! The administrator is the account that initialized the instance and is the
//! only address that may add or remove suppliers.
//!
//! Note: The word 'address' refers to either an account address or a
//! contract address.

#![cfg_attr(not(feature = "std"), no_std)]
use crate::{constants::*, events::*, structs::*};
use commons::*;
use concordium_cis2::*;
use concordium_std::*;
use core::ops::DerefMut;

mod constants;
mod contract;
mod events;
mod impls;
mod structs;
