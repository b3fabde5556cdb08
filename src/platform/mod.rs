//! Memory models of full platforms.
//!
//! A platform owns the physical storage of an emulated system and decides
//! how it appears in each processor's banked address space.

pub mod gb;
