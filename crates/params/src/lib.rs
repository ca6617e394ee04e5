//! Constant values for the dhsecret library

#![no_std]

pub mod traditional;
pub mod utils;
