/*
 * Copyright (c) 2024.
 *
 * This software is free software; You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */
//! Core routines shared by the piko family of image codecs
//!
//! This crate provides the small set of building blocks the
//! decoders and encoders have in common
//!
//! - A bytestream reader and writer with endian aware reads and writes
//! - Colorspace and bit depth information shared by images
//! - Image decoder and encoder options
//!
//! The crate is `#[no_std]` with the `alloc` crate needed for `Vec`
//! which stores decoded bytes.
//!
//! # Features
//!  - `std`: Enables `std::error::Error` implementations for the error types.
//!
//!  - `serde`: Enables serializing of some of the data structures
//!     present in the crate
//!
#![cfg_attr(not(feature = "std"), no_std)]
extern crate alloc;

pub use log;

pub mod bit_depth;
pub mod bytestream;
pub mod colorspace;
pub mod options;
pub mod serde;
