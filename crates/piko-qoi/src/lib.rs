/*
 * Copyright (c) 2024.
 *
 * This software is free software; You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */
//! Decoding and encoding of the Quite OK Image format
//!
//! [Format reference](https://qoiformat.org/)
//!
//! The codec is a pair of pure in-memory transforms between raw
//! 8-bit RGB/RGBA pixels and the byte-aligned QOI chunk stream.
//! File handling and command line surfaces are left to callers.
//!
//! # Features
//! - Decoding and encoding
//! - `no_std`
//! - Fast
//! - Fuzz tested
//!
//! ## `no_std`
//! You can disable the default `std` feature to compile for `no_std`
//! targets, `alloc` is still required
//!
//! # Example
//! Round-trip a small RGBA image
//!
//! ```
//! use piko_core::bit_depth::BitDepth;
//! use piko_core::colorspace::ColorSpace;
//! use piko_core::options::EncoderOptions;
//! use piko_qoi::{QoiDecoder, QoiEncoder};
//!
//! let pixels = [127_u8; 4 * 4 * 4];
//! let options = EncoderOptions::new(4, 4, ColorSpace::RGBA, BitDepth::Eight);
//!
//! let encoded = QoiEncoder::new(&pixels, options).encode().unwrap();
//!
//! let mut decoder = QoiDecoder::new(&encoded);
//! let decoded = decoder.decode().unwrap();
//! assert_eq!(&pixels[..], &decoded[..]);
//! ```
#![cfg_attr(not(feature = "std"), no_std)]
extern crate alloc;

pub use decoder::*;
pub use encoder::*;
pub use errors::*;
pub use piko_core;

mod constants;
mod decoder;
mod encoder;
mod errors;
