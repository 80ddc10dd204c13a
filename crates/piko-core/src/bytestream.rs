/*
 * Copyright (c) 2024.
 *
 * This software is free software; You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */
//! A simple implementation of a bytestream reader and writer
//!
//! The readers and writers operate on in-memory buffers with an
//! explicit cursor, which is all the fixed-layout formats in this
//! family need. Multi-byte accessors come in big and little endian
//! flavours, each with a failing and a non-failing variant.
pub use reader::ByteReader;
pub use writer::ByteWriter;

use core::fmt::{Debug, Display, Formatter};

mod reader;
mod writer;

/// Errors from reading or writing past the ends of a bytestream
pub enum ByteIoError {
    /// Not enough bytes to satisfy a read
    ///
    /// # Arguments
    /// - 1st argument is the number of bytes requested
    /// - 2nd argument is the number of bytes actually left
    NotEnoughBytes(usize, usize),
    /// The output buffer cannot hold the bytes to be written
    ///
    /// # Arguments
    /// - 1st argument is the number of bytes to be written
    /// - 2nd argument is the space actually left
    NotEnoughBuffer(usize, usize),
    /// Generic message that does not need heap allocation
    Generic(&'static str)
}

impl Debug for ByteIoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            ByteIoError::NotEnoughBytes(requested, left) => {
                writeln!(f, "Not enough bytes, requested {requested} but only {left} are left")
            }
            ByteIoError::NotEnoughBuffer(requested, left) => {
                writeln!(
                    f,
                    "Not enough space to write {requested} bytes, only {left} bytes are left"
                )
            }
            ByteIoError::Generic(val) => {
                writeln!(f, "{val}")
            }
        }
    }
}

impl Display for ByteIoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        writeln!(f, "{:?}", self)
    }
}

impl From<&'static str> for ByteIoError {
    fn from(r: &'static str) -> Self {
        Self::Generic(r)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ByteIoError {}
