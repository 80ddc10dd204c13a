/*
 * Copyright (c) 2024.
 *
 * This software is free software; You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use alloc::string::String;
use core::fmt::{Debug, Display, Formatter};

use piko_core::bytestream::ByteIoError;
use piko_core::colorspace::ColorSpace;

/// Possible errors that may occur during decoding
pub enum QoiErrors {
    /// The image does not start with the QOI magic bytes `qoif`
    ///
    /// Indicates that the input is not a qoi stream
    WrongMagicBytes,
    /// The input buffer doesn't have enough bytes to hold
    /// even a header and the stream trailer
    ///
    /// # Arguments
    /// - 1st argument is the number of bytes we expected
    /// - 2nd argument is the number of bytes actually present
    InsufficientData(usize, usize),
    /// The header contains an invalid channel number
    ///
    /// The only supported values are `3` and `4`
    UnknownChannels(u8),
    /// The header contains an invalid colorspace value
    ///
    /// The value should be `0` or `1`, the reserved value `2`
    /// is tolerated unless strict mode is set
    UnknownColorspace(u8),
    /// The header contains a zero width or height
    ZeroDimensions,
    /// The configured output colorspace cannot be produced
    /// from a qoi stream
    ///
    /// Only `RGB` and `RGBA` outputs are supported
    UnsupportedOutputColorspace(ColorSpace),
    /// Too small output buffer
    ///
    /// # Arguments
    /// - 1st argument is the size needed
    /// - 2nd argument is the size found
    TooSmallOutput(usize, usize),
    /// Generic message
    Generic(String),
    /// Generic message that does not need heap allocation
    GenericStatic(&'static str),
    /// An error from the underlying bytestream
    IoErrors(ByteIoError)
}

impl Debug for QoiErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            QoiErrors::WrongMagicBytes => {
                writeln!(f, "Wrong magic bytes, expected `qoif` as image start")
            }
            QoiErrors::InsufficientData(expected, found) => {
                writeln!(
                    f,
                    "Insufficient data, required {expected} but input stream has {found}"
                )
            }
            QoiErrors::UnknownChannels(channel) => {
                writeln!(
                    f,
                    "Unknown channel number {channel}, expected either 3 or 4"
                )
            }
            QoiErrors::UnknownColorspace(colorspace) => {
                writeln!(
                    f,
                    "Unknown colorspace number {colorspace}, expected either 0 or 1"
                )
            }
            QoiErrors::ZeroDimensions => {
                writeln!(f, "Image width and height must both be greater than zero")
            }
            QoiErrors::UnsupportedOutputColorspace(colorspace) => {
                writeln!(
                    f,
                    "Cannot force qoi output to colorspace {colorspace:?}, only RGB and RGBA are supported"
                )
            }
            QoiErrors::TooSmallOutput(expected, found) => {
                writeln!(
                    f,
                    "Too small output size, expected {expected}, but found {found}"
                )
            }
            QoiErrors::Generic(val) => {
                writeln!(f, "{val}")
            }
            QoiErrors::GenericStatic(val) => {
                writeln!(f, "{val}")
            }
            QoiErrors::IoErrors(value) => {
                writeln!(f, "I/O error {value:?}")
            }
        }
    }
}

impl Display for QoiErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        writeln!(f, "{self:?}")
    }
}

impl From<&'static str> for QoiErrors {
    fn from(r: &'static str) -> Self {
        Self::GenericStatic(r)
    }
}

impl From<ByteIoError> for QoiErrors {
    fn from(value: ByteIoError) -> Self {
        QoiErrors::IoErrors(value)
    }
}

/// Errors encountered during encoding
pub enum QoiEncodeErrors {
    /// Unsupported colorspace
    ///
    /// The first argument is the colorspace encountered
    /// The second argument is the list of supported colorspaces
    UnsupportedColorspace(ColorSpace, &'static [ColorSpace]),
    /// Too large dimensions
    ///
    /// The dimension cannot be encoded into the 32-bit
    /// header fields
    TooLargeDimensions(usize),
    /// A zero width or height was requested
    ZeroDimensions,
    /// The pixel buffer length does not match the dimensions
    ///
    /// # Arguments
    /// - 1st argument is the length implied by the options
    /// - 2nd argument is the length of the buffer given
    WrongSize(usize, usize),

    Generic(&'static str)
}

impl Debug for QoiEncodeErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            QoiEncodeErrors::UnsupportedColorspace(found, supported) => {
                writeln!(f, "Cannot encode image with colorspace {found:?} into QOI, supported ones are {supported:?}")
            }
            QoiEncodeErrors::TooLargeDimensions(found) => {
                writeln!(
                    f,
                    "Too large image dimension {found}, QOI can only encode images less than {}",
                    u32::MAX
                )
            }
            QoiEncodeErrors::ZeroDimensions => {
                writeln!(f, "Image width and height must both be greater than zero")
            }
            QoiEncodeErrors::WrongSize(expected, found) => {
                writeln!(
                    f,
                    "Expected pixel buffer of length {expected} but found {found}"
                )
            }
            QoiEncodeErrors::Generic(val) => {
                writeln!(f, "{val}")
            }
        }
    }
}

impl Display for QoiEncodeErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        writeln!(f, "{self:?}")
    }
}

#[cfg(feature = "std")]
impl std::error::Error for QoiErrors {}

#[cfg(feature = "std")]
impl std::error::Error for QoiEncodeErrors {}
