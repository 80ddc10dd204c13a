/*
 * Copyright (c) 2024.
 *
 * This software is free software; You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */
use crate::bytestream::ByteIoError;

/// An encapsulation of an in-memory bytestream reader
///
/// The reader borrows the buffer it decodes from and keeps
/// a cursor of how far it has read.
///
/// Reads past the end of the buffer either return a default
/// value of zero or an error, depending on the method chosen,
/// the cursor is never advanced past the buffer length.
pub struct ByteReader<'a> {
    buffer:   &'a [u8],
    position: usize
}

impl<'a> ByteReader<'a> {
    /// Create a new reader over a buffer
    ///
    /// The cursor starts at the beginning of the buffer
    pub const fn new(buffer: &'a [u8]) -> ByteReader<'a> {
        ByteReader { buffer, position: 0 }
    }

    /// Length of the underlying buffer
    pub const fn len(&self) -> usize {
        self.buffer.len()
    }

    /// Return true if the underlying buffer has no bytes
    pub const fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Current cursor position measured from the start of the buffer
    pub const fn position(&self) -> usize {
        self.position
    }

    /// Number of bytes between the cursor and the end of the buffer
    pub const fn remaining(&self) -> usize {
        self.buffer.len().saturating_sub(self.position)
    }

    /// Return true if the buffer can satisfy `num` more bytes of reads
    pub const fn has(&self, num: usize) -> bool {
        self.position.saturating_add(num) <= self.buffer.len()
    }

    /// Return true if the cursor has consumed the whole buffer
    pub const fn eof(&self) -> bool {
        self.position >= self.buffer.len()
    }

    /// Skip `num` bytes ahead of the stream
    pub fn skip(&mut self, num: usize) {
        self.position = self.position.saturating_add(num).min(self.buffer.len());
    }

    /// Move the cursor to an absolute position from the start of the buffer
    pub fn set_position(&mut self, position: usize) {
        self.position = position.min(self.buffer.len());
    }

    /// Borrow `num_bytes` at an absolute `position` without touching the cursor
    ///
    /// # Returns
    /// - `Ok(&[u8])`: The requested bytes
    /// - An error if the range falls outside the buffer
    pub fn peek_at(&self, position: usize, num_bytes: usize) -> Result<&'a [u8], ByteIoError> {
        match self.buffer.get(position..position.saturating_add(num_bytes)) {
            Some(bytes) => Ok(bytes),
            None => Err(ByteIoError::NotEnoughBytes(
                num_bytes,
                self.buffer.len().saturating_sub(position)
            ))
        }
    }

    /// Read a single byte from the stream, returning `0` if
    /// the stream has no more bytes
    ///
    /// To distinguish a zero byte from an exhausted stream
    /// see [`get_u8_err`](Self::get_u8_err)
    #[inline(always)]
    pub fn get_u8(&mut self) -> u8 {
        match self.buffer.get(self.position) {
            Some(byte) => {
                self.position += 1;
                *byte
            }
            None => 0
        }
    }

    /// Read a single byte from the stream, erroring out if
    /// the stream has no more bytes
    #[inline(always)]
    pub fn get_u8_err(&mut self) -> Result<u8, ByteIoError> {
        match self.buffer.get(self.position) {
            Some(byte) => {
                self.position += 1;
                Ok(*byte)
            }
            None => Err(ByteIoError::NotEnoughBytes(1, 0))
        }
    }

    /// Read a compile-time known number of bytes into an array,
    /// or error out if the buffer cannot satisfy the read
    ///
    /// If you can ignore errors, see [`get_fixed_bytes_or_zero`](Self::get_fixed_bytes_or_zero)
    #[inline(always)]
    pub fn get_fixed_bytes_or_error<const N: usize>(&mut self) -> Result<[u8; N], ByteIoError> {
        let mut byte_store = [0; N];

        match self.buffer.get(self.position..self.position + N) {
            Some(bytes) => {
                byte_store.copy_from_slice(bytes);
                self.position += N;
                Ok(byte_store)
            }
            None => Err(ByteIoError::NotEnoughBytes(N, self.remaining()))
        }
    }

    /// Read a compile-time known number of bytes into an array,
    /// returning an array of zeros if the buffer cannot satisfy the read
    ///
    /// If you want to handle errors, see [`get_fixed_bytes_or_error`](Self::get_fixed_bytes_or_error)
    #[inline(always)]
    pub fn get_fixed_bytes_or_zero<const N: usize>(&mut self) -> [u8; N] {
        let mut byte_store = [0; N];

        if let Some(bytes) = self.buffer.get(self.position..self.position + N) {
            byte_store.copy_from_slice(bytes);
            self.position += N;
        }
        byte_store
    }
}

enum Mode {
    // Big endian
    BE,
    // Little Endian
    LE
}

macro_rules! get_single_type {
    ($name:tt,$name2:tt,$name3:tt,$name4:tt,$name5:tt,$name6:tt,$int_type:tt) => {
        impl<'a> ByteReader<'a>
        {
            #[inline(always)]
            fn $name(&mut self, mode: Mode) -> $int_type
            {
                const SIZE_OF_VAL: usize = core::mem::size_of::<$int_type>();

                let space = self.get_fixed_bytes_or_zero::<SIZE_OF_VAL>();

                match mode {
                    Mode::BE => $int_type::from_be_bytes(space),
                    Mode::LE => $int_type::from_le_bytes(space)
                }
            }

            #[inline(always)]
            fn $name2(&mut self, mode: Mode) -> Result<$int_type, ByteIoError>
            {
                const SIZE_OF_VAL: usize = core::mem::size_of::<$int_type>();

                match self.get_fixed_bytes_or_error::<SIZE_OF_VAL>()
                {
                    Ok(space) => match mode {
                        Mode::BE => Ok($int_type::from_be_bytes(space)),
                        Mode::LE => Ok($int_type::from_le_bytes(space))
                    },
                    Err(e) => Err(e)
                }
            }
            #[doc=concat!("Read ",stringify!($int_type)," as a big endian integer")]
            #[doc=concat!("Returning an error if the underlying buffer cannot support a ",stringify!($int_type)," read.")]
            #[inline]
            pub fn $name3(&mut self) -> Result<$int_type, ByteIoError>
            {
                self.$name2(Mode::BE)
            }

            #[doc=concat!("Read ",stringify!($int_type)," as a little endian integer")]
            #[doc=concat!("Returning an error if the underlying buffer cannot support a ",stringify!($int_type)," read.")]
            #[inline]
            pub fn $name4(&mut self) -> Result<$int_type, ByteIoError>
            {
                self.$name2(Mode::LE)
            }
            #[doc=concat!("Read ",stringify!($int_type)," as a big endian integer")]
            #[doc=concat!("Returning 0 if the underlying buffer does not have enough bytes for a ",stringify!($int_type)," read.")]
            #[inline(always)]
            pub fn $name5(&mut self) -> $int_type
            {
                self.$name(Mode::BE)
            }
            #[doc=concat!("Read ",stringify!($int_type)," as a little endian integer")]
            #[doc=concat!("Returning 0 if the underlying buffer does not have enough bytes for a ",stringify!($int_type)," read.")]
            #[inline(always)]
            pub fn $name6(&mut self) -> $int_type
            {
                self.$name(Mode::LE)
            }
        }
    };
}

get_single_type!(
    get_u16_inner_or_default,
    get_u16_inner_or_die,
    get_u16_be_err,
    get_u16_le_err,
    get_u16_be,
    get_u16_le,
    u16
);
get_single_type!(
    get_u32_inner_or_default,
    get_u32_inner_or_die,
    get_u32_be_err,
    get_u32_le_err,
    get_u32_be,
    get_u32_le,
    u32
);
get_single_type!(
    get_u64_inner_or_default,
    get_u64_inner_or_die,
    get_u64_be_err,
    get_u64_le_err,
    get_u64_be,
    get_u64_le,
    u64
);
