/*
 * Copyright (c) 2024.
 *
 * This software is free software; You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */
//! Decoder and encoder options
//!
//! This module exposes the shared option structs consumed by the
//! decoders and encoders in the family, the same `DecoderOptions`
//! can be reused across codecs for global configuration.
pub use decoder::{DecoderFlags, DecoderOptions};
pub use encoder::EncoderOptions;

mod decoder;
mod encoder;
