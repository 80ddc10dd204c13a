/*
 * Copyright (c) 2024.
 *
 * This software is free software; You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */
use bitflags::bitflags;

use crate::colorspace::ColorSpace;

/// Permissive decoder flags
///
/// Recoverable non-conformance is logged instead of
/// stopping the decode.
fn decoder_permissive_mode() -> DecoderFlags {
    DecoderFlags::empty()
}

/// Strict decoder flags
///
/// Anything outside the letter of a format specification
/// becomes an error.
fn decoder_strict_mode() -> DecoderFlags {
    let mut flags = DecoderFlags::empty();

    flags.set(DecoderFlags::ERROR_ON_NON_CONFORMANCE, true);
    flags.set(DecoderFlags::CONFIRM_TRAILERS, true);

    flags
}

bitflags! {
    /// Decoder options that are flags
    ///
    /// NOTE: When you extend this, add true or false to
    /// all options above that return a `DecoderFlags`
    pub struct DecoderFlags: u32 {
        /// Whether a decoder should error out when it meets a
        /// recoverable deviation from the format specification,
        /// e.g. a reserved value in a header field
        const ERROR_ON_NON_CONFORMANCE = 0b0000_0001;
        /// Whether a decoder should verify stream trailers
        /// and end-of-stream markers after the pixel payload
        const CONFIRM_TRAILERS         = 0b0000_0010;
    }
}

/// Decoder options
///
/// Not all options are respected by every decoder,
/// each option documents the decoders that respect it.
#[derive(Debug, Copy, Clone)]
pub struct DecoderOptions {
    /// Maximum width for which decoders will
    /// not try to decode images larger than
    /// the specified width.
    ///
    /// - Default value: 16384
    /// - Respected by: `all decoders`
    max_width:      usize,
    /// Maximum height for which decoders will not
    /// try to decode images larger than the
    /// specified height
    ///
    /// - Default value: 16384
    /// - Respected by: `all decoders`
    max_height:     usize,
    /// Output colorspace
    ///
    /// Ask the decoder to produce pixels in this colorspace,
    /// converting while decoding where the codec supports it.
    ///
    /// `ColorSpace::Unknown` means emit whatever the stream
    /// naturally stores.
    ///
    /// - Default value: `ColorSpace::Unknown`
    /// - Respected by: `qoi`
    out_colorspace: ColorSpace,

    flags: DecoderFlags
}

impl DecoderOptions {
    /// Create decoder options with the permissive defaults
    ///
    /// This is the same as `default`, recoverable errors are
    /// logged and decoding continues.
    pub fn new_permissive() -> DecoderOptions {
        DecoderOptions::default()
    }

    /// Create decoder options that reject any stream which
    /// does not follow its format specification to the letter
    pub fn new_strict() -> DecoderOptions {
        DecoderOptions::default().set_decoder_flags(decoder_strict_mode())
    }
}

impl DecoderOptions {
    /// Get the maximum width the decoder accepts
    pub const fn max_width(&self) -> usize {
        self.max_width
    }

    /// Get the maximum height the decoder accepts
    pub const fn max_height(&self) -> usize {
        self.max_height
    }

    /// Get the configured output colorspace
    ///
    /// `ColorSpace::Unknown` means the decoder emits the
    /// stream's native colorspace
    pub const fn out_colorspace(&self) -> ColorSpace {
        self.out_colorspace
    }

    /// Return true whether the decoder should be in strict mode
    /// and reject recoverable errors
    pub fn strict_mode(&self) -> bool {
        let flags = DecoderFlags::ERROR_ON_NON_CONFORMANCE | DecoderFlags::CONFIRM_TRAILERS;

        self.flags.contains(flags)
    }

    /// Set maximum width for which the decoder should not try
    /// decoding images greater than that width
    pub fn set_max_width(mut self, width: usize) -> Self {
        self.max_width = width;
        self
    }

    /// Set maximum height for which the decoder should not try
    /// decoding images greater than that height
    pub fn set_max_height(mut self, height: usize) -> Self {
        self.max_height = height;
        self
    }

    /// Set the colorspace the decoder should emit
    ///
    /// Pass `ColorSpace::Unknown` to emit the stream's
    /// native colorspace
    pub fn set_out_colorspace(mut self, colorspace: ColorSpace) -> Self {
        self.out_colorspace = colorspace;
        self
    }

    /// Set whether the decoder should be in strict mode
    pub fn set_strict_mode(mut self, yes: bool) -> Self {
        let flags = DecoderFlags::ERROR_ON_NON_CONFORMANCE | DecoderFlags::CONFIRM_TRAILERS;

        self.flags.set(flags, yes);
        self
    }

    fn set_decoder_flags(mut self, flags: DecoderFlags) -> Self {
        self.flags = flags;
        self
    }
}

impl Default for DecoderOptions {
    fn default() -> Self {
        Self {
            max_width:      1 << 14,
            max_height:     1 << 14,
            out_colorspace: ColorSpace::Unknown,
            flags:          decoder_permissive_mode()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::DecoderOptions;

    #[test]
    fn test_strict_mode_toggle() {
        let options = DecoderOptions::default();
        assert!(!options.strict_mode());

        let options = options.set_strict_mode(true);
        assert!(options.strict_mode());

        assert!(DecoderOptions::new_strict().strict_mode());
        assert!(!DecoderOptions::new_permissive().strict_mode());
    }
}
