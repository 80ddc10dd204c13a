/*
 * Copyright (c) 2024.
 *
 * This software is free software; You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use alloc::format;
use alloc::vec;
use alloc::vec::Vec;

use piko_core::bit_depth::BitDepth;
use piko_core::bytestream::ByteReader;
use piko_core::colorspace::{ColorCharacteristics, ColorSpace};
use piko_core::log::{error, trace, warn};
use piko_core::options::DecoderOptions;

use crate::constants::{
    pixel_hash, QOI_HEADER_SIZE, QOI_MASK_2, QOI_OP_DIFF, QOI_OP_INDEX, QOI_OP_LUMA, QOI_OP_RGB,
    QOI_OP_RGBA, QOI_OP_RUN, QOI_PADDING
};
use crate::errors::QoiErrors;

/// A Quite OK Image decoder
///
/// The decoder is initialized by calling [`new`] and either of
/// [`decode_headers`] to parse the header only, or [`decode`] to
/// return uncompressed pixels.
///
/// Details of the compressed image such as width, height and
/// colorspace are accessible after decoding headers.
///
/// The decoder always tracks a full RGBA pixel internally, so the
/// output can be forced to three or four channels regardless of what
/// the stream stores, see
/// [`DecoderOptions::set_out_colorspace`].
///
/// [`new`]:QoiDecoder::new
/// [`decode_headers`]:QoiDecoder::decode_headers
/// [`decode`]:QoiDecoder::decode
pub struct QoiDecoder<'a> {
    stream:          ByteReader<'a>,
    width:           usize,
    height:          usize,
    colorspace:      ColorSpace,
    characteristics: ColorCharacteristics,
    decoded_headers: bool,
    options:         DecoderOptions
}

impl<'a> QoiDecoder<'a> {
    /// Create a new QOI format decoder with the default options
    ///
    /// # Arguments
    /// - `data`: The compressed qoi data
    ///
    /// # Example
    ///
    /// ```no_run
    /// let mut decoder = piko_qoi::QoiDecoder::new(&[]);
    /// // additional code
    /// ```
    pub fn new(data: &'a [u8]) -> QoiDecoder<'a> {
        QoiDecoder::new_with_options(data, DecoderOptions::default())
    }

    /// Create a new QOI format decoder that obeys specified restrictions
    ///
    /// E.g. can be used to set width and height limits to prevent OOM attacks,
    /// or to force the channel count of the decoded pixels
    ///
    /// # Arguments
    /// - `data`: The compressed qoi data
    /// - `options`: Decoder options that the decoder should respect
    ///
    /// # Example
    /// ```
    /// use piko_core::options::DecoderOptions;
    /// use piko_qoi::QoiDecoder;
    /// // only decode images less than 10 in both width and height
    /// let options = DecoderOptions::default().set_max_width(10).set_max_height(10);
    ///
    /// let mut decoder = QoiDecoder::new_with_options(&[], options);
    /// ```
    pub fn new_with_options(data: &'a [u8], options: DecoderOptions) -> QoiDecoder<'a> {
        QoiDecoder {
            stream: ByteReader::new(data),
            width: 0,
            height: 0,
            colorspace: ColorSpace::RGB,
            characteristics: ColorCharacteristics::sRGB,
            decoded_headers: false,
            options
        }
    }

    /// Decode a QOI header storing needed information into
    /// the decoder instance
    ///
    /// # Returns
    ///
    /// - On success: Nothing
    /// - On error: The error encountered when decoding headers,
    ///   an instance of [QoiErrors]
    ///
    /// [QoiErrors]:crate::errors::QoiErrors
    pub fn decode_headers(&mut self) -> Result<(), QoiErrors> {
        let size = self.stream.len();

        if size < QOI_HEADER_SIZE + QOI_PADDING {
            return Err(QoiErrors::InsufficientData(
                QOI_HEADER_SIZE + QOI_PADDING,
                size
            ));
        }

        // match magic bytes.
        let magic = self.stream.get_fixed_bytes_or_error::<4>()?;

        if &magic != b"qoif" {
            return Err(QoiErrors::WrongMagicBytes);
        }

        // these were confirmed to be in bounds above, so use the
        // non failing routines
        let width = self.stream.get_u32_be() as usize;
        let height = self.stream.get_u32_be() as usize;
        let channels = self.stream.get_u8();
        let colorspace = self.stream.get_u8();

        if width == 0 || height == 0 {
            return Err(QoiErrors::ZeroDimensions);
        }

        if width > self.options.max_width() {
            let msg = format!(
                "Width {} greater than max configured width {}",
                width,
                self.options.max_width()
            );
            return Err(QoiErrors::Generic(msg));
        }

        if height > self.options.max_height() {
            let msg = format!(
                "Height {} greater than max configured height {}",
                height,
                self.options.max_height()
            );
            return Err(QoiErrors::Generic(msg));
        }

        self.colorspace = match channels {
            3 => ColorSpace::RGB,
            4 => ColorSpace::RGBA,
            _ => return Err(QoiErrors::UnknownChannels(channels))
        };

        self.characteristics = match colorspace {
            0 => ColorCharacteristics::sRGB,
            1 => ColorCharacteristics::Linear,
            2 => {
                if self.options.strict_mode() {
                    return Err(QoiErrors::UnknownColorspace(colorspace));
                }
                warn!("Reserved colorspace value 2, treating image as sRGB");
                ColorCharacteristics::sRGB
            }
            _ => return Err(QoiErrors::UnknownColorspace(colorspace))
        };

        match self.options.out_colorspace() {
            ColorSpace::Unknown | ColorSpace::RGB | ColorSpace::RGBA => {}
            unsupported => {
                return Err(QoiErrors::UnsupportedOutputColorspace(unsupported));
            }
        }

        self.width = width;
        self.height = height;

        trace!("Image width: {:?}", self.width);
        trace!("Image height: {:?}", self.height);
        trace!("Image colorspace: {:?}", self.colorspace);

        self.decoded_headers = true;

        Ok(())
    }

    /// Return the number of bytes required to hold a decoded image frame
    ///
    /// This respects the configured output colorspace, not just the
    /// channel count the stream stores.
    ///
    /// # Returns
    /// - `Some(usize)`: Minimum size for a buffer needed to decode the image
    /// - `None`: Indicates the headers were not decoded
    ///
    /// # Panics
    /// In case the `width * height * channels` calculation overflows a usize
    pub fn output_buffer_size(&self) -> Option<usize> {
        if self.decoded_headers {
            self.width
                .checked_mul(self.height)
                .unwrap()
                .checked_mul(self.out_colorspace_inner().num_components())
        } else {
            None
        }
    }

    /// Decode the bytes of a QOI stream, returning the uncompressed
    /// bytes or the error encountered during decoding
    ///
    /// Additional details about the encoded image can be found after
    /// calling this or [`decode_headers`], i.e. the width and height
    /// can be accessed by the [`dimensions`] method.
    ///
    /// # Returns
    /// - On success: The decoded bytes, `width * height * channels`
    ///   of them with the output channel count
    /// - On error: An instance of [QoiErrors] which gives a reason why
    ///   the image could not be decoded
    ///
    /// [`decode_headers`]:Self::decode_headers
    /// [`dimensions`]:Self::dimensions
    /// [QoiErrors]:crate::errors::QoiErrors
    pub fn decode(&mut self) -> Result<Vec<u8>, QoiErrors> {
        if !self.decoded_headers {
            self.decode_headers()?;
        }
        let mut output = vec![0; self.output_buffer_size().unwrap()];

        self.decode_into(&mut output)?;

        Ok(output)
    }

    /// Decode a compressed QOI stream and store the pixels into
    /// the output buffer
    ///
    /// Returns an error if the buffer cannot hold the decoded image
    ///
    /// # Arguments
    ///
    /// * `pixels`: Output buffer to which we will write decoded pixels
    pub fn decode_into(&mut self, pixels: &mut [u8]) -> Result<(), QoiErrors> {
        if !self.decoded_headers {
            self.decode_headers()?;
        }

        let output_size = self.output_buffer_size().unwrap();

        if pixels.len() < output_size {
            return Err(QoiErrors::TooSmallOutput(output_size, pixels.len()));
        }

        match self.out_colorspace_inner().num_components() {
            3 => self.decode_inner_generic::<3>(&mut pixels[..output_size])?,
            4 => self.decode_inner_generic::<4>(&mut pixels[..output_size])?,
            _ => unreachable!()
        }
        Ok(())
    }

    fn decode_inner_generic<const SIZE: usize>(
        &mut self, pixels: &mut [u8]
    ) -> Result<(), QoiErrors> {
        let mut index = [[0_u8; 4]; 64];
        // starting pixel
        let mut px = [0, 0, 0, 0];

        let mut run = 0_usize;
        // the last 8 bytes are the stream trailer, never chunk data
        let chunks_len = self.stream.len() - QOI_PADDING;

        for pix_chunk in pixels.chunks_exact_mut(SIZE) {
            if run > 0 {
                run -= 1;
            } else if self.stream.position() < chunks_len {
                let chunk = self.stream.get_u8();

                if chunk == QOI_OP_RGB {
                    let packed_bytes = self.stream.get_fixed_bytes_or_zero::<3>();

                    px[0] = packed_bytes[0];
                    px[1] = packed_bytes[1];
                    px[2] = packed_bytes[2];
                } else if chunk == QOI_OP_RGBA {
                    px = self.stream.get_fixed_bytes_or_zero::<4>();
                } else if (chunk & QOI_MASK_2) == QOI_OP_INDEX {
                    px = index[usize::from(chunk) & 63];
                } else if (chunk & QOI_MASK_2) == QOI_OP_DIFF {
                    px[0] = px[0].wrapping_add(((chunk >> 4) & 0x03).wrapping_sub(2));
                    px[1] = px[1].wrapping_add(((chunk >> 2) & 0x03).wrapping_sub(2));
                    px[2] = px[2].wrapping_add((chunk & 0x03).wrapping_sub(2));
                } else if (chunk & QOI_MASK_2) == QOI_OP_LUMA {
                    let b2 = self.stream.get_u8();
                    let vg = (chunk & 0x3f).wrapping_sub(32);

                    px[0] = px[0].wrapping_add(vg.wrapping_sub(8).wrapping_add((b2 >> 4) & 0x0f));
                    px[1] = px[1].wrapping_add(vg);
                    px[2] = px[2].wrapping_add(vg.wrapping_sub(8).wrapping_add(b2 & 0x0f));
                } else if (chunk & QOI_MASK_2) == QOI_OP_RUN {
                    run = usize::from(chunk & 0x3f);
                }

                index[pixel_hash(px)] = px;
            }
            // a drained chunk region keeps repeating the last pixel
            pix_chunk.copy_from_slice(&px[0..SIZE]);
        }

        let trailer = self
            .stream
            .peek_at(self.stream.len() - QOI_PADDING, QOI_PADDING)?;

        if trailer.iter().any(|x| *x != 0) {
            if self.options.strict_mode() {
                return Err(QoiErrors::GenericStatic(
                    "Non zero bytes found in stream trailer"
                ));
            }
            error!("Non zero bytes found in stream trailer");
        }

        trace!("Finished decoding image");

        Ok(())
    }

    /// Return the colorspace the stream stores its pixels in,
    /// or `None` if the headers haven't been decoded
    ///
    /// The colorspace returned can either be [RGB] or [RGBA].
    /// Note that this is the input colorspace, which differs from the
    /// emitted pixels when an output colorspace override is configured.
    ///
    /// [RGB]: piko_core::colorspace::ColorSpace::RGB
    /// [RGBA]: piko_core::colorspace::ColorSpace::RGBA
    pub const fn colorspace(&self) -> Option<ColorSpace> {
        if self.decoded_headers {
            Some(self.colorspace)
        } else {
            None
        }
    }

    /// Return the colorspace decoded pixels are emitted in,
    /// or `None` if the headers haven't been decoded
    ///
    /// This is the stream's own colorspace unless an override was
    /// set via [`DecoderOptions::set_out_colorspace`]
    pub const fn output_colorspace(&self) -> Option<ColorSpace> {
        if self.decoded_headers {
            Some(self.out_colorspace_inner())
        } else {
            None
        }
    }

    const fn out_colorspace_inner(&self) -> ColorSpace {
        match self.options.out_colorspace() {
            ColorSpace::Unknown => self.colorspace,
            forced => forced
        }
    }

    /// Return the color characteristics of the image, or `None`
    /// if the headers haven't been decoded
    ///
    /// This is informational metadata carried in the header,
    /// the pixel values are not affected by it
    pub const fn color_characteristics(&self) -> Option<ColorCharacteristics> {
        if self.decoded_headers {
            Some(self.characteristics)
        } else {
            None
        }
    }

    /// Return the QOI default bit depth
    ///
    /// This is always 8
    pub const fn bit_depth(&self) -> BitDepth {
        BitDepth::Eight
    }

    /// Return the width and height of the image
    ///
    /// Or `None` if the headers haven't been decoded
    ///
    /// # Example
    ///
    /// ```no_run
    /// use piko_qoi::QoiDecoder;
    /// let mut decoder = QoiDecoder::new(&[]);
    ///
    /// decoder.decode_headers().unwrap();
    /// // get dimensions now.
    /// let (w, h) = decoder.dimensions().unwrap();
    /// ```
    pub const fn dimensions(&self) -> Option<(usize, usize)> {
        if self.decoded_headers {
            return Some((self.width, self.height));
        }
        None
    }
}
