/*
 * Copyright (c) 2024.
 *
 * This software is free software; You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use alloc::vec;
use alloc::vec::Vec;

use piko_core::bytestream::ByteWriter;
use piko_core::colorspace::{ColorCharacteristics, ColorSpace};
use piko_core::log::trace;
use piko_core::options::EncoderOptions;

use crate::constants::{
    pixel_hash, QOI_HEADER_SIZE, QOI_MAGIC, QOI_OP_DIFF, QOI_OP_INDEX, QOI_OP_LUMA, QOI_OP_RGB,
    QOI_OP_RGBA, QOI_OP_RUN, QOI_PADDING
};
use crate::QoiEncodeErrors;

const SUPPORTED_COLORSPACES: [ColorSpace; 2] = [ColorSpace::RGB, ColorSpace::RGBA];

/// A Quite OK Image encoder
///
/// The encoder consumes raw 8-bit pixels laid out as RGB or RGBA
/// and produces a complete QOI stream, header and trailer included.
///
/// # Example
/// - Encode a 100 by 100 RGB image
///
/// ```
/// use piko_core::bit_depth::BitDepth;
/// use piko_core::colorspace::ColorSpace;
/// use piko_core::options::EncoderOptions;
/// use piko_qoi::QoiEncodeErrors;
/// use piko_qoi::QoiEncoder;
///
/// const W: usize = 100;
/// const H: usize = 100;
///
/// fn main() -> Result<(), QoiEncodeErrors> {
///     let pixels = std::array::from_fn::<u8, { W * H * 3 }, _>(|i| (i % 256) as u8);
///     let mut encoder =
///         QoiEncoder::new(&pixels, EncoderOptions::new(W, H, ColorSpace::RGB, BitDepth::Eight));
///     let encoded = encoder.encode()?;
///     // write the bytes somewhere, or do something else
///     Ok(())
/// }
/// ```
pub struct QoiEncoder<'a> {
    // raw pixels, in RGB or RGBA
    pixel_data:            &'a [u8],
    options:               EncoderOptions,
    color_characteristics: ColorCharacteristics
}

impl<'a> QoiEncoder<'a> {
    /// Create a new encoder which will encode the pixels
    ///
    /// # Arguments
    /// - `data`: Pixel data, length must be equal to `width * height * channels`
    /// - `options`: Details of the pixel data, i.e. its width, height and
    ///   the number of color components
    pub const fn new(data: &'a [u8], options: EncoderOptions) -> QoiEncoder<'a> {
        QoiEncoder {
            pixel_data: data,
            options,
            color_characteristics: ColorCharacteristics::sRGB
        }
    }

    /// Set the color characteristics written to the header
    ///
    /// Defaults to [`ColorCharacteristics::sRGB`], this is informational
    /// metadata and does not change how pixels are compressed
    pub fn set_color_characteristics(&mut self, characteristics: ColorCharacteristics) {
        self.color_characteristics = characteristics;
    }

    /// Return the maximum size for which the encoder can safely
    /// encode the image without fearing for an out of space error
    ///
    /// The returned value counts the header and the stream trailer
    pub fn max_size(&self) -> usize {
        self.options.width()
            * self.options.height()
            * (self.options.colorspace().num_components() + 1)
            + QOI_HEADER_SIZE
            + QOI_PADDING
    }

    /// Confirm the options describe an encodable image and
    /// return the channel count
    fn check_options(&self) -> Result<usize, QoiEncodeErrors> {
        let options = &self.options;

        if options.width() == 0 || options.height() == 0 {
            return Err(QoiEncodeErrors::ZeroDimensions);
        }
        if (options.width() as u64) > u64::from(u32::MAX) {
            return Err(QoiEncodeErrors::TooLargeDimensions(options.width()));
        }
        if (options.height() as u64) > u64::from(u32::MAX) {
            return Err(QoiEncodeErrors::TooLargeDimensions(options.height()));
        }

        let channels = match options.colorspace() {
            ColorSpace::RGB => 3,
            ColorSpace::RGBA => 4,
            unsupported => {
                return Err(QoiEncodeErrors::UnsupportedColorspace(
                    unsupported,
                    &SUPPORTED_COLORSPACES
                ))
            }
        };

        let expected_len = options
            .width()
            .checked_mul(options.height())
            .and_then(|size| size.checked_mul(channels))
            .ok_or(QoiEncodeErrors::TooLargeDimensions(options.width()))?;

        if self.pixel_data.len() != expected_len {
            return Err(QoiEncodeErrors::WrongSize(
                expected_len,
                self.pixel_data.len()
            ));
        }

        Ok(channels)
    }

    fn encode_headers(&self, writer: &mut ByteWriter) {
        // qoif
        writer.write_u32_be(QOI_MAGIC);
        // width
        writer.write_u32_be(self.options.width() as u32);
        // height
        writer.write_u32_be(self.options.height() as u32);
        // channels
        writer.write_u8(self.options.colorspace().num_components() as u8);
        // colorspace
        let characteristics =
            u8::from(self.color_characteristics == ColorCharacteristics::Linear);
        writer.write_u8(characteristics);
    }

    /// Encode the pixels, returning the full QOI stream or the error
    /// encountered during encoding
    ///
    /// The whole worst case output is allocated up front and trimmed
    /// to the bytes actually written, the encoding loop itself
    /// never reallocates
    ///
    /// # Returns
    /// - On success: The encoded bytes
    /// - On error: An instance of [QoiEncodeErrors]
    ///
    /// [QoiEncodeErrors]:crate::errors::QoiEncodeErrors
    #[allow(clippy::manual_range_contains)]
    pub fn encode(&mut self) -> Result<Vec<u8>, QoiEncodeErrors> {
        let channel_count = self.check_options()?;

        let mut encoded_data = vec![0; self.max_size()];
        let mut stream = ByteWriter::new(&mut encoded_data);

        self.encode_headers(&mut stream);

        let mut index = [[0_u8; 4]; 64];
        // starting pixel, on the three channel path the alpha slot is
        // never written again so it stays zero for the whole image
        let mut px = [0, 0, 0, 0];
        let mut px_prev = [0, 0, 0, 0];

        let mut run = 0_u8;

        for pix_chunk in self.pixel_data.chunks_exact(channel_count) {
            px[0..channel_count].copy_from_slice(pix_chunk);

            if px == px_prev {
                run += 1;

                if run == 62 {
                    stream.write_u8(QOI_OP_RUN | (run - 1));
                    run = 0;
                }
            } else {
                if run > 0 {
                    stream.write_u8(QOI_OP_RUN | (run - 1));
                    run = 0;
                }

                let index_pos = pixel_hash(px);

                if index[index_pos] == px {
                    stream.write_u8(QOI_OP_INDEX | index_pos as u8);
                } else {
                    index[index_pos] = px;

                    if px[3] == px_prev[3] {
                        let vr = px[0].wrapping_sub(px_prev[0]);
                        let vg = px[1].wrapping_sub(px_prev[1]);
                        let vb = px[2].wrapping_sub(px_prev[2]);

                        let vg_r = vr.wrapping_sub(vg);
                        let vg_b = vb.wrapping_sub(vg);

                        // the wrapped differences are two's complement bytes,
                        // e.g. `vr < 2 || vr > 253` keeps -2..=1
                        if (vr < 2 || vr > 253) && (vg < 2 || vg > 253) && (vb < 2 || vb > 253) {
                            stream.write_u8(
                                QOI_OP_DIFF
                                    | vr.wrapping_add(2) << 4
                                    | vg.wrapping_add(2) << 2
                                    | vb.wrapping_add(2)
                            );
                        } else if (vg < 32 || vg > 223)
                            && (vg_r < 8 || vg_r > 247)
                            && (vg_b < 8 || vg_b > 247)
                        {
                            stream.write_u8(QOI_OP_LUMA | vg.wrapping_add(32));
                            stream.write_u8(vg_r.wrapping_add(8) << 4 | vg_b.wrapping_add(8));
                        } else {
                            stream.write_u8(QOI_OP_RGB);
                            stream.write_u8(px[0]);
                            stream.write_u8(px[1]);
                            stream.write_u8(px[2]);
                        }
                    } else {
                        stream.write_u8(QOI_OP_RGBA);
                        stream.write_u32_be(u32::from_be_bytes(px));
                    }
                }
            }

            px_prev = px;
        }
        if run > 0 {
            stream.write_u8(QOI_OP_RUN | (run - 1));
        }
        // stream trailer, eight zero bytes
        stream.write_u64_be(0);

        let len = stream.bytes_written();
        // reduce the length to be the actual bytes written
        encoded_data.truncate(len);

        trace!("Finished encoding image, {} bytes", len);

        Ok(encoded_data)
    }
}
