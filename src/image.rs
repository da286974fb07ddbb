// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Raw `sensor_msgs/Image` ⇄ pixel array conversion.
//!
//! Each encoding maps to a fixed element type and channel count. Pixels are
//! copied as-is: no colour-space conversion and no casting between element
//! types. Compressed images are out of scope.

use byteorder::{BigEndian, ByteOrder, LittleEndian};
use tracing::debug;

use crate::core::{to_wire_u32, CodecError, ColumnData, ElementType, Result};
use crate::msgs::{Header, Image};

/// Encoding used when none is given.
pub const DEFAULT_IMAGE_ENCODING: &str = "bgr8";

/// Frame used when none is given.
pub const DEFAULT_IMAGE_FRAME_ID: &str = "camera_frame";

/// Encoding name to `(element type, channels)`.
const ENCODINGS: &[(&str, ElementType, usize)] = &[
    ("rgb8", ElementType::UInt8, 3),
    ("rgba8", ElementType::UInt8, 4),
    ("rgb16", ElementType::UInt16, 3),
    ("rgba16", ElementType::UInt16, 4),
    ("bgr8", ElementType::UInt8, 3),
    ("bgra8", ElementType::UInt8, 4),
    ("bgr16", ElementType::UInt16, 3),
    ("bgra16", ElementType::UInt16, 4),
    ("mono8", ElementType::UInt8, 1),
    ("mono16", ElementType::UInt16, 1),
    ("bayer_rggb8", ElementType::UInt8, 1),
    ("bayer_bggr8", ElementType::UInt8, 1),
    ("bayer_gbrg8", ElementType::UInt8, 1),
    ("bayer_grbg8", ElementType::UInt8, 1),
    ("bayer_rggb16", ElementType::UInt16, 1),
    ("bayer_bggr16", ElementType::UInt16, 1),
    ("bayer_gbrg16", ElementType::UInt16, 1),
    ("bayer_grbg16", ElementType::UInt16, 1),
    ("8UC1", ElementType::UInt8, 1),
    ("8UC2", ElementType::UInt8, 2),
    ("8UC3", ElementType::UInt8, 3),
    ("8UC4", ElementType::UInt8, 4),
    ("8SC1", ElementType::Int8, 1),
    ("8SC2", ElementType::Int8, 2),
    ("8SC3", ElementType::Int8, 3),
    ("8SC4", ElementType::Int8, 4),
    ("16UC1", ElementType::UInt16, 1),
    ("16UC2", ElementType::UInt16, 2),
    ("16UC3", ElementType::UInt16, 3),
    ("16UC4", ElementType::UInt16, 4),
    ("16SC1", ElementType::Int16, 1),
    ("16SC2", ElementType::Int16, 2),
    ("16SC3", ElementType::Int16, 3),
    ("16SC4", ElementType::Int16, 4),
    ("32SC1", ElementType::Int32, 1),
    ("32SC2", ElementType::Int32, 2),
    ("32SC3", ElementType::Int32, 3),
    ("32SC4", ElementType::Int32, 4),
    ("32FC1", ElementType::Float32, 1),
    ("32FC2", ElementType::Float32, 2),
    ("32FC3", ElementType::Float32, 3),
    ("32FC4", ElementType::Float32, 4),
    ("64FC1", ElementType::Float64, 1),
    ("64FC2", ElementType::Float64, 2),
    ("64FC3", ElementType::Float64, 3),
    ("64FC4", ElementType::Float64, 4),
];

/// Look up the element type and channel count of an encoding.
pub fn encoding_info(encoding: &str) -> Result<(ElementType, usize)> {
    ENCODINGS
        .iter()
        .find(|(name, _, _)| *name == encoding)
        .map(|&(_, element_type, channels)| (element_type, channels))
        .ok_or_else(|| CodecError::unsupported_type(encoding))
}

/// All known encoding names.
pub fn encodings() -> impl Iterator<Item = &'static str> {
    ENCODINGS.iter().map(|(name, _, _)| *name)
}

/// Row-major `height × width × channels` pixel array.
#[derive(Debug, Clone, PartialEq)]
///
/// The sample count always equals `height * width * channels`; the only way
/// to build one is [`ImageArray::new`].
pub struct ImageArray {
    height: usize,
    width: usize,
    channels: usize,
    data: ColumnData,
}

impl ImageArray {
    /// Create an array, checking that `data` holds every sample.
    pub fn new(
        height: usize,
        width: usize,
        channels: usize,
        data: impl Into<ColumnData>,
    ) -> Result<Self> {
        let data = data.into();
        let expected = height * width * channels;
        if data.len() != expected {
            return Err(CodecError::shape_mismatch(
                "image samples",
                format!("{expected} ({height} x {width} x {channels})"),
                data.len(),
            ));
        }
        Ok(Self {
            height,
            width,
            channels,
            data,
        })
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn channels(&self) -> usize {
        self.channels
    }

    /// Samples in row-major, channel-interleaved order.
    pub fn data(&self) -> &ColumnData {
        &self.data
    }

    pub fn into_data(self) -> ColumnData {
        self.data
    }

    pub fn element_type(&self) -> ElementType {
        self.data.element_type()
    }

    /// Sample at `(row, col, channel)` widened to f64.
    pub fn get_f64(&self, row: usize, col: usize, channel: usize) -> Option<f64> {
        if row >= self.height || col >= self.width || channel >= self.channels {
            return None;
        }
        self.data
            .get_f64((row * self.width + col) * self.channels + channel)
    }
}

/// Decode a raw image into a pixel array.
///
/// Honours `is_bigendian` and skips any padding at the end of each row
/// (`step` larger than `width * channels * size`). A `step` of zero is read
/// as tightly packed rows.
pub fn raw_image_to_array(image: &Image) -> Result<ImageArray> {
    let (element_type, channels) = encoding_info(&image.encoding)?;
    let height = image.height as usize;
    let width = image.width as usize;
    let size = element_type.size();
    let row_bytes = width * channels * size;
    let step = match image.step as usize {
        0 => row_bytes,
        step => step,
    };
    if step < row_bytes {
        return Err(CodecError::shape_mismatch(
            "image step",
            format!("at least {row_bytes} bytes"),
            step,
        ));
    }
    if image.data.len() != height * step {
        return Err(CodecError::shape_mismatch(
            "image data",
            format!("{} bytes ({height} rows x {step})", height * step),
            format!("{} bytes", image.data.len()),
        ));
    }

    let data = if image.is_bigendian != 0 {
        read_samples::<BigEndian>(&image.data, element_type, step, row_bytes)
    } else {
        read_samples::<LittleEndian>(&image.data, element_type, step, row_bytes)
    };

    debug!(
        encoding = %image.encoding,
        height,
        width,
        channels,
        step,
        "decoded image"
    );
    ImageArray::new(height, width, channels, data)
}

fn read_samples<B: ByteOrder>(
    data: &[u8],
    element_type: ElementType,
    step: usize,
    row_bytes: usize,
) -> ColumnData {
    let size = element_type.size();
    let mut column = ColumnData::with_capacity(element_type, data.len() / size);
    if step == 0 {
        return column;
    }
    for row in data.chunks_exact(step) {
        for sample in row[..row_bytes].chunks_exact(size) {
            column.push_from_bytes::<B>(sample);
        }
    }
    column
}

/// Encode a pixel array as a raw little-endian image with packed rows.
///
/// The array's channel count and element type must match `encoding`
/// exactly; nothing is converted.
pub fn array_to_raw_image(array: &ImageArray, encoding: &str, frame_id: &str) -> Result<Image> {
    let (element_type, channels) = encoding_info(encoding)?;
    if array.channels != channels {
        return Err(CodecError::shape_mismatch(
            format!("channels for encoding '{encoding}'"),
            channels,
            array.channels,
        ));
    }
    if array.element_type() != element_type {
        return Err(CodecError::shape_mismatch(
            format!("element type for encoding '{encoding}'"),
            element_type,
            array.element_type(),
        ));
    }

    let size = element_type.size();
    let step = array.width * channels * size;
    let mut data = vec![0u8; array.height * step];
    for (index, out) in data.chunks_exact_mut(size).enumerate() {
        array.data.write_to_bytes::<LittleEndian>(index, out);
    }

    Ok(Image {
        header: Header::now(frame_id),
        height: to_wire_u32("image height", array.height)?,
        width: to_wire_u32("image width", array.width)?,
        encoding: encoding.to_string(),
        is_bigendian: 0,
        step: to_wire_u32("image step", step)?,
        data,
    })
}
