use crate::payload::{encode_png, PNG_BITS_PER_PIXEL};
use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use image::RgbaImage;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::io::{self, Read, Seek, SeekFrom, Write};

//===========================================================================//

/// The byte order of every multi-byte field in an ICO file.
pub type IcoByteOrder = LittleEndian;

// The resource type number for icons (as opposed to cursors).
const ICO_RESOURCE_TYPE: u16 = 1;

// The size of the ICONDIR header and of each ICONDIRENTRY, in bytes.
const HEADER_LEN: u32 = 6;
const RECORD_LEN: u32 = 16;

// Size limits for images in an ICO file:
const MIN_SIZE: u32 = 1;
const MAX_SIZE: u32 = 256;

// The signature that all PNG files start with.
const PNG_SIGNATURE: &[u8] = &[0x89, b'P', b'N', b'G'];

//===========================================================================//

/// A collection of images; the contents of a single ICO file.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
pub struct IconDir {
    entries: Vec<IconDirEntry>,
}

impl IconDir {
    /// Creates a new, empty collection of icons.
    pub fn new() -> IconDir {
        IconDir { entries: Vec::new() }
    }

    /// Returns the entries in this collection, in file order.
    pub fn entries(&self) -> &[IconDirEntry] {
        &self.entries
    }

    /// Appends an entry to the collection.  Entries are written in the
    /// order they were added.
    pub fn add_entry(&mut self, entry: IconDirEntry) {
        self.entries.push(entry);
    }

    /// Lays out the directory: one record per entry, with each payload
    /// placed directly after the previous one.  Returns an error if there
    /// are too many entries or the file would be too large to address.
    pub fn records(&self) -> io::Result<Vec<IconDirRecord>> {
        if self.entries.len() > (u16::MAX as usize) {
            invalid_input!(
                "Too many entries in IconDir (was {}, but max is {})",
                self.entries.len(),
                u16::MAX
            );
        }
        let mut data_offset =
            HEADER_LEN + RECORD_LEN * (self.entries.len() as u32);
        let mut records = Vec::with_capacity(self.entries.len());
        for entry in self.entries.iter() {
            let data_size = match u32::try_from(entry.data.len()) {
                Ok(size) => size,
                Err(_) => invalid_input!(
                    "Payload too large for ICO file ({} bytes)",
                    entry.data.len()
                ),
            };
            records.push(IconDirRecord {
                width: size_byte(entry.width),
                height: size_byte(entry.height),
                num_colors: 0,
                reserved: 0,
                color_planes: 1,
                bits_per_pixel: entry.bits_per_pixel,
                data_size,
                data_offset,
            });
            data_offset = match data_offset.checked_add(data_size) {
                Some(offset) => offset,
                None => invalid_input!("ICO file exceeds 4 GiB"),
            };
        }
        Ok(records)
    }

    /// Serializes the whole ICO file into memory.
    pub fn to_bytes(&self) -> io::Result<Vec<u8>> {
        let records = self.records()?;
        let total_len = match records.last() {
            Some(last) => (last.data_offset + last.data_size) as usize,
            None => HEADER_LEN as usize,
        };
        let mut output = Vec::with_capacity(total_len);
        output.write_u16::<IcoByteOrder>(0)?; // reserved
        output.write_u16::<IcoByteOrder>(ICO_RESOURCE_TYPE)?;
        output.write_u16::<IcoByteOrder>(records.len() as u16)?;
        for record in records.iter() {
            record.write(&mut output)?;
        }
        for entry in self.entries.iter() {
            output.write_all(&entry.data)?;
        }
        debug_assert_eq!(output.len(), total_len);
        Ok(output)
    }

    /// Writes the ICO file to `writer` in a single call, after the whole
    /// file has been assembled in memory.
    pub fn write<W: Write>(&self, mut writer: W) -> io::Result<()> {
        let bytes = self.to_bytes()?;
        writer.write_all(&bytes)?;
        writer.flush()
    }

    /// Reads an ICO file into memory, loading each payload from the offset
    /// recorded in its directory entry.
    pub fn read<R: Read + Seek>(mut reader: R) -> io::Result<IconDir> {
        let records = read_records(&mut reader)?;
        let mut entries = Vec::<IconDirEntry>::with_capacity(records.len());
        for record in records.iter() {
            reader.seek(SeekFrom::Start(record.data_offset as u64))?;
            let mut data = vec![0u8; record.data_size as usize];
            reader.read_exact(&mut data)?;
            entries.push(IconDirEntry {
                width: record.width(),
                height: record.height(),
                bits_per_pixel: record.bits_per_pixel,
                data,
            });
        }
        Ok(IconDir { entries })
    }
}

// A width/height byte of zero indicates a size of 256.
fn size_byte(size: u32) -> u8 {
    if size >= MAX_SIZE {
        0
    } else {
        size as u8
    }
}

//===========================================================================//

/// Reads the ICONDIR header and every ICONDIRENTRY record of an ICO file,
/// leaving `reader` just past the last record.
pub fn read_records<R: Read>(mut reader: R) -> io::Result<Vec<IconDirRecord>> {
    let reserved = reader.read_u16::<IcoByteOrder>()?;
    if reserved != 0 {
        invalid_data!(
            "Invalid reserved field value in ICONDIR \
             (was {}, but must be 0)",
            reserved
        );
    }
    let restype = reader.read_u16::<IcoByteOrder>()?;
    if restype != ICO_RESOURCE_TYPE {
        invalid_data!(
            "Invalid resource type (was {}, but must be {})",
            restype,
            ICO_RESOURCE_TYPE
        );
    }
    let num_entries = reader.read_u16::<IcoByteOrder>()? as usize;
    let mut records = Vec::<IconDirRecord>::with_capacity(num_entries);
    for _ in 0..num_entries {
        records.push(IconDirRecord::read(&mut reader)?);
    }
    Ok(records)
}

//===========================================================================//

/// One ICONDIRENTRY record, exactly as stored in the file's directory.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
pub struct IconDirRecord {
    /// The width byte (zero means 256).
    pub width: u8,
    /// The height byte (zero means 256).
    pub height: u8,
    /// The number of palette colors (zero for PNG payloads).
    pub num_colors: u8,
    /// Reserved; always zero.
    pub reserved: u8,
    /// The number of color planes.
    pub color_planes: u16,
    /// The color depth of the image.
    pub bits_per_pixel: u16,
    /// The length of the payload, in bytes.
    pub data_size: u32,
    /// The absolute position of the payload within the file.
    pub data_offset: u32,
}

impl IconDirRecord {
    /// Returns the image width in pixels, decoding a zero byte as 256.
    pub fn width(&self) -> u32 {
        if self.width == 0 {
            MAX_SIZE
        } else {
            self.width as u32
        }
    }

    /// Returns the image height in pixels, decoding a zero byte as 256.
    pub fn height(&self) -> u32 {
        if self.height == 0 {
            MAX_SIZE
        } else {
            self.height as u32
        }
    }

    fn read<R: Read>(reader: &mut R) -> io::Result<IconDirRecord> {
        let width = reader.read_u8()?;
        let height = reader.read_u8()?;
        let num_colors = reader.read_u8()?;
        let reserved = reader.read_u8()?;
        if reserved != 0 {
            invalid_data!(
                "Invalid reserved field value in ICONDIRENTRY \
                 (was {}, but must be 0)",
                reserved
            );
        }
        Ok(IconDirRecord {
            width,
            height,
            num_colors,
            reserved,
            color_planes: reader.read_u16::<IcoByteOrder>()?,
            bits_per_pixel: reader.read_u16::<IcoByteOrder>()?,
            data_size: reader.read_u32::<IcoByteOrder>()?,
            data_offset: reader.read_u32::<IcoByteOrder>()?,
        })
    }

    fn write<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        writer.write_u8(self.width)?;
        writer.write_u8(self.height)?;
        writer.write_u8(self.num_colors)?;
        writer.write_u8(self.reserved)?;
        writer.write_u16::<IcoByteOrder>(self.color_planes)?;
        writer.write_u16::<IcoByteOrder>(self.bits_per_pixel)?;
        writer.write_u32::<IcoByteOrder>(self.data_size)?;
        writer.write_u32::<IcoByteOrder>(self.data_offset)?;
        Ok(())
    }
}

//===========================================================================//

/// One entry in an ICO file; a single PNG-encoded icon image.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
pub struct IconDirEntry {
    width: u32,
    height: u32,
    bits_per_pixel: u16,
    data: Vec<u8>,
}

impl IconDirEntry {
    /// Creates an entry from an already-encoded PNG payload.  Returns an
    /// error if `width` or `height` is outside 1 to 256.
    pub fn from_png_data(
        width: u32,
        height: u32,
        bits_per_pixel: u16,
        data: Vec<u8>,
    ) -> io::Result<IconDirEntry> {
        if !(MIN_SIZE..=MAX_SIZE).contains(&width) {
            invalid_input!(
                "Invalid width (was {}, but must be from {} to {})",
                width,
                MIN_SIZE,
                MAX_SIZE
            );
        }
        if !(MIN_SIZE..=MAX_SIZE).contains(&height) {
            invalid_input!(
                "Invalid height (was {}, but must be from {} to {})",
                height,
                MIN_SIZE,
                MAX_SIZE
            );
        }
        Ok(IconDirEntry { width, height, bits_per_pixel, data })
    }

    /// Encodes an image as a PNG in a new entry.  Returns an error if the
    /// image is too large for an ICO file or the encoding fails.
    pub fn encode(image: &RgbaImage) -> io::Result<IconDirEntry> {
        let data = encode_png(image)?;
        IconDirEntry::from_png_data(
            image.width(),
            image.height(),
            PNG_BITS_PER_PIXEL,
            data,
        )
    }

    /// Returns the width of the image, in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Returns the height of the image, in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Returns the bits-per-pixel (color depth) of the image.
    pub fn bits_per_pixel(&self) -> u16 {
        self.bits_per_pixel
    }

    /// Returns true if the payload starts with the PNG signature.
    pub fn is_png(&self) -> bool {
        self.data.starts_with(PNG_SIGNATURE)
    }

    /// Returns the raw, encoded image data.
    pub fn data(&self) -> &[u8] {
        &self.data
    }
}

//===========================================================================//

#[cfg(test)]
mod tests {
    use super::{read_records, IconDir, IconDirEntry, IconDirRecord};
    use image::{Rgba, RgbaImage};
    use std::io::Cursor;

    fn entry(size: u32, data: &[u8]) -> IconDirEntry {
        IconDirEntry::from_png_data(size, size, 32, data.to_vec()).unwrap()
    }

    #[test]
    fn read_empty_icon_set() {
        let input = b"\x00\x00\x01\x00\x00\x00";
        let icondir = IconDir::read(Cursor::new(input)).unwrap();
        assert_eq!(icondir.entries().len(), 0);
    }

    #[test]
    fn read_cursor_set_fails() {
        let input = b"\x00\x00\x02\x00\x00\x00";
        assert!(IconDir::read(Cursor::new(input)).is_err());
    }

    #[test]
    fn read_nonzero_reserved_field_fails() {
        let input = b"\x01\x00\x01\x00\x00\x00";
        assert!(IconDir::read(Cursor::new(input)).is_err());
    }

    #[test]
    fn write_empty_icon_set() {
        let icondir = IconDir::new();
        let mut output = Vec::<u8>::new();
        icondir.write(&mut output).unwrap();
        let expected: &[u8] = b"\x00\x00\x01\x00\x00\x00";
        assert_eq!(output.as_slice(), expected);
    }

    #[test]
    fn write_two_entries() {
        let mut icondir = IconDir::new();
        icondir.add_entry(entry(16, b"abc"));
        icondir.add_entry(entry(256, b"wxyz"));
        let output = icondir.to_bytes().unwrap();
        let expected: &[u8] = b"\
            \x00\x00\x01\x00\x02\x00\
            \
            \x10\x10\x00\x00\x01\x00\x20\x00\
            \x03\x00\x00\x00\x26\x00\x00\x00\
            \
            \x00\x00\x00\x00\x01\x00\x20\x00\
            \x04\x00\x00\x00\x29\x00\x00\x00\
            \
            abcwxyz";
        assert_eq!(output.as_slice(), expected);
    }

    #[test]
    fn records_follow_payload_lengths() {
        let mut icondir = IconDir::new();
        icondir.add_entry(entry(48, &[1; 100]));
        icondir.add_entry(entry(16, &[2; 7]));
        icondir.add_entry(entry(32, &[]));
        icondir.add_entry(entry(256, &[3; 1000]));
        let offsets: Vec<u32> = icondir
            .records()
            .unwrap()
            .iter()
            .map(|record| record.data_offset)
            .collect();
        let base = 6 + 16 * 4;
        assert_eq!(offsets, vec![base, base + 100, base + 107, base + 107]);
    }

    #[test]
    fn record_size_bytes() {
        let mut icondir = IconDir::new();
        icondir.add_entry(entry(256, b"x"));
        icondir.add_entry(entry(48, b"y"));
        let records = icondir.records().unwrap();
        assert_eq!((records[0].width, records[0].height), (0, 0));
        assert_eq!((records[0].width(), records[0].height()), (256, 256));
        assert_eq!((records[1].width, records[1].height), (48, 48));
    }

    #[test]
    fn out_of_range_sizes_are_rejected() {
        assert!(IconDirEntry::from_png_data(0, 16, 32, vec![]).is_err());
        assert!(IconDirEntry::from_png_data(16, 0, 32, vec![]).is_err());
        assert!(IconDirEntry::from_png_data(257, 16, 32, vec![]).is_err());
        assert!(IconDirEntry::from_png_data(16, 512, 32, vec![]).is_err());
        assert!(IconDirEntry::from_png_data(256, 256, 32, vec![]).is_ok());
    }

    #[test]
    fn encode_rejects_oversized_image() {
        let image = RgbaImage::new(300, 300);
        assert!(IconDirEntry::encode(&image).is_err());
    }

    #[test]
    fn encoded_entry_is_32bpp_png() {
        let image = RgbaImage::from_pixel(32, 32, Rgba([0, 0, 255, 128]));
        let entry = IconDirEntry::encode(&image).unwrap();
        assert!(entry.is_png());
        assert_eq!(entry.width(), 32);
        assert_eq!(entry.height(), 32);
        assert_eq!(entry.bits_per_pixel(), 32);
    }

    #[test]
    fn stored_records_match_computed_records() {
        let mut icondir = IconDir::new();
        for &size in &[16, 32, 48, 256] {
            let image = RgbaImage::from_pixel(size, size, Rgba([9, 8, 7, 6]));
            icondir.add_entry(IconDirEntry::encode(&image).unwrap());
        }
        let file = icondir.to_bytes().unwrap();
        let stored = read_records(Cursor::new(&file)).unwrap();
        assert_eq!(stored, icondir.records().unwrap());
        let last: &IconDirRecord = stored.last().unwrap();
        assert_eq!(file.len(), (last.data_offset + last.data_size) as usize);
    }

    #[test]
    fn payloads_round_trip() {
        let mut icondir = IconDir::new();
        icondir.add_entry(entry(16, b"first"));
        icondir.add_entry(entry(32, b"second payload"));
        let file = icondir.to_bytes().unwrap();
        let reread = IconDir::read(Cursor::new(&file)).unwrap();
        assert_eq!(reread.entries().len(), 2);
        for (original, read) in
            icondir.entries().iter().zip(reread.entries().iter())
        {
            assert_eq!(read.width(), original.width());
            assert_eq!(read.height(), original.height());
            assert_eq!(read.bits_per_pixel(), original.bits_per_pixel());
            assert_eq!(read.data(), original.data());
        }
    }
}

//===========================================================================//
