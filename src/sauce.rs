//! SAUCE metadata records trailing text-art files.

use crate::font::decode_cp437;

pub const RECORD_LEN: usize = 128;
const COMMENT_LINE_LEN: usize = 64;
const SUB: u8 = 0x1A;

/// Data type 1: character based files.
const DATA_TYPE_CHARACTER: u8 = 1;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sauce {
    pub title: String,
    pub author: String,
    pub group: String,
    pub date: String,
    pub file_size: u32,
    pub data_type: u8,
    pub file_type: u8,
    pub tinfo: [u16; 4],
    pub flags: u8,
    pub tinfos: String,
    pub comments: Vec<String>,
}

impl Sauce {
    /// Split `data` into renderable content and its SAUCE record, if any.
    /// The record, its comment block and the preceding EOF marker are all
    /// excluded from the content.
    pub fn split(data: &[u8]) -> (&[u8], Option<Sauce>) {
        let Some(start) = data.len().checked_sub(RECORD_LEN) else {
            return (data, None);
        };
        let record = &data[start..];
        if !record.starts_with(b"SAUCE00") {
            return (data, None);
        }

        let mut sauce = Sauce::parse(record);
        let mut end = start;

        let comment_count = usize::from(record[104]);
        let block_len = 5 + comment_count * COMMENT_LINE_LEN;
        if comment_count > 0 && end >= block_len && data[end - block_len..].starts_with(b"COMNT") {
            let lines = &data[end - block_len + 5..end];
            sauce.comments = lines.chunks(COMMENT_LINE_LEN).map(text_field).collect();
            end -= block_len;
        }

        if end > 0 && data[end - 1] == SUB {
            end -= 1;
        }

        (&data[..end], Some(sauce))
    }

    fn parse(record: &[u8]) -> Sauce {
        let u16_at = |at: usize| u16::from_le_bytes([record[at], record[at + 1]]);
        Sauce {
            title: text_field(&record[7..42]),
            author: text_field(&record[42..62]),
            group: text_field(&record[62..82]),
            date: text_field(&record[82..90]),
            file_size: u32::from_le_bytes([record[90], record[91], record[92], record[93]]),
            data_type: record[94],
            file_type: record[95],
            tinfo: [u16_at(96), u16_at(98), u16_at(100), u16_at(102)],
            flags: record[105],
            tinfos: text_field(&record[106..128]),
            comments: Vec::new(),
        }
    }

    /// Character width declared for ASCII, ANSi and ANSiMation files.
    pub fn columns(&self) -> Option<u16> {
        let width = self.tinfo[0];
        (self.data_type == DATA_TYPE_CHARACTER && self.file_type <= 2 && width > 0).then_some(width)
    }

    /// The non-blink flag: blink selects bright backgrounds.
    pub fn ice_colors(&self) -> bool {
        self.data_type == DATA_TYPE_CHARACTER && self.flags & 0x01 != 0
    }
}

fn text_field(bytes: &[u8]) -> String {
    let len = bytes
        .iter()
        .rposition(|&b| b != b' ' && b != 0)
        .map_or(0, |pos| pos + 1);
    decode_cp437(&bytes[..len])
}
