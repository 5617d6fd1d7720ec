// this_file: crates/psfont-fontdb/src/reader.rs

//! Bounds-checked little-endian cursor over font bytes.

use psfont_core::error::FontLoadError;

pub(crate) struct ByteReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> ByteReader<'a> {
    pub(crate) fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Take the next `len` bytes, or fail naming the region that ran short
    pub(crate) fn take(&mut self, len: usize, region: &'static str) -> Result<&'a [u8], FontLoadError> {
        let end = self.end_of(len, region)?;
        let bytes = &self.data[self.pos..end];
        self.pos = end;
        Ok(bytes)
    }

    pub(crate) fn u8(&mut self, region: &'static str) -> Result<u8, FontLoadError> {
        Ok(self.take(1, region)?[0])
    }

    pub(crate) fn u32_le(&mut self, region: &'static str) -> Result<u32, FontLoadError> {
        let bytes = self.take(4, region)?;
        Ok(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    /// Jump to an absolute offset inside the data
    pub(crate) fn seek(&mut self, pos: usize, region: &'static str) -> Result<(), FontLoadError> {
        if pos > self.data.len() {
            return Err(FontLoadError::CorruptFile {
                region,
                needed: pos,
                available: self.data.len(),
            });
        }
        self.pos = pos;
        Ok(())
    }

    /// Everything not read yet
    pub(crate) fn rest(&self) -> &'a [u8] {
        &self.data[self.pos..]
    }

    fn end_of(&self, len: usize, region: &'static str) -> Result<usize, FontLoadError> {
        match self.pos.checked_add(len) {
            Some(end) if end <= self.data.len() => Ok(end),
            end => Err(FontLoadError::CorruptFile {
                region,
                needed: end.unwrap_or(usize::MAX),
                available: self.data.len(),
            }),
        }
    }
}
