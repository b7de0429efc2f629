use crate::error::{Error, Result};

/// Maximum byte length accepted for a length-prefixed string.
const MAX_STRING_LEN: usize = 1024 * 1024;

/// What an out-of-bounds read does. Fixed at construction, not per call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BoundsMode {
    /// Out-of-bounds reads fail with `Error::UnexpectedEof`.
    #[default]
    Strict,
    /// Out-of-bounds reads yield a zero value of the requested type.
    /// Diagnostic fallback only; silently papers over truncation.
    Lenient,
}

/// Advisory progress callback, invoked with an increasing percentage 0..=100.
pub type ProgressFn<'a> = Box<dyn FnMut(u8) + 'a>;

/// Little-endian binary reader over an immutable byte buffer.
///
/// Every read advances the offset by the declared width of its type, even
/// when the read runs past the end of the buffer (the offset is what drives
/// progress reporting and error messages, so it must stay honest).
pub struct ByteCursor<'a> {
    data: &'a [u8],
    pos: usize,
    mode: BoundsMode,
    progress: Option<ProgressFn<'a>>,
    last_percent: u8,
}

impl<'a> ByteCursor<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self::with_mode(data, BoundsMode::Strict)
    }

    pub fn with_mode(data: &'a [u8], mode: BoundsMode) -> Self {
        Self { data, pos: 0, mode, progress: None, last_percent: 0 }
    }

    /// Attach a progress callback. It fires whenever the offset crosses a
    /// new 1%-of-buffer threshold; it never affects decode behavior.
    pub fn with_progress(mut self, progress: ProgressFn<'a>) -> Self {
        self.progress = Some(progress);
        self
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    pub fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.pos)
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    /// Jump to an absolute offset. Only used to land on a section boundary
    /// from the preamble's pointer table, never mid-record.
    pub fn seek(&mut self, pos: usize) {
        self.pos = pos;
        self.report_progress();
    }

    /// Advance without reading.
    pub fn skip(&mut self, n: usize) -> Result<()> {
        let short = self.remaining() < n;
        let err = self.eof(n);
        self.advance(n);
        if short && self.mode == BoundsMode::Strict {
            return Err(err);
        }
        Ok(())
    }

    fn eof(&self, wanted: usize) -> Error {
        Error::UnexpectedEof { offset: self.pos, wanted, have: self.remaining() }
    }

    fn advance(&mut self, n: usize) {
        self.pos += n;
        self.report_progress();
    }

    fn report_progress(&mut self) {
        let Some(cb) = self.progress.as_mut() else { return };
        if self.data.is_empty() {
            return;
        }
        let percent = (self.pos.min(self.data.len()) * 100 / self.data.len()) as u8;
        if percent > self.last_percent {
            self.last_percent = percent;
            cb(percent);
        }
    }

    /// Core read: exactly `n` bytes, or `None` in lenient mode when the
    /// buffer is exhausted. The offset advances by `n` whether or not the
    /// read succeeds.
    fn consume(&mut self, n: usize) -> Result<Option<&'a [u8]>> {
        if self.remaining() >= n {
            let slice = &self.data[self.pos..self.pos + n];
            self.advance(n);
            Ok(Some(slice))
        } else {
            let err = self.eof(n);
            self.advance(n);
            match self.mode {
                BoundsMode::Lenient => Ok(None),
                BoundsMode::Strict => Err(err),
            }
        }
    }

    pub fn read_bytes(&mut self, n: usize) -> Result<Vec<u8>> {
        Ok(match self.consume(n)? {
            Some(slice) => slice.to_vec(),
            None => vec![0; n],
        })
    }

    pub fn read_u8(&mut self) -> Result<u8> {
        Ok(match self.consume(1)? {
            Some(b) => b[0],
            None => 0,
        })
    }

    pub fn read_bool(&mut self) -> Result<bool> {
        Ok(self.read_u8()? != 0)
    }

    pub fn read_u16(&mut self) -> Result<u16> {
        Ok(match self.consume(2)? {
            Some(b) => u16::from_le_bytes([b[0], b[1]]),
            None => 0,
        })
    }

    pub fn read_i16(&mut self) -> Result<i16> {
        Ok(self.read_u16()? as i16)
    }

    pub fn read_u32(&mut self) -> Result<u32> {
        Ok(match self.consume(4)? {
            Some(b) => u32::from_le_bytes([b[0], b[1], b[2], b[3]]),
            None => 0,
        })
    }

    pub fn read_i32(&mut self) -> Result<i32> {
        Ok(self.read_u32()? as i32)
    }

    pub fn read_u64(&mut self) -> Result<u64> {
        Ok(match self.consume(8)? {
            Some(b) => u64::from_le_bytes([b[0], b[1], b[2], b[3], b[4], b[5], b[6], b[7]]),
            None => 0,
        })
    }

    pub fn read_i64(&mut self) -> Result<i64> {
        Ok(self.read_u64()? as i64)
    }

    pub fn read_f32(&mut self) -> Result<f32> {
        Ok(f32::from_bits(self.read_u32()?))
    }

    pub fn read_f64(&mut self) -> Result<f64> {
        Ok(f64::from_bits(self.read_u64()?))
    }

    /// Read a 7-bit-per-byte variable-length unsigned integer (the .NET
    /// `BinaryReader` length prefix): high bit of each byte is the
    /// continuation flag, 7-bit groups in little-endian order.
    pub fn read_varint(&mut self) -> Result<u32> {
        let mut value: u32 = 0;
        let mut shift = 0;
        loop {
            if shift >= 35 {
                return Err(Error::InvalidData(format!(
                    "varint too long at offset {}",
                    self.pos
                )));
            }
            let byte = self.read_u8()?;
            value |= u32::from(byte & 0x7F) << shift;
            if byte & 0x80 == 0 {
                return Ok(value);
            }
            shift += 7;
        }
    }

    /// Read a varint-length-prefixed UTF-8 string.
    pub fn read_string(&mut self) -> Result<String> {
        let len = self.read_varint()? as usize;
        self.read_string_with_len(len)
    }

    /// Read a UTF-8 string whose length is already known.
    pub fn read_string_with_len(&mut self, len: usize) -> Result<String> {
        if len > MAX_STRING_LEN {
            return Err(Error::StringTooLong { len, max: MAX_STRING_LEN });
        }
        let bytes = self.read_bytes(len)?;
        String::from_utf8(bytes)
            .map_err(|_| Error::InvalidData(format!("invalid UTF-8 string at offset {}", self.pos)))
    }

    /// Unpack `total_bits` booleans from `ceil(total_bits / 8)` bytes,
    /// least-significant bit first within each byte.
    pub fn read_bit_flags(&mut self, total_bits: usize) -> Result<Vec<bool>> {
        let bytes = self.read_bytes(total_bits.div_ceil(8))?;
        let mut flags = Vec::with_capacity(total_bits);
        for i in 0..total_bits {
            flags.push(bytes[i / 8] >> (i % 8) & 1 != 0);
        }
        Ok(flags)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_primitives() {
        let data = [0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07];
        let mut cursor = ByteCursor::new(&data);

        assert_eq!(cursor.read_u8().unwrap(), 0x01);
        assert_eq!(cursor.read_u16().unwrap(), 0x0302);
        assert_eq!(cursor.read_u32().unwrap(), 0x07060504);
        assert!(cursor.is_empty());
    }

    #[test]
    fn test_strict_eof() {
        let data = [0x01, 0x02];
        let mut cursor = ByteCursor::new(&data);
        assert!(matches!(
            cursor.read_u32(),
            Err(Error::UnexpectedEof { offset: 0, wanted: 4, have: 2 })
        ));
        // The offset advances by the declared width even on failure.
        assert_eq!(cursor.position(), 4);
    }

    #[test]
    fn test_lenient_reads_zero_and_advances() {
        let data = [0xAB];
        let mut cursor = ByteCursor::with_mode(&data, BoundsMode::Lenient);
        assert_eq!(cursor.read_u32().unwrap(), 0);
        assert_eq!(cursor.position(), 4);
        assert_eq!(cursor.read_u16().unwrap(), 0);
        assert_eq!(cursor.position(), 6);
    }

    #[test]
    fn test_read_varint() {
        let mut cursor = ByteCursor::new(&[0x42]);
        assert_eq!(cursor.read_varint().unwrap(), 0x42);

        // 300 = 0b10101100 0b00000010
        let mut cursor = ByteCursor::new(&[0xAC, 0x02]);
        assert_eq!(cursor.read_varint().unwrap(), 300);
    }

    #[test]
    fn test_read_string() {
        let data = [0x05, b'h', b'e', b'l', b'l', b'o'];
        let mut cursor = ByteCursor::new(&data);
        assert_eq!(cursor.read_string().unwrap(), "hello");
    }

    #[test]
    fn test_read_bit_flags_lsb_first() {
        // 0b0000_0101, 0b0000_0010 -> bits 0,2 of byte 0 and bit 1 of byte 1
        let data = [0x05, 0x02];
        let mut cursor = ByteCursor::new(&data);
        let flags = cursor.read_bit_flags(10).unwrap();
        assert_eq!(flags.len(), 10);
        assert!(flags[0]);
        assert!(!flags[1]);
        assert!(flags[2]);
        assert!(flags[9]);
        assert!(!flags[8]);
        assert_eq!(cursor.position(), 2);
    }

    #[test]
    fn test_progress_thresholds() {
        let data = vec![0u8; 200];
        let mut reported = Vec::new();
        {
            let mut cursor =
                ByteCursor::new(&data).with_progress(Box::new(|p| reported.push(p)));
            cursor.read_bytes(2).unwrap(); // 1%
            cursor.read_u8().unwrap(); // still 1%
            cursor.read_bytes(97).unwrap(); // 50%
            cursor.seek(200); // 100%
        }
        assert_eq!(reported, vec![1, 50, 100]);
    }
}
