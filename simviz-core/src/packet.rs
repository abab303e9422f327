use crate::error::{PacketError, ValidationError};
use crate::store::Sample;
use log::warn;

/// Decodes little-endian `f32` frames of `[t, v0, .., vN-1]` rows, several
/// rows per frame.
#[derive(Debug, Clone, Copy)]
pub struct PacketDecoder {
    channel_count: usize,
}

impl PacketDecoder {
    pub fn new(channel_count: usize) -> Result<Self, ValidationError> {
        if channel_count == 0 {
            return Err(ValidationError::NoChannels);
        }
        Ok(Self { channel_count })
    }

    pub fn channel_count(&self) -> usize {
        self.channel_count
    }

    pub fn row_bytes(&self) -> usize {
        (self.channel_count + 1) * 4
    }

    pub fn decode(&self, frame: &[u8]) -> Result<Vec<Sample>, PacketError> {
        if frame.len() % 4 != 0 {
            return Err(PacketError::Misaligned(frame.len()));
        }
        let floats: Vec<f32> = frame
            .chunks_exact(4)
            .map(|b| f32::from_le_bytes([b[0], b[1], b[2], b[3]]))
            .collect();
        Ok(self.decode_floats(&floats)?)
    }

    /// Splits already-decoded floats into rows. Values past the last complete
    /// row are logged and ignored.
    pub fn decode_floats(&self, data: &[f32]) -> Result<Vec<Sample>, ValidationError> {
        let row_len = self.channel_count + 1;
        let rows = data.chunks_exact(row_len);
        let extra = rows.remainder().len();
        let mut samples = Vec::with_capacity(data.len() / row_len);
        for row in rows {
            let timestamp = f64::from(row[0]);
            if !timestamp.is_finite() {
                return Err(ValidationError::NonFiniteTimestamp(timestamp));
            }
            let values: Vec<f64> = row[1..].iter().map(|&v| f64::from(v)).collect();
            if let Some((channel, &value)) =
                values.iter().enumerate().find(|(_, v)| !v.is_finite())
            {
                return Err(ValidationError::NonFiniteValue { channel, value });
            }
            samples.push(Sample::new(timestamp, values));
        }
        if extra > 0 {
            warn!("ignoring {extra} trailing values after {} complete rows", samples.len());
        }
        Ok(samples)
    }
}
