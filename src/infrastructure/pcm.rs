use std::io::Cursor;

use hound::{WavReader, WavSpec};

use crate::domain::entities::Recording;
use crate::domain::errors::{AppError, FormatError};

/// Divisor applied when decoding. +32767 maps to exactly 1.0 while -32768
/// lands slightly below -1.0.
pub const MAX_AMPLITUDE: f64 = 32767.0;

/// Multiplier applied when encoding. Truncating `v / 32767 * 32768` gives
/// back `v` only while the rounding error stays under `1 / 32767`, which
/// needs the samples held as `f64`.
const ENCODE_SCALE: f64 = 32768.0;

/// Encoded values are saturated to `[-SATURATION, SATURATION]`.
pub const SATURATION: i64 = 32767;

/// What hound could read from the front of a file.
#[derive(Debug, Clone, Copy)]
pub struct ProbedHeader {
    pub spec: WavSpec,
    pub data_offset: usize,
}

/// Splits `bytes` into the first `header_len` bytes and the 16-bit
/// little-endian payload behind them.
///
/// The payload half of the allocation is released before returning, so peak
/// memory is the raw file plus the decoded samples.
pub fn decode(mut bytes: Vec<u8>, header_len: usize) -> Result<Recording, AppError> {
    if bytes.len() < header_len {
        return Err(FormatError::HeaderTooShort {
            expected: header_len,
            actual: bytes.len(),
        }
        .into());
    }

    let payload = &bytes[header_len..];
    if payload.len() % 2 != 0 {
        return Err(FormatError::OddPayload { len: payload.len() }.into());
    }

    let samples: Vec<f64> = payload
        .chunks_exact(2)
        .map(|pair| f64::from(i16::from_le_bytes([pair[0], pair[1]])) / MAX_AMPLITUDE)
        .collect();

    bytes.truncate(header_len);
    bytes.shrink_to_fit();

    Ok(Recording::new(bytes, samples))
}

/// Converts one sample to its little-endian byte pair, saturating instead of
/// wrapping.
pub fn encode_sample(sample: f64) -> Result<[u8; 2], AppError> {
    // float-to-int `as` truncates toward zero and saturates at the i64 bounds
    let scaled = (sample * ENCODE_SCALE) as i64;
    let clamped = scaled.clamp(-SATURATION, SATURATION);
    let value = i16::try_from(clamped)
        .ok()
        .filter(|v| i64::from(*v).abs() <= SATURATION)
        .ok_or(AppError::Range { value: clamped })?;
    Ok(value.to_le_bytes())
}

/// Re-emits `header` followed by the encoded payload. Takes ownership of the
/// samples so they are freed as soon as the payload exists.
pub fn encode(samples: Vec<f64>, header: &[u8]) -> Result<Vec<u8>, AppError> {
    let mut out = Vec::with_capacity(header.len() + 2 * samples.len());
    out.extend_from_slice(header);
    for &sample in &samples {
        out.extend_from_slice(&encode_sample(sample)?);
    }
    Ok(out)
}

/// Reads the RIFF header at the front of `bytes` without touching the payload.
pub fn probe_header(bytes: &[u8]) -> Result<ProbedHeader, hound::Error> {
    let reader = WavReader::new(Cursor::new(bytes))?;
    let spec = reader.spec();
    let data_offset = reader.into_inner().position() as usize;
    Ok(ProbedHeader { spec, data_offset })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(values: &[i16]) -> Vec<u8> {
        values.iter().flat_map(|v| v.to_le_bytes()).collect()
    }

    #[test]
    fn decode_normalizes_by_max_amplitude() {
        let mut bytes = vec![0xAA; 4];
        bytes.extend(payload(&[0, 32767, -32768, -1]));
        let recording = decode(bytes, 4).unwrap();

        assert_eq!(recording.header, vec![0xAA; 4]);
        assert_eq!(recording.samples[0], 0.0);
        assert_eq!(recording.samples[1], 1.0);
        assert!(recording.samples[2] < -1.0);
        assert!((recording.samples[3] + 1.0 / 32767.0).abs() < 1e-9);
    }

    #[test]
    fn decode_rejects_odd_payload() {
        let err = decode(vec![0; 7], 4).unwrap_err();
        assert!(matches!(
            err,
            AppError::Format(FormatError::OddPayload { len: 3 })
        ));
    }

    #[test]
    fn decode_rejects_file_shorter_than_header() {
        let err = decode(vec![0; 10], 44).unwrap_err();
        assert!(matches!(
            err,
            AppError::Format(FormatError::HeaderTooShort {
                expected: 44,
                actual: 10
            })
        ));
    }

    #[test]
    fn encode_boundary_values() {
        assert_eq!(encode_sample(0.0).unwrap(), [0, 0]);
        assert_eq!(encode_sample(-1.0 / 32768.0).unwrap(), (-1i16).to_le_bytes());
        assert_eq!(encode_sample(-40000.0 / 32768.0).unwrap(), (-32767i16).to_le_bytes());
        assert_eq!(encode_sample(40000.0 / 32768.0).unwrap(), 32767i16.to_le_bytes());
    }

    #[test]
    fn encode_saturates_instead_of_wrapping() {
        for sample in [1.0, 1.5, 250.0, f64::MAX, -1.0, -3.0, f64::MIN] {
            let value = i16::from_le_bytes(encode_sample(sample).unwrap());
            assert!((-32767..=32767).contains(&value), "{sample} -> {value}");
            assert_eq!(value.signum(), sample.signum() as i16);
        }
    }

    #[test]
    fn encode_prepends_header() {
        let bytes = encode(vec![0.0, -1.0 / 32768.0], &[1, 2, 3]).unwrap();
        assert_eq!(bytes, vec![1, 2, 3, 0, 0, 0xFF, 0xFF]);
    }

    #[test]
    fn probe_reads_canonical_header() {
        let spec = WavSpec {
            channels: 1,
            sample_rate: 22050,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        let mut cursor = Cursor::new(Vec::new());
        {
            let mut writer = hound::WavWriter::new(&mut cursor, spec).unwrap();
            for s in [0i16, 100, -100] {
                writer.write_sample(s).unwrap();
            }
            writer.finalize().unwrap();
        }
        let probed = probe_header(cursor.get_ref()).unwrap();

        assert_eq!(probed.spec, spec);
        assert_eq!(probed.data_offset, 44);
    }

    #[test]
    fn probe_fails_on_opaque_header() {
        assert!(probe_header(&[0u8; 64]).is_err());
    }
}
