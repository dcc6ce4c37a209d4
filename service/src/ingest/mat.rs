use ppgcore::prelude::PipelineError;
use std::path::Path;

// MAT level-5 element type tags.
const MI_INT8: u32 = 1;
const MI_INT32: u32 = 5;
const MI_UINT32: u32 = 6;
const MI_SINGLE: u32 = 7;
const MI_DOUBLE: u32 = 9;
const MI_MATRIX: u32 = 14;
const MI_COMPRESSED: u32 = 15;

/// Minimal MAT level-5 reader: scans top-level data elements of an
/// uncompressed little-endian file for a numeric matrix named `ppg` and
/// returns its real part flattened in storage order.
pub fn read_mat_signal(path: &Path) -> anyhow::Result<Vec<f64>> {
    let bytes = std::fs::read(path)?;
    parse_ppg_matrix(&bytes).map_err(Into::into)
}

struct MatElement<'a> {
    data_type: u32,
    payload: &'a [u8],
}

fn parse_ppg_matrix(bytes: &[u8]) -> Result<Vec<f64>, PipelineError> {
    if bytes.len() < 128 {
        return Err(PipelineError::UnsupportedFormat(
            "file too short for a MAT level-5 header".into(),
        ));
    }
    if &bytes[126..128] != b"IM" {
        return Err(PipelineError::UnsupportedFormat(
            "only little-endian MAT level-5 files are supported".into(),
        ));
    }

    let mut offset = 128;
    while offset < bytes.len() {
        let (element, next) = next_element(bytes, offset)?;
        match element.data_type {
            MI_MATRIX => {
                if let Some(samples) = parse_matrix(element.payload)? {
                    return Ok(samples);
                }
            }
            MI_COMPRESSED => {
                return Err(PipelineError::UnsupportedFormat(
                    "compressed MAT elements are not supported; re-save without compression"
                        .into(),
                ));
            }
            _ => {}
        }
        offset = next;
    }
    Err(PipelineError::UnsupportedFormat(
        "no 'ppg' variable found in the MAT file".into(),
    ))
}

fn truncated() -> PipelineError {
    PipelineError::UnsupportedFormat("truncated MAT element".into())
}

fn le_u32(bytes: &[u8], at: usize) -> Option<u32> {
    let chunk = bytes.get(at..at + 4)?;
    Some(u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
}

/// Reads one tagged data element, handling the packed small-element form,
/// and returns it with the 8-byte-aligned offset of the next element.
fn next_element(bytes: &[u8], offset: usize) -> Result<(MatElement<'_>, usize), PipelineError> {
    let word = le_u32(bytes, offset).ok_or_else(truncated)?;
    let small_size = (word >> 16) as usize;
    if small_size != 0 {
        let payload = bytes
            .get(offset + 4..offset + 4 + small_size)
            .ok_or_else(truncated)?;
        Ok((
            MatElement {
                data_type: word & 0xffff,
                payload,
            },
            offset + 8,
        ))
    } else {
        let size = le_u32(bytes, offset + 4).ok_or_else(truncated)? as usize;
        let payload = bytes
            .get(offset + 8..offset + 8 + size)
            .ok_or_else(truncated)?;
        let padded = (size + 7) & !7;
        Ok((
            MatElement {
                data_type: word,
                payload,
            },
            offset + 8 + padded,
        ))
    }
}

/// Walks the subelements of a miMATRIX (array flags, dimensions, name, real
/// part). Returns `None` when the matrix is not the `ppg` variable.
fn parse_matrix(payload: &[u8]) -> Result<Option<Vec<f64>>, PipelineError> {
    let (flags, next) = next_element(payload, 0)?;
    if flags.data_type != MI_UINT32 {
        return Err(PipelineError::UnsupportedFormat(
            "malformed MAT array flags".into(),
        ));
    }
    let (dimensions, next) = next_element(payload, next)?;
    if dimensions.data_type != MI_INT32 {
        return Err(PipelineError::UnsupportedFormat(
            "malformed MAT dimensions".into(),
        ));
    }
    let (name, next) = next_element(payload, next)?;
    if name.data_type != MI_INT8 {
        return Err(PipelineError::UnsupportedFormat(
            "malformed MAT array name".into(),
        ));
    }
    if name.payload != b"ppg" {
        return Ok(None);
    }

    let (real, _) = next_element(payload, next)?;
    let samples = match real.data_type {
        MI_DOUBLE => real
            .payload
            .chunks_exact(8)
            .map(|c| f64::from_le_bytes([c[0], c[1], c[2], c[3], c[4], c[5], c[6], c[7]]))
            .collect(),
        MI_SINGLE => real
            .payload
            .chunks_exact(4)
            .map(|c| f64::from(f32::from_le_bytes([c[0], c[1], c[2], c[3]])))
            .collect(),
        other => {
            return Err(PipelineError::UnsupportedFormat(format!(
                "'ppg' stored as MAT element type {}; only double or single precision is supported",
                other
            )))
        }
    };
    Ok(Some(samples))
}
