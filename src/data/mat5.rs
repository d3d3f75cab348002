//! Minimal level-5 MAT-file writer.
//!
//! Only what the fixture generator and the loader tests need: little-endian
//! files holding double-precision column vectors. Reading goes through the
//! `matfile` crate; this module exists because nothing in our dependency set
//! writes the format.

use std::io;
use std::path::Path;

const MI_INT8: u32 = 1;
const MI_INT32: u32 = 5;
const MI_UINT32: u32 = 6;
const MI_DOUBLE: u32 = 9;
const MI_MATRIX: u32 = 14;
const MX_DOUBLE_CLASS: u32 = 6;

/// Write the named arrays to `path` as a MAT 5.0 file, each stored as an
/// `f64` column vector.
pub fn write_arrays(path: &Path, arrays: &[(&str, &[f64])]) -> io::Result<()> {
    let mut buf = Vec::new();
    write_header(&mut buf);
    for (name, values) in arrays {
        write_matrix(&mut buf, name, values);
    }
    std::fs::write(path, buf)
}

fn write_header(buf: &mut Vec<u8>) {
    // 116 bytes of descriptive text, space-padded
    let text = b"MATLAB 5.0 MAT-file, generated by regen-data";
    let mut header = [b' '; 116];
    header[..text.len()].copy_from_slice(text);
    buf.extend_from_slice(&header);
    // subsystem data offset (none)
    buf.extend_from_slice(&[0u8; 8]);
    // version 0x0100 + little-endian indicator
    buf.extend_from_slice(&0x0100u16.to_le_bytes());
    buf.extend_from_slice(b"IM");
}

fn write_matrix(buf: &mut Vec<u8>, name: &str, values: &[f64]) {
    let name_bytes = name.as_bytes();
    let name_padded = name_bytes.len().div_ceil(8) * 8;
    let data_bytes = values.len() * 8;
    // flags + dimensions + name + real part, each with an 8-byte tag
    let total = 16 + 16 + 8 + name_padded + 8 + data_bytes;

    buf.extend_from_slice(&MI_MATRIX.to_le_bytes());
    buf.extend_from_slice(&(total as u32).to_le_bytes());

    // array flags: class mxDOUBLE_CLASS, no complex/global/logical bits
    buf.extend_from_slice(&MI_UINT32.to_le_bytes());
    buf.extend_from_slice(&8u32.to_le_bytes());
    buf.extend_from_slice(&MX_DOUBLE_CLASS.to_le_bytes());
    buf.extend_from_slice(&0u32.to_le_bytes());

    // dimensions: n x 1 column vector
    buf.extend_from_slice(&MI_INT32.to_le_bytes());
    buf.extend_from_slice(&8u32.to_le_bytes());
    buf.extend_from_slice(&(values.len() as i32).to_le_bytes());
    buf.extend_from_slice(&1i32.to_le_bytes());

    // array name, zero-padded to an 8-byte boundary
    buf.extend_from_slice(&MI_INT8.to_le_bytes());
    buf.extend_from_slice(&(name_bytes.len() as u32).to_le_bytes());
    buf.extend_from_slice(name_bytes);
    buf.resize(buf.len() + name_padded - name_bytes.len(), 0);

    // real part
    buf.extend_from_slice(&MI_DOUBLE.to_le_bytes());
    buf.extend_from_slice(&(data_bytes as u32).to_le_bytes());
    for v in values {
        buf.extend_from_slice(&v.to_le_bytes());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use matfile::MatFile;

    #[test]
    fn written_file_parses_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("roundtrip.mat");
        write_arrays(
            &path,
            &[("t", &[0.0, 0.5, 1.0][..]), ("bat_soc", &[100.0, 99.0, 98.0][..])],
        )
        .unwrap();

        let mat = MatFile::parse(std::fs::File::open(&path).unwrap()).unwrap();
        let t = mat.find_by_name("t").expect("t array present");
        assert_eq!(t.size(), &[3, 1]);
        match t.data() {
            matfile::NumericData::Double { real, .. } => {
                assert_eq!(real, &[0.0, 0.5, 1.0]);
            }
            other => panic!("unexpected data kind: {other:?}"),
        }
        assert!(mat.find_by_name("bat_soc").is_some());
        assert!(mat.find_by_name("rotor_speed").is_none());
    }
}
