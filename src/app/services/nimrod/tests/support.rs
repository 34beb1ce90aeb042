//! Builders for synthetic NIMROD composites.

use crate::app::services::nimrod::header::HEADER_LEN;

/// Serialize a 512-byte header for a grid with the given edge geometry.
///
/// `x_min`/`y_max` are outer edges; the header stores the centre of the
/// north-west cell. Validity time is fixed at 2008-02-25 20:00.
pub fn header_bytes(rows: usize, cols: usize, x_min: f64, y_max: f64, cell: f64) -> Vec<u8> {
    let mut bytes = vec![0u8; HEADER_LEN];

    let mut put_int = |ix: usize, value: i16| {
        bytes[ix * 2..ix * 2 + 2].copy_from_slice(&value.to_be_bytes());
    };
    put_int(0, 2008);
    put_int(1, 2);
    put_int(2, 25);
    put_int(3, 20);
    put_int(4, 0);
    put_int(15, rows as i16);
    put_int(16, cols as i16);

    let mut put_real = |ix: usize, value: f64| {
        let at = 62 + ix * 4;
        bytes[at..at + 4].copy_from_slice(&(value as f32).to_be_bytes());
    };
    put_real(2, y_max - cell / 2.0);
    put_real(3, cell);
    put_real(4, x_min + cell / 2.0);
    put_real(5, cell);

    bytes
}

/// Assemble a complete composite file from a header and raw i16 values.
pub fn nimrod_file(rows: usize, cols: usize, x_min: f64, y_max: f64, cell: f64, values: &[i16]) -> Vec<u8> {
    assert_eq!(values.len(), rows * cols);

    let mut out = Vec::new();
    push_record(&mut out, &header_bytes(rows, cols, x_min, y_max, cell));

    let mut data = Vec::with_capacity(values.len() * 2);
    for v in values {
        data.extend_from_slice(&v.to_be_bytes());
    }
    push_record(&mut out, &data);
    out
}

/// Frame a record body with Fortran leading and trailing byte counts.
pub fn push_record(out: &mut Vec<u8>, body: &[u8]) {
    out.extend_from_slice(&(body.len() as u32).to_be_bytes());
    out.extend_from_slice(body);
    out.extend_from_slice(&(body.len() as u32).to_be_bytes());
}
