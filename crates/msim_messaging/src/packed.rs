//! The packed-row wire format.
//!
//! `[row_count:int32][row_1 fields][row_2 fields]…`. Each row is encoded
//! with `bincode`, which already length-prefixes strings and writes
//! numeric fields in native width, without a hand-rolled per-field writer.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::io::Cursor;

/// Packs `rows` into the wire format, row-count header first.
pub fn pack_rows<T: Serialize>(rows: &[T]) -> Vec<u8> {
    let row_count = rows.len() as i32;
    let mut out = Vec::with_capacity(4 + rows.len() * 16);
    out.extend_from_slice(&row_count.to_le_bytes());
    for row in rows {
        let encoded = bincode::serialize(row).expect("row type must be bincode-serializable");
        out.extend_from_slice(&encoded);
    }
    out
}

/// Unpacks a buffer produced by [`pack_rows`]. Errors if the buffer is
/// shorter than the header or a row fails to decode.
pub fn unpack_rows<T: DeserializeOwned>(bytes: &[u8]) -> Result<Vec<T>, String> {
    if bytes.len() < 4 {
        return Err("packed buffer shorter than the row_count header".to_string());
    }
    let row_count = i32::from_le_bytes(bytes[0..4].try_into().unwrap()).max(0);
    let mut cursor = Cursor::new(&bytes[4..]);
    let mut rows = Vec::with_capacity(row_count as usize);
    for _ in 0..row_count {
        let row = bincode::deserialize_from(&mut cursor).map_err(|e| e.to_string())?;
        rows.push(row);
    }
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Row {
        id: i32,
        name: String,
    }

    #[test]
    fn round_trips_rows() {
        let rows = vec![
            Row { id: 1, name: "a".into() },
            Row { id: 2, name: "bb".into() },
        ];
        let packed = pack_rows(&rows);
        let unpacked: Vec<Row> = unpack_rows(&packed).unwrap();
        assert_eq!(rows, unpacked);
    }

    #[test]
    fn empty_vector_packs_to_just_the_header() {
        let rows: Vec<Row> = Vec::new();
        let packed = pack_rows(&rows);
        assert_eq!(packed.len(), 4);
        let unpacked: Vec<Row> = unpack_rows(&packed).unwrap();
        assert!(unpacked.is_empty());
    }

    #[test]
    fn truncated_header_is_an_error() {
        let result: Result<Vec<Row>, String> = unpack_rows(&[0, 1]);
        assert!(result.is_err());
    }
}
