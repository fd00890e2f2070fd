//! Point cloud file import
//!
//! Supported inputs:
//! - PCD: `DATA ascii` and uncompressed `DATA binary`
//! - PLY: `ascii` and `binary_little_endian`
//! - XYZ/TXT: one `x y z [...]` row per line
//!
//! Only positions are read. Any other per-point fields are skipped.

use super::{PointCloud, MAX_POINTS};
use crate::annotate::Point3;
use std::path::Path;

/// Errors from loading a point cloud
#[derive(Debug)]
pub enum CloudError {
    Io(std::io::Error),
    /// `line` is 1-based; binary payload errors report the first line after the header
    Parse { line: usize, message: String },
    Unsupported(String),
    TooLarge(usize),
}

impl std::fmt::Display for CloudError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            CloudError::Io(e) => write!(f, "IO error: {}", e),
            CloudError::Parse { line, message } => write!(f, "Parse error: line {}: {}", line, message),
            CloudError::Unsupported(what) => write!(f, "Unsupported point cloud: {}", what),
            CloudError::TooLarge(n) => write!(f, "Too many points: {} (max {})", n, MAX_POINTS),
        }
    }
}

impl std::error::Error for CloudError {}

impl From<std::io::Error> for CloudError {
    fn from(e: std::io::Error) -> Self {
        CloudError::Io(e)
    }
}

fn parse_err(line: usize, message: impl Into<String>) -> CloudError {
    CloudError::Parse { line, message: message.into() }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloudFormat {
    Pcd,
    Ply,
    Xyz,
}

impl CloudFormat {
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "pcd" => Some(CloudFormat::Pcd),
            "ply" => Some(CloudFormat::Ply),
            "xyz" | "txt" => Some(CloudFormat::Xyz),
            _ => None,
        }
    }
}

/// Load a point cloud, optionally rolling Z-up data into the Y-up frame
pub fn load_cloud(path: &Path, z_up_source: bool) -> Result<PointCloud, CloudError> {
    let format = CloudFormat::from_path(path)
        .ok_or_else(|| CloudError::Unsupported(format!("unknown extension: {}", path.display())))?;
    let bytes = std::fs::read(path)?;
    let mut cloud = parse_cloud(&bytes, format)?;
    if z_up_source {
        cloud.roll_z_up();
    }
    log::info!("Loaded {} points from {}", cloud.len(), path.display());
    Ok(cloud)
}

pub fn parse_cloud(bytes: &[u8], format: CloudFormat) -> Result<PointCloud, CloudError> {
    let points = match format {
        CloudFormat::Pcd => parse_pcd(bytes)?,
        CloudFormat::Ply => parse_ply(bytes)?,
        CloudFormat::Xyz => parse_xyz(&String::from_utf8_lossy(bytes))?,
    };
    let total = points.len();
    let cloud = PointCloud::from_points(points);
    if cloud.len() < total {
        log::warn!("Skipped {} points with non-finite coordinates", total - cloud.len());
    }
    Ok(cloud)
}

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

/// Scalar storage type of one binary field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Scalar {
    I8,
    U8,
    I16,
    U16,
    I32,
    U32,
    F32,
    F64,
}

impl Scalar {
    fn size(self) -> usize {
        match self {
            Scalar::I8 | Scalar::U8 => 1,
            Scalar::I16 | Scalar::U16 => 2,
            Scalar::I32 | Scalar::U32 | Scalar::F32 => 4,
            Scalar::F64 => 8,
        }
    }

    /// PLY property type name
    fn from_ply(name: &str) -> Option<Self> {
        Some(match name {
            "char" | "int8" => Scalar::I8,
            "uchar" | "uint8" => Scalar::U8,
            "short" | "int16" => Scalar::I16,
            "ushort" | "uint16" => Scalar::U16,
            "int" | "int32" => Scalar::I32,
            "uint" | "uint32" => Scalar::U32,
            "float" | "float32" => Scalar::F32,
            "double" | "float64" => Scalar::F64,
            _ => return None,
        })
    }

    /// PCD `TYPE` letter plus `SIZE`
    fn from_pcd(kind: &str, size: usize) -> Option<Self> {
        Some(match (kind, size) {
            ("I", 1) => Scalar::I8,
            ("U", 1) => Scalar::U8,
            ("I", 2) => Scalar::I16,
            ("U", 2) => Scalar::U16,
            ("I", 4) => Scalar::I32,
            ("U", 4) => Scalar::U32,
            ("F", 4) => Scalar::F32,
            ("F", 8) => Scalar::F64,
            _ => return None,
        })
    }

    /// Read a little-endian value; `bytes` must hold at least `size()` bytes
    fn read_le(self, bytes: &[u8]) -> f64 {
        let mut buf = [0u8; 8];
        buf[..self.size()].copy_from_slice(&bytes[..self.size()]);
        match self {
            Scalar::I8 => buf[0] as i8 as f64,
            Scalar::U8 => buf[0] as f64,
            Scalar::I16 => i16::from_le_bytes([buf[0], buf[1]]) as f64,
            Scalar::U16 => u16::from_le_bytes([buf[0], buf[1]]) as f64,
            Scalar::I32 => i32::from_le_bytes([buf[0], buf[1], buf[2], buf[3]]) as f64,
            Scalar::U32 => u32::from_le_bytes([buf[0], buf[1], buf[2], buf[3]]) as f64,
            Scalar::F32 => f32::from_le_bytes([buf[0], buf[1], buf[2], buf[3]]) as f64,
            Scalar::F64 => f64::from_le_bytes(buf),
        }
    }
}

/// Header lines up to and including the one `is_last` accepts, plus the
/// byte offset where the payload starts
fn split_header<'a>(
    bytes: &'a [u8],
    is_last: impl Fn(&str) -> bool,
) -> Result<(Vec<&'a str>, usize), CloudError> {
    let mut lines = Vec::new();
    let mut offset = 0;
    while offset < bytes.len() {
        let end = bytes[offset..]
            .iter()
            .position(|&b| b == b'\n')
            .map(|p| offset + p + 1)
            .unwrap_or(bytes.len());
        let line = std::str::from_utf8(&bytes[offset..end])
            .map_err(|_| parse_err(lines.len() + 1, "header is not valid UTF-8"))?
            .trim();
        lines.push(line);
        offset = end;
        if is_last(line) {
            return Ok((lines, offset));
        }
    }
    Err(parse_err(lines.len(), "unexpected end of header"))
}

fn parse_usize(s: &str, line: usize, what: &str) -> Result<usize, CloudError> {
    s.parse()
        .map_err(|_| parse_err(line, format!("invalid {}: {}", what, s)))
}

fn parse_f64(s: &str, line: usize) -> Result<f64, CloudError> {
    s.parse()
        .map_err(|_| parse_err(line, format!("invalid number: {}", s)))
}

fn check_count(n: usize) -> Result<(), CloudError> {
    if n > MAX_POINTS {
        Err(CloudError::TooLarge(n))
    } else {
        Ok(())
    }
}

/// Rows of whitespace-separated values, taking x/y/z from fixed columns
fn parse_ascii_rows(
    body: &str,
    first_line: usize,
    columns: [usize; 3],
    expected: Option<usize>,
) -> Result<Vec<Point3>, CloudError> {
    let needed = columns.iter().copied().max().unwrap_or(0).saturating_add(1);
    let mut points = Vec::with_capacity(expected.unwrap_or(0));
    for (i, raw) in body.lines().enumerate() {
        let line = first_line + i;
        let raw = raw.trim();
        if raw.is_empty() || raw.starts_with('#') {
            continue;
        }
        if let Some(n) = expected {
            if points.len() == n {
                break;
            }
        }
        let parts: Vec<&str> = raw.split_whitespace().collect();
        if parts.len() < needed {
            return Err(parse_err(line, format!("expected {} values, found {}", needed, parts.len())));
        }
        points.push(Point3::new(
            parse_f64(parts[columns[0]], line)?,
            parse_f64(parts[columns[1]], line)?,
            parse_f64(parts[columns[2]], line)?,
        ));
        check_count(points.len())?;
    }
    if let Some(n) = expected {
        if points.len() < n {
            return Err(parse_err(first_line, format!("expected {} points, found {}", n, points.len())));
        }
    }
    Ok(points)
}

/// Fixed-stride binary records; `fields` gives (byte offset, type) of x/y/z
fn parse_binary_records(
    payload: &[u8],
    line: usize,
    count: usize,
    stride: usize,
    fields: [(usize, Scalar); 3],
) -> Result<Vec<Point3>, CloudError> {
    if stride == 0 || payload.len() / stride < count {
        return Err(parse_err(
            line,
            format!("binary data ends after {} of {} points", payload.len() / stride.max(1), count),
        ));
    }
    let read = |record: &[u8], (offset, scalar): (usize, Scalar)| scalar.read_le(&record[offset..]);
    Ok(payload
        .chunks_exact(stride)
        .take(count)
        .map(|r| Point3::new(read(r, fields[0]), read(r, fields[1]), read(r, fields[2])))
        .collect())
}

// ---------------------------------------------------------------------------
// PCD
// ---------------------------------------------------------------------------

pub fn parse_pcd(bytes: &[u8]) -> Result<Vec<Point3>, CloudError> {
    let (header, body_start) = split_header(bytes, |l| l.starts_with("DATA"))?;

    let mut fields: Vec<&str> = Vec::new();
    let mut sizes: Vec<usize> = Vec::new();
    let mut types: Vec<&str> = Vec::new();
    let mut counts: Vec<usize> = Vec::new();
    let mut points: Option<usize> = None;
    let mut width_height: (Option<usize>, Option<usize>) = (None, None);
    let mut data = "";

    for (i, &line) in header.iter().enumerate() {
        let line_num = i + 1;
        let mut parts = line.split_whitespace();
        let Some(key) = parts.next() else { continue };
        let values: Vec<&str> = parts.collect();
        match key {
            _ if key.starts_with('#') => {}
            "FIELDS" => fields = values,
            "SIZE" => {
                sizes = values
                    .iter()
                    .map(|v| parse_usize(v, line_num, "SIZE"))
                    .collect::<Result<_, _>>()?
            }
            "TYPE" => types = values,
            "COUNT" => {
                counts = values
                    .iter()
                    .map(|v| parse_usize(v, line_num, "COUNT"))
                    .collect::<Result<_, _>>()?
            }
            "WIDTH" => width_height.0 = values.first().map(|v| parse_usize(v, line_num, "WIDTH")).transpose()?,
            "HEIGHT" => width_height.1 = values.first().map(|v| parse_usize(v, line_num, "HEIGHT")).transpose()?,
            "POINTS" => points = values.first().map(|v| parse_usize(v, line_num, "POINTS")).transpose()?,
            "DATA" => data = values.first().copied().unwrap_or(""),
            _ => {}
        }
    }
    let header_lines = header.len();

    if counts.is_empty() {
        counts = vec![1; fields.len()];
    }
    let column = |name: &str| {
        fields
            .iter()
            .position(|f| *f == name)
            .ok_or_else(|| parse_err(header_lines, format!("missing field {}", name)))
    };
    let xyz = [column("x")?, column("y")?, column("z")?];
    if counts.len() != fields.len() {
        return Err(parse_err(header_lines, "COUNT does not match FIELDS"));
    }
    if let Some(&field) = xyz.iter().find(|&&f| counts[f] == 0) {
        return Err(parse_err(header_lines, format!("field {} has COUNT 0", fields[field])));
    }

    let count = match (points, width_height) {
        (Some(n), _) => n,
        (None, (Some(w), Some(h))) => w.saturating_mul(h),
        _ => return Err(parse_err(header_lines, "missing POINTS")),
    };
    check_count(count)?;

    // Columns/offsets of x/y/z account for multi-count fields before them
    match data {
        "ascii" => {
            let mut cols = [0usize; 3];
            for (c, &field) in cols.iter_mut().zip(xyz.iter()) {
                *c = counts[..field]
                    .iter()
                    .try_fold(0usize, |total, n| total.checked_add(*n))
                    .ok_or_else(|| parse_err(header_lines, "COUNT overflows the row width"))?;
            }
            let body = String::from_utf8_lossy(&bytes[body_start..]);
            parse_ascii_rows(&body, header_lines + 1, cols, Some(count))
        }
        "binary" => {
            if sizes.len() != fields.len() || types.len() != fields.len() {
                return Err(parse_err(header_lines, "SIZE/TYPE do not match FIELDS"));
            }
            let stride = pcd_record_bytes(&sizes, &counts, header_lines)?;
            let mut layout = [(0usize, Scalar::F32); 3];
            for (slot, &field) in layout.iter_mut().zip(xyz.iter()) {
                let offset = pcd_record_bytes(&sizes[..field], &counts[..field], header_lines)?;
                let scalar = Scalar::from_pcd(types[field], sizes[field]).ok_or_else(|| {
                    CloudError::Unsupported(format!("PCD field type {}{}", types[field], sizes[field]))
                })?;
                if offset.saturating_add(scalar.size()) > stride {
                    return Err(parse_err(header_lines, format!("field {} lies outside the record", fields[field])));
                }
                *slot = (offset, scalar);
            }
            parse_binary_records(&bytes[body_start..], header_lines + 1, count, stride, layout)
        }
        other => Err(CloudError::Unsupported(format!("PCD DATA {}", other))),
    }
}

/// Bytes taken by the given fields in one binary record
fn pcd_record_bytes(sizes: &[usize], counts: &[usize], line: usize) -> Result<usize, CloudError> {
    sizes
        .iter()
        .zip(counts)
        .try_fold(0usize, |total, (s, c)| s.checked_mul(*c).and_then(|n| total.checked_add(n)))
        .ok_or_else(|| parse_err(line, "SIZE x COUNT overflows the record size"))
}

// ---------------------------------------------------------------------------
// PLY
// ---------------------------------------------------------------------------

#[derive(Debug)]
struct PlyElement<'a> {
    name: &'a str,
    count: usize,
    /// (property name, type); None marks a list property
    properties: Vec<(&'a str, Option<Scalar>)>,
}

pub fn parse_ply(bytes: &[u8]) -> Result<Vec<Point3>, CloudError> {
    if !bytes.starts_with(b"ply") {
        return Err(parse_err(1, "missing ply magic"));
    }
    let (header, body_start) = split_header(bytes, |l| l == "end_header")?;
    let header_lines = header.len();

    let mut format = "";
    let mut elements: Vec<PlyElement> = Vec::new();
    for (i, &line) in header.iter().enumerate() {
        let line_num = i + 1;
        let parts: Vec<&str> = line.split_whitespace().collect();
        match parts.as_slice() {
            ["format", f, ..] => format = *f,
            ["element", name, count] => elements.push(PlyElement {
                name: *name,
                count: parse_usize(count, line_num, "element count")?,
                properties: Vec::new(),
            }),
            ["property", "list", .., name] => {
                let el = elements
                    .last_mut()
                    .ok_or_else(|| parse_err(line_num, "property before element"))?;
                el.properties.push((*name, None));
            }
            ["property", ty, name] => {
                let el = elements
                    .last_mut()
                    .ok_or_else(|| parse_err(line_num, "property before element"))?;
                let scalar = Scalar::from_ply(ty)
                    .ok_or_else(|| parse_err(line_num, format!("unknown property type {}", ty)))?;
                el.properties.push((*name, Some(scalar)));
            }
            _ => {}
        }
    }

    let vertex_idx = elements
        .iter()
        .position(|e| e.name == "vertex")
        .ok_or_else(|| parse_err(header_lines, "no vertex element"))?;
    let vertex = &elements[vertex_idx];
    check_count(vertex.count)?;
    // Elements before the vertex block have to be skipped
    let skipped = &elements[..vertex_idx];

    let property = |name: &str| {
        vertex
            .properties
            .iter()
            .position(|(n, _)| *n == name)
            .ok_or_else(|| parse_err(header_lines, format!("missing vertex property {}", name)))
    };
    let xyz = [property("x")?, property("y")?, property("z")?];

    match format {
        "ascii" => {
            let body = String::from_utf8_lossy(&bytes[body_start..]);
            let skip_rows: usize = skipped.iter().map(|e| e.count).sum();
            let mut lines = body.lines();
            for _ in 0..skip_rows {
                lines.next();
            }
            let rest: Vec<&str> = lines.collect();
            parse_ascii_rows(&rest.join("\n"), header_lines + skip_rows + 1, xyz, Some(vertex.count))
        }
        "binary_little_endian" => {
            let record_size = |el: &PlyElement| -> Result<usize, CloudError> {
                el.properties
                    .iter()
                    .map(|(name, ty)| {
                        ty.map(Scalar::size).ok_or_else(|| {
                            CloudError::Unsupported(format!("binary list property {} in {}", name, el.name))
                        })
                    })
                    .sum()
            };
            let mut start = body_start;
            for el in skipped {
                start = start.saturating_add(record_size(el)?.saturating_mul(el.count));
            }
            let stride = record_size(vertex)?;
            let mut layout = [(0usize, Scalar::F32); 3];
            for (slot, &prop) in layout.iter_mut().zip(xyz.iter()) {
                let offset = vertex.properties[..prop]
                    .iter()
                    .map(|(_, ty)| ty.map(Scalar::size).unwrap_or(0))
                    .sum();
                let scalar = vertex.properties[prop].1.unwrap_or(Scalar::F32);
                *slot = (offset, scalar);
            }
            let payload = bytes.get(start..).unwrap_or(&[]);
            parse_binary_records(payload, header_lines + 1, vertex.count, stride, layout)
        }
        other => Err(CloudError::Unsupported(format!("PLY format {}", other))),
    }
}

// ---------------------------------------------------------------------------
// XYZ
// ---------------------------------------------------------------------------

pub fn parse_xyz(text: &str) -> Result<Vec<Point3>, CloudError> {
    parse_ascii_rows(text, 1, [0, 1, 2], None)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn f32_record(values: &[f32]) -> Vec<u8> {
        values.iter().flat_map(|v| v.to_le_bytes()).collect()
    }

    #[test]
    fn test_parse_xyz() {
        let text = "# comment\n1 2 3\n\n4.5 -1 0 255 0 0\n";
        let pts = parse_xyz(text).unwrap();
        assert_eq!(pts, vec![Point3::new(1.0, 2.0, 3.0), Point3::new(4.5, -1.0, 0.0)]);
    }

    #[test]
    fn test_parse_xyz_reports_line() {
        match parse_xyz("1 2 3\n1 2\n") {
            Err(CloudError::Parse { line, .. }) => assert_eq!(line, 2),
            other => panic!("expected parse error, got {:?}", other),
        }
        assert!(matches!(parse_xyz("1 2 x\n"), Err(CloudError::Parse { line: 1, .. })));
    }

    #[test]
    fn test_parse_pcd_ascii() {
        let pcd = "# .PCD v0.7\nVERSION 0.7\nFIELDS intensity x y z\nSIZE 4 4 4 4\nTYPE F F F F\nCOUNT 1 1 1 1\nWIDTH 2\nHEIGHT 1\nPOINTS 2\nDATA ascii\n0.5 1 2 3\n0.1 -1 -2 -3\n";
        let pts = parse_pcd(pcd.as_bytes()).unwrap();
        assert_eq!(pts, vec![Point3::new(1.0, 2.0, 3.0), Point3::new(-1.0, -2.0, -3.0)]);
    }

    #[test]
    fn test_parse_pcd_binary() {
        let mut bytes = b"VERSION 0.7\nFIELDS x y z rgb\nSIZE 4 4 4 4\nTYPE F F F U\nCOUNT 1 1 1 1\nWIDTH 2\nHEIGHT 1\nPOINTS 2\nDATA binary\n".to_vec();
        bytes.extend(f32_record(&[1.0, 2.0, 3.0, 0.0]));
        bytes.extend(f32_record(&[4.0, 5.0, 6.0, 0.0]));
        let pts = parse_pcd(&bytes).unwrap();
        assert_eq!(pts[1], Point3::new(4.0, 5.0, 6.0));
    }

    #[test]
    fn test_parse_pcd_binary_multi_count_field_before_xyz() {
        let mut bytes = b"FIELDS normal x y z\nSIZE 4 4 4 4\nTYPE F F F F\nCOUNT 3 1 1 1\nPOINTS 2\nDATA binary\n".to_vec();
        bytes.extend(f32_record(&[0.0, 0.0, 1.0, 1.5, -2.0, 3.25]));
        bytes.extend(f32_record(&[1.0, 0.0, 0.0, 7.0, 8.0, 9.0]));
        let pts = parse_pcd(&bytes).unwrap();
        assert_eq!(pts, vec![Point3::new(1.5, -2.0, 3.25), Point3::new(7.0, 8.0, 9.0)]);
    }

    #[test]
    fn test_parse_pcd_binary_zero_count_xyz_rejected() {
        let mut bytes = b"FIELDS x y z\nSIZE 4 4 4\nTYPE F F F\nCOUNT 1 1 0\nPOINTS 1\nDATA binary\n".to_vec();
        bytes.extend([0u8; 8]);
        assert!(matches!(parse_pcd(&bytes), Err(CloudError::Parse { line: 6, .. })));
    }

    #[test]
    fn test_parse_pcd_binary_size_overflow_rejected() {
        let header = format!(
            "FIELDS x y z pad\nSIZE 4 4 4 {}\nTYPE F F F U\nCOUNT 1 1 1 2\nPOINTS 1\nDATA binary\n",
            usize::MAX
        );
        let mut bytes = header.into_bytes();
        bytes.extend(f32_record(&[1.0, 2.0, 3.0]));
        assert!(matches!(parse_pcd(&bytes), Err(CloudError::Parse { .. })));
    }

    #[test]
    fn test_parse_pcd_ascii_zero_count_xyz_rejected() {
        let pcd = "FIELDS x y z\nCOUNT 0 1 1\nPOINTS 1\nDATA ascii\n1 2 3\n";
        assert!(matches!(parse_pcd(pcd.as_bytes()), Err(CloudError::Parse { line: 4, .. })));
    }

    #[test]
    fn test_parse_pcd_truncated_binary() {
        let mut bytes = b"FIELDS x y z\nSIZE 4 4 4\nTYPE F F F\nPOINTS 2\nDATA binary\n".to_vec();
        bytes.extend(f32_record(&[1.0, 2.0, 3.0]));
        assert!(matches!(parse_pcd(&bytes), Err(CloudError::Parse { line: 6, .. })));
    }

    #[test]
    fn test_parse_pcd_compressed_unsupported() {
        let pcd = "FIELDS x y z\nSIZE 4 4 4\nTYPE F F F\nPOINTS 1\nDATA binary_compressed\n";
        assert!(matches!(parse_pcd(pcd.as_bytes()), Err(CloudError::Unsupported(_))));
    }

    #[test]
    fn test_parse_pcd_too_many_points() {
        let pcd = format!("FIELDS x y z\nPOINTS {}\nDATA ascii\n", MAX_POINTS + 1);
        assert!(matches!(parse_pcd(pcd.as_bytes()), Err(CloudError::TooLarge(_))));
    }

    #[test]
    fn test_parse_ply_ascii_skips_leading_element() {
        let ply = "ply\nformat ascii 1.0\nelement camera 1\nproperty float fov\nelement vertex 2\nproperty float x\nproperty float y\nproperty float z\nproperty uchar red\nelement face 0\nproperty list uchar int vertex_indices\nend_header\n60\n1 2 3 255\n4 5 6 0\n";
        let pts = parse_ply(ply.as_bytes()).unwrap();
        assert_eq!(pts, vec![Point3::new(1.0, 2.0, 3.0), Point3::new(4.0, 5.0, 6.0)]);
    }

    #[test]
    fn test_parse_ply_binary_mixed_types() {
        let mut bytes = b"ply\nformat binary_little_endian 1.0\nelement vertex 2\nproperty uchar flag\nproperty double x\nproperty double y\nproperty float z\nend_header\n".to_vec();
        for (flag, x, y, z) in [(1u8, 1.5f64, -2.0f64, 3.0f32), (0, 10.0, 20.0, 30.0)] {
            bytes.push(flag);
            bytes.extend(x.to_le_bytes());
            bytes.extend(y.to_le_bytes());
            bytes.extend(z.to_le_bytes());
        }
        let pts = parse_ply(&bytes).unwrap();
        assert_eq!(pts, vec![Point3::new(1.5, -2.0, 3.0), Point3::new(10.0, 20.0, 30.0)]);
    }

    #[test]
    fn test_parse_ply_big_endian_unsupported() {
        let ply = "ply\nformat binary_big_endian 1.0\nelement vertex 0\nproperty float x\nproperty float y\nproperty float z\nend_header\n";
        assert!(matches!(parse_ply(ply.as_bytes()), Err(CloudError::Unsupported(_))));
    }

    #[test]
    fn test_parse_ply_missing_header_end() {
        assert!(matches!(parse_ply(b"ply\nformat ascii 1.0\n"), Err(CloudError::Parse { .. })));
    }

    #[test]
    fn test_load_cloud_rolls_z_up() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scan.xyz");
        std::fs::write(&path, "1 2 3\nnan 0 0\n").unwrap();

        let cloud = load_cloud(&path, true).unwrap();
        assert_eq!(cloud.points, vec![Point3::new(1.0, 3.0, -2.0)]);

        let raw = load_cloud(&path, false).unwrap();
        assert_eq!(raw.points, vec![Point3::new(1.0, 2.0, 3.0)]);
    }

    #[test]
    fn test_load_cloud_unknown_extension() {
        assert!(matches!(
            load_cloud(Path::new("scan.las"), false),
            Err(CloudError::Unsupported(_))
        ));
    }
}
