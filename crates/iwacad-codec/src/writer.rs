//! Tagged-record stream writer.
//!
//! [`CadWriter`] encodes individual records; [`save_arena`] writes every
//! live record of an arena in the canonical order: objects, then
//! polygons, then points, each in slot order.

use std::io::Write;

use iwacad_arena::GeometryArena;
use iwacad_core::{Object, ObjectId, Point, PointId, Polygon, PolygonId};
use tracing::info;

use crate::error::CodecError;
use crate::layout::{encode_object, encode_point, encode_polygon, RecordTag, RECORD_HEADER_SIZE};
use crate::report::SaveReport;

/// Writes tagged records to a byte stream.
///
/// Generic over `W: Write` so tests can use `Vec<u8>` and production
/// code can use `BufWriter<File>`.
///
/// # Examples
///
/// ```
/// use iwacad_codec::{CadReader, CadWriter, Payload};
/// use iwacad_core::{Point, PointId};
///
/// let mut buf = Vec::new();
/// let mut writer = CadWriter::new(&mut buf);
/// writer.write_point(PointId(3), &Point::new(1.0, 2.0, 3.0)).unwrap();
/// assert_eq!(writer.records_written(), 1);
/// writer.finish().unwrap();
///
/// let mut reader = CadReader::new(buf.as_slice());
/// let record = reader.next_record().unwrap().unwrap();
/// assert_eq!(record.raw_index, 3);
/// assert_eq!(record.payload, Payload::Point(Point::new(1.0, 2.0, 3.0)));
/// assert!(reader.next_record().unwrap().is_none());
/// ```
pub struct CadWriter<W: Write> {
    writer: W,
    records_written: u64,
    bytes_written: u64,
}

impl<W: Write> CadWriter<W> {
    /// Wrap a sink. Nothing is written until the first record.
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            records_written: 0,
            bytes_written: 0,
        }
    }

    /// Write an object record.
    pub fn write_object(&mut self, id: ObjectId, object: &Object) -> Result<(), CodecError> {
        self.write_record(RecordTag::Object, id.0, &encode_object(object))
    }

    /// Write a polygon record.
    pub fn write_polygon(&mut self, id: PolygonId, polygon: &Polygon) -> Result<(), CodecError> {
        self.write_record(RecordTag::Polygon, id.0, &encode_polygon(polygon))
    }

    /// Write a point record.
    pub fn write_point(&mut self, id: PointId, point: &Point) -> Result<(), CodecError> {
        self.write_record(RecordTag::Point, id.0, &encode_point(point))
    }

    fn write_record(&mut self, tag: RecordTag, index: i16, payload: &[u8]) -> Result<(), CodecError> {
        let [hi, lo] = index.to_be_bytes();
        self.writer.write_all(&[tag.byte(), hi, lo])?;
        self.writer.write_all(payload)?;
        self.records_written += 1;
        self.bytes_written += (RECORD_HEADER_SIZE + payload.len()) as u64;
        Ok(())
    }

    /// Number of records written so far.
    pub fn records_written(&self) -> u64 {
        self.records_written
    }

    /// Number of bytes written so far.
    pub fn bytes_written(&self) -> u64 {
        self.bytes_written
    }

    /// Flush and return the sink.
    pub fn finish(mut self) -> Result<W, CodecError> {
        self.writer.flush()?;
        Ok(self.writer)
    }
}

/// Write every live record of `arena` to `writer`.
///
/// Cleared slots are omitted. Indices are written as slot numbers, so the
/// output always reads back through the direct interpretation.
pub fn save_arena<W: Write>(arena: &GeometryArena, writer: W) -> Result<SaveReport, CodecError> {
    let mut out = CadWriter::new(writer);
    let mut report = SaveReport::default();

    for (id, object) in arena.objects().iter_live() {
        out.write_object(id, object)?;
        report.objects += 1;
    }
    for (id, polygon) in arena.polygons().iter_live() {
        out.write_polygon(id, polygon)?;
        report.polygons += 1;
    }
    for (id, point) in arena.points().iter_live() {
        out.write_point(id, point)?;
        report.points += 1;
    }

    report.bytes_written = out.bytes_written();
    out.finish()?;
    info!(
        objects = report.objects,
        polygons = report.polygons,
        points = report.points,
        bytes = report.bytes_written,
        "geometry stream saved"
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn record_header_is_tag_then_big_endian_index() {
        let mut buf = Vec::new();
        let mut w = CadWriter::new(&mut buf);
        w.write_polygon(PolygonId(0x0203), &Polygon::new(PointId(0), 1, 3))
            .unwrap();
        assert_eq!(w.bytes_written(), 17);
        w.finish().unwrap();
        assert_eq!(&buf[..3], &[1, 0x02, 0x03]);
        assert_eq!(buf.len(), 17);
    }

    #[test]
    fn empty_arena_writes_nothing() {
        let mut buf = Vec::new();
        let report = save_arena(&GeometryArena::new(), &mut buf).unwrap();
        assert!(buf.is_empty());
        assert_eq!(report.records(), 0);
    }

    #[test]
    fn save_orders_tables_and_omits_holes() {
        let mut arena = GeometryArena::new();
        let tri = arena
            .add_polygon_from_coords(4, &[[0.0; 3], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]])
            .unwrap();
        let obj = arena.add_object(ObjectId::INVALID, [0.0; 3]).unwrap();
        arena.attach_polygon(obj, tri);
        arena.remove_point(PointId(1));

        let mut buf = Vec::new();
        let report = save_arena(&arena, &mut buf).unwrap();
        assert_eq!((report.objects, report.polygons, report.points), (1, 1, 2));
        assert_eq!(report.bytes_written, buf.len() as u64);
        assert_eq!(buf.len(), 43 + 17 + 2 * 35);

        assert_eq!(buf[0], RecordTag::Object.byte());
        assert_eq!(buf[43], RecordTag::Polygon.byte());
        assert_eq!(buf[60], RecordTag::Point.byte());
        assert_eq!(&buf[95..98], &[2, 0, 2]);
    }

    struct FailingSink;

    impl Write for FailingSink {
        fn write(&mut self, _: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::Other, "disk full"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn sink_errors_surface_as_io() {
        let mut arena = GeometryArena::new();
        arena.add_point(0.0, 0.0, 0.0).unwrap();
        let err = save_arena(&arena, FailingSink).unwrap_err();
        assert!(matches!(err, CodecError::Io(_)));
    }
}
