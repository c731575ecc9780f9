//! Incremental room writers
//!
//! Each writer emits its document prologue on the first room (or on finish
//! for an empty export), streams rooms as they arrive, and closes the
//! document in `finish`. Nothing but the current room is held in memory.

use super::types::ExportFormat;
use crate::error::{Error, Result};
use crate::types::CombinedRoom;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use std::io::{self, Write};

/// Sink for combined rooms in one output format
pub trait RoomWriter {
    /// Append one room to the document
    fn write_room(&mut self, room: &CombinedRoom) -> Result<()>;

    /// Close the document and flush the underlying writer
    fn finish(&mut self) -> Result<()>;

    /// Number of rooms written so far
    fn rooms_written(&self) -> usize;
}

/// Create the writer for `format` over `inner`
pub fn create_writer<'a, W: Write + 'a>(format: ExportFormat, inner: W) -> Box<dyn RoomWriter + 'a> {
    match format {
        ExportFormat::Json => Box::new(JsonRoomWriter::new(inner)),
        ExportFormat::Xml => Box::new(XmlRoomWriter::new(inner)),
    }
}

/// Stream `rooms` into a new `format` document on `inner`.
///
/// Stops at the first upstream error and returns it; whatever was written
/// before stays written and the document is left unclosed.
pub fn write_rooms<W, I>(format: ExportFormat, inner: W, rooms: I) -> Result<usize>
where
    W: Write,
    I: IntoIterator<Item = Result<CombinedRoom>>,
{
    let mut writer = create_writer(format, inner);
    for room in rooms {
        writer.write_room(&room?)?;
    }
    writer.finish()?;
    Ok(writer.rooms_written())
}

// ============================================================================
// JSON Writer
// ============================================================================

fn json_error(err: serde_json::Error) -> Error {
    if err.is_io() {
        Error::Io(err.into())
    } else {
        Error::Serialize(err)
    }
}

/// Writes `[room,room,...]` with compact objects
#[derive(Debug)]
pub struct JsonRoomWriter<W: Write> {
    inner: W,
    started: bool,
    rooms_written: usize,
}

impl<W: Write> JsonRoomWriter<W> {
    /// Create a JSON writer over `inner`
    pub fn new(inner: W) -> Self {
        Self {
            inner,
            started: false,
            rooms_written: 0,
        }
    }

    fn begin(&mut self) -> Result<()> {
        if !self.started {
            self.inner.write_all(b"[")?;
            self.started = true;
        }
        Ok(())
    }

    /// Give back the underlying writer
    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: Write> RoomWriter for JsonRoomWriter<W> {
    fn write_room(&mut self, room: &CombinedRoom) -> Result<()> {
        self.begin()?;
        if self.rooms_written > 0 {
            self.inner.write_all(b",")?;
        }
        serde_json::to_writer(&mut self.inner, room).map_err(json_error)?;
        self.rooms_written += 1;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.begin()?;
        self.inner.write_all(b"]")?;
        self.inner.flush()?;
        Ok(())
    }

    fn rooms_written(&self) -> usize {
        self.rooms_written
    }
}

// ============================================================================
// XML Writer
// ============================================================================

const ROOT_ELEMENT: &str = "rooms";
const ROOM_ELEMENT: &str = "room";
const STUDENTS_ELEMENT: &str = "students";
const STUDENT_ELEMENT: &str = "student";
const NAME_ELEMENT: &str = "name";
const ID_ATTRIBUTE: &str = "id";

fn xml_error(err: impl std::fmt::Display) -> Error {
    Error::Io(io::Error::other(format!("XML write failed: {err}")))
}

/// Writes a `<rooms>` document, one `<room>` element per room
pub struct XmlRoomWriter<W: Write> {
    inner: quick_xml::Writer<W>,
    started: bool,
    rooms_written: usize,
}

impl<W: Write> XmlRoomWriter<W> {
    /// Create an XML writer over `inner`, indenting by two spaces
    pub fn new(inner: W) -> Self {
        Self {
            inner: quick_xml::Writer::new_with_indent(inner, b' ', 2),
            started: false,
            rooms_written: 0,
        }
    }

    /// Give back the underlying writer
    pub fn into_inner(self) -> W {
        self.inner.into_inner()
    }

    fn event<'e>(&mut self, event: Event<'e>) -> Result<()> {
        self.inner.write_event(event).map_err(xml_error)
    }

    fn begin(&mut self) -> Result<()> {
        if !self.started {
            self.event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
            self.event(Event::Start(BytesStart::new(ROOT_ELEMENT)))?;
            self.started = true;
        }
        Ok(())
    }

    fn start_with_id(&mut self, element: &str, id: u64) -> Result<()> {
        let id = id.to_string();
        self.event(Event::Start(
            BytesStart::new(element).with_attributes([(ID_ATTRIBUTE, id.as_str())]),
        ))
    }

    fn end(&mut self, element: &str) -> Result<()> {
        self.event(Event::End(BytesEnd::new(element)))
    }

    fn name(&mut self, name: &str) -> Result<()> {
        self.event(Event::Start(BytesStart::new(NAME_ELEMENT)))?;
        self.event(Event::Text(BytesText::new(name)))?;
        self.end(NAME_ELEMENT)
    }
}

impl<W: Write> RoomWriter for XmlRoomWriter<W> {
    fn write_room(&mut self, room: &CombinedRoom) -> Result<()> {
        self.begin()?;

        self.start_with_id(ROOM_ELEMENT, room.id)?;
        self.name(&room.name)?;
        self.event(Event::Start(BytesStart::new(STUDENTS_ELEMENT)))?;
        for student in &room.students {
            self.start_with_id(STUDENT_ELEMENT, student.id)?;
            self.name(&student.name)?;
            self.end(STUDENT_ELEMENT)?;
        }
        self.end(STUDENTS_ELEMENT)?;
        self.end(ROOM_ELEMENT)?;

        self.rooms_written += 1;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.begin()?;
        self.end(ROOT_ELEMENT)?;

        let inner = self.inner.get_mut();
        inner.write_all(b"\n")?;
        inner.flush()?;
        Ok(())
    }

    fn rooms_written(&self) -> usize {
        self.rooms_written
    }
}
