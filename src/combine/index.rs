//! Room index and the lazy join over rooms

use crate::error::{Error, Result};
use crate::types::{CombinedRoom, FromRecord, JsonObject, Room, Student, StudentEntry};
use std::collections::HashMap;
use std::iter::FusedIterator;

/// Students grouped by the room id they reference, in arrival order
pub type StudentsByRoom = HashMap<u64, Vec<StudentEntry>>;

/// Room id → students lookup built from a fully drained student stream
#[derive(Debug, Clone, Default)]
pub struct RoomIndex {
    by_room: StudentsByRoom,
    student_count: usize,
}

impl RoomIndex {
    /// Create an empty index
    pub fn new() -> Self {
        Self::default()
    }

    /// Drain `students` into a new index.
    ///
    /// The first upstream error aborts the build and is returned as is.
    pub fn build<I>(students: I) -> Result<Self>
    where
        I: IntoIterator<Item = Result<JsonObject>>,
    {
        let mut index = Self::new();
        for record in students {
            index.insert(Student::from_record(&record?)?);
        }
        tracing::debug!(
            students = index.student_count,
            rooms = index.by_room.len(),
            "built room index"
        );
        Ok(index)
    }

    /// Append a student to its room's bucket
    pub fn insert(&mut self, student: Student) {
        self.by_room
            .entry(student.room_id)
            .or_default()
            .push(student.entry());
        self.student_count += 1;
    }

    /// Students referencing `room_id`, empty when there are none
    pub fn students_for(&self, room_id: u64) -> &[StudentEntry] {
        self.by_room
            .get(&room_id)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Number of distinct room ids referenced
    pub fn room_count(&self) -> usize {
        self.by_room.len()
    }

    /// Number of students indexed
    pub fn student_count(&self) -> usize {
        self.student_count
    }

    /// Whether no students were indexed
    pub fn is_empty(&self) -> bool {
        self.student_count == 0
    }

    /// Join one room against the index
    pub fn join(&self, room: Room) -> CombinedRoom {
        let students = self.students_for(room.id).to_vec();
        CombinedRoom::new(room, students)
    }

    /// Give up the underlying map
    pub fn into_map(self) -> StudentsByRoom {
        self.by_room
    }
}

/// Group students by room id, preserving arrival order within each room
pub fn group_by_room<I>(students: I) -> Result<StudentsByRoom>
where
    I: IntoIterator<Item = Result<JsonObject>>,
{
    RoomIndex::build(students).map(RoomIndex::into_map)
}

/// Join `students` into `rooms`.
///
/// Drains `students` immediately; `rooms` is consumed lazily by the returned
/// iterator, which yields one `CombinedRoom` per input room, duplicates
/// included. Students whose room id matches no room never appear.
pub fn combine<S, R>(students: S, rooms: R) -> Result<CombinedRooms<R::IntoIter>>
where
    S: IntoIterator<Item = Result<JsonObject>>,
    R: IntoIterator<Item = Result<JsonObject>>,
{
    let index = RoomIndex::build(students)?;
    Ok(CombinedRooms::new(index, rooms))
}

/// Lazy iterator of rooms joined with their students.
///
/// Fused after the first error.
#[derive(Debug)]
pub struct CombinedRooms<R> {
    index: RoomIndex,
    rooms: R,
    done: bool,
}

impl<R> CombinedRooms<R>
where
    R: Iterator<Item = Result<JsonObject>>,
{
    /// Join `rooms` against an existing index
    pub fn new<I>(index: RoomIndex, rooms: I) -> Self
    where
        I: IntoIterator<IntoIter = R, Item = Result<JsonObject>>,
    {
        Self {
            index,
            rooms: rooms.into_iter(),
            done: false,
        }
    }

    /// Index the rooms are joined against
    pub fn index(&self) -> &RoomIndex {
        &self.index
    }

    fn fail(&mut self, err: Error) -> Option<Result<CombinedRoom>> {
        self.done = true;
        Some(Err(err))
    }
}

impl<R> Iterator for CombinedRooms<R>
where
    R: Iterator<Item = Result<JsonObject>>,
{
    type Item = Result<CombinedRoom>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        match self.rooms.next() {
            None => {
                self.done = true;
                None
            }
            Some(Ok(record)) => match Room::from_record(&record) {
                Ok(room) => Some(Ok(self.index.join(room))),
                Err(err) => self.fail(err),
            },
            Some(Err(err)) => self.fail(err),
        }
    }
}

impl<R> FusedIterator for CombinedRooms<R> where R: Iterator<Item = Result<JsonObject>> {}
