// Turn identifiers are UUIDv7 so that ids created later in a session sort
// after earlier ones, the same way the widget displays them.

use uuid::Uuid;

/// Generate a new UUIDv7 (timestamp-sortable).
pub fn uuidv7() -> Uuid {
    Uuid::now_v7()
}

/// Generate a new turn id as a hyphenated UUIDv7 string.
pub fn turn_id() -> String {
    uuidv7().to_string()
}
