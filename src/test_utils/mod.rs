#![allow(missing_docs)]

pub(crate) mod http;

use rusqlite::Connection;

use crate::db::initialize;

pub(crate) use http::{get_header, parse_json_body};

/// An in-memory database with the application's tables.
pub(crate) fn get_test_connection() -> Connection {
    let connection =
        Connection::open_in_memory().expect("Could not open in-memory SQLite database");
    initialize(&connection).expect("Could not initialize database");
    connection
}
