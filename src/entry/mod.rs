//! Time entries: the hours spent on a piece of work on a given day.

mod create;
mod db;
mod delete;
mod domain;
mod edit;
mod list;

pub use create::create_entry_endpoint;
pub use db::{
    count_entries, create_entry, create_entry_table, delete_entry, get_all_entries,
    get_entries_in_month, get_entries_in_year, get_entry, update_entry,
};
pub use delete::delete_entry_endpoint;
pub use domain::{EntryData, NewEntry, TimeEntry};
pub use edit::update_entry_endpoint;
pub use list::{get_entries_endpoint, get_entry_endpoint};
