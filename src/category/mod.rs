//! Categories for grouping time entries, e.g. "Development" or "Meetings".

mod archive;
mod create;
mod db;
mod delete;
mod domain;
mod edit;
mod list;

pub use archive::{archive_category_endpoint, unarchive_category_endpoint};
pub use create::create_category_endpoint;
pub use db::{
    count_categories, create_category, create_category_table, delete_category,
    get_active_categories, get_all_categories, get_category, set_category_archived,
    update_category,
};
pub(crate) use db::map_category_row_with_offset;
pub use delete::delete_category_endpoint;
pub use domain::{Category, CategoryData, CategoryName, Color, NewCategory};
pub use edit::update_category_endpoint;
pub use list::{
    get_active_categories_endpoint, get_categories_endpoint, get_category_endpoint,
};
