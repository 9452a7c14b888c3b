//! Service layer between the HTTP routes and the spreadsheet system of record.
//! - `SheetStore` is the capability every resource route is written against.
//! - `sheets` talks to Google Sheets; `memory` is an in-process stand-in.
//! - Dashboard statistics are fixed sample data.

pub mod errors;
pub mod resource;
pub mod store;
pub mod sheets;
pub mod memory;
pub mod stats;
pub mod observability;

pub use errors::ServiceError;
pub use resource::Resource;
pub use store::{Record, SheetStore};
