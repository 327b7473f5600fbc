//! Service layer
//!
//! One service per entity, each method mapping 1:1 onto a REST endpoint
//! and returning the parsed body as-is.

mod customer;
mod table;
mod zone;

pub use customer::CustomerService;
pub use table::TableService;
pub use zone::ZoneService;
