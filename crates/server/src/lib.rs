pub mod state;
pub mod routes;
pub mod startup;
pub mod errors;
pub mod openapi;

pub use startup::run;
