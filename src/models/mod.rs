// Domain models shared by the pipelines, storage and API

pub mod log_entry;
pub mod plan;
pub mod profile;
pub mod review;

pub use log_entry::*;
pub use plan::*;
pub use profile::*;
pub use review::*;
