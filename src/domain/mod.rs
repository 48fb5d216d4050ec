// Domain layer: phone-number ranges, recipes and the migration job, plus the
// ports the pipeline talks through. Pure and synchronous apart from the ports.

pub mod digit_sequence;
pub mod job;
pub mod model;
pub mod ports;
pub mod range_key;
pub mod range_set;
pub mod recipe;
pub mod region;
