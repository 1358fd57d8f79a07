pub mod calendar;
pub mod entry;
pub mod stats;
pub mod timer;
