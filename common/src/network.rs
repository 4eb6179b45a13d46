pub mod probe;
pub mod range;
pub mod report;
pub mod request;
