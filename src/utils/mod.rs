pub mod currency;
pub mod dates;
pub mod lenient;
pub mod report;
pub mod validation;
