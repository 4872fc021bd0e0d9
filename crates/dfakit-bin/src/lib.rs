pub mod files;
pub mod report;
pub mod xor;
