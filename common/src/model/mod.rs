pub mod attributes;
pub mod options;
pub mod preview;
