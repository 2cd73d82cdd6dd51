pub mod decide;
pub mod gaps;
pub mod simulate;
pub mod status;
