pub mod chains;
pub mod lookup;
