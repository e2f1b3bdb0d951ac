pub mod drivers;
pub mod payments;
pub mod ratings;
pub mod riders;
pub mod rides;
