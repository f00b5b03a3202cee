pub mod client;
pub mod lookup;
