pub mod interface;
pub mod tcp;
