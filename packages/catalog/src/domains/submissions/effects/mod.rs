pub mod invalidation;
pub mod notify;
