pub mod marketstack;
pub mod marketstack_dto;
pub mod utils;

pub use marketstack::MarketstackApi;
