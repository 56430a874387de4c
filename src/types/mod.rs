pub mod extra_info;
pub mod payloads;

pub use extra_info::ExtraInfo;
