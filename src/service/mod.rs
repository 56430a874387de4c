pub mod access_gate;
pub mod ordering;
pub mod sessions_actor;
