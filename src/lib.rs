pub mod dataset;
pub mod encode;
pub mod pass_map;
pub mod pass_network;
pub mod pitch;
pub mod state;
