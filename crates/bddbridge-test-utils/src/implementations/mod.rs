//! Test implementations (fakes) of the adapter's collaborators.
//!
//! These run entirely in memory and record what they were asked to do, so
//! tests can assert on the interaction as well as on the outcome.

pub mod in_memory_file_loader;
pub mod recording_sink;
pub mod scripted_engine;
pub mod static_module_loader;

pub use in_memory_file_loader::*;
pub use recording_sink::*;
pub use scripted_engine::*;
pub use static_module_loader::*;
