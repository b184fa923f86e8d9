#![doc = include_str!(concat!(env!("OUT_DIR"), "/README_GENERATED.md"))]
#![deny(unsafe_code)]

pub mod network;
mod process;
mod registry;
pub mod script;
pub mod system;

// Re-export the probes the default registry is built from
pub use network::{ComboProbe, HttpProbe, IcmpProbe, PingFlavor, Scheme};
pub use script::{InterpreterProbe, InterpreterSpec, LuaProbe, ScriptTarget};

// Re-export the composition entry point
pub use registry::{BUILTIN_CHECKS, default_registry};

// Re-export tool probe implementation
pub use system::DefaultToolProbe;
