//! Script probes.
//!
//! Targets look like `<script>[.<ext>] <argument...>` and resolve against a
//! scripts directory. Lua runs embedded; other languages run under an
//! interpreter found on `PATH`.

mod interpreter;
mod lua;
mod target;

pub use interpreter::{InterpreterProbe, InterpreterSpec, POWERSHELL, PYTHON};
pub use lua::LuaProbe;
pub use target::ScriptTarget;
