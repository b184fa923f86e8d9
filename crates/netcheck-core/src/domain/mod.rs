//! Domain types shared by every crate in the workspace.

mod check_kind;
mod summary;
mod target;
mod tooling;

pub use check_kind::{CheckKind, MAX_KIND_LEN, MIN_KIND_LEN};
pub use summary::RunSummary;
pub use target::CheckTarget;
pub use tooling::{ToolDependency, ToolStatus};
