//! Embedded Lua checks.
//!
//! Each invocation builds a fresh interpreter on a blocking worker thread,
//! runs the script once and drops the state before returning. The script
//! reads the global `hostname` and reports through `result` (required) and
//! `error_message` (optional).
//!
//! The deadline is enforced inside the VM: an instruction hook raises an
//! error once it has passed, and `pcall`, `xpcall` and `coroutine.resume`
//! re-raise anything they catch after that point, so a script cannot retry
//! its way past the limit.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use mlua::{HookTriggers, Lua, Value};
use netcheck_core::{Probe, ProbeError, ProbeOutcome};
use tracing::{debug, warn};

use super::target::ScriptTarget;

const LANGUAGE: &str = "lua";
const EXTENSION: &str = "lua";

/// Instructions between deadline checks.
const HOOK_INTERVAL: u32 = 10_000;

/// Extra time the async side waits for the worker beyond the deadline.
const WORKER_GRACE: Duration = Duration::from_secs(2);

// Receives the deadline predicate as its only argument.
const CATCH_GUARD: &str = r"
local expired = ...
local raw_pcall, raw_xpcall, raw_resume = pcall, xpcall, coroutine.resume
local function guard(ok, ...)
    if not ok and expired() then
        error((...), 0)
    end
    return ok, ...
end
pcall = function(...) return guard(raw_pcall(...)) end
xpcall = function(...) return guard(raw_xpcall(...)) end
coroutine.resume = function(...) return guard(raw_resume(...)) end
";

/// Probe for the `LUA` check kind.
#[derive(Debug, Clone)]
pub struct LuaProbe {
    scripts_dir: PathBuf,
    timeout: Option<Duration>,
}

impl LuaProbe {
    /// Probe resolving scripts under `scripts_dir`; `None` disables the deadline.
    pub fn new(scripts_dir: impl Into<PathBuf>, timeout: Option<Duration>) -> Self {
        Self {
            scripts_dir: scripts_dir.into(),
            timeout,
        }
    }
}

#[async_trait]
impl Probe for LuaProbe {
    async fn probe(&self, target: &str) -> ProbeOutcome {
        let script = match ScriptTarget::parse(target, LANGUAGE, EXTENSION, &self.scripts_dir) {
            Ok(script) => script,
            Err(err) => return ProbeOutcome::Error(err),
        };
        debug!(script = %script.path.display(), argument = %script.argument, "running lua check");

        let timeout = self.timeout;
        let worker = tokio::task::spawn_blocking(move || run_script(&script, timeout));

        let joined = match timeout {
            Some(limit) => match tokio::time::timeout(limit + WORKER_GRACE, worker).await {
                Ok(joined) => joined,
                Err(_) => {
                    warn!(?limit, "lua worker did not stop at its deadline");
                    return ProbeOutcome::Error(ProbeError::Timeout { after: limit });
                }
            },
            None => worker.await,
        };

        match joined {
            Ok(outcome) => outcome,
            Err(e) => ProbeOutcome::Error(ProbeError::Internal(format!("lua worker failed: {e}"))),
        }
    }
}

fn run_script(script: &ScriptTarget, timeout: Option<Duration>) -> ProbeOutcome {
    let source = match std::fs::read(&script.path) {
        Ok(source) => source,
        Err(e) => {
            return ProbeOutcome::Error(script_error(format!(
                "read {}: {e}",
                script.path.display()
            )));
        }
    };

    let lua = Lua::new();
    let deadline = timeout.map(|limit| (Instant::now() + limit, limit));
    if let Some((at, _)) = deadline
        && let Err(e) = install_deadline(&lua, at)
    {
        return ProbeOutcome::Error(script_error(e.to_string()));
    }

    evaluate(&lua, script, &source, deadline).unwrap_or_else(ProbeOutcome::Error)
}

fn evaluate(
    lua: &Lua,
    script: &ScriptTarget,
    source: &[u8],
    deadline: Option<(Instant, Duration)>,
) -> Result<ProbeOutcome, ProbeError> {
    let globals = lua.globals();
    globals
        .set("hostname", script.argument.as_str())
        .map_err(|e| script_error(e.to_string()))?;

    if let Err(e) = lua
        .load(source)
        .set_name(format!("@{}", script.path.display()))
        .exec()
    {
        if let Some((at, limit)) = deadline
            && Instant::now() >= at
        {
            return Err(ProbeError::Timeout { after: limit });
        }
        return Err(script_error(e.to_string()));
    }

    let result: Value = globals
        .get("result")
        .map_err(|e| script_error(e.to_string()))?;

    match result {
        Value::Nil => Err(ProbeError::MissingResult {
            language: LANGUAGE,
            variable: "result",
        }),
        Value::Boolean(false) => {
            let message: Value = globals
                .get("error_message")
                .map_err(|e| script_error(e.to_string()))?;
            match message {
                Value::Nil => Ok(ProbeOutcome::Failed),
                other => Err(ProbeError::ScriptFailed {
                    language: LANGUAGE,
                    detail: describe(lua, other),
                }),
            }
        }
        _ => Ok(ProbeOutcome::Passed),
    }
}

/// Abort the chunk once `at` has passed.
fn install_deadline(lua: &Lua, at: Instant) -> mlua::Result<()> {
    let expired = lua.create_function(move |_, ()| Ok(Instant::now() >= at))?;
    lua.load(CATCH_GUARD)
        .set_name("=deadline")
        .call::<_, ()>(expired)?;

    lua.set_hook(
        HookTriggers {
            every_nth_instruction: Some(HOOK_INTERVAL),
            ..HookTriggers::default()
        },
        move |_, _| {
            if Instant::now() >= at {
                Err(mlua::Error::RuntimeError(
                    "script deadline exceeded".to_string(),
                ))
            } else {
                Ok(())
            }
        },
    );
    Ok(())
}

/// String form of a Lua value, falling back to its type name.
fn describe(lua: &Lua, value: Value<'_>) -> String {
    let type_name = value.type_name();
    match lua.coerce_string(value) {
        Ok(Some(text)) => text.to_string_lossy().into_owned(),
        _ => format!("<{type_name}>"),
    }
}

fn script_error(reason: String) -> ProbeError {
    ProbeError::ScriptError {
        language: LANGUAGE,
        reason,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn with_script(name: &str, body: &str) -> (TempDir, LuaProbe) {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(name), body).unwrap();
        let probe = LuaProbe::new(dir.path(), Some(Duration::from_secs(5)));
        (dir, probe)
    }

    fn diagnostic(outcome: &ProbeOutcome) -> String {
        outcome.diagnostic().map(ToString::to_string).unwrap_or_default()
    }

    #[tokio::test]
    async fn test_truthy_result_passes_and_sees_hostname() {
        let (_dir, probe) = with_script("match.lua", r#"result = hostname == "example.test""#);
        assert!(probe.probe("match.lua example.test").await.passed());

        let outcome = probe.probe("match.lua other.test").await;
        assert!(matches!(outcome, ProbeOutcome::Failed));
    }

    #[tokio::test]
    async fn test_non_boolean_truthy_result_passes() {
        let (_dir, probe) = with_script("count.lua", "result = 0");
        assert!(probe.probe("count host").await.passed());
    }

    #[tokio::test]
    async fn test_unset_result_is_error() {
        let (_dir, probe) = with_script("noop.lua", "local x = 1");
        let outcome = probe.probe("noop.lua host").await;
        assert_eq!(
            diagnostic(&outcome),
            "lua script did not set 'result' variable"
        );
    }

    #[tokio::test]
    async fn test_falsy_result_with_message() {
        let (_dir, probe) = with_script(
            "down.lua",
            r#"result = false
error_message = hostname .. " is down""#,
        );
        let outcome = probe.probe("down.lua db01").await;
        assert_eq!(diagnostic(&outcome), "lua script failed: db01 is down");
    }

    #[tokio::test]
    async fn test_runtime_error() {
        let (_dir, probe) = with_script("boom.lua", r#"error("boom")"#);
        let outcome = probe.probe("boom.lua host").await;
        let text = diagnostic(&outcome);
        assert!(text.starts_with("lua script error:"), "{text}");
        assert!(text.contains("boom"), "{text}");
    }

    #[tokio::test]
    async fn test_syntax_error() {
        let (_dir, probe) = with_script("bad.lua", "result = = true");
        let text = diagnostic(&probe.probe("bad.lua host").await);
        assert!(text.starts_with("lua script error:"), "{text}");
    }

    #[tokio::test]
    async fn test_runaway_script_hits_deadline() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("spin.lua"), "while true do end").unwrap();
        let probe = LuaProbe::new(dir.path(), Some(Duration::from_millis(200)));

        let outcome = probe.probe("spin.lua host").await;
        assert!(matches!(
            outcome,
            ProbeOutcome::Error(ProbeError::Timeout { .. })
        ));
    }

    async fn assert_times_out(body: &str) {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("retry.lua"), body).unwrap();
        let probe = LuaProbe::new(dir.path(), Some(Duration::from_millis(200)));

        let outcome = tokio::time::timeout(Duration::from_secs(5), probe.probe("retry.lua host"))
            .await
            .expect("deadline was not enforced");
        assert!(
            matches!(outcome, ProbeOutcome::Error(ProbeError::Timeout { .. })),
            "{outcome:?}"
        );
    }

    #[tokio::test]
    async fn test_pcall_cannot_swallow_deadline() {
        assert_times_out(
            "local ok = false
while not ok do ok = pcall(function() while true do end end) end
result = true",
        )
        .await;
    }

    #[tokio::test]
    async fn test_xpcall_and_coroutines_cannot_swallow_deadline() {
        assert_times_out(
            "while true do xpcall(function() while true do end end, function(e) return e end) end",
        )
        .await;
        assert_times_out(
            "while true do
    local co = coroutine.create(function() while true do end end)
    coroutine.resume(co)
end",
        )
        .await;
    }

    #[tokio::test]
    async fn test_pcall_still_catches_ordinary_errors() {
        let (_dir, probe) = with_script(
            "guarded.lua",
            r#"local ok, err = pcall(error, "nope", 0)
result = (not ok) and err == "nope""#,
        );
        assert!(probe.probe("guarded.lua host").await.passed());
    }

    #[tokio::test]
    async fn test_state_does_not_leak_between_calls() {
        let (_dir, probe) = with_script(
            "once.lua",
            "if seen then result = false else seen = true; result = true end",
        );
        assert!(probe.probe("once.lua host").await.passed());
        assert!(probe.probe("once.lua host").await.passed());
    }

    #[tokio::test]
    async fn test_missing_script_and_bad_format() {
        let dir = TempDir::new().unwrap();
        let probe = LuaProbe::new(dir.path(), None);

        let text = diagnostic(&probe.probe("missing.lua host").await);
        assert!(text.starts_with("script not found:"), "{text}");

        let text = diagnostic(&probe.probe("lonely.lua").await);
        assert!(text.starts_with("invalid lua check format"), "{text}");
    }
}
