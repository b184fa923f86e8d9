//! The built-in check table.

use std::sync::Arc;

use netcheck_core::{CheckKind, CheckRegistry, ProbeSettings, RegistryError};

use crate::network::{ComboProbe, HttpProbe, IcmpProbe};
use crate::script::{InterpreterProbe, LuaProbe, POWERSHELL, PYTHON};

/// `(code, label)` of every built-in check kind, in registration order.
pub const BUILTIN_CHECKS: [(&str, &str); 7] = [
    ("ICMP", "ICMP Ping"),
    ("HTTP", "HTTP Check"),
    ("HTPS", "HTTPS Check"),
    ("COMB", "Combo HTTP/HTTPS Check"),
    ("LUA", "Lua Script"),
    ("PY", "Python Script"),
    ("PS", "PowerShell Script"),
];

/// Build the registry holding every built-in probe, configured by `settings`.
pub fn default_registry(settings: &ProbeSettings) -> Result<CheckRegistry, RegistryError> {
    let http = Arc::new(HttpProbe::http(settings.http_timeout));
    let https = Arc::new(HttpProbe::https(settings.http_timeout));
    let [icmp, http_label, https_label, combo, lua, python, powershell] = BUILTIN_CHECKS;

    let registry = CheckRegistry::builder()
        .register(
            CheckKind::new(icmp.0)?,
            icmp.1,
            Arc::new(IcmpProbe::new(settings.ping_wait)),
        )?
        .register(CheckKind::new(http_label.0)?, http_label.1, http.clone())?
        .register(CheckKind::new(https_label.0)?, https_label.1, https.clone())?
        .register(
            CheckKind::new(combo.0)?,
            combo.1,
            Arc::new(ComboProbe::new(http, https)),
        )?
        .register(
            CheckKind::new(lua.0)?,
            lua.1,
            Arc::new(LuaProbe::new(&settings.scripts_dir, settings.script_timeout)),
        )?
        .register(
            CheckKind::new(python.0)?,
            python.1,
            Arc::new(InterpreterProbe::new(
                PYTHON,
                &settings.scripts_dir,
                settings.script_timeout,
            )),
        )?
        .register(
            CheckKind::new(powershell.0)?,
            powershell.1,
            Arc::new(InterpreterProbe::new(
                POWERSHELL,
                &settings.scripts_dir,
                settings.script_timeout,
            )),
        )?
        .build();

    Ok(registry)
}
