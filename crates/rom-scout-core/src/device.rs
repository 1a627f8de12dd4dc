use serde::{Deserialize, Serialize};
use std::io::Read;
use std::process::{Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

use crate::config::AppConfig;

pub const MODEL_PROPERTY: &str = "ro.product.model";
pub const CPU_PROPERTY: &str = "ro.board.platform";
pub const SERIAL_PROPERTY: &str = "ro.serialno";

const ABSENT_MODEL: &str = "ADB not detected";
const ABSENT_CPU: &str = "Unknown";
const ABSENT_SERIAL: &str = "N/A";
const UNKNOWN_VALUE: &str = "Unknown";

/// Identity snapshot of the attached device. Fields fall back to
/// explicit sentinels when the probe or a single property is missing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceProfile {
    pub model: String,
    pub cpu: String,
    pub serial: String,
}

impl DeviceProfile {
    /// Profile reported when no device could be reached at all.
    pub fn absent() -> DeviceProfile {
        DeviceProfile {
            model: ABSENT_MODEL.to_string(),
            cpu: ABSENT_CPU.to_string(),
            serial: ABSENT_SERIAL.to_string(),
        }
    }

    pub fn is_connected(&self) -> bool {
        self.model != ABSENT_MODEL
    }
}

/// Runs the external introspection command and extracts the device
/// identity properties from its output.
pub struct DeviceProbe {
    program: String,
    args: Vec<String>,
    timeout: Duration,
}

impl DeviceProbe {
    pub fn new(config: &AppConfig) -> DeviceProbe {
        DeviceProbe {
            program: config.probe_program.clone(),
            args: vec!["shell".to_string(), "getprop".to_string()],
            timeout: Duration::from_millis(config.probe_timeout_ms),
        }
    }

    /// Query the attached device. Missing program, non-zero exit,
    /// timeout and unreadable output all degrade to the sentinel
    /// profile; this never fails.
    pub fn probe(&self) -> DeviceProfile {
        let output = match self.run_probe_command() {
            Ok(stdout) => stdout,
            Err(reason) => {
                debug!("Device probe unavailable: {}", reason);
                return DeviceProfile::absent();
            }
        };

        let properties = parse_properties(&output);
        DeviceProfile {
            model: lookup(&properties, MODEL_PROPERTY),
            cpu: lookup(&properties, CPU_PROPERTY),
            serial: lookup(&properties, SERIAL_PROPERTY),
        }
    }

    fn run_probe_command(&self) -> Result<String, String> {
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| format!("failed to start '{}': {}", self.program, e))?;

        let mut stdout = child
            .stdout
            .take()
            .ok_or_else(|| "no stdout pipe".to_string())?;

        // Drain stdout on a separate thread so a chatty command cannot
        // fill the pipe buffer and stall while we poll for exit.
        let reader = thread::spawn(move || {
            let mut buf = String::new();
            stdout.read_to_string(&mut buf).map(|_| buf)
        });

        let deadline = Instant::now() + self.timeout;
        let status = loop {
            match child.try_wait() {
                Ok(Some(status)) => break status,
                Ok(None) => {
                    if Instant::now() >= deadline {
                        let _ = child.kill();
                        let _ = child.wait();
                        return Err(format!(
                            "'{}' timed out after {:?}",
                            self.program, self.timeout
                        ));
                    }
                    thread::sleep(Duration::from_millis(25));
                }
                Err(e) => {
                    let _ = child.kill();
                    let _ = child.wait();
                    return Err(format!("failed to poll '{}': {}", self.program, e));
                }
            }
        };

        if !status.success() {
            return Err(format!("'{}' exited with {}", self.program, status));
        }

        match reader.join() {
            Ok(Ok(buf)) => Ok(buf),
            Ok(Err(e)) => Err(format!("failed to read probe output: {}", e)),
            Err(_) => {
                warn!("Probe output reader thread panicked");
                Err("probe output reader panicked".to_string())
            }
        }
    }
}

/// Parse line-oriented property output into key/value pairs. Accepts
/// the bracketed `[key]: [value]` form emitted by getprop and the bare
/// `key: value` form; every other line shape is ignored.
pub fn parse_properties(output: &str) -> Vec<(String, String)> {
    output.lines().filter_map(parse_property_line).collect()
}

fn parse_property_line(line: &str) -> Option<(String, String)> {
    let (raw_key, raw_value) = line.trim().split_once(':')?;
    let key = unbracket(raw_key.trim())?;
    let value = unbracket(raw_value.trim())?;
    if key.is_empty() {
        return None;
    }
    Some((key.to_string(), value.to_string()))
}

fn unbracket(token: &str) -> Option<&str> {
    match token.strip_prefix('[') {
        Some(stripped) => stripped.strip_suffix(']'),
        None => Some(token),
    }
}

/// Exact key match first, then the first key containing the requested
/// name. Absent keys report as "Unknown".
fn lookup(properties: &[(String, String)], name: &str) -> String {
    if let Some((_, value)) = properties.iter().find(|(key, _)| key.as_str() == name) {
        return value.clone();
    }
    properties
        .iter()
        .find(|(key, _)| key.contains(name))
        .map(|(_, value)| value.clone())
        .unwrap_or_else(|| UNKNOWN_VALUE.to_string())
}
