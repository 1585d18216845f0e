/// Model of the report printed by ansible's `json` stdout callback.
///
/// Only the parts needed to read a debug task's per-host `msg` are modelled:
///
/// ```text
/// { "plays": [ { "tasks": [ { "hosts": { "<host>": { "msg": ... } } } ] } ] }
/// ```
///
/// Everything else in the document is ignored.
use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::Value;

use super::errors::VaultError;
use crate::sys::runner::CommandOutput;

/// Whole execution report of one ansible run.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExecutionReport {
    #[serde(default)]
    pub plays: Vec<PlayReport>,
}

/// One play of the run.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlayReport {
    #[serde(default)]
    pub tasks: Vec<TaskReport>,
}

/// One task of a play, with results keyed by host in execution order.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TaskReport {
    #[serde(default)]
    pub hosts: IndexMap<String, HostResult>,
}

/// Result of a task on a single host.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HostResult {
    /// Resolved variable value or failure message.
    #[serde(default)]
    pub msg: Option<Value>,
    #[serde(default)]
    pub failed: bool,
    #[serde(default)]
    pub unreachable: bool,
}

impl HostResult {
    /// The message as display text.
    ///
    /// Strings are returned verbatim, other JSON values (dicts, lists, numbers)
    /// as compact JSON, and a missing message as an empty string.
    #[must_use]
    pub fn message(&self) -> String {
        match &self.msg {
            None | Some(Value::Null) => String::new(),
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
        }
    }
}

impl ExecutionReport {
    /// Parse the captured stdout of an ansible run.
    ///
    /// When ansible exited non-zero its stderr is appended to the error, since
    /// ansible explains hard failures there. Warnings of a successful run are not.
    ///
    /// # Errors
    ///
    /// Returns `VaultError::MalformedReport` if stdout is not a JSON report.
    pub fn parse(output: &CommandOutput) -> Result<Self, VaultError> {
        serde_json::from_str(&output.stdout).map_err(|e| {
            let stderr = output.stderr.trim();
            let reason = if output.success() || stderr.is_empty() {
                e.to_string()
            } else {
                format!("{e}\n{stderr}")
            };
            VaultError::MalformedReport { reason }
        })
    }

    /// Per-host results of the first task of the first play.
    ///
    /// `None` when the report has no play or the first play ran no task, which is
    /// how ansible reports a host pattern that matched nothing.
    #[must_use]
    pub fn first_task_hosts(&self) -> Option<&IndexMap<String, HostResult>> {
        self.plays
            .first()
            .and_then(|play| play.tasks.first())
            .map(|task| &task.hosts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stdout(doc: &str) -> CommandOutput {
        CommandOutput {
            code: Some(0),
            stdout: doc.to_owned(),
            stderr: String::new(),
        }
    }

    const TWO_HOSTS: &str = r#"{
        "custom_stats": {},
        "global_custom_stats": {},
        "plays": [
            {
                "play": {"name": "Ansible Ad-Hoc", "id": "1"},
                "tasks": [
                    {
                        "task": {"name": "debug", "id": "2"},
                        "hosts": {
                            "web02": {"action": "debug", "changed": false, "msg": "s3cret"},
                            "web01": {
                                "action": "debug",
                                "changed": false,
                                "failed": true,
                                "msg": "The task includes an option with an undefined variable. The error was: 'db_pass' is undefined"
                            }
                        }
                    }
                ]
            }
        ],
        "stats": {"web01": {"failures": 1}, "web02": {"ok": 1}}
    }"#;

    #[test]
    fn test_parse_keeps_host_order() {
        let report = ExecutionReport::parse(&stdout(TWO_HOSTS)).unwrap();
        let hosts = report.first_task_hosts().unwrap();
        let names: Vec<&str> = hosts.keys().map(String::as_str).collect();
        assert_eq!(names, ["web02", "web01"]);
        assert_eq!(hosts["web02"].message(), "s3cret");
        assert!(hosts["web01"].failed);
    }

    #[test]
    fn test_no_plays_has_no_hosts() {
        let report = ExecutionReport::parse(&stdout(r#"{"plays": [], "stats": {}}"#)).unwrap();
        assert!(report.first_task_hosts().is_none());
    }

    #[test]
    fn test_play_without_tasks_has_no_hosts() {
        let report = ExecutionReport::parse(&stdout(r#"{"plays": [{"tasks": []}]}"#)).unwrap();
        assert!(report.first_task_hosts().is_none());
    }

    #[test]
    fn test_non_string_messages() {
        let doc = r#"{"plays": [{"tasks": [{"hosts": {
            "a": {"msg": {"user": "app"}},
            "b": {"msg": 42},
            "c": {"unreachable": true},
            "d": {"msg": null}
        }}]}]}"#;
        let report = ExecutionReport::parse(&stdout(doc)).unwrap();
        let hosts = report.first_task_hosts().unwrap();
        assert_eq!(hosts["a"].message(), r#"{"user":"app"}"#);
        assert_eq!(hosts["b"].message(), "42");
        assert_eq!(hosts["c"].message(), "");
        assert!(hosts["c"].unreachable);
        assert_eq!(hosts["d"].message(), "");
    }

    #[test]
    fn test_malformed_output_of_failed_run_includes_stderr() {
        let output = CommandOutput {
            code: Some(1),
            stdout: String::new(),
            stderr: "ERROR! the playbook: x could not be found\n".to_owned(),
        };
        let err = ExecutionReport::parse(&output).unwrap_err();
        match err {
            VaultError::MalformedReport { reason } => {
                assert!(reason.ends_with("ERROR! the playbook: x could not be found"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_malformed_output_of_successful_run_omits_warnings() {
        let output = CommandOutput {
            code: Some(0),
            stdout: "PLAY [Ansible Ad-Hoc]".to_owned(),
            stderr: "[WARNING]: Invalid characters were found in group names\n".to_owned(),
        };
        match ExecutionReport::parse(&output).unwrap_err() {
            VaultError::MalformedReport { reason } => assert!(!reason.contains("WARNING")),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
