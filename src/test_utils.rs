//! Test utilities shared across modules.
//!
//! [`FakeRunner`] stands in for git and gh. Tests script responses by argv
//! prefix and then assert on the recorded calls.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::io;
use std::sync::{Arc, Mutex};

use tracing_subscriber::EnvFilter;

use crate::error::{AcpError, Result};
use crate::process::{CommandOutput, CommandRunner};

/// Successful output with the given stdout.
pub fn ok(stdout: &str) -> CommandOutput {
    CommandOutput {
        status: Some(0),
        stdout: stdout.to_string(),
        stderr: String::new(),
    }
}

/// Failed output (exit 1) with the given stderr.
pub fn fail(stderr: &str) -> CommandOutput {
    CommandOutput {
        status: Some(1),
        stdout: String::new(),
        stderr: stderr.to_string(),
    }
}

struct Rule {
    prefix: Vec<String>,
    responses: VecDeque<CommandOutput>,
}

/// A recorded invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Call {
    /// Program followed by its arguments
    pub argv: Vec<String>,
    pub interactive: bool,
}

impl Call {
    pub fn starts_with(&self, prefix: &[&str]) -> bool {
        self.argv.len() >= prefix.len() && self.argv.iter().zip(prefix).all(|(a, p)| a == p)
    }
}

/// Scripted [`CommandRunner`].
///
/// The rule with the longest matching argv prefix answers a call. A rule
/// pops its queued responses in order and repeats the last one forever.
/// Unmatched calls succeed with empty output.
///
/// [`FakeRunner::on_call`] attaches side effects (e.g. a Ctrl+C arriving
/// mid-command) and [`FakeRunner::on_error`] makes a call fail to spawn.
#[derive(Default)]
pub struct FakeRunner {
    rules: RefCell<Vec<Rule>>,
    hooks: RefCell<Vec<(Vec<String>, Box<dyn Fn()>)>>,
    errors: RefCell<Vec<(Vec<String>, Box<dyn Fn() -> AcpError>)>>,
    calls: RefCell<Vec<Call>>,
}

impl FakeRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `output` for calls starting with `prefix` (program included).
    pub fn on(&self, prefix: &[&str], output: CommandOutput) -> &Self {
        let mut rules = self.rules.borrow_mut();
        if let Some(rule) = rules
            .iter_mut()
            .find(|r| r.prefix.iter().map(String::as_str).eq(prefix.iter().copied()))
        {
            rule.responses.push_back(output);
        } else {
            rules.push(Rule {
                prefix: prefix.iter().map(|s| s.to_string()).collect(),
                responses: VecDeque::from([output]),
            });
        }
        self
    }

    /// Run `hook` whenever a call starts with `prefix`, before it returns.
    pub fn on_call(&self, prefix: &[&str], hook: impl Fn() + 'static) -> &Self {
        self.hooks.borrow_mut().push((to_owned(prefix), Box::new(hook)));
        self
    }

    /// Fail calls starting with `prefix` with the error `make` returns.
    pub fn on_error(&self, prefix: &[&str], make: impl Fn() -> AcpError + 'static) -> &Self {
        self.errors.borrow_mut().push((to_owned(prefix), Box::new(make)));
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    /// Calls whose argv starts with `prefix`.
    pub fn calls_matching(&self, prefix: &[&str]) -> Vec<Call> {
        self.calls
            .borrow()
            .iter()
            .filter(|c| c.starts_with(prefix))
            .cloned()
            .collect()
    }

    pub fn called(&self, prefix: &[&str]) -> bool {
        !self.calls_matching(prefix).is_empty()
    }

    /// Index of the first call starting with `prefix`.
    pub fn position(&self, prefix: &[&str]) -> Option<usize> {
        self.calls.borrow().iter().position(|c| c.starts_with(prefix))
    }

    fn respond(&self, program: &str, args: &[&str], interactive: bool) -> Result<CommandOutput> {
        let mut argv = vec![program.to_string()];
        argv.extend(args.iter().map(|s| s.to_string()));
        let call = Call { argv, interactive };
        let matches = |prefix: &[String]| {
            let prefix: Vec<&str> = prefix.iter().map(String::as_str).collect();
            call.starts_with(&prefix)
        };

        for (prefix, hook) in self.hooks.borrow().iter() {
            if matches(prefix) {
                hook();
            }
        }

        let error = self
            .errors
            .borrow()
            .iter()
            .find(|(prefix, _)| matches(prefix))
            .map(|(_, make)| make());
        if let Some(error) = error {
            self.calls.borrow_mut().push(call);
            return Err(error);
        }

        let mut rules = self.rules.borrow_mut();
        let best = rules
            .iter_mut()
            .filter(|r| matches(&r.prefix))
            .max_by_key(|r| r.prefix.len());

        let output = match best {
            Some(rule) if rule.responses.len() > 1 => rule.responses.pop_front().unwrap_or_default(),
            Some(rule) => rule.responses.front().cloned().unwrap_or_default(),
            None => ok(""),
        };

        drop(rules);
        self.calls.borrow_mut().push(call);
        Ok(output)
    }
}

fn to_owned(prefix: &[&str]) -> Vec<String> {
    prefix.iter().map(|s| s.to_string()).collect()
}

/// Run `f` under a subscriber filtered by `directive` and return what it logged.
pub fn capture_logs(directive: &str, f: impl FnOnce()) -> String {
    let buffer = LogBuffer::default();
    let writer = buffer.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(directive))
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .without_time()
        .finish();

    tracing::subscriber::with_default(subscriber, f);
    buffer.contents()
}

#[derive(Clone, Default)]
struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl LogBuffer {
    fn contents(&self) -> String {
        let bytes = self.0.lock().map(|b| b.to_vec()).unwrap_or_default();
        String::from_utf8_lossy(&bytes).into_owned()
    }
}

impl io::Write for LogBuffer {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        if let Ok(mut buf) = self.0.lock() {
            buf.extend_from_slice(data);
        }
        Ok(data.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl CommandRunner for FakeRunner {
    fn run(&self, program: &str, args: &[&str]) -> Result<CommandOutput> {
        self.respond(program, args, false)
    }

    fn run_interactive(&self, program: &str, args: &[&str]) -> Result<CommandOutput> {
        self.respond(program, args, true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unmatched_calls_succeed() {
        let runner = FakeRunner::new();
        let out = runner.run("git", &["status"]).unwrap();
        assert!(out.success());
        assert!(runner.called(&["git", "status"]));
    }

    #[test]
    fn test_longest_prefix_wins() {
        let runner = FakeRunner::new();
        runner.on(&["git"], fail("generic"));
        runner.on(&["git", "remote", "get-url", "origin"], ok("url"));

        let out = runner.run("git", &["remote", "get-url", "origin"]).unwrap();
        assert_eq!(out.stdout, "url");
        let out = runner.run("git", &["status"]).unwrap();
        assert_eq!(out.stderr, "generic");
    }

    #[test]
    fn test_responses_are_sequenced_and_last_repeats() {
        let runner = FakeRunner::new();
        runner.on(&["git", "rev-parse"], ok("first"));
        runner.on(&["git", "rev-parse"], ok("second"));

        assert_eq!(runner.run("git", &["rev-parse"]).unwrap().stdout, "first");
        assert_eq!(runner.run("git", &["rev-parse"]).unwrap().stdout, "second");
        assert_eq!(runner.run("git", &["rev-parse"]).unwrap().stdout, "second");
    }

    #[test]
    fn test_interactive_calls_are_flagged() {
        let runner = FakeRunner::new();
        runner.run_interactive("git", &["commit", "-m", "x"]).unwrap();
        let calls = runner.calls_matching(&["git", "commit"]);
        assert_eq!(calls.len(), 1);
        assert!(calls[0].interactive);
    }

    #[test]
    fn test_capture_logs_respects_directive() {
        let logs = capture_logs("acp=warn", || {
            tracing::debug!("hidden");
            tracing::warn!("shown");
        });
        assert!(logs.contains("shown"));
        assert!(!logs.contains("hidden"));
    }

    #[test]
    fn test_hooks_and_errors() {
        let runner = FakeRunner::new();
        let seen = std::rc::Rc::new(std::cell::Cell::new(0));
        let counter = seen.clone();
        runner.on_call(&["git", "push"], move || counter.set(counter.get() + 1));
        runner.on_error(&["gh"], || AcpError::CommandNotFound("gh".to_string()));

        runner.run("git", &["push"]).unwrap();
        runner.run("git", &["status"]).unwrap();
        let err = runner.run("gh", &["api", "user"]).unwrap_err();

        assert_eq!(seen.get(), 1);
        assert!(matches!(err, AcpError::CommandNotFound(_)));
        assert!(runner.called(&["gh", "api", "user"]));
    }

    #[test]
    fn test_position_orders_calls() {
        let runner = FakeRunner::new();
        runner.run("git", &["a"]).unwrap();
        runner.run("git", &["b"]).unwrap();
        assert_eq!(runner.position(&["git", "b"]), Some(1));
        assert_eq!(runner.position(&["git", "c"]), None);
    }
}
