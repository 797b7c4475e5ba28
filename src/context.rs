//! Explicit run context handed to every workflow step.

use crate::config::Config;
use crate::gh::GitHub;
use crate::git::Git;
use crate::process::CommandRunner;
use crate::signal::SignalHandler;

/// What a workflow step may touch: the command boundary, the loaded
/// configuration, output verbosity and the interrupt flag.
pub struct Context<'a> {
    pub runner: &'a dyn CommandRunner,
    pub config: &'a Config,
    pub verbose: bool,
    pub signals: SignalHandler,
}

impl<'a> Context<'a> {
    pub fn new(runner: &'a dyn CommandRunner, config: &'a Config) -> Self {
        Self {
            runner,
            config,
            verbose: false,
            signals: SignalHandler::detached(),
        }
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn with_signals(mut self, signals: SignalHandler) -> Self {
        self.signals = signals;
        self
    }

    pub fn git(&self) -> Git<'a> {
        Git::new(self.runner)
    }

    pub fn github(&self) -> GitHub<'a> {
        GitHub::new(self.runner, &self.config.host)
    }
}
