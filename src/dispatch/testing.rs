//! Test doubles for dispatch tests

use super::CommandHandler;
use crate::interaction::{Interaction, User};
use crate::reply::fail_embed;
use anyhow::{bail, Result};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

/// Shared call log: entries look like `"show:precondition"`, `"show:action"`
#[derive(Clone, Default)]
pub struct CallLog(Arc<Mutex<Vec<String>>>);

impl CallLog {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&self, entry: String) {
        self.0.lock().unwrap().push(entry);
    }

    pub fn entries(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }

    pub fn count(&self, entry: &str) -> usize {
        self.0.lock().unwrap().iter().filter(|e| *e == entry).count()
    }

    pub fn is_empty(&self) -> bool {
        self.0.lock().unwrap().is_empty()
    }
}

/// Recording handler with configurable precondition / action outcomes
pub struct Probe {
    label: &'static str,
    log: CallLog,
    reject: bool,
    fail_precondition: bool,
    fail_action: bool,
}

impl Probe {
    pub fn new(label: &'static str, log: &CallLog) -> Self {
        Self {
            label,
            log: log.clone(),
            reject: false,
            fail_precondition: false,
            fail_action: false,
        }
    }

    /// Precondition replies with a failure embed
    pub fn rejecting(mut self) -> Self {
        self.reject = true;
        self
    }

    /// Precondition returns an error
    pub fn erroring_precondition(mut self) -> Self {
        self.fail_precondition = true;
        self
    }

    /// Action returns an error
    pub fn erroring_action(mut self) -> Self {
        self.fail_action = true;
        self
    }
}

#[async_trait]
impl CommandHandler for Probe {
    async fn precondition(&self, interaction: &mut Interaction) -> Result<()> {
        self.log.push(format!("{}:precondition", self.label));
        if self.fail_precondition {
            bail!("{} precondition exploded", self.label);
        }
        if self.reject {
            interaction.reply(fail_embed("not allowed"));
        }
        Ok(())
    }

    async fn action(&self, _interaction: &mut Interaction) -> Result<()> {
        self.log.push(format!("{}:action", self.label));
        if self.fail_action {
            bail!("{} action exploded", self.label);
        }
        Ok(())
    }
}

pub fn interaction(command: &str) -> Interaction {
    Interaction::new(1, command, User::new(7, "tester"))
}
