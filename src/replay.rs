//! Offline gateway: dispatch interactions read as JSON lines
//!
//! Each line is one interaction envelope. Every interaction runs on its own
//! task against the shared registry; outcomes come back in input order.

use crate::dispatch::CommandRegistry;
use crate::interaction::{Interaction, Snowflake};
use crate::reply::Reply;
use anyhow::{Context, Result};
use serde::Serialize;
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

/// What dispatching one interaction produced
#[derive(Debug, Serialize)]
pub struct ReplayOutcome {
    pub interaction: Snowflake,
    pub replies: Vec<Reply>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Parse every non-blank line, then dispatch them concurrently
///
/// Malformed lines are logged and skipped. Handler errors are logged and
/// reported in the outcome; they never stop the replay.
pub async fn replay<R>(registry: Arc<CommandRegistry>, input: R) -> Result<Vec<ReplayOutcome>>
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = input.lines();
    let mut tasks = Vec::new();
    let mut line_no = 0usize;

    while let Some(line) = lines.next_line().await.context("Failed to read input")? {
        line_no += 1;
        if line.trim().is_empty() {
            continue;
        }

        let interaction: Interaction = match serde_json::from_str(&line) {
            Ok(interaction) => interaction,
            Err(e) => {
                tracing::warn!(line = line_no, error = %e, "Skipping malformed interaction");
                continue;
            }
        };

        let registry = Arc::clone(&registry);
        tasks.push(tokio::spawn(run_one(registry, interaction)));
    }

    let mut outcomes = Vec::with_capacity(tasks.len());
    for joined in futures::future::join_all(tasks).await {
        outcomes.push(joined.context("Interaction task panicked")?);
    }
    Ok(outcomes)
}

async fn run_one(registry: Arc<CommandRegistry>, mut interaction: Interaction) -> ReplayOutcome {
    let error = match registry.process(&mut interaction).await {
        Ok(()) => None,
        Err(e) => {
            tracing::error!(
                interaction = interaction.id,
                command = %interaction.command_name,
                error = %e,
                "Handler failed"
            );
            Some(format!("{:#}", e))
        }
    };

    ReplayOutcome {
        interaction: interaction.id,
        replies: interaction.take_replies(),
        error,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    fn registry() -> Arc<CommandRegistry> {
        Arc::new(crate::builtins::registry(&Config::default()))
    }

    #[tokio::test]
    async fn test_replays_in_input_order() {
        let input = concat!(
            r#"{"id": 1, "command_name": "ping", "user": {"id": 7, "username": "ana"}}"#,
            "\n\n",
            r#"{"id": 2, "command_name": "echo", "options": {"text": "hi"}, "user": {"id": 7, "username": "ana"}}"#,
            "\n",
            r#"{"id": 3, "command_name": "unknown", "user": {"id": 7, "username": "ana"}}"#,
            "\n",
        );

        let outcomes = replay(registry(), input.as_bytes()).await.unwrap();

        let ids: Vec<_> = outcomes.iter().map(|o| o.interaction).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(outcomes[0].replies.len(), 1);
        assert_eq!(outcomes[1].replies[0].embeds[0].fields[0].value, "hi");
        assert!(outcomes[2].replies.is_empty());
        assert!(outcomes.iter().all(|o| o.error.is_none()));
    }

    #[tokio::test]
    async fn test_malformed_lines_are_skipped() {
        let input = concat!(
            "not json\n",
            r#"{"id": 4, "command_name": "ping", "user": {"id": 7, "username": "ana"}}"#,
            "\n",
        );

        let outcomes = replay(registry(), input.as_bytes()).await.unwrap();
        assert_eq!(outcomes.len(), 1);
        assert_eq!(outcomes[0].interaction, 4);
    }

    #[tokio::test]
    async fn test_non_command_kinds_produce_no_replies() {
        let input = r#"{"id": 5, "kind": "component", "command_name": "ping", "user": {"id": 7, "username": "ana"}}"#;

        let outcomes = replay(registry(), input.as_bytes()).await.unwrap();
        assert!(outcomes[0].replies.is_empty());
    }

    #[test]
    fn test_outcome_serializes_without_empty_error() {
        let outcome = ReplayOutcome {
            interaction: 9,
            replies: vec![Reply::content("hello")],
            error: None,
        };
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["interaction"], 9);
        assert!(json.get("error").is_none());
        assert_eq!(json["replies"][0]["content"], "hello");
    }
}
