//! `/ping`

use crate::dispatch::{CommandHandler, SlashCommand};
use crate::interaction::{Interaction, Snowflake};
use crate::reply::success_embed;
use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Platform epoch (2015-01-01T00:00:00Z) in milliseconds
const SNOWFLAKE_EPOCH_MS: i64 = 1_420_070_400_000;

/// Creation time encoded in a snowflake id
pub(super) fn snowflake_time(id: Snowflake) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp_millis((id >> 22) as i64 + SNOWFLAKE_EPOCH_MS)
}

struct Ping;

#[async_trait]
impl CommandHandler for Ping {
    async fn action(&self, interaction: &mut Interaction) -> Result<()> {
        let message = match snowflake_time(interaction.id) {
            Some(created) => {
                let age = (Utc::now() - created).num_milliseconds().max(0);
                format!("Pong! ({} ms)", age)
            }
            None => "Pong!".to_string(),
        };
        interaction.reply(success_embed(&message));
        Ok(())
    }
}

pub fn command() -> SlashCommand {
    SlashCommand::new("ping", "Check that the bot is responding").handler(Ping)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch::Dispatchable;
    use crate::interaction::User;

    #[test]
    fn test_snowflake_time() {
        // Example id from the platform documentation: 2016-04-30T11:18:25.796Z
        let created = snowflake_time(175928847299117063).unwrap();
        assert_eq!(created.timestamp_millis(), 1462015105796);
    }

    #[tokio::test]
    async fn test_ping_replies() {
        let mut ctx = Interaction::new(175928847299117063, "ping", User::new(7, "ana"));
        command().dispatch(&mut ctx).await.unwrap();

        let description = ctx.replies()[0].embeds[0].description.clone().unwrap();
        assert!(description.starts_with(":white_check_mark: Pong!"));
    }
}
