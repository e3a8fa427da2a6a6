//! Access restrictions for top-level commands
//!
//! Guild-only and permission-gated commands are plain configuration on a
//! `SlashCommand`. The same config feeds the registration schema (so the
//! platform hides the command where it cannot be used) and a gate for
//! clients that bypass the hint. The gate runs once routing has found a
//! registered target, ahead of that target's precondition.

use crate::interaction::Interaction;
use crate::permissions::Permissions;
use crate::reply::{fail_embed, Reply};
use crate::schema::CommandSchema;
use std::fmt;

/// Restrictions applied to a top-level command and everything below it
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AccessConfig {
    /// Refuse invocations from direct messages
    pub guild_only: bool,
    /// Members must hold all of these. Implies `guild_only`.
    pub required_permissions: Option<Permissions>,
}

/// Why the gate refused an interaction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessDenial {
    OutsideGuild,
    MissingPermissions(Permissions),
}

impl fmt::Display for AccessDenial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutsideGuild => write!(f, "This command can only be used in a server."),
            Self::MissingPermissions(missing) => {
                let names: Vec<_> = missing.iter_names().map(|(name, _)| name).collect();
                write!(
                    f,
                    "You are missing the following permissions: {}",
                    names.join(", ")
                )
            }
        }
    }
}

impl AccessConfig {
    pub fn is_restricted(&self) -> bool {
        self.guild_only || self.required_permissions.is_some()
    }

    /// Check `interaction` against the restrictions
    pub fn evaluate(&self, interaction: &Interaction) -> Result<(), AccessDenial> {
        if self.is_restricted() && interaction.guild_id().is_none() {
            return Err(AccessDenial::OutsideGuild);
        }

        if let Some(required) = self.required_permissions {
            let held = interaction.permissions();
            if !held.satisfies(required) {
                return Err(AccessDenial::MissingPermissions(required.difference(held)));
            }
        }

        Ok(())
    }

    /// Run the gate. On denial, reply with an ephemeral failure embed and
    /// return `false`; the interaction is then responded.
    pub(crate) fn enforce(&self, interaction: &mut Interaction) -> bool {
        match self.evaluate(interaction) {
            Ok(()) => true,
            Err(denial) => {
                tracing::debug!(
                    interaction = interaction.id,
                    command = %interaction.command_name,
                    ?denial,
                    "Access denied"
                );
                interaction.reply(Reply::embed(fail_embed(&denial.to_string())).ephemeral(true));
                false
            }
        }
    }

    /// Write the restrictions into a registration schema
    pub(crate) fn apply_to(&self, schema: &mut CommandSchema) {
        if self.is_restricted() {
            schema.dm_permission = Some(false);
        }
        schema.default_member_permissions = self.required_permissions;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interaction::{Guild, Member, User};

    fn guild_interaction(perms: Permissions) -> Interaction {
        let user = User::new(7, "tester");
        Interaction::new(1, "config", user.clone()).in_guild(
            Guild {
                id: 99,
                name: "Test".to_string(),
                icon_url: None,
            },
            Member::new(user, perms),
        )
    }

    #[test]
    fn test_unrestricted_allows_everything() {
        let access = AccessConfig::default();
        let dm = Interaction::new(1, "ping", User::new(7, "tester"));
        assert!(!access.is_restricted());
        assert_eq!(access.evaluate(&dm), Ok(()));
    }

    #[test]
    fn test_guild_only_rejects_direct_messages() {
        let access = AccessConfig {
            guild_only: true,
            required_permissions: None,
        };
        let dm = Interaction::new(1, "config", User::new(7, "tester"));
        assert_eq!(access.evaluate(&dm), Err(AccessDenial::OutsideGuild));
        assert_eq!(access.evaluate(&guild_interaction(Permissions::empty())), Ok(()));
    }

    #[test]
    fn test_permissions_imply_guild_and_report_missing() {
        let access = AccessConfig {
            guild_only: false,
            required_permissions: Some(Permissions::MANAGE_GUILD | Permissions::KICK_MEMBERS),
        };

        let dm = Interaction::new(1, "config", User::new(7, "tester"));
        assert_eq!(access.evaluate(&dm), Err(AccessDenial::OutsideGuild));

        let partial = guild_interaction(Permissions::KICK_MEMBERS);
        let denial = access.evaluate(&partial).unwrap_err();
        assert_eq!(denial, AccessDenial::MissingPermissions(Permissions::MANAGE_GUILD));
        assert_eq!(
            denial.to_string(),
            "You are missing the following permissions: MANAGE_GUILD"
        );

        assert_eq!(access.evaluate(&guild_interaction(Permissions::ADMINISTRATOR)), Ok(()));
    }

    #[test]
    fn test_enforce_replies_ephemerally() {
        let access = AccessConfig {
            guild_only: true,
            required_permissions: None,
        };
        let mut dm = Interaction::new(1, "config", User::new(7, "tester"));

        assert!(!access.enforce(&mut dm));
        assert!(dm.responded());
        assert!(dm.replies()[0].ephemeral);
    }

    #[test]
    fn test_apply_to_schema() {
        let access = AccessConfig {
            guild_only: false,
            required_permissions: Some(Permissions::MANAGE_GUILD),
        };
        let mut schema = CommandSchema::new("config", "Configure");
        access.apply_to(&mut schema);

        assert_eq!(schema.dm_permission, Some(false));
        assert_eq!(schema.default_member_permissions, Some(Permissions::MANAGE_GUILD));

        let mut open = CommandSchema::new("ping", "Ping");
        AccessConfig::default().apply_to(&mut open);
        assert_eq!(open.dm_permission, None);
        assert_eq!(open.default_member_permissions, None);
    }
}
