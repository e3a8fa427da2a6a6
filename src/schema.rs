//! Schema fragments for platform command registration
//!
//! Every dispatch target can describe itself as a fragment. The registry
//! collects one [`CommandSchema`] per top-level command; groups, subcommands
//! and plain arguments nest inside as [`OptionSchema`] values. The serialized
//! form is the application-command JSON accepted by the bulk registration
//! endpoint.

use crate::permissions::Permissions;
use crate::util::truncate_chars;
use serde::{Serialize, Serializer};

/// Platform limit on command and option descriptions
pub const MAX_DESCRIPTION_LENGTH: usize = 100;

/// Application command type for slash commands
const CHAT_INPUT: u8 = 1;

/// Option type discriminant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionKind {
    Subcommand = 1,
    SubcommandGroup = 2,
    String = 3,
    Integer = 4,
    Boolean = 5,
    User = 6,
    Channel = 7,
    Role = 8,
    Mentionable = 9,
    Number = 10,
    Attachment = 11,
}

impl OptionKind {
    /// Whether this option is a routing level rather than a value
    pub fn is_routing(&self) -> bool {
        matches!(self, Self::Subcommand | Self::SubcommandGroup)
    }
}

impl Serialize for OptionKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(*self as u8)
    }
}

/// Group, subcommand or argument description
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OptionSchema {
    #[serde(rename = "type")]
    pub kind: OptionKind,
    pub name: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<OptionSchema>,
}

impl OptionSchema {
    fn new(kind: OptionKind, name: &str, description: &str) -> Self {
        Self {
            kind,
            name: name.to_string(),
            description: truncate_chars(description, MAX_DESCRIPTION_LENGTH).to_string(),
            required: None,
            options: Vec::new(),
        }
    }

    pub fn subcommand(name: &str, description: &str, arguments: Vec<OptionSchema>) -> Self {
        Self {
            options: arguments,
            ..Self::new(OptionKind::Subcommand, name, description)
        }
    }

    pub fn group(name: &str, description: &str, subcommands: Vec<OptionSchema>) -> Self {
        Self {
            options: subcommands,
            ..Self::new(OptionKind::SubcommandGroup, name, description)
        }
    }

    /// A value-carrying argument
    pub fn argument(kind: OptionKind, name: &str, description: &str, required: bool) -> Self {
        Self {
            required: Some(required),
            ..Self::new(kind, name, description)
        }
    }
}

/// Top-level command description
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommandSchema {
    #[serde(rename = "type")]
    pub kind: u8,
    pub name: String,
    pub description: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<OptionSchema>,
    /// `false` hides the command in direct messages
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dm_permission: Option<bool>,
    /// Members need all of these to see the command by default
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_member_permissions: Option<Permissions>,
}

impl CommandSchema {
    pub fn new(name: &str, description: &str) -> Self {
        Self {
            kind: CHAT_INPUT,
            name: name.to_string(),
            description: truncate_chars(description, MAX_DESCRIPTION_LENGTH).to_string(),
            options: Vec::new(),
            dm_permission: None,
            default_member_permissions: None,
        }
    }

    /// Names of the nested routing options, in export order
    pub fn routing_names(&self) -> Vec<&str> {
        self.options
            .iter()
            .filter(|o| o.kind.is_routing())
            .map(|o| o.name.as_str())
            .collect()
    }
}
