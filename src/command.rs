//! Command contract and parsed invocation context.
//!
//! Every verb is described by static `CommandMetadata` (name, usage text and
//! flag table). The metadata drives both argument parsing and help output.

use crate::error::{CommandError, UsageError};
use crate::requirements::{Requirement, Resolved};
use async_trait::async_trait;
use clap::error::{ContextKind, ErrorKind};
use clap::{Arg, ArgAction};
use std::collections::BTreeMap;

const POSITIONAL: &str = "args";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlagKind {
    String,
    Bool,
    StringSlice,
}

/// One flag accepted by a command.
#[derive(Debug)]
pub struct FlagSpec {
    /// Key used for lookups in `Context`.
    pub name: &'static str,
    pub short: Option<char>,
    pub long: Option<&'static str>,
    pub kind: FlagKind,
    pub usage: &'static str,
}

impl FlagSpec {
    /// Single-letter flag, `-b`.
    pub const fn short(short: char, name: &'static str, kind: FlagKind, usage: &'static str) -> Self {
        Self {
            name,
            short: Some(short),
            long: None,
            kind,
            usage,
        }
    }

    /// Long flag, `--no-route`.
    pub const fn long(name: &'static str, kind: FlagKind, usage: &'static str) -> Self {
        Self {
            name,
            short: None,
            long: Some(name),
            kind,
            usage,
        }
    }

    /// Long flag with a short alias, `--docker-image, -o`.
    pub const fn long_short(
        name: &'static str,
        short: char,
        kind: FlagKind,
        usage: &'static str,
    ) -> Self {
        Self {
            name,
            short: Some(short),
            long: Some(name),
            kind,
            usage,
        }
    }

    /// How the flag is named in messages and help.
    pub fn display(&self) -> String {
        match (self.long, self.short) {
            (Some(long), Some(short)) => format!("--{}, -{}", long, short),
            (Some(long), None) => format!("--{}", long),
            (None, Some(short)) => format!("-{}", short),
            (None, None) => self.name.to_string(),
        }
    }

    fn to_arg(&self) -> Arg {
        let mut arg = Arg::new(self.name);
        if let Some(short) = self.short {
            arg = arg.short(short);
        }
        if let Some(long) = self.long {
            arg = arg.long(long);
        }
        match self.kind {
            FlagKind::Bool => arg.action(ArgAction::SetTrue),
            FlagKind::String => arg.action(ArgAction::Set).num_args(1),
            FlagKind::StringSlice => arg.action(ArgAction::Append).num_args(1),
        }
    }
}

/// Static description of a verb.
#[derive(Debug)]
pub struct CommandMetadata {
    pub name: &'static str,
    pub short_name: Option<&'static str>,
    pub description: &'static str,
    pub usage: &'static str,
    pub flags: &'static [FlagSpec],
    /// Groups of flags of which at most one may be set.
    pub exclusive: &'static [&'static [&'static str]],
    /// Pairs where the first flag requires the second.
    pub together: &'static [(&'static str, &'static str)],
}

impl CommandMetadata {
    pub fn matches(&self, verb: &str) -> bool {
        self.name == verb || self.short_name == Some(verb)
    }

    pub fn flag(&self, name: &str) -> Option<&'static FlagSpec> {
        self.flags.iter().find(|f| f.name == name)
    }

    /// Display form of a flag, falling back to its name.
    pub fn flag_display(&self, name: &str) -> String {
        self.flag(name)
            .map(FlagSpec::display)
            .unwrap_or_else(|| name.to_string())
    }

    /// NAME / USAGE / OPTIONS blocks.
    pub fn help_text(&self) -> String {
        let mut out = String::new();
        out.push_str("NAME:\n");
        out.push_str(&format!("   {} - {}\n", self.name, self.description));
        if let Some(alias) = self.short_name {
            out.push_str("\nALIAS:\n");
            out.push_str(&format!("   {}\n", alias));
        }
        out.push_str("\nUSAGE:\n");
        out.push_str(&format!("   {}\n", self.usage));

        if !self.flags.is_empty() {
            out.push_str("\nOPTIONS:\n");
            let displays: Vec<String> = self.flags.iter().map(FlagSpec::display).collect();
            let width = displays.iter().map(String::len).max().unwrap_or(0);
            for (flag, display) in self.flags.iter().zip(&displays) {
                out.push_str(&format!("   {:<width$}  {}\n", display, flag.usage, width = width));
            }
        }
        out.trim_end().to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlagValue {
    String(String),
    Bool(bool),
    StringSlice(Vec<String>),
}

/// Parsed command line of one invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Context {
    command: String,
    args: Vec<String>,
    flags: BTreeMap<String, FlagValue>,
}

impl Context {
    pub fn new(
        command: impl Into<String>,
        args: Vec<String>,
        flags: BTreeMap<String, FlagValue>,
    ) -> Self {
        Self {
            command: command.into(),
            args,
            flags,
        }
    }

    /// Parse the arguments following the verb against the command's flag table.
    pub fn parse(metadata: &CommandMetadata, args: &[String]) -> Result<Self, UsageError> {
        let mut parser = clap::Command::new(metadata.name)
            .no_binary_name(true)
            .disable_help_flag(true)
            .disable_version_flag(true)
            .disable_help_subcommand(true);
        for flag in metadata.flags {
            parser = parser.arg(flag.to_arg());
        }
        parser = parser.arg(
            Arg::new(POSITIONAL)
                .action(ArgAction::Append)
                .num_args(0..),
        );

        let matches = parser
            .try_get_matches_from(args.iter().cloned())
            .map_err(usage_from_clap)?;

        let mut flags = BTreeMap::new();
        for flag in metadata.flags {
            let value = match flag.kind {
                FlagKind::Bool => matches.get_flag(flag.name).then_some(FlagValue::Bool(true)),
                FlagKind::String => matches
                    .get_one::<String>(flag.name)
                    .map(|v| FlagValue::String(v.clone())),
                FlagKind::StringSlice => matches
                    .get_many::<String>(flag.name)
                    .map(|vs| FlagValue::StringSlice(vs.cloned().collect())),
            };
            if let Some(value) = value {
                flags.insert(flag.name.to_string(), value);
            }
        }
        let positional = matches
            .get_many::<String>(POSITIONAL)
            .map(|vs| vs.cloned().collect())
            .unwrap_or_default();

        Ok(Self::new(metadata.name, positional, flags))
    }

    pub fn command_name(&self) -> &str {
        &self.command
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    pub fn is_set(&self, flag: &str) -> bool {
        self.flags.contains_key(flag)
    }

    pub fn string(&self, flag: &str) -> Option<&str> {
        match self.flags.get(flag) {
            Some(FlagValue::String(v)) => Some(v.as_str()),
            _ => None,
        }
    }

    pub fn bool(&self, flag: &str) -> bool {
        matches!(self.flags.get(flag), Some(FlagValue::Bool(true)))
    }

    pub fn string_slice(&self, flag: &str) -> &[String] {
        match self.flags.get(flag) {
            Some(FlagValue::StringSlice(v)) => v,
            _ => &[],
        }
    }
}

fn usage_from_clap(err: clap::Error) -> UsageError {
    let arg = err.get(ContextKind::InvalidArg).map(|v| v.to_string());
    let message = match (err.kind(), arg) {
        (ErrorKind::UnknownArgument, Some(arg)) => format!("unknown flag `{}`", arg),
        (ErrorKind::InvalidValue, Some(arg)) => format!("flag needs an argument: {}", arg),
        (ErrorKind::ArgumentConflict, Some(arg)) => {
            format!("flag provided more than once: {}", arg)
        }
        (kind, _) => kind
            .as_str()
            .unwrap_or("invalid arguments")
            .to_string(),
    };
    UsageError::new(message)
}

/// A user-facing verb.
#[async_trait]
pub trait Command: Send + Sync {
    fn metadata(&self) -> &'static CommandMetadata;

    /// Preconditions for this invocation, in evaluation order. Wrong arity is
    /// reported here as a usage error.
    fn requirements(&self, ctx: &Context) -> Result<Vec<Requirement>, UsageError>;

    /// Business logic. Runs only after every requirement passed.
    async fn run(&self, ctx: &Context, resolved: &Resolved) -> Result<(), CommandError>;
}

/// Exactly one positional argument.
pub fn single_argument(ctx: &Context) -> Result<&str, UsageError> {
    match ctx.args() {
        [only] => Ok(only.as_str()),
        _ => Err(UsageError::arity()),
    }
}
