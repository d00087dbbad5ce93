//! Collision detection for long flags and short options.

use std::collections::HashMap;
use std::sync::Arc;

use crate::inspect::Classification;
use crate::synth::ConfigFlag;
use crate::{ArgsError, ArgsResult};

use super::FieldDescriptor;

const RESERVED_SHORTS: &[char] = &['h'];
const RESERVED_LONGS: &[&str] = &["help"];
const BUILTIN_OWNER: &str = "<builtin help>";
const CONFIG_OWNER: &str = "<config file flag>";

/// Claims on long flags and short options across a flattened schema.
///
/// Every claim records its owner so a collision error can name both sides.
#[derive(Debug, Default)]
pub struct FlagRegistry {
    longs: HashMap<String, String>,
    shorts: HashMap<char, String>,
}

impl FlagRegistry {
    /// Registry pre-seeded with clap's built-in `--help`/`-h`.
    #[must_use]
    pub fn with_builtins() -> Self {
        let mut registry = Self::default();
        for long in RESERVED_LONGS {
            registry
                .longs
                .insert((*long).to_owned(), BUILTIN_OWNER.to_owned());
        }
        for short in RESERVED_SHORTS {
            registry.shorts.insert(*short, BUILTIN_OWNER.to_owned());
        }
        registry
    }

    /// Claim a long flag for `owner`.
    ///
    /// # Errors
    ///
    /// Returns [`ArgsError::NameCollision`] when the flag is already claimed.
    pub fn claim_long(&mut self, long: &str, owner: &str) -> ArgsResult<()> {
        if let Some(first) = self.longs.get(long) {
            return Err(Arc::new(ArgsError::NameCollision {
                flag: long.to_owned(),
                first: first.clone(),
                second: owner.to_owned(),
            }));
        }
        self.longs.insert(long.to_owned(), owner.to_owned());
        Ok(())
    }

    /// Claim a short option for `owner`.
    ///
    /// # Errors
    ///
    /// Returns [`ArgsError::ShortCollision`] when the option is already
    /// claimed.
    pub fn claim_short(&mut self, short: char, owner: &str) -> ArgsResult<()> {
        if let Some(first) = self.shorts.get(&short) {
            return Err(Arc::new(ArgsError::ShortCollision {
                short,
                first: first.clone(),
                second: owner.to_owned(),
            }));
        }
        self.shorts.insert(short, owner.to_owned());
        Ok(())
    }

    /// Validate and claim the config-file flag.
    ///
    /// # Errors
    ///
    /// Returns [`ArgsError::InvalidAnnotation`] for a malformed name and
    /// [`ArgsError::NameCollision`] when it is already claimed.
    pub fn claim_config_flag(&mut self, flag: &ConfigFlag) -> ArgsResult<()> {
        super::naming::validate_long(CONFIG_OWNER, flag.long())?;
        self.claim_long(flag.long(), CONFIG_OWNER)
    }

    /// Claim every flag a descriptor will register.
    ///
    /// Excluded and positional descriptors claim nothing.
    ///
    /// # Errors
    ///
    /// Returns a collision error naming both field paths.
    pub fn claim_descriptor(&mut self, descriptor: &FieldDescriptor) -> ArgsResult<()> {
        if descriptor.is_excluded() || descriptor.positional().is_some() {
            return Ok(());
        }
        let owner = format!("{} ({})", descriptor.dest(), descriptor.long_flag());
        self.claim_long(descriptor.cli_name(), &owner)?;
        match descriptor.classification() {
            Classification::Bool { .. } => self.claim_long(&descriptor.negated_long(), &owner)?,
            Classification::Dict { .. } => {
                if let Some(name) = descriptor.override_name() {
                    self.claim_long(name, &owner)?;
                }
            }
            _ => {}
        }
        if let Some(short) = descriptor.short() {
            self.claim_short(short, &owner)?;
        }
        Ok(())
    }
}
