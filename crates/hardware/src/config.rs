//! Hart configuration.
//!
//! This module defines the configuration a host uses to build a hart. It provides:
//! 1. **Defaults:** Reset values shared by every hart.
//! 2. **Structures:** The top-level [`HartConfig`] and its [`ExtensionConfig`].
//! 3. **Enums:** The register width selector [`XlenKind`].
//!
//! Configuration is usually deserialized from JSON with [`HartConfig::from_json`];
//! every field is optional and falls back to its default.

use serde::Deserialize;

use crate::common::error::ConfigError;

/// Default configuration constants.
mod defaults {
    /// Reset program counter; the conventional start of RAM.
    pub const RESET_PC: u64 = 0x8000_0000;

    /// Instructions per batch when the host does not choose one.
    pub const BATCH_SIZE: u64 = 4096;

    /// Identifier of the first hart.
    pub const HART_ID: u64 = 0;
}

/// `misa` bit of an extension letter.
const fn misa_letter(letter: u8) -> u64 {
    1 << (letter - b'A')
}

/// Integer register width of a hart.
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum XlenKind {
    /// 32-bit registers.
    Rv32,
    /// 64-bit registers.
    #[default]
    Rv64,
}

impl XlenKind {
    /// Width in bits.
    pub const fn bits(self) -> u32 {
        match self {
            Self::Rv32 => 32,
            Self::Rv64 => 64,
        }
    }
}

/// Optional ISA extensions on top of the base integer set.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq, Hash)]
#[serde(default)]
pub struct ExtensionConfig {
    /// Compressed instructions.
    pub c: bool,
    /// Integer multiply and divide.
    pub m: bool,
    /// Atomics.
    pub a: bool,
    /// Single-precision floating point.
    pub f: bool,
    /// Double-precision floating point.
    pub d: bool,
}

impl Default for ExtensionConfig {
    fn default() -> Self {
        Self::ALL
    }
}

impl ExtensionConfig {
    /// Base integer set only.
    pub const NONE: Self = Self {
        c: false,
        m: false,
        a: false,
        f: false,
        d: false,
    };

    /// Every supported extension (IMAFDC).
    pub const ALL: Self = Self {
        c: true,
        m: true,
        a: true,
        f: true,
        d: true,
    };

    /// Extension letter bits of `misa`, including `I`.
    pub const fn misa_letters(self) -> u64 {
        let mut bits = misa_letter(b'I');
        if self.c {
            bits |= misa_letter(b'C');
        }
        if self.m {
            bits |= misa_letter(b'M');
        }
        if self.a {
            bits |= misa_letter(b'A');
        }
        if self.f {
            bits |= misa_letter(b'F');
        }
        if self.d {
            bits |= misa_letter(b'D');
        }
        bits
    }

    /// Checks extension dependencies.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingDependency`] when D is enabled without F.
    pub const fn validate(self) -> Result<(), ConfigError> {
        if self.d && !self.f {
            return Err(ConfigError::MissingDependency {
                extension: 'D',
                requires: 'F',
            });
        }
        Ok(())
    }
}

/// Configuration of one hart.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct HartConfig {
    /// Register width.
    pub xlen: XlenKind,
    /// Value reported by `mhartid` and used to tag LR reservations.
    pub hart_id: u64,
    /// Program counter after construction.
    pub reset_pc: u64,
    /// Per-batch instruction budget for [`Machine::run`](crate::sim::Machine::run).
    /// Must be nonzero.
    pub batch_size: u64,
    /// Enabled extensions.
    pub extensions: ExtensionConfig,
}

impl Default for HartConfig {
    fn default() -> Self {
        Self {
            xlen: XlenKind::default(),
            hart_id: defaults::HART_ID,
            reset_pc: defaults::RESET_PC,
            batch_size: defaults::BATCH_SIZE,
            extensions: ExtensionConfig::default(),
        }
    }
}

impl HartConfig {
    /// Parses a configuration from JSON. Missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON or unknown values.
    ///
    /// # Examples
    ///
    /// ```
    /// use rvhart_core::config::{HartConfig, XlenKind};
    ///
    /// let cfg = HartConfig::from_json(r#"{ "xlen": "rv32", "extensions": { "d": false } }"#)?;
    /// assert_eq!(cfg.xlen, XlenKind::Rv32);
    /// assert!(cfg.extensions.f && !cfg.extensions.d);
    /// # Ok::<(), rvhart_core::common::ConfigError>(())
    /// ```
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks the configuration for consistency.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when an extension dependency is missing, the
    /// reset PC is misaligned for the enabled instruction sizes, or the batch
    /// size is zero.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.extensions.validate()?;
        if self.batch_size == 0 {
            return Err(ConfigError::ZeroBatchSize);
        }
        let align_mask = if self.extensions.c { 1 } else { 3 };
        if self.reset_pc & align_mask != 0 {
            return Err(ConfigError::MisalignedResetPc(self.reset_pc));
        }
        Ok(())
    }
}
