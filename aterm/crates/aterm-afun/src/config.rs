//! Configuration Module - Registry Tuning Parameters
//!
//! The registry is configured once, before bootstrap. Options come from
//! three places, in increasing precedence: [`AfunConfig::default`],
//! environment variables ([`AfunConfig::from_env`]) and toolkit-style
//! command-line options ([`AfunConfig::parse_args`]).

use thiserror::Error;

/// Default table class; the initial capacity is `1 << class`
pub const DEFAULT_TABLE_CLASS: u8 = 14;

/// Smallest accepted table class
pub const MIN_TABLE_CLASS: u8 = 2;

/// Largest table class; identities must fit in 32 bits
pub const MAX_TABLE_CLASS: u8 = 31;

/// Default number of root-stack entries allocated at bootstrap
pub const ROOT_STACK_INITIAL: usize = 256;

/// Default number of entries the root stack grows by when full
pub const ROOT_STACK_INCREMENT: usize = 256;

/// Option selecting the initial table class
pub const OPT_TABLE_CLASS: &str = "-at-afuntable";

/// Deprecated option that selected a raw hash-table size
pub const OPT_DEPRECATED_TABLE_SIZE: &str = "-at-symboltable";

/// Option printing the recognized registry options
pub const OPT_HELP: &str = "-at-help";

/// Error types for configuration
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("Invalid table class: {0}")]
    InvalidTableClass(String),

    #[error("Invalid root stack size: {0}")]
    InvalidRootStack(String),

    #[error("Missing value for option {0}")]
    MissingValue(String),

    #[error("Option {option} is deprecated, use {replacement} <class> instead")]
    DeprecatedOption { option: String, replacement: String },
}

/// Result type alias for configuration operations
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Registry configuration
///
/// # Examples
///
/// ```
/// use aterm_afun::AfunConfig;
///
/// let config = AfunConfig {
///     table_class: 4,
///     ..Default::default()
/// };
/// assert!(config.validate().is_ok());
/// assert_eq!(config.initial_capacity(), 16);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AfunConfig {
    /// Initial table class
    ///
    /// The actual table size is `1 << table_class`; every growth advances
    /// to the next class.
    /// Default: 14
    pub table_class: u8,

    /// Root-stack entries allocated at bootstrap
    /// Default: 256
    pub root_stack_initial: usize,

    /// Entries the root stack grows by whenever it fills
    /// Default: 256
    pub root_stack_increment: usize,
}

/// Outcome of scanning command-line options
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedOptions {
    pub config: AfunConfig,
    /// True if the help option was present
    pub help: bool,
    /// Arguments the registry does not recognize, in their original order
    pub rest: Vec<String>,
}

impl Default for AfunConfig {
    fn default() -> Self {
        AfunConfig {
            table_class: DEFAULT_TABLE_CLASS,
            root_stack_initial: ROOT_STACK_INITIAL,
            root_stack_increment: ROOT_STACK_INCREMENT,
        }
    }
}

impl AfunConfig {
    /// Capacity of the entry store and bucket table at bootstrap
    #[inline]
    pub fn initial_capacity(&self) -> usize {
        capacity_of_class(self.table_class)
    }

    /// Validate configuration
    ///
    /// Checks if all values are in valid ranges.
    pub fn validate(&self) -> Result<()> {
        if !(MIN_TABLE_CLASS..=MAX_TABLE_CLASS).contains(&self.table_class) {
            return Err(ConfigError::InvalidTableClass(format!(
                "{} is outside {}..={}",
                self.table_class, MIN_TABLE_CLASS, MAX_TABLE_CLASS
            )));
        }

        if self.root_stack_initial == 0 {
            return Err(ConfigError::InvalidRootStack(
                "root_stack_initial must be > 0".to_string(),
            ));
        }

        if self.root_stack_increment == 0 {
            return Err(ConfigError::InvalidRootStack(
                "root_stack_increment must be > 0".to_string(),
            ));
        }

        Ok(())
    }

    /// Build configuration from environment variables
    ///
    /// Overrides defaults with:
    /// - ATERM_AFUN_TABLE_CLASS
    /// - ATERM_ROOT_STACK_INITIAL
    /// - ATERM_ROOT_STACK_INCREMENT
    ///
    /// Unparsable values keep the default.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(class) = lookup("ATERM_AFUN_TABLE_CLASS").and_then(|v| v.parse().ok()) {
            config.table_class = class;
        }

        if let Some(size) = lookup("ATERM_ROOT_STACK_INITIAL").and_then(|v| v.parse().ok()) {
            config.root_stack_initial = size;
        }

        if let Some(size) = lookup("ATERM_ROOT_STACK_INCREMENT").and_then(|v| v.parse().ok()) {
            config.root_stack_increment = size;
        }

        config
    }

    /// Scan toolkit-style options, starting from `self`
    ///
    /// Recognizes `-at-afuntable <class>` (also spelled with two leading
    /// dashes) and `-at-help`. The deprecated `-at-symboltable <size>` is
    /// rejected. Everything else is passed through in [`ParsedOptions::rest`].
    ///
    /// # Examples
    ///
    /// ```
    /// use aterm_afun::AfunConfig;
    ///
    /// let args = ["tool", "-at-afuntable", "8", "input.aterm"];
    /// let parsed = AfunConfig::default().parse_args(args).unwrap();
    /// assert_eq!(parsed.config.table_class, 8);
    /// assert_eq!(parsed.rest, vec!["tool", "input.aterm"]);
    /// ```
    pub fn parse_args<I, S>(mut self, args: I) -> Result<ParsedOptions>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut help = false;
        let mut rest = Vec::new();
        let mut args = args.into_iter().map(Into::into);

        while let Some(arg) = args.next() {
            match normalize_option(&arg) {
                Some(OPT_TABLE_CLASS) => {
                    let value = args
                        .next()
                        .ok_or_else(|| ConfigError::MissingValue(OPT_TABLE_CLASS.to_string()))?;
                    self.table_class = value.parse().map_err(|_| {
                        ConfigError::InvalidTableClass(format!("`{}` is not a class", value))
                    })?;
                }
                Some(OPT_DEPRECATED_TABLE_SIZE) => {
                    return Err(ConfigError::DeprecatedOption {
                        option: OPT_DEPRECATED_TABLE_SIZE.to_string(),
                        replacement: OPT_TABLE_CLASS.to_string(),
                    });
                }
                Some(OPT_HELP) => help = true,
                _ => rest.push(arg),
            }
        }

        self.validate()?;
        Ok(ParsedOptions {
            config: self,
            help,
            rest,
        })
    }

    /// Usage text for the registry options
    pub fn help_text(&self) -> String {
        format!(
            "    {:<22} initial symbol table class (current: {}, table size is 2^class)\n\
             \x20   {:<22} print this help\n",
            format!("{} <class>", OPT_TABLE_CLASS),
            self.table_class,
            OPT_HELP,
        )
    }
}

/// Capacity for a table class
#[inline]
pub(crate) fn capacity_of_class(class: u8) -> usize {
    1usize << class
}

/// Map `--at-x` to `-at-x`; other arguments are not options
fn normalize_option(arg: &str) -> Option<&'static str> {
    let name = arg.strip_prefix('-').map(|a| a.strip_prefix('-').unwrap_or(a))?;
    [OPT_TABLE_CLASS, OPT_DEPRECATED_TABLE_SIZE, OPT_HELP]
        .into_iter()
        .find(|opt| opt[1..] == *name)
}
