/// Default name of the procedure a program starts in.
pub const DEFAULT_ENTRY_POINT: &str = "main";
/// Default limit on nested calls.
///
/// Each call of the language uses several host stack frames; this limit keeps
/// a runaway recursion from exhausting a default 2 MiB thread stack.
pub const DEFAULT_MAX_CALL_DEPTH: usize = 128;

/// Settings for running a program.
///
/// # Example
/// ```
/// use linger::config::Config;
///
/// let config = Config::default().with_entry_point("start").with_max_call_depth(64);
/// assert_eq!(config.entry_point, "start");
/// assert_eq!(config.max_call_depth, 64);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// The procedure invoked, with no arguments, by `run`.
    pub entry_point:    String,
    /// Calls nested deeper than this fail with a stack overflow error.
    pub max_call_depth: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self { entry_point:    DEFAULT_ENTRY_POINT.to_string(),
               max_call_depth: DEFAULT_MAX_CALL_DEPTH, }
    }
}

impl Config {
    #[must_use]
    pub fn with_entry_point(mut self, name: impl Into<String>) -> Self {
        self.entry_point = name.into();
        self
    }

    #[must_use]
    pub const fn with_max_call_depth(mut self, depth: usize) -> Self {
        self.max_call_depth = depth;
        self
    }
}
