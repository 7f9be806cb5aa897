use serde::Deserialize;

/// How non-integral floats are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FloatFormat {
    /// Six significant digits in `%g` style (`1.23457e+06`, `0.1`).
    ///
    /// Not round-trip exact: `0.1234567` renders as `0.123457`.
    #[default]
    Fast,
    /// Shortest representation that parses back to the same value.
    Shortest,
}

/// Immutable settings for one encode call.
///
/// # Examples
/// ```
/// use sjson::Config;
///
/// let config = Config::new().with_sort_map_keys(true);
/// assert!(config.sort_map_keys);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Emit map entries ordered by the bytes of their rendered keys.
    ///
    /// When off, entries come out in the map's own iteration order, which for
    /// `HashMap` differs between runs.
    pub sort_map_keys: bool,
    pub float_format: FloatFormat,
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_sort_map_keys(mut self, sort_map_keys: bool) -> Self {
        self.sort_map_keys = sort_map_keys;
        self
    }

    pub fn with_float_format(mut self, float_format: FloatFormat) -> Self {
        self.float_format = float_format;
        self
    }
}
