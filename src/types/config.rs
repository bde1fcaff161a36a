use serde::Deserialize;

/// Sizing and safety limits for layout and rendering.
///
/// Defaults match the stock node box: 25 characters per label line, 24 units
/// per line plus 20 of padding, 200 units wide.
///
/// # Example
///
/// ```
/// use ruletree::RenderConfig;
///
/// let config = RenderConfig::default().with_wrap_width(30).with_max_depth(64);
/// assert_eq!(config.box_height(2), 68);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderConfig {
    pub(crate) wrap_width: usize,
    pub(crate) line_height: u32,
    pub(crate) padding: u32,
    pub(crate) node_width: u32,
    pub(crate) max_depth: usize,
}

pub const DEFAULT_WRAP_WIDTH: usize = 25;
pub const DEFAULT_MAX_DEPTH: usize = 256;

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            wrap_width: DEFAULT_WRAP_WIDTH,
            line_height: 24,
            padding: 20,
            node_width: 200,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl RenderConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Maximum characters per label line.
    #[must_use]
    pub fn with_wrap_width(mut self, width: usize) -> Self {
        self.wrap_width = width;
        self
    }

    #[must_use]
    pub fn with_line_height(mut self, height: u32) -> Self {
        self.line_height = height;
        self
    }

    #[must_use]
    pub fn with_padding(mut self, padding: u32) -> Self {
        self.padding = padding;
        self
    }

    #[must_use]
    pub fn with_node_width(mut self, width: u32) -> Self {
        self.node_width = width;
        self
    }

    /// Deepest AST the converter will walk before giving up.
    #[must_use]
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    #[must_use]
    pub fn wrap_width(&self) -> usize {
        self.wrap_width
    }

    #[must_use]
    pub fn line_height(&self) -> u32 {
        self.line_height
    }

    #[must_use]
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Height of a node box holding `lines` lines of label text.
    #[must_use]
    pub fn box_height(&self, lines: usize) -> u32 {
        let lines = u32::try_from(lines).unwrap_or(u32::MAX);
        lines
            .saturating_mul(self.line_height)
            .saturating_add(self.padding)
    }

    #[must_use]
    pub fn box_width(&self) -> u32 {
        self.node_width
    }

    /// Parse a config from JSON. Missing keys keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`serde_json::Error`] on malformed JSON or unknown keys.
    pub fn from_json(input: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(input)
    }
}
