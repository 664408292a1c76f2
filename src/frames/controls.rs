/// Flags controlling how a template frame matches a target.
///
/// Each flag may be unset, in which case a fallback
/// (another set of controls, or finally the default) applies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MatchControls {
    /// Whether the result keeps the target's axis order and count (default `false`).
    pub preserve_axes: Option<bool>,
    /// Whether target axes may be reordered to match (default `true`).
    pub permute: Option<bool>,
    /// Whether axes are paired up from the last rather than the first (default `false`).
    pub match_end: Option<bool>,
}

impl MatchControls {
    pub fn with_preserve_axes(mut self, value: bool) -> Self {
        self.preserve_axes = Some(value);
        self
    }

    pub fn with_permute(mut self, value: bool) -> Self {
        self.permute = Some(value);
        self
    }

    pub fn with_match_end(mut self, value: bool) -> Self {
        self.match_end = Some(value);
        self
    }

    pub fn preserves_axes(&self) -> bool {
        self.preserve_axes.unwrap_or(false)
    }

    pub fn allows_permute(&self) -> bool {
        self.permute.unwrap_or(true)
    }

    pub fn matches_end(&self) -> bool {
        self.match_end.unwrap_or(false)
    }

    /// Fill in every unset flag from `fallback`.
    pub fn or(self, fallback: MatchControls) -> Self {
        Self {
            preserve_axes: self.preserve_axes.or(fallback.preserve_axes),
            permute: self.permute.or(fallback.permute),
            match_end: self.match_end.or(fallback.match_end),
        }
    }
}
