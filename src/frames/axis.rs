/// Descriptive attributes of a single coordinate axis.
///
/// Unset attributes are `None`, so that one description can be overlaid on another.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Axis {
    pub label: Option<String>,
    pub symbol: Option<String>,
    pub unit: Option<String>,
}

impl Axis {
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_symbol(mut self, symbol: impl Into<String>) -> Self {
        self.symbol = Some(symbol.into());
        self
    }

    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = Some(unit.into());
        self
    }

    /// A copy of this description with every attribute set on `other` replacing its own.
    pub fn overlaid(&self, other: &Axis) -> Self {
        Self {
            label: other.label.clone().or_else(|| self.label.clone()),
            symbol: other.symbol.clone().or_else(|| self.symbol.clone()),
            unit: other.unit.clone().or_else(|| self.unit.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Axis;

    #[test]
    fn test_overlay() {
        let base = Axis::default().with_label("Right ascension").with_unit("deg");
        let over = Axis::default().with_label("RA").with_symbol("a");
        let got = base.overlaid(&over);
        assert_eq!(got.label.as_deref(), Some("RA"));
        assert_eq!(got.symbol.as_deref(), Some("a"));
        assert_eq!(got.unit.as_deref(), Some("deg"));

        assert_eq!(base.overlaid(&Axis::default()), base);
    }
}
