//! Formatting defaults threaded through scalar resolution.
//!
//! A [`FormatConfig`] supplies the justification and literals a codec applies
//! to scalar slices whose descriptors do not override them. Resolution merges
//! the two into a [`ScalarFormat`] stored on every scalar field model, so a
//! codec never consults the configuration again.

use alloc::string::String;

use crate::declare::{FieldDescriptor, ScalarKind};

/// Side of a slice against which a value is written.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Align {
    #[default]
    Left,
    Right,
}

/// Alignment and fill character of a slice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Justify {
    pub align: Align,
    pub padding: char,
}

impl Justify {
    pub const fn new(align: Align, padding: char) -> Self {
        Self { align, padding }
    }
}

/// Record-independent formatting rules.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FormatConfig {
    /// Justification of text and character slices.
    pub text: Justify,
    /// Justification of integer and decimal slices.
    pub numeric: Justify,
    /// Literal written for `true`.
    pub true_literal: String,
    /// Literal written for `false`.
    pub false_literal: String,
}

impl Default for FormatConfig {
    fn default() -> Self {
        Self {
            text: Justify::new(Align::Left, ' '),
            numeric: Justify::new(Align::Right, '0'),
            true_literal: String::from("Y"),
            false_literal: String::from("N"),
        }
    }
}

impl FormatConfig {
    pub fn with_text(mut self, text: Justify) -> Self {
        self.text = text;
        self
    }

    pub fn with_numeric(mut self, numeric: Justify) -> Self {
        self.numeric = numeric;
        self
    }

    pub fn with_boolean_literals(
        mut self,
        true_literal: impl Into<String>,
        false_literal: impl Into<String>,
    ) -> Self {
        self.true_literal = true_literal.into();
        self.false_literal = false_literal.into();
        self
    }

    /// Merge the overrides of a descriptor with the defaults for a kind.
    pub fn scalar_format(&self, kind: ScalarKind, descriptor: &FieldDescriptor) -> ScalarFormat {
        let default = match kind {
            ScalarKind::Integer | ScalarKind::Decimal => self.numeric,
            ScalarKind::Text | ScalarKind::Character | ScalarKind::Boolean => self.text,
        };

        let justify = Justify {
            align: descriptor.align.unwrap_or(default.align),
            padding: descriptor.padding.unwrap_or(default.padding),
        };

        let literals = (kind == ScalarKind::Boolean)
            .then(|| (self.true_literal.clone(), self.false_literal.clone()));

        ScalarFormat { justify, literals }
    }
}

/// Fully resolved formatting of one scalar slice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScalarFormat {
    pub justify: Justify,
    /// `true` and `false` literals, present for boolean slices only.
    pub literals: Option<(String, String)>,
}
