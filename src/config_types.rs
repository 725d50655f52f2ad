use serde::{Deserialize, Serialize};
use std::fmt;

use crate::config_value::VariableValue;

/// An option whose value must come from a fixed, ordered set of names.
///
/// `VALUES` is the canonical declaration order; error messages list the
/// allowed values in exactly this order.
pub trait AllowListed: Sized + Copy + 'static {
    /// Human-readable field label.
    const LABEL: &'static str;
    /// Text placed before the rejected value in error messages.
    const MESSAGE_PREFIX: &'static str;
    const VALUES: &'static [(&'static str, Self)];

    fn as_str(self) -> &'static str;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Widget {
    Button,
    #[default]
    Widget,
}

impl AllowListed for Widget {
    const LABEL: &'static str = "Widget";
    const MESSAGE_PREFIX: &'static str = "Widget value";
    const VALUES: &'static [(&'static str, Self)] =
        &[("button", Widget::Button), ("widget", Widget::Widget)];

    fn as_str(self) -> &'static str {
        match self {
            Widget::Button => "button",
            Widget::Widget => "widget",
        }
    }
}

/// Horizontal side of the page the chat box sticks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AlignX {
    Right,
    Left,
}

impl AllowListed for AlignX {
    // Label spelling is part of the public error text.
    const LABEL: &'static str = "AllignX";
    const MESSAGE_PREFIX: &'static str = "AllignX value";
    const VALUES: &'static [(&'static str, Self)] =
        &[("right", AlignX::Right), ("left", AlignX::Left)];

    fn as_str(self) -> &'static str {
        match self {
            AlignX::Right => "right",
            AlignX::Left => "left",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AlignY {
    Side,
    Bottom,
}

impl AllowListed for AlignY {
    const LABEL: &'static str = "AllignY";
    const MESSAGE_PREFIX: &'static str = "AllignY value";
    const VALUES: &'static [(&'static str, Self)] =
        &[("side", AlignY::Side), ("bottom", AlignY::Bottom)];

    fn as_str(self) -> &'static str {
        match self {
            AlignY::Side => "side",
            AlignY::Bottom => "bottom",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RatingType {
    Advanced,
    #[default]
    Simple,
}

impl AllowListed for RatingType {
    const LABEL: &'static str = "Rating type";
    const MESSAGE_PREFIX: &'static str = "Rating type";
    const VALUES: &'static [(&'static str, Self)] = &[
        ("advanced", RatingType::Advanced),
        ("simple", RatingType::Simple),
    ];

    fn as_str(self) -> &'static str {
        match self {
            RatingType::Advanced => "advanced",
            RatingType::Simple => "simple",
        }
    }
}

macro_rules! display_as_str {
    ($($ty:ty),*) => {
        $(impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        })*
    };
}

display_as_str!(Widget, AlignX, AlignY, RatingType);

/// Custom visitor variable shown to the operator next to the conversation.
#[derive(Debug, Clone, PartialEq)]
pub struct Variable {
    pub id: String,
    pub label: String,
    pub value: VariableValue,
}

/// Box placement, set as one unit by `ChatGenerator::set_align`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alignment {
    pub align_x: AlignX,
    pub align_y: AlignY,
    /// Offsets are kept in their rendered textual form.
    pub offset_x: String,
    pub offset_y: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rating {
    pub enabled: bool,
    pub rating_type: RatingType,
    pub comment: bool,
}
