//! # Layout Enumerations
//!
//! Closed value sets used by site metadata and section design overrides.
//! None of them coerce: a value outside the set is rejected.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Named responsive-layout width thresholds (mobile first).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Breakpoint {
    /// Extra small, from 0px.
    Xs,
    /// Small, from 600px.
    Sm,
    /// Medium, from 900px.
    Md,
    /// Large, from 1200px.
    Lg,
    /// Extra large, from 1536px.
    Xl,
}

closed_set!(Breakpoint, "breakpoint", {
    Xs => "xs",
    Sm => "sm",
    Md => "md",
    Lg => "lg",
    Xl => "xl",
});

impl Breakpoint {
    /// Minimum viewport width in pixels at which this breakpoint applies.
    pub fn min_width_px(&self) -> u32 {
        match self {
            Breakpoint::Xs => 0,
            Breakpoint::Sm => 600,
            Breakpoint::Md => 900,
            Breakpoint::Lg => 1200,
            Breakpoint::Xl => 1536,
        }
    }
}

/// How column media fills its box. Renderers default to `contain`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaPosition {
    Cover,
    Contain,
}

closed_set!(MediaPosition, "media position", {
    Cover => "cover",
    Contain => "contain",
});

/// Vertical alignment of column text or media.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerticalAlign {
    Top,
    Middle,
    Bottom,
    Stretch,
}

closed_set!(VerticalAlign, "vertical alignment", {
    Top => "top",
    Middle => "middle",
    Bottom => "bottom",
    Stretch => "stretch",
});

/// Horizontal alignment of column text or media.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HorizontalAlign {
    Left,
    Center,
    Right,
    Span,
}

closed_set!(HorizontalAlign, "horizontal alignment", {
    Left => "left",
    Center => "center",
    Right => "right",
    Span => "span",
});

/// Maximum width of the page content container.
///
/// On the wire this is either a breakpoint name or the literal `false`,
/// which means the container is unbounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContainerMaxWidth {
    /// Content stops growing at the given breakpoint.
    Bounded(Breakpoint),
    /// Content spans the full viewport.
    Unbounded,
}

impl ContainerMaxWidth {
    /// The limiting breakpoint, if any.
    pub fn breakpoint(&self) -> Option<Breakpoint> {
        match self {
            ContainerMaxWidth::Bounded(bp) => Some(*bp),
            ContainerMaxWidth::Unbounded => None,
        }
    }
}

impl Serialize for ContainerMaxWidth {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ContainerMaxWidth::Bounded(bp) => bp.serialize(serializer),
            ContainerMaxWidth::Unbounded => serializer.serialize_bool(false),
        }
    }
}

impl<'de> Deserialize<'de> for ContainerMaxWidth {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Breakpoint(Breakpoint),
            Flag(bool),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Breakpoint(bp) => Ok(ContainerMaxWidth::Bounded(bp)),
            Repr::Flag(false) => Ok(ContainerMaxWidth::Unbounded),
            Repr::Flag(true) => Err(serde::de::Error::custom(
                "containerMaxWidth must be a breakpoint name or false",
            )),
        }
    }
}
