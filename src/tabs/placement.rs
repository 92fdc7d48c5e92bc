use serde::{Deserialize, Serialize};

/// Which side of the content the bar sits on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Placement {
    /// Start edge: above the content
    #[default]
    Top,
    /// End edge: below the content
    Bottom,
    /// Leading side: left of the content
    Leading,
    /// Trailing side: right of the content
    Trailing,
}

/// Device class reported by the host.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FormFactor {
    #[default]
    Desktop,
    /// Handheld-like: buttons fill a grid and icons sit above labels
    Compact,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Horizontal,
    Vertical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum IconPosition {
    Inline,
    Top,
}

impl Placement {
    pub const ALL: [Placement; 4] = [
        Placement::Top,
        Placement::Bottom,
        Placement::Leading,
        Placement::Trailing,
    ];

    /// Direction the buttons stack in. The fit decision is made along this axis.
    pub fn axis(self) -> Axis {
        match self {
            Placement::Top | Placement::Bottom => Axis::Horizontal,
            Placement::Leading | Placement::Trailing => Axis::Vertical,
        }
    }

    pub fn is_vertical(self) -> bool {
        self.axis() == Axis::Vertical
    }

    pub fn icon_position(self, form_factor: FormFactor) -> IconPosition {
        if form_factor == FormFactor::Compact || self.is_vertical() {
            IconPosition::Top
        } else {
            IconPosition::Inline
        }
    }

    /// Next placement in Top → Bottom → Leading → Trailing order
    pub fn cycle(self) -> Placement {
        match self {
            Placement::Top => Placement::Bottom,
            Placement::Bottom => Placement::Leading,
            Placement::Leading => Placement::Trailing,
            Placement::Trailing => Placement::Top,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Placement::Top => "top",
            Placement::Bottom => "bottom",
            Placement::Leading => "leading",
            Placement::Trailing => "trailing",
        }
    }
}
