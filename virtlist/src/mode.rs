use crate::offsets::OffsetTable;

/// How the list lays out and virtualizes its items. Fixed for the lifetime
/// of a control.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ListMode {
    /// Every item is always rendered, in order. No virtualization.
    Grow,
    /// All items share the height the delegate reports for the first item.
    ViewportFixedItems,
    /// All items share the height measured from the first item's node.
    #[default]
    ViewportFixedItemsMeasured,
    /// Each item has its own delegate-reported height.
    ViewportVariableItems,
}

impl ListMode {
    pub fn is_virtualized(self) -> bool {
        self != Self::Grow
    }
}

impl std::fmt::Display for ListMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Grow => "grow",
            Self::ViewportFixedItems => "fixed",
            Self::ViewportFixedItemsMeasured => "measured",
            Self::ViewportVariableItems => "variable",
        };
        f.write_str(name)
    }
}

impl std::str::FromStr for ListMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "grow" => Ok(Self::Grow),
            "fixed" => Ok(Self::ViewportFixedItems),
            "measured" => Ok(Self::ViewportFixedItemsMeasured),
            "variable" => Ok(Self::ViewportVariableItems),
            other => Err(format!("unknown list mode '{other}'")),
        }
    }
}

/// Mode-specific geometry state.
#[derive(Debug)]
pub(crate) enum Geometry {
    Grow,
    /// `height` is 0 until known.
    Fixed { measured: bool, height: u32 },
    Variable(OffsetTable),
}

impl Geometry {
    pub(crate) fn for_mode(mode: ListMode) -> Self {
        match mode {
            ListMode::Grow => Self::Grow,
            ListMode::ViewportFixedItems => Self::Fixed {
                measured: false,
                height: 0,
            },
            ListMode::ViewportFixedItemsMeasured => Self::Fixed {
                measured: true,
                height: 0,
            },
            ListMode::ViewportVariableItems => Self::Variable(OffsetTable::new()),
        }
    }
}
