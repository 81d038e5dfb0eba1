//! Bricks: typed references to the glyphs of a wave skin.
//!
//! A compiled lane is a sequence of [`Brick`]s, one per drawn half-cycle.
//! Bricks never carry artwork; their [`Display`](fmt::Display) form is the
//! id of the glyph definition inside the skin (for example `0m1`, `vvv-3`
//! or `pclk`), which the renderer references with `<use href="#...">`.

use std::fmt;

/// Logical level of a waveform at a point in time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Level {
    /// Logic low (`0`).
    Low,
    /// Logic high (`1`).
    High,
    /// Unknown / don't care, drawn hatched (`x`).
    Unknown,
    /// High impedance (`z`).
    HighZ,
    /// Pull-down (`d`).
    PullDown,
    /// Pull-up (`u`).
    PullUp,
    /// A bus value (`v`), always paired with a [`DataIndex`].
    Value,
}

impl Level {
    /// The single-character code used in glyph names.
    pub fn code(self) -> char {
        match self {
            Level::Low => '0',
            Level::High => '1',
            Level::Unknown => 'x',
            Level::HighZ => 'z',
            Level::PullDown => 'd',
            Level::PullUp => 'u',
            Level::Value => 'v',
        }
    }
}

/// Color index of a bus value, `2` through `9`.
///
/// The `=` notation symbol is an alias for index 2.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DataIndex(u8);

impl DataIndex {
    /// Creates a data index, returning `None` outside `2..=9`.
    pub fn new(index: u8) -> Option<Self> {
        (2..=9).contains(&index).then_some(Self(index))
    }

    /// Returns the numeric index.
    pub fn get(self) -> u8 {
        self.0
    }
}

impl fmt::Display for DataIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "-{}", self.0)
    }
}

/// Sharp clock edges, used by clocks and by sharp level symbols.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClockEdge {
    /// Rising edge (`pclk`).
    Rising,
    /// Falling edge (`nclk`).
    Falling,
    /// Rising edge with an arrow marker (`Pclk`).
    RisingMarked,
    /// Falling edge with an arrow marker (`Nclk`).
    FallingMarked,
}

impl ClockEdge {
    /// The level the waveform settles at after this edge.
    pub fn settles_at(self) -> Level {
        match self {
            ClockEdge::Rising | ClockEdge::RisingMarked => Level::High,
            ClockEdge::Falling | ClockEdge::FallingMarked => Level::Low,
        }
    }
}

/// One drawn half-cycle of a waveform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Brick {
    /// A sharp edge.
    Edge(ClockEdge),
    /// A steady level, e.g. `111` or `vvv-4`.
    Steady {
        level: Level,
        data: Option<DataIndex>,
    },
    /// A soft transition between two levels, e.g. `0m1` or `vmv-2-3`.
    Transition {
        from: Level,
        to: Level,
        from_data: Option<DataIndex>,
        to_data: Option<DataIndex>,
    },
}

impl Brick {
    /// A steady brick without a bus value.
    pub fn steady(level: Level) -> Self {
        Brick::Steady { level, data: None }
    }

    /// A steady bus-value brick.
    pub fn value(data: DataIndex) -> Self {
        Brick::Steady {
            level: Level::Value,
            data: Some(data),
        }
    }

    /// The steady brick that continues this brick when a cell is stretched.
    ///
    /// ```
    /// # use wavelane_core::brick::{Brick, ClockEdge, Level};
    /// assert_eq!(Brick::Edge(ClockEdge::Rising).sustain(), Brick::steady(Level::High));
    /// ```
    pub fn sustain(self) -> Brick {
        match self {
            Brick::Edge(edge) => Brick::steady(edge.settles_at()),
            Brick::Steady { .. } => self,
            Brick::Transition { to, to_data, .. } => Brick::Steady {
                level: to,
                data: to_data,
            },
        }
    }

    /// Returns the bus index when this is a steady bus-value brick.
    ///
    /// Runs of these bricks are where data labels are centered.
    pub fn data_value(self) -> Option<DataIndex> {
        match self {
            Brick::Steady {
                level: Level::Value,
                data,
            } => data,
            _ => None,
        }
    }
}

impl fmt::Display for Brick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Brick::Edge(ClockEdge::Rising) => write!(f, "pclk"),
            Brick::Edge(ClockEdge::Falling) => write!(f, "nclk"),
            Brick::Edge(ClockEdge::RisingMarked) => write!(f, "Pclk"),
            Brick::Edge(ClockEdge::FallingMarked) => write!(f, "Nclk"),
            Brick::Steady { level, data } => {
                let c = level.code();
                write!(f, "{c}{c}{c}")?;
                if let Some(data) = data {
                    write!(f, "{data}")?;
                }
                Ok(())
            }
            Brick::Transition {
                from,
                to,
                from_data,
                to_data,
            } => {
                write!(f, "{}m{}", from.code(), to.code())?;
                if let Some(data) = from_data {
                    write!(f, "{data}")?;
                }
                if let Some(data) = to_data {
                    write!(f, "{data}")?;
                }
                Ok(())
            }
        }
    }
}
