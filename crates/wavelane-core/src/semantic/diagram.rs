//! The root diagram type and its annotations.
//!
//! - [`Diagram`] - the signal tree plus rendering options
//! - [`Axis`] - head/foot captions and tick labels
//! - [`EdgeSpec`] / [`ArcShape`] - connectors between named events

use std::{fmt, str::FromStr};

use crate::{element::Element, semantic::signal::Group};

/// Largest accepted horizontal scale.
pub const MAX_HSCALE: u32 = 100;

/// A fully normalized timing diagram.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagram {
    signal: Group,
    hscale: u32,
    skin: String,
    head: Option<Axis>,
    foot: Option<Axis>,
    edges: Vec<EdgeSpec>,
}

impl Diagram {
    /// Creates a diagram with horizontal scale 1, the default skin and no
    /// annotations.
    pub fn new(signal: Group) -> Self {
        Self {
            signal,
            hscale: 1,
            skin: "default".to_string(),
            head: None,
            foot: None,
            edges: Vec::new(),
        }
    }

    /// Sets the horizontal scale, clamped to `1..=MAX_HSCALE`.
    pub fn with_hscale(mut self, hscale: u32) -> Self {
        self.hscale = hscale.clamp(1, MAX_HSCALE);
        self
    }

    pub fn with_skin(mut self, skin: impl Into<String>) -> Self {
        self.skin = skin.into();
        self
    }

    pub fn with_head(mut self, head: Axis) -> Self {
        self.head = Some(head);
        self
    }

    pub fn with_foot(mut self, foot: Axis) -> Self {
        self.foot = Some(foot);
        self
    }

    pub fn with_edges(mut self, edges: Vec<EdgeSpec>) -> Self {
        self.edges = edges;
        self
    }

    /// The root of the signal tree.
    pub fn signal(&self) -> &Group {
        &self.signal
    }

    /// Cells drawn per half-cycle.
    pub fn hscale(&self) -> u32 {
        self.hscale
    }

    /// The requested skin name.
    pub fn skin(&self) -> &str {
        &self.skin
    }

    pub fn head(&self) -> Option<&Axis> {
        self.head.as_ref()
    }

    pub fn foot(&self) -> Option<&Axis> {
        self.foot.as_ref()
    }

    pub fn edges(&self) -> &[EdgeSpec] {
        &self.edges
    }
}

/// Caption and tick labels above (head) or below (foot) the lanes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Axis {
    text: Option<Caption>,
    tick: Option<TickSpec>,
    tock: Option<TickSpec>,
}

impl Axis {
    pub fn new(text: Option<Caption>, tick: Option<TickSpec>, tock: Option<TickSpec>) -> Self {
        Self { text, tick, tock }
    }

    pub fn text(&self) -> Option<&Caption> {
        self.text.as_ref()
    }

    /// Labels placed on cycle boundaries.
    pub fn tick(&self) -> Option<&TickSpec> {
        self.tick.as_ref()
    }

    /// Labels placed at cycle centres.
    pub fn tock(&self) -> Option<&TickSpec> {
        self.tock.as_ref()
    }

    /// Returns `true` when either tick row is present.
    pub fn has_ticks(&self) -> bool {
        self.tick.is_some() || self.tock.is_some()
    }
}

/// Head or foot caption text.
#[derive(Debug, Clone, PartialEq)]
pub enum Caption {
    Plain(String),
    /// Rich text already converted to `tspan` elements.
    Rich(Element),
}

/// How tick labels are generated.
#[derive(Debug, Clone, PartialEq)]
pub enum TickSpec {
    /// Consecutive integers starting at `offset`.
    Sequence { offset: i64 },
    /// `step * (i + offset)` printed with a fixed number of decimals.
    Stepped { offset: f64, step: f64, decimals: usize },
    /// Explicit labels; positions beyond the list stay empty.
    Literal(Vec<String>),
}

impl TickSpec {
    /// The label of tick `i`.
    ///
    /// ```
    /// # use wavelane_core::semantic::TickSpec;
    /// let spec = TickSpec::Stepped { offset: 1.0, step: 0.5, decimals: 1 };
    /// assert_eq!(spec.label(0).as_deref(), Some("0.5"));
    /// assert_eq!(spec.label(2).as_deref(), Some("1.5"));
    /// ```
    pub fn label(&self, i: usize) -> Option<String> {
        match self {
            TickSpec::Sequence { offset } => Some((i as i64 + offset).to_string()),
            TickSpec::Stepped {
                offset,
                step,
                decimals,
            } => {
                let value = step * i as f64 + step * offset;
                Some(format!("{value:.decimals$}"))
            }
            TickSpec::Literal(labels) => labels.get(i).cloned(),
        }
    }
}

/// Path geometry of an arc connector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArcPath {
    /// `-`
    Straight,
    /// `~`
    Curve,
    /// `-~`: leaves horizontally, arrives steep.
    CurveOut,
    /// `~-`: leaves steep, arrives horizontally.
    CurveIn,
    /// `-|`
    HorizontalVertical,
    /// `|-`
    VerticalHorizontal,
    /// `-|-`
    Step,
}

/// Arrow markers drawn on an arc connector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArcMarkers {
    None,
    /// Arrowhead at the target.
    End,
    /// Arrowheads at both ends.
    Both,
}

/// The connector shape named by an edge spec such as `-~>` or `<-|->`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ArcShape {
    path: ArcPath,
    markers: ArcMarkers,
}

impl ArcShape {
    pub fn new(path: ArcPath, markers: ArcMarkers) -> Self {
        Self { path, markers }
    }

    pub fn path(self) -> ArcPath {
        self.path
    }

    pub fn markers(self) -> ArcMarkers {
        self.markers
    }
}

impl Default for ArcShape {
    fn default() -> Self {
        Self::new(ArcPath::Straight, ArcMarkers::None)
    }
}

impl FromStr for ArcShape {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        use ArcMarkers as M;
        use ArcPath as P;

        let (path, markers) = match s {
            "-" => (P::Straight, M::None),
            "~" => (P::Curve, M::None),
            "-~" => (P::CurveOut, M::None),
            "~-" => (P::CurveIn, M::None),
            "-|" => (P::HorizontalVertical, M::None),
            "|-" => (P::VerticalHorizontal, M::None),
            "-|-" => (P::Step, M::None),
            "->" => (P::Straight, M::End),
            "~>" => (P::Curve, M::End),
            "-~>" => (P::CurveOut, M::End),
            "~->" => (P::CurveIn, M::End),
            "-|>" => (P::HorizontalVertical, M::End),
            "|->" => (P::VerticalHorizontal, M::End),
            "-|->" => (P::Step, M::End),
            "<->" => (P::Straight, M::Both),
            "<~>" => (P::Curve, M::Both),
            "<-~>" => (P::CurveOut, M::Both),
            "<-|>" => (P::HorizontalVertical, M::Both),
            "<-|->" => (P::Step, M::Both),
            _ => return Err("Unsupported arc shape"),
        };
        Ok(Self::new(path, markers))
    }
}

impl fmt::Display for ArcShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let body = match self.path {
            ArcPath::Straight => "-",
            ArcPath::Curve => "~",
            ArcPath::CurveOut => "-~",
            ArcPath::CurveIn => "~-",
            ArcPath::HorizontalVertical => "-|",
            ArcPath::VerticalHorizontal => "|-",
            ArcPath::Step => "-|-",
        };
        match self.markers {
            ArcMarkers::None => write!(f, "{body}"),
            ArcMarkers::End => write!(f, "{body}>"),
            ArcMarkers::Both => write!(f, "<{body}>"),
        }
    }
}

/// A connector between two named events.
#[derive(Debug, Clone, PartialEq)]
pub struct EdgeSpec {
    from: char,
    to: char,
    shape: ArcShape,
    label: Option<String>,
}

impl EdgeSpec {
    pub fn new(from: char, to: char, shape: ArcShape, label: Option<String>) -> Self {
        Self {
            from,
            to,
            shape,
            label,
        }
    }

    pub fn from(&self) -> char {
        self.from
    }

    pub fn to(&self) -> char {
        self.to
    }

    pub fn shape(&self) -> ArcShape {
        self.shape
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }
}
