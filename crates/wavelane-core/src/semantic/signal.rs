//! The signal tree: lanes, groups and spacer rows.

/// One entry of the signal tree.
#[derive(Debug, Clone, PartialEq)]
pub enum SignalNode {
    /// A drawn waveform row.
    Lane(Lane),
    /// A nested, optionally named, group of entries.
    Group(Group),
    /// An empty row that only occupies vertical space.
    Spacer,
}

/// An ordered group of signal entries.
///
/// The root of a diagram is also a `Group`; it is laid out like any other
/// group but never draws a bracket.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Group {
    name: Option<String>,
    children: Vec<SignalNode>,
}

impl Group {
    /// Creates a group from its display name and children.
    pub fn new(name: Option<String>, children: Vec<SignalNode>) -> Self {
        Self { name, children }
    }

    /// The group's display name, if any.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// The group's children in order.
    pub fn children(&self) -> &[SignalNode] {
        &self.children
    }

    /// Returns `true` when no lane exists anywhere below this group.
    pub fn has_no_lanes(&self) -> bool {
        self.children.iter().all(|child| match child {
            SignalNode::Lane(_) => false,
            SignalNode::Group(group) => group.has_no_lanes(),
            SignalNode::Spacer => true,
        })
    }
}

/// Longest accepted lane period, in cycles.
pub const MAX_PERIOD: f64 = 100.0;

/// A single waveform lane.
///
/// # Examples
///
/// ```
/// # use wavelane_core::semantic::Lane;
/// let lane = Lane::new("clk", "p.....")
///     .with_period(2.0)
///     .with_node(".a..b.");
///
/// assert_eq!(lane.name(), "clk");
/// assert_eq!(lane.period(), 2.0);
/// assert_eq!(lane.phase(), 0.0);
/// assert_eq!(lane.node(), Some(".a..b."));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Lane {
    name: String,
    wave: String,
    period: f64,
    phase: f64,
    data: Vec<String>,
    node: Option<String>,
    label: Option<LaneLabel>,
}

impl Lane {
    /// Creates a lane with period 1, phase 0 and no annotations.
    pub fn new(name: impl Into<String>, wave: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            wave: wave.into(),
            period: 1.0,
            phase: 0.0,
            data: Vec::new(),
            node: None,
            label: None,
        }
    }

    /// Sets the cycle length multiplier, capped at [`MAX_PERIOD`].
    pub fn with_period(mut self, period: f64) -> Self {
        self.period = period.min(MAX_PERIOD);
        self
    }

    pub fn with_phase(mut self, phase: f64) -> Self {
        self.phase = phase;
        self
    }

    pub fn with_data(mut self, data: Vec<String>) -> Self {
        self.data = data;
        self
    }

    pub fn with_node(mut self, node: impl Into<String>) -> Self {
        self.node = Some(node.into());
        self
    }

    pub fn with_label(mut self, label: LaneLabel) -> Self {
        self.label = Some(label);
        self
    }

    /// The lane title, possibly empty.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The raw wave notation.
    pub fn wave(&self) -> &str {
        &self.wave
    }

    /// Cycle length multiplier.
    pub fn period(&self) -> f64 {
        self.period
    }

    /// Phase shift in cycles; positive values shift the wave left.
    pub fn phase(&self) -> f64 {
        self.phase
    }

    /// Labels placed on the lane's bus-value runs.
    pub fn data(&self) -> &[String] {
        &self.data
    }

    /// The node marker string naming arc events.
    pub fn node(&self) -> Option<&str> {
        self.node.as_deref()
    }

    /// Inline labels drawn over the lane.
    pub fn label(&self) -> Option<&LaneLabel> {
        self.label.as_ref()
    }
}

/// Inline labels of a lane, one token per cycle.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LaneLabel {
    tokens: Vec<LabelToken>,
}

impl LaneLabel {
    pub fn new(tokens: Vec<LabelToken>) -> Self {
        Self { tokens }
    }

    pub fn tokens(&self) -> &[LabelToken] {
        &self.tokens
    }
}

/// A token of a lane label string.
#[derive(Debug, Clone, PartialEq)]
pub enum LabelToken {
    /// `.`: advance one cycle without drawing.
    Skip,
    /// A label drawn at the current cycle plus `offset` cycles.
    Text { text: String, offset: f64 },
}
