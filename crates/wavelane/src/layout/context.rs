//! Per-render geometry shared by all renderers.

use wavelane_core::{semantic::Diagram, semantic::Lane, skin::CellMetrics};

/// Vertical pitch between lane rows.
const ROW_PITCH: f64 = 30.0;
/// Top offset of the first row inside the lanes group.
const FIRST_ROW_Y: f64 = 5.0;
/// x of the right-aligned lane titles, relative to the lanes group.
const TITLE_X: f64 = -10.0;
/// Extra space taken by a tick/tock label row.
const TICK_GAP: f64 = 20.0;
/// Extra space taken by a caption.
const CAPTION_GAP: f64 = 46.0;

/// Layout state for one render call.
///
/// The renderers read cell metrics and caption gaps from here, and
/// [`LayoutContext::enter_lane`] switches the per-lane `period` and `phase`
/// before a lane is processed.
#[derive(Debug, Clone)]
pub struct LayoutContext {
    xs: f64,
    ys: f64,
    yo: f64,
    y0: f64,
    tgo: f64,
    ym: f64,
    xlabel: f64,
    hscale: f64,
    yh0: f64,
    yh1: f64,
    yf0: f64,
    yf1: f64,
    xmax: usize,
    period: f64,
    phase: f64,
}

impl LayoutContext {
    /// Creates the context for rendering `diagram` with the given cell metrics.
    pub fn new(metrics: CellMetrics, diagram: &Diagram) -> Self {
        let head = diagram.head();
        let foot = diagram.foot();

        let gap = |present: bool, size: f64| if present { size } else { 0.0 };

        Self {
            xs: metrics.xs(),
            ys: metrics.ys(),
            yo: ROW_PITCH,
            y0: FIRST_ROW_Y,
            tgo: TITLE_X,
            ym: metrics.ym(),
            xlabel: metrics.xlabel(),
            hscale: f64::from(diagram.hscale()),
            yh0: gap(head.is_some_and(|axis| axis.has_ticks()), TICK_GAP),
            yh1: gap(head.is_some_and(|axis| axis.text().is_some()), CAPTION_GAP),
            yf0: gap(foot.is_some_and(|axis| axis.has_ticks()), TICK_GAP),
            yf1: gap(foot.is_some_and(|axis| axis.text().is_some()), CAPTION_GAP),
            xmax: 0,
            period: 1.0,
            phase: 0.0,
        }
    }

    /// Switches the per-lane timing to `lane`; spacer rows (`None`) use the
    /// defaults.
    pub fn enter_lane(&mut self, lane: Option<&Lane>) {
        (self.period, self.phase) = lane.map_or((1.0, 0.0), |lane| (lane.period(), lane.phase()));
    }

    pub fn xs(&self) -> f64 {
        self.xs
    }

    pub fn ys(&self) -> f64 {
        self.ys
    }

    pub fn yo(&self) -> f64 {
        self.yo
    }

    pub fn y0(&self) -> f64 {
        self.y0
    }

    pub fn tgo(&self) -> f64 {
        self.tgo
    }

    pub fn ym(&self) -> f64 {
        self.ym
    }

    pub fn xlabel(&self) -> f64 {
        self.xlabel
    }

    pub fn hscale(&self) -> f64 {
        self.hscale
    }

    pub fn period(&self) -> f64 {
        self.period
    }

    pub fn phase(&self) -> f64 {
        self.phase
    }

    /// Head gap taken by tick labels.
    pub fn yh0(&self) -> f64 {
        self.yh0
    }

    /// Head gap taken by the caption.
    pub fn yh1(&self) -> f64 {
        self.yh1
    }

    /// Foot gap taken by tick labels.
    pub fn yf0(&self) -> f64 {
        self.yf0
    }

    /// Foot gap taken by the caption.
    pub fn yf1(&self) -> f64 {
        self.yf1
    }

    /// Total height of the head area above the first row.
    pub fn head_height(&self) -> f64 {
        self.yh0 + self.yh1
    }

    /// Length of the longest compiled lane, in bricks.
    pub fn xmax(&self) -> usize {
        self.xmax
    }

    pub fn set_xmax(&mut self, xmax: usize) {
        self.xmax = xmax;
    }

    /// Stretch applied to the current lane's bricks.
    pub fn stretch(&self) -> f64 {
        self.period * self.hscale - 1.0
    }

    /// Top of `row` inside the lanes group.
    pub fn row_y(&self, row: usize) -> f64 {
        self.y0 + row as f64 * self.yo
    }

    /// Integer x of cycle position `pos` on the current lane.
    ///
    /// ```
    /// # use wavelane::layout::LayoutContext;
    /// # use wavelane_core::{semantic::{Diagram, Group}, skin::Skin};
    /// let diagram = Diagram::new(Group::default());
    /// let context = LayoutContext::new(Skin::default_skin().metrics(), &diagram);
    /// assert_eq!(context.cycle_x(1.0), 46.0);
    /// ```
    pub fn cycle_x(&self, pos: f64) -> f64 {
        (self.xs * (2.0 * pos * self.period * self.hscale - 2.0 * self.phase) + self.xlabel).trunc()
    }
}
