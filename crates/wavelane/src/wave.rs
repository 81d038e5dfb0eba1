//! Compilation of wave notation into bricks.
//!
//! Each character of a lane's `wave` string describes one clock cycle. The
//! compiler expands every cycle into half-cycle [`Brick`]s, taking the
//! previous symbol into account so that transitions join up:
//!
//! ```text
//!   "01.x"  ─►  000 000 | 0m1 111 111 111 | 1mx xxx
//! ```
//!
//! `.` and `|` repeat the preceding symbol, `<` and `>` open and close a
//! subcycle in which every symbol only lasts half a cycle.

use log::trace;

use wavelane_core::brick::{Brick, ClockEdge, DataIndex, Level};

/// The stretch value that halves every cycle.
const HALF_STRETCH: f64 = -0.5;

/// Largest stretch a lane can reach with capped period and hscale.
const MAX_STRETCH: f64 = 9_999.0;

/// A drawable symbol of the wave notation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Symbol {
    /// `0 1 x z d u`: soft transitions into a plain level.
    Level(Level),
    /// `= 2 3 4 5 6 7 8 9`: a bus value.
    Data(DataIndex),
    /// `p n P N`: a clock, toggling every half cycle.
    Clock(ClockEdge),
    /// `h l H L`: a level entered through a sharp edge.
    Sharp(ClockEdge),
}

impl Symbol {
    /// Classifies a notation character. Unknown characters draw as `x`.
    pub fn from_char(c: char) -> Self {
        match c {
            '0' => Symbol::Level(Level::Low),
            '1' => Symbol::Level(Level::High),
            'z' => Symbol::Level(Level::HighZ),
            'd' => Symbol::Level(Level::PullDown),
            'u' => Symbol::Level(Level::PullUp),
            '=' => Symbol::data(2),
            '2'..='9' => Symbol::data(c as u8 - b'0'),
            'p' => Symbol::Clock(ClockEdge::Rising),
            'n' => Symbol::Clock(ClockEdge::Falling),
            'P' => Symbol::Clock(ClockEdge::RisingMarked),
            'N' => Symbol::Clock(ClockEdge::FallingMarked),
            'h' => Symbol::Sharp(ClockEdge::Rising),
            'l' => Symbol::Sharp(ClockEdge::Falling),
            'H' => Symbol::Sharp(ClockEdge::RisingMarked),
            'L' => Symbol::Sharp(ClockEdge::FallingMarked),
            _ => Symbol::Level(Level::Unknown),
        }
    }

    fn data(index: u8) -> Self {
        DataIndex::new(index).map_or(Symbol::Level(Level::Unknown), Symbol::Data)
    }

    /// The level the symbol holds once its edge has passed.
    fn level(self) -> Level {
        match self {
            Symbol::Level(level) => level,
            Symbol::Data(_) => Level::Value,
            Symbol::Clock(edge) | Symbol::Sharp(edge) => edge.settles_at(),
        }
    }

    /// The level at the end of a cycle; a clock ends opposite to its edge.
    fn trailing_level(self) -> Level {
        match self {
            Symbol::Clock(ClockEdge::Rising | ClockEdge::RisingMarked) => Level::Low,
            Symbol::Clock(ClockEdge::Falling | ClockEdge::FallingMarked) => Level::High,
            other => other.level(),
        }
    }

    fn data_index(self) -> Option<DataIndex> {
        match self {
            Symbol::Data(data) => Some(data),
            _ => None,
        }
    }

    fn steady(self) -> Brick {
        Brick::Steady {
            level: self.level(),
            data: self.data_index(),
        }
    }

    fn is_clock(self) -> bool {
        matches!(self, Symbol::Clock(_))
    }
}

/// Adjacent symbols that already describe the same level draw no edge.
fn excluded(prev: Symbol, this: Symbol) -> Option<Brick> {
    use ClockEdge::*;

    match (prev, this) {
        (Symbol::Sharp(Rising | RisingMarked), Symbol::Clock(Rising))
        | (Symbol::Clock(Falling | FallingMarked), Symbol::Sharp(Rising)) => {
            Some(Brick::steady(Level::High))
        }
        (Symbol::Sharp(Falling | FallingMarked), Symbol::Clock(Falling))
        | (Symbol::Clock(Rising | RisingMarked), Symbol::Sharp(Falling)) => {
            Some(Brick::steady(Level::Low))
        }
        _ => None,
    }
}

fn clock_inverse(edge: ClockEdge) -> Brick {
    match edge {
        ClockEdge::Rising | ClockEdge::RisingMarked => Brick::Edge(ClockEdge::Falling),
        ClockEdge::Falling | ClockEdge::FallingMarked => Brick::Edge(ClockEdge::Rising),
    }
}

/// One scanned cycle event.
#[derive(Debug, Clone, Copy)]
struct Event {
    prev: Option<Symbol>,
    this: Symbol,
    repeat: usize,
    subcycle: bool,
}

impl Event {
    fn bricks(self, stretch: f64) -> Vec<Brick> {
        let Event {
            prev,
            this,
            repeat,
            subcycle,
        } = self;

        let mut wave = match this {
            Symbol::Clock(edge) => {
                let first = prev
                    .and_then(|prev| excluded(prev, this))
                    .unwrap_or(Brick::Edge(edge));
                [first, clock_inverse(edge)].repeat(1 + repeat)
            }
            Symbol::Sharp(edge) => {
                let first = match prev {
                    None => this.steady(),
                    Some(prev) => excluded(prev, this).unwrap_or(Brick::Edge(edge)),
                };
                let mut wave = vec![first];
                wave.extend(std::iter::repeat_n(this.steady(), 2 * repeat + 1));
                wave
            }
            Symbol::Level(_) | Symbol::Data(_) => {
                let value = this.steady();
                let transition = match prev {
                    None => value,
                    Some(prev) => Brick::Transition {
                        from: prev.trailing_level(),
                        to: this.level(),
                        from_data: prev.data_index(),
                        to_data: this.data_index(),
                    },
                };
                let mut wave = vec![transition, value];
                wave.extend(std::iter::repeat_n(value, 2 * repeat));
                wave
            }
        };

        if subcycle {
            wave.truncate(repeat + 1);
        }

        if stretch == HALF_STRETCH {
            if !this.is_clock() {
                wave = wave.into_iter().step_by(2).collect();
            }
        } else {
            wave = stretch_bricks(wave, stretch);
        }

        wave
    }
}

/// Repeats every brick by the integer part of `stretch`, continuing it with
/// its steady form.
fn stretch_bricks(wave: Vec<Brick>, stretch: f64) -> Vec<Brick> {
    let extra = stretch.trunc();
    if extra.is_nan() || extra < 1.0 {
        return wave;
    }
    let extra = extra.min(MAX_STRETCH) as usize;

    let mut out = Vec::with_capacity(wave.len() * (1 + extra));
    for brick in wave {
        out.push(brick);
        out.extend(std::iter::repeat_n(brick.sustain(), extra));
    }
    out
}

fn is_repeat(c: char) -> bool {
    c == '.' || c == '|'
}

/// Splits a notation string into cycle events.
fn scan(wave: &str) -> Vec<Event> {
    let mut chars = wave.chars().peekable();
    let mut events = Vec::new();
    let mut this: Option<Symbol> = None;
    let mut subcycle = false;

    while let Some(c) = chars.next() {
        let mut prev = this;

        match c {
            '<' | '>' => {
                subcycle = c == '<';
                // The bracket repeats the current symbol only when a repeat
                // marker follows it; otherwise it just switches the mode.
                if chars.next_if(|&next| is_repeat(next)).is_none() {
                    continue;
                }
                prev = None;
            }
            _ => this = Some(Symbol::from_char(if c == '|' { 'x' } else { c })),
        }

        let mut repeat = 0;
        while chars.next_if(|&next| is_repeat(next)).is_some() {
            repeat += 1;
        }

        if let Some(symbol) = this {
            events.push(Event {
                prev,
                this: symbol,
                repeat,
                subcycle,
            });
        }
    }

    events
}

/// Compiles a lane's wave notation into its brick sequence.
///
/// `stretch` is `period * hscale - 1`: every brick is followed by that many
/// steady continuation bricks (`-0.5` halves non-clock cycles instead).
/// `phase` shifts the lane left by removing `ceil(2 * phase)` leading bricks.
///
/// # Examples
///
/// ```
/// # use wavelane::wave::compile_lane;
/// let names: Vec<String> = compile_lane("01", 0.0, 0.0)
///     .iter()
///     .map(ToString::to_string)
///     .collect();
/// assert_eq!(names, ["000", "000", "0m1", "111"]);
/// ```
pub fn compile_lane(wave: &str, stretch: f64, phase: f64) -> Vec<Brick> {
    let mut bricks: Vec<Brick> = scan(wave)
        .into_iter()
        .flat_map(|event| event.bricks(stretch))
        .collect();

    let trim = (2.0 * phase).ceil();
    if trim > 0.0 {
        let trim = (trim as usize).min(bricks.len());
        bricks.drain(..trim);
    }

    trace!(wave, bricks = bricks.len(); "Compiled lane");
    bricks
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn names(wave: &str, stretch: f64, phase: f64) -> Vec<String> {
        compile_lane(wave, stretch, phase)
            .iter()
            .map(ToString::to_string)
            .collect()
    }

    #[test]
    fn test_levels_and_repeats() {
        assert_eq!(
            names("0.1", 0.0, 0.0),
            ["000", "000", "000", "000", "0m1", "111"]
        );
        assert_eq!(names("x", 0.0, 0.0), ["xxx", "xxx"]);
    }

    #[test]
    fn test_clock_sequence() {
        assert_eq!(
            names("p.", 0.0, 0.0),
            ["pclk", "nclk", "pclk", "nclk"]
        );
        assert_eq!(names("N", 0.0, 0.0), ["Nclk", "pclk"]);
    }

    #[test]
    fn test_marked_clock_sequence() {
        let expected = [
            "pclk", "nclk", "pclk", "nclk", "pclk", "nclk", "Pclk", "nclk", "pclk", "nclk",
            "pclk", "nclk", "pclk", "nclk", "Pclk", "nclk",
        ];
        assert_eq!(names("p..Pp..P", 0.0, 0.0), expected);
    }

    #[test]
    fn test_sharp_levels() {
        assert_eq!(names("hl", 0.0, 0.0), ["111", "111", "nclk", "000"]);
        assert_eq!(names("lH.", 0.0, 0.0), ["000", "000", "Pclk", "111", "111", "111"]);
    }

    #[test]
    fn test_excluded_edges() {
        // `h` then `p`: the clock starts high already
        assert_eq!(names("hp", 0.0, 0.0), ["111", "111", "111", "nclk"]);
        assert_eq!(names("pl", 0.0, 0.0), ["pclk", "nclk", "000", "000"]);
        assert_eq!(names("nh", 0.0, 0.0), ["nclk", "pclk", "111", "111"]);
        assert_eq!(names("ln", 0.0, 0.0), ["000", "000", "000", "pclk"]);
    }

    #[test]
    fn test_data_transitions() {
        assert_eq!(
            names("x=3", 0.0, 0.0),
            ["xxx", "xxx", "xmv-2", "vvv-2", "vmv-2-3", "vvv-3"]
        );
        assert_eq!(names("40", 0.0, 0.0), ["vvv-4", "vvv-4", "vm0-4", "000"]);
    }

    #[test]
    fn test_clock_trailing_level() {
        assert_eq!(names("p1", 0.0, 0.0), ["pclk", "nclk", "0m1", "111"]);
        assert_eq!(names("n0", 0.0, 0.0), ["nclk", "pclk", "1m0", "000"]);
    }

    #[test]
    fn test_unknown_and_gap_symbols() {
        assert_eq!(names("?", 0.0, 0.0), ["xxx", "xxx"]);
        assert_eq!(names("|", 0.0, 0.0), ["xxx", "xxx"]);
        assert_eq!(names("1|", 0.0, 0.0), ["111", "111", "111", "111"]);
    }

    #[test]
    fn test_stretch() {
        assert_eq!(
            names("01", 1.0, 0.0),
            ["000", "000", "000", "000", "0m1", "111", "111", "111"]
        );
        assert_eq!(names("p", 1.0, 0.0), ["pclk", "111", "nclk", "000"]);
        // fractional stretch only uses its integer part
        assert_eq!(names("1", 0.5, 0.0), ["111", "111"]);
    }

    #[test]
    fn test_stretch_is_bounded() {
        let expected = 2 * (1 + MAX_STRETCH as usize);
        assert_eq!(compile_lane("1", 1e30, 0.0).len(), expected);
        assert_eq!(compile_lane("1", f64::INFINITY, 0.0).len(), expected);
        assert_eq!(compile_lane("1", f64::NAN, 0.0).len(), 2);
    }

    #[test]
    fn test_half_stretch() {
        assert_eq!(names("01", HALF_STRETCH, 0.0), ["000", "0m1"]);
        assert_eq!(names("p", HALF_STRETCH, 0.0), ["pclk", "nclk"]);
    }

    #[test]
    fn test_subcycle() {
        assert_eq!(
            names("0<1.0>1", 0.0, 0.0),
            ["000", "000", "0m1", "111", "1m0", "0m1", "111"]
        );
        // `>.` re-emits the current symbol as a first symbol
        assert_eq!(names("0<1>.", 0.0, 0.0), ["000", "000", "0m1", "111", "111"]);
    }

    #[test]
    fn test_bracket_without_symbol() {
        assert_eq!(names("<.", 0.0, 0.0), Vec::<String>::new());
        assert_eq!(names("1<", 0.0, 0.0), ["111", "111"]);
    }

    #[test]
    fn test_phase() {
        assert_eq!(names("01", 0.0, 0.5), ["000", "0m1", "111"]);
        assert_eq!(names("01", 0.0, 0.25), ["000", "0m1", "111"]);
        assert_eq!(names("01", 0.0, 10.0), Vec::<String>::new());
        assert_eq!(names("01", 0.0, -1.0).len(), 4);
    }

    #[test]
    fn test_empty() {
        assert!(compile_lane("", 0.0, 0.0).is_empty());
    }

    fn symbol_char() -> impl Strategy<Value = char> {
        prop::sample::select(vec![
            '0', '1', 'x', 'z', 'd', 'u', '=', '2', '3', '4', '5', '6', '7', '8', '9', 'p', 'n',
            'P', 'N', 'h', 'l', 'H', 'L',
        ])
    }

    fn cycles() -> impl Strategy<Value = Vec<(char, usize)>> {
        prop::collection::vec((symbol_char(), 0usize..4), 0..12)
    }

    fn notation(cycles: &[(char, usize)]) -> String {
        cycles
            .iter()
            .map(|&(c, repeat)| format!("{c}{}", ".".repeat(repeat)))
            .collect()
    }

    proptest! {
        #[test]
        fn brick_count_ignores_symbols(cycles in cycles(), stretch in 0usize..4) {
            let wave = notation(&cycles);
            let expected: usize = cycles
                .iter()
                .map(|&(_, repeat)| 2 * (1 + repeat) * (1 + stretch))
                .sum();
            prop_assert_eq!(compile_lane(&wave, stretch as f64, 0.0).len(), expected);
        }

        #[test]
        fn phase_trims_leading_bricks(cycles in cycles(), phase in 0.0f64..8.0) {
            let wave = notation(&cycles);
            let full = compile_lane(&wave, 0.0, 0.0);
            let trimmed = compile_lane(&wave, 0.0, phase);
            let trim = (2.0 * phase).ceil() as usize;
            prop_assert_eq!(trimmed.len(), full.len().saturating_sub(trim));
            prop_assert_eq!(&trimmed[..], &full[trim.min(full.len())..]);
        }
    }
}
