//! Two independent tick accumulators (logic and render)

/// Ticks due after feeding elapsed time into the clock
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ClockTicks {
    pub logic: u32,
    pub render: bool,
}

#[derive(Debug, Clone)]
pub struct DualClock {
    logic_period_ms: f32,
    render_period_ms: f32,
    max_substeps: u32,
    logic_acc: f32,
    render_acc: f32,
}

impl DualClock {
    pub fn new(logic_period_ms: f32, render_period_ms: f32, max_substeps: u32) -> Self {
        Self {
            logic_period_ms: logic_period_ms.max(f32::EPSILON),
            render_period_ms: render_period_ms.max(f32::EPSILON),
            max_substeps: max_substeps.max(1),
            logic_acc: 0.0,
            render_acc: 0.0,
        }
    }

    pub fn logic_period_ms(&self) -> f32 {
        self.logic_period_ms
    }

    pub fn render_period_ms(&self) -> f32 {
        self.render_period_ms
    }

    /// Feed `elapsed_ms` of wall time.
    ///
    /// At most `max_substeps` logic ticks and one render tick come due per
    /// call; any further backlog is dropped rather than replayed.
    pub fn advance(&mut self, elapsed_ms: f32) -> ClockTicks {
        if !elapsed_ms.is_finite() || elapsed_ms <= 0.0 {
            return ClockTicks::default();
        }

        self.logic_acc += elapsed_ms;
        let due = (self.logic_acc / self.logic_period_ms).floor();
        let logic = if due > self.max_substeps as f32 {
            self.logic_acc %= self.logic_period_ms;
            self.max_substeps
        } else {
            self.logic_acc -= due * self.logic_period_ms;
            due as u32
        };

        self.render_acc += elapsed_ms;
        let render = self.render_acc >= self.render_period_ms;
        if render {
            self.render_acc %= self.render_period_ms;
        }

        ClockTicks { logic, render }
    }

    pub fn reset(&mut self) {
        self.logic_acc = 0.0;
        self.render_acc = 0.0;
    }
}
