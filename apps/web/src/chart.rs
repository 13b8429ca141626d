//! SVG geometry of the round chart.

/// Chart canvas in SVG user units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Canvas {
    pub width: f64,
    pub height: f64,
    /// Number of ticks spanning the x axis.
    pub ticks: usize,
    /// Wattage at the top edge.
    pub ceiling: f64,
}

impl Canvas {
    pub const DEFAULT: Self = Self { width: 600.0, height: 240.0, ticks: 30, ceiling: 160.0 };

    /// `viewBox` attribute for this canvas.
    #[must_use]
    pub fn view_box(&self) -> String {
        format!("0 0 {} {}", self.width, self.height)
    }

    fn x(&self, index: usize) -> f64 {
        let span = self.ticks.saturating_sub(1).max(1) as f64;
        index as f64 * self.width / span
    }

    fn y(&self, watts: f64) -> f64 {
        let clamped = watts.clamp(0.0, self.ceiling);
        self.height - clamped * self.height / self.ceiling
    }

    /// `points` attribute of a polyline through `values`.
    #[must_use]
    pub fn polyline(&self, values: &[f64]) -> String {
        values
            .iter()
            .enumerate()
            .map(|(i, &v)| format!("{:.1},{:.1}", self.x(i), self.y(v)))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// `points` attribute of the polygon enclosing `target ± tolerance`.
    #[must_use]
    pub fn band(&self, target: &[f64], tolerance: &[f64]) -> String {
        let upper = target.iter().zip(tolerance).map(|(t, tol)| t + tol).enumerate();
        let lower: Vec<_> =
            target.iter().zip(tolerance).map(|(t, tol)| t - tol).enumerate().collect();

        upper
            .chain(lower.into_iter().rev())
            .map(|(i, v)| format!("{:.1},{:.1}", self.x(i), self.y(v)))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl Default for Canvas {
    fn default() -> Self {
        Self::DEFAULT
    }
}
