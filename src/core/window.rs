/// World window shared by the interactive view and the GIF export.
pub const VIEW_X_MIN: f64 = -0.05;
pub const VIEW_X_MAX: f64 = 0.05;
pub const VIEW_Y_MIN: f64 = 0.0;
pub const VIEW_Y_MAX: f64 = 2.2;

pub const TUBE_HALF_WIDTH_M: f64 = 0.02;
pub const HEIGHT_TICKS: usize = 5;

/// Plot width over plot height, taken from the 5x12 figure the readouts were designed on.
pub const PLOT_ASPECT: f64 = 5.0 / 12.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlotRect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl PlotRect {
    pub fn right(&self) -> f32 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }

    pub fn world_to_screen(&self, x: f64, y: f64) -> (f32, f32) {
        let tx = (x - VIEW_X_MIN) / (VIEW_X_MAX - VIEW_X_MIN);
        let ty = (y - VIEW_Y_MIN) / (VIEW_Y_MAX - VIEW_Y_MIN);
        (
            self.left + (tx as f32) * self.width,
            self.bottom() - (ty as f32) * self.height,
        )
    }

    /// Screen pixels per world metre along the height axis.
    pub fn px_per_m_y(&self) -> f32 {
        self.height / (VIEW_Y_MAX - VIEW_Y_MIN) as f32
    }
}

/// Largest rectangle with `PLOT_ASPECT` that fits the available area,
/// centred horizontally and anchored to the top.
pub fn fit_plot_rect(left: f32, top: f32, max_width: f32, max_height: f32) -> PlotRect {
    let aspect = PLOT_ASPECT as f32;
    let max_width = max_width.max(1.0);
    let max_height = max_height.max(1.0);

    let (width, height) = if max_width / max_height > aspect {
        (max_height * aspect, max_height)
    } else {
        (max_width, max_width / aspect)
    };

    PlotRect {
        left: left + (max_width - width) * 0.5,
        top,
        width,
        height,
    }
}

/// Evenly spaced tick values over `[0, tube_height]`.
pub fn height_ticks(tube_height_m: f64) -> Vec<f64> {
    let n = HEIGHT_TICKS.max(2);
    (0..n)
        .map(|i| tube_height_m * i as f64 / (n - 1) as f64)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f32, expected: f32, tolerance: f32) {
        assert!(
            (actual - expected).abs() <= tolerance,
            "actual={actual}, expected={expected}, tolerance={tolerance}"
        );
    }

    #[test]
    fn fit_keeps_aspect_in_wide_area() {
        let rect = fit_plot_rect(0.0, 10.0, 1000.0, 600.0);
        assert_close(rect.height, 600.0, 1e-3);
        assert_close(rect.width, 250.0, 1e-3);
        assert_close(rect.left, 375.0, 1e-3);
        assert_close(rect.top, 10.0, 0.0);
    }

    #[test]
    fn fit_keeps_aspect_in_narrow_area() {
        let rect = fit_plot_rect(0.0, 0.0, 100.0, 600.0);
        assert_close(rect.width, 100.0, 1e-3);
        assert_close(rect.height, 240.0, 1e-3);
    }

    #[test]
    fn maps_view_corners() {
        let rect = PlotRect {
            left: 10.0,
            top: 20.0,
            width: 100.0,
            height: 220.0,
        };
        let (x0, y0) = rect.world_to_screen(VIEW_X_MIN, VIEW_Y_MIN);
        assert_close(x0, 10.0, 1e-4);
        assert_close(y0, 240.0, 1e-4);
        let (xc, ytop) = rect.world_to_screen(0.0, 2.0);
        assert_close(xc, 60.0, 1e-4);
        assert_close(ytop, 40.0, 1e-3);
        assert_close(rect.px_per_m_y(), 100.0, 1e-4);
    }

    #[test]
    fn five_ticks_over_the_tube() {
        assert_eq!(height_ticks(2.0), vec![0.0, 0.5, 1.0, 1.5, 2.0]);
    }
}
