//! ASCII plotting for terminal output.
//!
//! This is intentionally "dumb" (fixed-size grid), optimized for:
//! - quick visual sanity checks in a terminal
//! - deterministic output (helpful for golden tests)
//!
//! Plot elements:
//! - recorded sales: `o`
//! - fitted trend (including any forecast horizon): `-` line
//!
//! The x axis is the fractional-year encoding used by the trend fit.

use crate::domain::Period;

/// Render recorded sales and a trend curve.
///
/// `curve` is usually the output of `ForecastEngine::forecast`.
pub fn render_sales_plot(
    points: &[(Period, f64)],
    curve: &[(Period, f64)],
    width: usize,
    height: usize,
) -> String {
    let width = width.max(10);
    let height = height.max(5);

    let Some((p_min, p_max)) = period_range(points, curve) else {
        return "Plot: no data\n".to_string();
    };
    let (t_min, t_max) = x_range(p_min, p_max);

    let (y_min, y_max) = y_range(points, curve).unwrap_or((0.0, 1.0));
    let (y_min, y_max) = pad_range(y_min, y_max, 0.05);

    let mut grid = vec![vec![' '; width]; height];

    // Draw curve first (so points can overlay).
    draw_curve(&mut grid, curve, t_min, t_max, y_min, y_max);

    for &(period, value) in points {
        let x = map_x(period.fractional_year(), t_min, t_max, width);
        let y = map_y(value, y_min, y_max, height);
        grid[y][x] = 'o';
    }

    let mut out = String::new();
    out.push_str(&format!(
        "Plot: period=[{p_min}, {p_max}] | sales=[{y_min:.2}, {y_max:.2}]\n"
    ));

    for row in grid {
        out.push_str(&row.into_iter().collect::<String>());
        out.push('\n');
    }

    out
}

fn period_range(points: &[(Period, f64)], curve: &[(Period, f64)]) -> Option<(Period, Period)> {
    let periods = points.iter().chain(curve).map(|&(p, _)| p);
    let min = periods.clone().min()?;
    let max = periods.max()?;
    Some((min, max))
}

fn x_range(p_min: Period, p_max: Period) -> (f64, f64) {
    let t_min = p_min.fractional_year();
    let t_max = p_max.fractional_year();
    if t_max > t_min {
        (t_min, t_max)
    } else {
        // One month only: give it a visible width of one month either side.
        (t_min - 1.0 / 12.0, t_max + 1.0 / 12.0)
    }
}

fn y_range(points: &[(Period, f64)], curve: &[(Period, f64)]) -> Option<(f64, f64)> {
    let mut min_y = f64::INFINITY;
    let mut max_y = f64::NEG_INFINITY;

    for &(_, y) in points.iter().chain(curve) {
        min_y = min_y.min(y);
        max_y = max_y.max(y);
    }

    if min_y.is_finite() && max_y.is_finite() && max_y > min_y {
        Some((min_y, max_y))
    } else if min_y.is_finite() && max_y.is_finite() {
        Some((min_y - 1.0, max_y + 1.0))
    } else {
        None
    }
}

fn pad_range(min: f64, max: f64, frac: f64) -> (f64, f64) {
    let span = (max - min).abs();
    let pad = (span * frac).max(1e-12);
    (min - pad, max + pad)
}

fn map_x(t: f64, t_min: f64, t_max: f64, width: usize) -> usize {
    let width = width.max(2);
    let u = ((t - t_min) / (t_max - t_min)).clamp(0.0, 1.0);
    (u * (width as f64 - 1.0)).round() as usize
}

fn map_y(y: f64, y_min: f64, y_max: f64, height: usize) -> usize {
    let height = height.max(2);
    let u = ((y - y_min) / (y_max - y_min)).clamp(0.0, 1.0);
    // y=top is max -> row 0
    (height as f64 - 1.0 - (u * (height as f64 - 1.0))).round() as usize
}

fn draw_curve(grid: &mut [Vec<char>], curve: &[(Period, f64)], t_min: f64, t_max: f64, y_min: f64, y_max: f64) {
    let height = grid.len();
    let width = grid[0].len();

    let mut prev = None;
    for &(period, y) in curve {
        let x = map_x(period.fractional_year(), t_min, t_max, width);
        let yy = map_y(y, y_min, y_max, height);
        match prev {
            Some((x0, y0)) => draw_line(grid, x0, y0, x, yy, '-'),
            None => grid[yy][x] = '-',
        }
        prev = Some((x, yy));
    }
}

/// Integer line drawing (Bresenham-ish).
fn draw_line(grid: &mut [Vec<char>], x0: usize, y0: usize, x1: usize, y1: usize, ch: char) {
    let mut x0 = x0 as isize;
    let mut y0 = y0 as isize;
    let x1 = x1 as isize;
    let y1 = y1 as isize;

    let dx = (x1 - x0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let dy = -(y1 - y0).abs();
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        if y0 >= 0
            && (y0 as usize) < grid.len()
            && x0 >= 0
            && (x0 as usize) < grid[0].len()
            && grid[y0 as usize][x0 as usize] == ' '
        {
            grid[y0 as usize][x0 as usize] = ch;
        }

        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(year: i32, month: u32) -> Period {
        Period::new(year, month).unwrap()
    }

    #[test]
    fn plot_golden_snapshot_small() {
        let points = vec![(p(2023, 1), 100.0), (p(2023, 10), 110.0)];
        let curve = vec![(p(2023, 1), 100.0), (p(2023, 10), 100.0)];

        let txt = render_sales_plot(&points, &curve, 10, 5);
        let expected = concat!(
            "Plot: period=[2023-01, 2023-10] | sales=[99.50, 110.50]\n",
            "         o\n",
            "          \n",
            "          \n",
            "          \n",
            "o---------\n",
        );
        assert_eq!(txt, expected);
    }

    #[test]
    fn empty_plot() {
        assert_eq!(render_sales_plot(&[], &[], 20, 10), "Plot: no data\n");
    }

    #[test]
    fn single_point_renders() {
        let txt = render_sales_plot(&[(p(2024, 2), 50.0)], &[], 12, 6);
        assert_eq!(txt.lines().count(), 7);
        assert!(txt.contains('o'));
    }
}
