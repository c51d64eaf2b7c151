use askama::Template;
use chrono::{DateTime, Local};
use thiserror::Error;

use crate::visibility::{Observation, SampleSeries, VisibilityWindow};

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("cannot chart an empty series")]
    EmptySeries,
    #[error("template error: {0}")]
    Template(#[from] askama::Error),
}

/// Chart dimensions and title.
#[derive(Debug, Clone)]
pub struct ChartConfig {
    pub width: u32,
    pub height: u32,
    pub title: String,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            width: 880,
            height: 480,
            title: "Satellite".to_string(),
        }
    }
}

const MARGIN_LEFT: f64 = 56.0;
const MARGIN_RIGHT: f64 = 190.0;
const MARGIN_TOP: f64 = 44.0;
const MARGIN_BOTTOM: f64 = 52.0;

#[derive(Template)]
#[template(path = "chart.svg", escape = "html")]
struct ChartTemplate<'a> {
    width: u32,
    height: u32,
    title: &'a str,
    title_x: f64,
    plot_x: f64,
    plot_y: f64,
    plot_w: f64,
    plot_h: f64,
    plot_right: f64,
    plot_bottom: f64,
    horizon_y: f64,
    y_label_y: f64,
    label_x: f64,
    elevation_points: String,
    visible_regions: Vec<String>,
    sunlit_regions: Vec<String>,
    x_ticks: Vec<Tick>,
    y_ticks: Vec<Tick>,
    pass_labels: Vec<Tick>,
}

struct Tick {
    pos: f64,
    label: String,
}

struct PlotArea {
    x0: f64,
    y0: f64,
    w: f64,
    h: f64,
    t0: i64,
    t_span: f64,
    e_max: f64,
    e_span: f64,
}

impl PlotArea {
    fn from_series(series: &SampleSeries, width: u32, height: u32) -> Self {
        let t0 = series.instants[0].timestamp();
        let t_span = (series.instants[series.len() - 1].timestamp() - t0).max(1) as f64;

        let mut e_min: f64 = 0.0;
        let mut e_max: f64 = 0.0;
        for o in &series.observations {
            e_min = e_min.min(o.elevation_deg);
            e_max = e_max.max(o.elevation_deg);
        }
        let pad = (0.05 * (e_max - e_min)).max(1.0);
        e_min -= pad;
        e_max += pad;

        Self {
            x0: MARGIN_LEFT,
            y0: MARGIN_TOP,
            w: width as f64 - MARGIN_LEFT - MARGIN_RIGHT,
            h: height as f64 - MARGIN_TOP - MARGIN_BOTTOM,
            t0,
            t_span,
            e_max,
            e_span: e_max - e_min,
        }
    }

    fn x(&self, instant: DateTime<Local>) -> f64 {
        self.x0 + (instant.timestamp() - self.t0) as f64 / self.t_span * self.w
    }

    fn y(&self, elevation_deg: f64) -> f64 {
        self.y0 + (self.e_max - elevation_deg) / self.e_span * self.h
    }
}

/// Render the elevation-over-time chart with the visible passes annotated.
///
/// Shaded regions mark where the satellite is sunlit, split at the horizon:
/// above it the pass is visible, below it the satellite is lit but out of
/// sight. Pass windows are listed as `HH:MM - HH:MM` labels beside the plot.
pub fn render_svg(
    series: &SampleSeries,
    windows: &[VisibilityWindow],
    config: &ChartConfig,
) -> Result<String, ChartError> {
    if series.is_empty() {
        return Err(ChartError::EmptySeries);
    }

    let area = PlotArea::from_series(series, config.width, config.height);

    let elevation_points = series
        .instants
        .iter()
        .zip(&series.observations)
        .map(|(t, o)| format!("{:.1},{:.1}", area.x(*t), area.y(o.elevation_deg)))
        .collect::<Vec<_>>()
        .join(" ");

    let visible_regions = region_polygons(&area, series, |o| o.sunlit && o.elevation_deg > 0.0);
    let sunlit_regions = region_polygons(&area, series, |o| o.sunlit && o.elevation_deg <= 0.0);

    let x_ticks = hour_ticks(&area, series);
    let y_ticks = elevation_ticks(&area);

    let label_x = area.x0 + area.w + 16.0;
    let pass_labels = windows
        .iter()
        .enumerate()
        .map(|(i, w)| Tick {
            pos: area.y0 + 92.0 + 18.0 * i as f64,
            label: format!("{} - {}", w.start.format("%H:%M"), w.end.format("%H:%M")),
        })
        .collect();

    let template = ChartTemplate {
        width: config.width,
        height: config.height,
        title: &config.title,
        title_x: area.x0 + area.w / 2.0,
        plot_x: area.x0,
        plot_y: area.y0,
        plot_w: area.w,
        plot_h: area.h,
        plot_right: area.x0 + area.w,
        plot_bottom: area.y0 + area.h,
        horizon_y: area.y(0.0),
        y_label_y: area.y0 + area.h / 2.0,
        label_x,
        elevation_points,
        visible_regions,
        sunlit_regions,
        x_ticks,
        y_ticks,
        pass_labels,
    };
    Ok(template.render()?)
}

/// Polygons between the elevation curve and the horizon line, one per
/// contiguous run of samples matching `predicate`.
fn region_polygons(
    area: &PlotArea,
    series: &SampleSeries,
    predicate: impl Fn(&Observation) -> bool,
) -> Vec<String> {
    let mut polygons = Vec::new();
    let mut run: Vec<usize> = Vec::new();

    for i in 0..=series.len() {
        if i < series.len() && predicate(&series.observations[i]) {
            run.push(i);
            continue;
        }
        if run.len() >= 2 {
            let mut points = Vec::with_capacity(run.len() * 2);
            for &j in &run {
                points.push(format!(
                    "{:.1},{:.1}",
                    area.x(series.instants[j]),
                    area.y(series.observations[j].elevation_deg)
                ));
            }
            for &j in run.iter().rev() {
                points.push(format!("{:.1},{:.1}", area.x(series.instants[j]), area.y(0.0)));
            }
            polygons.push(points.join(" "));
        }
        run.clear();
    }
    polygons
}

fn hour_ticks(area: &PlotArea, series: &SampleSeries) -> Vec<Tick> {
    let step = (series.len() / 7).max(1);
    series
        .instants
        .iter()
        .step_by(step)
        .map(|t| Tick {
            pos: area.x(*t),
            label: t.format("%H:%M").to_string(),
        })
        .collect()
}

fn elevation_ticks(area: &PlotArea) -> Vec<Tick> {
    (0..=4)
        .map(|k| {
            let elevation = area.e_max - area.e_span * k as f64 / 4.0;
            Tick {
                pos: area.y(elevation),
                label: format!("{elevation:.0}"),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::visibility::visible_windows;
    use chrono::{Duration, TimeZone, Utc};

    fn sample_series() -> SampleSeries {
        let base = Utc.timestamp_opt(1_700_000_040, 0).unwrap().with_timezone(&Local);
        let elevations = [-5.0, 2.0, 10.0, 4.0, -3.0, -8.0];
        let instants = (0..elevations.len())
            .map(|i| base + Duration::minutes(i as i64))
            .collect();
        let observations = elevations
            .iter()
            .map(|&elevation_deg| Observation {
                elevation_deg,
                azimuth_deg: 120.0,
                range_km: 900.0,
                sunlit: true,
            })
            .collect();
        SampleSeries::new(instants, observations)
    }

    #[test]
    fn renders_curve_regions_and_pass_labels() {
        let series = sample_series();
        let windows = visible_windows(&series, 0.0).unwrap();
        assert_eq!(windows.len(), 1);

        let svg = render_svg(&series, &windows, &ChartConfig::default()).unwrap();
        assert!(svg.starts_with("<svg"));
        assert!(svg.contains("<polyline"));
        // One visible region (samples 1..=3) plus one sunlit-below region
        // (sample 0 alone is too short a run, 4..=5 forms one polygon).
        assert_eq!(svg.matches("<polygon").count(), 2);
        let expected = format!(
            "{} - {}",
            windows[0].start.format("%H:%M"),
            windows[0].end.format("%H:%M")
        );
        assert!(svg.contains(&expected));
    }

    #[test]
    fn empty_series_is_rejected() {
        let series = SampleSeries::default();
        assert!(matches!(
            render_svg(&series, &[], &ChartConfig::default()),
            Err(ChartError::EmptySeries)
        ));
    }

    #[test]
    fn curve_stays_inside_the_plot_area() {
        let series = sample_series();
        let area = PlotArea::from_series(&series, 880, 480);
        for (t, o) in series.instants.iter().zip(&series.observations) {
            let x = area.x(*t);
            let y = area.y(o.elevation_deg);
            assert!(x >= area.x0 && x <= area.x0 + area.w);
            assert!(y >= area.y0 && y <= area.y0 + area.h);
        }
    }

    #[test]
    fn region_runs_split_on_predicate_edges() {
        let series = sample_series();
        let area = PlotArea::from_series(&series, 880, 480);
        let above = region_polygons(&area, &series, |o| o.elevation_deg > 0.0);
        assert_eq!(above.len(), 1);
        let below = region_polygons(&area, &series, |o| o.elevation_deg <= 0.0);
        // Leading single-sample run is dropped, trailing pair survives.
        assert_eq!(below.len(), 1);
    }
}
