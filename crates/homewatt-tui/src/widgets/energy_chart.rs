//! The chart renderer.
//!
//! Holds exactly one series at a time; every refresh replaces it wholesale,
//! so stale series can never accumulate across re-renders. An empty or
//! missing series becomes a single placeholder point rather than an empty
//! chart.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::symbols;
use ratatui::text::Span;
use ratatui::widgets::{Axis, Block, BorderType, Borders, Chart, Dataset, GraphType};

use homewatt_core::EnergyReading;

use super::kwh_fmt;
use crate::theme;

/// The single live series behind the usage chart.
pub struct EnergySeries {
    /// `(index, kWh)` points, one per reading, oldest first.
    points: Vec<(f64, f64)>,
    /// Axis labels for the first and last point.
    first_label: String,
    last_label: String,
    /// True when the series is the "no data" placeholder point.
    placeholder: bool,
}

impl EnergySeries {
    /// The placeholder series: one zero point, labeled "No Data".
    pub fn placeholder() -> Self {
        Self {
            points: vec![(0.0, 0.0)],
            first_label: "No Data".into(),
            last_label: String::new(),
            placeholder: true,
        }
    }

    /// Build the series from the latest readings, replacing nothing --
    /// the caller assigns the result over its previous series.
    pub fn from_readings(readings: &[EnergyReading]) -> Self {
        if readings.is_empty() {
            return Self::placeholder();
        }
        let points = readings
            .iter()
            .enumerate()
            .map(|(i, r)| (i as f64, r.power_kwh))
            .collect();
        Self {
            points,
            first_label: kwh_fmt::fmt_clock(readings.first().and_then(|r| r.timestamp)),
            last_label: kwh_fmt::fmt_clock(readings.last().and_then(|r| r.timestamp)),
            placeholder: false,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        self.placeholder
    }

    pub fn point_count(&self) -> usize {
        self.points.len()
    }

    /// Render the chart into `area`.
    pub fn render(&self, frame: &mut Frame, area: Rect, title: &str) {
        let max_y = self
            .points
            .iter()
            .map(|&(_, y)| y)
            .fold(0.0_f64, f64::max)
            .max(0.1);
        let max_x = (self.points.len().saturating_sub(1)) as f64;

        let dataset = Dataset::default()
            .name("Energy (kWh)")
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(theme::SKY_BLUE))
            .data(&self.points);

        let x_axis = Axis::default()
            .style(theme::key_hint())
            .bounds([0.0, max_x.max(1.0)])
            .labels(vec![
                Span::styled(self.first_label.clone(), theme::key_hint()),
                Span::styled(self.last_label.clone(), theme::key_hint()),
            ]);

        let y_axis = Axis::default()
            .style(theme::key_hint())
            .bounds([0.0, max_y * 1.1])
            .labels(vec![
                Span::styled("0.00", theme::key_hint()),
                Span::styled(format!("{max_y:.2}"), theme::key_hint()),
            ]);

        let chart = Chart::new(vec![dataset])
            .block(
                Block::default()
                    .title(format!(" {title} "))
                    .title_style(theme::title_style())
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .border_style(theme::border_default()),
            )
            .x_axis(x_axis)
            .y_axis(y_axis);

        frame.render_widget(chart, area);
    }
}

impl Default for EnergySeries {
    fn default() -> Self {
        Self::placeholder()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use homewatt_core::ApplianceStatus;

    fn reading(power: f64) -> EnergyReading {
        EnergyReading {
            appliance: "Fridge".into(),
            power_kwh: power,
            status: ApplianceStatus::On,
            timestamp: None,
        }
    }

    #[test]
    fn empty_series_renders_a_single_placeholder_point() {
        let series = EnergySeries::from_readings(&[]);
        assert!(series.is_placeholder());
        assert_eq!(series.point_count(), 1);
        assert_eq!(series.first_label, "No Data");
    }

    #[test]
    fn series_is_replaced_wholesale() {
        let mut series = EnergySeries::from_readings(&[reading(1.0), reading(2.0)]);
        assert_eq!(series.point_count(), 2);

        // A refresh with fewer readings fully replaces the old points.
        series = EnergySeries::from_readings(&[reading(3.0)]);
        assert_eq!(series.point_count(), 1);
        assert!(!series.is_placeholder());

        // And an empty refresh falls back to the placeholder.
        series = EnergySeries::from_readings(&[]);
        assert!(series.is_placeholder());
    }
}
