use chrono::{Datelike, NaiveDate};
use eframe::egui::Ui;
use egui_plot::{Bar, BarChart, Line, Plot, PlotPoints, Points};

use crate::color::{difference_color, series_color};
use crate::data::aggregate::MetricMeans;
use crate::data::filter::MatchOutcome;
use crate::data::model::Metric;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Daily percentage line plot
// ---------------------------------------------------------------------------

fn day_number(date: NaiveDate) -> f64 {
    date.num_days_from_ce() as f64
}

/// Axis label for a day number; empty between whole days.
fn day_label(value: f64) -> String {
    if (value - value.round()).abs() > 1e-6 {
        return String::new();
    }
    NaiveDate::from_num_days_from_ce_opt(value.round() as i32)
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

/// Render the share of matching posts per day.
pub fn percentage_plot(ui: &mut Ui, state: &AppState) {
    let Some(analysis) = &state.analysis else {
        return;
    };
    let term = &state.query.term;

    match analysis.outcome {
        MatchOutcome::AwaitingInput => {
            super::info(ui, "Enter a search term to show the analysis.");
            return;
        }
        MatchOutcome::NoResults => {
            super::warning(
                ui,
                format!("No articles contain '{term}' in text or fulltext in the selected period."),
            );
            return;
        }
        MatchOutcome::Matches(_) => {}
    }
    let Some(daily) = &analysis.daily else {
        return;
    };

    ui.heading(format!("Share of articles containing '{term}' over time"));
    let matching: usize = daily.iter().map(|d| d.matching).sum();
    let total: usize = daily.iter().map(|d| d.total).sum();
    ui.label(format!("{matching} of {total} posts over {} days", daily.len()));

    let points: Vec<[f64; 2]> = daily
        .iter()
        .map(|d| [day_number(d.date), d.percentage])
        .collect();

    Plot::new("percentage_plot")
        .height(300.0)
        .x_axis_label("Date")
        .y_axis_label("Share of posts (%)")
        .x_axis_formatter(|mark, _range| day_label(mark.value))
        .label_formatter(|_name, value| format!("{}\n{:.1}%", day_label(value.x.round()), value.y))
        .include_y(0.0)
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.line(
                Line::new(PlotPoints::from(points.clone()))
                    .name("share")
                    .color(series_color())
                    .width(1.5),
            );
            plot_ui.points(
                Points::new(PlotPoints::from(points))
                    .radius(3.0)
                    .color(series_color()),
            );
        });
}

// ---------------------------------------------------------------------------
// Difference bar chart
// ---------------------------------------------------------------------------

/// Bars run top to bottom in `Metric::ALL` order.
fn bar_position(index: usize) -> f64 {
    (Metric::COUNT - 1 - index) as f64
}

fn metric_label(value: f64) -> String {
    let rounded = value.round();
    if (value - rounded).abs() > 1e-6 || rounded < 0.0 {
        return String::new();
    }
    (Metric::COUNT - 1)
        .checked_sub(rounded as usize)
        .and_then(|i| Metric::ALL.get(i))
        .map(|m| m.column().to_string())
        .unwrap_or_default()
}

/// Horizontal bars of `with - without` per metric, coloured by sign.
pub fn difference_chart(ui: &mut Ui, difference: &MetricMeans) {
    let bars: Vec<Bar> = difference
        .iter()
        .enumerate()
        .map(|(i, (metric, value))| {
            Bar::new(bar_position(i), value)
                .name(metric.column())
                .fill(difference_color(value))
        })
        .collect();

    Plot::new("difference_chart")
        .height(280.0)
        .x_axis_label("Difference")
        .y_axis_formatter(|mark, _range| metric_label(mark.value))
        .show_grid([true, false])
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).horizontal());
        });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn day_labels_round_trip() {
        let d = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
        assert_eq!(day_label(day_number(d)), "2024-03-09");
        assert_eq!(day_label(day_number(d) + 0.5), "");
    }

    #[test]
    fn metric_labels_follow_bar_positions() {
        for (i, m) in Metric::ALL.iter().enumerate() {
            assert_eq!(metric_label(bar_position(i)), m.column());
        }
        assert_eq!(metric_label(-1.0), "");
        assert_eq!(metric_label(9.0), "");
        assert_eq!(metric_label(2.5), "");
    }
}
