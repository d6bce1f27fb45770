use eframe::egui::{self, Grid, Label, ScrollArea, Ui};

use crate::data::aggregate::MetricMeans;
use crate::data::model::{ArticleDataset, Metric, Reaction};
use crate::state::AppState;

use super::plot;

/// Rows shown in the raw data preview.
const PREVIEW_ROWS: usize = 5;

// ---------------------------------------------------------------------------
// Mean metrics: with term / without term / difference
// ---------------------------------------------------------------------------

pub fn metrics_comparison(ui: &mut Ui, state: &AppState) {
    let Some(analysis) = &state.analysis else {
        return;
    };
    let term = &state.query.term;

    ui.heading("Average metrics compared");
    ui.columns(3, |cols| {
        cols[0].strong(format!("Articles with '{term}'"));
        means_column(
            &mut cols[0],
            "means_with",
            analysis.matching_count,
            analysis.means_with.as_ref(),
            "No matching articles found.",
        );

        cols[1].strong(format!("Articles without '{term}'"));
        means_column(
            &mut cols[1],
            "means_without",
            analysis.non_matching_count,
            analysis.means_without.as_ref(),
            "Every article contains the search term, or the period is empty.",
        );

        cols[2].strong("Difference (with − without)");
        match &analysis.difference {
            Some(diff) => plot::difference_chart(&mut cols[2], diff),
            None => super::info(
                &mut cols[2],
                "Enter a search term and a valid period to show the differences.",
            ),
        }
    });
}

fn means_column(ui: &mut Ui, id: &str, count: usize, means: Option<&MetricMeans>, empty: &str) {
    let Some(means) = means else {
        super::info(ui, empty);
        return;
    };
    ui.label(format!("Total hits: {count}"));
    Grid::new(id).striped(true).num_columns(2).show(ui, |ui: &mut Ui| {
        ui.strong("Metric");
        ui.strong("Mean");
        ui.end_row();
        for (metric, value) in means.iter() {
            ui.label(metric.column());
            ui.monospace(format!("{value:.2}"));
            ui.end_row();
        }
    });
}

// ---------------------------------------------------------------------------
// Top posts by reaction
// ---------------------------------------------------------------------------

pub fn top_posts(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Top posts by reaction (with search term)");

    let mut reaction = state.query.reaction;
    egui::ComboBox::from_label("Reaction")
        .selected_text(reaction.column())
        .show_ui(ui, |ui: &mut Ui| {
            for r in Reaction::ALL {
                ui.selectable_value(&mut reaction, r, r.column());
            }
        });
    state.set_reaction(reaction);

    let Some(posts) = state.analysis.as_ref().and_then(|a| a.top_posts.as_ref()) else {
        super::info(ui, "Enter a search term that matches articles to show the top posts.");
        return;
    };

    Grid::new("top_posts")
        .striped(true)
        .num_columns(3)
        .show(ui, |ui: &mut Ui| {
            ui.strong("#");
            ui.strong("text");
            ui.strong(reaction.column());
            ui.end_row();
            for (rank, post) in posts.iter().enumerate() {
                ui.label(format!("{}", rank + 1));
                ui.add(Label::new(&post.text).truncate());
                ui.monospace(post.value.to_string());
                ui.end_row();
            }
        });
}

// ---------------------------------------------------------------------------
// Raw data preview
// ---------------------------------------------------------------------------

pub fn data_preview(ui: &mut Ui, dataset: &ArticleDataset) {
    ui.heading("Original data (excerpt)");
    ScrollArea::horizontal().id_salt("preview_scroll").show(ui, |ui: &mut Ui| {
        Grid::new("data_preview")
            .striped(true)
            .num_columns(3 + Metric::COUNT)
            .show(ui, |ui: &mut Ui| {
                ui.strong("date");
                ui.strong("text");
                ui.strong("fulltext");
                for metric in Metric::ALL {
                    ui.strong(metric.column());
                }
                ui.end_row();

                for article in dataset.articles().iter().take(PREVIEW_ROWS) {
                    ui.label(article.date.to_string());
                    ui.add(Label::new(preview_text(article.text.as_deref())).truncate());
                    ui.add(Label::new(preview_text(article.fulltext.as_deref())).truncate());
                    for metric in Metric::ALL {
                        ui.monospace(article.metric(metric).to_string());
                    }
                    ui.end_row();
                }
            });
    });
}

fn preview_text(text: Option<&str>) -> String {
    match text {
        None => "<null>".to_string(),
        Some(t) if t.chars().count() > 80 => format!("{}…", t.chars().take(80).collect::<String>()),
        Some(t) => t.to_string(),
    }
}
