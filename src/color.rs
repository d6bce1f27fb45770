use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

// ---------------------------------------------------------------------------
// Chart colours
// ---------------------------------------------------------------------------

const RED_HUE: f32 = 0.0;
const GREEN_HUE: f32 = 120.0;
const SKY_HUE: f32 = 197.0;

fn from_hsl(hue: f32, saturation: f32, lightness: f32) -> Color32 {
    let rgb: Srgb = Hsl::new(hue, saturation, lightness).into_color();
    Color32::from_rgb(
        (rgb.red * 255.0).round() as u8,
        (rgb.green * 255.0).round() as u8,
        (rgb.blue * 255.0).round() as u8,
    )
}

/// Line colour of the daily percentage series.
pub fn series_color() -> Color32 {
    from_hsl(SKY_HUE, 0.71, 0.73)
}

/// Bar colour for a metric difference: red when the metric is higher among
/// matching posts, green otherwise.
pub fn difference_color(value: f64) -> Color32 {
    if value > 0.0 {
        from_hsl(RED_HUE, 0.75, 0.55)
    } else {
        from_hsl(GREEN_HUE, 0.6, 0.45)
    }
}
