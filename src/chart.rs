//! Chart Rendering Module
//!
//! Draws the yearly figure: month-banded background, waking-hours band,
//! night shading, the six sunrise/sunset series, the today marker, legend
//! and caption box, then writes a single PNG. The styling knobs that varied
//! between the tool's revisions live in [`ChartConfig`]; the computation
//! never does.

use std::path::PathBuf;

use chrono::{Duration, NaiveDate};
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::series::DashedLineSeries;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use plotters::style::{FontDesc, FontFamily, FontStyle};

use crate::error::SolgrafError;
use crate::frames::TimeFrame;
use crate::location::Location;
use crate::output::Caption;
use crate::series::YearSeries;
use crate::time::format_clock;

// ===================== STYLE CONSTANTS =====================

const MONTH_BAND: RGBColor = RGBColor(242, 242, 242);
const SUNSET_GREEN: RGBColor = RGBColor(0, 128, 0);
const NIGHT_GRAY: RGBColor = RGBColor(128, 128, 128);
const WAKING_GOLD: RGBColor = RGBColor(255, 215, 0);
const LABEL_GRAY: RGBColor = RGBColor(85, 85, 85);
const CAPTION_BORDER: RGBColor = RGBColor(204, 204, 204);

/// The horizontal "waking hours" band, 07:00 to 22:00.
const WAKING_HOURS: (f64, f64) = (7.0, 22.0);

const MONTH_LABELS: [&str; 12] =
    ["Jan", "Feb", "Mar", "Apr", "Mai", "Jun", "Jul", "Aug", "Sep", "Okt", "Nov", "Des"];

// ===================== CONFIG =====================

/// Renderer options. Revision-to-revision styling differences (figure size,
/// title size, tick spacing) are options here, never forks of the pipeline.
#[derive(Clone, Debug)]
pub struct ChartConfig {
    pub output: PathBuf,
    pub width: u32,
    pub height: u32,
    pub title_size: f64,
    pub caption_size: f64,
    /// Hours between horizontal gridlines; must divide 24
    pub tick_hours: u32,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            output: PathBuf::from("solgraf.png"),
            width: 1200,
            height: 700,
            title_size: 28.0,
            caption_size: 17.0,
            tick_hours: 2,
        }
    }
}

// ===================== MONTH GEOMETRY =====================

struct MonthSpan {
    start: NaiveDate,
    end: NaiveDate,
    mid: NaiveDate,
    label: &'static str,
    shaded: bool,
}

/// Calendar geometry of the twelve background bands.
fn month_spans(year: i32) -> Vec<MonthSpan> {
    (1..=12u32)
        .map(|month| {
            let start = NaiveDate::from_ymd_opt(year, month, 1).unwrap();
            let end = if month == 12 {
                NaiveDate::from_ymd_opt(year + 1, 1, 1).unwrap()
            } else {
                NaiveDate::from_ymd_opt(year, month + 1, 1).unwrap()
            };
            let mid = start + Duration::days((end - start).num_days() / 2);
            MonthSpan {
                start,
                end,
                mid,
                label: MONTH_LABELS[(month - 1) as usize],
                shaded: month % 2 == 1,
            }
        })
        .collect()
}

// ===================== RENDERER =====================

/// Draw the figure and write it to `config.output`, overwriting any prior
/// file of that name.
pub fn render(
    series: &YearSeries,
    caption: &Caption,
    today: NaiveDate,
    location: &Location,
    year: i32,
    config: &ChartConfig,
) -> Result<(), SolgrafError> {
    let root =
        BitMapBackend::new(&config.output, (config.width, config.height)).into_drawing_area();
    draw_figure(&root, series, caption, today, location, year, config)
        .map_err(|e| SolgrafError::Chart(e.to_string()))
}

/// Backend-generic drawing, so the same code serves tests or another format
/// if one is ever needed.
fn draw_figure<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    series: &YearSeries,
    caption: &Caption,
    today: NaiveDate,
    location: &Location,
    year: i32,
    config: &ChartConfig,
) -> Result<(), Box<dyn std::error::Error>>
where
    DB::ErrorType: 'static,
{
    root.fill(&WHITE)?;

    // Reserve a band at the bottom for the caption box
    let caption_band = (config.caption_size * 3.0) as u32;
    let (plot_area, caption_area) =
        root.split_vertically((config.height.saturating_sub(caption_band)) as i32);

    let first = NaiveDate::from_ymd_opt(year, 1, 1).unwrap();
    let last = NaiveDate::from_ymd_opt(year, 12, 31).unwrap();

    let mut chart = ChartBuilder::on(&plot_area)
        .caption(
            format!("Solhendelser {} {}", location.name, year),
            FontDesc::new(FontFamily::SansSerif, config.title_size, FontStyle::Bold),
        )
        .margin(14)
        .set_label_area_size(LabelAreaPosition::Left, 58)
        .set_label_area_size(LabelAreaPosition::Bottom, 26)
        .build_cartesian_2d(first..last, 0.0..24.0)?;

    // Background: every other month gets a light band
    let months = month_spans(year);
    for span in months.iter().filter(|s| s.shaded) {
        chart.draw_series(std::iter::once(Rectangle::new(
            [(span.start, 0.0), (span.end, 24.0)],
            MONTH_BAND.filled(),
        )))?;
    }

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(0)
        .y_labels((24 / config.tick_hours + 1) as usize)
        .y_label_formatter(&|v| format_clock(*v))
        .light_line_style(&WHITE.mix(0.0))
        .bold_line_style(&BLACK.mix(0.15))
        .axis_style(&BLACK.mix(0.4))
        .label_style(FontDesc::new(FontFamily::SansSerif, 12.0, FontStyle::Normal))
        .draw()?;

    // Waking-hours band
    chart
        .draw_series(std::iter::once(Rectangle::new(
            [(first, WAKING_HOURS.0), (last, WAKING_HOURS.1)],
            WAKING_GOLD.mix(0.15).filled(),
        )))?
        .label("Våken tid (07-22)")
        .legend(|(x, y)| {
            Rectangle::new([(x, y - 5), (x + 16, y + 5)], WAKING_GOLD.mix(0.4).filled())
        });

    let points = |frame: TimeFrame, sunrise: bool| {
        series.records().iter().map(move |r| {
            let hours =
                if sunrise { r.sunrise_hours[frame.index()] } else { r.sunset_hours[frame.index()] };
            (r.date, hours)
        })
    };

    // Night shading below the actual sunrise and above the actual sunset
    chart.draw_series(AreaSeries::new(
        points(TimeFrame::ActualLocal, true),
        0.0,
        &NIGHT_GRAY.mix(0.4),
    ))?;
    chart.draw_series(AreaSeries::new(
        points(TimeFrame::ActualLocal, false),
        24.0,
        &NIGHT_GRAY.mix(0.4),
    ))?;

    // Counterfactual frames: dotted = permanent winter time, dashed =
    // permanent summer time
    chart.draw_series(DashedLineSeries::new(
        points(TimeFrame::FixedWinterOffset, true),
        2,
        3,
        BLUE.mix(0.7).stroke_width(2),
    ))?;
    chart.draw_series(DashedLineSeries::new(
        points(TimeFrame::FixedWinterOffset, false),
        2,
        3,
        SUNSET_GREEN.mix(0.7).stroke_width(2),
    ))?;
    chart.draw_series(DashedLineSeries::new(
        points(TimeFrame::FixedSummerOffset, true),
        8,
        5,
        BLUE.mix(0.5).stroke_width(1),
    ))?;
    chart.draw_series(DashedLineSeries::new(
        points(TimeFrame::FixedSummerOffset, false),
        8,
        5,
        SUNSET_GREEN.mix(0.5).stroke_width(1),
    ))?;

    // Actual local time, the headline series
    chart
        .draw_series(LineSeries::new(points(TimeFrame::ActualLocal, true), BLUE.stroke_width(3)))?
        .label("Soloppgang")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], BLUE.stroke_width(3)));
    chart
        .draw_series(LineSeries::new(
            points(TimeFrame::ActualLocal, false),
            SUNSET_GREEN.stroke_width(3),
        ))?
        .label("Solnedgang")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], SUNSET_GREEN.stroke_width(3)));

    // Today marker
    if today >= first && today <= last {
        chart
            .draw_series(LineSeries::new(
                vec![(today, 0.0), (today, 24.0)],
                RED.stroke_width(2),
            ))?
            .label("I dag")
            .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], RED.stroke_width(2)));
    }

    // Month names centered under each band, in the bottom label area
    let month_style = FontDesc::new(FontFamily::SansSerif, 13.0, FontStyle::Bold)
        .color(&LABEL_GRAY)
        .pos(Pos::new(HPos::Center, VPos::Top));
    let baseline_y = chart.backend_coord(&(first, 0.0)).1;
    for span in &months {
        let x = chart.backend_coord(&(span.mid, 0.0)).0;
        root.draw(&Text::new(span.label, (x, baseline_y + 6), month_style.clone()))?;
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::LowerMiddle)
        .background_style(&WHITE.mix(0.85))
        .border_style(&BLACK.mix(0.3))
        .label_font(FontDesc::new(FontFamily::SansSerif, 13.0, FontStyle::Normal))
        .draw()?;

    draw_caption_box(&caption_area, caption, config)?;

    root.present()?;
    Ok(())
}

/// The bordered caption box at the bottom center of the figure.
fn draw_caption_box<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    caption: &Caption,
    config: &ChartConfig,
) -> Result<(), Box<dyn std::error::Error>>
where
    DB::ErrorType: 'static,
{
    let style = FontDesc::new(FontFamily::SansSerif, config.caption_size, FontStyle::Bold)
        .color(&BLACK)
        .pos(Pos::new(HPos::Center, VPos::Center));

    let (w, h) = area.dim_in_pixel();
    let (tw, th) = area.estimate_text_size(&caption.rendered, &style)?;
    let (cx, cy) = (w as i32 / 2, h as i32 / 2);
    let (half_w, half_h) = (tw as i32 / 2 + 14, th as i32 / 2 + 8);
    let corners = [(cx - half_w, cy - half_h), (cx + half_w, cy + half_h)];

    area.draw(&Rectangle::new(corners, WHITE.filled()))?;
    area.draw(&Rectangle::new(corners, CAPTION_BORDER.stroke_width(1)))?;
    area.draw(&Text::new(caption.rendered.clone(), (cx, cy), style))?;
    Ok(())
}

// ===================== TESTS =====================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_matches_reference_deployment() {
        let config = ChartConfig::default();
        assert_eq!(config.output, PathBuf::from("solgraf.png"));
        assert_eq!((config.width, config.height), (1200, 700));
        assert_eq!(config.tick_hours, 2);
    }

    #[test]
    fn test_month_spans_cover_the_year() {
        let spans = month_spans(2024);
        assert_eq!(spans.len(), 12);
        assert_eq!(spans[0].start, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        assert_eq!(spans[11].end, NaiveDate::from_ymd_opt(2025, 1, 1).unwrap());
        // Bands tile the year with no gaps
        for pair in spans.windows(2) {
            assert_eq!(pair[0].end, pair[1].start);
        }
        // Odd months are shaded, and midpoints stay inside their month
        for (i, span) in spans.iter().enumerate() {
            assert_eq!(span.shaded, i % 2 == 0);
            assert!(span.mid > span.start && span.mid < span.end);
        }
        assert_eq!(spans[4].label, "Mai");
    }
}
