//! Presentation: line charts of a run's [`SeriesSet`], drawn as SVG, and
//! a single HTML page holding all four of them.

use plotters::prelude::*;

use crate::{helpe::*, series::{SeriesMap, SeriesSet}};

/// Width and height of each chart, in pixels.
pub const CHART_SIZE: (u32, u32) = (900, 500);

#[derive(thiserror::Error, Debug)]
pub enum RenderError {
    #[error("drawing failed: {0}")]
    Draw(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

#[inline(always)]
fn draw_err<E: std::fmt::Display>(e: E) -> RenderError {
    RenderError::Draw(e.to_string())
}

/// Value range of all points in `series`, padded a bit so that lines
/// do not run along the frame. Flat or empty data get a unit range.
fn y_range(series: &SeriesMap) -> (f64, f64) {
    let (lo, hi) = match series.values()
        .flatten()
        .map(|&(_, y)| y)
        .filter(|y| y.is_finite())
        .minmax()
        .into_option() {
        Some(v) => v,
        None    => { return (0.0, 1.0); },
    };
    if lo == hi {
        return (lo - 1.0, hi + 1.0);
    }
    let pad = (hi - lo) * 0.05;

    (lo - pad, hi + pad)
}

/// Draws one line chart, one line per store, and returns the SVG
/// document.
pub fn render_chart(
    title:  &str,
    steps:  &[usize],
    series: &SeriesMap,
    size:   (u32, u32),
) -> Result<String, RenderError> {
    let x_max = steps.last().copied().unwrap_or(0).max(1) as f64;
    let (y_lo, y_hi) = y_range(series);

    let mut res = String::new();
    {
        let root = SVGBackend::with_string(&mut res, size).into_drawing_area();
        root.fill(&WHITE).map_err(draw_err)?;
        let mut chart = ChartBuilder::on(&root)
            .caption(title, ("sans-serif", 20))
            .margin(10)
            .x_label_area_size(40)
            .y_label_area_size(60)
            .build_cartesian_2d(0f64..x_max, y_lo..y_hi)
            .map_err(draw_err)?;
        chart
            .configure_mesh()
            .x_desc("step")
            .draw()
            .map_err(draw_err)?;

        for (idx, (name, points)) in series.iter().enumerate() {
            let color = Palette99::pick(idx).to_rgba();
            chart
                .draw_series(LineSeries::new(
                    points.iter().map(|&(x, y)| (x as f64, y)),
                    color.stroke_width(2),
                ))
                .map_err(draw_err)?
                .label(name.as_str())
                .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color));
        }

        chart
            .configure_series_labels()
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()
            .map_err(draw_err)?;
        root.present().map_err(draw_err)?;
    }

    Ok(res)
}

/// Draws the four charts of a run, in display order, keyed by title.
pub fn render_all(set: &SeriesSet) -> Result<Vec<(&'static str, String)>, RenderError> {
    set.titled()
        .into_iter()
        .map(|(title, series)| {
            render_chart(title, &set.steps, series, CHART_SIZE).map(|svg| (title, svg))
        })
        .collect()
}

/// Stacks rendered charts into one HTML page.
pub fn html_page(heading: &str, charts: &[(&str, String)]) -> String {
    let mut res = String::from("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
    let _ = writeln!(res, "<title>{heading}</title>\n</head>\n<body>\n<h1>{heading}</h1>");
    for (title, svg) in charts {
        let _ = writeln!(res, "<div class=\"chart\" id=\"{}\">\n{svg}\n</div>", title.to_lowercase());
    }
    res.push_str("</body>\n</html>\n");

    res
}

/// Writes `size.svg`, `available.svg`, `percent.svg`, `score.svg` and an
/// `index.html` embedding all of them into `dir`, which is created if
/// needed. Returns the paths written.
pub fn write_report(set: &SeriesSet, heading: &str, dir: &Path) -> Result<Vec<PathBuf>, RenderError> {
    std::fs::create_dir_all(dir)?;
    let charts = render_all(set)?;
    let mut res = vec![];
    for (title, svg) in &charts {
        let path = dir.join(format!("{}.svg", title.to_lowercase()));
        std::fs::write(&path, svg)?;
        info!("wrote {}", path.display());
        res.push(path);
    }
    let index = dir.join("index.html");
    std::fs::write(&index, html_page(heading, &charts))?;
    info!("wrote {}", index.display());
    res.push(index);

    Ok(res)
}
