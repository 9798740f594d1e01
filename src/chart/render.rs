// Copyright 2022 Twitter, Inc.
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use super::scales::{RankCoord, ResponseCoord};
use super::{plain_number, Figure, Panel};
use crate::config::ChartConfig;
use crate::error::{Error, Result};

use plotters::coord::Shift;
use plotters::prelude::*;

use std::path::Path;

type DrawResult = std::result::Result<(), Box<dyn std::error::Error>>;

macro_rules! hexcolour {
    ($colour:literal) => {
        RGBColor(
            (($colour & 0xFF0000) >> 16) as u8,
            (($colour & 0x00FF00) >> 8) as u8,
            ($colour & 0x0000FF) as u8,
        )
    };
}

const COLOURS: &[RGBColor] = &[
    hexcolour!(0x1F77B4),
    hexcolour!(0xFF7F0E),
    hexcolour!(0x2CA02C),
    hexcolour!(0xD62728),
    hexcolour!(0x9467BD),
    hexcolour!(0x8C564B),
    hexcolour!(0xE377C2),
    hexcolour!(0x7F7F7F),
    hexcolour!(0xBCBD22),
    hexcolour!(0x17BECF),
    hexcolour!(0x332288),
    hexcolour!(0x882255),
];

const FONT: &str = "sans-serif";
const LEGEND_ENTRY_WIDTH: i32 = 170;
const LEGEND_ENTRY_HEIGHT: i32 = 20;

/// Draw the figure to `path`. Files ending in `.svg` are written as SVG,
/// anything else as a bitmap in the format implied by the extension.
pub fn render(figure: &Figure, chart: &ChartConfig, path: &Path, size: (u32, u32)) -> Result<()> {
    let svg = path
        .extension()
        .map(|e| e.eq_ignore_ascii_case("svg"))
        .unwrap_or(false);

    if svg {
        let root = SVGBackend::new(path, size).into_drawing_area();
        draw_figure(&root, figure, chart).map_err(Error::render)?;
        root.present().map_err(Error::render)?;
    } else {
        let root = BitMapBackend::new(path, size).into_drawing_area();
        draw_figure(&root, figure, chart).map_err(Error::render)?;
        root.present().map_err(Error::render)?;
    }

    info!("chart written to: {}", path.display());
    Ok(())
}

fn draw_figure<DB>(root: &DrawingArea<DB, Shift>, figure: &Figure, chart: &ChartConfig) -> DrawResult
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    root.fill(&WHITE)?;

    let columns = figure.panels().len().max(1);
    let areas = match figure.title() {
        Some(title) => root.titled(title, (FONT, 40))?.split_evenly((1, columns)),
        None => root.split_evenly((1, columns)),
    };

    for (panel, area) in figure.panels().iter().zip(areas.iter()) {
        let axis = ResponseCoord::new(&panel.response_axis(chart));
        draw_panel(area, panel, chart, axis)?;
    }

    Ok(())
}

fn draw_panel<DB>(
    area: &DrawingArea<DB, Shift>,
    panel: &Panel,
    chart: &ChartConfig,
    y: ResponseCoord,
) -> DrawResult
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    let ranks = panel.rank_axis();
    let exponents = chart.rank_exponents();

    let mut ctx = ChartBuilder::on(area)
        .caption(panel.title(), (FONT, 30))
        .margin(20)
        .set_label_area_size(LabelAreaPosition::Left, 90)
        .set_label_area_size(LabelAreaPosition::Bottom, 60)
        .build_cartesian_2d(RankCoord::new(ranks.len()), y)?;

    ctx.configure_mesh()
        .x_desc(chart.x_desc())
        .y_desc(chart.y_desc())
        .x_labels(ranks.len().max(1))
        .x_label_formatter(&|x| ranks.tick_label(x.round().max(0.0) as usize, exponents.clone()))
        .y_label_formatter(&|y| plain_number(*y))
        .light_line_style(BLACK.mix(0.05).stroke_width(1))
        .bold_line_style(BLACK.mix(0.3).stroke_width(1))
        .x_label_style((FONT, 16))
        .y_label_style((FONT, 16))
        .draw()?;

    for (i, line) in panel.lines().iter().enumerate() {
        let colour = COLOURS[i % COLOURS.len()];
        let points: Vec<(f64, f64)> = line
            .series()
            .points()
            .filter_map(|(rank, time)| ranks.position(rank).map(|x| (x as f64, time)))
            .collect();

        ctx.draw_series(LineSeries::new(
            points.iter().copied(),
            colour.stroke_width(chart.line_width()),
        ))?;
        ctx.draw_series(
            points
                .iter()
                .map(|&point| Circle::new(point, chart.marker_size() as i32, colour.filled())),
        )?;
    }

    let plotting = ctx.plotting_area().strip_coord_spec();
    draw_legend(&plotting, panel, chart)?;

    Ok(())
}

/// Legend laid out as a grid of `legend_columns` columns, centered at the
/// top of the plotting area.
fn draw_legend<DB>(area: &DrawingArea<DB, Shift>, panel: &Panel, chart: &ChartConfig) -> DrawResult
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    let lines = panel.lines();
    if lines.is_empty() {
        return Ok(());
    }

    let columns = chart.legend_columns().min(lines.len());
    let rows = (lines.len() + columns - 1) / columns;
    let width = columns as i32 * LEGEND_ENTRY_WIDTH;
    let height = rows as i32 * LEGEND_ENTRY_HEIGHT;

    let (area_width, _) = area.dim_in_pixel();
    let left = ((area_width as i32 - width) / 2).max(0);
    let top = 10;

    area.draw(&Rectangle::new(
        [(left - 5, top - 5), (left + width + 5, top + height + 5)],
        WHITE.mix(0.8).filled(),
    ))?;
    area.draw(&Rectangle::new(
        [(left - 5, top - 5), (left + width + 5, top + height + 5)],
        BLACK.stroke_width(1),
    ))?;

    for (i, line) in lines.iter().enumerate() {
        let colour = COLOURS[i % COLOURS.len()];
        let x = left + (i % columns) as i32 * LEGEND_ENTRY_WIDTH;
        let y = top + (i / columns) as i32 * LEGEND_ENTRY_HEIGHT + LEGEND_ENTRY_HEIGHT / 2;

        area.draw(&PathElement::new(
            vec![(x, y), (x + 20, y)],
            colour.stroke_width(chart.line_width()),
        ))?;
        area.draw(&Circle::new((x + 10, y), chart.marker_size() as i32, colour.filled()))?;
        area.draw(&Text::new(
            line.label(),
            (x + 26, y - 7),
            (FONT, 14).into_font(),
        ))?;
    }

    Ok(())
}
