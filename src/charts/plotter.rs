//! Chart Plotter Module
//! Draws chart descriptions as interactive egui_plot charts.

use crate::charts::colors::Rgb;
use crate::charts::model::{
    BarChart as BarModel, Chart, ChoroplethChart, DualBarChart, MapRegion, ScatterChart,
};
use crate::error::DashboardError;
use egui::{Color32, Mesh, RichText, Shape, Stroke};
use egui_plot::{
    Bar, BarChart, GridMark, Line, LineStyle, Plot, PlotPoint, PlotPoints, Points, Polygon,
};

const CHART_HEIGHT: f32 = 380.0;
const MAP_HEIGHT: f32 = 440.0;
/// Half the side of a country tile on the map, in degrees
const TILE_HALF_SIZE: f64 = 2.2;
const ERROR_RED: Color32 = Color32::from_rgb(220, 53, 69);
const BORDER: Stroke = Stroke {
    width: 0.5,
    color: Color32::from_gray(40),
};

pub fn to_color32(rgb: Rgb) -> Color32 {
    Color32::from_rgb(rgb[0], rgb[1], rgb[2])
}

/// Draws dashboard charts using egui_plot.
pub struct ChartPlotter;

impl ChartPlotter {
    pub fn draw(ui: &mut egui::Ui, id: &str, chart: &Chart) {
        match chart {
            Chart::Scatter(scatter) => Self::draw_scatter(ui, id, scatter),
            Chart::Choropleth(map) => Self::draw_choropleth(ui, id, map),
            Chart::DualBar(bars) => Self::draw_dual_bar(ui, id, bars),
        }
    }

    /// Scatter plot with the country name on hover and an optional reference line.
    pub fn draw_scatter(ui: &mut egui::Ui, id: &str, chart: &ScatterChart) {
        ui.label(RichText::new(&chart.title).size(15.0).strong());

        Plot::new(format!("scatter_{id}"))
            .height(CHART_HEIGHT)
            .allow_scroll(false)
            .x_axis_label(chart.x_label.clone())
            .y_axis_label(chart.y_label.clone())
            .label_formatter(|name, value| {
                if name.is_empty() {
                    format!("x: {:.1}\ny: {:.1}", value.x, value.y)
                } else {
                    format!("{name}\nx: {:.1}\ny: {:.1}", value.x, value.y)
                }
            })
            .show(ui, |plot_ui| {
                let color = to_color32(chart.point_color);

                // One item per country so hovering reports its name
                for point in &chart.points {
                    plot_ui.points(
                        Points::new(vec![[point.x, point.y]])
                            .radius(4.0)
                            .color(color.gamma_multiply(0.8))
                            .name(&point.label),
                    );
                }

                if let Some(reference) = &chart.reference_line {
                    let line_fn = reference.clone();
                    // Unbounded range: the line follows the visible x range
                    let mut line = Line::new(PlotPoints::from_explicit_callback(
                        move |x| line_fn.y_at(x),
                        ..,
                        256,
                    ))
                    .color(to_color32(reference.color))
                    .width(1.5)
                    .name(&reference.label);
                    if reference.dashed {
                        line = line.style(LineStyle::dashed_loose());
                    }
                    plot_ui.line(line);
                }
            });
    }

    /// Countries filled inside their outlines, with a color bar.
    ///
    /// The plot only provides the longitude/latitude frame: outlines are not
    /// convex, so they are painted as triangle meshes on top of it. Countries
    /// without an outline get a small tile at their centroid.
    pub fn draw_choropleth(ui: &mut egui::Ui, id: &str, chart: &ChoroplethChart) {
        ui.label(RichText::new(&chart.title).size(15.0).strong());

        let response = Plot::new(format!("map_{id}"))
            .height(MAP_HEIGHT)
            .data_aspect(1.0)
            .include_x(-180.0)
            .include_x(180.0)
            .include_y(-60.0)
            .include_y(85.0)
            .show_grid(false)
            .allow_scroll(false)
            .x_axis_label("Longitude")
            .y_axis_label("Latitude")
            .label_formatter(|name, _value| name.to_owned())
            .show(ui, |plot_ui| {
                let h = TILE_HALF_SIZE;
                for region in chart.regions.iter().filter(|r| r.shape.is_none()) {
                    let (x, y) = (region.longitude, region.latitude);
                    let tile = vec![
                        [x - h, y - h],
                        [x + h, y - h],
                        [x + h, y + h],
                        [x - h, y + h],
                    ];
                    plot_ui.polygon(
                        Polygon::new(PlotPoints::new(tile))
                            .fill_color(to_color32(region.color))
                            .stroke(BORDER)
                            .name(Self::region_label(chart, region)),
                    );
                }
            });

        let transform = &response.transform;
        let to_screen =
            |[lon, lat]: [f64; 2]| transform.position_from_point(&PlotPoint::new(lon, lat));

        let mut mesh = Mesh::default();
        let mut borders = Vec::new();
        for region in &chart.regions {
            let Some(shape) = region.shape else {
                continue;
            };
            let color = to_color32(region.color);
            for triangle in &shape.triangles {
                let first = mesh.vertices.len() as u32;
                for &corner in triangle {
                    mesh.colored_vertex(to_screen(corner), color);
                }
                mesh.add_triangle(first, first + 1, first + 2);
            }
            for ring in &shape.rings {
                let points = ring.iter().map(|&p| to_screen(p)).collect();
                borders.push(Shape::closed_line(points, BORDER));
            }
        }

        let painter = ui.painter_at(response.response.rect);
        painter.add(Shape::mesh(mesh));
        painter.extend(borders);

        if let Some(pointer) = response.response.hover_pos() {
            let value = transform.value_from_position(pointer);
            if let Some(region) = chart.region_at(value.x, value.y) {
                response
                    .response
                    .on_hover_text_at_pointer(Self::region_label(chart, region));
            }
        }

        Self::draw_color_bar(ui, chart);

        if !chart.unresolved.is_empty() {
            ui.label(
                RichText::new(format!(
                    "Not placed on the map ({}): {}",
                    chart.unresolved.len(),
                    chart.unresolved.join(", ")
                ))
                .size(11.0)
                .color(Color32::GRAY),
            );
        }
    }

    fn region_label(chart: &ChoroplethChart, region: &MapRegion) -> String {
        format!("{}\n{}: {:.1}", region.country, chart.value_label, region.value)
    }

    fn draw_color_bar(ui: &mut egui::Ui, chart: &ChoroplethChart) {
        let (min, max) = chart.value_range;
        let steps = 48;

        ui.horizontal(|ui| {
            ui.label(RichText::new(format!("{min:.1}")).size(11.0));

            let (rect, _) =
                ui.allocate_exact_size(egui::vec2(240.0, 14.0), egui::Sense::hover());
            let step_width = rect.width() / steps as f32;
            for i in 0..steps {
                let t = i as f64 / (steps - 1) as f64;
                let cell = egui::Rect::from_min_size(
                    egui::pos2(rect.left() + i as f32 * step_width, rect.top()),
                    egui::vec2(step_width + 0.5, rect.height()),
                );
                ui.painter()
                    .rect_filled(cell, 0.0, to_color32(chart.scale.sample(t)));
            }

            ui.label(RichText::new(format!("{max:.1}")).size(11.0));
            ui.add_space(8.0);
            ui.label(
                RichText::new(format!("{} ({})", chart.value_label, chart.scale.name))
                    .size(11.0)
                    .color(Color32::GRAY),
            );
        });
    }

    /// Two horizontal bar charts side by side.
    pub fn draw_dual_bar(ui: &mut egui::Ui, id: &str, chart: &DualBarChart) {
        ui.columns(2, |columns| {
            Self::draw_bar_chart(
                &mut columns[0],
                format!("bars_left_{id}"),
                &chart.left,
                &chart.value_label,
            );
            Self::draw_bar_chart(
                &mut columns[1],
                format!("bars_right_{id}"),
                &chart.right,
                &chart.value_label,
            );
        });
    }

    /// Horizontal bars, first bar at the top, country names on the y axis.
    fn draw_bar_chart(ui: &mut egui::Ui, plot_id: String, model: &BarModel, value_label: &str) {
        ui.label(RichText::new(&model.title).size(14.0).strong());

        let n = model.bars.len();
        let labels: Vec<String> = model.bars.iter().map(|b| b.label.clone()).collect();

        let bars: Vec<Bar> = model
            .bars
            .iter()
            .enumerate()
            .map(|(i, bar)| {
                Bar::new((n - 1 - i) as f64, bar.value)
                    .width(0.7)
                    .fill(to_color32(bar.color))
                    .name(format!("{}: {:.2}", bar.label, bar.value))
            })
            .collect();

        Plot::new(plot_id)
            .height(CHART_HEIGHT)
            .allow_zoom(false)
            .allow_drag(false)
            .allow_scroll(false)
            .x_axis_label(value_label.to_string())
            // One tick per bar
            .y_grid_spacer(move |_input| {
                (0..n)
                    .map(|i| GridMark {
                        value: i as f64,
                        step_size: 1.0,
                    })
                    .collect()
            })
            .y_axis_formatter(move |mark, _range| {
                let slot = mark.value.round();
                if (mark.value - slot).abs() > 1e-6 || slot < 0.0 {
                    return String::new();
                }
                let slot = slot as usize;
                if slot < n {
                    labels[n - 1 - slot].clone()
                } else {
                    String::new()
                }
            })
            .label_formatter(|name, _value| name.to_owned())
            .show(ui, |plot_ui| {
                plot_ui.bar_chart(BarChart::new(bars).horizontal());
            });
    }

    /// Section-scoped failure card shown instead of a chart.
    pub fn draw_error(ui: &mut egui::Ui, error: &DashboardError) {
        let heading = match error {
            DashboardError::DataLoad { .. } => "Data could not be loaded",
            DashboardError::Schema { .. } => "Dataset is missing something this chart needs",
            DashboardError::Render { .. } => "Chart could not be drawn",
        };

        egui::Frame::none()
            .rounding(8.0)
            .stroke(Stroke::new(2.0, ERROR_RED))
            .inner_margin(12.0)
            .show(ui, |ui| {
                ui.set_width(ui.available_width());
                ui.label(
                    RichText::new(format!("⚠ {heading}"))
                        .size(14.0)
                        .strong()
                        .color(ERROR_RED),
                );
                ui.label(RichText::new(error.to_string()).size(12.0));
            });
    }
}
