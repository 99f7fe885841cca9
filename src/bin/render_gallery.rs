use std::fs;
use std::path::{Path, PathBuf};

use rct_chart::core::{DomainValue, LinearScale, PointScale, Viewport};
use rct_chart::marks::{
    Bar, BarSpec, KernelDensityEstimation, TitleAlignment, TitlePosition, YAxisLabels,
    YAxisTitle,
};
use rct_chart::render::{
    GroupPrimitive, RenderFrame, Renderer, Style, SvgRenderer, Transform,
};
use rct_chart::telemetry::init_tracing;
use tracing::info;

const USAGE: &str = "usage: render_gallery [--bars <bars.json>] [OUTPUT | --output <path.svg>]";

#[derive(Debug, Default)]
struct CliArgs {
    bars: Option<PathBuf>,
    output: Option<PathBuf>,
}

fn main() {
    let _ = init_tracing("rct_chart=info,render_gallery=info");
    if let Err(err) = run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let args = parse_args(std::env::args().skip(1))?;
    let viewport = Viewport::new(640, 400);
    let mut frame = RenderFrame::new(viewport);

    let categories = ["alpha", "beta", "gamma", "delta"];
    let x_band = PointScale::new(categories, 60.0, 300.0).map_err(|e| e.to_string())?;
    let y_values = LinearScale::new(0.0, 100.0)
        .and_then(|s| s.with_range(360.0, 40.0))
        .map_err(|e| e.to_string())?;

    let bar_specs = match &args.bars {
        Some(path) => load_bar_specs(path)?,
        None => default_bar_specs(&categories),
    };
    for spec in bar_specs {
        let bar = spec
            .into_bar()
            .map_err(|e| e.to_string())?
            .with_label_format(|value: &DomainValue| match value.as_number() {
                Some(v) => format!("{v:.0}%"),
                None => value.to_string(),
            });
        frame.push(bar.render(&x_band, &y_values).map_err(|e| e.to_string())?);
    }

    let value_labels = YAxisLabels::new()
        .with_tick_count(5)
        .with_format(|value: &DomainValue| format!("{value}%"))
        .render(&y_values)
        .map_err(|e| e.to_string())?;
    frame.push(GroupPrimitive {
        transform: Some(Transform::Translate { x: 56.0, y: 0.0 }),
        ..GroupPrimitive::new(vec![value_labels])
    });

    let x_values = LinearScale::new(0.0, 100.0)
        .and_then(|s| s.with_range(340.0, 600.0))
        .map_err(|e| e.to_string())?;
    let y_bands = PointScale::new(["q1", "q2"], 40.0, 200.0).map_err(|e| e.to_string())?;
    for (quarter, value) in [("q1", 64.0), ("q2", 38.0)] {
        let bar = Bar::horizontal(0.0, value, quarter)
            .with_thickness(16.0)
            .with_label(true)
            .with_label_distance(6.0);
        frame.push(bar.render(&x_values, &y_bands).map_err(|e| e.to_string())?);
    }

    let density_y = LinearScale::new(0.0, 0.5)
        .and_then(|s| s.with_range(360.0, 220.0))
        .map_err(|e| e.to_string())?;
    let density = KernelDensityEstimation::new(vec![12.0, 18.0, 22.0, 23.5, 40.0, 41.0, 47.0, 75.0])
        .with_bandwidth(8.0)
        .with_style(Style::new().with("fill", "none").with("stroke", "#4c78a8"));
    frame.push(density.render(&x_values, &density_y).map_err(|e| e.to_string())?);

    frame.push(
        YAxisTitle::new("Share of traffic")
            .with_size(f64::from(viewport.width), f64::from(viewport.height))
            .with_position(TitlePosition::Left)
            .with_alignment(TitleAlignment::Middle)
            .render(),
    );

    let mut renderer = SvgRenderer::new();
    renderer.render(&frame).map_err(|e| e.to_string())?;

    match &args.output {
        Some(path) => {
            fs::write(path, renderer.document())
                .map_err(|err| format!("failed to write `{}`: {err}", path.display()))?;
            info!(path = %path.display(), nodes = frame.nodes.len(), "wrote gallery");
        }
        None => print!("{}", renderer.document()),
    }
    Ok(())
}

fn default_bar_specs(categories: &[&str]) -> Vec<BarSpec> {
    categories
        .iter()
        .zip([42.0, 77.0, 18.0, 55.0])
        .map(|(category, value)| BarSpec {
            x: DomainValue::from(*category),
            y: DomainValue::Number(0.0),
            y_end: Some(DomainValue::Number(value)),
            thickness: 24.0,
            show_label: true,
            label_distance: 6.0,
            ..BarSpec::default()
        })
        .collect()
}

fn load_bar_specs(path: &Path) -> Result<Vec<BarSpec>, String> {
    let raw = fs::read_to_string(path)
        .map_err(|err| format!("failed to read `{}`: {err}", path.display()))?;
    serde_json::from_str(&raw).map_err(|err| format!("invalid bar json: {err}"))
}

fn parse_args<I>(args: I) -> Result<CliArgs, String>
where
    I: IntoIterator<Item = String>,
{
    let mut args = args.into_iter();
    let mut parsed = CliArgs::default();

    while let Some(flag) = args.next() {
        match flag.as_str() {
            "--bars" => {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value for --bars".to_owned())?;
                parsed.bars = Some(PathBuf::from(value));
            }
            "--output" => {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value for --output".to_owned())?;
                set_output(&mut parsed, value)?;
            }
            "--help" | "-h" => return Err(USAGE.to_owned()),
            other if other.starts_with('-') => {
                return Err(format!("unknown argument `{other}`\n{USAGE}"));
            }
            other => set_output(&mut parsed, other.to_owned())?,
        }
    }

    Ok(parsed)
}

fn set_output(parsed: &mut CliArgs, value: String) -> Result<(), String> {
    if parsed.output.is_some() {
        return Err(format!("output given more than once\n{USAGE}"));
    }
    parsed.output = Some(PathBuf::from(value));
    Ok(())
}
