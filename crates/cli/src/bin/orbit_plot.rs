use clap::Parser;
use csv::ReaderBuilder;
use plotters::prelude::*;
use std::fs;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Render body paths from a trajectory CSV (first two dimensions)"
)]
struct Cli {
    #[arg(long)]
    input: String,
    #[arg(long, default_value = "artifacts/orbits.png")]
    output: PathBuf,
    #[arg(long, default_value_t = 900)]
    width: u32,
    #[arg(long, default_value_t = 900)]
    height: u32,
}

const PALETTE: [RGBColor; 6] = [
    RGBColor(230, 120, 20),
    RGBColor(30, 110, 200),
    RGBColor(40, 160, 70),
    RGBColor(190, 40, 60),
    RGBColor(130, 70, 180),
    RGBColor(90, 90, 90),
];

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let paths = read_paths(&cli.input)?;

    let mut x_min = f64::INFINITY;
    let mut x_max = f64::NEG_INFINITY;
    let mut y_min = f64::INFINITY;
    let mut y_max = f64::NEG_INFINITY;
    for &(x, y) in paths.iter().flatten() {
        x_min = x_min.min(x);
        x_max = x_max.max(x);
        y_min = y_min.min(y);
        y_max = y_max.max(y);
    }
    if !(x_min.is_finite() && y_min.is_finite()) {
        return Err(anyhow::anyhow!("No finite positions in the provided CSV"));
    }

    // Square, padded window so circular orbits stay circular
    let half = 0.5 * (x_max - x_min).max(y_max - y_min).max(f64::EPSILON) * 1.1;
    let (cx, cy) = (0.5 * (x_min + x_max), 0.5 * (y_min + y_max));

    if let Some(parent) = cli.output.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let output_str = cli
        .output
        .to_str()
        .ok_or_else(|| anyhow::anyhow!("Output path contains invalid UTF-8"))?;
    let root = BitMapBackend::new(output_str, (cli.width, cli.height)).into_drawing_area();
    root.fill(&WHITE)?;

    let font_family = select_font_family();
    let caption_font = FontDesc::new(font_family, 24.0, FontStyle::Bold);
    let label_font = FontDesc::new(font_family, 16.0, FontStyle::Normal);

    let mut chart = ChartBuilder::on(&root)
        .margin(20)
        .caption("Body trajectories".to_string(), caption_font)
        .x_label_area_size(50)
        .y_label_area_size(70)
        .build_cartesian_2d((cx - half)..(cx + half), (cy - half)..(cy + half))?;

    chart
        .configure_mesh()
        .x_desc("x")
        .y_desc("y")
        .label_style(label_font.clone())
        .x_labels(6)
        .y_labels(6)
        .draw()?;

    for (body, path) in paths.iter().enumerate() {
        let color = PALETTE[body % PALETTE.len()];
        chart
            .draw_series(LineSeries::new(
                path.iter().copied(),
                ShapeStyle::from(&color).stroke_width(2),
            ))?
            .label(format!("body {body}"))
            .legend(move |(x, y)| {
                PathElement::new(vec![(x, y), (x + 20, y)], ShapeStyle::from(&color))
            });
        if let Some(&start) = path.first() {
            chart.draw_series(std::iter::once(Circle::new(start, 4, color.filled())))?;
        }
    }

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .label_font(label_font)
        .draw()?;

    root.present()?;
    Ok(())
}

fn select_font_family() -> FontFamily<'static> {
    if cfg!(target_os = "macos") {
        FontFamily::Name("Helvetica")
    } else if cfg!(target_os = "windows") {
        FontFamily::Name("Arial")
    } else {
        FontFamily::Name("DejaVu Sans")
    }
}

/// Per-body `(x, y)` samples taken from the `pos{body}_0` / `pos{body}_1` columns.
fn read_paths(path: &str) -> anyhow::Result<Vec<Vec<(f64, f64)>>> {
    let mut rdr = ReaderBuilder::new().has_headers(true).from_path(path)?;
    let headers = rdr.headers()?.clone();
    let column = |name: String| headers.iter().position(|h| h.eq_ignore_ascii_case(&name));

    let mut columns = Vec::new();
    for body in 0.. {
        match (column(format!("pos{body}_0")), column(format!("pos{body}_1"))) {
            (Some(x), Some(y)) => columns.push((x, y)),
            _ => break,
        }
    }
    if columns.is_empty() {
        return Err(anyhow::anyhow!(
            "CSV missing 'pos0_0'/'pos0_1' columns (needs at least two dimensions)"
        ));
    }

    let mut paths = vec![Vec::new(); columns.len()];
    for rec in rdr.records() {
        let r = rec?;
        for (path, &(xi, yi)) in paths.iter_mut().zip(&columns) {
            let x: f64 = r.get(xi).unwrap_or("").parse().unwrap_or(f64::NAN);
            let y: f64 = r.get(yi).unwrap_or("").parse().unwrap_or(f64::NAN);
            if x.is_finite() && y.is_finite() {
                path.push((x, y));
            }
        }
    }
    Ok(paths)
}
