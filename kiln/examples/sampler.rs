use std::{fs::File, io::Write, path::PathBuf, sync::Arc, time::Instant};

use kiln::{BoundingBox, Document, FontMetricsTable, KilnError, LinePath, Point};
use structopt::StructOpt;

/// Write a sample document with text, lines and a grid of circles.
#[derive(StructOpt, Debug)]
#[structopt(name = "sampler")]
struct Opt {
    /// Output file
    #[structopt(short, long, parse(from_os_str), default_value = "output.pdf")]
    output: PathBuf,

    /// Circles per row and column
    #[structopt(short, long, default_value = "200")]
    grid: usize,

    /// Read the written file back and check its cross-reference table
    #[structopt(short, long)]
    check: bool,
}

const DIAMETER: f64 = 2.0;
const SPACING: f64 = 2.2;
const TEXT_SIZE: f64 = 30.0;

fn build(grid: usize) -> Result<Document, KilnError> {
    let metrics = Arc::new(FontMetricsTable::standard()?);
    let mut doc = Document::new(metrics)?;
    doc.add_page(None)?;

    let frame = BoundingBox::new(10.0, 20.0, 550.0, 800.0);
    for alignment in ["lt", "lb", "lc", "rt", "rb", "rc", "ct", "cb", "cc"] {
        doc.add_text("Hello world", TEXT_SIZE, &frame, alignment)?;
    }

    doc.add_line(&LinePath::new(vec![
        Point::new(frame.minx, frame.miny),
        Point::new(frame.maxx, frame.miny),
        Point::new(frame.maxx, frame.maxy),
        Point::new(frame.minx, frame.maxy),
        Point::new(frame.minx, frame.miny),
    ]))?;

    doc.set_fill_color("#FF0000")?;
    doc.set_stroke_color("#00FF00")?;
    for x in 0..grid {
        for y in 0..grid {
            doc.add_circle(x as f64 * SPACING, y as f64 * SPACING, DIAMETER, false, true)?;
        }
    }

    doc.set_fill_color("#000000")?;
    doc.set_stroke_color("#000000")?;
    let r = DIAMETER * 0.5;
    let mut counter = 0usize;
    for x in 0..grid {
        for y in 0..grid {
            let cx = x as f64 * SPACING;
            let cy = y as f64 * SPACING;
            let label = (counter % 100).to_string();
            counter += 1;
            doc.add_text(
                &label,
                DIAMETER * 0.5,
                &BoundingBox::new(cx - r, cy - r, cx + r, cy + r),
                "cc",
            )?;
        }
    }

    doc.set_fill_color("#FF0000")?;
    doc.set_stroke_color("#00FF00")?;
    doc.add_circle(100.0, 300.0, 20.0, true, true)?;
    doc.add_circle(120.0, 300.0, 20.0, true, false)?;
    doc.add_circle(140.0, 300.0, 20.0, false, true)?;

    Ok(doc)
}

pub fn main() {
    env_logger::init();
    let opt = Opt::from_args();

    let start = Instant::now();
    let mut doc = match build(opt.grid) {
        Ok(doc) => doc,
        Err(e) => {
            log::error!("Error while building: {}", e);
            return;
        }
    };
    let out = doc.render();
    log::info!("total generation time: {} ms", start.elapsed().as_millis());

    if opt.check {
        match kiln::inspect(&out) {
            Ok(section) => log::info!(
                "{} xref entries, root {}",
                section.xref.len(),
                section.trailer.root
            ),
            Err(e) => log::error!("Written file is broken: {}", e),
        }
    }

    let mut buffer = File::create(opt.output).expect("Could not create out file");
    buffer.write_all(&out).expect("Could not write out file");
}
