use anyhow::{Context, Result};
use clap::Parser;
use tofpa_cli::{Args, SurfaceReport, SurfaceRequest};
use tofpa_core::generate_from_centerline;
use tofpa_export::{write_kmz, Placemark};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("tofpa=info".parse()?)
                .add_directive("tofpa_export=info".parse()?),
        )
        .init();

    let args = Args::parse();
    let request = SurfaceRequest::from_args(&args)?;
    let threshold = request.threshold()?;

    // resolve the export frame up front so a bad origin fails before anything is printed
    let export = match &args.kmz {
        Some(path) => Some((path, request.export_frame(&threshold)?)),
        None => None,
    };

    let surface = generate_from_centerline(&request.centerline, &threshold, &request.params)
        .context("takeoff climb surface could not be generated")?;
    tracing::info!(
        azimuth = surface.azimuth,
        flare_distance = surface.flare_distance,
        "surface generated"
    );

    let report = SurfaceReport::new(&request.centerline, &surface);
    let json = if args.pretty {
        serde_json::to_string_pretty(&report)?
    } else {
        serde_json::to_string(&report)?
    };

    if let Some((path, frame)) = export {
        let placemark = Placemark::from_surface(&surface, &frame)?;
        write_kmz(&placemark, path)
            .with_context(|| format!("writing KMZ to {}", path.display()))?;
    }

    println!("{json}");
    Ok(())
}
