mod cli;
mod tables;

use clap::{Parser, crate_version};
use rrc_savings::{prelude::*, projector::ProjectionResult, query::Crosshair, share};

use crate::{
    cli::{Args, Command},
    tables::{
        build_chart_table,
        build_label_set_table,
        build_readings_table,
        build_summary_table,
    },
};

fn main() -> Result {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt().without_time().compact().init();
    info!(version = crate_version!(), "starting…");

    let args = Args::parse();
    let label_sets = args.state.label_sets()?;
    let state = args.state.load()?;
    let currency = state.currency;

    match args.command {
        Command::Project => match state.project(&label_sets) {
            ProjectionResult::Ready(projection) => {
                println!(
                    "Baseline: class {} ({}), annual fuel cost {}",
                    projection.baseline.label,
                    projection.baseline.midpoint,
                    currency.format(projection.baseline_fuel_cost),
                );
                println!("{}", build_summary_table(&projection, currency));
                println!("{}", build_chart_table(&projection, currency));
            }
            ProjectionResult::InsufficientSelection => {
                warn!("select at least two known classes to compare");
            }
        },

        Command::Query(query) => {
            let Some(projection) = state.project(&label_sets).into_projection() else {
                bail!("select at least two known classes to query");
            };
            let mut crosshair = Crosshair::default();
            for point in query.points {
                crosshair = crosshair.track(&projection, point);
                let readings = crosshair.readings(&projection);
                println!(
                    "{}",
                    build_readings_table(&projection, crosshair.point(), &readings, currency),
                );
            }
        }

        Command::Share(share_args) => {
            println!("{}", share::encode(&state)?);
            if share_args.save {
                state.write_to(&args.state.state_file)?;
                info!(path = %args.state.state_file.display(), "saved");
            }
        }

        Command::Classes => {
            let label_set = label_sets.get(&state.label_set_id);
            println!("{} ({}, {})", label_set.name, label_set.id, label_set.tyre_type);
            println!("{}", build_label_set_table(label_set));
        }
    }

    info!("done!");
    Ok(())
}
