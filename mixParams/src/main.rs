use clap::Parser;

use mixparams::cli::cli::Args;
use mixparams::core::runner;
use mixparams::utils::logging;

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    logging::init_logging(args.verbose());

    let config = args.to_config();
    let outcome = runner::run(&config)?;

    println!(
        "Parameter table: {} plant types, {} plants, average load {:.1} MW",
        outcome.table.plant_type_count(),
        outcome.table.plant_count(),
        outcome.table.average_load()
    );
    for row in outcome.table.iter() {
        let cf = row
            .capacity_factor
            .percent()
            .map_or_else(|| "n/a".to_string(), |cf| format!("{:.1}%", cf));
        println!(
            "  [{}] {:<8} pmax {:>8.3} MW  cf {:>6}  mix {:>5.1}%",
            row.plant_type.index(),
            row.plant_type.name(),
            row.avg_pmax,
            cf,
            row.target_energy_mix_pct
        );
    }

    match &outcome.validation {
        Ok(()) => println!("Validation: ok"),
        Err(err) => println!("Validation: {}", err),
    }

    if let Some(report) = &outcome.report {
        println!();
        print!("{}", report.render());
    }

    if let Some(json) = &outcome.json {
        println!("{}", json);
    }

    if let Some(dir) = &outcome.export_dir {
        println!("CSV files written to {}", dir.display());
    }

    Ok(())
}
