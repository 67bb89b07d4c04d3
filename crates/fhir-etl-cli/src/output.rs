use colored::Colorize;
use fhir_etl_core::SkippedFile;
use fhir_etl_postgres::TableLoad;

pub fn print_success(msg: &str) {
    println!("{} {}", "✓".green(), msg);
}

pub fn print_warning(msg: &str) {
    eprintln!("{} {}", "!".yellow(), msg);
}

pub fn print_error(msg: &str) {
    eprintln!("{} {}", "✗".red(), msg);
}

pub fn print_skipped(skipped: &[SkippedFile]) {
    for file in skipped {
        print_warning(&format!("Skipped {}: {}", file.path.display(), file.reason));
    }
}

pub fn print_loads(loads: &[TableLoad]) {
    for load in loads {
        match load {
            TableLoad::Loaded { .. } => println!("  {}", describe_load(load)),
            TableLoad::Failed { .. } => print_error(&describe_load(load)),
        }
    }
}

/// One-line description of a table load.
pub fn describe_load(load: &TableLoad) -> String {
    match load {
        TableLoad::Loaded { table, rows } => {
            let noun = if *rows == 1 { "row" } else { "rows" };
            format!("{}: {rows} {noun}", table.cyan())
        }
        TableLoad::Failed { table, reason } => format!("{table}: load failed: {reason}"),
    }
}
