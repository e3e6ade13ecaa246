use anyhow::{Context, anyhow};
use clap::{Parser, Subcommand};

mod chart;
mod filter;
mod model;
mod render;
mod series;
mod snapshot;
mod table;

pub type Result<T> = anyhow::Result<T>;

#[derive(Parser)]
#[command(name = "alloc-dashboard")]
#[command(about = "Object allocation snapshot dashboard", long_about = None)]
struct Cli {
    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the HTML dashboard for a snapshot file.
    Report {
        #[arg(long)]
        snapshots: String,

        #[arg(short = 'o', long)]
        out: String,

        /// Radix for sorting numeric columns (10 or 16).
        #[arg(long, default_value_t = 10)]
        sort_radix: u32,

        /// Pre-sort the table by this column index.
        #[arg(long)]
        sort_by: Option<usize>,

        #[arg(long, requires = "sort_by")]
        desc: bool,
    },

    /// Print rows passing the filters, tab-separated.
    Filter {
        #[arg(long)]
        snapshots: String,

        /// Substring the type name must contain.
        #[arg(long = "type", default_value = "")]
        type_name: String,

        /// Substring the allocating function must contain.
        #[arg(long, default_value = "")]
        function: String,

        /// Extra constraint as `<column index>=<needle>`; repeatable.
        #[arg(long = "column", value_parser = parse_column_filter)]
        columns: Vec<(usize, String)>,
    },

    /// Print the chart for one (type, size) series as JSON.
    Series {
        #[arg(long)]
        snapshots: String,

        #[arg(long = "type")]
        type_name: String,

        #[arg(long)]
        size: String,
    },
}

fn parse_column_filter(s: &str) -> std::result::Result<(usize, String), String> {
    let (index, needle) = s
        .split_once('=')
        .ok_or_else(|| format!("expected <index>=<needle>, got {:?}", s))?;
    let index = index
        .trim()
        .parse::<usize>()
        .map_err(|e| format!("bad column index {:?}: {}", index, e))?;
    Ok((index, needle.to_string()))
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match cli.cmd {
        Commands::Report {
            snapshots,
            out,
            sort_radix,
            sort_by,
            desc,
        } => {
            let radix = table::NumericRadix::from_base(sort_radix)
                .ok_or_else(|| anyhow!("unsupported sort radix {} (use 10 or 16)", sort_radix))?;

            // 1) Load and flatten snapshots.
            let mut rows = snapshot::load_snapshot_file(&snapshots)?;

            // 2) Optional initial ordering; series follow the table order.
            if let Some(index) = sort_by {
                let column = table::Column::from_index(index)?;
                let order = if desc {
                    table::SortOrder::Descending
                } else {
                    table::SortOrder::Ascending
                };
                table::sort_rows(&mut rows, column, order, radix);
            }

            // 3) Build model + render.
            let config = model::DashboardConfig {
                radix,
                ..model::DashboardConfig::default()
            };
            let data = model::build_dashboard_data(&rows, &config);
            let html = render::render_html_dashboard(&data)?;
            std::fs::write(&out, html).with_context(|| format!("write dashboard {}", out))?;
            log::info!(
                "wrote {} ({} rows, {} series)",
                out,
                data.totals.rows,
                data.totals.series
            );
        }

        Commands::Filter {
            snapshots,
            type_name,
            function,
            columns,
        } => {
            let rows = snapshot::load_snapshot_file(&snapshots)?;

            let mut spec = filter::FilterSpec::dashboard(&type_name, &function);
            for (index, needle) in columns {
                spec = spec.with_index(index, needle)?;
            }

            let headers: Vec<&str> = table::Column::ALL.iter().map(|c| c.title()).collect();
            println!("{}", headers.join("\t"));
            for row in filter::visible_rows(&rows, &spec) {
                println!("{}", row.cells().join("\t"));
            }
        }

        Commands::Series {
            snapshots,
            type_name,
            size,
        } => {
            let rows = snapshot::load_snapshot_file(&snapshots)?;
            let key = series::SeriesKey::new(type_name, size);

            let stdout = std::io::stdout();
            let mut session = chart::ChartSession::new(chart::JsonRenderer::new(stdout.lock()));
            session.show_series(&rows, &key)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn column_filter_argument_parses() {
        assert_eq!(parse_column_filter("6=alloc"), Ok((6, "alloc".to_string())));
        assert_eq!(parse_column_filter("1="), Ok((1, String::new())));
        assert_eq!(parse_column_filter("2=a=b"), Ok((2, "a=b".to_string())));
        assert!(parse_column_filter("x=1").is_err());
        assert!(parse_column_filter("nothing").is_err());
    }

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
