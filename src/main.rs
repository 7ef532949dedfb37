use std::path::PathBuf;

use clap::{Parser, Subcommand};
use netbox_export::client::NetBoxClient;
use netbox_export::config::Config;
use netbox_export::{ExportError, Result, aggregate, sink, writeback};
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();
    if let Err(error) = run(cli) {
        eprintln!("error: {error}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    init_logging()?;
    let config = Config::from_env()?;
    let client = NetBoxClient::new(&config);

    match cli.command {
        Command::ExportDevices(args) => export_devices(&client, args),
        Command::UpdateAges => update_ages(&client),
        Command::ExportRacks(args) => export_racks(&client, args),
    }
}

fn init_logging() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .map_err(|error| ExportError::Logging(error.to_string()))
}

fn export_devices(client: &NetBoxClient, args: ExportDevicesArgs) -> Result<()> {
    let table = aggregate::collect_devices(client)?;
    sink::delimited::append_report(&args.csv, &table)?;
    sink::excel::write_device_workbook(&args.workbook, &table)?;
    Ok(())
}

fn update_ages(client: &NetBoxClient) -> Result<()> {
    // A summary with failed commits still exits 0; only aborts are fatal.
    writeback::update_ages(client)?;
    Ok(())
}

fn export_racks(client: &NetBoxClient, args: ExportRacksArgs) -> Result<()> {
    let groups = aggregate::collect_racks(client)?;
    sink::excel::write_rack_workbook(&args.workbook, &groups)?;
    Ok(())
}

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Export NetBox device and rack inventory to CSV and Excel reports.",
    arg_required_else_help = true
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Export active devices to the delimited report and the device workbook.
    #[command(visible_alias = "devices")]
    ExportDevices(ExportDevicesArgs),

    /// Recompute equipment age and write it back to the source system.
    #[command(visible_alias = "ages")]
    UpdateAges,

    /// Export racks and their mounted devices, one workbook sheet per rack.
    #[command(visible_alias = "racks")]
    ExportRacks(ExportRacksArgs),
}

#[derive(clap::Args)]
struct ExportDevicesArgs {
    /// Delimited report path; rows are appended on every run.
    #[arg(long, default_value = "output.csv")]
    csv: PathBuf,

    /// Device workbook path; overwritten on every run.
    #[arg(long, default_value = "output.xlsx")]
    workbook: PathBuf,
}

#[derive(clap::Args)]
struct ExportRacksArgs {
    /// Rack workbook path; overwritten on every run.
    #[arg(long, default_value = "rack_details_with_devices.xlsx")]
    workbook: PathBuf,
}
