//! CLI definition using clap

use clap::{Parser, Subcommand};
use freight_app::config::IdStyle;
use std::path::PathBuf;

pub use freight_types::OutputFormat;

#[derive(Parser)]
#[command(name = "freight-planner")]
#[command(version)]
#[command(about = "Transport company fleet registry and cargo distribution planner")]
#[command(long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// State file to use instead of the configured one
    #[arg(long, global = true)]
    pub state: Option<PathBuf>,

    /// Output format (json, table). Uses config value if not specified.
    #[arg(long, short = 'f', global = true)]
    pub format: Option<OutputFormat>,

    /// Verbose output (debug logging)
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Register a client
    AddClient {
        /// Client name
        name: String,

        /// Cargo weight in tonnes
        #[arg(long, short = 'w')]
        weight: f64,

        /// Mark the client as VIP
        #[arg(long)]
        vip: bool,
    },

    /// Register a truck
    AddTruck {
        /// Capacity in tonnes
        #[arg(long, short = 'c')]
        capacity: f64,

        /// Truck color
        #[arg(long)]
        color: String,
    },

    /// Register a train
    AddTrain {
        /// Capacity in tonnes
        #[arg(long, short = 'c')]
        capacity: f64,

        /// Number of cars
        #[arg(long)]
        cars: u32,
    },

    /// Edit a client by its position in `clients`
    EditClient {
        /// Client number (1-based, as listed)
        number: usize,

        /// New name
        #[arg(long)]
        name: Option<String>,

        /// New cargo weight in tonnes
        #[arg(long, short = 'w')]
        weight: Option<f64>,

        /// New VIP status
        #[arg(long)]
        vip: Option<bool>,
    },

    /// Edit a vehicle by its position in `vehicles`; its id is kept
    EditVehicle {
        /// Vehicle number (1-based, as listed)
        number: usize,

        /// New capacity in tonnes
        #[arg(long, short = 'c')]
        capacity: Option<f64>,

        /// New color (trucks only)
        #[arg(long)]
        color: Option<String>,

        /// New number of cars (trains only)
        #[arg(long)]
        cars: Option<u32>,
    },

    /// Remove a client
    RemoveClient {
        /// Client number (1-based, as listed)
        number: usize,
    },

    /// Remove a vehicle
    RemoveVehicle {
        /// Vehicle number (1-based, as listed)
        number: usize,
    },

    /// List registered clients
    Clients {
        /// Only clients whose name contains this text
        #[arg(long)]
        filter: Option<String>,
    },

    /// List registered vehicles
    Vehicles {
        /// Only vehicles whose id or type contains this text
        #[arg(long)]
        filter: Option<String>,
    },

    /// Distribute cargo across the fleet
    Distribute,

    /// Show the distribution report
    Report {
        /// Write the report text to a file
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,

        /// Write the report to an Excel workbook
        #[arg(long)]
        excel: Option<PathBuf>,
    },

    /// Append vehicles from a TOML fleet file
    ImportFleet {
        /// Path to fleet file
        file: PathBuf,
    },

    /// Append clients from a CSV file (name,cargo_weight,is_vip)
    ImportClients {
        /// Path to CSV file
        file: PathBuf,
    },

    /// Save the current state to another file
    SaveAs {
        /// Destination JSON file
        file: PathBuf,
    },

    /// Replace the current state with a saved file
    Open {
        /// Source JSON file
        file: PathBuf,
    },

    /// Remove every client and vehicle
    Reset {
        /// Do not ask for confirmation
        #[arg(long, short = 'y')]
        yes: bool,
    },

    /// Manage configuration
    Config {
        /// Show current configuration
        #[arg(long)]
        show: bool,

        /// Set company name used for new state
        #[arg(long)]
        set_company: Option<String>,

        /// Set default output format
        #[arg(long)]
        set_output: Option<OutputFormat>,

        /// Set state file location
        #[arg(long)]
        set_state_file: Option<PathBuf>,

        /// Set vehicle id style
        #[arg(long)]
        set_id_style: Option<IdStyle>,

        /// Set log filter (e.g. info, debug, freight_domain=debug)
        #[arg(long)]
        set_log_level: Option<String>,

        /// Reset to defaults
        #[arg(long)]
        reset: bool,
    },

    /// Interactive console menu
    Menu,
}
