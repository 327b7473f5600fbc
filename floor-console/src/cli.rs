//! Command line definition

use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "floor", version, about = "Restaurant floor administration")]
pub struct Cli {
    /// Backend base URL
    #[arg(long, global = true, env = "FLOOR_API_URL")]
    pub api_url: Option<String>,

    /// Request timeout in seconds
    #[arg(long, global = true, env = "FLOOR_API_TIMEOUT")]
    pub timeout: Option<u64>,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Dining areas
    #[command(subcommand)]
    Zones(ZoneCommand),
    /// Tables across all zones
    #[command(subcommand)]
    Tables(TableCommand),
    /// Customers and seating
    #[command(subcommand)]
    Customers(CustomerCommand),
}

#[derive(Subcommand, Debug)]
pub enum ZoneCommand {
    /// All zones with their occupancy
    List,
    /// One zone: vacant tables first, then occupied ones
    Show { id: String },
    Create { name: String },
    Rename { id: i64, name: String },
    Delete {
        id: i64,
        #[command(flatten)]
        confirm: Confirm,
    },
    /// Available table count per zone
    Stats,
}

#[derive(Subcommand, Debug)]
pub enum TableCommand {
    List {
        /// Only tables without a customer
        #[arg(long)]
        available: bool,
    },
    Show { id: i64 },
    Add {
        #[arg(long)]
        zone: i64,
        #[arg(long)]
        name: String,
        #[arg(long, default_value = "4")]
        capacity: String,
    },
    Edit {
        id: i64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        capacity: Option<String>,
    },
    Delete {
        id: i64,
        #[command(flatten)]
        confirm: Confirm,
    },
}

#[derive(Subcommand, Debug)]
pub enum CustomerCommand {
    List {
        /// Filter on name or phone, case-insensitive
        #[arg(long, default_value = "")]
        search: String,
    },
    /// Seat a new or an existing customer at a vacant table
    Seat {
        table: i64,
        #[command(flatten)]
        who: SeatTarget,
    },
    /// The customer at this table leaves
    Leave { table: i64 },
    Edit {
        id: i64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        phone: Option<String>,
    },
    Delete {
        id: i64,
        #[command(flatten)]
        confirm: Confirm,
    },
}

#[derive(Args, Debug)]
#[group(required = true, multiple = true)]
pub struct SeatTarget {
    /// Existing customer to seat
    #[arg(long, conflicts_with_all = ["name", "phone"])]
    pub customer: Option<i64>,
    #[arg(long, requires = "phone")]
    pub name: Option<String>,
    #[arg(long, requires = "name")]
    pub phone: Option<String>,
}

#[derive(Args, Debug)]
pub struct Confirm {
    /// Skip the confirmation step
    #[arg(long)]
    pub yes: bool,
}
