//! CLI command definitions.
//!
//! This module defines the structure of all CLI subcommands.

use std::collections::BTreeMap;
use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Subcommand, ValueEnum};

use crate::query::{DateRange, FilterCriteria};
use crate::record::RecordKind;

/// Serve command arguments.
#[derive(Debug, Args)]
pub struct ServeCommand {
    /// Address to bind (overrides configuration)
    #[arg(long)]
    pub host: Option<String>,

    /// Port to bind (overrides configuration)
    #[arg(short, long)]
    pub port: Option<u16>,
}

/// Submit command arguments.
///
/// Every value ends up as a plain string field on the record; the flags
/// only exist so common fields don't need `--field` spelling.
#[derive(Debug, Args)]
pub struct SubmitCommand {
    /// Kind of record to submit
    #[arg(value_enum)]
    pub kind: KindArg,

    /// Employee taking the claim (required for claims; remembered for
    /// the next submission)
    #[arg(long)]
    pub empleado: Option<String>,

    /// Account number (e.g. 1234567/001)
    #[arg(long = "cuenta")]
    pub numero_cuenta: Option<String>,

    /// Resident's full name
    #[arg(long)]
    pub nombre: Option<String>,

    /// Street name
    #[arg(long)]
    pub calle: Option<String>,

    /// Street number
    #[arg(long)]
    pub numero: Option<String>,

    /// Contact email
    #[arg(long)]
    pub email: Option<String>,

    /// Contact phone
    #[arg(long)]
    pub telefono: Option<String>,

    /// Free-form comment
    #[arg(long)]
    pub comentario: Option<String>,

    /// Additional fields as key=value (repeatable)
    #[arg(long = "field", value_name = "KEY=VALUE", value_parser = parse_key_value)]
    pub fields: Vec<(String, String)>,

    /// Base URL of the intake API (overrides configuration)
    #[arg(long)]
    pub server: Option<String>,
}

impl SubmitCommand {
    /// Collect all supplied values into the field map sent to the API.
    #[must_use]
    pub fn to_fields(&self) -> BTreeMap<String, String> {
        let mut fields = BTreeMap::new();

        let named = [
            ("empleado", &self.empleado),
            ("numeroCuenta", &self.numero_cuenta),
            ("nombreApellido", &self.nombre),
            ("calle", &self.calle),
            ("numero", &self.numero),
            ("email", &self.email),
            ("telefono", &self.telefono),
            ("comentario", &self.comentario),
        ];
        for (key, value) in named {
            if let Some(value) = value {
                fields.insert(key.to_string(), value.clone());
            }
        }

        for (key, value) in &self.fields {
            fields.insert(key.clone(), value.clone());
        }

        fields
    }
}

/// List command arguments.
#[derive(Debug, Args)]
pub struct ListCommand {
    /// Keep only records of this kind
    #[arg(short, long, value_enum)]
    pub tipo: Option<KindArg>,

    /// First day of the date filter (requires --hasta)
    #[arg(long, value_name = "YYYY-MM-DD", requires = "hasta")]
    pub desde: Option<NaiveDate>,

    /// Last day of the date filter (requires --desde)
    #[arg(long, value_name = "YYYY-MM-DD", requires = "desde")]
    pub hasta: Option<NaiveDate>,

    /// Keep only records containing this text in some field
    #[arg(short, long)]
    pub buscar: Option<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Keep refreshing the listing until interrupted
    #[arg(short, long)]
    pub watch: bool,

    /// Base URL of the intake API (overrides configuration)
    #[arg(long)]
    pub server: Option<String>,
}

impl ListCommand {
    /// Build filter criteria from the parsed flags.
    #[must_use]
    pub fn criteria(&self) -> FilterCriteria {
        FilterCriteria {
            kind: self.tipo.map(RecordKind::from),
            dates: match (self.desde, self.hasta) {
                (Some(start), Some(end)) => Some(DateRange::new(start, end)),
                _ => None,
            },
            text: self.buscar.clone(),
        }
    }
}

/// Configuration commands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show the configuration file path
    Path,

    /// Validate configuration
    Validate {
        /// Path to configuration file to validate
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}

/// Record kind argument for submitting and filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum KindArg {
    /// A complaint
    Reclamo,
    /// A service request
    Solicitud,
}

impl From<KindArg> for RecordKind {
    fn from(arg: KindArg) -> Self {
        match arg {
            KindArg::Reclamo => Self::Reclamo,
            KindArg::Solicitud => Self::Solicitud,
        }
    }
}

/// Parse a `key=value` pair for `--field`.
fn parse_key_value(s: &str) -> std::result::Result<(String, String), String> {
    match s.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(format!("expected KEY=VALUE, got '{s}'")),
    }
}
