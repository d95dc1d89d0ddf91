//! Bulk topology loader.
//!
//! The file is a set of tables, each introduced by a header line
//! (`INTERFACES_TABLE`, `NODES_TABLE`, `DEMANDS_TABLE`, `RSVP_LSP_TABLE`)
//! followed by one column-title line and then one row per entity. Tables end
//! at a blank line. Fields are tab separated, or comma separated when a line
//! has no tab. Lines starting with `#` are ignored.

use flowplane::types::constants::DEFAULT_PERCENT_RESERVABLE_BANDWIDTH;
use flowplane::types::{Interface, Node};
use flowplane::{Model, ModelError};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TopologyFileError {
    #[error("Failed to read topology file: {0}")]
    FileReadError(#[from] std::io::Error),
    #[error("Line {line}: {message}")]
    MalformedLine { line: usize, message: String },
    #[error("Line {line}: {field} '{value}' is not valid")]
    InvalidField { line: usize, field: &'static str, value: String },
    #[error("Circuit id '{circuit_id}' appears on {count} interface line(s), expected exactly 2")]
    CircuitIdCount { circuit_id: String, count: usize },
    #[error("Topology rejected by the model: {0}")]
    Model(#[from] ModelError),
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Table {
    Interfaces,
    Nodes,
    Demands,
    Lsps,
}

impl Table {
    fn from_header(line: &str) -> Option<Self> {
        match line {
            "INTERFACES_TABLE" => Some(Table::Interfaces),
            "NODES_TABLE" => Some(Table::Nodes),
            "DEMANDS_TABLE" => Some(Table::Demands),
            "RSVP_LSP_TABLE" => Some(Table::Lsps),
            _ => None,
        }
    }
}

/// A demand row as read from the file
#[derive(Debug, Clone, PartialEq)]
pub struct DemandRow {
    pub source: String,
    pub dest: String,
    pub traffic: f64,
    pub name: Option<String>,
}

/// An LSP row as read from the file
#[derive(Debug, Clone, PartialEq)]
pub struct LspRow {
    pub source: String,
    pub dest: String,
    pub name: String,
}

/// Every table of a topology file, parsed but not yet loaded into a model
#[derive(Debug, Default)]
pub struct TopologyTables {
    pub interfaces: Vec<Interface>,
    pub nodes: Vec<Node>,
    pub demands: Vec<DemandRow>,
    pub lsps: Vec<LspRow>,
}

// ------------------------------------------------------------------------------------------------
// Loading
// ------------------------------------------------------------------------------------------------

/// Read the topology file at `path` into a fresh model seeded with `seed`
pub fn load_topology(path: &Path, seed: u64) -> Result<Model, TopologyFileError> {
    let contents = fs::read_to_string(path)?;
    parse_topology(&contents, seed)
}

/// Parse topology text into a fresh model seeded with `seed`
pub fn parse_topology(contents: &str, seed: u64) -> Result<Model, TopologyFileError> {
    parse_tables(contents)?.into_model(seed)
}

impl TopologyTables {
    /// Build a model from the tables: nodes first, then every interface as one
    /// batch, then demands and LSPs
    pub fn into_model(self, seed: u64) -> Result<Model, TopologyFileError> {
        let mut model = Model::with_seed(seed);
        for node in self.nodes {
            model.add_node(node)?;
        }
        if !self.interfaces.is_empty() {
            model.add_interfaces(self.interfaces)?;
        }
        for demand in &self.demands {
            model.add_demand(&demand.source, &demand.dest, demand.traffic, demand.name.as_deref())?;
        }
        for lsp in &self.lsps {
            model.add_lsp(&lsp.source, &lsp.dest, &lsp.name)?;
        }
        log::info!(
            "Loaded topology: {} nodes, {} interfaces, {} demands, {} LSPs",
            model.nodes().count(),
            model.interfaces().count(),
            model.demands().count(),
            model.lsps().count()
        );
        Ok(model)
    }
}

// ------------------------------------------------------------------------------------------------
// Parsing
// ------------------------------------------------------------------------------------------------

/// Split topology text into its tables and parse every row
pub fn parse_tables(contents: &str) -> Result<TopologyTables, TopologyFileError> {
    let mut tables = TopologyTables::default();
    let mut current: Option<Table> = None;
    let mut expect_titles = false;

    for (index, raw) in contents.lines().enumerate() {
        let line_number = index + 1;
        let line = raw.trim();
        if line.starts_with('#') {
            continue;
        }
        if line.is_empty() {
            current = None;
            continue;
        }
        if let Some(table) = Table::from_header(line) {
            current = Some(table);
            expect_titles = true;
            continue;
        }
        let Some(table) = current else {
            return Err(TopologyFileError::MalformedLine {
                line: line_number,
                message: format!("row outside of any table: '{}'", line),
            });
        };
        if expect_titles {
            expect_titles = false;
            continue;
        }

        let fields = split_fields(line);
        match table {
            Table::Interfaces => tables.interfaces.push(parse_interface(&fields, line_number)?),
            Table::Nodes => tables.nodes.push(parse_node(&fields, line_number)?),
            Table::Demands => tables.demands.push(parse_demand(&fields, line_number)?),
            Table::Lsps => tables.lsps.push(parse_lsp(&fields, line_number)?),
        }
    }

    check_circuit_ids(&tables.interfaces)?;
    Ok(tables)
}

fn split_fields(line: &str) -> Vec<&str> {
    let separator = if line.contains('\t') { '\t' } else { ',' };
    line.split(separator).map(str::trim).collect()
}

fn require_fields(fields: &[&str], minimum: usize, table: &str, line: usize) -> Result<(), TopologyFileError> {
    if fields.len() < minimum || fields[..minimum].iter().any(|field| field.is_empty()) {
        return Err(TopologyFileError::MalformedLine {
            line,
            message: format!("{} rows need at least {} fields, got {}", table, minimum, fields.len()),
        });
    }
    Ok(())
}

fn parse_number<T: FromStr>(value: &str, field: &'static str, line: usize) -> Result<T, TopologyFileError> {
    value.parse().map_err(|_| TopologyFileError::InvalidField {
        line,
        field,
        value: value.to_string(),
    })
}

fn optional<'a>(fields: &[&'a str], index: usize) -> Option<&'a str> {
    fields.get(index).copied().filter(|field| !field.is_empty())
}

/// `node, remote_node, name, cost, capacity[, circuit_id][, rsvp_enabled][, percent_reservable_bandwidth]`
fn parse_interface(fields: &[&str], line: usize) -> Result<Interface, TopologyFileError> {
    require_fields(fields, 5, "Interface", line)?;
    let (node, remote_node, name) = (fields[0], fields[1], fields[2]);
    let cost: u32 = parse_number(fields[3], "cost", line)?;
    let capacity: f64 = parse_number(fields[4], "capacity", line)?;

    // Without an explicit id, the circuit is identified by its endpoints
    let circuit_id = match optional(fields, 5) {
        Some(id) => id.to_string(),
        None if node < remote_node => format!("{}:{}", node, remote_node),
        None => format!("{}:{}", remote_node, node),
    };
    let rsvp_enabled = match optional(fields, 6) {
        Some(value) => parse_bool(value).ok_or_else(|| TopologyFileError::InvalidField {
            line,
            field: "rsvp_enabled",
            value: value.to_string(),
        })?,
        None => true,
    };
    let percent = match optional(fields, 7) {
        Some(value) => parse_number(value, "percent_reservable_bandwidth", line)?,
        None => DEFAULT_PERCENT_RESERVABLE_BANDWIDTH,
    };

    Ok(Interface::new(name, node, remote_node, cost, capacity, circuit_id).with_rsvp(rsvp_enabled, percent))
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "yes" | "1" => Some(true),
        "false" | "no" | "0" => Some(false),
        _ => None,
    }
}

/// `name[, lat][, lon]`; coordinates fall back to 0 when absent or not numeric
fn parse_node(fields: &[&str], line: usize) -> Result<Node, TopologyFileError> {
    require_fields(fields, 1, "Node", line)?;
    let coordinate = |index: usize| optional(fields, index).and_then(|value| value.parse().ok()).unwrap_or(0.0);
    Ok(Node::with_location(fields[0], coordinate(1), coordinate(2)))
}

/// `source, dest, traffic[, name]`
fn parse_demand(fields: &[&str], line: usize) -> Result<DemandRow, TopologyFileError> {
    require_fields(fields, 3, "Demand", line)?;
    Ok(DemandRow {
        source: fields[0].to_string(),
        dest: fields[1].to_string(),
        traffic: parse_number(fields[2], "traffic", line)?,
        name: optional(fields, 3).map(str::to_string),
    })
}

/// `source, dest, name`
fn parse_lsp(fields: &[&str], line: usize) -> Result<LspRow, TopologyFileError> {
    require_fields(fields, 3, "LSP", line)?;
    Ok(LspRow {
        source: fields[0].to_string(),
        dest: fields[1].to_string(),
        name: fields[2].to_string(),
    })
}

/// Every circuit id must be carried by exactly two interface rows
fn check_circuit_ids(interfaces: &[Interface]) -> Result<(), TopologyFileError> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for interface in interfaces {
        *counts.entry(interface.circuit_id.as_str()).or_insert(0) += 1;
    }
    match counts.into_iter().find(|(_, count)| *count != 2) {
        Some((circuit_id, count)) => Err(TopologyFileError::CircuitIdCount {
            circuit_id: circuit_id.to_string(),
            count,
        }),
        None => Ok(()),
    }
}
