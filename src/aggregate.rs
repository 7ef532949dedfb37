use chrono::{Local, NaiveDate};
use tracing::{info, instrument, warn};

use crate::client::SourceClient;
use crate::error::Result;
use crate::model::Device;
use crate::normalize::{self, NormalizedRow, REPORT_COLUMNS, RowOutcome};

/// Placeholder rendered in the rack report when a device has no role, type,
/// manufacturer, or assigned position. Deliberately distinct from the device
/// report's empty-string default.
pub const NOT_ASSIGNED: &str = "N/A";

/// Column order of each rack sheet.
pub const RACK_COLUMNS: [&str; 5] = ["Device Name", "Role", "Type", "Manufacturer", "Rack Unit"];

/// Device report accumulated in source iteration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportTable {
    pub columns: Vec<String>,
    pub rows: Vec<NormalizedRow>,
}

impl ReportTable {
    fn new() -> Self {
        Self {
            columns: REPORT_COLUMNS.iter().map(|column| column.to_string()).collect(),
            rows: Vec::new(),
        }
    }
}

/// Per-device summary line of the rack report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RackDeviceSummary {
    pub name: String,
    pub role: String,
    pub device_type: String,
    pub manufacturer: String,
    pub rack_unit: String,
}

impl RackDeviceSummary {
    pub fn cells(&self) -> [&str; 5] {
        [
            &self.name,
            &self.role,
            &self.device_type,
            &self.manufacturer,
            &self.rack_unit,
        ]
    }
}

/// One rack with its device summaries, in source iteration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RackGroup {
    pub rack: String,
    pub devices: Vec<RackDeviceSummary>,
}

/// Builds the device report from the source: keeps devices whose status is
/// exactly `Active`, normalises each one, and accumulates rows in iteration
/// order. Rows missing a required relation are skipped with a diagnostic.
#[instrument(level = "info", skip_all)]
pub fn collect_devices(client: &dyn SourceClient) -> Result<ReportTable> {
    collect_devices_at(client, Local::now().date_naive())
}

/// [`collect_devices`] with an explicit reference date for age derivation.
pub fn collect_devices_at(client: &dyn SourceClient, today: NaiveDate) -> Result<ReportTable> {
    let mut table = ReportTable::new();
    let mut skipped = 0usize;

    for device in client.devices() {
        let device = device?;
        if !device.is_active() {
            continue;
        }
        match normalize::normalize_device(&device, today) {
            RowOutcome::Row(row) => {
                info!(device = row.cells[0].as_str(), "processed device");
                table.rows.push(row);
            }
            RowOutcome::Skipped { device, reason } => {
                warn!(%device, %reason, "skipping device row");
                skipped += 1;
            }
        }
    }

    info!(rows = table.rows.len(), skipped, "device aggregation complete");
    Ok(table)
}

/// Groups devices by rack: one rack-scoped listing per rack, each device
/// reduced to its five summary cells. Unlike the device report, missing
/// values here render as [`NOT_ASSIGNED`].
#[instrument(level = "info", skip_all)]
pub fn collect_racks(client: &dyn SourceClient) -> Result<Vec<RackGroup>> {
    let mut groups = Vec::new();

    for rack in client.racks() {
        let rack = rack?;
        let mut devices = Vec::new();
        for device in client.devices_in_rack(rack.id) {
            let device = device?;
            devices.push(summarize_device(&device));
        }
        info!(rack = rack.name.as_str(), devices = devices.len(), "rack collected");
        groups.push(RackGroup {
            rack: rack.name,
            devices,
        });
    }

    info!(racks = groups.len(), "rack aggregation complete");
    Ok(groups)
}

fn summarize_device(device: &Device) -> RackDeviceSummary {
    RackDeviceSummary {
        name: or_not_assigned(Some(device.display_name().to_string())),
        role: or_not_assigned(device.role.as_ref().map(|role| role.label().to_string())),
        device_type: or_not_assigned(
            device
                .device_type
                .as_ref()
                .map(|device_type| device_type.label().to_string()),
        ),
        manufacturer: or_not_assigned(
            device
                .device_type
                .as_ref()
                .and_then(|device_type| device_type.manufacturer.as_ref())
                .map(|manufacturer| manufacturer.label().to_string()),
        ),
        rack_unit: or_not_assigned(device.position.map(format_position)),
    }
}

fn or_not_assigned(value: Option<String>) -> String {
    match value {
        Some(value) if !value.is_empty() => value,
        _ => NOT_ASSIGNED.to_string(),
    }
}

/// Rack units are whole numbers in the common case but the source allows
/// half-unit positions.
fn format_position(position: f64) -> String {
    if position.fract() == 0.0 {
        format!("{}", position as i64)
    } else {
        position.to_string()
    }
}
