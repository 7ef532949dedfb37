use chrono::NaiveDate;
use tracing::warn;

use crate::age;
use crate::model::{Device, fields};

/// Fixed column order of the device report, shared by the delimited file and
/// the device workbook.
pub const REPORT_COLUMNS: [&str; 17] = [
    "Name",
    "Status",
    "Site",
    "Rack",
    "Role",
    "Manufacturer",
    "Type",
    "Owner",
    "Birthday",
    "Age (Months)",
    "Service Contract",
    "Warranty",
    "Serial Number",
    "Platform",
    "Software",
    "SW_Version",
    "Primary IP",
];

/// One report line with exactly one cell per entry in [`REPORT_COLUMNS`].
/// Absent optional attributes are the empty string, never a sentinel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedRow {
    pub cells: Vec<String>,
}

/// Outcome of normalising one device. Missing structurally required
/// relations produce a skip with a recorded reason instead of an error, so
/// the aggregator can decide inclusion explicitly.
#[derive(Debug)]
pub enum RowOutcome {
    Row(NormalizedRow),
    Skipped { device: String, reason: SkipReason },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    MissingRole,
    MissingManufacturer,
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::MissingRole => write!(f, "device has no role"),
            SkipReason::MissingManufacturer => write!(f, "device type has no manufacturer"),
        }
    }
}

/// Maps one device onto the fixed report schema. Role and the manufacturer
/// reached through the device type are required; everything else defaults
/// to the empty string when absent.
pub fn normalize_device(device: &Device, today: NaiveDate) -> RowOutcome {
    let name = device.display_name().to_string();

    let role = match device.role.as_ref().map(ref_label) {
        Some(role) if !role.is_empty() => role,
        _ => {
            return RowOutcome::Skipped {
                device: name,
                reason: SkipReason::MissingRole,
            };
        }
    };

    let manufacturer = match device
        .device_type
        .as_ref()
        .and_then(|device_type| device_type.manufacturer.as_ref())
        .map(ref_label)
    {
        Some(manufacturer) if !manufacturer.is_empty() => manufacturer,
        _ => {
            return RowOutcome::Skipped {
                device: name,
                reason: SkipReason::MissingManufacturer,
            };
        }
    };

    let birthday = device.custom_field(fields::BIRTHDAY).unwrap_or_default();
    let age_cell = match device.custom_field(fields::AGE) {
        // An externally supplied age always wins; it is reported verbatim.
        Some(age) => age,
        None if !birthday.is_empty() => match age::age_in_months(&birthday, today) {
            Ok(months) => months.to_string(),
            Err(error) => {
                warn!(device = %name, %error, "could not derive age, leaving cell empty");
                String::new()
            }
        },
        None => String::new(),
    };

    let cells = vec![
        name,
        device
            .status
            .as_ref()
            .map(|status| status.label().to_string())
            .unwrap_or_default(),
        device.site.as_ref().map(ref_label).unwrap_or_default(),
        device.rack.as_ref().map(ref_label).unwrap_or_default(),
        role,
        manufacturer,
        device
            .device_type
            .as_ref()
            .map(|device_type| device_type.label().to_string())
            .unwrap_or_default(),
        device.custom_field(fields::OWNER).unwrap_or_default(),
        birthday,
        age_cell,
        device
            .custom_field(fields::SERVICE_CONTRACT)
            .unwrap_or_default(),
        device.custom_field(fields::WARRANTY).unwrap_or_default(),
        device.serial.clone(),
        device
            .platform
            .as_ref()
            .map(ref_label)
            .unwrap_or_default(),
        device.custom_field(fields::SOFTWARE).unwrap_or_default(),
        device
            .custom_field(fields::SOFTWARE_VERSION)
            .unwrap_or_default(),
        device
            .primary_ip
            .as_ref()
            .map(ref_label)
            .unwrap_or_default(),
    ];

    debug_assert_eq!(cells.len(), REPORT_COLUMNS.len());
    RowOutcome::Row(NormalizedRow { cells })
}

fn ref_label(reference: &crate::model::ObjectRef) -> String {
    reference.label().to_string()
}
