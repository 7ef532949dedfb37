use chrono::{Local, NaiveDate};
use tracing::{debug, error, info, instrument, warn};

use crate::age;
use crate::client::SourceClient;
use crate::error::Result;
use crate::model::fields;

/// Totals for one write-back run. A non-zero `failed` count does not fail
/// the operation; commits are independent per device.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct WriteBackSummary {
    pub updated: usize,
    pub skipped: usize,
    pub failed: usize,
}

/// Computes the whole-month age for every active device that has a birth
/// date but no externally supplied age, and commits it to the source's
/// `age` custom field. Rejected commits are logged and counted; the run
/// carries on with the next device. Only `age` is ever written.
#[instrument(level = "info", skip_all)]
pub fn update_ages(client: &dyn SourceClient) -> Result<WriteBackSummary> {
    update_ages_at(client, Local::now().date_naive())
}

/// [`update_ages`] with an explicit reference date.
pub fn update_ages_at(client: &dyn SourceClient, today: NaiveDate) -> Result<WriteBackSummary> {
    let mut summary = WriteBackSummary::default();

    for device in client.devices() {
        let device = device?;
        if !device.is_active() {
            continue;
        }
        let name = device.display_name().to_string();

        if device.custom_field(fields::AGE).is_some() {
            debug!(device = %name, "age already present, not recomputing");
            summary.skipped += 1;
            continue;
        }
        let Some(birthday) = device
            .custom_field(fields::BIRTHDAY)
            .filter(|birthday| !birthday.is_empty())
        else {
            summary.skipped += 1;
            continue;
        };

        let months = match age::age_in_months(&birthday, today) {
            Ok(months) => months,
            Err(err) => {
                warn!(device = %name, %err, "unusable birth date, skipping write-back");
                summary.skipped += 1;
                continue;
            }
        };

        match client.update_custom_field(device.id, fields::AGE, months as i64) {
            Ok(()) => {
                info!(device = %name, months, "updated age");
                summary.updated += 1;
            }
            Err(err) => {
                error!(device = %name, %err, "write-back rejected, continuing");
                summary.failed += 1;
            }
        }
    }

    info!(
        updated = summary.updated,
        skipped = summary.skipped,
        failed = summary.failed,
        "write-back complete"
    );
    Ok(summary)
}
