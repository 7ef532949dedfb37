use std::collections::VecDeque;

use serde::de::DeserializeOwned;
use tracing::debug;
use ureq::{Agent, AgentBuilder};

use crate::config::Config;
use crate::error::{ExportError, Result};
use crate::model::{Device, Page, Rack};

/// Number of records requested per page.
const PAGE_SIZE: u32 = 50;

/// Lazy stream of device records; transport failures surface as `Err` items.
pub type DeviceStream<'a> = Box<dyn Iterator<Item = Result<Device>> + 'a>;
/// Lazy stream of rack records.
pub type RackStream<'a> = Box<dyn Iterator<Item = Result<Rack>> + 'a>;

/// Boundary to the remote inventory source. Listings are produced lazily so
/// consumers can iterate page by page without holding the whole inventory in
/// memory; the single mutation path is the custom-field commit.
pub trait SourceClient {
    /// Streams every device in the source.
    fn devices(&self) -> DeviceStream<'_>;

    /// Streams every rack in the source.
    fn racks(&self) -> RackStream<'_>;

    /// Streams the devices mounted in the given rack.
    fn devices_in_rack(&self, rack_id: u64) -> DeviceStream<'_>;

    /// Commits a single custom-field value on one device.
    fn update_custom_field(&self, device_id: u64, field: &str, value: i64) -> Result<()>;
}

/// HTTP implementation of [`SourceClient`] against a NetBox REST API.
pub struct NetBoxClient {
    agent: Agent,
    base_url: String,
    token: String,
}

impl NetBoxClient {
    pub fn new(config: &Config) -> Self {
        Self {
            agent: AgentBuilder::new().build(),
            base_url: config.base_url.clone(),
            token: config.token.clone(),
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    fn get_page<T: DeserializeOwned>(&self, url: &str) -> Result<Page<T>> {
        debug!(url, "fetching inventory page");
        let response = self
            .agent
            .get(url)
            .set("Authorization", &format!("Token {}", self.token))
            .set("Accept", "application/json")
            .call()?;
        let body = response
            .into_string()
            .map_err(|error| ExportError::Source(error.to_string()))?;
        Ok(serde_json::from_str(&body)?)
    }

    fn walk<T: DeserializeOwned>(&self, first_url: String) -> PageWalker<'_, T> {
        PageWalker {
            client: self,
            next: Some(first_url),
            buffer: VecDeque::new(),
            failed: false,
        }
    }
}

impl SourceClient for NetBoxClient {
    fn devices(&self) -> DeviceStream<'_> {
        let url = self.endpoint(&format!("/api/dcim/devices/?limit={PAGE_SIZE}"));
        Box::new(self.walk(url))
    }

    fn racks(&self) -> RackStream<'_> {
        let url = self.endpoint(&format!("/api/dcim/racks/?limit={PAGE_SIZE}"));
        Box::new(self.walk(url))
    }

    fn devices_in_rack(&self, rack_id: u64) -> DeviceStream<'_> {
        let url = self.endpoint(&format!(
            "/api/dcim/devices/?rack_id={rack_id}&limit={PAGE_SIZE}"
        ));
        Box::new(self.walk(url))
    }

    fn update_custom_field(&self, device_id: u64, field: &str, value: i64) -> Result<()> {
        let url = self.endpoint(&format!("/api/dcim/devices/{device_id}/"));
        let body = serde_json::json!({ "custom_fields": { field: value } });
        debug!(url, field, value, "committing custom field");
        self.agent
            .request("PATCH", &url)
            .set("Authorization", &format!("Token {}", self.token))
            .set("Accept", "application/json")
            .send_json(body)?;
        Ok(())
    }
}

/// Iterator that follows the `next` link of the pagination envelope, buffering
/// one page at a time. After yielding a transport error it terminates.
struct PageWalker<'a, T> {
    client: &'a NetBoxClient,
    next: Option<String>,
    buffer: VecDeque<T>,
    failed: bool,
}

impl<'a, T: DeserializeOwned> Iterator for PageWalker<'a, T> {
    type Item = Result<T>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(item) = self.buffer.pop_front() {
                return Some(Ok(item));
            }
            if self.failed {
                return None;
            }
            let url = self.next.take()?;
            match self.client.get_page::<T>(&url) {
                Ok(page) => {
                    self.next = page.next;
                    self.buffer.extend(page.results);
                }
                Err(error) => {
                    self.failed = true;
                    return Some(Err(error));
                }
            }
        }
    }
}
