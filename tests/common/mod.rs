//! Shared test infrastructure for reconciliation integration tests.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::StatusCode;

use pfsense_dns_sync::client::{ApiResponse, Transport};
use pfsense_dns_sync::config::SyncConfig;
use pfsense_dns_sync::error::SyncError;

// --- Constants ---

pub const DOMAIN: &str = "proxmox.local";
pub const OVERRIDE_PATH: &str = "/api/v2/services/dns_resolver/host_override";
pub const LEASES_PATH: &str = "/api/v2/status/dhcp_server/leases?limit=0&offset=0";

// --- Envelope builders ---

/// Success envelope for one override lookup.
pub fn override_envelope(id: u32, host: &str, ip: &str) -> serde_json::Value {
    serde_json::json!({
        "code": 200,
        "status": "ok",
        "response_id": "SUCCESS",
        "message": "",
        "data": {
            "id": id,
            "host": host,
            "domain": DOMAIN,
            "ip": [ip],
            "descr": format!("{} Proxmox VM", host),
            "aliases": []
        }
    })
}

/// The appliance's "no such override" envelope: HTTP 200, non-200 code,
/// array-shaped data.
pub fn not_found_envelope() -> serde_json::Value {
    serde_json::json!({
        "code": 404,
        "status": "not found",
        "response_id": "NOT_FOUND",
        "message": "Object does not exist",
        "data": []
    })
}

/// Lease listing envelope from `(ip, hostname)` pairs.
pub fn leases_envelope(leases: &[(&str, &str)]) -> serde_json::Value {
    let data: Vec<serde_json::Value> = leases
        .iter()
        .enumerate()
        .map(|(i, (ip, hostname))| {
            serde_json::json!({
                "id": i,
                "ip": ip,
                "mac": "aa:bb:cc:dd:ee:ff",
                "hostname": hostname,
                "if": null,
                "starts": "2024-01-01 00:00:00",
                "ends": "2024-01-02 00:00:00",
                "active_status": "active",
                "online_status": "online",
                "descr": null
            })
        })
        .collect();

    serde_json::json!({
        "code": 200,
        "status": "ok",
        "response_id": "SUCCESS",
        "message": "",
        "data": data
    })
}

fn json_response(value: &serde_json::Value) -> ApiResponse {
    ApiResponse {
        status: StatusCode::OK,
        body: Bytes::from(serde_json::to_vec(value).unwrap()),
    }
}

fn transport_failure() -> SyncError {
    SyncError::Io(std::io::Error::new(
        std::io::ErrorKind::ConnectionRefused,
        "scripted transport failure",
    ))
}

// --- Scripted transport ---

/// Script for one override-lookup probe.
#[derive(Debug, Clone)]
pub enum Probe {
    /// ID exists: success envelope with this `(host, ip)`.
    Found(&'static str, &'static str),
    /// The call fails at the transport level.
    TransportError,
    /// The call returns a body that decodes as neither envelope shape.
    Garbage,
}

/// Script for the lease-listing call.
#[derive(Debug, Clone)]
pub enum LeaseScript {
    /// Return these `(ip, hostname)` leases with code 200.
    Leases(Vec<(&'static str, &'static str)>),
    /// Return a well-formed envelope with this non-200 code.
    RemoteStatus(i64),
    /// Fail at the transport level.
    TransportError,
}

struct Inner {
    probes: Vec<Probe>,
    /// When true, every ID beyond the scripted probes also reports Found,
    /// so the enumeration never sees a terminator.
    bottomless: bool,
    lease_script: LeaseScript,
    fail_posts: bool,
    posts: Mutex<Vec<serde_json::Value>>,
    highest_probed_id: AtomicU32,
    probe_calls: AtomicU32,
}

/// In-memory [`Transport`] double driven by per-ID scripts.
///
/// Clones share state, so a clone kept by the test observes the calls made
/// through the clone handed to the reconciler.
#[derive(Clone)]
pub struct ScriptedTransport {
    inner: Arc<Inner>,
}

impl ScriptedTransport {
    pub fn new(probes: Vec<Probe>, lease_script: LeaseScript) -> Self {
        Self {
            inner: Arc::new(Inner {
                probes,
                bottomless: false,
                lease_script,
                fail_posts: false,
                posts: Mutex::new(Vec::new()),
                highest_probed_id: AtomicU32::new(0),
                probe_calls: AtomicU32::new(0),
            }),
        }
    }

    /// Existing overrides only, empty lease table.
    pub fn with_overrides(probes: Vec<Probe>) -> Self {
        Self::new(probes, LeaseScript::Leases(Vec::new()))
    }

    /// A transport whose override table never ends.
    pub fn bottomless() -> Self {
        let mut transport = Self::with_overrides(Vec::new());
        Arc::get_mut(&mut transport.inner).unwrap().bottomless = true;
        transport
    }

    /// Make every override-creation POST fail at the transport level.
    pub fn failing_posts(mut self) -> Self {
        Arc::get_mut(&mut self.inner).unwrap().fail_posts = true;
        self
    }

    /// Bodies of all override-creation POSTs, in order.
    pub fn posts(&self) -> Vec<serde_json::Value> {
        self.inner.posts.lock().unwrap().clone()
    }

    /// Highest override ID the enumerator asked for.
    pub fn highest_probed_id(&self) -> u32 {
        self.inner.highest_probed_id.load(Ordering::SeqCst)
    }

    /// Total number of override-lookup calls made.
    pub fn probe_calls(&self) -> u32 {
        self.inner.probe_calls.load(Ordering::SeqCst)
    }

    fn probe(&self, id: u32) -> Result<ApiResponse, SyncError> {
        self.inner.probe_calls.fetch_add(1, Ordering::SeqCst);
        self.inner.highest_probed_id.fetch_max(id, Ordering::SeqCst);

        let script = match self.inner.probes.get(id as usize) {
            Some(script) => script.clone(),
            None if self.inner.bottomless => Probe::Found("phantom", "10.255.0.1"),
            None => return Ok(json_response(&not_found_envelope())),
        };

        match script {
            Probe::Found(host, ip) => Ok(json_response(&override_envelope(id, host, ip))),
            Probe::TransportError => Err(transport_failure()),
            Probe::Garbage => Ok(ApiResponse {
                status: StatusCode::OK,
                body: Bytes::from_static(b"<html>definitely not json</html>"),
            }),
        }
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn get(&self, path: &str) -> Result<ApiResponse, SyncError> {
        if let Some(id) = path.strip_prefix(OVERRIDE_PATH).and_then(|rest| {
            rest.strip_prefix("?id=")
                .and_then(|id| id.parse::<u32>().ok())
        }) {
            return self.probe(id);
        }

        if path == LEASES_PATH {
            return match &self.inner.lease_script {
                LeaseScript::Leases(leases) => Ok(json_response(&leases_envelope(leases))),
                LeaseScript::RemoteStatus(code) => Ok(json_response(&serde_json::json!({
                    "code": code,
                    "status": "error",
                    "response_id": "FAIL",
                    "message": "lease listing unavailable",
                    "data": []
                }))),
                LeaseScript::TransportError => Err(transport_failure()),
            };
        }

        panic!("unexpected GET path in test: {}", path);
    }

    async fn post_json(
        &self,
        path: &str,
        body: serde_json::Value,
    ) -> Result<ApiResponse, SyncError> {
        assert_eq!(path, OVERRIDE_PATH, "unexpected POST path in test");

        self.inner.posts.lock().unwrap().push(body);

        if self.inner.fail_posts {
            return Err(transport_failure());
        }

        Ok(json_response(&serde_json::json!({
            "code": 200,
            "status": "ok",
            "response_id": "SUCCESS",
            "message": "",
            "data": {}
        })))
    }
}

// --- Config builder ---

pub fn test_sync_config() -> SyncConfig {
    SyncConfig {
        interval_secs: 1,
        domain: DOMAIN.to_string(),
        max_override_id: 10_000,
    }
}
