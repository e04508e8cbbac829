//! DPD service endpoints and namespaces.
//!
//! Every service lives below one base URL per environment. The WSDL URLs are
//! kept for reference; the client never fetches them.

use dpd_config::DpdConfig;

pub const LIVE_BASE_URL: &str = "https://wsshipper.dpd.nl/soap";
pub const STAGING_BASE_URL: &str = "https://shipperadmintest.dpd.nl/PublicAPI";

/// Namespace of the `authentication` SOAP header sent with every call after login.
pub const AUTHENTICATION_NS: &str = "http://dpd.com/common/service/types/Authentication/2.0";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Live,
    Staging,
}

impl Environment {
    pub fn base_url(&self) -> &'static str {
        match self {
            Environment::Live => LIVE_BASE_URL,
            Environment::Staging => STAGING_BASE_URL,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DpdService {
    Login,
    Shipment,
    ParcelLifeCycle,
}

impl DpdService {
    pub fn path(&self) -> &'static str {
        match self {
            DpdService::Login => "services/LoginService/V2_1/",
            DpdService::Shipment => "services/ShipmentService/V3_3/",
            DpdService::ParcelLifeCycle => "services/ParcelLifeCycleService/V2_0/",
        }
    }

    pub fn namespace(&self) -> &'static str {
        match self {
            DpdService::Login => "http://dpd.com/common/service/types/LoginService/2.1",
            DpdService::Shipment => "http://dpd.com/common/service/types/ShipmentService/3.3",
            DpdService::ParcelLifeCycle => {
                "http://dpd.com/common/service/types/ParcelLifeCycleService/2.0"
            }
        }
    }

    pub fn wsdl_file(&self) -> &'static str {
        match self {
            DpdService::Login => "LoginServiceV21.wsdl",
            DpdService::Shipment => "ShipmentServiceV33.wsdl",
            DpdService::ParcelLifeCycle => "ParcelLifecycleServiceV20.wsdl",
        }
    }

    /// Name used in logs and error messages.
    pub fn name(&self) -> &'static str {
        match self {
            DpdService::Login => "DPD LoginService",
            DpdService::Shipment => "DPD ShipmentService",
            DpdService::ParcelLifeCycle => "DPD ParcelLifeCycleService",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    base_url: String,
}

impl Endpoints {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn for_environment(environment: Environment) -> Self {
        Self::new(environment.base_url())
    }

    /// `base_url` from the config wins over the staging flag.
    pub fn from_config(config: &DpdConfig) -> Self {
        match config.base_url.as_deref() {
            Some(base_url) if !base_url.is_empty() => Self::new(base_url),
            _ if config.staging => Self::for_environment(Environment::Staging),
            _ => Self::for_environment(Environment::Live),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn service_url(&self, service: DpdService) -> String {
        format!("{}/{}", self.base_url, service.path())
    }

    pub fn wsdl_url(&self, service: DpdService) -> String {
        format!("{}/WSDL/{}", self.base_url, service.wsdl_file())
    }
}
