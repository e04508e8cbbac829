// --- File: crates/dpd_shipment/src/models.rs ---

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use dpd_config::ShipmentDefaults;

use crate::error::ShipmentError;

/// Destinations where DPD offers the Predict (B2C notification) service.
pub const PREDICT_COUNTRIES: [&str; 25] = [
    "BE", "NL", "DE", "AT", "PL", "FR", "PT", "GB", "LU", "EE", "CH", "IE", "SK", "LV", "SI",
    "LT", "CZ", "HU", "HR", "ES", "IT", "DK", "FI", "SE", "NO",
];

pub const TRACKING_URL: &str = "https://tracking.dpd.de/parcelstatus?locale=:lang&query=:awb";

pub fn is_predict_country(country: &str) -> bool {
    PREDICT_COUNTRIES.contains(&country.to_uppercase().as_str())
}

/// Public tracking page of a parcel.
pub fn tracking_link(language: Option<&str>, air_way_bill: &str) -> String {
    TRACKING_URL
        .replace(":lang", language.unwrap_or_default())
        .replace(":awb", air_way_bill)
}

// --- Inputs ---

/// A parcel as described by the caller. Weight in grams, dimensions in cm.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ParcelSpec {
    #[cfg_attr(feature = "openapi", schema(example = 2350.0))]
    pub weight: f64,
    #[cfg_attr(feature = "openapi", schema(example = 40.0))]
    pub length: f64,
    #[cfg_attr(feature = "openapi", schema(example = 30.0))]
    pub width: f64,
    #[cfg_attr(feature = "openapi", schema(example = 15.5))]
    pub height: f64,
    /// Return parcel; DPD swaps sender and recipient.
    #[serde(default)]
    pub returns: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct PredictSpec {
    /// `email`, `telephone` or `sms`
    #[cfg_attr(feature = "openapi", schema(example = "email"))]
    pub channel: String,
    #[cfg_attr(feature = "openapi", schema(example = "jan@example.nl"))]
    pub value: String,
    #[cfg_attr(feature = "openapi", schema(example = "nl"))]
    pub language: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PredictChannel {
    Email,
    Telephone,
    Sms,
}

impl PredictChannel {
    /// Numeric channel code used by the ShipmentService.
    pub fn code(self) -> u8 {
        match self {
            PredictChannel::Email => 1,
            PredictChannel::Telephone => 2,
            PredictChannel::Sms => 3,
        }
    }
}

impl FromStr for PredictChannel {
    type Err = ShipmentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "email" => Ok(PredictChannel::Email),
            "telephone" => Ok(PredictChannel::Telephone),
            "sms" => Ok(PredictChannel::Sms),
            other => Err(ShipmentError::PredictChannelNotAllowed(other.to_string())),
        }
    }
}

/// A validated Predict notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Predict {
    pub channel: PredictChannel,
    pub value: String,
    pub language: String,
}

/// Sender or recipient. Unset fields are not sent.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(default)]
pub struct Address {
    pub name1: Option<String>,
    pub name2: Option<String>,
    pub street: Option<String>,
    pub house_no: Option<String>,
    pub state: Option<String>,
    pub country: Option<String>,
    pub zip_code: Option<String>,
    pub city: Option<String>,
    pub gln: Option<String>,
    pub customer_number: Option<String>,
    pub contact: Option<String>,
    pub phone: Option<String>,
    pub fax: Option<String>,
    pub email: Option<String>,
    pub comment: Option<String>,
}

macro_rules! merge_fields {
    ($target:expr, $patch:expr, $($field:ident),+ $(,)?) => {
        $(
            if $patch.$field.is_some() {
                $target.$field = $patch.$field;
            }
        )+
    };
}

impl Address {
    /// Overwrites every field that is set in `patch`.
    pub fn merge(&mut self, patch: Address) {
        merge_fields!(
            self, patch, name1, name2, street, house_no, state, country, zip_code, city, gln,
            customer_number, contact, phone, fax, email, comment,
        );
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(default)]
pub struct GeneralShipmentDataPatch {
    pub sending_depot: Option<String>,
    /// DPD product code, e.g. `CL` (Classic) or `E830` (Express 8:30)
    pub product: Option<String>,
    pub mps_customer_reference_number1: Option<String>,
    pub mps_customer_reference_number2: Option<String>,
    pub sender: Option<Address>,
    pub recipient: Option<Address>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(default)]
pub struct PrintOptionsPatch {
    pub printer_language: Option<String>,
    pub paper_format: Option<String>,
    pub start_position: Option<String>,
}

// --- Order message ---

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrintOptions {
    pub printer_language: String,
    pub paper_format: String,
    pub start_position: String,
}

impl PrintOptions {
    pub fn from_defaults(defaults: &ShipmentDefaults) -> Self {
        Self {
            printer_language: defaults.printer_language.clone(),
            paper_format: defaults.paper_format.clone(),
            start_position: defaults.start_position.clone(),
        }
    }

    pub fn merge(&mut self, patch: PrintOptionsPatch) {
        if let Some(v) = patch.printer_language {
            self.printer_language = v;
        }
        if let Some(v) = patch.paper_format {
            self.paper_format = v;
        }
        if let Some(v) = patch.start_position {
            self.start_position = v;
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GeneralShipmentData {
    pub sending_depot: String,
    pub product: Option<String>,
    pub mps_customer_reference_number1: Option<String>,
    pub mps_customer_reference_number2: Option<String>,
    pub sender: Address,
    pub recipient: Address,
}

impl GeneralShipmentData {
    pub fn merge(&mut self, patch: GeneralShipmentDataPatch) {
        if let Some(depot) = patch.sending_depot {
            self.sending_depot = depot;
        }
        merge_fields!(
            self,
            patch,
            product,
            mps_customer_reference_number1,
            mps_customer_reference_number2,
        );
        if let Some(sender) = patch.sender {
            self.sender.merge(sender);
        }
        if let Some(recipient) = patch.recipient {
            self.recipient.merge(recipient);
        }
    }
}

/// A parcel in wire form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parcel {
    /// `LLLWWWHHH` in cm
    pub volume: String,
    /// Decagrams
    pub weight: u32,
    pub returns: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductAndServiceData {
    pub order_type: String,
    pub saturday_delivery: bool,
    pub guarantee: bool,
    pub predict: Option<Predict>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    pub general_shipment_data: GeneralShipmentData,
    pub parcels: Vec<Parcel>,
    pub product_and_service_data: ProductAndServiceData,
}

/// Everything sent with one `storeOrders` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreOrderMessage {
    pub print_options: PrintOptions,
    pub order: Order,
}

impl StoreOrderMessage {
    pub fn new(sending_depot: &str, defaults: &ShipmentDefaults) -> Self {
        Self {
            print_options: PrintOptions::from_defaults(defaults),
            order: Order {
                general_shipment_data: GeneralShipmentData {
                    sending_depot: sending_depot.to_string(),
                    ..GeneralShipmentData::default()
                },
                parcels: Vec::new(),
                product_and_service_data: ProductAndServiceData {
                    order_type: "consignment".to_string(),
                    saturday_delivery: defaults.saturday_delivery,
                    guarantee: false,
                    predict: None,
                },
            },
        }
    }
}

// --- Results ---

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ParcelResponse {
    #[cfg_attr(feature = "openapi", schema(example = "05222117250034"))]
    pub air_way_bill: String,
    pub tracking_link: String,
}

/// JSON body of `POST /dpd/shipments`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ShipmentRequest {
    #[serde(default)]
    pub general_shipment_data: Option<GeneralShipmentDataPatch>,
    pub sender: Address,
    pub receiver: Address,
    pub parcels: Vec<ParcelSpec>,
    #[serde(default)]
    pub predict: Option<PredictSpec>,
    #[serde(default)]
    pub saturday_delivery: Option<bool>,
    #[serde(default)]
    pub guarantee: Option<bool>,
    #[serde(default)]
    pub print_options: Option<PrintOptionsPatch>,
    /// Locale of the tracking links, e.g. `nl_NL`
    #[serde(default)]
    pub tracking_language: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ShipmentResponse {
    pub parcels: Vec<ParcelResponse>,
    /// Label document as returned by DPD, base64 encoded
    pub label_pdf_base64: Option<String>,
}
