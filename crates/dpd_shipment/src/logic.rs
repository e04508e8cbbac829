// --- File: crates/dpd_shipment/src/logic.rs ---

use base64::{engine::general_purpose::STANDARD, Engine as _};
use tracing::{debug, error, info};

use dpd_auth::Authorisation;
use dpd_common::soap::{
    child_text, children_named, operation_element, path_text, push_child,
    push_opt_text, push_text, Element, SoapClient,
};
use dpd_common::{DpdService, SoapError};
use dpd_config::ShipmentDefaults;

use crate::error::ShipmentError;
use crate::models::{
    is_predict_country, tracking_link, Address, GeneralShipmentDataPatch, Parcel, ParcelResponse,
    ParcelSpec, Predict, PredictChannel, PredictSpec, PrintOptionsPatch, ShipmentRequest,
    ShipmentResponse, StoreOrderMessage,
};

const SHIPMENT_FAULT_MESSAGE: [&str; 2] = ["faults", "message"];

/// Logs a local validation failure before handing it back.
fn invalid(err: ShipmentError) -> ShipmentError {
    error!("DPD: {}", err);
    err
}

/// Builds one DPD order and submits it with `storeOrders`.
///
/// A `Shipment` is reusable: after [`Shipment::submit`] call
/// [`Shipment::start_new_order`] to begin the next one.
pub struct Shipment {
    authorisation: Authorisation,
    defaults: ShipmentDefaults,
    client: SoapClient,
    message: StoreOrderMessage,
    tracking_language: Option<String>,
    label: Option<Vec<u8>>,
    air_way_bills: Vec<ParcelResponse>,
}

impl Shipment {
    pub fn new(
        authorisation: &Authorisation,
        defaults: &ShipmentDefaults,
    ) -> Result<Self, ShipmentError> {
        let client = SoapClient::for_service(authorisation.config(), DpdService::Shipment)?;
        Ok(Self::with_client(authorisation, defaults, client))
    }

    pub fn with_client(
        authorisation: &Authorisation,
        defaults: &ShipmentDefaults,
        client: SoapClient,
    ) -> Self {
        let mut shipment = Self {
            authorisation: authorisation.clone(),
            defaults: defaults.clone(),
            client,
            message: StoreOrderMessage::new(&authorisation.token().depot, defaults),
            tracking_language: None,
            label: None,
            air_way_bills: Vec::new(),
        };
        shipment.start_new_order();
        shipment
    }

    /// Discards the current order, its label and air way bills.
    pub fn start_new_order(&mut self) {
        self.air_way_bills.clear();
        self.label = None;
        self.message = StoreOrderMessage::new(&self.authorisation.token().depot, &self.defaults);
    }

    pub fn add_parcel(&mut self, spec: ParcelSpec) -> Result<(), ShipmentError> {
        let length = dimension("length", spec.length).map_err(invalid)?;
        let width = dimension("width", spec.width).map_err(invalid)?;
        let height = dimension("height", spec.height).map_err(invalid)?;

        let weight = decagrams(spec.weight).map_err(invalid)?;

        self.message.order.parcels.push(Parcel {
            volume: format!("{:03}{:03}{:03}", length, width, height),
            weight,
            returns: spec.returns,
        });
        Ok(())
    }

    /// Enables DPD Predict notifications for the recipient.
    pub fn set_predict(&mut self, spec: PredictSpec) -> Result<(), ShipmentError> {
        let channel: PredictChannel = spec.channel.parse().map_err(invalid)?;
        let value = spec.value.trim().to_string();

        match channel {
            PredictChannel::Email if !is_valid_email(&value) => {
                return Err(invalid(ShipmentError::InvalidPredictEmail));
            }
            PredictChannel::Telephone if value.is_empty() => {
                return Err(invalid(ShipmentError::EmptyPredictValue("telephone")));
            }
            PredictChannel::Sms if value.is_empty() => {
                return Err(invalid(ShipmentError::EmptyPredictValue("sms")));
            }
            _ => {}
        }

        let language = if spec.language.len() == 2
            && spec.language.chars().all(|c| c.is_ascii_alphabetic())
        {
            spec.language.to_ascii_uppercase()
        } else {
            spec.language
        };

        self.message.order.product_and_service_data.predict = Some(Predict {
            channel,
            value,
            language,
        });
        Ok(())
    }

    pub fn set_general_shipment_data(&mut self, patch: GeneralShipmentDataPatch) {
        self.message.order.general_shipment_data.merge(patch);
    }

    pub fn set_saturday_delivery(&mut self, saturday_delivery: bool) {
        self.message.order.product_and_service_data.saturday_delivery = saturday_delivery;
    }

    pub fn set_guarantee(&mut self, guarantee: bool) {
        self.message.order.product_and_service_data.guarantee = guarantee;
    }

    /// The customer number always comes from the configuration; the city is
    /// sent in upper case.
    pub fn set_sender(&mut self, mut sender: Address) {
        sender.customer_number = self.authorisation.customer_number().map(str::to_string);
        sender.city = sender.city.map(|city| city.to_uppercase());
        self.message.order.general_shipment_data.sender.merge(sender);
    }

    pub fn set_receiver(&mut self, receiver: Address) {
        self.message.order.general_shipment_data.recipient.merge(receiver);
    }

    pub fn set_print_options(&mut self, patch: PrintOptionsPatch) {
        self.message.print_options.merge(patch);
    }

    /// Locale used in tracking links, e.g. `en_EN`.
    pub fn set_tracking_language(&mut self, language: impl Into<String>) {
        self.tracking_language = Some(language.into());
    }

    pub fn message(&self) -> &StoreOrderMessage {
        &self.message
    }

    /// Sends the order to DPD and collects the label and air way bills.
    pub async fn submit(&mut self) -> Result<(), ShipmentError> {
        let order = &self.message.order;
        if order.product_and_service_data.predict.is_some() {
            let country = order
                .general_shipment_data
                .recipient
                .country
                .as_deref()
                .unwrap_or_default();
            if !is_predict_country(country) {
                return Err(invalid(ShipmentError::PredictNotAvailable));
            }
        }
        if order.parcels.is_empty() {
            return Err(invalid(ShipmentError::NoParcels));
        }

        let body = encode_store_orders(&self.message);
        let response = match self
            .client
            .call("storeOrders", Some(self.authorisation.auth_header()), body)
            .await
        {
            Ok(response) => response,
            Err(SoapError::Fault(fault)) => {
                let message = fault.message_at(&SHIPMENT_FAULT_MESSAGE);
                error!("DPD Shipment: {}", message);
                return Err(ShipmentError::Fault(message));
            }
            Err(e) => return Err(e.into()),
        };

        let order_result = response.get_child("orderResult").ok_or_else(|| {
            ShipmentError::InvalidResponse("missing orderResult element".to_string())
        })?;
        let shipment_responses = order_result.get_child("shipmentResponses");

        if let Some(faults) = shipment_responses.and_then(|r| r.get_child("faults")) {
            let message = child_text(faults, "message").unwrap_or_default();
            debug!("DPD: {}", message);
            return Err(ShipmentError::Rejected(message));
        }

        self.label = path_text(order_result, &["parcellabelsPDF"])
            .map(|encoded| decode_label(&encoded))
            .transpose()?;

        let language = self.tracking_language.as_deref();
        let parcels = shipment_responses
            .into_iter()
            .flat_map(|r| children_named(r, "parcelInformation"))
            .filter_map(|info| child_text(info, "parcelLabelNumber"))
            .map(|awb| ParcelResponse {
                tracking_link: tracking_link(language, &awb),
                air_way_bill: awb,
            });
        self.air_way_bills.extend(parcels);

        info!(
            "DPD: shipment stored, {} parcel(s) labelled",
            self.air_way_bills.len()
        );
        Ok(())
    }

    pub fn parcel_responses(&self) -> &[ParcelResponse] {
        &self.air_way_bills
    }

    /// The label document of the last submitted order.
    pub fn labels(&self) -> Option<&[u8]> {
        self.label.as_deref()
    }
}

/// Applies a JSON shipment request and submits it.
pub async fn create_shipment(
    authorisation: &Authorisation,
    defaults: &ShipmentDefaults,
    request: ShipmentRequest,
) -> Result<ShipmentResponse, ShipmentError> {
    let mut shipment = Shipment::new(authorisation, defaults)?;

    if let Some(patch) = request.general_shipment_data {
        shipment.set_general_shipment_data(patch);
    }
    shipment.set_sender(request.sender);
    shipment.set_receiver(request.receiver);
    for parcel in request.parcels {
        shipment.add_parcel(parcel)?;
    }
    if let Some(predict) = request.predict {
        shipment.set_predict(predict)?;
    }
    if let Some(saturday_delivery) = request.saturday_delivery {
        shipment.set_saturday_delivery(saturday_delivery);
    }
    if let Some(guarantee) = request.guarantee {
        shipment.set_guarantee(guarantee);
    }
    if let Some(print_options) = request.print_options {
        shipment.set_print_options(print_options);
    }
    if let Some(language) = request.tracking_language {
        shipment.set_tracking_language(language);
    }

    shipment.submit().await?;

    Ok(ShipmentResponse {
        parcels: shipment.parcel_responses().to_vec(),
        label_pdf_base64: shipment.labels().map(|label| STANDARD.encode(label)),
    })
}

/// Rounds a dimension up to whole centimetres; it must fit three digits.
fn dimension(name: &'static str, value: f64) -> Result<u32, ShipmentError> {
    if value.is_nan() || value < 1.0 {
        return Err(ShipmentError::DimensionTooSmall(name));
    }
    let ceiled = value.ceil();
    if ceiled > 999.0 {
        return Err(ShipmentError::DimensionTooLarge(name));
    }
    Ok(ceiled as u32)
}

/// Grams to whole decagrams, rounded up.
fn decagrams(grams: f64) -> Result<u32, ShipmentError> {
    if !grams.is_finite() || grams < 0.0 {
        return Err(ShipmentError::InvalidWeight);
    }
    let decagrams = (grams / 10.0).ceil();
    if decagrams > f64::from(u32::MAX) {
        return Err(ShipmentError::WeightTooLarge(grams));
    }
    Ok(decagrams as u32)
}

fn is_valid_email(value: &str) -> bool {
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && !value.chars().any(char::is_whitespace)
        && domain.contains('.')
        && domain.split('.').all(|label| {
            !label.is_empty() && !label.starts_with('-') && !label.ends_with('-')
        })
}

fn decode_label(encoded: &str) -> Result<Vec<u8>, ShipmentError> {
    let compact: String = encoded.chars().filter(|c| !c.is_whitespace()).collect();
    STANDARD
        .decode(compact)
        .map_err(|e| ShipmentError::InvalidResponse(format!("label is not base64: {}", e)))
}

fn bool_text(value: bool) -> &'static str {
    if value {
        "true"
    } else {
        "false"
    }
}

// --- storeOrders encoding, in ShipmentService 3.3 schema order ---

fn encode_store_orders(message: &StoreOrderMessage) -> Element {
    let mut body = operation_element("ns", "storeOrders", DpdService::Shipment.namespace());

    let options = &message.print_options;
    let mut print_options = Element::new("printOptions");
    push_text(&mut print_options, "printerLanguage", options.printer_language.as_str());
    push_text(&mut print_options, "paperFormat", options.paper_format.as_str());
    push_text(&mut print_options, "startPosition", options.start_position.as_str());
    push_child(&mut body, print_options);

    let order = &message.order;
    let data = &order.general_shipment_data;
    let mut order_elem = Element::new("order");

    let mut general = Element::new("generalShipmentData");
    push_opt_text(
        &mut general,
        "mpsCustomerReferenceNumber1",
        data.mps_customer_reference_number1.as_deref(),
    );
    push_opt_text(
        &mut general,
        "mpsCustomerReferenceNumber2",
        data.mps_customer_reference_number2.as_deref(),
    );
    push_text(&mut general, "sendingDepot", data.sending_depot.as_str());
    push_opt_text(&mut general, "product", data.product.as_deref());
    push_child(&mut general, encode_address("sender", &data.sender));
    push_child(&mut general, encode_address("recipient", &data.recipient));
    push_child(&mut order_elem, general);

    for parcel in &order.parcels {
        let mut parcel_elem = Element::new("parcels");
        push_text(&mut parcel_elem, "volume", parcel.volume.as_str());
        push_text(&mut parcel_elem, "weight", parcel.weight.to_string());
        if parcel.returns {
            push_text(&mut parcel_elem, "returns", "true");
        }
        push_child(&mut order_elem, parcel_elem);
    }

    let services = &order.product_and_service_data;
    let mut service_elem = Element::new("productAndServiceData");
    push_text(&mut service_elem, "orderType", services.order_type.as_str());
    push_text(
        &mut service_elem,
        "saturdayDelivery",
        bool_text(services.saturday_delivery),
    );
    push_text(&mut service_elem, "guarantee", bool_text(services.guarantee));
    if let Some(predict) = &services.predict {
        let mut predict_elem = Element::new("predict");
        push_text(&mut predict_elem, "channel", predict.channel.code().to_string());
        push_text(&mut predict_elem, "value", predict.value.as_str());
        push_text(&mut predict_elem, "language", predict.language.as_str());
        push_child(&mut service_elem, predict_elem);
    }
    push_child(&mut order_elem, service_elem);

    push_child(&mut body, order_elem);
    body
}

fn encode_address(name: &str, address: &Address) -> Element {
    let mut elem = Element::new(name);
    let fields = [
        ("name1", &address.name1),
        ("name2", &address.name2),
        ("street", &address.street),
        ("houseNo", &address.house_no),
        ("state", &address.state),
        ("country", &address.country),
        ("zipCode", &address.zip_code),
        ("city", &address.city),
        ("gln", &address.gln),
        ("customerNumber", &address.customer_number),
        ("contact", &address.contact),
        ("phone", &address.phone),
        ("fax", &address.fax),
        ("email", &address.email),
        ("comment", &address.comment),
    ];
    for (field, value) in fields {
        push_opt_text(&mut elem, field, value.as_deref());
    }
    elem
}
