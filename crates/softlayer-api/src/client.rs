//! Asynchronous SoftLayer REST client.
//!
//! Requests go to `{endpoint}/{Service}[/{id}]/{method}.json` with basic authentication.
//! Arguments to write calls travel as `{"parameters": [...]}`.

use crate::api::SoftLayerApi;
use crate::models::{
    ApiErrorBody, BillingItem, Hardware, Location, NetworkVlan, OrderReceipt, ProductItem,
    ProductPackage, VlanOrder,
};
use crate::Result;
use async_trait::async_trait;
use reqwest::{Client, ClientBuilder, Method, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use softlayer_core::client::{HttpSettings, RetryPolicy};
use softlayer_core::config::SoftLayerConfig;
use softlayer_core::error::RESOURCES_ATTACHED_PATTERN;
use softlayer_core::ids::{BillingItemId, OrderId, PackageId, VlanId};
use softlayer_core::query::{ObjectFilter, ObjectMask, QueryParams};
use softlayer_core::Error;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, info, warn};
use url::Url;

const USER_AGENT: &str = concat!("softlayer-api/", env!("CARGO_PKG_VERSION"));

/// SoftLayer exception class reported for missing objects.
const OBJECT_NOT_FOUND_CODE: &str = "SoftLayer_Exception_ObjectNotFound";

/// Mask used when polling for VLANs created by an order.
const ORDER_VLAN_MASK: &str = "id";

/// Mask used for package lookups.
const PACKAGE_MASK: &str = "id,name,description,isActive,type[keyName]";

/// Mask used for package item listings.
const ITEM_MASK: &str = "id,keyName,description,capacity,prices[id,locationGroupId,recurringFee]";

struct Credentials {
    username: String,
    api_key: SecretString,
}

/// Builder for [`SoftLayerClient`].
pub struct SoftLayerClientBuilder {
    base_url: Url,
    settings: HttpSettings,
    credentials: Option<Credentials>,
}

impl SoftLayerClientBuilder {
    /// Create a new builder from the provided endpoint URL.
    pub fn new(base_url: impl AsRef<str>) -> Result<Self> {
        let raw = base_url.as_ref();
        let normalized = if raw.ends_with('/') {
            raw.to_string()
        } else {
            format!("{raw}/")
        };
        let url = Url::parse(&normalized).map_err(|err| {
            Error::ConfigError(format!("Invalid SoftLayer endpoint URL `{raw}`: {err}"))
        })?;

        Ok(Self {
            base_url: url,
            settings: HttpSettings::new(),
            credentials: None,
        })
    }

    /// Create a builder carrying the endpoint, credentials and limits of `config`.
    pub fn from_config(config: &SoftLayerConfig) -> Result<Self> {
        let settings = HttpSettings::new()
            .with_request_timeout(config.timeout())
            .with_retry(RetryPolicy::new().with_max_retries(config.max_retries));

        Ok(Self {
            base_url: config.parse_endpoint_url()?,
            settings,
            credentials: None,
        }
        .with_credentials(config.username.clone(), config.api_key.expose_secret()))
    }

    /// Override the retry policy.
    #[must_use]
    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.settings.retry = retry;
        self
    }

    /// Override the connection settings.
    #[must_use]
    pub fn with_http_settings(mut self, settings: HttpSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Configure API username and key.
    #[must_use]
    pub fn with_credentials(mut self, username: impl Into<String>, api_key: &str) -> Self {
        self.credentials = Some(Credentials {
            username: username.into(),
            api_key: SecretString::from(api_key.to_string()),
        });
        self
    }

    /// Build the client instance.
    pub fn build(self) -> Result<SoftLayerClient> {
        let mut builder = ClientBuilder::new()
            .timeout(self.settings.request_timeout)
            .connect_timeout(self.settings.connect_timeout)
            .user_agent(USER_AGENT)
            .pool_idle_timeout(self.settings.idle_timeout)
            .pool_max_idle_per_host(self.settings.max_idle_per_host);

        if !self.settings.gzip {
            builder = builder.no_gzip();
        }

        let http = builder.build().map_err(|err| {
            Error::ConfigError(format!("Failed to build SoftLayer HTTP client: {err}"))
        })?;

        Ok(SoftLayerClient {
            http,
            base_url: self.base_url,
            retry_policy: self.settings.retry,
            credentials: self.credentials.map(Arc::new),
        })
    }
}

/// Asynchronous client for the SoftLayer REST API.
#[derive(Clone)]
pub struct SoftLayerClient {
    http: Client,
    base_url: Url,
    retry_policy: RetryPolicy,
    credentials: Option<Arc<Credentials>>,
}

impl SoftLayerClient {
    /// Construct an unauthenticated client directly from an endpoint URL.
    pub fn new(base_url: impl AsRef<str>) -> Result<Self> {
        SoftLayerClientBuilder::new(base_url)?.build()
    }

    /// Construct a client from validated configuration.
    pub fn from_config(config: &SoftLayerConfig) -> Result<Self> {
        SoftLayerClientBuilder::from_config(config)?.build()
    }

    /// Access the endpoint URL.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn build_url(&self, service: &str, id: Option<u64>, method: &str) -> Result<Url> {
        let path = match id {
            Some(id) => format!("{service}/{id}/{method}.json"),
            None => format!("{service}/{method}.json"),
        };
        self.base_url.join(&path).map_err(|err| {
            Error::InvalidEndpoint(format!("Invalid SoftLayer path `{path}`: {err}"))
        })
    }

    async fn get_json<R>(
        &self,
        service: &str,
        id: Option<u64>,
        method: &str,
        params: QueryParams,
    ) -> Result<R>
    where
        R: DeserializeOwned,
    {
        self.call(Method::GET, service, id, method, params, None)
            .await
    }

    async fn call<R>(
        &self,
        method: Method,
        service: &str,
        id: Option<u64>,
        api_method: &str,
        params: QueryParams,
        parameters: Option<Value>,
    ) -> Result<R>
    where
        R: DeserializeOwned,
    {
        let url = self.build_url(service, id, api_method)?;
        let pairs = params.into_pairs();
        let body = parameters.map(|parameters| json!({ "parameters": parameters }));
        // Orders are not idempotent; a POST is never replayed.
        let replayable = method != Method::POST;
        let mut attempt = 0;

        loop {
            let mut request = self.http.request(method.clone(), url.clone()).query(&pairs);
            if let Some(credentials) = &self.credentials {
                request = request.basic_auth(
                    &credentials.username,
                    Some(credentials.api_key.expose_secret()),
                );
            }
            request = request.header("Accept", "application/json");
            if let Some(payload) = &body {
                request = request.json(payload);
            }

            info!(service, method = api_method, attempt, "SoftLayer request");

            let error = match request.send().await {
                Ok(response) => {
                    let status = response.status();
                    let bytes = response.bytes().await.map_err(|err| {
                        Error::HttpError(format!("Failed to read SoftLayer response body: {err}"))
                    })?;

                    if status.is_success() {
                        return deserialize_body(service, api_method, &bytes);
                    }
                    classify_error(status, &bytes)
                }
                Err(err) => Error::from(err),
            };

            attempt += 1;
            if !replayable || !self.retry_policy.allows(attempt, &error) {
                return Err(error);
            }
            let delay = self.retry_policy.backoff(attempt);
            warn!(service, method = api_method, %error, "Retrying SoftLayer request after {:?}", delay);
            if delay > Duration::ZERO {
                sleep(delay).await;
            }
        }
    }
}

#[async_trait]
impl SoftLayerApi for SoftLayerClient {
    async fn get_datacenter_by_name(&self, name: &str) -> Result<Location> {
        let params = QueryParams::new()
            .mask(&ObjectMask::new("id,name,longName"))
            .filter(&ObjectFilter::path("name").eq(name));
        let locations: Vec<Location> = self
            .get_json("SoftLayer_Location_Datacenter", None, "getDatacenters", params)
            .await?;
        locations
            .into_iter()
            .next()
            .ok_or_else(|| Error::NotFound(format!("datacenter `{name}`")))
    }

    async fn get_package_by_type(&self, package_type: &str) -> Result<ProductPackage> {
        let params = QueryParams::new()
            .mask(&ObjectMask::new(PACKAGE_MASK))
            .filter(&ObjectFilter::path("type.keyName").eq(package_type));
        let packages: Vec<ProductPackage> = self
            .get_json("SoftLayer_Product_Package", None, "getAllObjects", params)
            .await?;
        packages.into_iter().next().ok_or_else(|| {
            Error::NotFound(format!("no product packages found for `{package_type}`"))
        })
    }

    async fn get_package_items(&self, package_id: PackageId) -> Result<Vec<ProductItem>> {
        let params = QueryParams::new().mask(&ObjectMask::new(ITEM_MASK));
        self.get_json(
            "SoftLayer_Product_Package",
            Some(package_id.get()),
            "getItems",
            params,
        )
        .await
    }

    async fn place_vlan_order(&self, order: &VlanOrder) -> Result<OrderReceipt> {
        let order = serde_json::to_value(order)?;
        self.call(
            Method::POST,
            "SoftLayer_Product_Order",
            None,
            "placeOrder",
            QueryParams::new(),
            Some(json!([order, false])),
        )
        .await
    }

    async fn list_vlans_by_order(&self, order_id: OrderId) -> Result<Vec<NetworkVlan>> {
        let params = QueryParams::new()
            .mask(&ObjectMask::new(ORDER_VLAN_MASK))
            .filter(
                &ObjectFilter::path("networkVlans.billingItem.orderItem.order.id").eq(order_id),
            );
        self.get_json("SoftLayer_Account", None, "getNetworkVlans", params)
            .await
    }

    async fn get_vlan(&self, vlan_id: VlanId, mask: &ObjectMask) -> Result<NetworkVlan> {
        let params = QueryParams::new().mask(mask);
        self.get_json(
            "SoftLayer_Network_Vlan",
            Some(vlan_id.get()),
            "getObject",
            params,
        )
        .await
    }

    async fn rename_vlan(&self, vlan_id: VlanId, name: &str) -> Result<()> {
        let updated: bool = self
            .call(
                Method::PUT,
                "SoftLayer_Network_Vlan",
                Some(vlan_id.get()),
                "editObject",
                QueryParams::new(),
                Some(json!([{ "name": name }])),
            )
            .await?;
        if updated {
            Ok(())
        } else {
            Err(Error::RemoteError {
                code: "editObject".to_string(),
                message: format!("vlan {vlan_id} was not updated"),
            })
        }
    }

    async fn get_vlan_billing_item(&self, vlan_id: VlanId) -> Result<Option<BillingItem>> {
        let item: Option<BillingItem> = self
            .get_json(
                "SoftLayer_Network_Vlan",
                Some(vlan_id.get()),
                "getBillingItem",
                QueryParams::new(),
            )
            .await?;
        // An empty object means no billing item as well.
        Ok(item.filter(|item| item.id.is_some()))
    }

    async fn cancel_billing_item(&self, billing_item_id: BillingItemId) -> Result<()> {
        let cancelled: bool = self
            .get_json(
                "SoftLayer_Billing_Item",
                Some(billing_item_id.get()),
                "cancelService",
                QueryParams::new(),
            )
            .await?;
        if cancelled {
            Ok(())
        } else {
            Err(Error::RemoteError {
                code: "cancelService".to_string(),
                message: format!("billing item {billing_item_id} was not cancelled"),
            })
        }
    }

    async fn get_router_by_hostname(&self, hostname: &str) -> Result<Hardware> {
        let params = QueryParams::new()
            .mask(&ObjectMask::new("id,hostname"))
            .filter(&ObjectFilter::path("routers.hostname").eq(hostname));
        let routers: Vec<Hardware> = self
            .get_json("SoftLayer_Account", None, "getRouters", params)
            .await?;
        routers
            .into_iter()
            .next()
            .ok_or_else(|| Error::NotFound(format!("no routers found with hostname `{hostname}`")))
    }
}

fn deserialize_body<R>(service: &str, method: &str, bytes: &[u8]) -> Result<R>
where
    R: DeserializeOwned,
{
    let parsed = if bytes.is_empty() {
        serde_json::from_value(Value::Null)
    } else {
        serde_json::from_slice(bytes)
    };
    parsed.map_err(|err| {
        Error::ParseError(format!(
            "Failed to parse SoftLayer response for `{service}::{method}`: {err}"
        ))
    })
}

/// Map a failed response onto the error taxonomy.
fn classify_error(status: StatusCode, bytes: &[u8]) -> Error {
    let parsed = serde_json::from_slice::<ApiErrorBody>(bytes).ok();
    let message = parsed.as_ref().map_or_else(
        || String::from_utf8_lossy(bytes).into_owned(),
        |body| body.error.clone(),
    );
    let code = parsed.and_then(|body| body.code);

    if status == StatusCode::NOT_FOUND || code.as_deref() == Some(OBJECT_NOT_FOUND_CODE) {
        return Error::NotFound(message);
    }
    if message.contains(RESOURCES_ATTACHED_PATTERN) {
        return Error::ResourcesAttached(message);
    }

    match (status, code) {
        (StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN, _) => {
            Error::InvalidRequest(format!("SoftLayer authentication failed: {message}"))
        }
        (
            StatusCode::TOO_MANY_REQUESTS
            | StatusCode::BAD_GATEWAY
            | StatusCode::SERVICE_UNAVAILABLE
            | StatusCode::GATEWAY_TIMEOUT,
            _,
        ) => Error::ServiceUnavailable(format!("SoftLayer temporarily unavailable: {message}")),
        // SoftLayer reports API exceptions as 500 with a structured body.
        (_, Some(code)) => Error::RemoteError { code, message },
        (status, None) if status.is_server_error() => {
            Error::ServiceUnavailable(format!("SoftLayer server error {status}: {message}"))
        }
        (status, None) => {
            debug!(%status, "Unstructured SoftLayer error body");
            Error::HttpError(format!("SoftLayer error {status}: {message}"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use softlayer_core::ids::{LocationId, PriceId};
    use wiremock::matchers::{basic_auth, body_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client(server: &MockServer) -> SoftLayerClient {
        SoftLayerClientBuilder::new(server.uri())
            .unwrap()
            .with_retry_policy(RetryPolicy::disabled())
            .with_credentials("user", "key")
            .build()
            .unwrap()
    }

    #[tokio::test]
    async fn get_datacenter_sends_filter_and_auth() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/SoftLayer_Location_Datacenter/getDatacenters.json"))
            .and(basic_auth("user", "key"))
            .and(query_param("objectFilter", r#"{"name":{"operation":"dal09"}}"#))
            .and(query_param("objectMask", "mask[id,name,longName]"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"id": 1_441_195, "name": "dal09", "longName": "Dallas 9"}
            ])))
            .mount(&server)
            .await;

        let location = client(&server).get_datacenter_by_name("dal09").await.unwrap();
        assert_eq!(location.id, Some(LocationId::new(1_441_195)));
    }

    #[tokio::test]
    async fn get_datacenter_empty_is_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/SoftLayer_Location_Datacenter/getDatacenters.json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(&server)
            .await;

        let err = client(&server)
            .get_datacenter_by_name("nowhere")
            .await
            .unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
    }

    #[tokio::test]
    async fn get_vlan_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/SoftLayer_Network_Vlan/42/getObject.json"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({
                "error": "Unable to find object with id of '42'.",
                "code": "SoftLayer_Exception_ObjectNotFound"
            })))
            .mount(&server)
            .await;

        let err = client(&server)
            .get_vlan(VlanId::new(42), &ObjectMask::new("id"))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::NotFound(msg) if msg.contains("'42'")));
    }

    #[tokio::test]
    async fn place_order_wraps_parameters() {
        let server = MockServer::start().await;
        let order = VlanOrder::new(
            PackageId::new(265),
            LocationId::new(3),
            vec![crate::models::PriceRef { id: PriceId::new(10) }],
        );
        Mock::given(method("POST"))
            .and(path("/SoftLayer_Product_Order/placeOrder.json"))
            .and(body_json(json!({
                "parameters": [
                    {
                        "complexType": "SoftLayer_Container_Product_Order_Network_Vlan",
                        "packageId": 265,
                        "location": "3",
                        "quantity": 1,
                        "prices": [{"id": 10}]
                    },
                    false
                ]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "orderId": 9_876_543,
                "orderDate": "2017-06-12T10:06:49-05:00"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let receipt = client(&server).place_vlan_order(&order).await.unwrap();
        assert_eq!(receipt.order_id, Some(OrderId::new(9_876_543)));
    }

    #[tokio::test]
    async fn place_order_is_never_replayed() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/SoftLayer_Product_Order/placeOrder.json"))
            .respond_with(ResponseTemplate::new(503).set_body_string("busy"))
            .expect(1)
            .mount(&server)
            .await;

        let client = SoftLayerClientBuilder::new(server.uri())
            .unwrap()
            .with_retry_policy(
                RetryPolicy::new().with_base_delay(Duration::from_millis(1)),
            )
            .build()
            .unwrap();
        let order = VlanOrder::new(PackageId::new(1), LocationId::new(1), Vec::new());
        let err = client.place_vlan_order(&order).await.unwrap_err();
        assert!(matches!(err, Error::ServiceUnavailable(_)));
    }

    #[tokio::test]
    async fn get_requests_retry_transient_failures() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/SoftLayer_Account/getNetworkVlans.json"))
            .respond_with(ResponseTemplate::new(503))
            .up_to_n_times(2)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/SoftLayer_Account/getNetworkVlans.json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"id": 7}])))
            .mount(&server)
            .await;

        let client = SoftLayerClientBuilder::new(server.uri())
            .unwrap()
            .with_retry_policy(
                RetryPolicy::new().with_base_delay(Duration::from_millis(1)),
            )
            .build()
            .unwrap();
        let vlans = client.list_vlans_by_order(OrderId::new(5)).await.unwrap();
        assert_eq!(vlans.len(), 1);
        assert_eq!(vlans[0].id, VlanId::new(7));
    }

    #[tokio::test]
    async fn client_errors_are_sent_once() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/SoftLayer_Network_Vlan/7/getObject.json"))
            .respond_with(ResponseTemplate::new(400).set_body_string("bad mask"))
            .expect(1)
            .mount(&server)
            .await;

        let client = SoftLayerClientBuilder::new(server.uri())
            .unwrap()
            .with_retry_policy(
                RetryPolicy::new().with_base_delay(Duration::from_millis(1)),
            )
            .build()
            .unwrap();
        let err = client
            .get_vlan(VlanId::new(7), &ObjectMask::new("id"))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::HttpError(_)));
    }

    #[tokio::test]
    async fn default_settings_do_not_retry() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/SoftLayer_Account/getNetworkVlans.json"))
            .respond_with(ResponseTemplate::new(503))
            .expect(1)
            .mount(&server)
            .await;

        let client = SoftLayerClientBuilder::new(server.uri())
            .unwrap()
            .build()
            .unwrap();
        let err = client
            .list_vlans_by_order(OrderId::new(5))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::ServiceUnavailable(_)));
    }

    #[tokio::test]
    async fn list_vlans_by_order_filters_on_order_id() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/SoftLayer_Account/getNetworkVlans.json"))
            .and(query_param(
                "objectFilter",
                r#"{"networkVlans":{"billingItem":{"orderItem":{"order":{"id":{"operation":"5"}}}}}}"#,
            ))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(&server)
            .await;

        let vlans = client(&server)
            .list_vlans_by_order(OrderId::new(5))
            .await
            .unwrap();
        assert!(vlans.is_empty());
    }

    #[tokio::test]
    async fn billing_item_null_or_empty_is_none() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/SoftLayer_Network_Vlan/1/getBillingItem.json"))
            .respond_with(ResponseTemplate::new(200).set_body_string("null"))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/SoftLayer_Network_Vlan/2/getBillingItem.json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/SoftLayer_Network_Vlan/3/getBillingItem.json"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"id": 55, "recurringFee": "0"})),
            )
            .mount(&server)
            .await;

        let client = client(&server);
        assert_eq!(client.get_vlan_billing_item(VlanId::new(1)).await.unwrap(), None);
        assert_eq!(client.get_vlan_billing_item(VlanId::new(2)).await.unwrap(), None);
        let item = client
            .get_vlan_billing_item(VlanId::new(3))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(item.id, Some(BillingItemId::new(55)));
    }

    #[tokio::test]
    async fn cancel_with_attached_servers_is_classified() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/SoftLayer_Billing_Item/55/cancelService.json"))
            .respond_with(ResponseTemplate::new(500).set_body_json(json!({
                "error": "Cannot cancel: there are servers still on the VLAN.",
                "code": "SoftLayer_Exception_Public"
            })))
            .mount(&server)
            .await;

        let err = client(&server)
            .cancel_billing_item(BillingItemId::new(55))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::ResourcesAttached(_)));
        assert!(err.is_resources_attached());
    }

    #[tokio::test]
    async fn rename_sends_edit_object() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/SoftLayer_Network_Vlan/9/editObject.json"))
            .and(body_json(json!({"parameters": [{"name": "web"}]})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!(true)))
            .expect(1)
            .mount(&server)
            .await;

        client(&server)
            .rename_vlan(VlanId::new(9), "web")
            .await
            .unwrap();
    }

    #[test]
    fn classify_structured_exception_as_remote_error() {
        let err = classify_error(
            StatusCode::INTERNAL_SERVER_ERROR,
            br#"{"error":"Invalid price","code":"SoftLayer_Exception_Order_InvalidPrice"}"#,
        );
        assert_eq!(
            err,
            Error::RemoteError {
                code: "SoftLayer_Exception_Order_InvalidPrice".to_string(),
                message: "Invalid price".to_string(),
            }
        );
    }

    #[test]
    fn classify_unstructured_responses() {
        assert!(matches!(
            classify_error(StatusCode::INTERNAL_SERVER_ERROR, b"oops"),
            Error::ServiceUnavailable(_)
        ));
        assert!(matches!(
            classify_error(StatusCode::UNAUTHORIZED, b"denied"),
            Error::InvalidRequest(_)
        ));
        assert!(matches!(
            classify_error(StatusCode::BAD_REQUEST, b"bad"),
            Error::HttpError(_)
        ));
    }

    #[test]
    fn builder_normalizes_trailing_slash() {
        let client = SoftLayerClient::new("https://api.softlayer.com/rest/v3.1").unwrap();
        assert_eq!(
            client
                .build_url("SoftLayer_Network_Vlan", Some(1), "getObject")
                .unwrap()
                .as_str(),
            "https://api.softlayer.com/rest/v3.1/SoftLayer_Network_Vlan/1/getObject.json"
        );
    }
}
