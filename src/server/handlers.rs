//! MCP tool handlers for the site server.
//!
//! This module implements the MCP tools using the rmcp SDK's tool_router pattern.
//! Validation and dispatch failures are ordinary tool results carrying the form's
//! banner; only malformed requests (unknown partner or form) are protocol errors.

use crate::forms::{Banner, SubmissionForm, SubmissionController, SubmitOutcome};
use crate::models::{ContactFields, NewsletterFields};
use crate::site::{FormId, Site};
use rmcp::handler::server::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::*;
use rmcp::{tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler};
use schemars::JsonSchema;
use serde::Deserialize;
use std::borrow::Cow;
use std::sync::Arc;

/// The MCP server that exposes the Sandüich Republic site.
#[derive(Clone)]
pub struct SiteMcpServer {
    site: Arc<Site>,
    tool_router: ToolRouter<Self>,
}

#[tool_handler]
impl ServerHandler for SiteMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities {
                tools: Some(Default::default()),
                ..Default::default()
            },
            server_info: Implementation {
                name: "sanduich-site".into(),
                version: env!("CARGO_PKG_VERSION").into(),
                icons: None,
                title: Some("Sandüich Republic".into()),
                website_url: Some("https://sanduichrepublic.com".into()),
            },
            instructions: Some(
                "Sandüich Republic sandwich shop. Browse the menu, order through a delivery \
                 partner, send the shop a message or subscribe to the newsletter."
                    .into(),
            ),
        }
    }
}

#[derive(Debug, Deserialize, JsonSchema)]
struct GetMenuParams {
    #[serde(default)]
    category: Option<String>,
}

#[derive(Debug, Deserialize, JsonSchema)]
struct OrderFromPartnerParams {
    partner: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
struct AddToOrderParams {
    item: String,
    category: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
struct OpenOrderModalParams {
    /// true when triggered from the menu page "Order Now" button
    #[serde(default)]
    from_menu_page: bool,
}

#[derive(Debug, Deserialize, JsonSchema)]
struct SendContactMessageParams {
    name: String,
    email: String,
    message: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
struct SubscribeNewsletterParams {
    email: String,
    /// "footer" or "contact" (default: "footer")
    #[serde(default)]
    form: Option<String>,
}

#[derive(Debug, Deserialize, JsonSchema)]
struct FormStatusParams {
    form: String,
}

fn to_mcp_error(e: impl std::fmt::Display) -> McpError {
    McpError {
        code: ErrorCode::INTERNAL_ERROR,
        message: Cow::from(e.to_string()),
        data: None,
    }
}

fn invalid_params(message: impl Into<String>) -> McpError {
    McpError {
        code: ErrorCode::INVALID_PARAMS,
        message: Cow::from(message.into()),
        data: None,
    }
}

fn json_result(value: &serde_json::Value) -> Result<CallToolResult, McpError> {
    Ok(CallToolResult::success(vec![Content::text(
        serde_json::to_string_pretty(value).map_err(to_mcp_error)?,
    )]))
}

fn outcome_name(outcome: &SubmitOutcome) -> &'static str {
    match outcome {
        SubmitOutcome::Ignored => "ignored",
        SubmitOutcome::Rejected(_) => "rejected",
        SubmitOutcome::Sent => "sent",
        SubmitOutcome::Failed => "failed",
    }
}

fn banner_json(banner: Option<Banner>) -> serde_json::Value {
    banner
        .map(|b| serde_json::json!({ "kind": b.kind, "message": b.message }))
        .unwrap_or(serde_json::Value::Null)
}

fn form_status_json<F: SubmissionForm>(
    id: FormId,
    form: &SubmissionController<F>,
) -> serde_json::Value {
    let status = form.status();
    serde_json::json!({
        "form": id.as_str(),
        "status": status.name(),
        "submitting": status.is_submitting(),
        "banner": banner_json(form.banner()),
    })
}

fn submit_json<F: SubmissionForm>(
    id: FormId,
    form: &SubmissionController<F>,
    outcome: &SubmitOutcome,
) -> serde_json::Value {
    let mut value = form_status_json(id, form);
    value["outcome"] = serde_json::Value::from(outcome_name(outcome));
    value
}

#[tool_router]
impl SiteMcpServer {
    /// Create a new site MCP server.
    pub fn new(site: Arc<Site>) -> Self {
        Self {
            site,
            tool_router: Self::tool_router(),
        }
    }

    pub fn site(&self) -> &Site {
        &self.site
    }

    /// Get the menu, optionally a single category.
    #[tool(
        description = "Get the Sandüich Republic menu. Optionally pass a category name (e.g. \"Sandwiches\") to get just that category."
    )]
    async fn get_menu(
        &self,
        params: Parameters<GetMenuParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;
        let menu = self.site.menu();

        let value = match params.category {
            Some(name) => {
                let category = menu
                    .category(&name)
                    .ok_or_else(|| invalid_params(format!("Unknown menu category '{}'", name)))?;
                serde_json::to_value(category).map_err(to_mcp_error)?
            }
            None => serde_json::to_value(menu).map_err(to_mcp_error)?,
        };

        json_result(&value)
    }

    /// Home page featured items.
    #[tool(description = "Get the featured items: the first item of every menu category")]
    async fn get_featured_items(&self) -> Result<CallToolResult, McpError> {
        let featured = self.site.featured_items();
        json_result(&serde_json::to_value(&featured).map_err(to_mcp_error)?)
    }

    /// Shop name, address and opening hours.
    #[tool(description = "Get the shop's location, address and opening hours")]
    async fn get_shop_info(&self) -> Result<CallToolResult, McpError> {
        json_result(&serde_json::to_value(self.site.shop()).map_err(to_mcp_error)?)
    }

    #[tool(description = "Get the site navigation links")]
    async fn get_navigation(&self) -> Result<CallToolResult, McpError> {
        json_result(&serde_json::json!({
            "links": self.site.header().navigation(),
        }))
    }

    /// List the delivery partners.
    #[tool(
        description = "List delivery partners (DoorDash, UberEats, Grubhub) with availability, estimated time, fee and rating"
    )]
    async fn list_delivery_partners(&self) -> Result<CallToolResult, McpError> {
        let partners = self.site.partners().list_partners();
        json_result(&serde_json::to_value(partners).map_err(to_mcp_error)?)
    }

    /// Order through a delivery partner.
    #[tool(
        description = "Order through a delivery partner by name. Returns the partner's storefront URL when the partner is available."
    )]
    async fn order_from_partner(
        &self,
        params: Parameters<OrderFromPartnerParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;
        let directory = self.site.partners();

        let partner = directory.find(&params.partner).ok_or_else(|| {
            invalid_params(format!("Unknown delivery partner '{}'", params.partner))
        })?;

        directory.open_partner(partner);

        let value = if partner.available {
            serde_json::json!({
                "partner": partner.name,
                "opened": true,
                "url": partner.url,
            })
        } else {
            serde_json::json!({
                "partner": partner.name,
                "opened": false,
                "message": "Currently unavailable - try another partner",
            })
        };

        json_result(&value)
    }

    /// Menu page "add to order".
    #[tool(
        description = "Add a menu item to an order. Opens the order dialog listing delivery partners."
    )]
    async fn add_to_order(
        &self,
        params: Parameters<AddToOrderParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;
        self.site
            .add_to_order(&params.item, &params.category)
            .ok_or_else(|| {
                invalid_params(format!(
                    "Unknown menu item '{}' in category '{}'",
                    params.item, params.category
                ))
            })?;

        json_result(&serde_json::json!({
            "order_modal_open": self.site.is_order_modal_open(),
            "partners": self.site.partners().list_partners(),
        }))
    }

    #[tool(description = "Open the order dialog listing delivery partners")]
    async fn open_order_modal(
        &self,
        params: Parameters<OpenOrderModalParams>,
    ) -> Result<CallToolResult, McpError> {
        if params.0.from_menu_page {
            self.site.menu_order_now();
        } else {
            self.site.header_order_now();
        }
        json_result(&serde_json::json!({
            "order_modal_open": self.site.is_order_modal_open(),
            "partners": self.site.partners().list_partners(),
        }))
    }

    #[tool(description = "Close the order dialog")]
    async fn close_order_modal(&self) -> Result<CallToolResult, McpError> {
        self.site.close_order_modal();
        json_result(&serde_json::json!({
            "order_modal_open": self.site.is_order_modal_open(),
        }))
    }

    /// Submit the contact form.
    #[tool(
        description = "Send a message to the shop through the contact form. Name, a valid email and a message are required."
    )]
    async fn send_contact_message(
        &self,
        params: Parameters<SendContactMessageParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;
        let form = self.site.contact_form();

        tracing::info!("MCP Handler: send_contact_message called");
        tracing::debug!(
            "Parameters: name_len={}, email={}, message_len={}",
            params.name.len(),
            params.email,
            params.message.len()
        );

        let fields = ContactFields::new(params.name, params.email, params.message);
        let outcome = form.submit_with(fields).await;

        json_result(&submit_json(FormId::Contact, form, &outcome))
    }

    /// Submit one of the newsletter forms.
    #[tool(
        description = "Subscribe an email address to the shop newsletter. Optional form: \"footer\" (default) or \"contact\"."
    )]
    async fn subscribe_newsletter(
        &self,
        params: Parameters<SubscribeNewsletterParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;

        let id = match params.form.as_deref().map(str::trim) {
            None | Some("") | Some("footer") => FormId::FooterNewsletter,
            Some("contact") => FormId::ContactNewsletter,
            Some(other) => other.parse::<FormId>().map_err(invalid_params)?,
        };
        let form = self
            .site
            .newsletter(id)
            .ok_or_else(|| invalid_params(format!("'{}' is not a newsletter form", id)))?;

        tracing::info!(form = %id, "MCP Handler: subscribe_newsletter called");

        let outcome = form.submit_with(NewsletterFields::new(params.email)).await;

        json_result(&submit_json(id, form, &outcome))
    }

    /// Read a form's status and banner.
    #[tool(
        description = "Get the current status and banner of a form: contact, footer_newsletter or contact_newsletter"
    )]
    async fn get_form_status(
        &self,
        params: Parameters<FormStatusParams>,
    ) -> Result<CallToolResult, McpError> {
        let id = params.0.form.parse::<FormId>().map_err(invalid_params)?;

        let value = match self.site.newsletter(id) {
            Some(form) => form_status_json(id, form),
            None => form_status_json(id, self.site.contact_form()),
        };

        json_result(&value)
    }

    #[tool(description = "Get submission and provider call counters")]
    async fn get_metrics(&self) -> Result<CallToolResult, McpError> {
        json_result(&serde_json::to_value(self.site.metrics().summary()).map_err(to_mcp_error)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::NotificationGateway;
    use crate::error::{DispatchError, DispatchResult};
    use crate::metrics::Metrics;
    use crate::models::{Menu, TemplateParams};
    use crate::partners::{AnalyticsHandle, LogOnlyOpener};
    use crate::site::SiteDeps;
    use async_trait::async_trait;
    use std::time::Duration;
    use tokio::sync::Notify;

    struct AcceptAll;

    #[async_trait]
    impl NotificationGateway for AcceptAll {
        async fn send(&self, _params: &TemplateParams) -> DispatchResult<()> {
            Ok(())
        }
    }

    /// Holds each send until released, then fails it.
    #[derive(Default)]
    struct HeldThenFails {
        started: Notify,
        release: Notify,
    }

    #[async_trait]
    impl NotificationGateway for HeldThenFails {
        async fn send(&self, _params: &TemplateParams) -> DispatchResult<()> {
            self.started.notify_one();
            self.release.notified().await;
            Err(DispatchError::Timeout)
        }
    }

    fn server() -> SiteMcpServer {
        server_with(Arc::new(AcceptAll))
    }

    fn server_with(contact_gateway: Arc<dyn NotificationGateway>) -> SiteMcpServer {
        let site = Site::new(SiteDeps {
            contact_gateway,
            newsletter_gateway: Arc::new(AcceptAll),
            analytics: AnalyticsHandle::none(),
            opener: Arc::new(LogOnlyOpener),
            menu: Menu::bundled().unwrap(),
            recipient_name: "Sandüich Republic".to_string(),
            status_display: Duration::from_secs(3),
            metrics: Metrics::new(),
        });
        SiteMcpServer::new(Arc::new(site))
    }

    /// Parse the JSON text payload of a tool result.
    fn payload(result: CallToolResult) -> serde_json::Value {
        let raw = serde_json::to_value(&result).unwrap();
        let text = raw["content"][0]["text"].as_str().unwrap();
        serde_json::from_str(text).unwrap()
    }

    #[tokio::test]
    async fn test_get_menu_category() {
        let result = server()
            .get_menu(Parameters(GetMenuParams {
                category: Some("sandwiches".to_string()),
            }))
            .await
            .unwrap();

        let value = payload(result);
        assert_eq!(value["name"], "Sandwiches");
        assert!(value["items"].as_array().unwrap().len() > 1);
    }

    #[tokio::test]
    async fn test_get_menu_unknown_category() {
        let err = server()
            .get_menu(Parameters(GetMenuParams {
                category: Some("Desserts".to_string()),
            }))
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::INVALID_PARAMS);
    }

    #[tokio::test]
    async fn test_order_from_unknown_partner() {
        let err = server()
            .order_from_partner(Parameters(OrderFromPartnerParams {
                partner: "Postmates".to_string(),
            }))
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::INVALID_PARAMS);
    }

    #[tokio::test]
    async fn test_order_from_partner_returns_url() {
        let server = server();
        let value = payload(
            server
                .order_from_partner(Parameters(OrderFromPartnerParams {
                    partner: "doordash".to_string(),
                }))
                .await
                .unwrap(),
        );

        assert_eq!(value["partner"], "DoorDash");
        assert_eq!(value["opened"], true);
        assert_eq!(server.site().metrics().partner_opens_total(), 1);
    }

    #[tokio::test]
    async fn test_contact_validation_is_a_tool_result() {
        let value = payload(
            server()
                .send_contact_message(Parameters(SendContactMessageParams {
                    name: "Ana".to_string(),
                    email: "nope".to_string(),
                    message: "Hola".to_string(),
                }))
                .await
                .unwrap(),
        );

        assert_eq!(value["outcome"], "rejected");
        assert_eq!(value["status"], "error");
        assert_eq!(value["banner"]["kind"], "error");
        assert_eq!(value["banner"]["message"], "Please enter a valid email");
    }

    #[tokio::test]
    async fn test_subscribe_from_contact_page() {
        let server = server();
        let value = payload(
            server
                .subscribe_newsletter(Parameters(SubscribeNewsletterParams {
                    email: "fan@example.com".to_string(),
                    form: Some("contact".to_string()),
                }))
                .await
                .unwrap(),
        );

        assert_eq!(value["form"], "contact_newsletter");
        assert_eq!(value["outcome"], "sent");
        assert_eq!(value["banner"]["kind"], "success");

        // The footer instance is untouched
        let footer = payload(
            server
                .get_form_status(Parameters(FormStatusParams {
                    form: "footer_newsletter".to_string(),
                }))
                .await
                .unwrap(),
        );
        assert_eq!(footer["status"], "idle");
        assert!(footer["banner"].is_null());
    }

    #[tokio::test]
    async fn test_subscribe_rejects_unknown_form() {
        let err = server()
            .subscribe_newsletter(Parameters(SubscribeNewsletterParams {
                email: "fan@example.com".to_string(),
                form: Some("sidebar".to_string()),
            }))
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::INVALID_PARAMS);
    }

    #[tokio::test]
    async fn test_ignored_contact_message_keeps_in_flight_input() {
        let gateway = Arc::new(HeldThenFails::default());
        let server = server_with(gateway.clone());

        let first = tokio::spawn({
            let server = server.clone();
            async move {
                server
                    .send_contact_message(Parameters(SendContactMessageParams {
                        name: "Ana".to_string(),
                        email: "ana@example.com".to_string(),
                        message: "first".to_string(),
                    }))
                    .await
            }
        });
        gateway.started.notified().await;

        let second = payload(
            server
                .send_contact_message(Parameters(SendContactMessageParams {
                    name: "Bob".to_string(),
                    email: "bob@example.com".to_string(),
                    message: "second".to_string(),
                }))
                .await
                .unwrap(),
        );
        assert_eq!(second["outcome"], "ignored");

        gateway.release.notify_one();
        let first = payload(first.await.unwrap().unwrap());
        assert_eq!(first["outcome"], "failed");

        let fields = server.site().contact_form().fields();
        assert_eq!(fields.name, "Ana");
        assert_eq!(fields.message, "first");
    }

    #[tokio::test]
    async fn test_add_to_order_unknown_item() {
        let server = server();
        let err = server
            .add_to_order(Parameters(AddToOrderParams {
                item: "Cheesecake".to_string(),
                category: "Sandwiches".to_string(),
            }))
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::INVALID_PARAMS);
        assert!(!server.site().is_order_modal_open());
    }

    #[tokio::test]
    async fn test_add_to_order_opens_modal() {
        let server = server();
        let value = payload(
            server
                .add_to_order(Parameters(AddToOrderParams {
                    item: "El Cubano".to_string(),
                    category: "Sandwiches".to_string(),
                }))
                .await
                .unwrap(),
        );

        assert_eq!(value["order_modal_open"], true);
    }
}
