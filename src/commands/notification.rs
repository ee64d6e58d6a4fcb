//! Recipient-scoped notification commands.

use clap::Args;
use serde::Serialize;
use uuid::Uuid;

use frontdesk_core::codec::IdCodec;
use frontdesk_core::config::AppConfig;
use frontdesk_core::error::AppError;
use frontdesk_core::result::AppResult;
use frontdesk_core::types::{NotificationId, PageRequest, TenantId, UserId};
use frontdesk_database::StoreManager;
use frontdesk_database::store::NotificationFilter;
use frontdesk_entity::notification::{EventType, Notification};
use frontdesk_service::RequestContext;

use crate::output;

/// Tenant and recipient a command acts as
#[derive(Debug, Args)]
pub struct ScopeArgs {
    /// Tenant id
    #[arg(long)]
    pub tenant: TenantId,
    /// Recipient user id
    #[arg(long)]
    pub user: UserId,
}

/// Arguments for the list command
#[derive(Debug, Args)]
pub struct ListArgs {
    #[command(flatten)]
    pub scope: ScopeArgs,
    /// Only unread notifications
    #[arg(long, conflicts_with = "read")]
    pub unread: bool,
    /// Only read notifications
    #[arg(long)]
    pub read: bool,
    /// Only notifications of this event type (e.g. `task.assigned`)
    #[arg(long)]
    pub event_type: Option<EventType>,
    /// Page number, starting at 1
    #[arg(long, default_value_t = 1)]
    pub page: u64,
    /// Page size (1..=100)
    #[arg(long)]
    pub per_page: Option<u64>,
}

/// Arguments for the read command
#[derive(Debug, Args)]
pub struct ReadArgs {
    #[command(flatten)]
    pub scope: ScopeArgs,
    /// Notification UUID or public token
    #[arg(long)]
    pub id: String,
}

/// A notification with its public token.
#[derive(Debug, Serialize)]
struct NotificationView<'a> {
    token: String,
    #[serde(flatten)]
    notification: &'a Notification,
}

impl<'a> NotificationView<'a> {
    fn new(codec: &IdCodec, notification: &'a Notification) -> AppResult<Self> {
        Ok(Self {
            token: codec.encode_uuid(notification.id.into_uuid())?,
            notification,
        })
    }
}

/// List a recipient's notifications
pub async fn list(args: &ListArgs, config: &AppConfig) -> Result<(), AppError> {
    let codec = IdCodec::new(&config.sqids)?;
    let (stores, service) = super::create_service(config).await?;
    let ctx = resolve_caller(&stores, &args.scope).await?;

    let is_read = match (args.unread, args.read) {
        (true, _) => Some(false),
        (_, true) => Some(true),
        _ => None,
    };
    let filter = NotificationFilter {
        is_read,
        event_type: args.event_type,
    };
    let page = PageRequest::new(
        args.page,
        args.per_page
            .unwrap_or(config.notifications.default_page_size),
    );

    let result = service.list_notifications(&ctx, filter, Some(page)).await?;
    let items = result
        .page
        .items
        .iter()
        .map(|n| NotificationView::new(&codec, n))
        .collect::<AppResult<Vec<_>>>()?;

    output::print_json(&serde_json::json!({
        "items": items,
        "page": result.page.page,
        "page_size": result.page.page_size,
        "total_items": result.page.total_items,
        "total_pages": result.page.total_pages,
        "has_next": result.page.has_next,
        "unread_count": result.unread_count,
    }));
    Ok(())
}

/// Mark one notification as read
pub async fn read(args: &ReadArgs, config: &AppConfig) -> Result<(), AppError> {
    let codec = IdCodec::new(&config.sqids)?;
    let id = parse_notification_id(&codec, &args.id)?;
    let (stores, service) = super::create_service(config).await?;
    let ctx = resolve_caller(&stores, &args.scope).await?;

    let notification = service.mark_read(&ctx, id).await?;
    output::print_json(&NotificationView::new(&codec, &notification)?);
    Ok(())
}

/// Mark every unread notification of a recipient as read
pub async fn read_all(args: &ScopeArgs, config: &AppConfig) -> Result<(), AppError> {
    let (stores, service) = super::create_service(config).await?;
    let ctx = resolve_caller(&stores, args).await?;

    let updated = service.mark_all_read(&ctx).await?;
    output::print_json(&serde_json::json!({ "updated": updated }));
    Ok(())
}

/// Look the caller up so the request carries their role.
async fn resolve_caller(stores: &StoreManager, scope: &ScopeArgs) -> AppResult<RequestContext> {
    let user = stores
        .directory()
        .find_users(scope.tenant, &[scope.user])
        .await?
        .into_iter()
        .next()
        .ok_or_else(|| {
            AppError::not_found(format!(
                "User {} not found in tenant {}",
                scope.user, scope.tenant
            ))
        })?;
    Ok(RequestContext::for_user(&user))
}

fn parse_notification_id(codec: &IdCodec, raw: &str) -> AppResult<NotificationId> {
    Uuid::parse_str(raw)
        .ok()
        .or_else(|| codec.decode_uuid(raw))
        .map(NotificationId::from_uuid)
        .ok_or_else(|| {
            AppError::validation(format!("'{raw}' is neither a UUID nor a notification token"))
        })
}
