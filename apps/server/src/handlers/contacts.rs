//! Contact resource handlers.
//!
//! Submission is public; listing, mark-read and delete require a bearer
//! token.

use actix_web::{HttpResponse, web};
use uuid::Uuid;

use gazette_core::domain::Contact;
use gazette_shared::dto::{ContactRequest, ContactResponse, MessageResponse};

use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// Fixed acknowledgement returned for every accepted submission.
pub const CONTACT_ACK: &str = "Thank you for your message! We'll get back to you soon.";

fn contact_not_found() -> AppError {
    AppError::NotFound("Contact not found".to_string())
}

/// Validate and store a submission. Shared with the public contact page.
pub(crate) async fn submit_contact(state: &AppState, req: ContactRequest) -> AppResult<Contact> {
    if req.name.trim().is_empty() || req.email.trim().is_empty() || req.message.trim().is_empty() {
        return Err(AppError::BadRequest(
            "name, email and message are required".to_string(),
        ));
    }

    let contact = Contact::new(req.name, req.email, req.message);
    Ok(state.contacts.insert(contact).await?)
}

/// POST /api/contacts - public
pub async fn submit(
    state: web::Data<AppState>,
    body: web::Json<ContactRequest>,
) -> AppResult<HttpResponse> {
    submit_contact(&state, body.into_inner()).await?;

    Ok(HttpResponse::Created().json(MessageResponse::new(CONTACT_ACK)))
}

/// GET /api/contacts - auth required
pub async fn list(state: web::Data<AppState>, _identity: Identity) -> AppResult<HttpResponse> {
    let contacts = state.contacts.list_recent().await?;

    let body: Vec<ContactResponse> = contacts.into_iter().map(Into::into).collect();
    Ok(HttpResponse::Ok().json(body))
}

/// Mark a submission as read. Shared with the admin dashboard.
pub(crate) async fn mark_contact_read(state: &AppState, id: Uuid) -> AppResult<Contact> {
    let mut contact = state
        .contacts
        .find_by_id(id)
        .await?
        .ok_or_else(contact_not_found)?;

    contact.mark_read();
    Ok(state.contacts.update(contact).await?)
}

/// PUT /api/contacts/{id}/read - auth required
pub async fn mark_read(
    state: web::Data<AppState>,
    _identity: Identity,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let contact = mark_contact_read(&state, path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(ContactResponse::from(contact)))
}

/// Delete a submission. Shared with the admin dashboard.
pub(crate) async fn delete_contact(state: &AppState, id: Uuid) -> AppResult<()> {
    if state.contacts.find_by_id(id).await?.is_none() {
        return Err(contact_not_found());
    }

    state.contacts.delete(id).await?;
    Ok(())
}

/// DELETE /api/contacts/{id} - auth required
pub async fn delete(
    state: web::Data<AppState>,
    _identity: Identity,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    delete_contact(&state, path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(MessageResponse::new("Contact deleted successfully")))
}
