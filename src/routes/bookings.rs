use actix_web::{web, HttpResponse, Responder};
use chrono::Utc;
use uuid::Uuid;

use crate::db::store::PromotionStore;
use crate::models::booking::{
    ContactInfo, DraftView, PromoCodeInput, StartBookingInput, StayDetailsInput,
};
use crate::models::user::Session;
use crate::routes::errors::{booking_error_response, unauthenticated, ErrorResponse};
use crate::services::booking_flow::{BookingError, BookingFlow, FlowOutcome};
use crate::services::draft_registry::{DraftEntry, SharedDraft};
use crate::state::AppState;

fn draft_view(draft_id: &Uuid, flow: &BookingFlow) -> DraftView {
    DraftView {
        draft_id: draft_id.to_string(),
        hotel_name: flow.hotel().name.clone(),
        draft: flow.draft().clone(),
        nights: flow.nights(),
        quote: flow.quote().ok(),
        applied_promotion: flow.applied_promotion().cloned(),
        available_promotions: flow.eligible_promotions().to_vec(),
        reservation_id: flow.reservation_id().map(str::to_string),
    }
}

fn find_draft(state: &AppState, raw_id: &str) -> Result<(Uuid, SharedDraft), HttpResponse> {
    let draft_id = Uuid::parse_str(raw_id)
        .map_err(|_| HttpResponse::BadRequest().json(ErrorResponse::new("Invalid draft ID")))?;

    match state.drafts.get(&draft_id) {
        Some(draft) => Ok((draft_id, draft)),
        None => Err(HttpResponse::NotFound().json(ErrorResponse::new("Booking draft not found"))),
    }
}

/// Only the user who opened a draft may see or change it
fn authorize(entry: &DraftEntry, session: &Session) -> Result<(), HttpResponse> {
    match &session.user {
        Some(user) if session.is_authenticated => {
            if user.email == entry.owner {
                Ok(())
            } else {
                Err(HttpResponse::Forbidden().json(ErrorResponse::new("Forbidden")))
            }
        }
        _ => Err(unauthenticated(&entry.flow.return_path())),
    }
}

pub async fn start_booking(
    state: web::Data<AppState>,
    session: Session,
    body: web::Json<StartBookingInput>,
) -> impl Responder {
    let input = body.into_inner();

    let hotel = match state.hotels.find(&input.hotel_id) {
        Some(hotel) => hotel.clone(),
        None => return HttpResponse::NotFound().json(ErrorResponse::new("Hotel not found")),
    };

    let mut flow = BookingFlow::new(hotel, Utc::now().date_naive(), input.room.as_deref());

    let owner = match (&session.user, session.is_authenticated) {
        (Some(user), true) => user.email.clone(),
        _ => return unauthenticated(&flow.return_path()),
    };

    match state.store.list_promotions().await {
        Ok(promotions) => flow.load_promotions(&promotions),
        Err(err) => log::error!("Error retrieving promotions, booking at full price: {}", err),
    }

    let view_flow = flow.clone();
    let draft_id = state.drafts.insert(&owner, flow);
    log::info!("Opened booking draft {} for {}", draft_id, owner);

    HttpResponse::Created().json(draft_view(&draft_id, &view_flow))
}

pub async fn get_draft(
    state: web::Data<AppState>,
    session: Session,
    path: web::Path<String>,
) -> impl Responder {
    let (draft_id, draft) = match find_draft(&state, &path.into_inner()) {
        Ok(found) => found,
        Err(resp) => return resp,
    };

    let entry = draft.lock().await;
    if let Err(resp) = authorize(&entry, &session) {
        return resp;
    }

    HttpResponse::Ok().json(draft_view(&draft_id, &entry.flow))
}

/// Apply every field or none of them.
fn apply_stay_details(flow: &mut BookingFlow, input: StayDetailsInput) -> Result<(), BookingError> {
    let mut updated = flow.clone();

    if let Some(check_in) = input.check_in {
        updated.set_check_in(check_in)?;
    }
    if let Some(check_out) = input.check_out {
        updated.set_check_out(check_out)?;
    }
    if let Some(guests) = input.guests {
        updated.set_guests(guests)?;
    }
    if let Some(rooms) = input.rooms {
        updated.set_rooms(rooms)?;
    }
    if let Some(room_type) = input.room_type {
        updated.select_room_type(&room_type)?;
    }

    *flow = updated;
    Ok(())
}

pub async fn update_stay(
    state: web::Data<AppState>,
    session: Session,
    path: web::Path<String>,
    body: web::Json<StayDetailsInput>,
) -> impl Responder {
    let (draft_id, draft) = match find_draft(&state, &path.into_inner()) {
        Ok(found) => found,
        Err(resp) => return resp,
    };

    let mut entry = draft.lock().await;
    if let Err(resp) = authorize(&entry, &session) {
        return resp;
    }

    match apply_stay_details(&mut entry.flow, body.into_inner()) {
        Ok(()) => HttpResponse::Ok().json(draft_view(&draft_id, &entry.flow)),
        Err(err) => booking_error_response(&err),
    }
}

pub async fn update_contact(
    state: web::Data<AppState>,
    session: Session,
    path: web::Path<String>,
    body: web::Json<ContactInfo>,
) -> impl Responder {
    let (draft_id, draft) = match find_draft(&state, &path.into_inner()) {
        Ok(found) => found,
        Err(resp) => return resp,
    };

    let mut entry = draft.lock().await;
    if let Err(resp) = authorize(&entry, &session) {
        return resp;
    }

    match entry.flow.update_contact(body.into_inner()) {
        Ok(()) => HttpResponse::Ok().json(draft_view(&draft_id, &entry.flow)),
        Err(err) => booking_error_response(&err),
    }
}

pub async fn apply_promo_code(
    state: web::Data<AppState>,
    session: Session,
    path: web::Path<String>,
    body: web::Json<PromoCodeInput>,
) -> impl Responder {
    let (draft_id, draft) = match find_draft(&state, &path.into_inner()) {
        Ok(found) => found,
        Err(resp) => return resp,
    };

    let mut entry = draft.lock().await;
    if let Err(resp) = authorize(&entry, &session) {
        return resp;
    }

    match entry.flow.apply_promo_code(&body.code) {
        Ok(promo) => {
            log::info!(
                "{} ({}% off) applied to draft {}",
                promo.name,
                promo.discount_percent,
                draft_id
            );
            HttpResponse::Ok().json(draft_view(&draft_id, &entry.flow))
        }
        Err(err) => booking_error_response(&err),
    }
}

pub async fn continue_booking(
    state: web::Data<AppState>,
    session: Session,
    path: web::Path<String>,
) -> impl Responder {
    let (draft_id, draft) = match find_draft(&state, &path.into_inner()) {
        Ok(found) => found,
        Err(resp) => return resp,
    };

    let mut entry = draft.lock().await;
    if let Err(resp) = authorize(&entry, &session) {
        return resp;
    }

    let outcome = entry.flow.continue_step(&session, state.store.as_ref()).await;
    match outcome {
        Ok(FlowOutcome::BookingCompleted { reservation_id }) => {
            let view = draft_view(&draft_id, &entry.flow);
            drop(entry);
            // Finished drafts are only reachable through the reservation from here on
            state.drafts.remove(&draft_id);
            log::info!("Closed booking draft {} as reservation {}", draft_id, reservation_id);
            HttpResponse::Ok().json(view)
        }
        Ok(FlowOutcome::Advanced(_)) => HttpResponse::Ok().json(draft_view(&draft_id, &entry.flow)),
        Err(err) => booking_error_response(&err),
    }
}

pub async fn back(
    state: web::Data<AppState>,
    session: Session,
    path: web::Path<String>,
) -> impl Responder {
    let (draft_id, draft) = match find_draft(&state, &path.into_inner()) {
        Ok(found) => found,
        Err(resp) => return resp,
    };

    let mut entry = draft.lock().await;
    if let Err(resp) = authorize(&entry, &session) {
        return resp;
    }

    match entry.flow.back() {
        Ok(_) => HttpResponse::Ok().json(draft_view(&draft_id, &entry.flow)),
        Err(err) => booking_error_response(&err),
    }
}
